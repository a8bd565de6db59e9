use super::{release, spawn_root};
use crate::constants::*;
use crate::error::RoomError;
use crate::event::{EventContext, MiniEvent, StopHandle};
use crate::input::InputEvent;
use crate::scene::{NodeId, NodeKind, Rgb, Transform};
use crate::schedule::{ActiveFlag, TaskControl};
use glam::Vec3;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;

/// The letters of "Aquarius Independence" lined up in front of the camera,
/// drifting upward. Every pointer press makes them all rise faster.
#[derive(Clone, Copy, Debug, Default)]
pub struct AquariusLetters;

struct Letter {
    node: NodeId,
    position: Vec3,
    speed: f32,
    sway: f32,
}

impl MiniEvent for AquariusLetters {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError> {
        let mut rng = ctx.rng();
        let root = spawn_root(&ctx.scene);
        let anchor = ctx.camera.eye + ctx.camera.forward() * AQUARIUS_DISTANCE;
        let half = AQUARIUS_TEXT.chars().count() as f32 / 2.0;

        let mut letters = Vec::new();
        {
            let mut scene = ctx.scene.borrow_mut();
            for (i, ch) in AQUARIUS_TEXT.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let position = anchor + Vec3::X * ((i as f32 - half) * AQUARIUS_SPACING);
                let node = scene.spawn(
                    Some(root),
                    NodeKind::Sprite {
                        glyph: ch.to_string(),
                        color: Rgb(AQUARIUS_COLOR),
                        size: AQUARIUS_LETTER_SIZE,
                    },
                    Transform::from_translation(position),
                );
                letters.push(Letter {
                    node,
                    position,
                    speed: rng.gen_range(AQUARIUS_MIN_SPEED..AQUARIUS_MAX_SPEED),
                    sway: rng.gen_range(0.0..0.5),
                });
            }
        }
        let letters = Rc::new(RefCell::new(letters));

        let flag = ActiveFlag::new();
        let listener = {
            let letters = letters.clone();
            let flag = flag.clone();
            ctx.input.attach(move |event| {
                if flag.is_active() && *event == InputEvent::PointerDown {
                    for letter in letters.borrow_mut().iter_mut() {
                        letter.speed += AQUARIUS_BOOST;
                    }
                }
            })
        };

        let scene = ctx.scene.clone();
        ctx.scheduler.spawn("aquarius", &flag, move |now| {
            let t = (now * 0.001) as f32;
            let mut scene = scene.borrow_mut();
            for letter in letters.borrow_mut().iter_mut() {
                letter.position.y += letter.speed;
                letter.position.x += (t + letter.sway).sin() * AQUARIUS_SWAY;
                letter.position.z += (t + letter.sway).cos() * AQUARIUS_SWAY;
                scene.set_transform(letter.node, Transform::from_translation(letter.position));
            }
            TaskControl::Continue
        });

        let input = ctx.input.clone();
        let mut inner = release(ctx.scene.clone(), root, flag);
        Ok(StopHandle::new(move || {
            input.detach(listener);
            inner.stop();
        }))
    }
}
