use super::{ease_out, release, spawn_root, view_point};
use crate::constants::*;
use crate::error::RoomError;
use crate::event::{EventContext, MiniEvent, StopHandle};
use crate::scene::{NodeId, NodeKind, Rgb, Transform};
use crate::schedule::{ActiveFlag, TaskControl};
use rand::Rng;

/// A burst of sheep scattered over the view, each floating up and fading
/// out on its own clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SheepRain;

struct Sheep {
    node: NodeId,
    base: Transform,
    duration_ms: f64,
}

impl MiniEvent for SheepRain {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError> {
        let mut rng = ctx.rng();
        let root = spawn_root(&ctx.scene);
        let up = ctx.camera.screen_up();

        let mut flock = Vec::with_capacity(SHEEP_COUNT);
        {
            let mut scene = ctx.scene.borrow_mut();
            for _ in 0..SHEEP_COUNT {
                let u = rng.gen_range(-0.9..0.9);
                let v = rng.gen_range(-0.9..0.9);
                let base = Transform::from_translation(view_point(
                    &ctx.camera,
                    SHEEP_DISTANCE,
                    u,
                    v,
                ));
                let node = scene.spawn(
                    Some(root),
                    NodeKind::Sprite {
                        glyph: SHEEP_GLYPH.to_string(),
                        color: Rgb(0xffffff),
                        size: rng.gen_range(SHEEP_MIN_SIZE..SHEEP_MAX_SIZE),
                    },
                    base,
                );
                flock.push(Sheep {
                    node,
                    base,
                    duration_ms: rng.gen_range(SHEEP_MIN_MS..SHEEP_MAX_MS),
                });
            }
        }

        let flag = ActiveFlag::new();
        let scene = ctx.scene.clone();
        let started_ms = ctx.now_ms;
        ctx.scheduler.spawn("sheep", &flag, move |now| {
            let elapsed = now - started_ms;
            let mut scene = scene.borrow_mut();
            flock.retain(|sheep| {
                let p = (elapsed / sheep.duration_ms) as f32;
                if p >= 1.0 {
                    scene.despawn(sheep.node);
                    return false;
                }
                let mut t = sheep.base;
                t.translation += up * (SHEEP_RISE * ease_out(p));
                scene.set_transform(sheep.node, t);
                scene.set_opacity(sheep.node, 1.0 - ease_out(p));
                true
            });
            if flock.is_empty() {
                TaskControl::Done
            } else {
                TaskControl::Continue
            }
        });

        log::debug!("[sheep] {SHEEP_COUNT} sheep released");
        Ok(release(ctx.scene.clone(), root, flag))
    }
}
