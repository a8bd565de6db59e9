use super::{release, spawn_root};
use crate::constants::*;
use crate::error::RoomError;
use crate::event::{EventContext, MiniEvent, StopHandle};
use crate::scene::{NodeId, NodeKind, Rgb, Transform};
use crate::schedule::{ActiveFlag, TaskControl};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Faint orbs hovering around the room. The dark background and fog come
/// from the event's ambient override, not from here.
#[derive(Clone, Copy, Debug, Default)]
pub struct GhostOrbs;

struct Orb {
    node: NodeId,
    base: Vec3,
    speed: f32,
    phase: f32,
}

impl Orb {
    fn position(&self, t: f32) -> Vec3 {
        self.base
            + Vec3::new(
                (t * 0.4 + self.phase).cos() * 0.4,
                (t * self.speed + self.phase).sin() * 0.5,
                (t * 0.3 + self.phase).sin() * 0.4,
            )
    }
}

impl MiniEvent for GhostOrbs {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError> {
        let mut rng = ctx.rng();
        let root = spawn_root(&ctx.scene);

        let mut orbs = Vec::with_capacity(GHOST_ORB_COUNT);
        {
            let mut scene = ctx.scene.borrow_mut();
            for _ in 0..GHOST_ORB_COUNT {
                let base = Vec3::new(
                    rng.gen_range(-12.0..12.0),
                    rng.gen_range(2.0..8.0),
                    rng.gen_range(-12.0..12.0),
                );
                let node = scene.spawn(
                    Some(root),
                    NodeKind::Sprite {
                        glyph: String::new(),
                        color: Rgb(GHOST_ORB_COLOR),
                        size: rng.gen_range(0.1..0.6),
                    },
                    Transform::from_translation(base),
                );
                scene.set_opacity(node, rng.gen_range(0.4..0.9));
                orbs.push(Orb {
                    node,
                    base,
                    speed: rng.gen_range(0.2..1.2),
                    phase: rng.gen_range(0.0..TAU),
                });
            }
        }

        let flag = ActiveFlag::new();
        let scene = ctx.scene.clone();
        ctx.scheduler.spawn("ghost", &flag, move |now| {
            let t = (now * 0.001) as f32;
            let mut scene = scene.borrow_mut();
            for orb in &orbs {
                scene.set_transform(orb.node, Transform::from_translation(orb.position(t)));
            }
            TaskControl::Continue
        });

        log::debug!("[ghost] {GHOST_ORB_COUNT} orbs");
        Ok(release(ctx.scene.clone(), root, flag))
    }
}
