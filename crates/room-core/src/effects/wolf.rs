use super::{release, spawn_root};
use crate::constants::*;
use crate::error::RoomError;
use crate::event::{EventContext, MiniEvent, StopHandle};
use crate::scene::{NodeKind, Rgb, Transform};
use crate::schedule::{ActiveFlag, TaskControl};
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Point on the heart curve at parameter `t`, before depth jitter.
pub fn heart_point(t: f32) -> Vec3 {
    let x = 0.16 * t.sin().powi(3);
    let y = 0.13 * t.cos() - 0.05 * (2.0 * t).cos() - 0.02 * (3.0 * t).cos() - 0.01 * (4.0 * t).cos();
    Vec3::new(x * WOLF_CURVE_SCALE, y * WOLF_CURVE_SCALE * WOLF_SQUASH_Y, 0.0)
}

/// A cloud of heart particles scattered over the room that slowly gathers
/// into a heart while spinning.
#[derive(Clone, Copy, Debug, Default)]
pub struct WolfSpirits;

impl MiniEvent for WolfSpirits {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError> {
        let mut rng = ctx.rng();
        let root = spawn_root(&ctx.scene);

        let mut targets = Vec::with_capacity(WOLF_HEART_COUNT);
        let mut positions = Vec::with_capacity(WOLF_HEART_COUNT);
        for _ in 0..WOLF_HEART_COUNT {
            let mut target = heart_point(rng.gen_range(0.0..TAU));
            target.z = rng.gen_range(-0.5..0.5);
            targets.push(target);
            positions.push(Vec3::new(
                rng.gen_range(-25.0..25.0),
                rng.gen_range(0.0..20.0),
                rng.gen_range(-25.0..25.0),
            ));
        }

        let base = Transform::from_translation(Vec3::from(WOLF_POSITION));
        let cloud = {
            let mut scene = ctx.scene.borrow_mut();
            let cloud = scene.spawn(
                Some(root),
                NodeKind::Points {
                    positions: positions.clone(),
                    color: Rgb(WOLF_HEART_COLOR),
                    size: WOLF_POINT_SIZE,
                },
                base,
            );
            scene.set_opacity(cloud, WOLF_OPACITY);
            cloud
        };

        let flag = ActiveFlag::new();
        let scene = ctx.scene.clone();
        let mut angle = 0.0_f32;
        ctx.scheduler.spawn("wolf", &flag, move |_| {
            for (p, target) in positions.iter_mut().zip(&targets) {
                *p += (*target - *p) * WOLF_CONVERGE;
            }
            angle += WOLF_SPIN;
            let mut scene = scene.borrow_mut();
            scene.set_points(cloud, &positions);
            scene.set_transform(
                cloud,
                Transform {
                    rotation: Quat::from_rotation_y(angle),
                    ..base
                },
            );
            TaskControl::Continue
        });

        log::debug!("[wolf] {WOLF_HEART_COUNT} spirits");
        Ok(release(ctx.scene.clone(), root, flag))
    }
}
