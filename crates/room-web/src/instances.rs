//! Flattens the scene store into GPU instances: one per box, one camera-facing
//! quad per sprite and one per point.

use crate::constants::{KIND_BOX, KIND_POINT, KIND_SPRITE, SPRITE_TINT_FLOOR};
use glam::{Mat4, Vec3};
use room_core::{Drawable, Fog, NodeKind, Rgb};
use std::cmp::Ordering;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x: kind, y: billboard size in world units.
    pub params: [f32; 4],
}

impl Instance {
    fn billboard(center: Vec3, size: f32, color: Vec3, alpha: f32, kind: f32) -> Self {
        Self {
            model: Mat4::from_translation(center).to_cols_array_2d(),
            color: color.extend(alpha).to_array(),
            params: [kind, size, 0.0, 0.0],
        }
    }

    pub fn kind(&self) -> f32 {
        self.params[0]
    }

    pub fn center(&self) -> Vec3 {
        Vec3::from_slice(&self.model[3][..3])
    }
}

#[inline]
fn uniform_scale(world: &Mat4) -> f32 {
    world.x_axis.truncate().length()
}

/// Boxes first in scene order, then billboards back to front as seen from `eye`.
pub fn pack_drawables(drawables: &[Drawable<'_>], eye: Vec3, out: &mut Vec<Instance>) {
    out.clear();
    let mut billboards = Vec::new();
    for d in drawables {
        if d.opacity <= 0.0 {
            continue;
        }
        match d.kind {
            NodeKind::Group => {}
            NodeKind::Block { size, color } => out.push(Instance {
                model: (d.world * Mat4::from_scale(*size)).to_cols_array_2d(),
                color: color.to_vec3().extend(d.opacity).to_array(),
                params: [KIND_BOX, 0.0, 0.0, 0.0],
            }),
            NodeKind::Sprite { color, size, .. } => {
                let tint = color.to_vec3().max(Vec3::splat(SPRITE_TINT_FLOOR));
                billboards.push(Instance::billboard(
                    d.world.transform_point3(Vec3::ZERO),
                    size * uniform_scale(&d.world),
                    tint,
                    d.opacity,
                    KIND_SPRITE,
                ));
            }
            NodeKind::Points {
                positions,
                color,
                size,
            } => {
                let scaled = size * uniform_scale(&d.world);
                let tint = color.to_vec3();
                billboards.extend(positions.iter().map(|p| {
                    Instance::billboard(d.world.transform_point3(*p), scaled, tint, d.opacity, KIND_POINT)
                }));
            }
        }
    }
    billboards.sort_by(|a, b| {
        let da = a.center().distance_squared(eye);
        let db = b.center().distance_squared(eye);
        db.partial_cmp(&da).unwrap_or(Ordering::Equal)
    });
    out.extend(billboards);
}

/// `[near, far, enabled, 0]` for the fog uniform.
pub fn fog_params(fog: Option<Fog>) -> [f32; 4] {
    match fog {
        Some(f) if f.far > f.near => [f.near, f.far, 1.0, 0.0],
        _ => [0.0, 1.0, 0.0, 0.0],
    }
}

pub fn clear_rgba(background: Rgb) -> [f64; 4] {
    let c = background.to_vec3();
    [c.x as f64, c.y as f64, c.z as f64, 1.0]
}
