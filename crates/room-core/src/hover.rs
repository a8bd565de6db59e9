//! Per-frame pointer picking and the hover lift animation.

use crate::camera::Camera;
use crate::constants::{HOVER_BLEND, HOVER_LIFT};
use crate::pick::ray_box;
use crate::registry::InteractableRegistry;
use crate::scene::{SceneGraph, Transform};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverConfig {
    pub lift: f32,
    /// Fraction of the remaining distance covered each frame. Not scaled by
    /// elapsed time, so the easing speed follows the display refresh rate.
    pub blend: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            lift: HOVER_LIFT,
            blend: HOVER_BLEND,
        }
    }
}

#[derive(Debug, Default)]
pub struct HoverController {
    config: HoverConfig,
    pointer: Option<Vec2>,
    hovered: Option<usize>,
    lifts: Vec<f32>,
}

impl HoverController {
    pub fn new(config: HoverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Pointer in normalized device coordinates. Positions outside the
    /// viewport count as "no pointer".
    pub fn set_pointer(&mut self, ndc: Vec2) {
        let inside = ndc.is_finite() && ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0;
        self.pointer = inside.then_some(ndc);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Registry index of the object under the pointer as of the last update.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered_id<'r>(&self, registry: &'r InteractableRegistry) -> Option<&'r str> {
        self.hovered
            .and_then(|i| registry.get(i))
            .map(|o| o.id())
    }

    pub fn is_pointer_cursor(&self) -> bool {
        self.hovered.is_some()
    }

    pub fn lift(&self, index: usize) -> f32 {
        self.lifts.get(index).copied().unwrap_or(0.0)
    }

    /// Pick against the current scene pose, then ease every interactable
    /// toward its hover or rest pose.
    pub fn update(
        &mut self,
        camera: &Camera,
        registry: &InteractableRegistry,
        scene: &mut dyn SceneGraph,
    ) -> Option<usize> {
        self.hovered = self
            .pointer
            .and_then(|ndc| pick(camera, registry, &*scene, ndc));

        self.lifts.resize(registry.len(), 0.0);
        for (i, object) in registry.all().iter().enumerate() {
            let target = if self.hovered == Some(i) {
                self.config.lift
            } else {
                0.0
            };
            let lift = &mut self.lifts[i];
            *lift += (target - *lift) * self.config.blend;
            let Some(current) = scene.transform(object.node()) else {
                continue;
            };
            scene.set_transform(
                object.node(),
                Transform {
                    translation: object.base_position() + Vec3::Y * *lift,
                    rotation: object.base_rotation(),
                    ..current
                },
            );
        }
        self.hovered
    }
}

/// Nearest interactable hit by the ray through `ndc`, including any nested
/// child geometry. Ties keep the earlier registration.
pub fn pick(
    camera: &Camera,
    registry: &InteractableRegistry,
    scene: &dyn SceneGraph,
    ndc: Vec2,
) -> Option<usize> {
    let ray = camera.ray_through_ndc(ndc);
    let mut best = None::<(usize, f32)>;
    for (i, object) in registry.all().iter().enumerate() {
        for (world, size) in scene.pick_boxes(object.node()) {
            if let Some(t) = ray_box(&ray, &world, size) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
    }
    best.map(|(i, _)| i)
}
