//! Mini-event variants. Each one builds its nodes under a single root
//! group, animates through one scheduler task and tears everything down in
//! its [`StopHandle`](crate::event::StopHandle).

mod aquarius;
mod daisy;
mod eight_ball;
mod flappy;
mod ghost;
mod globe;
mod sheep;
mod wolf;

pub use aquarius::AquariusLetters;
pub use daisy::DaisySong;
pub use eight_ball::EightBall;
pub use flappy::FlappyBook;
pub use ghost::GhostOrbs;
pub use globe::{GlobePlace, GlobeTour, GLOBE_PLACES};
pub use sheep::SheepRain;
pub use wolf::{heart_point, WolfSpirits};

use crate::camera::Camera;
use crate::event::StopHandle;
use crate::scene::{NodeId, NodeKind, SharedScene, Transform};
use crate::schedule::ActiveFlag;
use glam::Vec3;

pub(crate) fn spawn_root(scene: &SharedScene) -> NodeId {
    scene
        .borrow_mut()
        .spawn(None, NodeKind::Group, Transform::IDENTITY)
}

/// Clear the task flag, then drop the whole subtree.
pub(crate) fn release(scene: SharedScene, root: NodeId, flag: ActiveFlag) -> StopHandle {
    StopHandle::new(move || {
        flag.clear();
        scene.borrow_mut().despawn(root);
    })
}

/// Point on the view plane `distance` in front of the eye. `u` and `v` in
/// \[-1, 1\] span the visible width and height.
pub(crate) fn view_point(camera: &Camera, distance: f32, u: f32, v: f32) -> Vec3 {
    let half_h = distance * (camera.fovy_radians * 0.5).tan();
    let half_w = half_h * camera.aspect;
    camera.eye
        + camera.forward() * distance
        + camera.right() * (u * half_w)
        + camera.screen_up() * (v * half_h)
}

/// Quadratic ease-out on \[0, 1\].
#[inline]
pub(crate) fn ease_out(p: f32) -> f32 {
    let q = 1.0 - p.clamp(0.0, 1.0);
    1.0 - q * q
}
