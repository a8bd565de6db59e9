//! The uniform mini-event contract: `start(context) -> StopHandle`.

use crate::camera::Camera;
use crate::constants::DEFAULT_BACKGROUND;
use crate::error::RoomError;
use crate::input::InputBus;
use crate::presenter::{SharedPresenter, SharedSoundtrack};
use crate::scene::{Fog, Rgb, SceneGraph, SharedScene};
use crate::schedule::Scheduler;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// Idempotent teardown returned by [`MiniEvent::start`]. The first call runs
/// the teardown; later calls do nothing.
pub struct StopHandle {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl StopHandle {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A handle with nothing to release.
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    pub fn stop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    pub fn is_spent(&self) -> bool {
        self.teardown.is_none()
    }
}

impl fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopHandle")
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// Everything a mini-event may touch while it runs.
#[derive(Clone)]
pub struct EventContext {
    pub scene: SharedScene,
    pub scheduler: Scheduler,
    pub input: InputBus,
    pub presenter: SharedPresenter,
    pub soundtrack: SharedSoundtrack,
    /// Snapshot of the camera at start, for camera-relative effects.
    pub camera: Camera,
    pub now_ms: f64,
    /// Seed for this start's random draws.
    pub seed: u64,
}

impl EventContext {
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

pub trait MiniEvent {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError>;
}

/// Global presentation state restored whenever an event stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ambient {
    pub background: Rgb,
    pub fog: Option<Fog>,
}

impl Ambient {
    pub fn apply(&self, scene: &mut dyn SceneGraph) {
        scene.set_background(self.background);
        scene.set_fog(self.fog);
    }
}

impl Default for Ambient {
    fn default() -> Self {
        Self {
            background: Rgb(DEFAULT_BACKGROUND),
            fog: None,
        }
    }
}

/// Ambient changes an event applies while it is active.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AmbientOverride {
    pub background: Option<Rgb>,
    pub fog: Option<Fog>,
}

impl AmbientOverride {
    pub const NONE: Self = Self {
        background: None,
        fog: None,
    };

    pub fn background(color: u32) -> Self {
        Self {
            background: Some(Rgb(color)),
            fog: None,
        }
    }

    pub fn with_fog(mut self, fog: Fog) -> Self {
        self.fog = Some(fog);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.fog.is_none()
    }

    pub fn apply(&self, scene: &mut dyn SceneGraph) {
        if let Some(color) = self.background {
            scene.set_background(color);
        }
        if let Some(fog) = self.fog {
            scene.set_fog(Some(fog));
        }
    }
}
