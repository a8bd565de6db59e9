pub mod camera;
pub mod catalog;
pub mod constants;
pub mod effects;
pub mod error;
pub mod event;
pub mod flappy;
pub mod hover;
pub mod input;
pub mod orchestrator;
pub mod pick;
pub mod presenter;
pub mod registry;
pub mod room;
pub mod scene;
pub mod schedule;

pub use camera::*;
pub use catalog::*;
pub use effects::*;
pub use error::*;
pub use event::*;
pub use flappy::*;
pub use hover::*;
pub use input::*;
pub use orchestrator::*;
pub use pick::*;
pub use presenter::*;
pub use registry::*;
pub use room::*;
pub use scene::*;
pub use schedule::*;
