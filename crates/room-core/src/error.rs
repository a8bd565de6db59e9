use crate::scene::NodeId;
use thiserror::Error;

/// Errors raised by the room core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("no mini-event is mapped to `{0}`")]
    UnknownEvent(String),
    #[error("interactable `{0}` is already registered")]
    DuplicateInteractable(String),
    #[error("scene node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("mini-event `{id}` failed to start: {reason}")]
    Variant { id: String, reason: String },
}
