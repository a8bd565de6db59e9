use crate::error::RoomError;
use crate::scene::{NodeId, SceneGraph};
use fnv::FnvHashMap;
use glam::{Quat, Vec3};

/// A named object eligible for hover highlighting and click dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractableObject {
    id: String,
    node: NodeId,
    base_position: Vec3,
    base_rotation: Quat,
}

impl InteractableObject {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    pub fn base_rotation(&self) -> Quat {
        self.base_rotation
    }
}

/// Interactables in registration order. Populated once the room is loaded,
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct InteractableRegistry {
    objects: Vec<InteractableObject>,
    index: FnvHashMap<String, usize>,
}

impl InteractableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the rest pose of `node` under `id`.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        node: NodeId,
        scene: &dyn SceneGraph,
    ) -> Result<&InteractableObject, RoomError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(RoomError::DuplicateInteractable(id));
        }
        let rest = scene.transform(node).ok_or(RoomError::UnknownNode(node))?;
        let slot = self.objects.len();
        self.index.insert(id.clone(), slot);
        self.objects.push(InteractableObject {
            id,
            node,
            base_position: rest.translation,
            base_rotation: rest.rotation,
        });
        log::debug!("[registry] registered {} as #{}", self.objects[slot].id, slot);
        Ok(&self.objects[slot])
    }

    pub fn all(&self) -> &[InteractableObject] {
        &self.objects
    }

    pub fn lookup(&self, id: &str) -> Option<&InteractableObject> {
        self.index.get(id).map(|&i| &self.objects[i])
    }

    pub fn get(&self, index: usize) -> Option<&InteractableObject> {
        self.objects.get(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
