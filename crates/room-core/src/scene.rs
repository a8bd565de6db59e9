//! Scene-graph boundary and the retained node store behind it.
//!
//! The core never owns render resources. Everything it places in the room
//! (interactable meshes, effect sprites, Flappy pipes) goes through the
//! [`SceneGraph`] trait using plain [`NodeId`] handles. [`SceneStore`] is the
//! in-memory implementation the web front-end renders from and tests inspect.

use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Non-owning handle to a node in the scene graph.
///
/// Slots are reused after a despawn; the generation tells a stale handle
/// apart from the node now living in the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub index: u32,
    pub generation: u32,
}

/// Packed `0xRRGGBB` colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Channels in the \[0, 1\] range.
    pub fn to_vec3(self) -> Vec3 {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        Vec3::new(r, g, b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    /// Box geometry; the only kind that takes part in picking.
    Block { size: Vec3, color: Rgb },
    /// Camera-facing glyph (emoji or letter).
    Sprite { glyph: String, color: Rgb, size: f32 },
    Points {
        positions: Vec<Vec3>,
        color: Rgb,
        size: f32,
    },
}

/// Operations the core needs from whatever owns the 3D scene.
pub trait SceneGraph {
    fn spawn(&mut self, parent: Option<NodeId>, kind: NodeKind, transform: Transform) -> NodeId;
    /// Removes `node` and all of its descendants. Unknown nodes are ignored.
    fn despawn(&mut self, node: NodeId);
    fn contains(&self, node: NodeId) -> bool;
    fn transform(&self, node: NodeId) -> Option<Transform>;
    fn set_transform(&mut self, node: NodeId, transform: Transform);
    fn set_visible(&mut self, node: NodeId, visible: bool);
    fn set_opacity(&mut self, node: NodeId, opacity: f32);
    fn set_points(&mut self, node: NodeId, positions: &[Vec3]);
    /// World matrix and size of every box in the subtree rooted at `node`.
    fn pick_boxes(&self, node: NodeId) -> SmallVec<[(Mat4, Vec3); 4]>;
    fn set_background(&mut self, color: Rgb);
    fn set_fog(&mut self, fog: Option<Fog>);
}

pub type SharedScene = Rc<RefCell<dyn SceneGraph>>;

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub transform: Transform,
    pub visible: bool,
    pub opacity: f32,
}

/// A node resolved for drawing: world matrix plus inherited opacity.
#[derive(Clone, Copy, Debug)]
pub struct Drawable<'a> {
    pub id: NodeId,
    pub kind: &'a NodeKind,
    pub world: Mat4,
    pub opacity: f32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Retained scene graph. Freed slots go on a free list and are handed out
/// again with a bumped generation, so a stale handle can only miss, never
/// alias a newer node.
#[derive(Debug)]
pub struct SceneStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    background: Rgb,
    fog: Option<Fog>,
}

impl SceneStore {
    pub fn new(background: Rgb) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            background,
            fog: None,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn fog(&self) -> Option<Fog> {
        self.fog
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Slots allocated so far, live or free. Bounded by the peak live count.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.node(id)?;
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }

    /// Visible unless the node or any ancestor is hidden.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            match self.node(cur) {
                Some(node) if node.visible => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }

    fn effective_opacity(&self, id: NodeId) -> f32 {
        let mut opacity = 1.0;
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            let Some(node) = self.node(cur) else { break };
            opacity *= node.opacity;
            cursor = node.parent;
        }
        opacity
    }

    /// Every visible, non-group node with its resolved world matrix.
    pub fn drawables(&self) -> Vec<Drawable<'_>> {
        let mut out = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(node) = &slot.node else { continue };
            if matches!(node.kind, NodeKind::Group) {
                continue;
            }
            let id = NodeId {
                index: index as u32,
                generation: slot.generation,
            };
            if !self.is_visible(id) {
                continue;
            }
            if let Some(world) = self.world_matrix(id) {
                out.push(Drawable {
                    id,
                    kind: &node.kind,
                    world,
                    opacity: self.effective_opacity(id),
                });
            }
        }
        out
    }

    fn collect_subtree(&self, root: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.node(root) {
            out.push(root);
            for child in &node.children {
                self.collect_subtree(*child, out);
            }
        }
    }
}

impl SceneGraph for SceneStore {
    fn spawn(&mut self, parent: Option<NodeId>, kind: NodeKind, transform: Transform) -> NodeId {
        let parent = parent.filter(|p| self.node(*p).is_some());
        let node = Node {
            kind,
            parent,
            children: SmallVec::new(),
            transform,
            visible: true,
            opacity: 1.0,
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.push(id);
        }
        id
    }

    fn despawn(&mut self, node: NodeId) {
        let parent = match self.node(node) {
            Some(n) => n.parent,
            None => return,
        };
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.retain(|c| *c != node);
        }
        let mut doomed = Vec::new();
        self.collect_subtree(node, &mut doomed);
        for id in doomed {
            if let Some(slot) = self.slots.get_mut(id.index as usize) {
                if slot.node.take().is_some() {
                    slot.generation = slot.generation.wrapping_add(1);
                    self.free.push(id.index);
                }
            }
        }
    }

    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn transform(&self, node: NodeId) -> Option<Transform> {
        self.node(node).map(|n| n.transform)
    }

    fn set_transform(&mut self, node: NodeId, transform: Transform) {
        if let Some(n) = self.node_mut(node) {
            n.transform = transform;
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.node_mut(node) {
            n.visible = visible;
        }
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        if let Some(n) = self.node_mut(node) {
            n.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn set_points(&mut self, node: NodeId, positions: &[Vec3]) {
        if let Some(Node {
            kind: NodeKind::Points { positions: p, .. },
            ..
        }) = self.node_mut(node)
        {
            p.clear();
            p.extend_from_slice(positions);
        }
    }

    fn pick_boxes(&self, node: NodeId) -> SmallVec<[(Mat4, Vec3); 4]> {
        let mut subtree = Vec::new();
        self.collect_subtree(node, &mut subtree);
        let mut out = SmallVec::new();
        for id in subtree {
            if let Some(Node {
                kind: NodeKind::Block { size, .. },
                ..
            }) = self.node(id)
            {
                if let Some(world) = self.world_matrix(id) {
                    out.push((world, *size));
                }
            }
        }
        out
    }

    fn set_background(&mut self, color: Rgb) {
        self.background = color;
    }

    fn set_fog(&mut self, fog: Option<Fog>) {
        self.fog = fog;
    }
}
