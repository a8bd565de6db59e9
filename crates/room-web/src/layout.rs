//! Static room layout: boxes standing in for the reading-room model, spawned
//! into the scene store with the interactable objects registered by name.

use glam::{Quat, Vec3};
use room_core::{
    InteractableRegistry, NodeKind, Rgb, RoomError, SceneGraph, Transform, INTERACTIVE_NAMES,
};

/// One box of a piece, relative to the piece origin.
#[derive(Clone, Copy, Debug)]
pub struct Part {
    pub offset: [f32; 3],
    pub size: [f32; 3],
    pub color: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct Piece {
    pub name: &'static str,
    pub position: [f32; 3],
    pub yaw: f32,
    pub parts: &'static [Part],
}

const fn part(offset: [f32; 3], size: [f32; 3], color: u32) -> Part {
    Part {
        offset,
        size,
        color,
    }
}

const fn book(x: f32, height: f32, color: u32) -> [Part; 1] {
    [part([x, height * 0.5, 0.0], [0.32, height, 0.55], color)]
}

const BOOK1: [Part; 1] = book(0.0, 0.85, 0x8e2430);
const BOOK2: [Part; 1] = book(0.0, 0.75, 0x2d4f7c);
const BOOK3: [Part; 1] = book(0.0, 0.8, 0x5b7f3a);
const BOOK4: [Part; 1] = book(0.0, 0.9, 0x4a2c5e);
const BOOK5: [Part; 1] = book(0.0, 0.7, 0xc58b2c);
const BOOK6: [Part; 1] = book(0.0, 0.78, 0x1f1f24);

/// Lying stack on the upper shelf.
const BOOK53: [Part; 3] = [
    part([0.0, 0.06, 0.0], [0.9, 0.12, 0.6], 0x7a4e2d),
    part([0.05, 0.18, 0.0], [0.8, 0.12, 0.55], 0x9c6b3f),
    part([-0.03, 0.3, 0.0], [0.85, 0.12, 0.58], 0x5d3a1f),
];

const GLOBE: [Part; 3] = [
    part([0.0, 0.04, 0.0], [0.4, 0.08, 0.4], 0x3b2a1a),
    part([0.0, 0.25, 0.0], [0.06, 0.35, 0.06], 0x3b2a1a),
    part([0.0, 0.65, 0.0], [0.55, 0.55, 0.55], 0x3f88c5),
];

const MUG: [Part; 2] = [
    part([0.0, 0.15, 0.0], [0.26, 0.3, 0.26], 0xf1e6d2),
    part([0.17, 0.15, 0.0], [0.08, 0.16, 0.04], 0xf1e6d2),
];

const DAISY: [Part; 4] = [
    part([0.0, 0.14, 0.0], [0.3, 0.28, 0.3], 0xb5562f),
    part([0.0, 0.48, 0.0], [0.04, 0.4, 0.04], 0x3f7d3a),
    part([0.0, 0.72, 0.0], [0.26, 0.08, 0.26], 0xfafafa),
    part([0.0, 0.77, 0.0], [0.1, 0.04, 0.1], 0xffc107),
];

const SHELF_Y: f32 = 1.6;
const UPPER_SHELF_Y: f32 = 3.0;
const SHELF_Z: f32 = -3.3;
const DESK_TOP: f32 = 1.0;

pub const PIECES: &[Piece] = &[
    Piece { name: "book1", position: [-4.4, SHELF_Y, SHELF_Z], yaw: 0.0, parts: &BOOK1 },
    Piece { name: "book2", position: [-4.0, SHELF_Y, SHELF_Z], yaw: 0.0, parts: &BOOK2 },
    Piece { name: "book3", position: [-3.6, SHELF_Y, SHELF_Z], yaw: 0.0, parts: &BOOK3 },
    Piece { name: "book4", position: [-3.2, SHELF_Y, SHELF_Z], yaw: 0.0, parts: &BOOK4 },
    Piece { name: "book5", position: [-2.8, SHELF_Y, SHELF_Z], yaw: 0.0, parts: &BOOK5 },
    Piece { name: "book6", position: [-2.2, SHELF_Y, SHELF_Z], yaw: -0.25, parts: &BOOK6 },
    Piece { name: "book53", position: [-3.3, UPPER_SHELF_Y, SHELF_Z], yaw: 0.1, parts: &BOOK53 },
    Piece { name: "globe", position: [1.8, DESK_TOP, -1.2], yaw: 0.0, parts: &GLOBE },
    Piece { name: "mug", position: [3.0, DESK_TOP, -0.7], yaw: 0.6, parts: &MUG },
    Piece { name: "daisy", position: [4.0, DESK_TOP, -1.4], yaw: 0.0, parts: &DAISY },
];

/// Furniture that is drawn but never picked.
pub const DECOR: &[Part] = &[
    part([0.0, -0.05, 0.0], [16.0, 0.1, 12.0], 0x5a3d2b),
    part([0.0, 4.0, -4.0], [16.0, 8.0, 0.2], 0x2e3b4e),
    part([-3.3, SHELF_Y - 0.05, SHELF_Z], [3.2, 0.1, 0.8], 0x6b4a2f),
    part([-3.3, UPPER_SHELF_Y - 0.05, SHELF_Z], [3.2, 0.1, 0.8], 0x6b4a2f),
    part([-3.3, 1.5, -3.7], [3.2, 3.0, 0.05], 0x4e3523),
    part([3.0, DESK_TOP - 0.05, -1.0], [3.4, 0.1, 1.6], 0x7b5536),
    part([1.5, 0.47, -1.6], [0.1, 0.95, 0.1], 0x5a3d2b),
    part([4.5, 0.47, -1.6], [0.1, 0.95, 0.1], 0x5a3d2b),
    part([1.5, 0.47, -0.4], [0.1, 0.95, 0.1], 0x5a3d2b),
    part([4.5, 0.47, -0.4], [0.1, 0.95, 0.1], 0x5a3d2b),
];

pub fn piece(name: &str) -> Option<&'static Piece> {
    PIECES.iter().find(|p| p.name == name)
}

fn spawn_part(scene: &mut dyn SceneGraph, parent: Option<room_core::NodeId>, p: &Part) {
    scene.spawn(
        parent,
        NodeKind::Block {
            size: Vec3::from(p.size),
            color: Rgb(p.color),
        },
        Transform::from_translation(Vec3::from(p.offset)),
    );
}

/// Spawns the decor and every piece, then registers the interactive ones in
/// the canonical name order. Names without a piece are skipped with a warning.
pub fn spawn_room(scene: &mut dyn SceneGraph) -> Result<InteractableRegistry, RoomError> {
    for p in DECOR {
        spawn_part(scene, None, p);
    }
    let mut registry = InteractableRegistry::new();
    for name in INTERACTIVE_NAMES {
        let Some(piece) = piece(name) else {
            log::warn!("[layout] no piece for {}", name);
            continue;
        };
        let root = scene.spawn(
            None,
            NodeKind::Group,
            Transform {
                translation: Vec3::from(piece.position),
                rotation: Quat::from_rotation_y(piece.yaw),
                scale: Vec3::ONE,
            },
        );
        for p in piece.parts {
            spawn_part(scene, Some(root), p);
        }
        registry.register(*name, root, &*scene)?;
    }
    log::info!("[layout] room spawned with {} interactables", registry.len());
    Ok(registry)
}
