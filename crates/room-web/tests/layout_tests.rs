// Host-side tests for the static room layout.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/layout.rs"]
mod layout;

use glam::{Vec2, Vec3};
use room_core::constants::DEFAULT_BACKGROUND;
use room_core::*;

fn spawned() -> (SceneStore, InteractableRegistry) {
    let mut scene = SceneStore::new(Rgb(DEFAULT_BACKGROUND));
    let registry = layout::spawn_room(&mut scene).unwrap();
    (scene, registry)
}

fn project(camera: &Camera, world: Vec3) -> Vec2 {
    let clip = camera.view_proj() * world.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

#[test]
fn every_interactive_name_has_a_piece() {
    for name in INTERACTIVE_NAMES {
        assert!(layout::piece(name).is_some(), "{name} missing from the layout");
    }
}

#[test]
fn registry_follows_the_canonical_name_order() {
    let (_, registry) = spawned();
    let ids: Vec<&str> = registry.all().iter().map(|o| o.id()).collect();
    assert_eq!(ids, INTERACTIVE_NAMES.to_vec());
}

#[test]
fn rest_pose_matches_the_piece_position() {
    let (_, registry) = spawned();
    for piece in layout::PIECES {
        let obj = registry.lookup(piece.name).unwrap();
        assert_eq!(obj.base_position(), Vec3::from(piece.position));
    }
}

#[test]
fn each_piece_is_pickable_from_the_default_camera() {
    let (scene, registry) = spawned();
    let camera = Camera::room_default(16.0 / 9.0);
    for (index, piece) in layout::PIECES.iter().enumerate() {
        // Aim at the middle of the first part.
        let obj = registry.lookup(piece.name).unwrap();
        let world = scene.world_matrix(obj.node()).unwrap();
        let target = world.transform_point3(Vec3::from(piece.parts[0].offset));
        let ndc = project(&camera, target);
        assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0, "{} off screen", piece.name);
        let hit = pick(&camera, &registry, &scene, ndc);
        assert_eq!(
            hit.and_then(|i| registry.get(i)).map(|o| o.id()),
            Some(piece.name),
            "{} (#{index}) is hidden behind something",
            piece.name
        );
    }
}

#[test]
fn decor_is_drawn_but_not_registered() {
    let (scene, registry) = spawned();
    let parts: usize = layout::PIECES.iter().map(|p| p.parts.len()).sum();
    assert_eq!(scene.drawables().len(), layout::DECOR.len() + parts);
    assert_eq!(registry.len(), layout::PIECES.len());
}
