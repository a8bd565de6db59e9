use super::{release, spawn_root, view_point};
use crate::constants::*;
use crate::error::RoomError;
use crate::event::{EventContext, MiniEvent, StopHandle};
use crate::scene::{NodeId, NodeKind, Rgb, SceneGraph, Transform};
use crate::schedule::{ActiveFlag, TaskControl};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobePlace {
    pub id: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
    /// Placeholder colour for the picture frame.
    pub tint: u32,
}

pub const GLOBE_PLACES: &[GlobePlace] = &[
    GlobePlace { id: "japan", title: "\u{1F338}", caption: "", tint: 0xf8bbd0 },
    GlobePlace { id: "france", title: "", caption: "", tint: 0x90a4ae },
    GlobePlace { id: "bangkok", title: "\u{1F6FA}", caption: "", tint: 0xffb74d },
    GlobePlace {
        id: "castle",
        title: "\u{1F478}\u{1F3FB}\u{1F478}\u{1F3FC}\u{1F3F0}",
        caption: "",
        tint: 0x8d6e63,
    },
    GlobePlace { id: "china", title: "", caption: "", tint: 0xa1887f },
    GlobePlace { id: "italy", title: "\u{1F3DF}", caption: "\u{2694}\u{FE0F}", tint: 0xd7ccc8 },
    GlobePlace { id: "lisbon", title: "", caption: "", tint: 0xffe082 },
    GlobePlace { id: "cow", title: "\u{1F404}", caption: "Moooooo!", tint: 0xa5d6a7 },
];

const CARD_SIZE: Vec3 = Vec3::new(1.2, 0.8, 0.02);

/// Postcards from a fixed list of places, one per second, each fading in
/// and out again, while a plane crosses the sky.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobeTour;

struct Card {
    node: NodeId,
    born_ms: f64,
}

impl Card {
    fn opacity(&self, now: f64) -> Option<f32> {
        let age = now - self.born_ms;
        if age < GLOBE_CARD_FADE_IN_MS {
            Some((age / GLOBE_CARD_FADE_IN_MS) as f32)
        } else if age < GLOBE_CARD_HOLD_MS {
            Some(1.0)
        } else if age < GLOBE_CARD_HOLD_MS + GLOBE_CARD_FADE_OUT_MS {
            Some(1.0 - ((age - GLOBE_CARD_HOLD_MS) / GLOBE_CARD_FADE_OUT_MS) as f32)
        } else {
            None
        }
    }
}

fn spawn_card(scene: &mut dyn SceneGraph, root: NodeId, place: &GlobePlace, at: Vec3) -> NodeId {
    let card = scene.spawn(Some(root), NodeKind::Group, Transform::from_translation(at));
    scene.spawn(
        Some(card),
        NodeKind::Block {
            size: CARD_SIZE,
            color: Rgb(place.tint),
        },
        Transform::IDENTITY,
    );
    let title = if place.title.is_empty() {
        place.id
    } else {
        place.title
    };
    scene.spawn(
        Some(card),
        NodeKind::Sprite {
            glyph: title.to_string(),
            color: Rgb(0xffffff),
            size: 0.3,
        },
        Transform::from_translation(Vec3::new(0.0, 0.6, 0.05)),
    );
    if !place.caption.is_empty() {
        scene.spawn(
            Some(card),
            NodeKind::Sprite {
                glyph: place.caption.to_string(),
                color: Rgb(0xffffff),
                size: 0.2,
            },
            Transform::from_translation(Vec3::new(0.0, -0.55, 0.05)),
        );
    }
    scene.set_opacity(card, 0.0);
    card
}

impl MiniEvent for GlobeTour {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError> {
        let mut rng = ctx.rng();
        let root = spawn_root(&ctx.scene);
        let camera = ctx.camera.clone();
        let plane_from = view_point(&camera, GLOBE_CARD_DISTANCE, -1.0, 0.7);
        let plane_to = view_point(&camera, GLOBE_CARD_DISTANCE, 1.0, 0.7);
        let plane = ctx.scene.borrow_mut().spawn(
            Some(root),
            NodeKind::Sprite {
                glyph: GLOBE_PLANE_GLYPH.to_string(),
                color: Rgb(0xffffff),
                size: 0.6,
            },
            Transform::from_translation(plane_from),
        );

        let flag = ActiveFlag::new();
        let scene = ctx.scene.clone();
        let started_ms = ctx.now_ms;
        let mut next_card_ms = started_ms;
        let mut next_place = 0usize;
        let mut cards: Vec<Card> = Vec::new();
        let mut plane = Some(plane);
        ctx.scheduler.spawn("globe", &flag, move |now| {
            let mut scene = scene.borrow_mut();

            if now >= next_card_ms {
                let place = &GLOBE_PLACES[next_place % GLOBE_PLACES.len()];
                next_place += 1;
                let at = view_point(
                    &camera,
                    GLOBE_CARD_DISTANCE,
                    rng.gen_range(-0.8..0.8),
                    rng.gen_range(-0.6..0.5),
                );
                let node = spawn_card(&mut *scene, root, place, at);
                cards.push(Card { node, born_ms: now });
                next_card_ms = now + GLOBE_CARD_INTERVAL_MS;
            }

            cards.retain(|card| match card.opacity(now) {
                Some(opacity) => {
                    scene.set_opacity(card.node, opacity);
                    true
                }
                None => {
                    scene.despawn(card.node);
                    false
                }
            });

            if let Some(node) = plane {
                let age = now - started_ms;
                if age >= GLOBE_PLANE_HOLD_MS + GLOBE_PLANE_FADE_MS {
                    scene.despawn(node);
                    plane = None;
                } else {
                    let p = (age / GLOBE_PLANE_CROSS_MS).min(1.0) as f32;
                    scene.set_transform(
                        node,
                        Transform::from_translation(plane_from.lerp(plane_to, p)),
                    );
                    let fade = ((age - GLOBE_PLANE_HOLD_MS) / GLOBE_PLANE_FADE_MS).clamp(0.0, 1.0);
                    scene.set_opacity(node, 1.0 - fade as f32);
                }
            }
            TaskControl::Continue
        });

        log::debug!("[globe] tour started");
        Ok(release(ctx.scene.clone(), root, flag))
    }
}
