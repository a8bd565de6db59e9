// Click dispatch through the room facade with the real event table.

mod common;

use common::*;
use room_core::*;

const ROOM: &[&str] = &[
    "book1", "book2", "book3", "book4", "book5", "book6", "book53", "globe", "mug", "daisy", "vase",
];

fn index(id: &str) -> usize {
    ROOM.iter().position(|r| *r == id).unwrap()
}

fn room() -> Fixture {
    fixture(ROOM, room_events())
}

fn frames(fx: &mut Fixture, from_ms: f64, count: usize) -> f64 {
    let mut now = from_ms;
    for _ in 0..count {
        now += 16.0;
        fx.room.tick(now);
    }
    now
}

#[test]
fn clicking_globe_during_sheep_stops_sheep_then_recolours() {
    let mut fx = room();
    let baseline = fx.live_nodes();

    fx.click(index("book3"), 0.0);
    assert_eq!(fx.background(), constants::SHEEP_BACKGROUND);
    assert_eq!(fx.live_nodes(), baseline + 1 + constants::SHEEP_COUNT);

    fx.click(index("globe"), 500.0);
    assert_eq!(
        fx.entries(),
        vec![
            format!("background {:06x}", constants::SHEEP_BACKGROUND),
            format!("background {:06x}", constants::DEFAULT_BACKGROUND),
            format!("background {:06x}", constants::GLOBE_BACKGROUND),
        ]
    );
    assert_eq!(fx.room.orchestrator().active_id().as_deref(), Some("globe"));
    assert_eq!(
        fx.presenter.borrow().caption.as_deref(),
        Some("A tiny globe of the world!")
    );

    fx.room.dismiss();
    frames(&mut fx, 600.0, 1);
    assert_eq!(fx.live_nodes(), baseline);
    assert_eq!(fx.background(), constants::DEFAULT_BACKGROUND);
    assert!(fx.room.scheduler().is_empty());
}

#[test]
fn caption_only_click_leaves_running_event_alone() {
    let mut fx = room();
    fx.click(index("book4"), 0.0);
    fx.click(index("mug"), 100.0);

    assert_eq!(
        fx.presenter.borrow().caption.as_deref(),
        Some("A cute mug for your coffee.")
    );
    assert_eq!(fx.room.orchestrator().active_id().as_deref(), Some("book4"));
    assert_eq!(fx.background(), constants::WOLF_BACKGROUND);
}

#[test]
fn unmapped_identifier_shows_fallback_caption_only() {
    let mut fx = room();
    fx.click(index("vase"), 0.0);
    assert_eq!(
        fx.presenter.borrow().caption.as_deref(),
        Some("You clicked: vase")
    );
    assert!(!fx.room.orchestrator().is_active());
    assert!(fx.entries().is_empty());
}

#[test]
fn click_with_nothing_hovered_does_nothing() {
    let mut fx = room();
    fx.room.pointer_move(glam::Vec2::new(0.0, 0.99));
    fx.room.tick(0.0);
    assert_eq!(fx.room.hovered_id(), None);
    fx.room.pointer_click();
    fx.room.tick(16.0);
    assert!(fx.presenter.borrow().captions.is_empty());

    fx.room.pointer_leave();
    fx.room.pointer_click();
    fx.room.tick(32.0);
    assert!(fx.presenter.borrow().captions.is_empty());
}

#[test]
fn several_clicks_in_one_frame_dispatch_once() {
    let mut fx = room();
    let ndc = fx.ndc_of(index("mug"));
    fx.room.pointer_move(ndc);
    fx.room.tick(0.0);
    fx.room.pointer_click();
    fx.room.pointer_click();
    fx.room.pointer_click();
    fx.room.tick(16.0);
    assert_eq!(fx.presenter.borrow().captions.len(), 1);
}

#[test]
fn cursor_follows_hover() {
    let mut fx = room();
    let ndc = fx.ndc_of(index("daisy"));
    fx.room.pointer_move(ndc);
    fx.room.tick(0.0);
    assert_eq!(fx.room.hovered_id(), Some("daisy"));
    assert!(fx.presenter.borrow().pointer);

    fx.room.pointer_leave();
    fx.room.tick(16.0);
    assert!(!fx.presenter.borrow().pointer);
}

#[test]
fn escape_dismisses_caption_and_event() {
    let mut fx = room();
    fx.click(index("book2"), 0.0);
    assert_eq!(fx.background(), constants::GHOST_BACKGROUND);
    assert_eq!(fx.scene.borrow().store.fog(), Some(ghost_fog()));

    fx.room.key_down(constants::DISMISS_KEY);
    assert_eq!(fx.presenter.borrow().caption, None);
    assert!(!fx.room.orchestrator().is_active());
    assert_eq!(fx.background(), constants::DEFAULT_BACKGROUND);
    assert_eq!(fx.scene.borrow().store.fog(), None);
}

#[test]
fn closing_the_caption_keeps_the_event_running() {
    let mut fx = room();
    fx.click(index("book2"), 0.0);
    let running = fx.live_nodes();

    fx.room.close_caption();
    assert_eq!(fx.presenter.borrow().caption, None);
    assert_eq!(fx.room.orchestrator().active_id().as_deref(), Some("book2"));
    frames(&mut fx, 16.0, 10);
    assert_eq!(fx.live_nodes(), running);
    assert_eq!(fx.background(), constants::GHOST_BACKGROUND);

    fx.room.key_down(constants::DISMISS_KEY);
    assert!(!fx.room.orchestrator().is_active());
}

#[test]
fn daisy_plays_until_stopped() {
    let mut fx = room();
    fx.click(index("daisy"), 0.0);
    assert_eq!(
        fx.soundtrack.borrow().playing.as_deref(),
        Some(constants::DAISY_TRACK)
    );
    fx.click(index("book53"), 100.0);
    assert!(fx.soundtrack.borrow().playing.is_some());

    fx.room.dismiss();
    fx.room.dismiss();
    assert_eq!(fx.soundtrack.borrow().playing, None);
    assert_eq!(fx.soundtrack.borrow().stops, 1);
}

#[test]
fn eight_ball_answers_questions() {
    let mut fx = room();
    fx.click(index("book6"), 0.0);
    assert_eq!(
        fx.presenter.borrow().panel,
        Some((constants::EIGHT_BALL_PROMPT.to_string(), Some("Ask!".to_string())))
    );

    fx.room.key_down(constants::ANSWER_KEY);
    assert_eq!(
        fx.presenter.borrow().caption.as_deref(),
        Some(constants::EIGHT_BALL_EMPTY)
    );

    for key in ["W", "h", "y", "?"] {
        fx.room.key_down(key);
    }
    assert_eq!(
        fx.presenter.borrow().panel.as_ref().map(|(t, _)| t.as_str()),
        Some("Why?")
    );
    fx.room.panel_action();
    let answer = fx.presenter.borrow().caption.clone().unwrap();
    assert!(constants::EIGHT_BALL_ANSWERS.contains(&answer.as_str()));

    fx.room.dismiss();
    assert_eq!(fx.presenter.borrow().panel, None);
    assert_eq!(fx.room.input().listener_count(), 0);
}

#[test]
fn every_effect_releases_what_it_allocated() {
    for id in ["book1", "book2", "book3", "book4", "book5", "book6", "globe", "daisy"] {
        let mut fx = room();
        let baseline = fx.live_nodes();

        fx.click(index(id), 0.0);
        assert_eq!(fx.room.orchestrator().active_id().as_deref(), Some(id));
        let now = frames(&mut fx, 16.0, 120);
        // A press seen only by the running event, not queued as a click.
        fx.room.pointer_leave();
        fx.room.pointer_click();

        fx.room.dismiss();
        frames(&mut fx, now, 1);
        assert_eq!(fx.live_nodes(), baseline, "{id} left nodes behind");
        assert!(fx.room.scheduler().is_empty(), "{id} left tasks behind");
        assert_eq!(fx.room.input().listener_count(), 0, "{id} left listeners");
        assert_eq!(fx.presenter.borrow().panel, None, "{id} left its panel up");
        assert_eq!(fx.background(), constants::DEFAULT_BACKGROUND);
    }
}

#[test]
fn long_sessions_reuse_scene_slots() {
    let mut fx = room();
    let mut now = 0.0;
    let mut peak = fx.live_nodes();
    for round in 0..20 {
        let id = if round % 2 == 0 { "globe" } else { "book3" };
        fx.click(index(id), now);
        now += 16.0;
        for _ in 0..150 {
            now += 16.0;
            fx.room.tick(now);
            peak = peak.max(fx.live_nodes());
        }
        fx.room.dismiss();
        now += 16.0;
        fx.room.tick(now);
    }
    // A card or sheep may be born and retired within one tick.
    assert!(fx.slot_count() <= peak + 2, "{} slots, peak {peak}", fx.slot_count());
}

#[test]
fn aquarius_letters_rise_faster_after_a_press() {
    let mut fx = room();
    fx.click(index("book1"), 0.0);

    let letters: Vec<NodeId> = {
        let scene = fx.scene.borrow();
        scene
            .store
            .drawables()
            .iter()
            .filter(|d| matches!(d.kind, NodeKind::Sprite { .. }))
            .map(|d| d.id)
            .collect()
    };
    let text = constants::AQUARIUS_TEXT;
    assert_eq!(letters.len(), text.chars().filter(|c| !c.is_whitespace()).count());

    let height = |fx: &Fixture| fx.scene.borrow().store.transform(letters[0]).unwrap().translation.y;
    let y0 = height(&fx);
    frames(&mut fx, 16.0, 1);
    let slow = height(&fx) - y0;

    fx.room.pointer_leave();
    fx.room.pointer_click();
    let y1 = height(&fx);
    frames(&mut fx, 32.0, 1);
    let fast = height(&fx) - y1;
    assert!(fast > slow + constants::AQUARIUS_BOOST * 0.5, "{fast} vs {slow}");
}

fn visible_sprites(fx: &Fixture) -> usize {
    fx.scene
        .borrow()
        .store
        .drawables()
        .iter()
        .filter(|d| matches!(d.kind, NodeKind::Sprite { .. }))
        .count()
}

fn panel_text(fx: &Fixture) -> Option<String> {
    fx.presenter.borrow().panel.as_ref().map(|(t, _)| t.clone())
}

#[test]
fn flappy_book_runs_to_game_over_and_restarts() {
    let mut fx = room();
    let baseline = fx.live_nodes();

    fx.click(index("book5"), 0.0);
    assert_eq!(
        fx.presenter.borrow().panel,
        Some((
            constants::FLAPPY_INTRO.to_string(),
            Some(constants::FLAPPY_ACTION.to_string())
        ))
    );
    assert_eq!(fx.live_nodes(), baseline + 2);
    assert_eq!(visible_sprites(&fx), 0, "field stays hidden until START");

    fx.room.pointer_leave();
    fx.room.panel_action();
    assert_eq!(panel_text(&fx), None);
    assert_eq!(fx.room.input().listener_count(), 2);

    // No flaps: the bird drops out on the 26th step.
    let now = frames(&mut fx, 16.0, 25);
    assert_eq!(panel_text(&fx), None);
    assert_eq!(visible_sprites(&fx), 1);
    let now = frames(&mut fx, now, 1);
    assert_eq!(
        panel_text(&fx).as_deref(),
        Some("Game Over!\nScore: 0\nClick START to play again!")
    );
    assert_eq!(fx.room.input().listener_count(), 1);
    assert_eq!(visible_sprites(&fx), 0);
    assert!(fx.room.scheduler().is_empty());

    // Flapping every 40 steps keeps the bird inside the field.
    fx.room.panel_action();
    assert_eq!(panel_text(&fx), None);
    let mut now = now;
    for _ in 0..3 {
        fx.room.key_down(" ");
        now = frames(&mut fx, now, 40);
    }
    assert_eq!(panel_text(&fx), None);
    assert_eq!(visible_sprites(&fx), 1);
    assert_eq!(fx.live_nodes(), baseline + 2 + 2, "one pipe pair on screen");

    fx.room.dismiss();
    frames(&mut fx, now, 1);
    assert_eq!(fx.live_nodes(), baseline);
    assert_eq!(fx.room.input().listener_count(), 0);
    assert!(fx.room.scheduler().is_empty());
    assert_eq!(panel_text(&fx), None);
}
