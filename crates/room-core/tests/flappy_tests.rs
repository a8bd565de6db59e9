// Flappy physics, scoring and phase edges.

use room_core::*;

const FRAME_MS: f64 = 16.0;

fn running(config: FlappyConfig, seed: u64) -> FlappyGame {
    let mut game = FlappyGame::new(config, seed);
    assert!(game.start(0.0));
    game
}

/// Gravity off, walls out of reach: the bird hangs at 0 forever.
fn hover_config() -> FlappyConfig {
    FlappyConfig {
        gravity: 0.0,
        floor: -1e9,
        ceiling: 1e9,
        ..FlappyConfig::default()
    }
}

#[test]
fn free_fall_follows_closed_form() {
    let mut game = running(FlappyConfig::default(), 3);
    let g = constants::FLAPPY_GRAVITY;
    for n in 1..=10u32 {
        assert_eq!(game.step(n as f64 * FRAME_MS), StepOutcome::Continue);
        let expected = -g * (n * (n + 1)) as f64 / 2.0;
        assert!((game.bird_y() - expected).abs() < 1e-12, "tick {n}");
    }
}

#[test]
fn no_flap_run_ends_at_tick_26() {
    let mut game = running(FlappyConfig::default(), 3);
    let mut n = 0;
    let outcome = loop {
        n += 1;
        match game.step(n as f64 * FRAME_MS) {
            StepOutcome::Continue => continue,
            other => break other,
        }
    };
    assert_eq!(n, 26);
    assert_eq!(outcome, StepOutcome::GameOver(GameOverCause::OutOfBounds));
    assert_eq!(game.phase(), FlappyPhase::GameOver);
    assert_eq!(game.ticks(), 26);
    assert_eq!(game.score(), 0);
    assert!(game.pipes().is_empty());
}

#[test]
fn flap_overwrites_velocity() {
    let mut game = running(FlappyConfig::default(), 3);
    for n in 1..=5 {
        game.step(n as f64 * FRAME_MS);
    }
    assert!(game.velocity() < 0.0);
    assert!(game.flap());
    assert_eq!(game.velocity(), constants::FLAPPY_FLAP_IMPULSE);
    assert!(game.flap());
    assert_eq!(game.velocity(), constants::FLAPPY_FLAP_IMPULSE);

    let before = game.bird_y();
    game.step(6.0 * FRAME_MS);
    let rise = constants::FLAPPY_FLAP_IMPULSE - constants::FLAPPY_GRAVITY;
    assert!((game.bird_y() - (before + rise)).abs() < 1e-12);
}

#[test]
fn pipes_spawn_strictly_after_the_interval() {
    let mut game = running(hover_config(), 9);
    game.step(constants::FLAPPY_SPAWN_INTERVAL_MS);
    assert!(game.pipes().is_empty());

    game.step(constants::FLAPPY_SPAWN_INTERVAL_MS + 1.0);
    assert_eq!(game.pipes().len(), 1);
    let pipe = game.pipes()[0];
    let cfg = FlappyConfig::default();
    assert!((pipe.x - (cfg.pipe_start_x - cfg.pipe_speed)).abs() < 1e-12);
    assert!(pipe.gap_center.abs() <= cfg.gap_band);
    assert_eq!(game.last_spawn_ms(), constants::FLAPPY_SPAWN_INTERVAL_MS + 1.0);
}

#[test]
fn score_counts_every_pipe_that_cleared_the_bird() {
    // With the bird at 0 and gaps within the band, barriers are always
    // more than hit_dy away, so every pipe crosses safely.
    let mut game = running(hover_config(), 11);
    let mut seen = std::collections::BTreeSet::new();
    for n in 1..=2000u32 {
        assert_eq!(game.step(n as f64 * FRAME_MS), StepOutcome::Continue);
        seen.extend(game.pipes().iter().map(|p| p.id));
        let cfg = game.config();
        assert!(game.pipes().iter().all(|p| p.x >= cfg.pass_x()));
    }
    let alive = game.pipes().len() as u32;
    assert!(game.score() > 0);
    assert_eq!(game.score() + alive, seen.len() as u32);
}

#[test]
fn scored_pairs_scroll_off_before_leaving_the_field() {
    let mut game = running(hover_config(), 11);
    let cfg = *game.config();
    let mut n = 0u32;
    while game.score() == 0 {
        n += 1;
        assert_eq!(game.step(n as f64 * FRAME_MS), StepOutcome::Continue);
    }
    let scored = game.departing()[0];
    assert!(scored.x < cfg.pass_x());
    assert!(game.pipes().iter().all(|p| p.id != scored.id));

    let mut last_x = scored.x;
    loop {
        n += 1;
        assert_eq!(game.step(n as f64 * FRAME_MS), StepOutcome::Continue);
        match game.departing().iter().find(|p| p.id == scored.id) {
            Some(p) => {
                assert!((last_x - p.x - cfg.pipe_speed).abs() < 1e-12);
                assert!(p.x >= cfg.despawn_x);
                last_x = p.x;
            }
            None => break,
        }
    }
    assert!(last_x - cfg.pipe_speed < cfg.despawn_x);
    assert_eq!(game.score(), 1, "departing pairs never score twice");

    game.stop();
    assert!(game.departing().is_empty());
}

#[test]
fn collision_ends_the_run_without_scoring() {
    // Zero offset puts both barriers on the bird's line.
    let config = FlappyConfig {
        gap_band: 0.0,
        barrier_offset: 0.0,
        spawn_interval_ms: 0.0,
        ..hover_config()
    };
    let mut game = running(config, 5);
    let mut n = 0;
    let outcome = loop {
        n += 1;
        match game.step(n as f64) {
            StepOutcome::Continue => continue,
            other => break other,
        }
    };
    assert_eq!(outcome, StepOutcome::GameOver(GameOverCause::Collision));
    assert_eq!(game.last_cause(), Some(GameOverCause::Collision));
    assert_eq!(game.score(), 0);
    let first = game.pipes()[0];
    assert!((first.x - config.bird_x).abs() < config.hit_dx);
}

#[test]
fn hit_box_edges_are_exclusive() {
    let cfg = FlappyConfig::default();
    assert!(!hits(cfg.hit_dx, 0.0, &cfg));
    assert!(!hits(-cfg.hit_dx, 0.0, &cfg));
    assert!(hits(cfg.hit_dx - 1e-9, 0.0, &cfg));
    assert!(!hits(0.0, cfg.hit_dy, &cfg));
    assert!(hits(0.0, cfg.hit_dy - 1e-9, &cfg));
}

#[test]
fn phase_edges() {
    let mut game = FlappyGame::new(FlappyConfig::default(), 1);
    assert_eq!(game.phase(), FlappyPhase::Idle);
    assert!(!game.flap());
    assert_eq!(game.step(0.0), StepOutcome::Idle);
    assert!(!game.restart(0.0));

    assert!(game.start(100.0));
    assert!(!game.start(100.0), "start needs Idle");
    assert!(!game.restart(100.0), "restart needs GameOver");

    // Running → Idle
    game.step(116.0);
    game.stop();
    assert_eq!(game.phase(), FlappyPhase::Idle);
    assert_eq!(game.bird_y(), 0.0);
    assert_eq!(game.velocity(), 0.0);
    assert_eq!(game.ticks(), 0);

    // Running → GameOver → Running via restart
    assert!(game.start(200.0));
    while game.step(216.0) == StepOutcome::Continue {}
    assert_eq!(game.phase(), FlappyPhase::GameOver);
    assert!(!game.flap());
    assert!(game.restart(300.0));
    assert_eq!(game.phase(), FlappyPhase::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.last_spawn_ms(), 300.0);

    // GameOver → Idle via stop
    while game.step(316.0) == StepOutcome::Continue {}
    game.stop();
    assert_eq!(game.phase(), FlappyPhase::Idle);
    assert_eq!(game.last_cause(), None);
}

#[test]
fn same_seed_same_gaps() {
    let run = |seed| {
        let mut game = running(hover_config(), seed);
        let mut gaps = Vec::new();
        for n in 1..=400u32 {
            game.step(n as f64 * FRAME_MS);
            if let Some(p) = game.pipes().last() {
                if gaps.last() != Some(&p.gap_center) {
                    gaps.push(p.gap_center);
                }
            }
        }
        gaps
    };
    assert_eq!(run(42), run(42));
    assert!(!run(42).is_empty());
}
