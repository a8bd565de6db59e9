//! Flappy game state machine and physics. Pure: no scene nodes, no input.
//!
//! Altitude and pipe positions are in play-field units. The field spans
//! `[FLOOR, CEILING]` vertically; pipes enter at `pipe_start_x` and scroll
//! toward the bird at `bird_x`. All per-step factors are fixed, not scaled
//! by frame time.
//!
//! A pair leaves the obstacle list (and scores) as soon as it clears the
//! bird. It then keeps scrolling as a departing pair, with no collision,
//! until it crosses `despawn_x`.

use crate::constants::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlappyPhase {
    Idle,
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    OutOfBounds,
    Collision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing happened.
    Idle,
    Continue,
    GameOver(GameOverCause),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlappyConfig {
    pub gravity: f64,
    pub flap_impulse: f64,
    pub pipe_speed: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub spawn_interval_ms: f64,
    pub bird_x: f64,
    pub pipe_start_x: f64,
    pub despawn_x: f64,
    pub gap_band: f64,
    pub barrier_offset: f64,
    pub hit_dx: f64,
    pub hit_dy: f64,
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self {
            gravity: FLAPPY_GRAVITY,
            flap_impulse: FLAPPY_FLAP_IMPULSE,
            pipe_speed: FLAPPY_PIPE_SPEED,
            floor: FLAPPY_FLOOR,
            ceiling: FLAPPY_CEILING,
            spawn_interval_ms: FLAPPY_SPAWN_INTERVAL_MS,
            bird_x: FLAPPY_BIRD_X,
            pipe_start_x: FLAPPY_PIPE_START_X,
            despawn_x: FLAPPY_DESPAWN_X,
            gap_band: FLAPPY_GAP_BAND,
            barrier_offset: FLAPPY_BARRIER_OFFSET,
            hit_dx: FLAPPY_HIT_DX,
            hit_dy: FLAPPY_HIT_DY,
        }
    }
}

impl FlappyConfig {
    /// A pair left of this line can no longer touch the bird.
    pub fn pass_x(&self) -> f64 {
        self.bird_x - self.hit_dx
    }
}

/// One obstacle: a top and a bottom barrier around a shared gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipePair {
    pub id: u64,
    pub x: f64,
    pub gap_center: f64,
}

impl PipePair {
    /// `(lower, upper)` barrier centres.
    pub fn barrier_centers(&self, offset: f64) -> (f64, f64) {
        (self.gap_center - offset, self.gap_center + offset)
    }
}

/// Bird/barrier overlap test. Both bounds are strict.
#[inline]
pub fn hits(dx: f64, dy: f64, config: &FlappyConfig) -> bool {
    dx.abs() < config.hit_dx && dy.abs() < config.hit_dy
}

pub struct FlappyGame {
    config: FlappyConfig,
    phase: FlappyPhase,
    bird_y: f64,
    velocity: f64,
    score: u32,
    pipes: Vec<PipePair>,
    departing: Vec<PipePair>,
    last_spawn_ms: f64,
    next_pipe_id: u64,
    ticks: u64,
    rng: StdRng,
    last_cause: Option<GameOverCause>,
}

impl FlappyGame {
    pub fn new(config: FlappyConfig, seed: u64) -> Self {
        Self {
            config,
            phase: FlappyPhase::Idle,
            bird_y: 0.0,
            velocity: 0.0,
            score: 0,
            pipes: Vec::new(),
            departing: Vec::new(),
            last_spawn_ms: 0.0,
            next_pipe_id: 0,
            ticks: 0,
            rng: StdRng::seed_from_u64(seed),
            last_cause: None,
        }
    }

    pub fn config(&self) -> &FlappyConfig {
        &self.config
    }

    pub fn phase(&self) -> FlappyPhase {
        self.phase
    }

    pub fn bird_y(&self) -> f64 {
        self.bird_y
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pipes(&self) -> &[PipePair] {
        &self.pipes
    }

    /// Scored pairs still scrolling off the field. Never collide.
    pub fn departing(&self) -> &[PipePair] {
        &self.departing
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    /// Steps taken in the current run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_cause(&self) -> Option<GameOverCause> {
        self.last_cause
    }

    fn reset(&mut self) {
        self.bird_y = 0.0;
        self.velocity = 0.0;
        self.score = 0;
        self.pipes.clear();
        self.departing.clear();
        self.ticks = 0;
        self.last_cause = None;
    }

    /// Idle → Running. Returns false (and changes nothing) from any other phase.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase != FlappyPhase::Idle {
            return false;
        }
        self.reset();
        self.last_spawn_ms = now_ms;
        self.phase = FlappyPhase::Running;
        true
    }

    /// Sets the vertical velocity to the flap impulse. Ignored unless running.
    pub fn flap(&mut self) -> bool {
        if self.phase != FlappyPhase::Running {
            return false;
        }
        self.velocity = self.config.flap_impulse;
        true
    }

    /// Any phase → Idle, back to the rest state.
    pub fn stop(&mut self) {
        self.reset();
        self.phase = FlappyPhase::Idle;
    }

    /// GameOver → Idle → Running.
    pub fn restart(&mut self, now_ms: f64) -> bool {
        if self.phase != FlappyPhase::GameOver {
            return false;
        }
        self.stop();
        self.start(now_ms)
    }

    pub fn step(&mut self, now_ms: f64) -> StepOutcome {
        if self.phase != FlappyPhase::Running {
            return StepOutcome::Idle;
        }
        self.ticks += 1;
        let cfg = self.config;

        self.velocity -= cfg.gravity;
        self.bird_y += self.velocity;
        if self.bird_y < cfg.floor || self.bird_y > cfg.ceiling {
            return self.game_over(GameOverCause::OutOfBounds);
        }

        if now_ms - self.last_spawn_ms > cfg.spawn_interval_ms {
            let gap_center = self.rng.gen_range(-cfg.gap_band..=cfg.gap_band);
            self.next_pipe_id += 1;
            self.pipes.push(PipePair {
                id: self.next_pipe_id,
                x: cfg.pipe_start_x,
                gap_center,
            });
            self.last_spawn_ms = now_ms;
        }

        self.departing.retain_mut(|pipe| {
            pipe.x -= cfg.pipe_speed;
            pipe.x >= cfg.despawn_x
        });

        let bird_y = self.bird_y;
        let mut collided = false;
        let mut passed = Vec::new();
        self.pipes.retain_mut(|pipe| {
            if collided {
                return true;
            }
            pipe.x -= cfg.pipe_speed;
            let dx = pipe.x - cfg.bird_x;
            let (lower, upper) = pipe.barrier_centers(cfg.barrier_offset);
            if hits(dx, bird_y - lower, &cfg) || hits(dx, bird_y - upper, &cfg) {
                collided = true;
                return true;
            }
            if pipe.x < cfg.pass_x() {
                passed.push(*pipe);
                return false;
            }
            true
        });
        self.score += passed.len() as u32;
        self.departing.extend(passed);

        if collided {
            return self.game_over(GameOverCause::Collision);
        }
        StepOutcome::Continue
    }

    fn game_over(&mut self, cause: GameOverCause) -> StepOutcome {
        self.phase = FlappyPhase::GameOver;
        self.last_cause = Some(cause);
        log::info!(
            "[flappy] game over ({cause:?}) after {} ticks, score {}",
            self.ticks,
            self.score
        );
        StepOutcome::GameOver(cause)
    }
}

