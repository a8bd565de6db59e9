//! Binds [`FlappyGame`] to scene nodes, input listeners and the panel.

use crate::constants::*;
use crate::error::RoomError;
use crate::event::{EventContext, MiniEvent, StopHandle};
use crate::flappy::{FlappyConfig, FlappyGame, FlappyPhase, StepOutcome};
use crate::input::{InputEvent, ListenerId};
use crate::scene::{NodeId, NodeKind, Rgb, SceneGraph, Transform};
use crate::schedule::{ActiveFlag, TaskControl};
use fnv::FnvHashMap;
use glam::Vec3;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;

/// The Flappy mini-game as a room event. Starting it shows the intro panel;
/// the panel's START action launches a run, and again after a game over.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlappyBook {
    config: FlappyConfig,
}

impl FlappyBook {
    pub fn new(config: FlappyConfig) -> Self {
        Self { config }
    }
}

struct Session {
    game: FlappyGame,
    field: NodeId,
    bird: NodeId,
    pipes: FnvHashMap<u64, (NodeId, NodeId)>,
    panel_listener: Option<ListenerId>,
    flap_listener: Option<ListenerId>,
    run: Option<ActiveFlag>,
}

impl Session {
    /// Mirror the game state onto the play-field nodes.
    fn sync(&mut self, scene: &mut dyn SceneGraph) {
        let cfg = *self.game.config();
        scene.set_transform(
            self.bird,
            Transform::from_translation(Vec3::new(cfg.bird_x as f32, self.game.bird_y() as f32, 0.0)),
        );

        let live: FnvHashMap<u64, (f64, f64)> = self
            .game
            .pipes()
            .iter()
            .chain(self.game.departing())
            .map(|p| (p.id, (p.x, p.gap_center)))
            .collect();
        self.pipes.retain(|id, (lower, upper)| {
            let keep = live.contains_key(id);
            if !keep {
                scene.despawn(*lower);
                scene.despawn(*upper);
            }
            keep
        });

        for (id, (x, gap)) in live {
            let field = self.field;
            let (lower, upper) = *self.pipes.entry(id).or_insert_with(|| {
                let barrier = || NodeKind::Block {
                    size: Vec3::from(FLAPPY_BARRIER_SIZE),
                    color: Rgb(FLAPPY_PIPE_COLOR),
                };
                (
                    scene.spawn(Some(field), barrier(), Transform::IDENTITY),
                    scene.spawn(Some(field), barrier(), Transform::IDENTITY),
                )
            });
            let at = |y: f64| Transform::from_translation(Vec3::new(x as f32, y as f32, 0.0));
            scene.set_transform(lower, at(gap - cfg.barrier_offset));
            scene.set_transform(upper, at(gap + cfg.barrier_offset));
        }
    }

    fn clear_pipes(&mut self, scene: &mut dyn SceneGraph) {
        for (_, (lower, upper)) in self.pipes.drain() {
            scene.despawn(lower);
            scene.despawn(upper);
        }
    }
}

struct Binding {
    ctx: EventContext,
    alive: ActiveFlag,
    session: RefCell<Session>,
}

impl Binding {
    /// Idle or GameOver → Running, wired to the flap inputs and the step loop.
    fn launch(self: &Rc<Self>) {
        if !self.alive.is_active() {
            return;
        }
        let now = self.ctx.scheduler.now_ms();
        {
            let mut s = self.session.borrow_mut();
            let started = match s.game.phase() {
                FlappyPhase::Idle => s.game.start(now),
                FlappyPhase::GameOver => s.game.restart(now),
                FlappyPhase::Running => false,
            };
            if !started {
                return;
            }
            let mut scene = self.ctx.scene.borrow_mut();
            s.clear_pipes(&mut *scene);
            s.sync(&mut *scene);
            scene.set_visible(s.field, true);
        }
        self.ctx.presenter.borrow_mut().hide_panel();

        let flap = {
            let this = Rc::clone(self);
            self.ctx.input.attach(move |event| this.on_flap_input(event))
        };
        let run = ActiveFlag::new();
        {
            let mut s = self.session.borrow_mut();
            s.flap_listener = Some(flap);
            s.run = Some(run.clone());
        }
        let this = Rc::clone(self);
        self.ctx.scheduler.spawn("flappy", &run, move |now| this.step(now));
        log::info!("[flappy] run started");
    }

    fn on_flap_input(&self, event: &InputEvent) {
        let wants_flap = match event {
            InputEvent::PointerDown => true,
            InputEvent::Key(key) => is_flap_key(key),
            InputEvent::PanelAction => false,
        };
        if wants_flap {
            if let Ok(mut s) = self.session.try_borrow_mut() {
                s.game.flap();
            }
        }
    }

    fn step(&self, now: f64) -> TaskControl {
        let outcome = {
            let mut s = self.session.borrow_mut();
            let outcome = s.game.step(now);
            s.sync(&mut *self.ctx.scene.borrow_mut());
            outcome
        };
        match outcome {
            StepOutcome::Continue => TaskControl::Continue,
            StepOutcome::Idle => TaskControl::Done,
            StepOutcome::GameOver(_) => {
                self.end_run();
                TaskControl::Done
            }
        }
    }

    /// Stop listening and stepping; keep the game in GameOver and put the
    /// score on the panel.
    fn end_run(&self) {
        let (flap, run, field, score) = {
            let mut s = self.session.borrow_mut();
            (s.flap_listener.take(), s.run.take(), s.field, s.game.score())
        };
        if let Some(id) = flap {
            self.ctx.input.detach(id);
        }
        if let Some(run) = run {
            run.clear();
        }
        self.ctx.scene.borrow_mut().set_visible(field, false);
        let text = format!("Game Over!\nScore: {score}\nClick START to play again!");
        self.ctx
            .presenter
            .borrow_mut()
            .show_panel(&text, Some(FLAPPY_ACTION));
    }

    fn teardown(&self) {
        self.alive.clear();
        let (panel, flap, run, field) = {
            let mut s = self.session.borrow_mut();
            s.game.stop();
            s.pipes.clear();
            (s.panel_listener.take(), s.flap_listener.take(), s.run.take(), s.field)
        };
        for id in [panel, flap].into_iter().flatten() {
            self.ctx.input.detach(id);
        }
        if let Some(run) = run {
            run.clear();
        }
        self.ctx.scene.borrow_mut().despawn(field);
        self.ctx.presenter.borrow_mut().hide_panel();
        log::debug!("[flappy] torn down");
    }
}

impl MiniEvent for FlappyBook {
    fn start(&self, ctx: &EventContext) -> Result<StopHandle, RoomError> {
        let (field, bird) = {
            let mut scene = ctx.scene.borrow_mut();
            let field = scene.spawn(
                None,
                NodeKind::Group,
                Transform::from_translation(Vec3::from(FLAPPY_FIELD_POSITION))
                    .with_uniform_scale(FLAPPY_FIELD_SCALE),
            );
            let bird = scene.spawn(
                Some(field),
                NodeKind::Sprite {
                    glyph: FLAPPY_BIRD_GLYPH.to_string(),
                    color: Rgb(FLAPPY_BIRD_COLOR),
                    size: FLAPPY_BIRD_SIZE,
                },
                Transform::from_translation(Vec3::new(self.config.bird_x as f32, 0.0, 0.0)),
            );
            scene.set_visible(field, false);
            (field, bird)
        };

        let binding = Rc::new(Binding {
            ctx: ctx.clone(),
            alive: ActiveFlag::new(),
            session: RefCell::new(Session {
                game: FlappyGame::new(self.config, ctx.rng().gen()),
                field,
                bird,
                pipes: FnvHashMap::default(),
                panel_listener: None,
                flap_listener: None,
                run: None,
            }),
        });

        let panel = {
            let this = Rc::clone(&binding);
            ctx.input.attach(move |event| {
                if *event == InputEvent::PanelAction {
                    this.launch();
                }
            })
        };
        binding.session.borrow_mut().panel_listener = Some(panel);
        ctx.presenter
            .borrow_mut()
            .show_panel(FLAPPY_INTRO, Some(FLAPPY_ACTION));

        Ok(StopHandle::new(move || binding.teardown()))
    }
}

