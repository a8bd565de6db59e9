//! The room facade: owns the interaction state and exposes the input
//! surface the front-end drives once per frame.

use crate::camera::Camera;
use crate::constants::DISMISS_KEY;
use crate::event::{Ambient, EventContext};
use crate::hover::{HoverConfig, HoverController};
use crate::input::{InputBus, InputEvent};
use crate::orchestrator::{EventTable, Orchestrator};
use crate::presenter::{SharedPresenter, SharedSoundtrack};
use crate::registry::InteractableRegistry;
use crate::scene::SharedScene;
use crate::schedule::Scheduler;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Collaborators shared by the room and every mini-event it starts.
#[derive(Clone)]
pub struct RoomServices {
    pub scene: SharedScene,
    pub presenter: SharedPresenter,
    pub soundtrack: SharedSoundtrack,
}

pub struct Room {
    services: RoomServices,
    registry: InteractableRegistry,
    hover: HoverController,
    orchestrator: Orchestrator,
    scheduler: Scheduler,
    input: InputBus,
    camera: Camera,
    rng: StdRng,
    pending_click: bool,
    pointer_cursor: bool,
    now_ms: f64,
}

impl Room {
    pub fn new(
        services: RoomServices,
        registry: InteractableRegistry,
        table: EventTable,
        camera: Camera,
        seed: u64,
    ) -> Self {
        Self::with_config(
            services,
            registry,
            table,
            camera,
            seed,
            HoverConfig::default(),
            Ambient::default(),
        )
    }

    pub fn with_config(
        services: RoomServices,
        registry: InteractableRegistry,
        table: EventTable,
        camera: Camera,
        seed: u64,
        hover: HoverConfig,
        ambient: Ambient,
    ) -> Self {
        ambient.apply(&mut *services.scene.borrow_mut());
        let orchestrator = Orchestrator::new(table, services.scene.clone(), ambient);
        log::info!(
            "[room] ready with {} interactables, {} table entries",
            registry.len(),
            orchestrator.table().len()
        );
        Self {
            services,
            registry,
            hover: HoverController::new(hover),
            orchestrator,
            scheduler: Scheduler::new(),
            input: InputBus::new(),
            camera,
            rng: StdRng::seed_from_u64(seed),
            pending_click: false,
            pointer_cursor: false,
            now_ms: 0.0,
        }
    }

    pub fn registry(&self) -> &InteractableRegistry {
        &self.registry
    }

    pub fn hover(&self) -> &HoverController {
        &self.hover
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn input(&self) -> &InputBus {
        &self.input
    }

    pub fn services(&self) -> &RoomServices {
        &self.services
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.hover.hovered_id(&self.registry)
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pointer_move(&mut self, ndc: Vec2) {
        self.hover.set_pointer(ndc);
    }

    pub fn pointer_leave(&mut self) {
        self.hover.clear_pointer();
    }

    /// Running mini-events see the press at once; the room's own click
    /// handling waits for the next tick.
    pub fn pointer_click(&mut self) {
        self.input.dispatch(&InputEvent::PointerDown);
        self.pending_click = true;
    }

    pub fn key_down(&mut self, key: &str) {
        if key == DISMISS_KEY {
            self.dismiss();
            return;
        }
        self.input.dispatch(&InputEvent::Key(key.to_string()));
    }

    pub fn panel_action(&mut self) {
        self.input.dispatch(&InputEvent::PanelAction);
    }

    /// Close the caption only; a running event keeps going.
    pub fn close_caption(&mut self) {
        self.services.presenter.borrow_mut().hide_caption();
    }

    /// Close the caption and stop whatever event is running.
    pub fn dismiss(&mut self) {
        self.services.presenter.borrow_mut().hide_caption();
        self.orchestrator.stop();
    }

    /// One frame: hover, then the queued click, then the event tasks.
    pub fn tick(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        self.hover.update(
            &self.camera,
            &self.registry,
            &mut *self.services.scene.borrow_mut(),
        );

        let pointer = self.hover.is_pointer_cursor();
        if pointer != self.pointer_cursor {
            self.pointer_cursor = pointer;
            self.services
                .presenter
                .borrow_mut()
                .set_pointer_cursor(pointer);
        }

        if std::mem::take(&mut self.pending_click) {
            if let Some(id) = self.hovered_id().map(str::to_owned) {
                self.activate(&id);
            }
        }

        self.scheduler.run_tick(now_ms);
    }

    /// Click behaviour for `id`: show its caption, then hand its mini-event,
    /// if it has one, to the orchestrator. Unregistered ids are ignored.
    pub fn activate(&mut self, id: &str) {
        if self.registry.lookup(id).is_none() {
            log::debug!("[room] ignoring click on unregistered {id}");
            return;
        }
        let caption = self.orchestrator.table().caption_for(id).into_owned();
        self.services.presenter.borrow_mut().show_caption(&caption);
        if !self.orchestrator.table().has_event(id) {
            log::debug!("[room] {id} has no mini-event");
            return;
        }
        let ctx = self.event_context();
        if let Err(err) = self.orchestrator.start(id, &ctx) {
            log::warn!("[room] {err}");
        }
    }

    fn event_context(&mut self) -> EventContext {
        EventContext {
            scene: self.services.scene.clone(),
            scheduler: self.scheduler.clone(),
            input: self.input.clone(),
            presenter: self.services.presenter.clone(),
            soundtrack: self.services.soundtrack.clone(),
            camera: self.camera.clone(),
            now_ms: self.now_ms,
            seed: self.rng.gen(),
        }
    }
}
