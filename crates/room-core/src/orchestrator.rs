//! Single-slot event lifecycle: at most one mini-event runs at a time.

use crate::error::RoomError;
use crate::event::{Ambient, AmbientOverride, EventContext, MiniEvent, StopHandle};
use crate::scene::SharedScene;
use fnv::FnvHashMap;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One row of the dispatch table.
#[derive(Clone, Default)]
pub struct EventEntry {
    pub caption: Option<Cow<'static, str>>,
    pub event: Option<Rc<dyn MiniEvent>>,
    pub ambient: AmbientOverride,
}

impl EventEntry {
    pub fn caption(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            caption: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_event(mut self, event: impl MiniEvent + 'static) -> Self {
        self.event = Some(Rc::new(event));
        self
    }

    pub fn with_ambient(mut self, ambient: AmbientOverride) -> Self {
        self.ambient = ambient;
        self
    }
}

/// Identifier → caption, variant and ambient overrides.
#[derive(Clone, Default)]
pub struct EventTable {
    entries: FnvHashMap<String, EventEntry>,
}

impl EventTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: EventEntry) {
        self.entries.insert(id.into(), entry);
    }

    pub fn with(mut self, id: impl Into<String>, entry: EventEntry) -> Self {
        self.insert(id, entry);
        self
    }

    pub fn get(&self, id: &str) -> Option<&EventEntry> {
        self.entries.get(id)
    }

    pub fn has_event(&self, id: &str) -> bool {
        self.get(id).is_some_and(|e| e.event.is_some())
    }

    /// The caption to show when `id` is clicked.
    pub fn caption_for(&self, id: &str) -> Cow<'_, str> {
        match self.get(id).and_then(|e| e.caption.as_deref()) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(format!("You clicked: {id}")),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct ActiveEvent {
    id: String,
    stop: StopHandle,
    ambient: AmbientOverride,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Another transition was already in flight.
    Ignored,
}

struct Inner {
    table: EventTable,
    scene: SharedScene,
    defaults: Ambient,
    active: RefCell<Option<ActiveEvent>>,
    transitioning: Cell<bool>,
}

/// Clears the in-flight flag however the transition ends.
struct TransitionGuard<'a>(&'a Cell<bool>);

impl<'a> TransitionGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        (!flag.replace(true)).then_some(Self(flag))
    }
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Owner of the single [`ActiveEvent`] slot. Clones share the slot, so a
/// mini-event holding a handle re-entering `start` hits the transition guard
/// instead of a borrow panic.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Rc<Inner>,
}

impl Orchestrator {
    pub fn new(table: EventTable, scene: SharedScene, defaults: Ambient) -> Self {
        Self {
            inner: Rc::new(Inner {
                table,
                scene,
                defaults,
                active: RefCell::new(None),
                transitioning: Cell::new(false),
            }),
        }
    }

    pub fn table(&self) -> &EventTable {
        &self.inner.table
    }

    pub fn defaults(&self) -> Ambient {
        self.inner.defaults
    }

    pub fn active_id(&self) -> Option<String> {
        self.inner.active.borrow().as_ref().map(|a| a.id.clone())
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.borrow().is_some()
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.transitioning.get()
    }

    /// Stop whatever runs, apply `id`'s ambient overrides and start its
    /// variant. A failed start leaves the slot empty and the ambient at
    /// its defaults.
    pub fn start(&self, id: &str, ctx: &EventContext) -> Result<StartOutcome, RoomError> {
        let Some(_guard) = TransitionGuard::enter(&self.inner.transitioning) else {
            log::warn!("[events] transition in flight; dropping start of {id}");
            return Ok(StartOutcome::Ignored);
        };
        let entry = self
            .inner
            .table
            .get(id)
            .ok_or_else(|| RoomError::UnknownEvent(id.to_string()))?;
        let event = entry
            .event
            .clone()
            .ok_or_else(|| RoomError::UnknownEvent(id.to_string()))?;

        self.stop();
        entry.ambient.apply(&mut *self.inner.scene.borrow_mut());

        match event.start(ctx) {
            Ok(stop) => {
                *self.inner.active.borrow_mut() = Some(ActiveEvent {
                    id: id.to_string(),
                    stop,
                    ambient: entry.ambient,
                });
                log::info!("[events] started {id}");
                Ok(StartOutcome::Started)
            }
            Err(err) => {
                if !entry.ambient.is_empty() {
                    self.inner.defaults.apply(&mut *self.inner.scene.borrow_mut());
                }
                log::warn!("[events] {err}");
                Err(err)
            }
        }
    }

    /// Tear down the active event, if any, and restore the ambient defaults.
    pub fn stop(&self) {
        let Some(mut active) = self.inner.active.borrow_mut().take() else {
            return;
        };
        active.stop.stop();
        if !active.ambient.is_empty() {
            self.inner.defaults.apply(&mut *self.inner.scene.borrow_mut());
        }
        log::info!("[events] stopped {}", active.id);
    }
}
