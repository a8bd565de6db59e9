use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Input forwarded to mini-events that attached a listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown,
    /// `KeyboardEvent.key` value.
    Key(String),
    /// The action button on the presenter's panel (e.g. Flappy's START).
    PanelAction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Rc<RefCell<dyn FnMut(&InputEvent)>>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(ListenerId, Callback)>,
}

/// Listener registry shared between the room and running mini-events.
#[derive(Clone, Default)]
pub struct InputBus {
    inner: Rc<RefCell<BusInner>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, callback: impl FnMut(&InputEvent) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = ListenerId(inner.next_id);
        let callback: Callback = Rc::new(RefCell::new(callback));
        inner.listeners.push((id, callback));
        id
    }

    /// Returns false if `id` was not attached.
    pub fn detach(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(l, _)| *l != id);
        inner.listeners.len() != before
    }

    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.inner.borrow().listeners.iter().any(|(l, _)| *l == id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Deliver `event` to the listeners attached when dispatch began.
    /// Listeners detached by an earlier callback are skipped.
    pub fn dispatch(&self, event: &InputEvent) {
        let snapshot: Vec<(ListenerId, Callback)> = self.inner.borrow().listeners.clone();
        for (id, callback) in snapshot {
            if !self.is_attached(id) {
                continue;
            }
            if let Ok(mut f) = callback.try_borrow_mut() {
                f(event);
            }
        }
    }
}

impl fmt::Debug for InputBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
