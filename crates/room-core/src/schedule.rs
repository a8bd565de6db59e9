//! Cooperative per-tick task runner.
//!
//! Every animation loop in the room is a task: a step closure plus an
//! [`ActiveFlag`]. The flag is checked before each step, so clearing it
//! cancels the task even if it was already queued for the current tick.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared "still active" flag. Starts set; clearing is permanent.
#[derive(Clone, Debug)]
pub struct ActiveFlag(Rc<Cell<bool>>);

impl ActiveFlag {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.0.get()
    }

    pub fn clear(&self) {
        self.0.set(false);
    }
}

impl Default for ActiveFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskControl {
    /// Run again next tick.
    Continue,
    Done,
}

struct Task {
    label: &'static str,
    flag: ActiveFlag,
    step: Box<dyn FnMut(f64) -> TaskControl>,
}

#[derive(Default)]
struct SchedulerInner {
    tasks: RefCell<Vec<Task>>,
    now_ms: Cell<f64>,
}

/// Cheap-to-clone handle; clones share the same task list.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<SchedulerInner>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `step` to run on the next tick and every tick after until it
    /// returns [`TaskControl::Done`] or `flag` is cleared.
    pub fn spawn(
        &self,
        label: &'static str,
        flag: &ActiveFlag,
        step: impl FnMut(f64) -> TaskControl + 'static,
    ) {
        self.inner.tasks.borrow_mut().push(Task {
            label,
            flag: flag.clone(),
            step: Box::new(step),
        });
    }

    /// Timestamp of the most recent tick.
    pub fn now_ms(&self) -> f64 {
        self.inner.now_ms.get()
    }

    pub fn run_tick(&self, now_ms: f64) {
        self.inner.now_ms.set(now_ms);
        // Steps may spawn tasks or stop other events, so the list is not
        // borrowed while they run.
        let due = std::mem::take(&mut *self.inner.tasks.borrow_mut());
        let mut kept = Vec::with_capacity(due.len());
        for mut task in due {
            if !task.flag.is_active() {
                log::debug!("[tick] dropping cancelled task {}", task.label);
                continue;
            }
            let control = (task.step)(now_ms);
            if control == TaskControl::Continue && task.flag.is_active() {
                kept.push(task);
            }
        }
        let mut tasks = self.inner.tasks.borrow_mut();
        kept.append(&mut tasks);
        *tasks = kept;
    }

    /// Tasks queued for the next tick, including cancelled ones not yet dropped.
    pub fn len(&self) -> usize {
        self.inner.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tasks = self.inner.tasks.borrow();
        f.debug_struct("Scheduler")
            .field("now_ms", &self.now_ms())
            .field("tasks", &tasks.iter().map(|t| t.label).collect::<Vec<_>>())
            .finish()
    }
}
