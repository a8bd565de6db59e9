// Scheduler cancellation, input bus dispatch and stop handles.

use room_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn task_runs_until_done() {
    let scheduler = Scheduler::new();
    let flag = ActiveFlag::new();
    let runs = Rc::new(Cell::new(0));
    let counter = runs.clone();
    scheduler.spawn("count", &flag, move |_| {
        counter.set(counter.get() + 1);
        if counter.get() == 3 {
            TaskControl::Done
        } else {
            TaskControl::Continue
        }
    });
    for i in 0..5 {
        scheduler.run_tick(i as f64 * 16.0);
    }
    assert_eq!(runs.get(), 3);
    assert!(scheduler.is_empty());
    assert_eq!(scheduler.now_ms(), 64.0);
}

#[test]
fn cleared_flag_drops_armed_task() {
    let scheduler = Scheduler::new();
    let flag = ActiveFlag::new();
    let runs = Rc::new(Cell::new(0));
    let counter = runs.clone();
    scheduler.spawn("spin", &flag, move |_| {
        counter.set(counter.get() + 1);
        TaskControl::Continue
    });
    scheduler.run_tick(0.0);
    assert_eq!(runs.get(), 1);

    // Already queued for the next tick when the flag is cleared.
    flag.clear();
    assert_eq!(scheduler.len(), 1);
    scheduler.run_tick(16.0);
    assert_eq!(runs.get(), 1);
    assert!(scheduler.is_empty());
}

#[test]
fn task_cancelled_by_an_earlier_task_in_the_same_tick() {
    let scheduler = Scheduler::new();
    let victim_flag = ActiveFlag::new();
    let killer_flag = ActiveFlag::new();
    let victim_runs = Rc::new(Cell::new(0));

    let doomed = victim_flag.clone();
    scheduler.spawn("killer", &killer_flag, move |_| {
        doomed.clear();
        TaskControl::Done
    });
    let counter = victim_runs.clone();
    scheduler.spawn("victim", &victim_flag, move |_| {
        counter.set(counter.get() + 1);
        TaskControl::Continue
    });
    scheduler.run_tick(0.0);
    assert_eq!(victim_runs.get(), 0);
    assert!(scheduler.is_empty());
}

#[test]
fn tasks_spawned_during_a_tick_start_next_tick() {
    let scheduler = Scheduler::new();
    let flag = ActiveFlag::new();
    let child_runs = Rc::new(Cell::new(0));

    let handle = scheduler.clone();
    let child_flag = flag.clone();
    let counter = child_runs.clone();
    scheduler.spawn("parent", &flag, move |_| {
        let counter = counter.clone();
        handle.spawn("child", &child_flag, move |_| {
            counter.set(counter.get() + 1);
            TaskControl::Done
        });
        TaskControl::Done
    });
    scheduler.run_tick(0.0);
    assert_eq!(child_runs.get(), 0);
    assert_eq!(scheduler.len(), 1);
    scheduler.run_tick(16.0);
    assert_eq!(child_runs.get(), 1);
}

#[test]
fn listener_detached_mid_dispatch_is_skipped() {
    let bus = InputBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let second: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
    let (b, target, log) = (bus.clone(), second.clone(), seen.clone());
    bus.attach(move |_| {
        log.borrow_mut().push("first");
        if let Some(id) = target.get() {
            b.detach(id);
        }
    });
    let log = seen.clone();
    second.set(Some(bus.attach(move |_| log.borrow_mut().push("second"))));

    bus.dispatch(&InputEvent::PointerDown);
    assert_eq!(*seen.borrow(), vec!["first"]);
    assert_eq!(bus.listener_count(), 1);
}

#[test]
fn listener_attached_mid_dispatch_waits_for_next_event() {
    let bus = InputBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let (b, log) = (bus.clone(), seen.clone());
    let armed = Cell::new(false);
    bus.attach(move |_| {
        if !armed.replace(true) {
            let log = log.clone();
            b.attach(move |e| log.borrow_mut().push(e.clone()));
        }
    });

    bus.dispatch(&InputEvent::Key("a".into()));
    assert!(seen.borrow().is_empty());
    bus.dispatch(&InputEvent::Key("b".into()));
    assert_eq!(*seen.borrow(), vec![InputEvent::Key("b".into())]);
}

#[test]
fn stop_handle_runs_teardown_once() {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    let mut handle = StopHandle::new(move || c.set(c.get() + 1));
    assert!(!handle.is_spent());
    handle.stop();
    handle.stop();
    assert_eq!(count.get(), 1);
    assert!(handle.is_spent());

    let mut noop = StopHandle::noop();
    noop.stop();
    assert!(noop.is_spent());
}
