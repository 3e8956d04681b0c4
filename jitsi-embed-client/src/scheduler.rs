/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Cancellable delayed tasks.
//!
//! The teardown sequencer schedules its disposal step through [`Scheduler`]
//! so the delay can run on a real browser timer in production and on a
//! virtual clock in tests, and so a pending step can be cancelled or forced
//! to run immediately.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::platform::TimeoutHandle;

type TaskSlot = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

/// Something that can run a closure after a delay.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask;
}

/// Handle to a scheduled closure. The closure runs at most once; dropping the
/// handle cancels it.
pub struct ScheduledTask {
    slot: TaskSlot,
    _timer: Option<Box<dyn Any>>,
}

/// The timer side of a [`ScheduledTask`]: firing it runs the closure unless
/// it was cancelled or already ran.
pub struct TaskTrigger {
    slot: TaskSlot,
}

impl ScheduledTask {
    pub fn new(task: Box<dyn FnOnce()>) -> (Self, TaskTrigger) {
        let slot: TaskSlot = Rc::new(RefCell::new(Some(task)));
        let trigger = TaskTrigger { slot: slot.clone() };
        (Self { slot, _timer: None }, trigger)
    }

    /// Tie the lifetime of a platform timer to this handle.
    pub fn with_timer<T: Any>(mut self, timer: T) -> Self {
        self._timer = Some(Box::new(timer));
        self
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn cancel(self) {
        drop(self);
    }

    /// Run the closure now instead of waiting for the timer.
    pub fn run_now(mut self) {
        self._timer = None;
        let task = self.slot.borrow_mut().take();
        if let Some(task) = task {
            task();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.slot.borrow_mut().take();
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl TaskTrigger {
    pub fn is_armed(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn fire(&self) {
        let task = self.slot.borrow_mut().take();
        if let Some(task) = task {
            task();
        }
    }
}

/// Schedules on the platform timer (`setTimeout` in the browser, a local
/// tokio task natively).
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformScheduler;

impl Scheduler for PlatformScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask {
        let (handle, trigger) = ScheduledTask::new(task);
        let timer = TimeoutHandle::new(delay, move || trigger.fire());
        handle.with_timer(timer)
    }
}
