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

//! In-memory stand-ins for the browser, the widget and the chat host.
//!
//! Compiled for this crate's tests and, behind the `testing` feature, for
//! downstream crates that want to drive a [`MeetingController`] without a
//! browser.
//!
//! [`MeetingController`]: crate::MeetingController

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::channel::oneshot;
use futures::FutureExt;
use jitsi_embed_types::UserStatus;

use crate::error::{EmbedError, LoadError, WidgetError};
use crate::host::{HostWindow, MeetingHost, Subscription};
use crate::loader::{ScriptHost, ScriptLoad};
use crate::scheduler::{ScheduledTask, Scheduler, TaskTrigger};
use crate::session::SessionView;
use crate::viewport::{Dimensions, WindowSize};
use crate::widget::{
    ConferenceWidget, WidgetCommand, WidgetEvent, WidgetEventSink, WidgetFactory, WidgetOptions,
};

// ---------------------------------------------------------------------------
// Script host
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ScriptState {
    available: bool,
    injections: usize,
    pending: Vec<oneshot::Sender<Result<(), LoadError>>>,
    injection_error: Option<String>,
}

/// A document whose script loads complete when the test says so.
#[derive(Clone, Default)]
pub struct FakeScriptHost {
    state: Rc<RefCell<ScriptState>>,
}

impl FakeScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document that already defines the widget constructor.
    pub fn preloaded() -> Self {
        let host = Self::default();
        host.state.borrow_mut().available = true;
        host
    }

    /// Number of script elements injected so far.
    pub fn injections(&self) -> usize {
        self.state.borrow().injections
    }

    /// Loads still waiting for an outcome.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Fire `load` (or `error`) on every injected element.
    pub fn complete_all(&self, result: Result<(), LoadError>) {
        let pending = {
            let mut state = self.state.borrow_mut();
            if result.is_ok() {
                state.available = true;
            }
            std::mem::take(&mut state.pending)
        };
        for tx in pending {
            let _ = tx.send(result.clone());
        }
    }

    /// Make the next injection fail before any element is attached.
    pub fn fail_injection(&self, reason: &str) {
        self.state.borrow_mut().injection_error = Some(reason.to_string());
    }
}

impl ScriptHost for FakeScriptHost {
    fn widget_available(&self) -> bool {
        self.state.borrow().available
    }

    fn inject(&self, url: &str) -> Result<ScriptLoad, LoadError> {
        let mut state = self.state.borrow_mut();
        if let Some(reason) = state.injection_error.take() {
            return Err(LoadError::Injection {
                url: url.to_string(),
                reason,
            });
        }
        state.injections += 1;
        let (tx, rx) = oneshot::channel();
        state.pending.push(tx);
        let url = url.to_string();
        Ok(rx
            .map(move |outcome| outcome.unwrap_or(Err(LoadError::Abandoned(url))))
            .boxed_local())
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

struct WidgetRecord {
    index: usize,
    domain: String,
    options: WidgetOptions,
    sink: WidgetEventSink,
    commands: Vec<WidgetCommand>,
    resizes: Vec<Dimensions>,
    dispose_count: u32,
    tile_view: bool,
    film_strip: bool,
    queued: VecDeque<WidgetEvent>,
}

#[derive(Default)]
struct FactoryState {
    widgets: Vec<FakeWidgetHandle>,
    fail_next: Option<WidgetError>,
    synchronous_events: bool,
    journal: Vec<String>,
}

/// Builds [`FakeWidget`]s and keeps a handle to each one.
///
/// Like the real widget, a fake starts with tile view and filmstrip shown
/// and answers each layout toggle with a changed event. Those events are
/// queued until [`FakeWidgetHandle::flush_events`] unless the factory is
/// switched to synchronous delivery.
#[derive(Clone, Default)]
pub struct FakeWidgetFactory {
    state: Rc<RefCell<FactoryState>>,
}

impl FakeWidgetFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_create(&self, error: WidgetError) {
        self.state.borrow_mut().fail_next = Some(error);
    }

    /// Emit layout events from inside `execute`, re-entering the controller.
    pub fn set_synchronous_events(&self, synchronous: bool) {
        self.state.borrow_mut().synchronous_events = synchronous;
    }

    pub fn created(&self) -> usize {
        self.state.borrow().widgets.len()
    }

    pub fn widget(&self, index: usize) -> Option<FakeWidgetHandle> {
        self.state.borrow().widgets.get(index).cloned()
    }

    pub fn last(&self) -> Option<FakeWidgetHandle> {
        self.state.borrow().widgets.last().cloned()
    }

    /// `create #n` and `dispose #n` entries in the order they happened.
    pub fn journal(&self) -> Vec<String> {
        self.state.borrow().journal.clone()
    }
}

impl WidgetFactory for FakeWidgetFactory {
    fn create(
        &self,
        domain: &str,
        options: WidgetOptions,
        events: WidgetEventSink,
    ) -> Result<Box<dyn ConferenceWidget>, WidgetError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        let index = state.widgets.len();
        let record = Rc::new(RefCell::new(WidgetRecord {
            index,
            domain: domain.to_string(),
            options,
            sink: events,
            commands: Vec::new(),
            resizes: Vec::new(),
            dispose_count: 0,
            tile_view: true,
            film_strip: true,
            queued: VecDeque::new(),
        }));
        state.widgets.push(FakeWidgetHandle {
            record: record.clone(),
        });
        state.journal.push(format!("create #{index}"));
        Ok(Box::new(FakeWidget {
            record,
            factory: Rc::downgrade(&self.state),
        }))
    }
}

/// The widget instance owned by the controller.
pub struct FakeWidget {
    record: Rc<RefCell<WidgetRecord>>,
    factory: Weak<RefCell<FactoryState>>,
}

impl FakeWidget {
    fn synchronous(&self) -> bool {
        self.factory
            .upgrade()
            .is_some_and(|state| state.borrow().synchronous_events)
    }
}

impl ConferenceWidget for FakeWidget {
    fn execute(&mut self, command: &WidgetCommand) -> Result<(), WidgetError> {
        let (event, sink) = {
            let mut record = self.record.borrow_mut();
            if record.dispose_count > 0 {
                return Err(WidgetError::Disposed);
            }
            record.commands.push(command.clone());
            let event = match command {
                WidgetCommand::ToggleTileView => {
                    record.tile_view = !record.tile_view;
                    Some(WidgetEvent::TileViewChanged {
                        enabled: record.tile_view,
                    })
                }
                WidgetCommand::ToggleFilmStrip => {
                    record.film_strip = !record.film_strip;
                    Some(WidgetEvent::FilmstripDisplayChanged {
                        visible: record.film_strip,
                    })
                }
                WidgetCommand::Subject(_) | WidgetCommand::Hangup => None,
            };
            (event, record.sink.clone())
        };

        if let Some(event) = event {
            if self.synchronous() {
                sink.emit(event);
            } else {
                self.record.borrow_mut().queued.push_back(event);
            }
        }
        Ok(())
    }

    fn resize(&mut self, dimensions: Dimensions) -> Result<(), WidgetError> {
        self.record.borrow_mut().resizes.push(dimensions);
        Ok(())
    }

    fn dispose(&mut self) {
        let index = {
            let mut record = self.record.borrow_mut();
            record.dispose_count += 1;
            record.index
        };
        if let Some(state) = self.factory.upgrade() {
            state.borrow_mut().journal.push(format!("dispose #{index}"));
        }
    }
}

/// Test-side view of a [`FakeWidget`]. Stays usable after disposal so tests
/// can fire late events.
#[derive(Clone)]
pub struct FakeWidgetHandle {
    record: Rc<RefCell<WidgetRecord>>,
}

impl FakeWidgetHandle {
    pub fn domain(&self) -> String {
        self.record.borrow().domain.clone()
    }

    pub fn options(&self) -> WidgetOptions {
        self.record.borrow().options.clone()
    }

    pub fn commands(&self) -> Vec<WidgetCommand> {
        self.record.borrow().commands.clone()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.record
            .borrow()
            .commands
            .iter()
            .map(WidgetCommand::name)
            .collect()
    }

    pub fn count(&self, command: &WidgetCommand) -> usize {
        self.record
            .borrow()
            .commands
            .iter()
            .filter(|c| *c == command)
            .count()
    }

    pub fn resizes(&self) -> Vec<Dimensions> {
        self.record.borrow().resizes.clone()
    }

    pub fn dispose_count(&self) -> u32 {
        self.record.borrow().dispose_count
    }

    pub fn is_disposed(&self) -> bool {
        self.dispose_count() > 0
    }

    /// Current `(tile_view, film_strip)` as the widget itself sees it.
    pub fn layout(&self) -> (bool, bool) {
        let record = self.record.borrow();
        (record.tile_view, record.film_strip)
    }

    /// Change the layout from inside the widget, as a user clicking the
    /// widget's own buttons would, and report it.
    pub fn user_sets_tile_view(&self, enabled: bool) {
        self.record.borrow_mut().tile_view = enabled;
        self.emit(WidgetEvent::TileViewChanged { enabled });
    }

    pub fn user_sets_film_strip(&self, visible: bool) {
        self.record.borrow_mut().film_strip = visible;
        self.emit(WidgetEvent::FilmstripDisplayChanged { visible });
    }

    pub fn emit(&self, event: WidgetEvent) {
        let sink = self.record.borrow().sink.clone();
        sink.emit(event);
    }

    /// Deliver queued layout events.
    pub fn flush_events(&self) {
        loop {
            let next = self.record.borrow_mut().queued.pop_front();
            match next {
                Some(event) => self.emit(event),
                None => break,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListenerKind {
    Resize,
    Escape,
}

struct WindowState {
    size: WindowSize,
    next_id: u64,
    listeners: Vec<(u64, ListenerKind, Rc<dyn Fn()>)>,
}

struct ListenerGuard {
    id: u64,
    window: Weak<RefCell<WindowState>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(window) = self.window.upgrade() {
            window.borrow_mut().listeners.retain(|(id, _, _)| *id != self.id);
        }
    }
}

/// A window whose size and key presses are driven by the test.
#[derive(Clone)]
pub struct FakeWindow {
    state: Rc<RefCell<WindowState>>,
}

impl FakeWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(WindowState {
                size: WindowSize::new(width, height),
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn resize_to(&self, width: u32, height: u32) {
        self.state.borrow_mut().size = WindowSize::new(width, height);
        self.fire(ListenerKind::Resize);
    }

    pub fn press_escape(&self) {
        self.fire(ListenerKind::Escape);
    }

    pub fn resize_listeners(&self) -> usize {
        self.count(ListenerKind::Resize)
    }

    pub fn escape_listeners(&self) -> usize {
        self.count(ListenerKind::Escape)
    }

    fn count(&self, kind: ListenerKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    fn fire(&self, kind: ListenerKind) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, f)| f.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn register(&self, kind: ListenerKind, listener: Box<dyn Fn()>) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push((id, kind, Rc::from(listener)));
        Subscription::new(ListenerGuard {
            id,
            window: Rc::downgrade(&self.state),
        })
    }
}

impl HostWindow for FakeWindow {
    fn inner_size(&self) -> WindowSize {
        self.state.borrow().size
    }

    fn on_resize(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.register(ListenerKind::Resize, listener)
    }

    fn on_escape(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.register(ListenerKind::Escape, listener)
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

#[derive(Default)]
struct HostLog {
    closed: u32,
    failures: Vec<EmbedError>,
    presence: Vec<UserStatus>,
    views: Vec<SessionView>,
}

/// Records every callback the controller makes into the chat host.
#[derive(Clone, Default)]
pub struct RecordingHost {
    log: Rc<RefCell<HostLog>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn closed_count(&self) -> u32 {
        self.log.borrow().closed
    }

    pub fn failures(&self) -> Vec<EmbedError> {
        self.log.borrow().failures.clone()
    }

    pub fn presence(&self) -> Vec<UserStatus> {
        self.log.borrow().presence.clone()
    }

    pub fn last_view(&self) -> Option<SessionView> {
        self.log.borrow().views.last().cloned()
    }

    pub fn view_count(&self) -> usize {
        self.log.borrow().views.len()
    }
}

impl MeetingHost for RecordingHost {
    fn meeting_closed(&self) {
        self.log.borrow_mut().closed += 1;
    }

    fn open_failed(&self, error: &EmbedError) {
        self.log.borrow_mut().failures.push(error.clone());
    }

    fn set_presence(&self, status: UserStatus) {
        self.log.borrow_mut().presence.push(status);
    }

    fn session_changed(&self, view: &SessionView) {
        self.log.borrow_mut().views.push(view.clone());
    }
}

// ---------------------------------------------------------------------------
// Virtual clock
// ---------------------------------------------------------------------------

struct Timer {
    due: Duration,
    seq: u64,
    trigger: TaskTrigger,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    seq: u64,
    timers: Vec<Timer>,
}

/// A [`Scheduler`] on a virtual clock that only moves in [`advance`].
///
/// [`advance`]: ManualScheduler::advance
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ClockState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Tasks scheduled and neither run nor cancelled.
    pub fn pending(&self) -> usize {
        self.state
            .borrow()
            .timers
            .iter()
            .filter(|t| t.trigger.is_armed())
            .count()
    }

    /// Move the clock forward, running due tasks in deadline order. Tasks
    /// scheduled by a running task fire too if they fall within the window.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                state.timers.retain(|t| t.trigger.is_armed());
                let due = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                due.map(|i| {
                    let timer = state.timers.remove(i);
                    state.now = timer.due;
                    timer
                })
            };
            match next {
                Some(timer) => timer.trigger.fire(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask {
        let (handle, trigger) = ScheduledTask::new(task);
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        let seq = state.seq;
        state.seq += 1;
        state.timers.push(Timer { due, seq, trigger });
        handle
    }
}
