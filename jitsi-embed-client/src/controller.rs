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

//! The embedded meeting window lifecycle controller.
//!
//! [`MeetingController`] owns at most one widget instance at a time and moves
//! through `Idle → Initializing → Active → Closing → Idle`. User intents come
//! in through its methods; widget callbacks come in through the
//! [`WidgetEventSink`] handed to the factory and are matched against the
//! session generation that created the widget, so callbacks from a replaced
//! or disposed instance are dropped.
//!
//! Everything runs on one thread. State lives in a `RefCell`; host callbacks
//! are always made with that cell released, and widget events that arrive
//! while an operation is in progress are queued and handled once it returns.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use jitsi_embed_types::{OpenMeeting, UserStatus};
use log::{debug, error, info, warn};

use crate::config::EmbedConfig;
use crate::error::EmbedError;
use crate::host::{HostWindow, MeetingHost, Subscription};
use crate::loader::{ScriptHost, WidgetLoader};
use crate::origin_policy::{MessageDisposition, MessageOriginPolicy};
use crate::scheduler::{ScheduledTask, Scheduler};
use crate::session::{
    LayoutMemory, MeetingSession, PendingToggles, Phase, Presentation, SessionView,
};
use crate::viewport::Dimensions;
use crate::widget::{OwnedWidget, WidgetCommand, WidgetEvent, WidgetEventSink, WidgetFactory, WidgetOptions};

/// Collaborators injected into the controller.
#[derive(Clone)]
pub struct ControllerDeps {
    pub factory: Rc<dyn WidgetFactory>,
    pub script_host: Rc<dyn ScriptHost>,
    pub window: Rc<dyn HostWindow>,
    pub host: Rc<dyn MeetingHost>,
    pub scheduler: Rc<dyn Scheduler>,
}

enum Notice {
    OpenFailed(EmbedError),
    Presence(UserStatus),
}

struct Inner {
    phase: Phase,
    presentation: Presentation,
    session: Option<MeetingSession>,
    widget: Option<OwnedWidget>,
    pending: PendingToggles,
    listeners: Vec<Subscription>,
    teardown: Option<ScheduledTask>,
    message_policy: MessageOriginPolicy,
    next_generation: u64,
    dirty: bool,
}

impl Inner {
    fn session_generation(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.generation)
    }

    fn owns(&self, generation: u64) -> bool {
        self.session_generation() == Some(generation)
    }

    fn command(&mut self, command: WidgetCommand) -> bool {
        match self.widget.as_mut() {
            Some(widget) => widget.command(command),
            None => {
                debug!("controller: no widget for {}", command.name());
                false
            }
        }
    }

    /// The widget has rendered: stop showing the spinner.
    fn mark_ready(&mut self) {
        self.presentation.loading = false;
        if self.phase == Phase::Initializing {
            self.phase = Phase::Active;
        }
    }

    /// Toggle every layout dimension that differs from what the current
    /// mode wants. A dimension with a toggle still unanswered is left alone
    /// until its changed event arrives, since `is_*` is stale until then.
    fn reconcile_layout(&mut self) {
        self.reconcile_tile_view();
        self.reconcile_film_strip();
    }

    fn reconcile_tile_view(&mut self) {
        let layout = self.presentation.layout;
        let (wanted, _) = layout.wanted(self.presentation.minimized);
        if !self.pending.tile_view && layout.is_tile_view != wanted {
            self.pending.tile_view = self.command(WidgetCommand::ToggleTileView);
        }
    }

    fn reconcile_film_strip(&mut self) {
        let layout = self.presentation.layout;
        let (_, wanted) = layout.wanted(self.presentation.minimized);
        if !self.pending.film_strip && layout.is_film_strip != wanted {
            self.pending.film_strip = self.command(WidgetCommand::ToggleFilmStrip);
        }
    }

    /// Detach the current session without notifying the host, handing back
    /// its widget for immediate disposal.
    fn release_session(&mut self) -> Option<OwnedWidget> {
        if let Some(task) = self.teardown.take() {
            debug!("controller: cancelling pending teardown");
            task.cancel();
        }
        if self.phase.is_open() {
            self.command(WidgetCommand::Hangup);
        }
        self.listeners.clear();
        self.session = None;
        self.phase = Phase::Idle;
        self.message_policy = MessageOriginPolicy::default();
        self.pending = PendingToggles::default();
        self.dirty = true;
        self.widget.take()
    }
}

struct Shared {
    config: EmbedConfig,
    deps: ControllerDeps,
    state: RefCell<Inner>,
    pending_events: RefCell<VecDeque<(u64, WidgetEvent)>>,
    notices: RefCell<VecDeque<Notice>>,
    settling: Cell<bool>,
}

impl Shared {
    fn dimensions(&self, minimized: bool) -> Dimensions {
        self.config
            .viewport()
            .compute_dimensions(minimized, self.deps.window.inner_size())
    }

    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push_back(notice);
    }

    /// Handle queued widget events and host notices until both queues are
    /// empty, then publish the new view if anything changed.
    fn settle(self: &Rc<Self>) {
        if self.settling.replace(true) {
            return;
        }
        loop {
            let mut progressed = false;

            loop {
                let next = self.pending_events.borrow_mut().pop_front();
                let Some((generation, event)) = next else { break };
                self.handle_event(generation, event);
                progressed = true;
            }

            loop {
                let next = self.notices.borrow_mut().pop_front();
                let Some(notice) = next else { break };
                match notice {
                    Notice::OpenFailed(e) => self.deps.host.open_failed(&e),
                    Notice::Presence(status) => self.deps.host.set_presence(status),
                }
                progressed = true;
            }

            let changed = std::mem::take(&mut self.state.borrow_mut().dirty);
            if changed {
                let view = self.view();
                self.deps.host.session_changed(&view);
                progressed = true;
            }

            if !progressed {
                break;
            }
        }
        self.settling.set(false);
    }

    fn deliver(self: &Rc<Self>, generation: u64, event: WidgetEvent) {
        self.pending_events.borrow_mut().push_back((generation, event));
        let idle = self.state.try_borrow_mut().is_ok();
        if idle {
            self.settle();
        }
    }

    fn handle_event(self: &Rc<Self>, generation: u64, event: WidgetEvent) {
        let mut inner = self.state.borrow_mut();
        let live = inner
            .widget
            .as_ref()
            .is_some_and(|widget| widget.is_live(generation));
        if !live {
            debug!("controller: discarding {event:?} from stale widget #{generation}");
            return;
        }

        match event {
            WidgetEvent::Loaded => {
                inner.mark_ready();
                let dimensions = self.dimensions(inner.presentation.minimized);
                if let Some(widget) = inner.widget.as_mut() {
                    widget.resize(dimensions);
                }
            }
            WidgetEvent::ConferenceJoined => {
                inner.mark_ready();
                // The widget joins in full layout; a rejoin while a hide is
                // unanswered must not toggle it back.
                inner.reconcile_layout();
            }
            WidgetEvent::ReadyToClose => {
                drop(inner);
                self.close();
                return;
            }
            WidgetEvent::TileViewChanged { enabled } => {
                let answered = std::mem::take(&mut inner.pending.tile_view);
                let minimized = inner.presentation.minimized;
                let layout = &mut inner.presentation.layout;
                // Only the user's own changes are remembered, never the
                // echo of a toggle we sent.
                if !minimized && !answered {
                    layout.was_tile_view = enabled;
                }
                layout.is_tile_view = enabled;
                if answered {
                    inner.reconcile_tile_view();
                }
            }
            WidgetEvent::FilmstripDisplayChanged { visible } => {
                let answered = std::mem::take(&mut inner.pending.film_strip);
                let minimized = inner.presentation.minimized;
                let layout = &mut inner.presentation.layout;
                if !minimized && !answered {
                    layout.was_film_strip = visible;
                }
                layout.is_film_strip = visible;
                if answered {
                    inner.reconcile_film_strip();
                }
            }
        }
        inner.dirty = true;
    }

    fn view(&self) -> SessionView {
        let inner = self.state.borrow();
        let presentation = inner.presentation;
        SessionView {
            phase: inner.phase,
            meeting: inner.session.as_ref().map(|s| s.request.clone()),
            minimized: presentation.minimized,
            dock: presentation.dock,
            loading: inner.phase != Phase::Idle && presentation.loading,
            dimensions: self.dimensions(presentation.minimized),
        }
    }

    fn begin_session(self: &Rc<Self>, request: OpenMeeting) -> Result<u64, EmbedError> {
        request.meeting.domain()?;
        let origin = request.meeting.origin()?;

        let (generation, replaced) = {
            let mut inner = self.state.borrow_mut();
            let replaced = inner.release_session();
            let generation = inner.next_generation;
            inner.next_generation += 1;

            let mut policy = MessageOriginPolicy::new(&self.config.allowed_message_origins);
            policy.allow(&origin);
            inner.message_policy = policy;

            inner.session = Some(MeetingSession {
                generation,
                request,
            });
            inner.phase = Phase::Initializing;
            inner.presentation.loading = true;
            inner.presentation.layout = LayoutMemory::default();
            inner.dirty = true;
            (generation, replaced)
        };

        // The old instance goes before anything new is built.
        if let Some(mut widget) = replaced {
            info!(
                "controller: disposing widget #{} replaced by session #{generation}",
                widget.generation()
            );
            widget.dispose();
        }

        let on_resize = {
            let weak = Rc::downgrade(self);
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.on_window_resize();
                }
            })
        };
        let on_escape = {
            let weak: Weak<Shared> = Rc::downgrade(self);
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.close();
                }
            })
        };
        let listeners = vec![
            self.deps.window.on_resize(on_resize),
            self.deps.window.on_escape(on_escape),
        ];
        self.state.borrow_mut().listeners = listeners;

        self.notify(Notice::Presence(UserStatus::Dnd));
        Ok(generation)
    }

    fn is_initializing(&self, generation: u64) -> bool {
        let inner = self.state.borrow();
        inner.owns(generation) && inner.phase == Phase::Initializing
    }

    fn construct_widget(self: &Rc<Self>, generation: u64) -> Result<(), EmbedError> {
        let mut inner = self.state.borrow_mut();
        let Some(session) = inner.session.clone().filter(|s| s.generation == generation) else {
            return Ok(());
        };
        let meeting = &session.request.meeting;
        let domain = meeting.domain()?;
        let options = WidgetOptions {
            room_name: session.meeting_id().to_string(),
            dimensions: self.dimensions(inner.presentation.minimized),
            jwt: session.access_token().map(str::to_string),
            no_ssl: meeting.no_ssl(),
            parent_node_id: self.config.parent_node_id.clone(),
        };

        let weak = Rc::downgrade(self);
        let sink = WidgetEventSink::new(move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.deliver(generation, event);
            }
        });

        debug!("controller: constructing widget #{generation} on {domain}");
        let widget = self.deps.factory.create(&domain, options, sink)?;
        let mut widget = OwnedWidget::new(generation, widget);
        widget.command(WidgetCommand::Subject(meeting.subject().to_string()));
        inner.widget = Some(widget);
        inner.dirty = true;
        Ok(())
    }

    fn fail_open(&self, generation: u64, error: EmbedError) {
        let widget = {
            let mut inner = self.state.borrow_mut();
            if !inner.owns(generation) {
                return;
            }
            inner.listeners.clear();
            inner.session = None;
            inner.phase = Phase::Idle;
            inner.presentation = Presentation::defaults(&self.config);
            inner.message_policy = MessageOriginPolicy::default();
            inner.pending = PendingToggles::default();
            inner.dirty = true;
            inner.widget.take()
        };
        if let Some(mut widget) = widget {
            widget.dispose();
        }
        self.notify(Notice::OpenFailed(error));
        self.notify(Notice::Presence(UserStatus::Online));
    }

    fn on_window_resize(self: &Rc<Self>) {
        {
            let mut inner = self.state.borrow_mut();
            if !inner.phase.is_open() {
                return;
            }
            let dimensions = self.dimensions(inner.presentation.minimized);
            if let Some(widget) = inner.widget.as_mut() {
                widget.resize(dimensions);
            }
            inner.dirty = true;
        }
        self.settle();
    }

    /// Hang up now, dispose after the configured delay.
    fn close(self: &Rc<Self>) {
        {
            let mut inner = self.state.borrow_mut();
            if !inner.phase.is_open() {
                debug!("controller: close ignored in {:?}", inner.phase);
                return;
            }
            let Some(generation) = inner.session_generation() else {
                return;
            };
            info!("controller: closing session #{generation}");

            inner.command(WidgetCommand::Hangup);
            inner.phase = Phase::Closing;
            inner.listeners.clear();
            inner.dirty = true;

            let weak = Rc::downgrade(self);
            let task = self.deps.scheduler.schedule(
                self.config.teardown_delay(),
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.finish_teardown(generation);
                        shared.settle();
                    }
                }),
            );
            inner.teardown = Some(task);
        }
        self.settle();
    }

    /// The delayed half of close: notify the host, reset presentation, and
    /// dispose the widget, in that order.
    fn finish_teardown(&self, generation: u64) {
        if !self.state.borrow().owns(generation) {
            return;
        }

        self.deps.host.meeting_closed();

        let widget = {
            let mut inner = self.state.borrow_mut();
            // The host may have opened another meeting from meeting_closed.
            if !inner.owns(generation) {
                return;
            }
            inner.teardown = None;
            inner.listeners.clear();
            inner.session = None;
            inner.phase = Phase::Idle;
            inner.presentation = Presentation::defaults(&self.config);
            inner.message_policy = MessageOriginPolicy::default();
            inner.pending = PendingToggles::default();
            inner.dirty = true;
            inner.widget.take()
        };

        if let Some(mut widget) = widget {
            widget.dispose();
        }
        info!("controller: session #{generation} torn down");
        self.notify(Notice::Presence(UserStatus::Online));
    }
}

/// Lifecycle controller for the embedded meeting window.
pub struct MeetingController {
    shared: Rc<Shared>,
    loader: WidgetLoader,
}

impl MeetingController {
    pub fn new(config: EmbedConfig, deps: ControllerDeps) -> Result<Self, EmbedError> {
        config.validate()?;
        let loader = WidgetLoader::new(deps.script_host.clone());
        let inner = Inner {
            phase: Phase::Idle,
            presentation: Presentation::defaults(&config),
            session: None,
            widget: None,
            pending: PendingToggles::default(),
            listeners: Vec::new(),
            teardown: None,
            message_policy: MessageOriginPolicy::default(),
            next_generation: 0,
            dirty: false,
        };
        Ok(Self {
            shared: Rc::new(Shared {
                config,
                deps,
                state: RefCell::new(inner),
                pending_events: RefCell::new(VecDeque::new()),
                notices: RefCell::new(VecDeque::new()),
                settling: Cell::new(false),
            }),
            loader,
        })
    }

    /// Open a meeting, replacing any meeting already open.
    ///
    /// Resolves once the widget has been constructed (not when it reports
    /// ready). Failures return the controller to idle and are also reported
    /// through [`MeetingHost::open_failed`]. If another open or a close
    /// supersedes this one while the script is loading, resolves `Ok(())`
    /// without building anything.
    pub async fn open(&self, request: OpenMeeting) -> Result<(), EmbedError> {
        let meeting_id = request.meeting.meeting_id.clone();
        let generation = match self.shared.begin_session(request) {
            Ok(generation) => generation,
            Err(e) => {
                error!("controller: cannot open meeting {meeting_id}: {e}");
                self.shared.notify(Notice::OpenFailed(e.clone()));
                self.shared.settle();
                return Err(e);
            }
        };
        self.shared.settle();
        info!("controller: opening meeting {meeting_id} as session #{generation}");

        let loaded = self.loader.ensure_loaded(&self.shared.config.script_url).await;
        if !self.shared.is_initializing(generation) {
            debug!("controller: session #{generation} superseded while loading");
            return Ok(());
        }

        let result = loaded
            .map_err(EmbedError::from)
            .and_then(|()| self.shared.construct_widget(generation));
        if let Err(e) = &result {
            error!("controller: failed to open meeting {meeting_id}: {e}");
            self.shared.fail_open(generation, e.clone());
        }
        self.shared.settle();
        result
    }

    pub fn close(&self) {
        self.shared.close();
    }

    pub fn minimize(&self) {
        {
            let mut inner = self.shared.state.borrow_mut();
            if !inner.phase.is_open() || inner.presentation.minimized {
                return;
            }
            inner.presentation.minimized = true;
            inner.reconcile_layout();
            let dimensions = self.shared.dimensions(true);
            if let Some(widget) = inner.widget.as_mut() {
                widget.resize(dimensions);
            }
            inner.dirty = true;
        }
        self.shared.settle();
    }

    pub fn maximize(&self) {
        {
            let mut inner = self.shared.state.borrow_mut();
            if !inner.phase.is_open() || !inner.presentation.minimized {
                return;
            }
            inner.presentation.minimized = false;
            inner.reconcile_layout();
            let dimensions = self.shared.dimensions(false);
            if let Some(widget) = inner.widget.as_mut() {
                widget.resize(dimensions);
            }
            inner.dirty = true;
        }
        self.shared.settle();
    }

    /// Move the minimized window to the other window edge.
    pub fn reposition(&self) {
        {
            let mut inner = self.shared.state.borrow_mut();
            if !inner.phase.is_open() {
                return;
            }
            inner.presentation.dock = inner.presentation.dock.toggled();
            inner.dirty = true;
        }
        self.shared.settle();
    }

    /// Close the embedded window and return the link the user should be sent
    /// to in a new tab.
    pub fn open_externally(&self) -> Option<String> {
        let link = self.shared.view().external_link();
        if link.is_some() {
            self.close();
        }
        link
    }

    pub fn view(&self) -> SessionView {
        self.shared.view()
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    pub fn presentation(&self) -> Presentation {
        self.shared.state.borrow().presentation
    }

    pub fn has_widget(&self) -> bool {
        self.shared.state.borrow().widget.is_some()
    }

    /// Whether a `message` event from `origin` belongs to the open widget.
    pub fn message_disposition(&self, origin: &str) -> MessageDisposition {
        self.shared.state.borrow().message_policy.classify(origin)
    }

    /// Tear everything down synchronously: a pending delayed teardown runs
    /// now, an open meeting is hung up and disposed immediately.
    pub fn unmount(&self) {
        let (pending, open_generation) = {
            let mut inner = self.shared.state.borrow_mut();
            let open_generation = if inner.phase.is_open() {
                inner.command(WidgetCommand::Hangup);
                inner.session_generation()
            } else {
                None
            };
            (inner.teardown.take(), open_generation)
        };

        if let Some(task) = pending {
            debug!("controller: running pending teardown on unmount");
            task.run_now();
        } else if let Some(generation) = open_generation {
            warn!("controller: unmounted with session #{generation} open");
            self.shared.finish_teardown(generation);
            self.shared.settle();
        }
    }
}

impl Drop for MeetingController {
    fn drop(&mut self) {
        self.unmount();
    }
}
