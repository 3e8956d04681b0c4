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

//! Abstraction over the third-party conferencing widget.
//!
//! The controller never talks to `JitsiMeetExternalAPI` directly; it goes
//! through [`WidgetFactory`] and [`ConferenceWidget`], so tests can drive it
//! with a fake and the browser build can plug in the real API.

use std::fmt;
use std::rc::Rc;

use log::{debug, warn};

use crate::error::WidgetError;
use crate::viewport::Dimensions;

/// Commands understood by the widget. All of them are fire-and-forget and the
/// two layout commands are toggles, not setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    /// Set the conference subject shown in the widget header.
    Subject(String),
    Hangup,
    ToggleTileView,
    ToggleFilmStrip,
}

impl WidgetCommand {
    /// Command name as passed to `executeCommand`.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetCommand::Subject(_) => "subject",
            WidgetCommand::Hangup => "hangup",
            WidgetCommand::ToggleTileView => "toggleTileView",
            WidgetCommand::ToggleFilmStrip => "toggleFilmStrip",
        }
    }
}

/// Events the widget reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The widget iframe finished loading (the `onload` option).
    Loaded,
    /// `videoConferenceJoined`
    ConferenceJoined,
    /// `readyToClose`: the user hung up from inside the widget.
    ReadyToClose,
    /// `tileViewChanged`
    TileViewChanged { enabled: bool },
    /// `filmstripDisplayChanged`
    FilmstripDisplayChanged { visible: bool },
}

impl WidgetEvent {
    /// Names of the events the controller subscribes to via `on(...)`.
    pub const SUBSCRIBED: [&'static str; 4] = [
        "videoConferenceJoined",
        "readyToClose",
        "tileViewChanged",
        "filmstripDisplayChanged",
    ];
}

/// Construction parameters for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub room_name: String,
    pub dimensions: Dimensions,
    pub jwt: Option<String>,
    pub no_ssl: bool,
    /// DOM id of the element the iframe is appended to.
    pub parent_node_id: String,
}

/// Where a widget delivers its events.
#[derive(Clone)]
pub struct WidgetEventSink {
    emit: Rc<dyn Fn(WidgetEvent)>,
}

impl WidgetEventSink {
    pub fn new<F: Fn(WidgetEvent) + 'static>(f: F) -> Self {
        Self { emit: Rc::new(f) }
    }

    pub fn emit(&self, event: WidgetEvent) {
        (self.emit)(event)
    }
}

impl fmt::Debug for WidgetEventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetEventSink<_>")
    }
}

/// A live widget instance.
pub trait ConferenceWidget {
    fn execute(&mut self, command: &WidgetCommand) -> Result<(), WidgetError>;

    /// Resize the rendered iframe in place.
    fn resize(&mut self, dimensions: Dimensions) -> Result<(), WidgetError>;

    /// Release the iframe and every listener. Called exactly once.
    fn dispose(&mut self);
}

/// Builds widget instances once the script is loaded.
pub trait WidgetFactory {
    fn create(
        &self,
        domain: &str,
        options: WidgetOptions,
        events: WidgetEventSink,
    ) -> Result<Box<dyn ConferenceWidget>, WidgetError>;
}

/// Controller-side handle to a widget: remembers which session built it and
/// turns every call after disposal into a no-op.
pub(crate) struct OwnedWidget {
    generation: u64,
    widget: Box<dyn ConferenceWidget>,
    disposed: bool,
}

impl OwnedWidget {
    pub(crate) fn new(generation: u64, widget: Box<dyn ConferenceWidget>) -> Self {
        Self {
            generation,
            widget,
            disposed: false,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn is_live(&self, generation: u64) -> bool {
        !self.disposed && self.generation == generation
    }

    /// Best-effort command: failures are logged, never propagated. Returns
    /// whether the widget accepted it.
    pub(crate) fn command(&mut self, command: WidgetCommand) -> bool {
        if self.disposed {
            debug!("widget: dropping {} sent after dispose", command.name());
            return false;
        }
        match self.widget.execute(&command) {
            Ok(()) => true,
            Err(e) => {
                warn!("widget: command {} failed: {e}", command.name());
                false
            }
        }
    }

    pub(crate) fn resize(&mut self, dimensions: Dimensions) {
        if self.disposed {
            return;
        }
        if let Err(e) = self.widget.resize(dimensions) {
            warn!("widget: resize to {}x{} failed: {e}", dimensions.width, dimensions.height);
        }
    }

    pub(crate) fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.widget.dispose();
        }
    }
}

impl Drop for OwnedWidget {
    fn drop(&mut self) {
        self.dispose();
    }
}
