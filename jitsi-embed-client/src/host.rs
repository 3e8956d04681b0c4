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

//! Seams to the chat host application and the browser window.

use std::any::Any;
use std::fmt;

use jitsi_embed_types::UserStatus;

use crate::error::EmbedError;
use crate::session::SessionView;
use crate::viewport::WindowSize;

/// Callbacks into the chat host. Implementations must not block; anything
/// asynchronous (such as a presence update request) is spawned and forgotten.
pub trait MeetingHost {
    /// Clear the host's "meeting to open" reference.
    fn meeting_closed(&self);

    /// Opening a meeting failed; the controller is back to idle.
    fn open_failed(&self, _error: &EmbedError) {}

    /// Update the current user's chat presence.
    fn set_presence(&self, _status: UserStatus) {}

    /// Presentation state changed; re-render.
    fn session_changed(&self, _view: &SessionView) {}
}

/// A registered window listener. Dropping it removes the listener.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl Subscription {
    /// Wrap whatever object keeps the listener alive (for example a
    /// `gloo::events::EventListener`).
    pub fn new<G: Any>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription")
    }
}

/// The browser window as seen by the controller.
pub trait HostWindow {
    fn inner_size(&self) -> WindowSize;

    fn on_resize(&self, listener: Box<dyn Fn()>) -> Subscription;

    /// Fires when the user presses Escape.
    fn on_escape(&self, listener: Box<dyn Fn()>) -> Subscription;
}
