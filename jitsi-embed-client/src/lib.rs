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

//! Lifecycle controller for an embedded Jitsi/JaaS meeting window.
//!
//! # Outline of usage
//!
//! ```ignore
//! let deps = ControllerDeps { factory, script_host, window, host, scheduler };
//! let controller = MeetingController::new(EmbedConfig::default(), deps)?;
//!
//! controller.open(OpenMeeting::new(meeting, jwt)).await?;
//! controller.maximize();
//! controller.reposition();
//! controller.close(); // hangup now, dispose after `teardownDelayMs`
//! ```
//!
//! In the browser, [`web`] provides the real widget factory, script host and
//! window; everything else is platform independent and tested natively
//! against the fakes in `testing`.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod loader;
pub mod origin_policy;
mod platform;
pub mod scheduler;
pub mod session;
pub mod viewport;
pub mod widget;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod tests;

pub use config::EmbedConfig;
pub use controller::{ControllerDeps, MeetingController};
pub use error::{EmbedError, LoadError, WidgetError};
pub use host::{HostWindow, MeetingHost, Subscription};
pub use loader::{ScriptHost, WidgetLoader};
pub use origin_policy::{MessageDisposition, MessageOriginPolicy};
pub use platform::spawn;
pub use scheduler::{PlatformScheduler, ScheduledTask, Scheduler};
pub use session::{Dock, LayoutMemory, Phase, Presentation, SessionView};
pub use viewport::{Dimensions, ViewportConfig, WindowSize};
pub use widget::{
    ConferenceWidget, WidgetCommand, WidgetEvent, WidgetEventSink, WidgetFactory, WidgetOptions,
};
