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

//! Error types for the embedded meeting controller.

use jitsi_embed_types::MeetingLinkError;
use thiserror::Error;

/// Why the conferencing script could not be made available.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The `<script>` element could not be created or attached.
    #[error("failed to inject widget script {url}: {reason}")]
    Injection { url: String, reason: String },

    /// The browser reported an error while fetching or evaluating the script.
    #[error("widget script {0} failed to load")]
    Failed(String),

    /// The load was abandoned before it reported an outcome.
    #[error("widget script load for {0} was abandoned")]
    Abandoned(String),
}

/// Errors raised by a conferencing widget instance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("widget construction failed: {0}")]
    Construction(String),

    #[error("widget command {command} failed: {reason}")]
    Command { command: String, reason: String },

    #[error("widget resize failed: {0}")]
    Resize(String),

    #[error("widget has been disposed")]
    Disposed,
}

/// Errors surfaced to the host by the meeting controller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmbedError {
    #[error(transparent)]
    ScriptLoad(#[from] LoadError),

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error(transparent)]
    InvalidMeetingLink(#[from] MeetingLinkError),

    #[error("invalid embed configuration: {0}")]
    Config(String),
}
