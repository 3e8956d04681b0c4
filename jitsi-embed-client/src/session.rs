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

//! State owned by the meeting controller.

use jitsi_embed_types::OpenMeeting;
use serde::{Deserialize, Serialize};

use crate::config::EmbedConfig;
use crate::viewport::Dimensions;

/// Window edge a minimized meeting is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dock {
    Top,
    #[default]
    Bottom,
}

impl Dock {
    pub fn toggled(self) -> Self {
        match self {
            Dock::Top => Dock::Bottom,
            Dock::Bottom => Dock::Top,
        }
    }
}

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No meeting open.
    Idle,
    /// Waiting for the script and the widget's ready signal.
    Initializing,
    Active,
    /// Hangup issued, disposal pending.
    Closing,
}

impl Phase {
    /// Whether a meeting is on screen (user intents are accepted).
    pub fn is_open(self) -> bool {
        matches!(self, Phase::Initializing | Phase::Active)
    }
}

/// Widget layout toggles, remembered across minimize/maximize because the
/// widget forgets them when its decorations are hidden.
///
/// `is_*` mirrors what the widget last reported. `was_*` follows the user's
/// own changes while maximized, so on minimize it already holds the layout
/// to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMemory {
    pub was_tile_view: bool,
    pub is_tile_view: bool,
    pub was_film_strip: bool,
    pub is_film_strip: bool,
}

impl Default for LayoutMemory {
    fn default() -> Self {
        Self {
            was_tile_view: true,
            is_tile_view: true,
            was_film_strip: true,
            is_film_strip: true,
        }
    }
}

impl LayoutMemory {
    /// Tile view and filmstrip visibility the widget should end up with.
    pub fn wanted(&self, minimized: bool) -> (bool, bool) {
        if minimized {
            (false, false)
        } else {
            (self.was_tile_view, self.was_film_strip)
        }
    }
}

/// Layout toggles sent to the widget and not yet answered by the matching
/// changed event. No second toggle goes out for a dimension while its
/// previous one is unanswered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PendingToggles {
    pub tile_view: bool,
    pub film_strip: bool,
}

/// User-facing presentation state. Outlives individual sessions: teardown
/// resets it rather than discarding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub minimized: bool,
    pub dock: Dock,
    pub loading: bool,
    pub layout: LayoutMemory,
}

impl Presentation {
    pub fn defaults(config: &EmbedConfig) -> Self {
        Self {
            minimized: config.start_minimized,
            dock: config.default_dock,
            loading: true,
            layout: LayoutMemory::default(),
        }
    }
}

/// The meeting currently owned by the controller.
#[derive(Debug, Clone)]
pub struct MeetingSession {
    /// Distinguishes this session's widget callbacks and timers from those
    /// of sessions it replaced.
    pub generation: u64,
    pub request: OpenMeeting,
}

impl MeetingSession {
    pub fn meeting_id(&self) -> &str {
        &self.request.meeting.meeting_id
    }

    pub fn access_token(&self) -> Option<&str> {
        self.request.jwt.as_deref()
    }
}

/// Snapshot handed to the view layer on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: Phase,
    pub meeting: Option<OpenMeeting>,
    pub minimized: bool,
    pub dock: Dock,
    pub loading: bool,
    pub dimensions: Dimensions,
}

impl SessionView {
    /// "Open in new tab" target for the current meeting.
    pub fn external_link(&self) -> Option<String> {
        self.meeting
            .as_ref()
            .map(|open| open.meeting.external_link(open.jwt.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dock_toggles_between_edges() {
        assert_eq!(Dock::Top.toggled(), Dock::Bottom);
        assert_eq!(Dock::Bottom.toggled().toggled(), Dock::Bottom);
    }

    #[test]
    fn presentation_defaults_follow_config() {
        let mut config = EmbedConfig::default();
        let p = Presentation::defaults(&config);
        assert!(p.minimized);
        assert!(p.loading);
        assert_eq!(p.dock, Dock::Bottom);
        assert_eq!(p.layout, LayoutMemory::default());

        config.start_minimized = false;
        config.default_dock = Dock::Top;
        let p = Presentation::defaults(&config);
        assert!(!p.minimized);
        assert_eq!(p.dock, Dock::Top);
    }

    #[test]
    fn wanted_layout_hides_everything_when_minimized() {
        let layout = LayoutMemory {
            was_film_strip: false,
            ..LayoutMemory::default()
        };
        assert_eq!(layout.wanted(true), (false, false));
        assert_eq!(layout.wanted(false), (true, false));
    }
}
