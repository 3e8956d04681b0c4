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

//! Runtime configuration for the embedded meeting window.
//!
//! The browser build reads this from `window.__JITSI_EMBED_CONFIG`; every
//! field has a default so a partial object (or none at all) is acceptable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EmbedError;
use crate::session::Dock;
use crate::viewport::ViewportConfig;

/// Path, relative to the chat server root, at which the plugin serves the
/// Jitsi external API script.
pub const DEFAULT_SCRIPT_PATH: &str = "/plugins/jitsi/jitsi_meet_external_api.js";

/// How long the widget gets to run its own hangup before it is disposed.
pub const DEFAULT_TEARDOWN_DELAY_MS: u64 = 200;

pub const DEFAULT_BORDER_INSET: u32 = 20;
pub const DEFAULT_MINIMIZED_WIDTH: u32 = 320;
pub const DEFAULT_MINIMIZED_HEIGHT: u32 = 240;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedConfig {
    /// URL of the Jitsi external API script.
    pub script_url: String,
    pub teardown_delay_ms: u64,
    /// Presentation mode a new meeting starts in, and the mode restored by
    /// teardown.
    pub start_minimized: bool,
    pub default_dock: Dock,
    /// Gap kept between the maximized widget and each window edge.
    pub border_inset: u32,
    pub minimized_width: u32,
    pub minimized_height: u32,
    /// Extra origins whose `postMessage` traffic belongs to the widget.
    /// The origin of the open meeting's link is always included.
    pub allowed_message_origins: Vec<String>,
    /// DOM id of the element the widget iframe is mounted into.
    pub parent_node_id: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            script_url: DEFAULT_SCRIPT_PATH.to_string(),
            teardown_delay_ms: DEFAULT_TEARDOWN_DELAY_MS,
            start_minimized: true,
            default_dock: Dock::Bottom,
            border_inset: DEFAULT_BORDER_INSET,
            minimized_width: DEFAULT_MINIMIZED_WIDTH,
            minimized_height: DEFAULT_MINIMIZED_HEIGHT,
            allowed_message_origins: Vec::new(),
            parent_node_id: "jitsiMeet".to_string(),
        }
    }
}

impl EmbedConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json(text: &str) -> Result<Self, EmbedError> {
        let config: EmbedConfig = serde_json::from_str(text)
            .map_err(|e| EmbedError::Config(format!("failed to parse embed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EmbedError> {
        if self.script_url.trim().is_empty() {
            return Err(EmbedError::Config("scriptUrl must not be empty".to_string()));
        }
        if self.minimized_width == 0 || self.minimized_height == 0 {
            return Err(EmbedError::Config(format!(
                "minimized size must be non-zero, got {}x{}",
                self.minimized_width, self.minimized_height
            )));
        }
        Ok(())
    }

    pub fn teardown_delay(&self) -> Duration {
        Duration::from_millis(self.teardown_delay_ms)
    }

    pub fn viewport(&self) -> ViewportConfig {
        ViewportConfig {
            border_inset: self.border_inset,
            minimized_width: self.minimized_width,
            minimized_height: self.minimized_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EmbedConfig::from_json("{}").unwrap();
        assert_eq!(config, EmbedConfig::default());
        assert_eq!(config.teardown_delay(), Duration::from_millis(200));
    }

    #[test]
    fn camel_case_fields_override_defaults() {
        let config = EmbedConfig::from_json(
            r#"{"teardownDelayMs": 500, "startMinimized": false, "defaultDock": "top", "minimizedWidth": 384}"#,
        )
        .unwrap();
        assert_eq!(config.teardown_delay_ms, 500);
        assert!(!config.start_minimized);
        assert_eq!(config.default_dock, Dock::Top);
        assert_eq!(config.viewport().minimized_width, 384);
        assert_eq!(config.viewport().minimized_height, DEFAULT_MINIMIZED_HEIGHT);
    }

    #[test]
    fn rejects_zero_minimized_size() {
        let err = EmbedConfig::from_json(r#"{"minimizedHeight": 0}"#).unwrap_err();
        assert!(matches!(err, EmbedError::Config(_)));
    }

    #[test]
    fn rejects_empty_script_url() {
        assert!(EmbedConfig::from_json(r#"{"scriptUrl": " "}"#).is_err());
        assert!(EmbedConfig::from_json("not json").is_err());
    }
}
