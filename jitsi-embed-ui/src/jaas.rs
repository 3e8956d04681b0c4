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

//! The full-window JaaS meeting page.
//!
//! The page is opened with the meeting token in `?jwt=`. The plugin server
//! turns that token and the page path into a JaaS room and token, and the
//! widget is built on the JaaS domain at the full window size.

use jitsi_embed_client::{Dimensions, WidgetOptions, WindowSize};
use jitsi_embed_types::JaasSettings;
use url::Url;

/// Element the JaaS page mounts into.
pub const JAAS_ROOT_ID: &str = "jaas-root";

/// Element the widget appends its iframe to.
pub const JAAS_PARENT_NODE_ID: &str = "jitsiMeet";

/// Where the plugin serves `external_api.js`.
pub fn script_url(plugin_id: &str) -> String {
    format!("/plugins/{plugin_id}/jitsi_meet_external_api.js")
}

/// What the page URL contributes to a JaaS meeting window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JaasLaunch {
    pub jwt: Option<String>,
    pub path: String,
    pub no_ssl: bool,
}

impl JaasLaunch {
    pub fn from_page_url(href: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(href)?;
        let jwt = url
            .query_pairs()
            .find(|(key, _)| key == "jwt")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());
        Ok(Self {
            jwt,
            path: url.path().to_string(),
            no_ssl: url.scheme() == "http",
        })
    }

    pub fn widget_options(&self, settings: &JaasSettings, window: WindowSize) -> WidgetOptions {
        WidgetOptions {
            room_name: settings.room.clone(),
            dimensions: Dimensions::new(window.width, window.height),
            jwt: Some(settings.jwt.clone()).filter(|jwt| !jwt.is_empty()),
            no_ssl: self.no_ssl,
            parent_node_id: JAAS_PARENT_NODE_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> JaasSettings {
        JaasSettings {
            jwt: "room-jwt".to_string(),
            room: "vpaas-magic-cookie-1/AbleBaker".to_string(),
        }
    }

    #[test]
    fn page_url_supplies_jwt_and_path() {
        let launch =
            JaasLaunch::from_page_url("https://chat.example.com/plugins/jitsi/jaas/AbleBaker?jwt=abc")
                .unwrap();
        assert_eq!(launch.jwt.as_deref(), Some("abc"));
        assert_eq!(launch.path, "/plugins/jitsi/jaas/AbleBaker");
        assert!(!launch.no_ssl);
    }

    #[test]
    fn missing_or_empty_jwt_is_none() {
        let launch = JaasLaunch::from_page_url("http://localhost:8065/jaas").unwrap();
        assert_eq!(launch.jwt, None);
        assert!(launch.no_ssl);

        let launch = JaasLaunch::from_page_url("https://chat.example.com/jaas?jwt=").unwrap();
        assert_eq!(launch.jwt, None);
    }

    #[test]
    fn widget_fills_the_window() {
        let launch = JaasLaunch::from_page_url("https://chat.example.com/jaas?jwt=abc").unwrap();
        let options = launch.widget_options(&settings(), WindowSize::new(1440, 900));
        assert_eq!(options.room_name, "vpaas-magic-cookie-1/AbleBaker");
        assert_eq!(options.dimensions, Dimensions::new(1440, 900));
        assert_eq!(options.jwt.as_deref(), Some("room-jwt"));
        assert_eq!(options.parent_node_id, "jitsiMeet");
    }

    #[test]
    fn script_url_is_plugin_scoped() {
        assert_eq!(script_url("jitsi"), "/plugins/jitsi/jitsi_meet_external_api.js");
    }

    #[test]
    fn unparseable_page_url_is_rejected() {
        assert!(JaasLaunch::from_page_url("not a url").is_err());
    }
}
