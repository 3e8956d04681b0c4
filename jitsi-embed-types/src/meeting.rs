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

//! The meeting a chat post points at, and the "open this meeting" request the
//! host hands to the embedded controller.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Title shown when a meeting was started without a topic.
pub const DEFAULT_MEETING_TITLE: &str = "Jitsi Meeting";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeetingLinkError {
    #[error("invalid meeting link {link:?}: {reason}")]
    Invalid { link: String, reason: String },

    #[error("meeting link {0:?} has no host")]
    MissingHost(String),
}

/// Meeting properties attached to a `custom_jitsi` chat post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDescriptor {
    pub meeting_id: String,
    pub meeting_link: String,
    #[serde(default)]
    pub meeting_topic: Option<String>,
    #[serde(default)]
    pub meeting_personal: bool,
    #[serde(default)]
    pub jwt_meeting: bool,
    #[serde(default)]
    pub meeting_jwt: Option<String>,
    /// Unix timestamp (seconds) after which the post's JWT stops working.
    #[serde(default)]
    pub jwt_meeting_valid_until: Option<i64>,
}

impl MeetingDescriptor {
    pub fn new(meeting_id: impl Into<String>, meeting_link: impl Into<String>) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            meeting_link: meeting_link.into(),
            meeting_topic: None,
            meeting_personal: false,
            jwt_meeting: false,
            meeting_jwt: None,
            jwt_meeting_valid_until: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.meeting_topic = Some(topic.into());
        self
    }

    fn parsed_link(&self) -> Result<Url, MeetingLinkError> {
        Url::parse(&self.meeting_link).map_err(|e| MeetingLinkError::Invalid {
            link: self.meeting_link.clone(),
            reason: e.to_string(),
        })
    }

    /// Host (and explicit port, if any) of the Jitsi deployment serving this
    /// meeting. This is the `domain` argument of the external API.
    pub fn domain(&self) -> Result<String, MeetingLinkError> {
        let url = self.parsed_link()?;
        let host = url
            .host_str()
            .ok_or_else(|| MeetingLinkError::MissingHost(self.meeting_link.clone()))?;
        Ok(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }

    /// Origin of the meeting link, e.g. `https://meet.jit.si`.
    pub fn origin(&self) -> Result<String, MeetingLinkError> {
        let url = self.parsed_link()?;
        if url.host_str().is_none() {
            return Err(MeetingLinkError::MissingHost(self.meeting_link.clone()));
        }
        Ok(url.origin().ascii_serialization())
    }

    /// Plain-http deployments must be told not to upgrade to TLS.
    pub fn no_ssl(&self) -> bool {
        self.parsed_link()
            .map(|url| url.scheme() == "http")
            .unwrap_or(false)
    }

    /// Topic to show as the conference subject.
    pub fn subject(&self) -> &str {
        match self.meeting_topic.as_deref() {
            Some(topic) if !topic.is_empty() => topic,
            _ => DEFAULT_MEETING_TITLE,
        }
    }

    /// Link used by "open in new tab": carries the credential and asks the
    /// Jitsi web app to use the topic as the call display name.
    pub fn external_link(&self, jwt: Option<&str>) -> String {
        let mut link = self.meeting_link.clone();
        if let Some(jwt) = jwt.filter(|jwt| !jwt.is_empty()) {
            link.push_str("?jwt=");
            link.push_str(jwt);
        }
        link.push_str(&format!("#config.callDisplayName=\"{}\"", self.subject()));
        link
    }

    /// Link used by the post card's join button. An enriched JWT wins over
    /// the one stored in the post.
    pub fn join_link(&self, enriched_jwt: Option<&str>) -> String {
        let jwt = match enriched_jwt {
            Some(jwt) if !jwt.is_empty() => Some(jwt),
            _ if self.jwt_meeting => self.meeting_jwt.as_deref(),
            _ => None,
        };
        match jwt {
            Some(jwt) => format!("{}?jwt={jwt}", self.meeting_link),
            None => self.meeting_link.clone(),
        }
    }
}

/// Request from the host to show a meeting in the embedded window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenMeeting {
    pub meeting: MeetingDescriptor,
    #[serde(default)]
    pub jwt: Option<String>,
}

impl OpenMeeting {
    pub fn new(meeting: MeetingDescriptor, jwt: Option<String>) -> Self {
        Self { meeting, jwt }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting() -> MeetingDescriptor {
        MeetingDescriptor::new("test_meeting_id", "http://test-meeting-link:8443/test")
            .with_topic("Test topic")
    }

    #[test]
    fn domain_keeps_explicit_port() {
        assert_eq!(meeting().domain().unwrap(), "test-meeting-link:8443");
        let public = MeetingDescriptor::new("room", "https://meet.jit.si/room");
        assert_eq!(public.domain().unwrap(), "meet.jit.si");
        assert_eq!(public.origin().unwrap(), "https://meet.jit.si");
    }

    #[test]
    fn domain_rejects_garbage() {
        let bad = MeetingDescriptor::new("room", "not a link");
        assert!(matches!(bad.domain(), Err(MeetingLinkError::Invalid { .. })));
        assert!(!bad.no_ssl());
    }

    #[test]
    fn no_ssl_only_for_http() {
        assert!(meeting().no_ssl());
        assert!(!MeetingDescriptor::new("room", "https://meet.jit.si/room").no_ssl());
    }

    #[test]
    fn subject_falls_back_to_default_title() {
        assert_eq!(meeting().subject(), "Test topic");
        let untitled = MeetingDescriptor::new("room", "https://meet.jit.si/room").with_topic("");
        assert_eq!(untitled.subject(), DEFAULT_MEETING_TITLE);
    }

    #[test]
    fn external_link_carries_jwt_and_display_name() {
        assert_eq!(
            meeting().external_link(Some("abc")),
            "http://test-meeting-link:8443/test?jwt=abc#config.callDisplayName=\"Test topic\""
        );
        assert_eq!(
            meeting().external_link(None),
            "http://test-meeting-link:8443/test#config.callDisplayName=\"Test topic\""
        );
    }

    #[test]
    fn join_link_prefers_enriched_jwt() {
        let mut m = meeting();
        m.jwt_meeting = true;
        m.meeting_jwt = Some("post-jwt".to_string());
        assert_eq!(m.join_link(Some("fresh")), "http://test-meeting-link:8443/test?jwt=fresh");
        assert_eq!(m.join_link(None), "http://test-meeting-link:8443/test?jwt=post-jwt");
        m.jwt_meeting = false;
        assert_eq!(m.join_link(None), "http://test-meeting-link:8443/test");
    }

    #[test]
    fn deserializes_post_props() {
        let props = serde_json::json!({
            "meeting_id": "test_meeting_id",
            "meeting_link": "http://test-meeting-link/test",
            "meeting_topic": "Test topic",
            "jwt_meeting": true,
            "meeting_jwt": "xxxxxxxxxxxx",
            "jwt_meeting_valid_until": 123,
            "meeting_personal": false
        });
        let m: MeetingDescriptor = serde_json::from_value(props).unwrap();
        assert_eq!(m.meeting_jwt.as_deref(), Some("xxxxxxxxxxxx"));
        assert_eq!(m.jwt_meeting_valid_until, Some(123));
    }
}
