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

//! Request and response bodies of the plugin server API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/meetings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartMeetingRequest {
    pub channel_id: String,
    #[serde(default)]
    pub personal: bool,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub meeting_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartMeetingResponse {
    pub meeting_id: String,
}

/// Body of `POST /api/v1/meetings/enrich`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichMeetingJwtRequest {
    pub jwt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichMeetingJwtResponse {
    pub jwt: String,
}

/// Conference domain of JaaS (Jitsi as a Service) meetings.
pub const JAAS_DOMAIN: &str = "8x8.vc";

/// Body of `POST /api/v1/meetings/jaas/settings`: the `?jwt=` of the JaaS
/// meeting window page (empty when absent) and the page path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JaasSettingsRequest {
    #[serde(rename = "jaasJwt")]
    pub jwt: String,
    #[serde(rename = "jaasPath")]
    pub path: String,
}

/// Room and token for a JaaS meeting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JaasSettings {
    #[serde(rename = "jaasJwt")]
    pub jwt: String,
    #[serde(rename = "jaasRoom")]
    pub room: String,
}

/// How the server names rooms. Only carried through; the client never
/// interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingScheme {
    Ask,
    #[default]
    Words,
    Mattermost,
    Uuid,
}

/// Per-user plugin settings returned by `POST /api/v1/config`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Open meetings in the embedded window instead of a new tab.
    #[serde(default)]
    pub embedded: bool,
    #[serde(default)]
    pub naming_scheme: NamingScheme,
    #[serde(default)]
    pub use_jaas: bool,
}

/// Chat presence values understood by `PUT /api/v4/users/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Away,
    Dnd,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatusRequest {
    pub user_id: String,
    pub status: UserStatus,
}
