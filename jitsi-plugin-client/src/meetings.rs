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

use jitsi_embed_types::{
    EnrichMeetingJwtRequest, EnrichMeetingJwtResponse, JaasSettings, JaasSettingsRequest,
    StartMeetingRequest, StartMeetingResponse,
};

use crate::error::ApiError;
use crate::{parse_json_response, PluginApiClient};

impl PluginApiClient {
    /// Create a meeting post in a channel. An empty `meeting_id` lets the
    /// server pick a room name.
    ///
    /// Calls `POST /plugins/{id}/api/v1/meetings`.
    pub async fn start_meeting(
        &self,
        channel_id: &str,
        personal: bool,
        topic: &str,
        meeting_id: &str,
    ) -> Result<StartMeetingResponse, ApiError> {
        let request = StartMeetingRequest {
            channel_id: channel_id.to_string(),
            personal,
            topic: topic.to_string(),
            meeting_id: meeting_id.to_string(),
        };
        let response = self
            .post(self.plugin_url("/api/v1/meetings"))
            .json(&request)
            .send()
            .await?;
        parse_json_response(response).await
    }

    /// Exchange a meeting JWT for one carrying the current user's identity.
    ///
    /// Calls `POST /plugins/{id}/api/v1/meetings/enrich`.
    pub async fn enrich_meeting_jwt(&self, jwt: &str) -> Result<String, ApiError> {
        let request = EnrichMeetingJwtRequest {
            jwt: jwt.to_string(),
        };
        let response = self
            .post(self.plugin_url("/api/v1/meetings/enrich"))
            .json(&request)
            .send()
            .await?;
        let body: EnrichMeetingJwtResponse = parse_json_response(response).await?;
        Ok(body.jwt)
    }

    /// Resolve the room and token of a JaaS meeting window from the page's
    /// `?jwt=` parameter and path.
    ///
    /// Calls `POST /plugins/{id}/api/v1/meetings/jaas/settings`.
    pub async fn start_jaas_meeting_window(
        &self,
        jwt: Option<&str>,
        path: &str,
    ) -> Result<JaasSettings, ApiError> {
        let request = JaasSettingsRequest {
            jwt: jwt.unwrap_or_default().to_string(),
            path: path.to_string(),
        };
        let response = self
            .post(self.plugin_url("/api/v1/meetings/jaas/settings"))
            .json(&request)
            .send()
            .await?;
        parse_json_response(response).await
    }
}
