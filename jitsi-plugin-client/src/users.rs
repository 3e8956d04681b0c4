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

use jitsi_embed_types::{UserStatus, UserStatusRequest};
use log::info;

use crate::error::ApiError;
use crate::{parse_status_only, PluginApiClient};

impl PluginApiClient {
    /// Set a user's chat presence.
    ///
    /// Calls `PUT /api/v4/users/{user_id}/status`. The chat server rejects
    /// cookie-authenticated writes without `X-Requested-With`.
    pub async fn set_user_status(&self, user_id: &str, status: UserStatus) -> Result<(), ApiError> {
        let request = UserStatusRequest {
            user_id: user_id.to_string(),
            status,
        };
        let response = self
            .put(self.server_url(&format!("/api/v4/users/{user_id}/status")))
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&request)
            .send()
            .await?;
        parse_status_only(response).await?;
        info!("api: status of {user_id} set to {status:?}");
        Ok(())
    }
}
