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

use jitsi_embed_types::UserConfig;

use crate::error::ApiError;
use crate::{parse_json_response, PluginApiClient};

impl PluginApiClient {
    /// Load the current user's plugin settings.
    ///
    /// Calls `POST /plugins/{id}/api/v1/config` with an empty object.
    pub async fn load_config(&self) -> Result<UserConfig, ApiError> {
        let response = self
            .post(self.plugin_url("/api/v1/config"))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        parse_json_response(response).await
    }
}
