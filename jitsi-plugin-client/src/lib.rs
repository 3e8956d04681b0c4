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

//! Typed REST client for the Jitsi chat plugin server API.
//!
//! Works on native targets and in the browser (reqwest uses `fetch` on
//! `wasm32`).
//!
//! # Example
//!
//! ```no_run
//! use jitsi_plugin_client::{AuthMode, PluginApiClient};
//!
//! # async fn example() -> Result<(), jitsi_plugin_client::ApiError> {
//! let client = PluginApiClient::new("https://chat.example.com", "jitsi", AuthMode::Cookie)?;
//!
//! let started = client.start_meeting("town-square", false, "Standup", "").await?;
//! println!("Started meeting {}", started.meeting_id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod meetings;
pub mod users;

pub use error::ApiError;
pub use jitsi_embed_types;

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// How the client authenticates with the chat server.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// Browser mode: the chat session cookie is sent with every `fetch`.
    Cookie,
    /// Attach `Authorization: Bearer <token>` (a personal access token) to
    /// every request. Used by CLI tools and integration tests.
    Bearer(String),
}

/// Client for the plugin's `/plugins/{id}/api/v1` routes and the chat
/// server's own user status route.
#[derive(Debug, Clone)]
pub struct PluginApiClient {
    site_url: String,
    plugin_id: String,
    auth: AuthMode,
    http: Client,
}

impl PluginApiClient {
    /// # Arguments
    ///
    /// * `site_url` - chat server root, e.g. `"https://chat.example.com"`
    /// * `plugin_id` - plugin manifest id, e.g. `"jitsi"`
    /// * `auth` - how to authenticate requests
    pub fn new(site_url: &str, plugin_id: &str, auth: AuthMode) -> Result<Self, ApiError> {
        let site_url = site_url.trim_end_matches('/');
        if site_url.is_empty() {
            return Err(ApiError::Config("site URL must not be empty".to_string()));
        }
        if plugin_id.is_empty() {
            return Err(ApiError::Config("plugin id must not be empty".to_string()));
        }
        Ok(Self {
            site_url: site_url.to_string(),
            plugin_id: plugin_id.to_string(),
            auth,
            http: Client::new(),
        })
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// URL of a route under the plugin's HTTP namespace.
    pub(crate) fn plugin_url(&self, path: &str) -> String {
        format!("{}/plugins/{}{}", self.site_url, self.plugin_id, path)
    }

    /// URL of a chat server route.
    pub(crate) fn server_url(&self, path: &str) -> String {
        format!("{}{}", self.site_url, path)
    }

    pub(crate) fn post(&self, url: String) -> reqwest::RequestBuilder {
        debug!("api: POST {url}");
        self.apply_auth(self.http.post(url))
    }

    pub(crate) fn put(&self, url: String) -> reqwest::RequestBuilder {
        debug!("api: PUT {url}");
        self.apply_auth(self.http.put(url))
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            AuthMode::Cookie => {
                #[cfg(target_arch = "wasm32")]
                {
                    builder.fetch_credentials_include()
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    builder
                }
            }
            AuthMode::Bearer(token) => {
                builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            }
        }
    }
}

async fn error_for_status(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    match status {
        401 => ApiError::NotAuthenticated,
        403 => ApiError::Forbidden(text),
        404 => ApiError::NotFound(text),
        _ => ApiError::ServerError { status, body: text },
    }
}

/// Parse a bare JSON body on success or map the status to [`ApiError`].
pub(crate) async fn parse_json_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(error_for_status(response).await);
    }
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Parse a response where we only care about the status code, not the body.
pub(crate) async fn parse_status_only(response: reqwest::Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_for_status(response).await)
    }
}
