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

use jitsi_embed_types::{NamingScheme, UserStatus};
use jitsi_plugin_client::{ApiError, AuthMode, PluginApiClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PluginApiClient {
    PluginApiClient::new(&server.uri(), "jitsi", AuthMode::Bearer("pat".to_string())).unwrap()
}

#[tokio::test]
async fn start_meeting_posts_channel_and_topic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/meetings"))
        .and(header("authorization", "Bearer pat"))
        .and(body_json(json!({
            "channel_id": "town-square",
            "personal": false,
            "topic": "Standup",
            "meeting_id": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meeting_id": "AbleBakerCharlie"})))
        .expect(1)
        .mount(&server)
        .await;

    let started = client(&server)
        .start_meeting("town-square", false, "Standup", "")
        .await
        .unwrap();
    assert_eq!(started.meeting_id, "AbleBakerCharlie");
}

#[tokio::test]
async fn enrich_returns_new_jwt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/meetings/enrich"))
        .and(body_json(json!({"jwt": "plain"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jwt": "enriched"})))
        .mount(&server)
        .await;

    let jwt = client(&server).enrich_meeting_jwt("plain").await.unwrap();
    assert_eq!(jwt, "enriched");
}

#[tokio::test]
async fn jaas_meeting_window_resolves_room_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/meetings/jaas/settings"))
        .and(body_json(json!({
            "jaasJwt": "page-jwt",
            "jaasPath": "/plugins/jitsi/jaas/AbleBaker"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jaasJwt": "room-jwt",
            "jaasRoom": "vpaas-magic-cookie-1/AbleBaker"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = client(&server)
        .start_jaas_meeting_window(Some("page-jwt"), "/plugins/jitsi/jaas/AbleBaker")
        .await
        .unwrap();
    assert_eq!(settings.jwt, "room-jwt");
    assert_eq!(settings.room, "vpaas-magic-cookie-1/AbleBaker");
}

#[tokio::test]
async fn jaas_meeting_window_without_jwt_sends_empty_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/meetings/jaas/settings"))
        .and(body_json(json!({"jaasJwt": "", "jaasPath": "/jaas"})))
        .respond_with(ResponseTemplate::new(400).set_body_string("Error JaaS requested while disabled"))
        .mount(&server)
        .await;

    let err = client(&server)
        .start_jaas_meeting_window(None, "/jaas")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(matches!(&err, ApiError::ServerError { body, .. } if body.contains("disabled")));
}

#[tokio::test]
async fn load_config_tolerates_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedded": true,
            "naming_scheme": "uuid"
        })))
        .mount(&server)
        .await;

    let config = client(&server).load_config().await.unwrap();
    assert!(config.embedded);
    assert_eq!(config.naming_scheme, NamingScheme::Uuid);
    assert!(!config.use_jaas);
}

#[tokio::test]
async fn set_user_status_sends_xhr_header() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/users/u1/status"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(body_json(json!({"user_id": "u1", "status": "dnd"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": "u1", "status": "dnd"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .set_user_status("u1", UserStatus::Dnd)
        .await
        .unwrap();
}

#[tokio::test]
async fn error_statuses_carry_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/meetings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("jitsi url not configured"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/config"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/meetings/enrich"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not a member"))
        .mount(&server)
        .await;

    let api = client(&server);
    match api.start_meeting("c", true, "", "").await {
        Err(ApiError::ServerError { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "jitsi url not configured");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(api.load_config().await, Err(ApiError::NotAuthenticated)));
    let err = api.enrich_meeting_jwt("x").await.unwrap_err();
    assert!(matches!(&err, ApiError::Forbidden(body) if body == "not a member"));
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plugins/jitsi/api/v1/meetings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .start_meeting("c", false, "", "")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.status(), None);
}

#[test]
fn rejects_empty_site_url() {
    assert!(matches!(
        PluginApiClient::new("/", "jitsi", AuthMode::Cookie),
        Err(ApiError::Config(_))
    ));
    let client = PluginApiClient::new("https://chat.example.com/", "jitsi", AuthMode::Cookie).unwrap();
    assert_eq!(client.site_url(), "https://chat.example.com");
}
