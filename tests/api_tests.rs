//! REST client tests against a mock server.

use serde_json::json;
use soundshare::{
    auth::AuthState,
    config::ApiConfig,
    http::{ApiService, error::ApiError},
    model::{PlayUrlResponse, TrackId},
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer, token: Option<&str>) -> ApiService {
    let auth = AuthState::new(token.map(str::to_string));
    ApiService::new(&ApiConfig::with_base_url(server.uri()), auth).unwrap()
}

// =============================================================================
// Client creation
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn rejects_url_without_scheme() {
        let result = ApiService::new(
            &ApiConfig::with_base_url("localhost:8080"),
            AuthState::anonymous(),
        );
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn trims_trailing_slash() {
        let api = ApiService::new(
            &ApiConfig::with_base_url("http://localhost:8080/"),
            AuthState::anonymous(),
        )
        .unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080");
    }
}

// =============================================================================
// Play URL resolution
// =============================================================================

mod play_url {
    use super::*;

    #[tokio::test]
    async fn object_response_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/musics/42"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "title": "T",
                "playbackUrl": "https://x/42.mp3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        let response = api.fetch_play_url(&TrackId::Numeric(42)).await.unwrap();

        assert_eq!(
            response.into_playback_url().as_deref(),
            Some("https://x/42.mp3")
        );
    }

    #[tokio::test]
    async fn bare_string_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/musics/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("https://x/7.mp3")))
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        let response = api.fetch_play_url(&TrackId::Numeric(7)).await.unwrap();

        assert_eq!(response, PlayUrlResponse::Url("https://x/7.mp3".into()));
    }

    #[tokio::test]
    async fn textual_id_stays_in_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/musics/a%2Fb%3Fx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("https://x/ab.mp3")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/plays/music/a%2Fb%3Fx/like"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "liked": true })))
            .expect(1)
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        let id = TrackId::from("a/b?x");
        let response = api.fetch_play_url(&id).await.unwrap();
        let status = api.toggle_like(&id).await.unwrap();

        assert_eq!(response, PlayUrlResponse::Url("https://x/ab.mp3".into()));
        assert!(status.liked);
    }

    #[tokio::test]
    async fn anonymous_caller_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = service(&server, None);
        let err = api.fetch_play_url(&TrackId::Numeric(1)).await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn expired_token_logs_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/musics/1"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "token_expired" })),
            )
            .mount(&server)
            .await;

        let api = service(&server, Some("stale"));
        let err = api.fetch_play_url(&TrackId::Numeric(1)).await.unwrap_err();

        assert!(matches!(err, ApiError::TokenExpired));
        assert!(!api.auth().is_authenticated());
    }

    #[tokio::test]
    async fn other_unauthorized_errors_keep_the_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/musics/1"))
            .respond_with(ResponseTemplate::new(401).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        let err = api.fetch_play_url(&TrackId::Numeric(1)).await.unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "forbidden");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(api.auth().is_authenticated());
    }
}

// =============================================================================
// History
// =============================================================================

mod history {
    use super::*;

    async fn history_returns(body: serde_json::Value) -> Vec<String> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history/me"))
            .and(query_param("page", "0"))
            .and(query_param("size", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        let tracks = api.fetch_history(0, 50).await.unwrap();
        tracks.into_iter().map(|t| t.id.to_string()).collect()
    }

    #[tokio::test]
    async fn spring_page_shape() {
        let ids = history_returns(json!({
            "content": [{ "musicId": 1, "title": "A" }, { "musicId": 2, "title": "B" }],
            "totalElements": 2
        }))
        .await;
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn data_wrapper_shape() {
        let ids = history_returns(json!({ "data": [{ "id": 9, "musicId": 3 }] })).await;
        assert_eq!(ids, vec!["3"]);
    }

    #[tokio::test]
    async fn bare_array_shape() {
        let ids = history_returns(json!([{ "id": 5 }, { "title": "no id" }])).await;
        assert_eq!(ids, vec!["5"]);
    }

    #[tokio::test]
    async fn one_bad_row_keeps_the_rest_of_the_page() {
        let ids = history_returns(json!({
            "content": [
                { "musicId": 1, "title": ["not", "a", "string"] },
                { "musicId": 2, "title": "B" },
                { "musicId": 3, "owner": 7 }
            ]
        }))
        .await;
        assert_eq!(ids, vec!["2"]);
    }

    #[tokio::test]
    async fn register_play_posts_to_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/history/me/42"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        api.add_to_history(&TrackId::Numeric(42)).await.unwrap();
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/history/me/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        let err = api.add_to_history(&TrackId::Numeric(1)).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }
}

// =============================================================================
// Search, auth and likes
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn keywords_are_encoded_and_covers_filled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/matches"))
            .and(query_param("keywords", "lo fi & chill"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "musicId": 4, "title": "Rain", "owner": "dj" },
                { "musicId": 8, "imageUrl": "https://img/8.png" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let api = service(&server, None);
        let tracks = api.search("  lo fi & chill ").await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].artist.as_deref(), Some("dj"));
        assert_eq!(
            tracks[0].cover_url.as_deref(),
            Some("/icons/music/default1.svg")
        );
        assert_eq!(tracks[1].cover_url.as_deref(), Some("https://img/8.png"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/matches"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let api = service(&server, None);
        let err = api.search("x").await.unwrap_err();

        assert!(matches!(err, ApiError::Parse(_)));
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn login_stores_the_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "username": "ana", "password": "pw" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "fresh" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = service(&server, None);
        let response = api.login("ana", "pw").await.unwrap();

        assert_eq!(response.access_token, "fresh");
        assert_eq!(api.auth().token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn failed_login_stays_anonymous() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let api = service(&server, None);
        assert!(api.login("ana", "wrong").await.is_err());
        assert!(!api.auth().is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_token_even_if_server_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        api.logout().await;

        assert!(!api.auth().is_authenticated());
    }
}

mod likes {
    use super::*;

    #[tokio::test]
    async fn toggle_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/plays/music/3/like"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "isLiked": true, "likeCount": 11 })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/plays/music/3/like-status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "liked": false })))
            .mount(&server)
            .await;

        let api = service(&server, Some("secret"));
        let toggled = api.toggle_like(&TrackId::Numeric(3)).await.unwrap();
        let status = api.fetch_like_status(&TrackId::Numeric(3)).await.unwrap();

        assert!(toggled.liked);
        assert_eq!(toggled.like_count, Some(11));
        assert!(!status.liked);
        assert_eq!(status.like_count, None);
    }
}
