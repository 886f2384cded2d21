pub mod error;
pub mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    audio::traits::MusicBackend,
    auth::AuthState,
    config::ApiConfig,
    model::{PlayUrlResponse, Track, TrackId},
    util::image::assign_placeholder_images,
};

use self::{
    error::{ApiError, Result},
    models::{ErrorBody, LikeStatus, ListResponse, LoginRequest, LoginResponse},
};

pub struct ApiService {
    client: Client,
    base_url: String,
    auth: AuthState,
}

impl ApiService {
    pub fn new(config: &ApiConfig, auth: AuthState) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url:?} must start with http:// or https://"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("soundshare/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(base_url = base_url.as_str(), "api_service_ready");
        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends with the bearer token attached. A 401 carrying `token_expired`
    /// logs the user out before the error is returned.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.auth.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            let body: ErrorBody = serde_json::from_str(&message).unwrap_or_default();
            if body.is_token_expired() {
                self.auth.expire();
                return Err(ApiError::TokenExpired);
            }
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { username, password });
        let response: LoginResponse = self.send_json(request).await?;
        self.auth.login(response.access_token.clone());
        info!(username, "login_succeeded");
        Ok(response)
    }

    /// Tells the backend we are leaving. Local state is cleared either way.
    pub async fn logout(&self) {
        if self.auth.is_authenticated() {
            let request = self.client.post(self.url("/api/auth/logout"));
            if let Err(e) = self.send(request).await {
                warn!(error = %e, "logout_request_failed");
            }
        }
        self.auth.logout();
    }

    pub async fn fetch_play_url(&self, track_id: &TrackId) -> Result<PlayUrlResponse> {
        self.require_auth()?;
        debug!(id = %track_id, "fetch_play_url");
        let request = self
            .client
            .get(self.url(&format!("/api/musics/{}", path_segment(track_id))));
        self.send_json(request).await
    }

    pub async fn add_to_history(&self, track_id: &TrackId) -> Result<()> {
        self.require_auth()?;
        let request = self
            .client
            .post(self.url(&format!("/api/history/me/{}", path_segment(track_id))));
        self.send(request).await?;
        Ok(())
    }

    pub async fn fetch_history(&self, page: u32, size: u32) -> Result<Vec<Track>> {
        self.require_auth()?;
        let request = self
            .client
            .get(self.url(&format!("/api/history/me?page={page}&size={size}")));
        let response: ListResponse = self.send_json(request).await?;
        Ok(response.into_tracks())
    }

    pub async fn search(&self, keywords: &str) -> Result<Vec<Track>> {
        let request = self.client.get(self.url(&format!(
            "/api/matches?keywords={}",
            urlencoding::encode(keywords.trim())
        )));
        let response: ListResponse = self.send_json(request).await?;
        Ok(assign_placeholder_images(response.into_tracks()))
    }

    pub async fn toggle_like(&self, track_id: &TrackId) -> Result<LikeStatus> {
        self.require_auth()?;
        let request = self
            .client
            .post(self.url(&format!("/api/plays/music/{}/like", path_segment(track_id))));
        self.send_json(request).await
    }

    pub async fn fetch_like_status(&self, track_id: &TrackId) -> Result<LikeStatus> {
        self.require_auth()?;
        let request = self.client.get(self.url(&format!(
            "/api/plays/music/{}/like-status",
            path_segment(track_id)
        )));
        self.send_json(request).await
    }

    fn require_auth(&self) -> Result<()> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::Unauthenticated)
        }
    }
}

/// Ids are accepted as free text off the wire.
fn path_segment(track_id: &TrackId) -> String {
    urlencoding::encode(&track_id.to_string()).into_owned()
}

#[async_trait]
impl MusicBackend for ApiService {
    async fn resolve_play_url(&self, track_id: &TrackId) -> Result<PlayUrlResponse> {
        self.fetch_play_url(track_id).await
    }

    async fn register_play(&self, track_id: &TrackId) -> Result<()> {
        self.add_to_history(track_id).await
    }

    async fn fetch_history(&self, page: u32, size: u32) -> Result<Vec<Track>> {
        ApiService::fetch_history(self, page, size).await
    }
}
