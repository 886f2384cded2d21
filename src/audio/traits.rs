use crate::{
    audio::error::AudioError,
    http::error::ApiError,
    model::{PlayUrlResponse, Track, TrackId},
};
use async_trait::async_trait;
use std::time::Duration;

/// Remote side of the session: stream URL resolution and the play history.
#[async_trait]
pub trait MusicBackend: Send + Sync {
    async fn resolve_play_url(&self, track_id: &TrackId) -> Result<PlayUrlResponse, ApiError>;
    async fn register_play(&self, track_id: &TrackId) -> Result<(), ApiError>;
    async fn fetch_history(&self, page: u32, size: u32) -> Result<Vec<Track>, ApiError>;
}

/// The single audio device. Only the playback session calls into it.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Replaces the current source. The device stays paused afterwards.
    async fn load(&self, url: &str) -> Result<(), AudioError>;
    async fn play(&self) -> Result<(), AudioError>;
    fn pause(&self);
    /// Detaches the source and rewinds to zero.
    fn stop(&self);
    fn seek(&self, position: Duration) -> Result<(), AudioError>;
    fn set_volume(&self, volume: f32);
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    fn has_source(&self) -> bool;
    /// URL of the attached source, if any.
    fn source_url(&self) -> Option<String>;
    fn is_finished(&self) -> bool;
}
