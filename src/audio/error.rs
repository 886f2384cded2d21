use thiserror::Error;

use crate::{http::error::ApiError, model::TrackId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("No audio source loaded")]
    NoSource,

    #[error("Playback rejected: {0}")]
    Rejected(String),
}

/// Failures of session operations. Only the first four ever reach a caller;
/// history bookkeeping errors are logged and dropped inside the session.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("You must be logged in to play music")]
    NotAuthenticated,

    #[error("Your session has expired, please log in again")]
    AuthExpired,

    #[error("Playback failed: no stream URL for track {track_id} ({reason})")]
    Resolution { track_id: TrackId, reason: String },

    #[error("Playback failed: {0}")]
    DeviceRejected(#[from] AudioError),

    #[error("History sync failed: {0}")]
    HistorySync(#[source] ApiError),
}

impl PlaybackError {
    pub(crate) fn resolution(track_id: &TrackId, error: ApiError) -> Self {
        match error {
            e if e.is_auth_failure() => PlaybackError::AuthExpired,
            other => PlaybackError::Resolution {
                track_id: track_id.clone(),
                reason: other.to_string(),
            },
        }
    }
}
