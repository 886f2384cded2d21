use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::model::{Track, TrackId};

/// A track as the backend lists it in history, search and library responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicItem {
    pub music_id: Option<TrackId>,
    pub id: Option<TrackId>,
    pub title: Option<String>,
    pub owner: Option<String>,
    pub image_url: Option<String>,
    pub playback_url: Option<String>,
}

impl MusicItem {
    /// `musicId` wins over `id`; history rows carry both.
    pub fn into_track(self) -> Option<Track> {
        Some(Track {
            id: self.music_id.or(self.id)?,
            title: self.title,
            artist: self.owner,
            cover_url: self.image_url.filter(|url| !url.is_empty()),
            audio_url: self.playback_url.filter(|url| !url.is_empty()),
        })
    }
}

/// The history endpoint has shipped three shapes over time: a Spring page
/// (`content`), a `data` wrapper and a bare array. Rows are kept raw so one
/// malformed entry does not sink the whole page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Page { content: Vec<Value> },
    Wrapped { data: Vec<Value> },
    Bare(Vec<Value>),
}

impl ListResponse {
    pub fn into_tracks(self) -> Vec<Track> {
        let rows = match self {
            ListResponse::Page { content } => content,
            ListResponse::Wrapped { data } => data,
            ListResponse::Bare(rows) => rows,
        };
        rows.into_iter()
            .filter_map(|row| match serde_json::from_value::<MusicItem>(row) {
                Ok(item) => item.into_track(),
                Err(e) => {
                    warn!(error = %e, "list_row_skipped");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    #[serde(alias = "isLiked", default)]
    pub liked: bool,
    #[serde(default)]
    pub like_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn is_token_expired(&self) -> bool {
        self.error.as_deref() == Some("token_expired")
            || self.message.as_deref() == Some("token_expired")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tracks: &[Track]) -> Vec<String> {
        tracks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn spring_page_is_unwrapped() {
        let body = r#"{"content": [{"musicId": 1, "title": "A", "owner": "kim"}], "totalElements": 1}"#;
        let tracks = serde_json::from_str::<ListResponse>(body)
            .unwrap()
            .into_tracks();
        assert_eq!(ids(&tracks), ["1"]);
        assert_eq!(tracks[0].artist.as_deref(), Some("kim"));
    }

    #[test]
    fn data_wrapper_is_unwrapped() {
        let body = r#"{"data": [{"id": 2, "title": "B"}, {"id": 3}]}"#;
        let tracks = serde_json::from_str::<ListResponse>(body)
            .unwrap()
            .into_tracks();
        assert_eq!(ids(&tracks), ["2", "3"]);
    }

    #[test]
    fn bare_array_is_accepted() {
        let body = r#"[{"musicId": 4, "playbackUrl": "https://x/4.mp3", "imageUrl": ""}]"#;
        let tracks = serde_json::from_str::<ListResponse>(body)
            .unwrap()
            .into_tracks();
        assert_eq!(tracks[0].audio_url.as_deref(), Some("https://x/4.mp3"));
        assert_eq!(tracks[0].cover_url, None);
    }

    #[test]
    fn music_id_takes_precedence_and_idless_rows_are_dropped() {
        let body = r#"[{"id": 900, "musicId": 5}, {"title": "orphan"}]"#;
        let tracks = serde_json::from_str::<ListResponse>(body)
            .unwrap()
            .into_tracks();
        assert_eq!(ids(&tracks), ["5"]);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let body = r#"{"content": [{"musicId": 1, "title": 5}, {"musicId": 2, "title": "B"}, "junk"]}"#;
        let tracks = serde_json::from_str::<ListResponse>(body)
            .unwrap()
            .into_tracks();
        assert_eq!(ids(&tracks), ["2"]);
    }

    #[test]
    fn token_expired_body_is_recognised() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "token_expired"}"#).unwrap();
        assert!(body.is_token_expired());

        let body: ErrorBody = serde_json::from_str(r#"{"error": "forbidden"}"#).unwrap();
        assert!(!body.is_token_expired());
    }
}
