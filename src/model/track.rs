use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend identifier of a track. The service hands out numeric ids, but
/// textual ids are accepted so the session never has to care.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Numeric(i64),
    Text(String),
}

impl TrackId {
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            TrackId::Numeric(id) => Some(*id),
            TrackId::Text(id) => id.trim().parse().ok(),
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackId::Numeric(id) => write!(f, "{id}"),
            TrackId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for TrackId {
    fn from(id: i64) -> Self {
        TrackId::Numeric(id)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        TrackId::Text(id.to_string())
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        TrackId::Text(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
}

impl Track {
    pub fn new(id: impl Into<TrackId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            artist: None,
            cover_url: None,
            audio_url: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_cover_url(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = Some(cover_url.into());
        self
    }

    pub fn with_audio_url(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = Some(audio_url.into());
        self
    }

    /// The stream URL, if one is already known and non-empty.
    pub fn playback_url(&self) -> Option<&str> {
        self.audio_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Title")
    }

    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or("Unknown Artist")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayInfo {
    pub music_id: Option<TrackId>,
    pub id: Option<TrackId>,
    pub title: Option<String>,
    pub playback_url: Option<String>,
}

impl PlayInfo {
    pub fn track_id(&self) -> Option<&TrackId> {
        self.music_id.as_ref().or(self.id.as_ref())
    }
}

/// Answer of the play URL endpoint. Older deployments return the URL as a
/// bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PlayUrlResponse {
    Url(String),
    Info(PlayInfo),
}

impl PlayUrlResponse {
    pub fn into_playback_url(self) -> Option<String> {
        let url = match self {
            PlayUrlResponse::Url(url) => Some(url),
            PlayUrlResponse::Info(info) => info.playback_url,
        };
        url.filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_id_accepts_numbers_and_strings() {
        let numeric: TrackId = serde_json::from_str("42").unwrap();
        let text: TrackId = serde_json::from_str("\"abc-7\"").unwrap();

        assert_eq!(numeric, TrackId::Numeric(42));
        assert_eq!(text, TrackId::Text("abc-7".into()));
        assert_eq!(numeric.to_string(), "42");
        assert_eq!(text.to_string(), "abc-7");
    }

    #[test]
    fn textual_digits_parse_as_numeric() {
        assert_eq!(TrackId::from("17").as_numeric(), Some(17));
        assert_eq!(TrackId::from("x17").as_numeric(), None);
    }

    #[test]
    fn blank_audio_url_is_not_playable() {
        let track = Track::new(1_i64).with_audio_url("   ");
        assert_eq!(track.playback_url(), None);

        let track = Track::new(1_i64).with_audio_url("https://x/1.mp3");
        assert_eq!(track.playback_url(), Some("https://x/1.mp3"));
    }

    #[test]
    fn play_url_from_object() {
        let response: PlayUrlResponse = serde_json::from_str(
            r#"{"musicId": 42, "title": "T", "playbackUrl": "https://x/42.mp3"}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_playback_url().as_deref(),
            Some("https://x/42.mp3")
        );
    }

    #[test]
    fn play_info_prefers_music_id() {
        let response: PlayUrlResponse = serde_json::from_str(
            r#"{"id": 1, "musicId": 42, "playbackUrl": "https://x/42.mp3"}"#,
        )
        .unwrap();
        let PlayUrlResponse::Info(info) = response else {
            panic!("expected an object response");
        };
        assert_eq!(info.track_id(), Some(&TrackId::Numeric(42)));
    }

    #[test]
    fn play_url_from_bare_string() {
        let response: PlayUrlResponse = serde_json::from_str(r#""https://x/1.mp3""#).unwrap();
        assert_eq!(
            response.into_playback_url().as_deref(),
            Some("https://x/1.mp3")
        );
    }

    #[test]
    fn empty_play_url_yields_nothing() {
        let empty: PlayUrlResponse = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(empty.into_playback_url(), None);

        let missing: PlayUrlResponse =
            serde_json::from_str(r#"{"musicId": 3, "title": "T"}"#).unwrap();
        assert_eq!(missing.into_playback_url(), None);
    }
}
