use crate::{audio::queue::HistoryQueue, model::Track};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Idle,
    Loading(Option<Track>),
    Playing(Track),
    Paused(Track),
}

/// Everything views may observe about the session. Published as a whole on
/// every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub is_loading: bool,
    pub is_queue_loading: bool,
    pub queue: HistoryQueue,
}

impl SessionState {
    pub fn queue_position(&self) -> Option<usize> {
        self.queue.position()
    }

    /// Next/previous wrap around, so either works whenever the queue has
    /// anything in it.
    pub fn has_next(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn playback_state(&self) -> PlaybackState {
        if self.is_loading {
            return PlaybackState::Loading(self.current_track.clone());
        }
        match &self.current_track {
            Some(track) if self.is_playing => PlaybackState::Playing(track.clone()),
            Some(track) => PlaybackState::Paused(track.clone()),
            None => PlaybackState::Idle,
        }
    }
}
