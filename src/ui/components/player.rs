use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};

use crate::{
    audio::{progress::TrackProgress, state::PlaybackState},
    ui::components::{controls::VolumeWidget, progress::ProgressWidget},
};

/// Footer player: current track with its progress, and the volume gauge.
pub struct PlayerWidget<'a> {
    progress: &'a TrackProgress,
    playback: &'a PlaybackState,
    volume: u8,
    is_muted: bool,
}

impl<'a> PlayerWidget<'a> {
    pub fn new(
        progress: &'a TrackProgress,
        playback: &'a PlaybackState,
        volume: u8,
        is_muted: bool,
    ) -> Self {
        Self {
            progress,
            playback,
            volume,
            is_muted,
        }
    }
}

impl Widget for PlayerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(12)])
            .split(area);

        let (icon, track) = match self.playback {
            PlaybackState::Idle => ("■", None),
            PlaybackState::Loading(track) => ("…", track.as_ref()),
            PlaybackState::Playing(track) => ("▶", Some(track)),
            PlaybackState::Paused(track) => ("⏸", Some(track)),
        };
        let (title, artist) = match track {
            Some(track) => (track.display_title(), Some(track.display_artist())),
            None if matches!(self.playback, PlaybackState::Loading(_)) => ("Loading", None),
            None => ("No track", None),
        };

        ProgressWidget::new(self.progress, icon, title, artist).render(chunks[0], buf);
        VolumeWidget::new(self.volume, self.is_muted).render(chunks[1], buf);
    }
}
