use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    symbols::{self, border},
    text::ToSpan,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::{
    audio::progress::TrackProgress,
    ui::util::format_duration,
    util::colors,
};

pub struct ProgressWidget<'a> {
    progress: &'a TrackProgress,
    icon: &'a str,
    track_title: &'a str,
    track_artist: Option<&'a str>,
}

impl<'a> ProgressWidget<'a> {
    pub fn new(
        progress: &'a TrackProgress,
        icon: &'a str,
        track_title: &'a str,
        track_artist: Option<&'a str>,
    ) -> Self {
        Self {
            progress,
            icon,
            track_title,
            track_artist,
        }
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (current, total) = self.progress.get_progress();

        let track_info = match self.track_artist {
            Some(artist) => format!("{}  {} by {artist}", self.icon, self.track_title),
            None => format!("{}  {}", self.icon, self.track_title),
        };
        let duration_info = format!("{} / {}", format_duration(current), format_duration(total));

        Gauge::default()
            .block(
                Block::default()
                    .title_top(track_info)
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_set(border::Set {
                        top_right: symbols::line::ROUNDED.horizontal_down,
                        bottom_right: symbols::line::ROUNDED.horizontal_up,
                        ..symbols::border::ROUNDED
                    }),
            )
            .ratio(self.progress.ratio())
            .label(duration_info.to_span().fg(Color::White))
            .gauge_style(Style::default().fg(colors::PRIMARY).bg(colors::BACKGROUND))
            .use_unicode(true)
            .render(area, buf);
    }
}
