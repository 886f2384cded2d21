use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    symbols::{self, border},
    text::Span,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::util::colors;

pub struct VolumeWidget {
    volume: u8,
    is_muted: bool,
}

impl VolumeWidget {
    pub fn new(volume: u8, is_muted: bool) -> Self {
        Self { volume, is_muted }
    }
}

impl Widget for VolumeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (label, ratio, fg) = if self.is_muted {
            (Span::raw("muted").fg(colors::ERROR), 0.0, colors::NEUTRAL)
        } else {
            (
                Span::raw(format!("{}%", self.volume)),
                f64::from(self.volume.min(100)) / 100.0,
                colors::PRIMARY,
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::Set {
                top_left: symbols::line::ROUNDED.horizontal_down,
                bottom_left: symbols::line::ROUNDED.horizontal_up,
                ..symbols::border::ROUNDED
            });

        Gauge::default()
            .block(block)
            .gauge_style(Style::new().fg(fg).bg(colors::NEUTRAL))
            .ratio(ratio)
            .label(label)
            .render(area, buf);
    }
}
