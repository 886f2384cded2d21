use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::{ui::state::Status, util::colors};

const HINTS: &str = "space play/pause · n/p next/prev · H/L seek · +/- volume · m mute · l like · / search · tab views · ctrl-l logout";

pub struct StatusLine<'a> {
    status: Option<&'a Status>,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: Option<&'a Status>) -> Self {
        Self { status }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.status {
            Some(Status::Error(message)) => Line::from(message.as_str()).fg(colors::ERROR),
            Some(Status::Info(message)) => Line::from(message.as_str()).fg(colors::PRIMARY),
            None => Line::from(HINTS).style(Style::default().fg(colors::NEUTRAL)),
        };
        Paragraph::new(line).render(area, buf);
    }
}
