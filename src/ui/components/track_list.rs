use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::{
    model::{Track, TrackId},
    ui::{components::spinner::Spinner, util::get_active_track_icon},
    util::colors,
};

pub struct TrackListWidget<'a> {
    tracks: &'a [Track],
    selected: usize,
    current: Option<&'a TrackId>,
    is_playing: bool,
    is_loading: bool,
    empty_message: &'a str,
}

impl<'a> TrackListWidget<'a> {
    pub fn new(tracks: &'a [Track], selected: usize) -> Self {
        Self {
            tracks,
            selected,
            current: None,
            is_playing: false,
            is_loading: false,
            empty_message: "No tracks",
        }
    }

    pub fn current(mut self, current: Option<&'a TrackId>, is_playing: bool) -> Self {
        self.current = current;
        self.is_playing = is_playing;
        self
    }

    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }
}

impl Widget for TrackListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.tracks.is_empty() {
            if self.is_loading {
                Spinner::new()
                    .with_label("Loading")
                    .with_style(Style::default().fg(colors::PRIMARY))
                    .render(area, buf);
            } else {
                Widget::render(List::new([ListItem::new(self.empty_message)]), area, buf);
            }
            return;
        }

        let items: Vec<ListItem> = self
            .tracks
            .iter()
            .map(|track| {
                let is_current = self.current == Some(&track.id);
                let prefix = if is_current {
                    format!("{} ", get_active_track_icon(self.is_playing))
                } else {
                    "  ".to_string()
                };

                let line = Line::from(vec![
                    Span::raw(prefix),
                    Span::raw(track.display_title().to_string()),
                    Span::raw(" - "),
                    Span::raw(track.display_artist().to_string()),
                ]);

                let item = ListItem::new(line);
                if is_current {
                    item.style(
                        Style::default()
                            .fg(colors::SECONDARY)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
