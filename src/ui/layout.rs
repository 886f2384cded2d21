use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::border,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    audio::state::SessionState,
    model::TrackId,
    ui::{
        app::App,
        components::{
            login::LoginWidget, player::PlayerWidget, status::StatusLine, tabs::TabBar,
            track_list::TrackListWidget,
        },
        state::Route,
    },
    util::colors,
};

pub struct AppLayout<'a> {
    app: &'a App,
    session: SessionState,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            session: app.ctx.session.snapshot(),
            app,
        }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        f.buffer_mut()
            .set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let route = self.app.state.ui.current_route;
        f.render_widget(TabBar::new(route), chunks[0]);

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(self.content_title(route))
            .title_alignment(Alignment::Center);
        let content_area = content_block.inner(chunks[1]);
        f.render_widget(content_block, chunks[1]);

        match route {
            Route::Queue => self.render_queue(f, content_area),
            Route::Recent => self.render_recent(f, content_area),
            Route::Search => self.render_search(f, content_area),
            Route::Login => f.render_widget(LoginWidget::new(&self.app.state.login), content_area),
        }

        let session = &self.app.ctx.session;
        let playback = self.session.playback_state();
        f.render_widget(
            PlayerWidget::new(
                session.track_progress(),
                &playback,
                session.volume(),
                session.is_muted(),
            ),
            chunks[2],
        );
        f.render_widget(StatusLine::new(self.app.state.ui.status.as_ref()), chunks[3]);
    }

    fn content_title(&self, route: Route) -> String {
        match (route, self.app.state.like.as_ref()) {
            (Route::Login, _) => "SoundShare".to_string(),
            (_, Some(like)) if self.session.current_track.is_some() => {
                let heart = if like.liked { "♥" } else { "♡" };
                match like.like_count {
                    Some(count) => format!("{}  {heart} {count}", route.title()),
                    None => format!("{}  {heart}", route.title()),
                }
            }
            _ => route.title().to_string(),
        }
    }

    fn current_id(&self) -> Option<&TrackId> {
        self.session.current_track.as_ref().map(|t| &t.id)
    }

    fn render_queue(&self, f: &mut Frame, area: Rect) {
        let widget = TrackListWidget::new(
            self.session.queue.tracks(),
            self.app.state.ui.queue_selected,
        )
        .current(self.current_id(), self.session.is_playing)
        .loading(self.session.is_queue_loading)
        .empty_message("Nothing played yet");
        f.render_widget(widget, area);
    }

    fn render_recent(&self, f: &mut Frame, area: Rect) {
        let recent = &self.app.state.recent;
        let widget = TrackListWidget::new(&recent.tracks, recent.selected)
            .current(self.current_id(), self.session.is_playing)
            .loading(recent.is_loading)
            .empty_message("No recent plays");
        f.render_widget(widget, area);
    }

    fn render_search(&self, f: &mut Frame, area: Rect) {
        let search = &self.app.state.search;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let border_color = if search.is_editing {
            colors::PRIMARY
        } else {
            colors::NEUTRAL
        };
        let cursor = if search.is_editing { "_" } else { "" };
        let input = Paragraph::new(format!("{}{cursor}", search.input)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(border_color))
                .title("Search"),
        );
        f.render_widget(input, chunks[0]);

        let empty = if search.input.trim().is_empty() {
            "Press / to search"
        } else {
            "No results"
        };
        let widget = TrackListWidget::new(&search.results.tracks, search.results.selected)
            .current(self.current_id(), self.session.is_playing)
            .loading(search.results.is_loading)
            .empty_message(empty);
        f.render_widget(widget, chunks[1]);
    }
}
