use std::time::{Duration, Instant};

use crate::{http::models::LikeStatus, model::Track};

const STATUS_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
    pub search: SearchState,
    pub recent: ListState,
    pub login: LoginForm,
    pub like: Option<LikeStatus>,
}

impl AppState {
    pub fn set_status(&mut self, status: Status) {
        self.ui.status = Some(status);
        self.ui.status_expires = Some(Instant::now() + STATUS_TTL);
    }

    pub fn expire_status(&mut self, now: Instant) {
        if self.ui.status_expires.is_some_and(|at| at <= now) {
            self.ui.status = None;
            self.ui.status_expires = None;
        }
    }

    /// Drops everything tied to the signed-in user.
    pub fn clear_user_data(&mut self) {
        self.like = None;
        self.recent = ListState::default();
        self.search.results = ListState::default();
        self.ui.queue_selected = 0;
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub current_route: Route,
    pub queue_selected: usize,
    pub status: Option<Status>,
    pub status_expires: Option<Instant>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Queue,
    Recent,
    Search,
    Login,
}

impl Route {
    pub const TABS: [Route; 3] = [Route::Queue, Route::Recent, Route::Search];

    pub fn title(self) -> &'static str {
        match self {
            Route::Queue => "Queue",
            Route::Recent => "Recent plays",
            Route::Search => "Search",
            Route::Login => "Login",
        }
    }

    pub fn next(self) -> Route {
        match self {
            Route::Queue => Route::Recent,
            Route::Recent => Route::Search,
            Route::Search | Route::Login => Route::Queue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub is_loading: bool,
}

impl ListState {
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.selected = 0;
        self.is_loading = false;
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks.get(self.selected)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub input: String,
    pub is_editing: bool,
    pub results: ListState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub is_submitting: bool,
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

/// Moves a list cursor by `delta`, clamped to `len`.
pub fn step_index(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    index.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_index_clamps() {
        assert_eq!(step_index(0, 3, -1), 0);
        assert_eq!(step_index(2, 3, 1), 2);
        assert_eq!(step_index(1, 3, 1), 2);
        assert_eq!(step_index(5, 0, 1), 0);
    }

    #[test]
    fn status_expires_after_ttl() {
        let mut state = AppState::default();
        state.set_status(Status::Error("boom".into()));

        state.expire_status(Instant::now());
        assert!(state.ui.status.is_some());

        state.expire_status(Instant::now() + STATUS_TTL);
        assert!(state.ui.status.is_none());
    }
}
