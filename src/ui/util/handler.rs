use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;
use tracing::{info, warn};

use crate::{
    audio::session::PlayOutcome,
    auth::CredentialStore,
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        state::Status,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            should_render = Self::handle_event(app, evt, tui).await?;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt);
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => app.sync_auth(),
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Resize(_, _) => {}
            TerminalEvent::Tick => {
                app.sync_auth();
                app.state.expire_status(Instant::now());
                return Ok(app.has_focus);
            }
        }

        Ok(true)
    }

    async fn handle_key_event(app: &mut App, key: KeyEvent) {
        if let Some(msg) = InputHandler::handle_key(key, &app.state) {
            app.update(msg).await;
        }
    }

    pub fn handle_action(app: &mut App, evt: Event) {
        match evt {
            Event::PlaybackResult(Ok(outcome)) => {
                if outcome == PlayOutcome::Started {
                    app.state.like = None;
                    Self::fetch_like_status(app);
                }
            }
            Event::PlaybackResult(Err(e)) => {
                warn!(error = %e, "playback_command_failed");
                app.state.set_status(Status::Error(e));
            }
            Event::SearchResults(tracks) => {
                info!(len = tracks.len(), "search_results");
                app.state.search.results.set_tracks(tracks);
            }
            Event::RecentPlaysFetched(tracks) => app.state.recent.set_tracks(tracks),
            Event::LikeStatusFetched(status) => app.state.like = Some(status),
            Event::LoginSucceeded => {
                app.state.login = Default::default();
                app.state.set_status(Status::Info("Signed in".into()));
                app.sync_auth();
            }
            Event::LoggedOut => app.sync_auth(),
            Event::FetchError(e) => {
                app.state.login.is_submitting = false;
                app.state.search.results.is_loading = false;
                app.state.recent.is_loading = false;
                app.state.set_status(Status::Error(e));
            }
            Event::Search(query) => Self::search(app, query),
            Event::Login { username, password } => Self::login(app, username, password),
            Event::Logout => Self::logout(app),
            Event::ToggleLike => Self::toggle_like(app),
        }
    }

    fn search(app: &mut App, query: String) {
        let api = app.ctx.api.clone();
        let tx = app.ctx.event_tx.clone();
        app.task_manager.spawn(
            "search",
            tokio::spawn(async move {
                match api.search(&query).await {
                    Ok(results) => {
                        let _ = tx.send(Event::SearchResults(results));
                    }
                    Err(e) => {
                        let _ = tx.send(Event::FetchError(format!("Search failed: {e}")));
                    }
                }
            }),
        );
    }

    fn login(app: &mut App, username: String, password: String) {
        if app.task_manager.is_running("login") {
            return;
        }
        let api = app.ctx.api.clone();
        let tx = app.ctx.event_tx.clone();
        app.task_manager.spawn(
            "login",
            tokio::spawn(async move {
                match api.login(&username, &password).await {
                    Ok(response) => {
                        CredentialStore::save(&response.access_token);
                        let _ = tx.send(Event::LoginSucceeded);
                    }
                    Err(e) => {
                        let _ = tx.send(Event::FetchError(format!("Login failed: {e}")));
                    }
                }
            }),
        );
    }

    fn logout(app: &mut App) {
        let api = app.ctx.api.clone();
        let tx = app.ctx.event_tx.clone();
        app.task_manager.spawn(
            "logout",
            tokio::spawn(async move {
                api.logout().await;
                CredentialStore::clear();
                let _ = tx.send(Event::LoggedOut);
            }),
        );
    }

    pub fn fetch_recent(app: &mut App) {
        if !app.ctx.auth.is_authenticated() {
            return;
        }
        app.state.recent.is_loading = true;

        let api = app.ctx.api.clone();
        let tx = app.ctx.event_tx.clone();
        let size = app.ctx.config.history_page_size;
        app.task_manager.spawn(
            "recent",
            tokio::spawn(async move {
                match api.fetch_history(0, size).await {
                    Ok(tracks) => {
                        let _ = tx.send(Event::RecentPlaysFetched(tracks));
                    }
                    Err(e) => {
                        let _ = tx.send(Event::FetchError(format!("History failed: {e}")));
                    }
                }
            }),
        );
    }

    fn fetch_like_status(app: &mut App) {
        let Some(track) = app.ctx.session.current_track() else {
            return;
        };
        let api = app.ctx.api.clone();
        let tx = app.ctx.event_tx.clone();
        app.task_manager.spawn(
            "like",
            tokio::spawn(async move {
                match api.fetch_like_status(&track.id).await {
                    Ok(status) => {
                        let _ = tx.send(Event::LikeStatusFetched(status));
                    }
                    Err(e) => warn!(id = %track.id, error = %e, "like_status_failed"),
                }
            }),
        );
    }

    fn toggle_like(app: &mut App) {
        let Some(track) = app.ctx.session.current_track() else {
            return;
        };
        let api = app.ctx.api.clone();
        let tx = app.ctx.event_tx.clone();
        app.task_manager.spawn(
            "like",
            tokio::spawn(async move {
                match api.toggle_like(&track.id).await {
                    Ok(status) => {
                        let _ = tx.send(Event::LikeStatusFetched(status));
                    }
                    Err(e) => {
                        let _ = tx.send(Event::FetchError(format!("Like failed: {e}")));
                    }
                }
            }),
        );
    }
}
