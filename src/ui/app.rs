use std::sync::Arc;

use flume::Receiver;
use ratatui::Frame;
use tokio::{sync::watch, task::JoinHandle};
use tracing::info;

use crate::{
    audio::{commands::AudioCommand, session::PlaybackSession},
    auth::CredentialStore,
    config::AppConfig,
    event::events::Event,
    http::ApiService,
    model::Track,
    util::task::TaskManager,
};

use super::{
    context::AppContext,
    layout::AppLayout,
    message::AppMessage,
    state::{AppState, LoginForm, Route, Status, step_index},
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
};

pub struct App {
    pub ctx: AppContext,
    pub state: AppState,
    pub event_rx: Receiver<Event>,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
    auth_rx: watch::Receiver<Option<String>>,
    background: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(config: AppConfig, api: Arc<ApiService>, session: Arc<PlaybackSession>) -> Self {
        let (event_tx, event_rx) = flume::unbounded();
        let auth = api.auth().clone();
        let mut auth_rx = auth.subscribe();

        let mut state = AppState::default();
        if auth_rx.borrow_and_update().is_none() {
            state.ui.current_route = Route::Login;
        }

        let background = vec![session.spawn_auth_watcher(), session.spawn_monitor()];

        Self {
            ctx: AppContext {
                api,
                session,
                auth,
                config,
                event_tx,
            },
            state,
            event_rx,
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
            auth_rx,
            background,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            tui.draw(|f| self.ui(f))?;
            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.shutdown();
        tui.exit()?;
        Ok(())
    }

    fn ui(&self, frame: &mut Frame) {
        if self.has_focus {
            AppLayout::new(self).render(frame, frame.area());
        }
    }

    fn shutdown(&mut self) {
        info!("app_shutdown");
        self.task_manager.abort_all();
        for handle in self.background.drain(..) {
            handle.abort();
        }
        self.ctx.session.stop_track();
    }

    /// Follows the auth state: losing it (logout or an expired token) sends
    /// the user to the login view and forgets the stored credential.
    pub fn sync_auth(&mut self) {
        if !self.auth_rx.has_changed().unwrap_or(false) {
            return;
        }
        let authenticated = self.auth_rx.borrow_and_update().is_some();

        if authenticated {
            if self.state.ui.current_route == Route::Login {
                self.state.ui.current_route = Route::Queue;
            }
            return;
        }

        CredentialStore::clear();
        self.task_manager.abort_all();
        self.state.clear_user_data();
        self.state.login = LoginForm::default();
        self.state.ui.current_route = Route::Login;
        self.state
            .set_status(Status::Info("Signed out. Please sign in again.".into()));
    }

    pub fn send(&self, event: Event) {
        let _ = self.ctx.event_tx.send(event);
    }

    /// Session commands run detached so a slow switch never blocks input.
    /// Supersession is handled by the session itself.
    pub fn dispatch_audio(&self, cmd: AudioCommand) {
        let session = self.ctx.session.clone();
        let tx = self.ctx.event_tx.clone();
        tokio::spawn(async move {
            let result = session.handle_command(cmd).await.map_err(|e| e.to_string());
            let _ = tx.send(Event::PlaybackResult(result));
        });
    }

    pub async fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::Audio(cmd) => self.dispatch_audio(cmd),
            AppMessage::NextTab => {
                if self.state.ui.current_route == Route::Login {
                    return;
                }
                self.state.search.is_editing = false;
                self.state.ui.current_route = self.state.ui.current_route.next();
                if self.state.ui.current_route == Route::Recent {
                    EventHandler::fetch_recent(self);
                }
            }
            AppMessage::SelectDown => self.move_selection(1),
            AppMessage::SelectUp => self.move_selection(-1),
            AppMessage::SelectFirst => self.move_selection(isize::MIN),
            AppMessage::SelectLast => self.move_selection(isize::MAX),
            AppMessage::PlaySelected => {
                if let Some(track) = self.selected_track() {
                    self.dispatch_audio(AudioCommand::PlayTrack(track));
                }
            }
            AppMessage::FocusSearch => {
                self.state.ui.current_route = Route::Search;
                self.state.search.is_editing = true;
            }
            AppMessage::Input(c) => match self.state.ui.current_route {
                Route::Login => self.state.login.focused_mut().push(c),
                Route::Search => self.state.search.input.push(c),
                _ => {}
            },
            AppMessage::Backspace => match self.state.ui.current_route {
                Route::Login => {
                    self.state.login.focused_mut().pop();
                }
                Route::Search => {
                    self.state.search.input.pop();
                }
                _ => {}
            },
            AppMessage::Submit => self.submit(),
            AppMessage::CancelInput => match self.state.ui.current_route {
                Route::Login => self.state.login.password.clear(),
                _ => self.state.search.is_editing = false,
            },
            AppMessage::SwitchField => match self.state.ui.current_route {
                Route::Login => self.state.login.toggle_focus(),
                _ => self.state.search.is_editing = false,
            },
            AppMessage::ToggleLike => self.send(Event::ToggleLike),
            AppMessage::Logout => self.send(Event::Logout),
        }
    }

    fn submit(&mut self) {
        match self.state.ui.current_route {
            Route::Login => {
                let form = &mut self.state.login;
                if form.is_submitting {
                    return;
                }
                if form.username.trim().is_empty() || form.password.is_empty() {
                    self.state
                        .set_status(Status::Error("Username and password are required".into()));
                    return;
                }
                form.is_submitting = true;
                let event = Event::Login {
                    username: form.username.trim().to_string(),
                    password: form.password.clone(),
                };
                self.send(event);
            }
            Route::Search => {
                self.state.search.is_editing = false;
                let query = self.state.search.input.trim().to_string();
                if !query.is_empty() {
                    self.state.search.results.is_loading = true;
                    self.send(Event::Search(query));
                }
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        match self.state.ui.current_route {
            Route::Queue => {
                let len = self.ctx.session.snapshot().queue.len();
                self.state.ui.queue_selected = step_index(self.state.ui.queue_selected, len, delta);
            }
            Route::Recent => {
                let list = &mut self.state.recent;
                list.selected = step_index(list.selected, list.tracks.len(), delta);
            }
            Route::Search => {
                let list = &mut self.state.search.results;
                list.selected = step_index(list.selected, list.tracks.len(), delta);
            }
            Route::Login => {}
        }
    }

    fn selected_track(&self) -> Option<Track> {
        match self.state.ui.current_route {
            Route::Queue => self
                .ctx
                .session
                .snapshot()
                .queue
                .get(self.state.ui.queue_selected)
                .cloned(),
            Route::Recent => self.state.recent.selected_track().cloned(),
            Route::Search => self.state.search.results.selected_track().cloned(),
            Route::Login => None,
        }
    }
}
