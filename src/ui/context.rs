use crate::{
    audio::session::PlaybackSession, auth::AuthState, config::AppConfig, event::events::Event,
    http::ApiService,
};
use flume::Sender;
use std::sync::Arc;

pub struct AppContext {
    pub api: Arc<ApiService>,
    pub session: Arc<PlaybackSession>,
    pub auth: AuthState,
    pub config: AppConfig,
    pub event_tx: Sender<Event>,
}
