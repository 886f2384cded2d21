use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use soundshare::{
    audio::{playback::PlaybackEngine, session::PlaybackSession},
    auth::{AuthState, CredentialStore},
    config::AppConfig,
    http::ApiService,
    ui::app::App,
    util::{hook::set_panic_hook, log::initialize_logging},
};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> color_eyre::Result<()> {
    setup()?;

    let config = AppConfig::from_env()?;
    let token = config.access_token.clone().or_else(CredentialStore::load);
    let auth = AuthState::new(token);

    let api = Arc::new(
        ApiService::new(&config.api, auth.clone()).wrap_err("failed to create API client")?,
    );
    let engine = Arc::new(PlaybackEngine::new()?);
    let session = Arc::new(PlaybackSession::new(
        engine,
        api.clone(),
        auth,
        config.session.clone(),
    ));

    let mut app = App::new(config, api, session);
    app.run().await
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()
}
