use crate::{audio::session::PlayOutcome, http::models::LikeStatus, model::Track};

#[derive(Debug, Clone)]
pub enum Event {
    // Results of background work
    PlaybackResult(Result<PlayOutcome, String>),
    SearchResults(Vec<Track>),
    RecentPlaysFetched(Vec<Track>),
    LikeStatusFetched(LikeStatus),
    LoginSucceeded,
    LoggedOut,
    FetchError(String),

    // Commands
    Search(String),
    Login { username: String, password: String },
    Logout,
    ToggleLike,
}
