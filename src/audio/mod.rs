pub mod commands;
pub mod config;
pub mod error;
pub mod playback;
pub mod progress;
pub mod queue;
pub mod session;
pub mod state;
pub mod traits;
