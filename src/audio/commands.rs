use std::time::Duration;

use crate::model::Track;

#[derive(Debug, Clone)]
pub enum AudioCommand {
    PlayTrack(Track),
    TogglePlay,
    Pause,
    Stop,
    Next,
    Previous,
    Seek(Duration),
    SeekForward,
    SeekBackward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    RefreshQueue,
}
