pub mod handler;

use std::time::{SystemTime, UNIX_EPOCH};

const FRAME_STEP_MS: u128 = 100;

/// Frame index for time-driven animations, cycling through `frames`.
pub fn animation_step(frames: usize) -> usize {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    (now / FRAME_STEP_MS) as usize % frames.max(1)
}

pub fn get_active_track_icon(is_playing: bool) -> &'static str {
    if !is_playing {
        return "•";
    }
    match animation_step(6) {
        1 | 4 => "•",
        2 | 3 => "●",
        _ => "·",
    }
}

pub fn format_duration(millis: u64) -> String {
    let total_seconds = millis / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(61_500), "01:01");
        assert_eq!(format_duration(3_600_000), "60:00");
    }

    #[test]
    fn paused_icon_is_static() {
        assert_eq!(get_active_track_icon(false), "•");
    }
}
