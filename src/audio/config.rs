#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Size of the history page that backs the next/previous queue.
    pub queue_page_size: u32,
    pub volume: u8,
    pub volume_step: u8,
    pub seek_step_secs: u64,
    pub monitor_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            queue_page_size: 50,
            volume: 100,
            volume_step: 5,
            seek_step_secs: 5,
            monitor_interval_ms: 100,
        }
    }
}
