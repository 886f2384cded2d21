use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering},
};
use std::time::Duration;

use tokio::{
    sync::{Mutex, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    audio::{
        commands::AudioCommand,
        config::SessionConfig,
        error::PlaybackError,
        progress::TrackProgress,
        state::SessionState,
        traits::{AudioOutput, MusicBackend},
    },
    auth::AuthState,
    model::Track,
    util::image::assign_placeholder_images,
};

/// What a session operation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    Paused,
    Resumed,
    Stopped,
    /// A newer request took over before this one finished.
    Superseded,
    /// Nothing to act on (empty queue, no track loaded).
    Unchanged,
}

/// Owns the audio device, the current track and the history-backed queue.
///
/// Track switches are ordered by a generation counter: every switch, stop or
/// logout bumps it, and an in-flight switch only commits if its generation is
/// still the latest when its awaits return.
pub struct PlaybackSession {
    output: Arc<dyn AudioOutput>,
    backend: Arc<dyn MusicBackend>,
    auth: AuthState,
    config: SessionConfig,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    device_lock: Mutex<()>,
    progress: Arc<TrackProgress>,
    volume: AtomicU8,
    is_muted: AtomicBool,
}

impl PlaybackSession {
    pub fn new(
        output: Arc<dyn AudioOutput>,
        backend: Arc<dyn MusicBackend>,
        auth: AuthState,
        config: SessionConfig,
    ) -> Self {
        let session = Self {
            output,
            backend,
            auth,
            state: watch::Sender::new(SessionState::default()),
            generation: AtomicU64::new(0),
            device_lock: Mutex::new(()),
            progress: Arc::new(TrackProgress::new()),
            volume: AtomicU8::new(config.volume.min(100)),
            is_muted: AtomicBool::new(false),
            config,
        };
        session.apply_volume();
        session
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_track(&self) -> Option<Track> {
        self.state.borrow().current_track.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().is_playing
    }

    pub fn track_progress(&self) -> &Arc<TrackProgress> {
        &self.progress
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub async fn handle_command(&self, cmd: AudioCommand) -> Result<PlayOutcome, PlaybackError> {
        match cmd {
            AudioCommand::PlayTrack(track) => self.play_track(track).await,
            AudioCommand::TogglePlay => self.toggle_play().await,
            AudioCommand::Pause => Ok(self.pause_track()),
            AudioCommand::Stop => Ok(self.stop_track()),
            AudioCommand::Next => self.play_next_track().await,
            AudioCommand::Previous => self.play_previous_track().await,
            AudioCommand::Seek(pos) => self.seek(pos).map(|_| PlayOutcome::Unchanged),
            AudioCommand::SeekForward => self.seek_by(true).map(|_| PlayOutcome::Unchanged),
            AudioCommand::SeekBackward => self.seek_by(false).map(|_| PlayOutcome::Unchanged),
            AudioCommand::VolumeUp => {
                self.volume_up(self.config.volume_step);
                Ok(PlayOutcome::Unchanged)
            }
            AudioCommand::VolumeDown => {
                self.volume_down(self.config.volume_step);
                Ok(PlayOutcome::Unchanged)
            }
            AudioCommand::ToggleMute => {
                self.toggle_mute();
                Ok(PlayOutcome::Unchanged)
            }
            AudioCommand::RefreshQueue => {
                self.refresh_playlist().await;
                Ok(PlayOutcome::Unchanged)
            }
        }
    }

    /// Plays `track`, or toggles pause/resume if it is already the current one.
    pub async fn play_track(&self, track: Track) -> Result<PlayOutcome, PlaybackError> {
        if !self.auth.is_authenticated() {
            warn!(id = %track.id, "play_rejected_unauthenticated");
            return Err(PlaybackError::NotAuthenticated);
        }

        let is_current = self
            .state
            .borrow()
            .current_track
            .as_ref()
            .is_some_and(|current| current.id == track.id);

        if is_current {
            self.toggle_current(track).await
        } else {
            self.switch_track(track).await
        }
    }

    async fn toggle_current(&self, track: Track) -> Result<PlayOutcome, PlaybackError> {
        // A pending switch to another track loses to this newer request.
        let generation = self.next_generation();
        self.state.send_if_modified(|s| std::mem::replace(&mut s.is_loading, false));

        if self.is_playing() {
            self.pause_track();
            return Ok(PlayOutcome::Paused);
        }

        self.resume(generation).await?;
        self.sync_history(&track).await;
        Ok(PlayOutcome::Resumed)
    }

    async fn switch_track(&self, track: Track) -> Result<PlayOutcome, PlaybackError> {
        let generation = self.next_generation();
        info!(id = %track.id, generation, "switch_track");

        self.output.pause();
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.is_playing = false;
        });

        let result = match self.start_track(track, generation).await {
            Ok(Some(started)) => {
                self.sync_history(&started).await;
                Ok(PlayOutcome::Started)
            }
            Ok(None) => Ok(PlayOutcome::Superseded),
            Err(_) if !self.is_current(generation) => Ok(PlayOutcome::Superseded),
            Err(e) => {
                warn!(error = %e, "switch_track_failed");
                Err(e)
            }
        };

        if self.is_current(generation) {
            self.state.send_modify(|s| s.is_loading = false);
        } else {
            debug!(generation, "switch_track_superseded");
        }
        result
    }

    /// Resolves, loads and starts `track`. `Ok(None)` means a newer request
    /// won the race and nothing was committed.
    async fn start_track(
        &self,
        track: Track,
        generation: u64,
    ) -> Result<Option<Track>, PlaybackError> {
        let url = match track.playback_url() {
            Some(url) => url.to_string(),
            None => {
                let response = self
                    .backend
                    .resolve_play_url(&track.id)
                    .await
                    .map_err(|e| PlaybackError::resolution(&track.id, e))?;
                response
                    .into_playback_url()
                    .ok_or_else(|| PlaybackError::Resolution {
                        track_id: track.id.clone(),
                        reason: "empty playback URL".into(),
                    })?
            }
        };

        if !self.is_current(generation) {
            return Ok(None);
        }

        let _device = self.device_lock.lock().await;
        if !self.is_current(generation) {
            return Ok(None);
        }

        self.output.load(&url).await?;
        if !self.is_current(generation) {
            self.settle_device(generation);
            return Ok(None);
        }

        let track = Track {
            audio_url: Some(url),
            ..track
        };

        if let Err(e) = self.output.play().await {
            // The new source stays loaded even though it did not start.
            let committed = self.commit(generation, |s| {
                s.current_track = Some(track.clone());
                s.is_playing = false;
                s.queue.sync_position(Some(&track.id));
            });
            if committed {
                self.progress.reset();
                self.progress.set_total_duration(self.output.duration());
            } else {
                self.settle_device(generation);
            }
            return Err(e.into());
        }

        let committed = self.commit(generation, |s| {
            s.current_track = Some(track.clone());
            s.is_playing = true;
            s.queue.push_recent(track.clone());
        });
        if !committed {
            self.settle_device(generation);
            return Ok(None);
        }

        self.progress.reset();
        self.progress.set_total_duration(self.output.duration());
        info!(id = %track.id, title = track.display_title(), "track_started");
        Ok(Some(track))
    }

    /// Plays the current track. A switch that lost a race detaches its own
    /// source, so the current track is reloaded when the device holds
    /// anything else.
    async fn resume(&self, generation: u64) -> Result<(), PlaybackError> {
        let _device = self.device_lock.lock().await;
        if !self.is_current(generation) {
            return Ok(());
        }
        let Some(track) = self.current_track() else {
            return Ok(());
        };

        let loaded = self.output.source_url();
        let reload = track
            .playback_url()
            .filter(|url| loaded.as_deref() != Some(*url));
        if let Some(url) = reload {
            debug!(id = %track.id, "resume_reload");
            if let Err(e) = self.output.load(url).await {
                warn!(error = %e, "resume_reload_failed");
                self.state.send_if_modified(|s| std::mem::replace(&mut s.is_playing, false));
                return Err(e.into());
            }
            self.progress.reset();
            self.progress.set_total_duration(self.output.duration());
        }

        if let Err(e) = self.output.play().await {
            warn!(error = %e, "resume_rejected");
            self.state.send_if_modified(|s| std::mem::replace(&mut s.is_playing, false));
            return Err(e.into());
        }
        if !self.commit(generation, |s| s.is_playing = true) {
            self.settle_device(generation);
        }
        Ok(())
    }

    /// Applies `update` only while `generation` is the latest. The check runs
    /// under the state lock, so it cannot interleave with a stop or logout.
    fn commit(&self, generation: u64, update: impl FnOnce(&mut SessionState)) -> bool {
        self.state.send_if_modified(|s| {
            if !self.is_current(generation) {
                return false;
            }
            update(s);
            true
        })
    }

    /// Brings the device back in line with `current_track` after a request
    /// lost the race. Must be called with the device lock held.
    fn settle_device(&self, generation: u64) {
        let current = self
            .current_track()
            .and_then(|t| t.playback_url().map(str::to_string));
        if current.is_some() && current == self.output.source_url() {
            self.output.pause();
        } else {
            debug!(generation, "stale_source_detached");
            self.output.stop();
        }
    }

    /// Registers the play and reloads the queue. Never fails: history is
    /// bookkeeping and must not get in the way of listening.
    async fn sync_history(&self, track: &Track) {
        if let Err(e) = self.backend.register_play(&track.id).await {
            let e = PlaybackError::HistorySync(e);
            warn!(id = %track.id, error = %e, "register_play_failed");
        }
        self.refresh_playlist().await;
    }

    /// Pause/resume of the loaded track. Ignored while a switch is loading.
    pub async fn toggle_play(&self) -> Result<PlayOutcome, PlaybackError> {
        let idle = {
            let state = self.state.borrow();
            state.current_track.is_none() || state.is_loading
        };
        if idle {
            return Ok(PlayOutcome::Unchanged);
        }
        if self.is_playing() {
            self.pause_track();
            Ok(PlayOutcome::Paused)
        } else {
            let generation = self.generation.load(Ordering::SeqCst);
            self.resume(generation).await?;
            Ok(PlayOutcome::Resumed)
        }
    }

    pub fn pause_track(&self) -> PlayOutcome {
        if self.state.borrow().current_track.is_none() {
            return PlayOutcome::Unchanged;
        }
        self.output.pause();
        self.state.send_if_modified(|s| std::mem::replace(&mut s.is_playing, false));
        PlayOutcome::Paused
    }

    /// Clears the state before the device, so a switch finishing its load
    /// concurrently either commits first or sees no current track.
    pub fn stop_track(&self) -> PlayOutcome {
        self.next_generation();
        self.state.send_modify(|s| {
            s.current_track = None;
            s.is_playing = false;
            s.is_loading = false;
            s.queue.sync_position(None);
        });
        self.output.pause();
        self.output.stop();
        self.progress.reset();
        PlayOutcome::Stopped
    }

    pub async fn play_next_track(&self) -> Result<PlayOutcome, PlaybackError> {
        let next = self.state.borrow().queue.next_track().cloned();
        match next {
            Some(track) => {
                debug!(id = %track.id, "play_next_track");
                self.play_track(track).await
            }
            None => Ok(PlayOutcome::Unchanged),
        }
    }

    pub async fn play_previous_track(&self) -> Result<PlayOutcome, PlaybackError> {
        let previous = self.state.borrow().queue.previous_track().cloned();
        match previous {
            Some(track) => {
                debug!(id = %track.id, "play_previous_track");
                self.play_track(track).await
            }
            None => Ok(PlayOutcome::Unchanged),
        }
    }

    /// Replaces the queue with the latest history page. Failures keep the
    /// current queue and are only logged.
    pub async fn refresh_playlist(&self) {
        if !self.auth.is_authenticated() {
            self.state.send_modify(|s| s.queue.clear());
            return;
        }

        self.state.send_modify(|s| s.is_queue_loading = true);
        let result = self
            .backend
            .fetch_history(0, self.config.queue_page_size)
            .await;

        match result {
            // A logout may have landed while the page was in flight.
            Ok(_) if !self.auth.is_authenticated() => {
                self.state.send_modify(|s| {
                    s.queue.clear();
                    s.is_queue_loading = false;
                });
            }
            Ok(tracks) => {
                let tracks = assign_placeholder_images(tracks);
                debug!(len = tracks.len(), "queue_synced");
                self.state.send_modify(|s| {
                    let current = s.current_track.as_ref().map(|t| t.id.clone());
                    s.queue.replace(tracks, current.as_ref());
                    s.is_queue_loading = false;
                });
            }
            Err(e) => {
                let e = PlaybackError::HistorySync(e);
                warn!(error = %e, "queue_sync_failed");
                self.state.send_modify(|s| s.is_queue_loading = false);
            }
        }
    }

    /// Reacts to login/logout. Logging out drops everything, including any
    /// switch still resolving.
    pub async fn on_auth_changed(&self, authenticated: bool) {
        if authenticated {
            self.refresh_playlist().await;
            return;
        }

        info!("session_cleared");
        self.next_generation();
        self.state.send_replace(SessionState::default());
        self.output.pause();
        self.output.stop();
        self.progress.reset();
    }

    pub fn spawn_auth_watcher(self: &Arc<Self>) -> JoinHandle<()> {
        let session = self.clone();
        let mut rx = self.auth.subscribe();

        tokio::spawn(async move {
            let mut authenticated = rx.borrow_and_update().is_some();
            if authenticated {
                session.on_auth_changed(true).await;
            }
            while rx.changed().await.is_ok() {
                let now = rx.borrow_and_update().is_some();
                if now != authenticated {
                    authenticated = now;
                    session.on_auth_changed(now).await;
                }
            }
        })
    }

    /// Polls the device for position and end of track. A finished track is
    /// left loaded and marked paused; there is no auto-advance.
    pub fn spawn_monitor(self: &Arc<Self>) -> JoinHandle<()> {
        let session = self.clone();
        let interval = Duration::from_millis(self.config.monitor_interval_ms.max(10));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                session.poll_device();
            }
        })
    }

    pub fn poll_device(&self) {
        if !self.output.has_source() {
            return;
        }
        self.progress.set_current_position(self.output.position());

        if self.is_playing() && self.output.is_finished() {
            info!("track_finished");
            self.progress.set_current_position(Duration::ZERO);
            self.state.send_modify(|s| s.is_playing = false);
        }
    }

    pub fn seek(&self, position: Duration) -> Result<(), PlaybackError> {
        if self.state.borrow().current_track.is_none() {
            return Ok(());
        }
        self.output.seek(position)?;
        self.progress.set_current_position(position);
        Ok(())
    }

    fn seek_by(&self, forward: bool) -> Result<(), PlaybackError> {
        let step = Duration::from_secs(self.config.seek_step_secs);
        let current = self.output.position();
        let mut target = if forward {
            current.saturating_add(step)
        } else {
            current.saturating_sub(step)
        };
        if let Some(total) = self.output.duration() {
            target = target.min(total);
        }
        self.seek(target)
    }

    pub fn volume(&self) -> u8 {
        self.volume.load(Ordering::Relaxed)
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted.load(Ordering::Relaxed)
    }

    pub fn set_volume(&self, volume: u8) {
        self.volume.store(volume.min(100), Ordering::Relaxed);
        self.is_muted.store(false, Ordering::Relaxed);
        self.apply_volume();
    }

    pub fn volume_up(&self, amount: u8) {
        self.set_volume(self.volume().saturating_add(amount));
    }

    pub fn volume_down(&self, amount: u8) {
        self.set_volume(self.volume().saturating_sub(amount));
    }

    pub fn toggle_mute(&self) {
        self.is_muted.fetch_xor(true, Ordering::Relaxed);
        self.apply_volume();
    }

    fn apply_volume(&self) {
        let volume = if self.is_muted() {
            0.0
        } else {
            self.volume() as f32 / 100.0
        };
        self.output.set_volume(volume);
    }
}
