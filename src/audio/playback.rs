use crate::audio::{error::AudioError, traits::AudioOutput};
use async_trait::async_trait;
use color_eyre::eyre::eyre;
use reqwest::Client;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};
use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

type EncodedAudio = Arc<[u8]>;

struct LoadedSource {
    url: String,
    data: EncodedAudio,
    duration: Option<Duration>,
}

/// rodio-backed audio device. The output stream is pinned to its own thread
/// and lives as long as the engine.
pub struct PlaybackEngine {
    sink: Arc<Sink>,
    http: Client,
    loaded: Mutex<Option<LoadedSource>>,
    _shutdown: flume::Sender<()>,
}

impl PlaybackEngine {
    pub fn new() -> color_eyre::Result<Self> {
        let (mixer_tx, mixer_rx) = flume::bounded(1);
        let (shutdown_tx, shutdown_rx) = flume::bounded::<()>(0);

        thread::Builder::new()
            .name("audio-output".into())
            .spawn(move || match OutputStreamBuilder::open_default_stream() {
                Ok(mut stream) => {
                    stream.log_on_drop(false);
                    let _ = mixer_tx.send(Ok(stream.mixer().clone()));
                    // Blocks until the engine drops its sender.
                    let _ = shutdown_rx.recv();
                }
                Err(e) => {
                    let _ = mixer_tx.send(Err(e.to_string()));
                }
            })?;

        let mixer = mixer_rx
            .recv()?
            .map_err(|e| eyre!("failed to open audio output: {e}"))?;
        let sink = Sink::connect_new(&mixer);
        sink.pause();

        info!("playback_engine_ready");
        Ok(Self {
            sink: Arc::new(sink),
            http: Client::new(),
            loaded: Mutex::new(None),
            _shutdown: shutdown_tx,
        })
    }

    fn loaded(&self) -> MutexGuard<'_, Option<LoadedSource>> {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn download(&self, url: &str) -> Result<EncodedAudio, AudioError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AudioError::StreamError(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::StreamError(e.to_string()))?;
        Ok(Arc::from(bytes.as_ref()))
    }
}

fn decode(data: EncodedAudio) -> Result<Decoder<Cursor<EncodedAudio>>, AudioError> {
    let byte_len = data.len() as u64;
    Decoder::builder()
        .with_data(Cursor::new(data))
        .with_byte_len(byte_len)
        .with_seekable(true)
        .build()
        .map_err(|e| AudioError::DecodingError(e.to_string()))
}

#[async_trait]
impl AudioOutput for PlaybackEngine {
    async fn load(&self, url: &str) -> Result<(), AudioError> {
        let start = std::time::Instant::now();
        let data = self.download(url).await?;

        let to_decode = data.clone();
        let source = tokio::task::spawn_blocking(move || decode(to_decode))
            .await
            .map_err(|e| AudioError::DecodingError(e.to_string()))??;
        let duration = source.total_duration();

        // Only now is the previous source dropped; a failed load keeps it.
        self.sink.clear();
        self.sink.append(source);

        info!(
            url,
            bytes = data.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "playback_engine_loaded"
        );
        *self.loaded() = Some(LoadedSource {
            url: url.to_string(),
            data,
            duration,
        });
        Ok(())
    }

    async fn play(&self) -> Result<(), AudioError> {
        if self.sink.empty() {
            // Finished tracks start over from the cached bytes.
            let replay = self.loaded().as_ref().map(|l| (l.url.clone(), l.data.clone()));
            let Some((url, data)) = replay else {
                return Err(AudioError::NoSource);
            };
            debug!(url = url.as_str(), "playback_engine_replay");
            let source = tokio::task::spawn_blocking(move || decode(data))
                .await
                .map_err(|e| AudioError::DecodingError(e.to_string()))??;
            self.sink.append(source);
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn stop(&self) {
        self.sink.clear();
        *self.loaded() = None;
    }

    fn seek(&self, position: Duration) -> Result<(), AudioError> {
        self.sink.try_seek(position).map_err(|e| {
            warn!(error = %e, "playback_engine_seek_failed");
            AudioError::DeviceError(e.to_string())
        })
    }

    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.loaded().as_ref().and_then(|l| l.duration)
    }

    fn has_source(&self) -> bool {
        self.loaded().is_some()
    }

    fn source_url(&self) -> Option<String> {
        self.loaded().as_ref().map(|l| l.url.clone())
    }

    fn is_finished(&self) -> bool {
        self.has_source() && self.sink.empty()
    }
}
