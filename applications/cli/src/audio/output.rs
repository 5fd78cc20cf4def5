/// CPAL-based recitation output
///
/// **Architecture**: a dedicated audio thread owns the CPAL stream and takes
/// commands over a channel. Clips are fetched (through the asset cache) and
/// decoded on the tokio runtime, then handed to the audio thread. The end or
/// failure of each clip is reported on the completion channel together with
/// the token it was started with.
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use quran_api_client::AssetCache;
use quran_playback::{AudioOutput, PlaybackError, PlaybackOutcome, PlaybackToken};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, warn};

use super::decode::decode_clip;
use super::resample::prepare_for_device;
use crate::error::{CliError, Result};

/// End-of-clip report delivered to the playback loop
pub type Completion = (PlaybackToken, PlaybackOutcome);

/// How often the audio thread checks for a finished clip
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Commands sent to the audio thread
enum AudioCommand {
    /// Only a clip carrying this token may start
    Expect(PlaybackToken),
    /// Play decoded samples
    Play {
        token: PlaybackToken,
        samples: Arc<Vec<f32>>,
    },
    /// Stop playback
    Stop,
    /// Shutdown the audio thread
    Shutdown,
}

/// State shared between the audio thread and the CPAL callback
struct ClipState {
    samples: Arc<Vec<f32>>,
    position: AtomicUsize,
    finished: AtomicBool,
}

impl ClipState {
    fn new(samples: Arc<Vec<f32>>) -> Self {
        Self {
            samples,
            position: AtomicUsize::new(0),
            finished: AtomicBool::new(false),
        }
    }
}

/// Copy the next samples of the clip into `output`, padding with silence
fn fill_output(output: &mut [f32], clip: &ClipState) {
    let samples = &clip.samples;
    let pos = clip.position.load(Ordering::Relaxed);
    let available = samples.len().saturating_sub(pos);
    let n = available.min(output.len());

    output[..n].copy_from_slice(&samples[pos..pos + n]);
    output[n..].fill(0.0);

    clip.position.store(pos + n, Ordering::Relaxed);
    if pos + n >= samples.len() {
        clip.finished.store(true, Ordering::Release);
    }
}

/// Desktop audio output for the playback session
pub struct DesktopOutput {
    command_tx: Sender<AudioCommand>,
    completions: UnboundedSender<Completion>,
    assets: AssetCache,
    runtime: Handle,
    channels: u16,
    sample_rate: u32,
    loading: Option<tokio::task::JoinHandle<()>>,
    audio_thread: Option<JoinHandle<()>>,
}

impl DesktopOutput {
    /// Open the default output device
    pub fn new(
        assets: AssetCache,
        runtime: Handle,
        completions: UnboundedSender<Completion>,
    ) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| CliError::audio("No audio output device found"))?;

        let supported = device
            .default_output_config()
            .map_err(|e| CliError::audio(e.to_string()))?;

        let sample_rate = supported.sample_rate();
        let channels = supported.channels();
        let config = supported.config();

        let (command_tx, command_rx) = bounded::<AudioCommand>(32);

        let thread_completions = completions.clone();
        let audio_thread = thread::Builder::new()
            .name("quran-audio".into())
            .spawn(move || audio_thread_run(device, config, command_rx, thread_completions))?;

        debug!(channels, sample_rate, "Audio output ready");

        Ok(Self {
            command_tx,
            completions,
            assets,
            runtime,
            channels,
            sample_rate,
            loading: None,
            audio_thread: Some(audio_thread),
        })
    }

    fn cancel_loading(&mut self) {
        if let Some(task) = self.loading.take() {
            task.abort();
        }
    }
}

impl AudioOutput for DesktopOutput {
    fn start(&mut self, url: &str, token: PlaybackToken) -> quran_playback::Result<()> {
        self.cancel_loading();
        self.command_tx
            .send(AudioCommand::Expect(token))
            .map_err(|_| PlaybackError::output("audio thread has stopped"))?;

        let assets = self.assets.clone();
        let url = url.to_string();
        let command_tx = self.command_tx.clone();
        let completions = self.completions.clone();
        let (channels, sample_rate) = (self.channels, self.sample_rate);

        let task = self.runtime.spawn(async move {
            let result = async {
                let bytes = assets.fetch(&url).await.map_err(|e| e.to_string())?;
                let extension = url
                    .rsplit('.')
                    .next()
                    .filter(|ext| ext.len() <= 4)
                    .map(str::to_string);

                tokio::task::spawn_blocking(move || {
                    let clip = decode_clip(bytes, extension.as_deref())?;
                    prepare_for_device(&clip, channels, sample_rate)
                })
                .await
                .map_err(|e| e.to_string())?
                .map_err(|e| e.to_string())
            }
            .await;

            match result {
                Ok(samples) => {
                    let play = AudioCommand::Play {
                        token,
                        samples: Arc::new(samples),
                    };
                    if command_tx.send(play).is_err() {
                        let _ = completions
                            .send((token, PlaybackOutcome::Failed("audio thread stopped".into())));
                    }
                }
                Err(message) => {
                    warn!(url = %url, token = %token, error = %message, "Clip could not be loaded");
                    let _ = completions.send((token, PlaybackOutcome::Failed(message)));
                }
            }
        });

        self.loading = Some(task);
        Ok(())
    }

    fn halt(&mut self) {
        self.cancel_loading();
        let _ = self.command_tx.send(AudioCommand::Stop);
    }
}

impl Drop for DesktopOutput {
    fn drop(&mut self) {
        self.cancel_loading();
        let _ = self.command_tx.send(AudioCommand::Shutdown);
        if let Some(thread) = self.audio_thread.take() {
            let _ = thread.join();
        }
    }
}

/// Audio thread main loop
///
/// Owns the CPAL stream of the clip currently playing.
fn audio_thread_run(
    device: Device,
    config: StreamConfig,
    command_rx: Receiver<AudioCommand>,
    completions: UnboundedSender<Completion>,
) {
    let mut expected: Option<PlaybackToken> = None;
    let mut current: Option<(Stream, PlaybackToken, Arc<ClipState>)> = None;

    loop {
        match command_rx.recv_timeout(POLL_INTERVAL) {
            Ok(AudioCommand::Expect(token)) => {
                current = None;
                expected = Some(token);
            }
            Ok(AudioCommand::Play { token, samples }) => {
                if expected != Some(token) {
                    debug!(token = %token, "Dropping superseded clip");
                    continue;
                }
                current = None;

                let clip = Arc::new(ClipState::new(samples));
                let clip_for_callback = Arc::clone(&clip);
                let stream = device
                    .build_output_stream(
                        &config,
                        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                            fill_output(data, &clip_for_callback);
                        },
                        |err| error!(error = %err, "Audio stream error"),
                        None,
                    )
                    .map_err(|e| e.to_string())
                    .and_then(|s| s.play().map(|()| s).map_err(|e| e.to_string()));

                match stream {
                    Ok(stream) => current = Some((stream, token, clip)),
                    Err(message) => {
                        error!(error = %message, "Failed to start stream");
                        let _ = completions.send((token, PlaybackOutcome::Failed(message)));
                    }
                }
            }
            Ok(AudioCommand::Stop) => {
                current = None;
                expected = None;
            }
            Ok(AudioCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let finished = current
            .as_ref()
            .is_some_and(|(_, _, clip)| clip.finished.load(Ordering::Acquire));
        if finished {
            if let Some((stream, token, _)) = current.take() {
                drop(stream);
                expected = None;
                let _ = completions.send((token, PlaybackOutcome::Ended));
            }
        }
    }
}
