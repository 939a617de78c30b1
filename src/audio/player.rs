// src/audio/player.rs
//! Music playback engine using rodio with sample capture for analysis.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use ringbuf::{HeapRb, traits::*};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, error, info, warn};

use super::sample_capture::SampleCapture;
use crate::analysis::SampleBuffer;

/// Capacity of the mono capture ring (~370 ms at 44.1 kHz).
pub const SAMPLE_BUFFER_LEN: usize = 16384;

/// Step used by `volume_up` / `volume_down`.
pub const VOLUME_STEP: f32 = 0.05;

/// How often the audio thread checks whether the track ran out.
const END_POLL: Duration = Duration::from_millis(50);

/// Commands sent to the audio playback thread.
enum PlayerCommand {
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
    Gain(f32),
}

/// Sink gain for a linear volume level. Squared so the low end of the
/// control has finer steps.
pub fn volume_gain(level: f32) -> f32 {
    let level = level.clamp(0.0, 1.0);
    level * level
}

/// Flags mirrored from the audio thread for quick UI access.
#[derive(Default)]
struct PlaybackFlags {
    playing: AtomicBool,
    paused: AtomicBool,
    ended: AtomicBool,
    last_error: Mutex<Option<String>>,
}

impl PlaybackFlags {
    fn fail(&self, message: String) {
        error!("{message}");
        self.playing.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        if let Ok(mut slot) = self.last_error.lock() {
            *slot = Some(message);
        }
    }
}

/// Player that can `play()`, `pause()`, `resume()` or `stop()` a file and
/// reports when the queued track has run out.
pub struct MusicPlayer {
    /// Sender to the audio thread for commands
    cmd_tx: Sender<PlayerCommand>,
    flags: Arc<PlaybackFlags>,
    /// Linear volume level in [0, 1]
    volume: f32,
    /// Shared circular buffer containing recent mono samples for analysis
    pub sample_buffer: SampleBuffer,
}

impl MusicPlayer {
    /// Create an idle player at the given linear volume.
    pub fn new(volume: f32) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCommand>();

        let flags = Arc::new(PlaybackFlags::default());
        let sample_buffer = Arc::new(Mutex::new(HeapRb::<f32>::new(SAMPLE_BUFFER_LEN)));
        let volume = volume.clamp(0.0, 1.0);

        let thread_flags = flags.clone();
        let sample_buf_clone = sample_buffer.clone();

        // Spawn audio thread which owns the OutputStream and handles play/pause/stop
        thread::spawn(move || {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    thread_flags.fail(format!("no audio output device: {e}"));
                    // Drain commands until the sender is dropped.
                    while rx.recv().is_ok() {}
                    return;
                }
            };

            let mut sink: Option<Sink> = None;
            let mut gain = volume_gain(volume);

            loop {
                let cmd = match rx.recv_timeout(END_POLL) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => {
                        if sink.as_ref().is_some_and(Sink::empty) {
                            sink = None;
                            info!("track finished");
                            thread_flags.playing.store(false, Ordering::SeqCst);
                            thread_flags.paused.store(false, Ordering::SeqCst);
                            thread_flags.ended.store(true, Ordering::SeqCst);
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                match cmd {
                    PlayerCommand::Play(path) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        if let Ok(mut buf) = sample_buf_clone.lock() {
                            buf.clear();
                        }
                        thread_flags.ended.store(false, Ordering::SeqCst);

                        match start_track(&handle, &path, &sample_buf_clone) {
                            Ok(new_sink) => {
                                new_sink.set_volume(gain);
                                info!(path = %path.display(), "playing");
                                thread_flags.playing.store(true, Ordering::SeqCst);
                                thread_flags.paused.store(false, Ordering::SeqCst);
                                sink = Some(new_sink);
                            }
                            Err(e) => {
                                thread_flags.fail(format!("cannot play {}: {e:#}", path.display()))
                            }
                        }
                    }
                    PlayerCommand::Pause => {
                        if let Some(s) = &sink {
                            s.pause();
                            thread_flags.paused.store(true, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Resume => {
                        if let Some(s) = &sink {
                            s.play();
                            thread_flags.paused.store(false, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Stop => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        thread_flags.playing.store(false, Ordering::SeqCst);
                        thread_flags.paused.store(false, Ordering::SeqCst);
                    }
                    PlayerCommand::Gain(g) => {
                        gain = g;
                        if let Some(s) = &sink {
                            s.set_volume(gain);
                        }
                        debug!(gain, "volume changed");
                    }
                }
            }

            // If the command channel closed, make sure to stop the sink.
            if let Some(s) = sink.take() {
                s.stop();
            }
            // Keep stream alive until thread exits
            drop(stream);
        });

        Self {
            cmd_tx: tx,
            flags,
            volume,
            sample_buffer,
        }
    }

    /// Stop any existing playback and start playing `path`.
    pub fn play(&mut self, path: &Path) -> Result<()> {
        self.cmd_tx
            .send(PlayerCommand::Play(path.to_path_buf()))
            .context("audio thread is gone")
    }

    /// Pause playback if currently playing.
    pub fn pause(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Pause);
    }

    /// Resume playback if currently paused.
    pub fn resume(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Resume);
    }

    /// Immediately halt playback (if any).
    pub fn stop(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Stop);
    }

    /// Linear volume level in [0, 1].
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
        let _ = self.cmd_tx.send(PlayerCommand::Gain(volume_gain(self.volume)));
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.volume + VOLUME_STEP);
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.volume - VOLUME_STEP);
    }

    /// Returns true if there's an active sink (i.e. playing or paused).
    pub fn is_playing(&self) -> bool {
        self.flags.playing.load(Ordering::SeqCst)
    }

    /// Returns true if playback is currently paused.
    pub fn is_paused(&self) -> bool {
        self.flags.paused.load(Ordering::SeqCst)
    }

    /// Returns true once the current track played to its end.
    pub fn has_ended(&self) -> bool {
        self.flags.ended.load(Ordering::SeqCst)
    }

    /// Most recent playback failure, if any.
    pub fn last_error(&self) -> Option<String> {
        self.flags.last_error.lock().ok().and_then(|e| e.clone())
    }
}

/// Open, decode and queue `path` on a fresh sink with sample capture.
fn start_track(handle: &OutputStreamHandle, path: &Path, samples: &SampleBuffer) -> Result<Sink> {
    let sink = Sink::try_new(handle).context("failed to create sink")?;
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let source = Decoder::new(BufReader::new(file)).context("failed to decode audio")?;

    let sample_rate = source.sample_rate();
    let channels = source.channels();
    if channels == 0 {
        warn!(path = %path.display(), "decoder reports zero channels");
    }
    debug!(sample_rate, channels, "decoder ready");

    let capturing = SampleCapture::new(source.convert_samples::<f32>(), samples.clone());
    sink.append(capturing);
    sink.play();
    Ok(sink)
}
