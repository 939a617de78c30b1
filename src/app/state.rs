// src/app/state.rs
//! Application state management.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::{Receiver, Sender},
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::{
    analysis::SpectrumAnalyser,
    audio::{MusicPlayer, TrackMetadata, load_metadata},
    aura::{Animation, FramePacer, MAX_PARTICLES, PixelCanvas},
    config::Settings,
    ui::{
        keybindings::{PlayerAction, key_to_action},
        layout::{SectionVisibility, compute_layout},
        widgets::{StatusLine, Transport, render_aura, render_status_bar},
    },
};

/// Main application state.
pub struct App {
    /// File being played
    pub track_path: PathBuf,
    /// File name, used when the track has no tags
    pub track_name: String,

    /// Music player instance
    pub player: MusicPlayer,
    /// Elapsed playback time in seconds
    pub elapsed: u64,
    /// Tag metadata once the background loader delivers it
    pub metadata: Option<TrackMetadata>,

    /// Metadata channel sender (background loader -> UI)
    pub meta_tx: Sender<TrackMetadata>,
    /// Metadata channel receiver
    pub meta_rx: Receiver<TrackMetadata>,

    /// The aura session over the terminal canvas
    pub animation: Animation<SpectrumAnalyser, PixelCanvas>,
    /// Frame scheduler for the animation
    pub pacer: FramePacer,
    /// Set once playback end was forwarded to the animation
    ended_forwarded: bool,

    /// Section visibility state
    pub visibility: SectionVisibility,
}

impl App {
    /// Create the app for a `columns` x `rows` terminal. The canvas keeps
    /// this size for the whole session.
    pub fn new(track_path: &Path, settings: &Settings, columns: u16, rows: u16) -> Result<Self> {
        let player = MusicPlayer::new(settings.volume);
        let analyser = SpectrumAnalyser::new(player.sample_buffer.clone(), settings.analyser());
        let canvas = PixelCanvas::for_cells(columns, rows, settings.cell_width, settings.cell_height);
        let (meta_tx, meta_rx) = std::sync::mpsc::channel::<TrackMetadata>();

        let track_name = track_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| track_path.display().to_string());

        Ok(Self {
            track_path: track_path.to_path_buf(),
            track_name,
            player,
            elapsed: 0,
            metadata: None,
            meta_tx,
            meta_rx,
            animation: Animation::new(canvas, analyser),
            pacer: FramePacer::with_fps(settings.fps),
            ended_forwarded: false,
            visibility: SectionVisibility::default(),
        })
    }

    /// Start playback, the metadata loader and the animation loop.
    pub fn start(&mut self) -> Result<()> {
        self.player.play(&self.track_path)?;

        // Spawn a background thread to load metadata
        let tx = self.meta_tx.clone();
        let path = self.track_path.clone();
        thread::spawn(move || match load_metadata(&path) {
            Ok(meta) => {
                let _ = tx.send(meta);
            }
            Err(e) => warn!(path = %path.display(), "no metadata: {e:#}"),
        });

        self.animation.start(&mut self.pacer);
        Ok(())
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            PlayerAction::TogglePause => {
                if self.player.is_paused() {
                    self.player.resume();
                } else {
                    self.player.pause();
                }
            }
            PlayerAction::VolumeUp => self.player.volume_up(),
            PlayerAction::VolumeDown => self.player.volume_down(),
            PlayerAction::ToggleStatus => self.visibility.toggle_status(),
            PlayerAction::Quit => {
                info!("quit requested");
                self.player.stop();
                self.animation.stop();
                return true; // Signal to quit
            }
            PlayerAction::None => {}
        }
        false
    }

    /// Poll background state and run the animation frame if it is due.
    /// Returns true when a frame ran.
    pub fn update(&mut self, now: Instant) -> bool {
        self.process_metadata();

        if !self.ended_forwarded && self.player.has_ended() {
            self.ended_forwarded = true;
            self.animation.on_playback_ended();
        }

        if self.pacer.take_due(now) {
            self.animation.on_frame(&mut self.pacer);
            return true;
        }
        false
    }

    /// How long the event loop may block before the next frame is due.
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        self.pacer
            .time_until_due(now)
            .unwrap_or(self.pacer.interval())
    }

    /// Draw the application UI.
    pub fn draw(&self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area(), &self.visibility);

        render_aura(f, layout.aura_area, self.animation.surface());

        if let Some(status_area) = layout.status_area {
            let title = self
                .metadata
                .as_ref()
                .map(|m| m.display_name(&self.track_name))
                .unwrap_or_else(|| self.track_name.clone());
            let error = self.player.last_error();

            let status = StatusLine {
                title: &title,
                transport: self.transport(),
                elapsed: self.elapsed,
                duration: self.duration(),
                volume: self.player.volume(),
                particles: self.animation.engine().live_count(),
                max_particles: MAX_PARTICLES,
                color: self.animation.last_color().rgb,
                error: error.as_deref(),
            };
            render_status_bar(f, status_area, &status);
        }
    }

    fn transport(&self) -> Transport {
        if self.player.last_error().is_some() {
            Transport::Failed
        } else if self.player.has_ended() {
            Transport::Ended
        } else if self.player.is_paused() {
            Transport::Paused
        } else if self.player.is_playing() {
            Transport::Playing
        } else {
            Transport::Loading
        }
    }

    /// Track length in seconds, 0 until metadata arrives.
    pub fn duration(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.duration_secs).unwrap_or(0)
    }

    /// Process any pending metadata from background loader.
    pub fn process_metadata(&mut self) {
        if let Ok(meta) = self.meta_rx.try_recv() {
            debug!(?meta, "metadata loaded");
            self.metadata = Some(meta);
        }
    }

    /// Update elapsed time if playing.
    pub fn tick_elapsed(&mut self) {
        if self.player.is_playing() && !self.player.is_paused() {
            let next = self.elapsed + 1;
            self.elapsed = match self.duration() {
                0 => next,
                d => next.min(d),
            };
        }
    }
}
