// src/ui/tui.rs
//! Terminal setup and the frame-paced event loop.

use std::{
    io,
    path::Path,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::{app::App, config::Settings};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Play `path` with the aura until the user quits.
pub fn run(path: &Path, settings: &Settings) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_loop(&mut terminal, path, settings);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("ui loop failed: {e:#}");
    }
    result
}

fn run_loop(terminal: &mut Tui, path: &Path, settings: &Settings) -> Result<()> {
    let size = terminal.size()?;
    info!(columns = size.width, rows = size.height, "terminal canvas");

    let mut app = App::new(path, settings, size.width, size.height)?;
    app.start()?;

    let tick_rate = Duration::from_secs(1);
    let mut last_tick = Instant::now();

    loop {
        if app.update(Instant::now()) {
            terminal.draw(|f| app.draw(f))?;
        }

        let timeout = app.time_until_next_frame(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                CEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.on_key(key) {
                        return Ok(());
                    }
                    terminal.draw(|f| app.draw(f))?;
                }
                CEvent::Resize(..) => terminal.draw(|f| app.draw(f)).map(|_| ())?,
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            app.tick_elapsed();
        }
    }
}
