//! Terminal screen
//!
//! Run: `cargo run -p cardapio`

mod app;
mod ui;

pub use app::{App, Focus};

use cardapio_export::ExportSink;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;

/// Key poll interval; also the redraw tick
const TICK: Duration = Duration::from_millis(100);

/// Take over the terminal and run the screen until the user quits
///
/// Blocks the calling thread on terminal input; call it from the runtime's
/// main task so spawned exports run on the worker threads.
pub fn run<S: ExportSink + Send + Sync + 'static>(app: &mut App<S>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Tab muda o foco, Enter confirma, q sai");
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if app.export_pending() {
        tracing::warn!("Quit with an export still running");
    }
    res
}

fn run_app<S: ExportSink + Send + Sync + 'static>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        } else {
            // Export results and events published off the key path
            app.drain_events();
        }

        if app.should_quit() {
            tracing::info!("Quit requested");
            return Ok(());
        }
    }
}
