//! ptop: Process Top - live per-process I/O dashboard
//!
//! Samples every process once per second, derives read/write throughput
//! from the kernel's cumulative counters, and renders the top consumers in
//! a ranked table.
//!
//! Install: `cargo install ptop`
//! Run: `ptop`

use ptop::{app, debug, ui, ProcessCollector, Sampler};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::time::Instant;

use app::{App, TICK_INTERVAL};

/// ptop: Process Top - live per-process I/O dashboard
#[derive(Parser, Debug)]
#[command(name = "ptop")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Live per-process I/O dashboard", long_about = None)]
struct Cli {
    /// Log diagnostics to stderr (also PTOP_DEBUG=1)
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug || std::env::var("PTOP_DEBUG").is_ok() {
        debug::enable();
    }

    let provider = ProcessCollector::new();
    if !provider.is_available() {
        anyhow::bail!("process collector is not available on this system");
    }

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, provider);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<P: Sampler>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    provider: P,
) -> Result<()> {
    // First frame renders synchronously before any event handling; rates
    // are all zero because no previous batch exists yet.
    let mut app = App::new(provider);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // Wait for input until the next tick is due. Any refresh (timer or
        // sort keypress) pushes the deadline a full interval out.
        let deadline = app.last_collect + TICK_INTERVAL;
        let timeout = deadline.saturating_duration_since(Instant::now());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers) {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => {
                    // Redraw with the last ranked rows; no re-sampling.
                }
                _ => {}
            }
        } else {
            app.refresh();
        }
    }
}
