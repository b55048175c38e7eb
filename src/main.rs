mod app;
mod armory;
mod config;
mod error;
mod event;
mod feeds;
mod logging;
mod panels;
mod radar;
mod records;
mod session;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use app::App;
use config::AppConfig;
use event::{Event, EventHandler};

#[derive(Parser)]
#[command(name = "radarcon", about = "Terminal command-center radar scope")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for every random source
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum display range in km
    #[arg(long)]
    range_km: Option<f64>,
    /// Beam sweep rate in degrees per second
    #[arg(long)]
    sweep: Option<f64>,
    /// Noise blip probability factor, 0..=1
    #[arg(long)]
    noise: Option<f64>,
    /// Start with the sweep frozen
    #[arg(long)]
    paused: bool,
    /// Frame tick in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Do not show the welcome overlay on start
    #[arg(long)]
    skip_welcome: bool,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(range_km) = self.range_km {
            config.radar.range_km = range_km;
        }
        if let Some(sweep) = self.sweep {
            config.radar.sweep_deg_per_sec = sweep;
        }
        if let Some(noise) = self.noise {
            config.radar.noise = noise;
        }
        if self.paused {
            config.radar.paused = true;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_rate_ms = tick_ms;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        if self.skip_welcome {
            config.skip_welcome = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    logging::init(&config.log_file)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, range_km = config.radar.range_km, tick_ms = config.tick_rate_ms, "starting radarcon");

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(&config, seed);
    let result = run(&mut terminal, &mut app, config.tick_rate_ms);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("shutting down");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App, tick_rate_ms: u64) -> Result<()> {
    let event_handler = EventHandler::new(tick_rate_ms);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
