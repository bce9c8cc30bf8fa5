use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_n::ai::Difficulty;
use connect_n::config::AppConfig;
use connect_n::game::GameMode;
use connect_n::ui::App;

/// Play connect-N in the terminal, against a friend or the computer.
#[derive(Parser)]
#[command(name = "connect-n", about = "Play connect-N in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-n.toml")]
    config: PathBuf,

    /// Override board height
    #[arg(long)]
    rows: Option<usize>,

    /// Override board width
    #[arg(long)]
    cols: Option<usize>,

    /// Override the number in a row needed to win
    #[arg(long)]
    connect: Option<usize>,

    /// Single player (against the computer) or two players
    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Computer strength in single-player games
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Pause before the computer's reply, in milliseconds
    #[arg(long)]
    ai_delay_ms: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(connect) = cli.connect {
        config.board.connect_target = connect;
    }
    if let Some(mode) = cli.mode {
        config.game.mode = mode;
    }
    if let Some(difficulty) = cli.difficulty {
        config.game.difficulty = difficulty;
    }
    if let Some(delay) = cli.ai_delay_ms {
        config.ui.ai_delay_ms = delay;
    }
    config.validate().context("invalid settings")?;

    run(&config)
}

fn run(config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running game")
}
