use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use connect_n::ai::Difficulty;
use connect_n::arena::{play_game, MatchStats};
use connect_n::config::AppConfig;
use connect_n::game::Player;

/// Pit two computer players against each other and report the results.
#[derive(Parser)]
#[command(name = "arena", about = "Run headless connect-N matches between agents")]
struct Cli {
    /// Strength of the first player (Red)
    #[arg(long, value_enum, default_value = "hard")]
    red: Difficulty,

    /// Strength of the second player (Yellow)
    #[arg(long, value_enum, default_value = "easy")]
    yellow: Difficulty,

    /// Number of games to play
    #[arg(long, default_value_t = 20)]
    games: usize,

    /// Path to TOML configuration file (board settings)
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

    /// Base seed for reproducible matches
    #[arg(long)]
    seed: Option<u64>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: log::Level,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    simple_logger::init_with_level(cli.log_level).context("initialising logger")?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(connect) = cli.connect {
        config.board.connect_target = connect;
    }
    config.validate().context("invalid settings")?;

    let board = config.board.sanitized();
    log::info!(
        "{} games of connect {} on {}x{}: {} (Red) vs {} (Yellow)",
        cli.games,
        board.connect_target,
        board.rows,
        board.cols,
        cli.red.label(),
        cli.yellow.label()
    );

    let mut stats = MatchStats::new();
    let report_every = (cli.games / 10).max(1);

    for game in 0..cli.games {
        let seed = cli.seed.map(|s| s.wrapping_add(2 * game as u64));
        let mut red = cli.red.agent(seed);
        let mut yellow = cli.yellow.agent(seed.map(|s| s.wrapping_add(1)));

        let record = play_game(red.as_mut(), yellow.as_mut(), &board)
            .with_context(|| format!("playing game {}", game + 1))?;
        let outcome = record.winner.map_or("draw", Player::name);
        log::debug!("game {}: {} in {} moves", game + 1, outcome, record.length);
        stats.record(&record);

        if (game + 1) % report_every == 0 {
            log::info!(
                "[{}/{}] Red {} | Yellow {} | draws {}",
                game + 1,
                cli.games,
                stats.wins(Player::Red),
                stats.wins(Player::Yellow),
                stats.draws()
            );
        }
    }

    log::info!(
        "Red win rate {:.1}% | Yellow win rate {:.1}% | draw rate {:.1}% | avg length {:.1}",
        stats.win_rate(Player::Red) * 100.0,
        stats.win_rate(Player::Yellow) * 100.0,
        stats.draw_rate() * 100.0,
        stats.average_game_length()
    );
    Ok(())
}
