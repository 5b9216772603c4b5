use std::io;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;

use euchre_cli::config::{ResolvedOutputs, TableConfig};
use euchre_cli::logging::init_logging;
use euchre_cli::runner::GameRunner;
use euchre_core::game::AllPassRule;
use euchre_core::model::player::Seat;

/// Plays a game of Euchre between bots and, optionally, you.
#[derive(Debug, Parser)]
#[command(name = "euchre", author, version, about = "Four-handed Euchre at the terminal")]
struct Cli {
    /// Path to a YAML table configuration. Built-in defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the RNG seed used to shuffle.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the points needed to win.
    #[arg(long, value_name = "POINTS")]
    target_score: Option<u32>,

    /// What to do when every player passes: abort or redeal.
    #[arg(long, value_name = "RULE", value_parser = parse_all_pass)]
    all_pass: Option<AllPassRule>,

    /// Pause between rounds, in milliseconds.
    #[arg(long, value_name = "MS")]
    pace_ms: Option<u64>,

    /// Take the given seat (north, east, south or west) yourself.
    #[arg(long, value_name = "SEAT", value_parser = parse_seat)]
    interactive: Option<Seat>,

    /// Write the finished game as JSON to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<String>,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn parse_all_pass(value: &str) -> Result<AllPassRule, String> {
    AllPassRule::parse(value).ok_or_else(|| format!("unknown all-pass rule '{value}'"))
}

fn parse_seat(value: &str) -> Result<Seat, String> {
    Seat::parse(value).ok_or_else(|| format!("unknown seat '{value}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => TableConfig::from_path(path)?,
        None => TableConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }

    if let Some(target) = cli.target_score {
        config.game.target_score = target;
    }

    if let Some(rule) = cli.all_pass {
        config.game.all_pass = rule;
    }

    if let Some(pace) = cli.pace_ms {
        config.pacing_ms = pace;
    }

    if let Some(seat) = cli.interactive {
        config.make_interactive(seat);
    }

    if let Some(report) = cli.report {
        config.outputs.report = Some(report);
    }

    config
        .validate()
        .map_err(|err| anyhow!("invalid configuration: {err}"))?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let names: Vec<&str> = config.players.iter().map(|p| p.name.as_str()).collect();
    println!(
        "Loaded table '{run_id}' with players {} (target {})",
        names.join(", "),
        config.game.target_score
    );

    if cli.validate_only {
        println!("Validation-only mode: game skipped.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = GameRunner::new(config, outputs)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner
        .run(&mut out)
        .with_context(|| format!("table '{run_id}' stopped"))?;

    if let Some(guard) = logging_guard.as_ref() {
        println!("Log: {}", guard.log_path.display());
    }

    Ok(())
}
