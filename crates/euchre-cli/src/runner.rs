use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use euchre_core::GameError;
use euchre_core::game::{GameReport, GameState, Player, RoundResult, Seating, Strategy};
use euchre_core::model::player::Team;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{PlayerConfig, PlayerKind, ResolvedOutputs, TableConfig};
use crate::console::ConsolePolicy;

/// Seats the configured players and plays one game to the target score.
pub struct GameRunner {
    config: TableConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub seed: u64,
    pub rounds_played: usize,
    pub scores: [u32; 2],
    pub winner: Option<Team>,
    pub report_path: Option<PathBuf>,
}

impl GameRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: TableConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.players.len() != 4 {
            return Err(RunnerError::SeatCount {
                found: config.players.len(),
            });
        }
        Ok(Self { config, outputs })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Plays until a team reaches the target, writing one line per round to
    /// `out`. A rules error stops the game and is returned as-is.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary, RunnerError> {
        let mut state = self.start()?;
        let seed = state.seed();
        event!(
            target: "euchre_cli::runner",
            Level::INFO,
            run_id = %self.config.run_id,
            seed,
            target_score = self.config.game.target_score,
            "game starting"
        );
        writeln!(
            out,
            "Table '{}' seed {} playing to {}",
            self.config.run_id, seed, self.config.game.target_score
        )?;

        let pacing = Duration::from_millis(self.config.pacing_ms);
        while !state.is_over() {
            let result = state.play_round()?;
            writeln!(out, "{}", describe_round(&result, state.scores().standings()))?;
            if !pacing.is_zero() {
                thread::sleep(pacing);
            }
        }

        let status = state.status();
        if let Some(team) = status.winning_team {
            writeln!(
                out,
                "Game over after {} rounds: {} wins {}-{}",
                status.rounds_played,
                team,
                status.scores[team.index()],
                status.scores[team.opponent().index()]
            )?;
        }

        let report_path = match self.outputs.report.as_ref() {
            Some(path) => {
                write_report(path, &state)?;
                writeln!(out, "Report: {}", path.display())?;
                Some(path.clone())
            }
            None => None,
        };

        Ok(RunSummary {
            seed,
            rounds_played: status.rounds_played,
            scores: status.scores,
            winner: status.winning_team,
            report_path,
        })
    }

    fn start(&self) -> Result<GameState, RunnerError> {
        let players = self.build_players()?;
        let seating = Seating::new(players)?;
        let game_config = self.config.game_config();
        Ok(match self.config.game.seed {
            Some(seed) => GameState::with_seed(seating, game_config, seed),
            None => GameState::new(seating, game_config),
        })
    }

    fn build_players(&self) -> Result<[Player; 4], RunnerError> {
        let players: Vec<Player> = self.config.players.iter().map(build_player).collect();
        let found = players.len();
        players
            .try_into()
            .map_err(|_| RunnerError::SeatCount { found })
    }
}

fn build_player(config: &PlayerConfig) -> Player {
    let strategy: Box<dyn Strategy> = match config.kind {
        PlayerKind::Naive => Box::new(config.naive_policy()),
        PlayerKind::Console => Box::new(ConsolePolicy::stdio()),
    };
    Player::new(config.name.clone(), strategy)
}

fn describe_round(result: &RoundResult, scores: &[u32; 2]) -> String {
    let mut outcome = format!("{} +{}", result.winning_team, result.points);
    if result.euchred {
        outcome.push_str(" (euchre)");
    } else if result.swept {
        outcome.push_str(" (march)");
    }
    format!(
        "Round {}: dealer {}, {} called {} (up-card {}, discard {}); tricks {}-{}; {}; score {}-{}",
        result.round_number,
        result.dealer,
        result.trump_caller,
        result.trump_suit.name(),
        result.up_card,
        result.discard,
        result.tricks_won[Team::NorthSouth.index()],
        result.tricks_won[Team::EastWest.index()],
        outcome,
        scores[Team::NorthSouth.index()],
        scores[Team::EastWest.index()],
    )
}

fn write_report(path: &Path, state: &GameState) -> Result<(), RunnerError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RunnerError::Io {
            source,
            path: parent.to_path_buf(),
        })?;
    }
    let json = GameReport::to_json(state)?;
    fs::write(path, json).map_err(|source| RunnerError::Io {
        source,
        path: path.to_path_buf(),
    })
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("expected exactly four players, found {found}")]
    SeatCount { found: usize },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("failed to write {path:?}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to write round output: {0}")]
    Output(#[from] std::io::Error),
    #[error("failed to serialize game report: {0}")]
    Report(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use euchre_core::game::AllPassRule;

    fn naive_table(seed: u64) -> TableConfig {
        let mut cfg = TableConfig::default();
        cfg.game.seed = Some(seed);
        cfg.game.all_pass = AllPassRule::Redeal;
        cfg.validate().expect("default table validates");
        cfg
    }

    #[test]
    fn plays_a_seeded_game_to_the_target() {
        let cfg = naive_table(2024);
        let outputs = cfg.resolved_outputs();
        let runner = GameRunner::new(cfg, outputs).expect("runner");
        let mut out = Vec::new();
        let summary = runner.run(&mut out).expect("game completes");

        let winner = summary.winner.expect("someone wins");
        assert!(summary.scores[winner.index()] >= 10);
        assert!(summary.scores[winner.opponent().index()] < 10);

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("Table 'local' seed 2024"));
        assert_eq!(text.matches("Round ").count(), summary.rounds_played);
        assert!(text.contains("Game over after"));
    }

    #[test]
    fn same_seed_prints_the_same_game() {
        let run = |seed| {
            let cfg = naive_table(seed);
            let outputs = cfg.resolved_outputs();
            let mut out = Vec::new();
            GameRunner::new(cfg, outputs)
                .expect("runner")
                .run(&mut out)
                .expect("game completes");
            out
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn abort_rule_surfaces_no_trump_error() {
        let mut cfg = naive_table(5);
        cfg.game.all_pass = AllPassRule::Abort;
        for player in &mut cfg.players {
            player.params = serde_yaml::from_str("min_suit_count: 5").expect("params");
        }
        let outputs = cfg.resolved_outputs();
        let runner = GameRunner::new(cfg, outputs).expect("runner");
        let err = runner.run(&mut Vec::new()).expect_err("nobody can call");
        assert!(matches!(
            err,
            RunnerError::Game(GameError::NoTrumpDeclared { .. })
        ));
    }
}
