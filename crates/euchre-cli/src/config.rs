use euchre_bot::policy::{DEFAULT_MIN_SUIT_COUNT, NaivePolicy};
use euchre_core::game::game_state::{DEFAULT_MAX_REDEALS, DEFAULT_TARGET_SCORE};
use euchre_core::game::{AllPassRule, GameConfig};
use euchre_core::model::player::Seat;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";
const DEFAULT_LOG_FILE: &str = "out/{run_id}.log.jsonl";

/// Root table configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableConfig {
    pub run_id: String,
    #[serde(default)]
    pub game: GameSection,
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,
    /// Pause between rounds, for people watching the output.
    #[serde(default)]
    pub pacing_ms: u64,
    #[serde(default)]
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            run_id: "local".to_string(),
            game: GameSection::default(),
            players: default_players(),
            pacing_ms: 0,
            outputs: OutputsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TableConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: TableConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.game.validate()?;
        self.logging.normalize();
        validate_players(&mut self.players)?;
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            target_score: self.game.target_score,
            all_pass: self.game.all_pass,
            max_redeals: self.game.max_redeals,
        }
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            report: self
                .outputs
                .report
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
            log_file: resolve_template(
                &self.run_id,
                self.logging.file.as_deref().unwrap_or(DEFAULT_LOG_FILE),
            ),
        }
    }

    /// Turns the player at `seat` into a console player.
    pub fn make_interactive(&mut self, seat: Seat) {
        if let Some(player) = self.players.get_mut(seat.index()) {
            player.kind = PlayerKind::Console;
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameSection {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    #[serde(default)]
    pub all_pass: AllPassRule,
    #[serde(default = "default_max_redeals")]
    pub max_redeals: u32,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            seed: None,
            target_score: DEFAULT_TARGET_SCORE,
            all_pass: AllPassRule::default(),
            max_redeals: DEFAULT_MAX_REDEALS,
        }
    }
}

impl GameSection {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.target_score == 0 {
            return Err(ValidationError::InvalidField {
                field: "game.target_score".to_string(),
                message: "target score must be greater than zero".to_string(),
            });
        }

        if self.max_redeals == 0 {
            return Err(ValidationError::InvalidField {
                field: "game.max_redeals".to_string(),
                message: "max_redeals must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}

fn default_max_redeals() -> u32 {
    DEFAULT_MAX_REDEALS
}

/// One seat at the table; the list order is North, East, South, West.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

impl PlayerConfig {
    pub fn naive(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: PlayerKind::Naive,
            params: serde_yaml::Value::Mapping(Default::default()),
        }
    }

    pub fn min_suit_count(&self) -> Option<u64> {
        self.params.get("min_suit_count").and_then(|v| v.as_u64())
    }

    pub fn naive_policy(&self) -> NaivePolicy {
        let count = self
            .min_suit_count()
            .map(|count| count as usize)
            .unwrap_or(DEFAULT_MIN_SUIT_COUNT);
        NaivePolicy::new(count)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Naive,
    Console,
}

fn default_players() -> Vec<PlayerConfig> {
    Seat::LOOP
        .iter()
        .map(|seat| PlayerConfig::naive(&seat.to_string()))
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutputsConfig {
    #[serde(default)]
    pub report: Option<String>,
}

/// Logging configuration defaults to human-readable logs on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_players(players: &mut [PlayerConfig]) -> Result<(), ValidationError> {
    if players.len() != 4 {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: format!("exactly four players are required, found {}", players.len()),
        });
    }

    let mut seen = HashSet::new();
    for player in players.iter_mut() {
        if player.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players.name".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }

        if !seen.insert(player.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player name '{}' defined more than once", player.name),
            });
        }

        if player.params.is_null() {
            player.params = serde_yaml::Value::Mapping(Default::default());
        }

        if let Some(count) = player.min_suit_count() {
            if !(1..=5).contains(&count) {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].params.min_suit_count", player.name),
                    message: "min_suit_count must be between 1 and 5".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub report: Option<PathBuf>,
    pub log_file: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "friday_night"
game:
  seed: 123
  all_pass: redeal
players:
  - name: "ann"
    kind: "naive"
  - name: "bob"
    kind: "naive"
    params:
      min_suit_count: 3
  - name: "cat"
    kind: "console"
  - name: "dan"
    kind: "naive"
outputs:
  report: "out/{run_id}/report.json"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: TableConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.game.seed, Some(123));
        assert_eq!(cfg.game.target_score, DEFAULT_TARGET_SCORE);
        assert_eq!(cfg.game.all_pass, AllPassRule::Redeal);
        assert_eq!(cfg.players[2].kind, PlayerKind::Console);
        assert_eq!(cfg.players[1].naive_policy().min_suit_count(), 3);
        assert_eq!(cfg.players[0].naive_policy().min_suit_count(), 2);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.report,
            Some(PathBuf::from("out/friday_night/report.json"))
        );
        assert_eq!(
            outputs.log_file,
            PathBuf::from("out/friday_night.log.jsonl")
        );
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let mut cfg: TableConfig = serde_yaml::from_str("run_id: quick\n").expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg.players.len(), 4);
        assert_eq!(cfg.players[3].name, "West");
        assert_eq!(cfg.game_config(), GameConfig::default());
        assert_eq!(cfg.resolved_outputs().report, None);
    }

    #[test]
    fn rejects_duplicate_players() {
        let yaml = BASIC_YAML.replace("\"dan\"", "\"ann\"");
        let mut cfg: TableConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("duplicate players should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "players"
        ));
    }

    #[test]
    fn rejects_wrong_player_count() {
        let yaml = BASIC_YAML.replace("  - name: \"dan\"\n    kind: \"naive\"\n", "");
        let mut cfg: TableConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("three players should fail");
        assert!(err.to_string().contains("exactly four players"));
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("friday_night", "friday night");
        let mut cfg: TableConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn rejects_out_of_range_suit_count() {
        let yaml = BASIC_YAML.replace("min_suit_count: 3", "min_suit_count: 9");
        let mut cfg: TableConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_target() {
        let yaml = BASIC_YAML.replace("seed: 123", "seed: 123\n  target_score: 0");
        let mut cfg: TableConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("zero target");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "game.target_score"
        ));
    }

    #[test]
    fn make_interactive_switches_kind() {
        let mut cfg = TableConfig::default();
        cfg.make_interactive(Seat::South);
        assert_eq!(cfg.players[2].kind, PlayerKind::Console);
        assert_eq!(cfg.players[0].kind, PlayerKind::Naive);
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = TableConfig::from_path("does/not/exist.yaml").expect_err("missing");
        assert_eq!(err.path(), Path::new("does/not/exist.yaml"));
    }
}
