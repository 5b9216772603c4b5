use super::game_state::{GameConfig, GameState, GameStatus, RoundResult};
use serde::{Deserialize, Serialize};

/// Read-only summary of a game for external consumers (reports, logs,
/// archives). The engine never reads it back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameReport {
    pub seed: u64,
    /// Player names in seat order North, East, South, West.
    pub players: [String; 4],
    pub config: GameConfig,
    pub status: GameStatus,
    pub rounds: Vec<RoundResult>,
}

impl GameReport {
    pub fn capture(state: &GameState) -> Self {
        GameReport {
            seed: state.seed(),
            players: state.seating().names(),
            config: *state.config(),
            status: state.status(),
            rounds: state.history().to_vec(),
        }
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        let report = Self::capture(state);
        serde_json::to_string_pretty(&report)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::GameReport;
    use crate::game::game_state::{AllPassRule, GameConfig, GameState};
    use crate::game::seating::{Player, Seating};
    use crate::game::strategy::{BidContext, DiscardContext, PlayContext, Strategy};
    use crate::model::card::Card;

    struct Eager;

    impl Strategy for Eager {
        fn decide_trump(&mut self, _ctx: &BidContext) -> bool {
            true
        }

        fn choose_discard(&mut self, ctx: &DiscardContext) -> Card {
            ctx.hand.cards()[0]
        }

        fn choose_card_to_play(&mut self, ctx: &PlayContext) -> Card {
            ctx.legal_plays()[0]
        }
    }

    fn played_game() -> GameState {
        let players = ["ann", "bob", "cat", "dan"].map(|name| Player::new(name, Box::new(Eager)));
        let config = GameConfig {
            all_pass: AllPassRule::Redeal,
            ..GameConfig::default()
        };
        let mut state = GameState::with_seed(Seating::new(players).unwrap(), config, 99);
        state.play_round().unwrap();
        state.play_round().unwrap();
        state
    }

    #[test]
    fn report_serializes_to_json() {
        let state = played_game();
        let json = GameReport::to_json(&state).unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"all_pass\": \"redeal\""));
        assert!(json.contains("\"per_trick_winners\""));
        assert!(json.contains("\"ann\""));
    }

    #[test]
    fn report_roundtrip_keeps_history() {
        let state = played_game();
        let json = GameReport::to_json(&state).unwrap();
        let report = GameReport::from_json(&json).unwrap();
        assert_eq!(report, GameReport::capture(&state));
        assert_eq!(report.rounds.len(), 2);
        assert_eq!(report.status.rounds_played, 2);
    }
}
