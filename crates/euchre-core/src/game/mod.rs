pub mod game_state;
pub mod seating;
pub mod serialization;
pub mod strategy;

pub use game_state::{AllPassRule, GameConfig, GameState, GameStatus, RoundResult};
pub use seating::{Player, Seating};
pub use serialization::GameReport;
pub use strategy::{BidContext, DiscardContext, PlayContext, Strategy};

use crate::error::GameError;

/// Seats the four players (North, East, South, West in order) and opens a
/// game with North dealing first.
pub fn start_game(players: [Player; 4], config: GameConfig) -> Result<GameState, GameError> {
    let seating = Seating::new(players)?;
    Ok(GameState::new(seating, config))
}
