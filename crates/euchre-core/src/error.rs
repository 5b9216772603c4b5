use crate::model::card::Card;
use crate::model::deck::DeckError;
use crate::model::hand::HandError;
use crate::model::player::Seat;
use crate::model::round::RoundError;
use crate::model::suit::Suit;
use crate::model::trick::TrickError;
use thiserror::Error;

/// Failures that abort the current round. None of them are retryable: each
/// one means a broken invariant or a strategy that returned an illegal choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot draw {requested} cards, only {remaining} left in deck")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("{seat} holds {actual} cards, expected {expected}")]
    InvalidHandSize {
        seat: Seat,
        expected: usize,
        actual: usize,
    },
    #[error("no player declared {candidate} as trump")]
    NoTrumpDeclared { candidate: Suit },
    #[error("unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("player name '{0}' is used more than once")]
    DuplicatePlayer(String),
    #[error("{seat} does not hold {card}")]
    CardNotHeld { seat: Seat, card: Card },
    #[error("{seat} played {card} while holding {lead}")]
    MustFollowSuit { seat: Seat, card: Card, lead: Suit },
    #[error("{0} has no hand")]
    HandNotDealt(Seat),
    #[error("game is already over")]
    GameOver,
    #[error(transparent)]
    Trick(#[from] TrickError),
    #[error(transparent)]
    Round(#[from] RoundError),
}

impl From<DeckError> for GameError {
    fn from(err: DeckError) -> Self {
        match err {
            DeckError::InsufficientCards {
                requested,
                remaining,
            } => GameError::InsufficientCards {
                requested,
                remaining,
            },
        }
    }
}

impl GameError {
    /// Attaches the seat whose hand failed a check.
    pub fn from_hand(seat: Seat, err: HandError) -> Self {
        match err {
            HandError::InvalidSize { expected, actual } => GameError::InvalidHandSize {
                seat,
                expected,
                actual,
            },
            HandError::CardNotInHand(card) => GameError::CardNotHeld { seat, card },
        }
    }
}
