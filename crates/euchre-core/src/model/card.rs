use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_right_bower(self, trump: Suit) -> bool {
        matches!(self.rank, Rank::Jack) && self.suit as u8 == trump as u8
    }

    pub const fn is_left_bower(self, trump: Suit) -> bool {
        matches!(self.rank, Rank::Jack) && self.suit as u8 == trump.same_color() as u8
    }

    /// Parses short forms such as `JH`, `10s` or `9C`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let split = text.len().checked_sub(1)?;
        if !text.is_char_boundary(split) {
            return None;
        }
        let (rank, suit) = text.split_at(split);
        Some(Card::new(Rank::parse(rank)?, Suit::parse(suit)?))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
