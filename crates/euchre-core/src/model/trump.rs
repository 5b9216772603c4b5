//! Card ordering once a trump suit is fixed.
//!
//! Trump outranks everything else. Within trump the right bower (jack of
//! trump) is highest, then the left bower (jack of the same-colour suit),
//! then ace down to nine. Off-trump cards compare by natural rank only; the
//! trick resolver filters out cards that cannot win before comparing.

use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::cmp::Ordering;

/// True for every card of the trump suit plus the left bower.
pub fn is_effectively_trump(card: Card, trump: Suit) -> bool {
    card.suit == trump || card.is_left_bower(trump)
}

/// Strength of a card within trump, `None` when the card is not trump.
pub fn trump_strength(card: Card, trump: Suit) -> Option<u8> {
    if card.is_right_bower(trump) {
        return Some(7);
    }
    if card.is_left_bower(trump) {
        return Some(6);
    }
    if card.suit != trump {
        return None;
    }
    let strength = match card.rank {
        Rank::Nine => 1,
        Rank::Ten => 2,
        Rank::Queen => 3,
        Rank::King => 4,
        Rank::Ace => 5,
        Rank::Jack => 7,
    };
    Some(strength)
}

/// `Greater` when `left` outranks `right` under `trump`.
pub fn compare_cards(left: Card, right: Card, trump: Suit) -> Ordering {
    match (trump_strength(left, trump), trump_strength(right, trump)) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => left.rank.cmp(&right.rank),
    }
}

/// The stronger of two cards; a tie keeps `left`.
pub fn more_valuable(left: Card, right: Card, trump: Suit) -> Card {
    match compare_cards(left, right, trump) {
        Ordering::Less => right,
        Ordering::Equal | Ordering::Greater => left,
    }
}
