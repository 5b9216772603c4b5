use crate::model::card::Card;
use crate::model::suit::Suit;
use crate::model::trump::{compare_cards, is_effectively_trump};
use std::fmt;
use std::vec::Vec;

pub const HAND_SIZE: usize = 5;

/// Cards keep their insertion order so "first matching card" choices are
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandError {
    InvalidSize { expected: usize, actual: usize },
    CardNotInHand(Card),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::InvalidSize { expected, actual } => {
                write!(f, "hand must hold {expected} cards, found {actual}")
            }
            HandError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
        }
    }
}

impl std::error::Error for HandError {}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// A freshly dealt hand; anything other than five cards is rejected.
    pub fn dealt(cards: Vec<Card>) -> Result<Self, HandError> {
        let hand = Self { cards };
        hand.ensure_size(HAND_SIZE)?;
        Ok(hand)
    }

    pub fn ensure_size(&self, expected: usize) -> Result<(), HandError> {
        if self.cards.len() != expected {
            return Err(HandError::InvalidSize {
                expected,
                actual: self.cards.len(),
            });
        }
        Ok(())
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards whose printed suit is `suit`.
    pub fn count_of(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|card| card.suit == suit).count()
    }

    pub fn suit_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for card in &self.cards {
            counts[card.suit.index()] += 1;
        }
        counts
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|card| card.suit == suit)
    }

    /// Cards that may be played to a trick led with `lead_suit`: the lead suit
    /// when held, otherwise anything.
    pub fn legal_plays(&self, lead_suit: Option<Suit>) -> Vec<Card> {
        match lead_suit {
            Some(lead) if self.has_suit(lead) => self
                .cards
                .iter()
                .copied()
                .filter(|card| card.suit == lead)
                .collect(),
            _ => self.cards.clone(),
        }
    }

    /// Lowest natural rank among cards that are not trump (the left bower
    /// counts as trump). Ties keep the earliest card.
    pub fn lowest_non_trump(&self, trump: Suit) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|card| !is_effectively_trump(*card, trump))
            .reduce(|low, card| if card.rank < low.rank { card } else { low })
    }

    pub fn lowest_trump(&self, trump: Suit) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|card| is_effectively_trump(*card, trump))
            .reduce(|low, card| {
                if compare_cards(card, low, trump).is_lt() {
                    card
                } else {
                    low
                }
            })
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{HAND_SIZE, Hand, HandError};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn sample() -> Hand {
        Hand::dealt(vec![
            Card::new(Rank::Queen, Suit::Spades),
            Card::new(Rank::Nine, Suit::Diamonds),
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::Queen, Suit::Diamonds),
        ])
        .unwrap()
    }

    #[test]
    fn dealt_requires_five_cards() {
        let err = Hand::dealt(vec![Card::new(Rank::Ace, Suit::Clubs)]).unwrap_err();
        assert_eq!(
            err,
            HandError::InvalidSize {
                expected: HAND_SIZE,
                actual: 1
            }
        );
        assert_eq!(sample().len(), HAND_SIZE);
    }

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Rank::Nine, Suit::Clubs);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let hand = sample();
        assert_eq!(hand.cards()[0], Card::new(Rank::Queen, Suit::Spades));
        assert_eq!(hand.cards()[4], Card::new(Rank::Queen, Suit::Diamonds));
        assert_eq!(hand.to_string(), "QS 9D 10C KS QD");
    }

    #[test]
    fn counts_by_printed_suit() {
        let hand = sample();
        assert_eq!(hand.count_of(Suit::Spades), 2);
        assert_eq!(hand.count_of(Suit::Hearts), 0);
        assert_eq!(hand.suit_counts(), [1, 2, 0, 2]);
    }

    #[test]
    fn legal_plays_follow_lead_suit() {
        let hand = sample();
        assert_eq!(
            hand.legal_plays(Some(Suit::Clubs)),
            vec![Card::new(Rank::Ten, Suit::Clubs)]
        );
        assert_eq!(hand.legal_plays(Some(Suit::Hearts)).len(), HAND_SIZE);
        assert_eq!(hand.legal_plays(None).len(), HAND_SIZE);
    }

    #[test]
    fn lowest_non_trump_skips_trump_and_left_bower() {
        let hand = Hand::dealt(vec![
            Card::new(Rank::Jack, Suit::Diamonds),
            Card::new(Rank::Nine, Suit::Hearts),
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Spades),
            Card::new(Rank::Ten, Suit::Clubs),
        ])
        .unwrap();
        assert_eq!(
            hand.lowest_non_trump(Suit::Hearts),
            Some(Card::new(Rank::Ten, Suit::Spades))
        );
        assert_eq!(
            hand.lowest_trump(Suit::Hearts),
            Some(Card::new(Rank::Nine, Suit::Hearts))
        );
    }

    #[test]
    fn all_trump_hand_has_no_non_trump() {
        let hand = Hand::dealt(vec![
            Card::new(Rank::Jack, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Queen, Suit::Hearts),
        ])
        .unwrap();
        assert_eq!(hand.lowest_non_trump(Suit::Hearts), None);
        assert_eq!(
            hand.lowest_trump(Suit::Hearts),
            Some(Card::new(Rank::Queen, Suit::Hearts))
        );
    }
}
