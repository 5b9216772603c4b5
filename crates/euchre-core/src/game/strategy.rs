//! Decision seam between the engine and whoever picks cards: the naive bot,
//! a scripted fixture, or a person at a console.

use crate::game::game_state::RoundResult;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

/// Offered to each seat in turn while the up-card is showing.
pub struct BidContext<'a> {
    pub seat: Seat,
    pub dealer: Seat,
    pub hand: &'a Hand,
    pub candidate: Card,
}

/// Given to the dealer after the up-card joins the hand (six cards).
pub struct DiscardContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub trump: Suit,
}

pub struct PlayContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub trump: Suit,
    pub lead_suit: Option<Suit>,
    pub trick: &'a Trick,
}

impl PlayContext<'_> {
    pub fn legal_plays(&self) -> Vec<Card> {
        self.hand.legal_plays(self.lead_suit)
    }
}

pub trait Strategy: Send {
    /// Whether to name the candidate's suit as trump.
    fn decide_trump(&mut self, ctx: &BidContext) -> bool;

    /// Card to drop after picking up the up-card. Must come from `ctx.hand`.
    fn choose_discard(&mut self, ctx: &DiscardContext) -> Card;

    /// Card to play into the current trick. Must be one of `ctx.legal_plays()`.
    fn choose_card_to_play(&mut self, ctx: &PlayContext) -> Card;

    /// Optional: notified after every scored round.
    #[allow(unused_variables)]
    fn observe_round(&mut self, seat: Seat, result: &RoundResult) {}
}
