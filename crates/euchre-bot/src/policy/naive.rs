use euchre_core::game::{BidContext, DiscardContext, PlayContext, Strategy};
use euchre_core::model::card::Card;
use tracing::{Level, event};

pub const DEFAULT_MIN_SUIT_COUNT: usize = 2;

/// Reference heuristic. Calls trump when holding at least `min_suit_count`
/// cards of the candidate suit, throws away the lowest off-trump card after a
/// pickup, and plays the first card that follows suit (or the first card).
#[derive(Debug, Clone, Copy)]
pub struct NaivePolicy {
    min_suit_count: usize,
}

impl Default for NaivePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SUIT_COUNT)
    }
}

impl NaivePolicy {
    pub fn new(min_suit_count: usize) -> Self {
        Self { min_suit_count }
    }

    pub fn min_suit_count(&self) -> usize {
        self.min_suit_count
    }
}

impl Strategy for NaivePolicy {
    fn decide_trump(&mut self, ctx: &BidContext) -> bool {
        let held = ctx.hand.count_of(ctx.candidate.suit);
        let declare = held >= self.min_suit_count;
        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "euchre_bot::bid",
                Level::DEBUG,
                seat = %ctx.seat,
                candidate = %ctx.candidate,
                held,
                declare,
            );
        }
        declare
    }

    fn choose_discard(&mut self, ctx: &DiscardContext) -> Card {
        let (card, reason) = match ctx.hand.lowest_non_trump(ctx.trump) {
            Some(card) => (card, "lowest_off_trump"),
            None => match ctx.hand.lowest_trump(ctx.trump) {
                Some(card) => (card, "all_trump"),
                None => (ctx.hand.cards()[0], "first_card"),
            },
        };
        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "euchre_bot::discard",
                Level::DEBUG,
                seat = %ctx.seat,
                trump = %ctx.trump,
                hand = %ctx.hand,
                discard = %card,
                reason,
            );
        }
        card
    }

    fn choose_card_to_play(&mut self, ctx: &PlayContext) -> Card {
        let following = ctx
            .lead_suit
            .and_then(|lead| ctx.hand.iter().copied().find(|card| card.suit == lead));
        let (card, reason) = match following {
            Some(card) => (card, "first_following"),
            None => (ctx.hand.cards()[0], "first_in_hand"),
        };
        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "euchre_bot::play",
                Level::DEBUG,
                seat = %ctx.seat,
                trump = %ctx.trump,
                lead = ?ctx.lead_suit,
                trick_cards = ctx.trick.plays().len(),
                chosen = %card,
                reason,
            );
        }
        card
    }
}
