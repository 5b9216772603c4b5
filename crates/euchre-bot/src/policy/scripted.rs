use super::naive::NaivePolicy;
use euchre_core::game::{BidContext, DiscardContext, PlayContext, Strategy};
use euchre_core::model::card::Card;
use std::collections::VecDeque;

/// Replays queued decisions in order, falling back to the naive heuristic
/// once a queue runs dry. Queued cards are returned as-is, so a script can
/// also drive the engine's illegal-play checks.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    bids: VecDeque<bool>,
    discards: VecDeque<Card>,
    plays: VecDeque<Card>,
    fallback: NaivePolicy,
}

impl ScriptedPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bids(mut self, bids: impl IntoIterator<Item = bool>) -> Self {
        self.bids.extend(bids);
        self
    }

    pub fn with_discards(mut self, discards: impl IntoIterator<Item = Card>) -> Self {
        self.discards.extend(discards);
        self
    }

    pub fn with_plays(mut self, plays: impl IntoIterator<Item = Card>) -> Self {
        self.plays.extend(plays);
        self
    }

    /// Decisions still queued (bids, discards, plays).
    pub fn pending(&self) -> (usize, usize, usize) {
        (self.bids.len(), self.discards.len(), self.plays.len())
    }
}

impl Strategy for ScriptedPolicy {
    fn decide_trump(&mut self, ctx: &BidContext) -> bool {
        match self.bids.pop_front() {
            Some(decision) => decision,
            None => self.fallback.decide_trump(ctx),
        }
    }

    fn choose_discard(&mut self, ctx: &DiscardContext) -> Card {
        match self.discards.pop_front() {
            Some(card) => card,
            None => self.fallback.choose_discard(ctx),
        }
    }

    fn choose_card_to_play(&mut self, ctx: &PlayContext) -> Card {
        match self.plays.pop_front() {
            Some(card) => card,
            None => self.fallback.choose_card_to_play(ctx),
        }
    }
}
