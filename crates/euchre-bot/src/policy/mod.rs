mod naive;
mod scripted;

pub use naive::{DEFAULT_MIN_SUIT_COUNT, NaivePolicy};
pub use scripted::ScriptedPolicy;

use euchre_core::game::{Player, Strategy};

/// Built-in strategies that need no outside input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Naive,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            PolicyKind::Naive => Box::new(NaivePolicy::default()),
        }
    }
}

/// Four naive players named after `names`, in seat order.
pub fn naive_players(names: [&str; 4]) -> [Player; 4] {
    names.map(|name| Player::new(name, PolicyKind::Naive.build()))
}
