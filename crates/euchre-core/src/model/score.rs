use crate::model::player::Team;
use serde::{Deserialize, Serialize};

pub const TRICKS_PER_ROUND: u8 = 5;

/// Outcome of one scored round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub winner: Team,
    pub points: u32,
    /// Tricks taken, indexed by `Team::index`.
    pub tricks: [u8; 2],
    pub euchred: bool,
    pub swept: bool,
}

/// Makers score 1, or 2 for a sweep. Defenders who euchre the makers score 2,
/// or 3 for a sweep.
pub fn score_round(tricks: [u8; 2], caller: Team) -> RoundScore {
    let winner = if tricks[Team::NorthSouth.index()] > tricks[Team::EastWest.index()] {
        Team::NorthSouth
    } else {
        Team::EastWest
    };
    let swept = tricks[winner.opponent().index()] == 0;
    let euchred = winner != caller;
    let points = match (euchred, swept) {
        (true, true) => 3,
        (true, false) => 2,
        (false, true) => 2,
        (false, false) => 1,
    };
    RoundScore {
        winner,
        points,
        tricks,
        euchred,
        swept,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn add_points(&mut self, team: Team, points: u32) {
        self.totals[team.index()] += points;
    }

    pub fn apply_round(&mut self, score: &RoundScore) {
        self.add_points(score.winner, score.points);
    }

    pub fn score(&self, team: Team) -> u32 {
        self.totals[team.index()]
    }

    pub fn standings(&self) -> &[u32; 2] {
        &self.totals
    }

    /// First team at or above `target`, if any.
    pub fn winner(&self, target: u32) -> Option<Team> {
        Team::BOTH
            .iter()
            .copied()
            .filter(|team| self.score(*team) >= target)
            .max_by_key(|team| self.score(*team))
    }
}
