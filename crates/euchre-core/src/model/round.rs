use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::score::{RoundScore, TRICKS_PER_ROUND, score_round};
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use std::fmt;

/// Round lifecycle: `Dealt` -> `TrumpCalled` -> `Playing` (five tricks) -> `Scored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Dealt,
    TrumpCalled,
    /// One-based number of the trick in progress, or the last trick once all
    /// five are complete.
    Playing { trick: u8 },
    Scored,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundPhase::Dealt => f.write_str("dealt"),
            RoundPhase::TrumpCalled => f.write_str("trump called"),
            RoundPhase::Playing { trick } => write!(f, "playing trick {trick}"),
            RoundPhase::Scored => f.write_str("scored"),
        }
    }
}

/// Record of the bid: who named trump, and the up-card exchange made by the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrumpCall {
    pub caller: Seat,
    pub up_card: Card,
    pub discard: Card,
}

impl TrumpCall {
    pub fn trump(&self) -> Suit {
        self.up_card.suit
    }
}

#[derive(Debug, Clone)]
pub struct RoundState {
    dealer: Seat,
    call: Option<TrumpCall>,
    current_trick: Trick,
    trick_history: Vec<Trick>,
    trick_winners: Vec<Seat>,
    phase: RoundPhase,
    score: Option<RoundScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: Seat, trick: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    WrongPhase {
        action: &'static str,
        phase: RoundPhase,
    },
    Trick(TrickError),
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::WrongPhase { action, phase } => {
                write!(f, "cannot {action} while round is {phase}")
            }
            RoundError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RoundError {}

impl From<TrickError> for RoundError {
    fn from(err: TrickError) -> Self {
        RoundError::Trick(err)
    }
}

impl RoundState {
    /// A round whose hands have been dealt by `dealer`. The dealer leads the
    /// first trick.
    pub fn deal(dealer: Seat) -> Self {
        Self {
            dealer,
            call: None,
            current_trick: Trick::new(dealer),
            trick_history: Vec::with_capacity(TRICKS_PER_ROUND as usize),
            trick_winners: Vec::with_capacity(TRICKS_PER_ROUND as usize),
            phase: RoundPhase::Dealt,
            score: None,
        }
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn trump_call(&self) -> Option<&TrumpCall> {
        self.call.as_ref()
    }

    pub fn trump(&self) -> Option<Suit> {
        self.call.as_ref().map(TrumpCall::trump)
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn trick_winners(&self) -> &[Seat] {
        &self.trick_winners
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn is_ready_for_scoring(&self) -> bool {
        matches!(self.phase, RoundPhase::Playing { .. })
            && self.trick_history.len() == TRICKS_PER_ROUND as usize
    }

    pub fn score(&self) -> Option<&RoundScore> {
        self.score.as_ref()
    }

    pub fn declare_trump(&mut self, call: TrumpCall) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Dealt {
            return Err(RoundError::WrongPhase {
                action: "declare trump",
                phase: self.phase,
            });
        }
        self.call = Some(call);
        self.phase = RoundPhase::TrumpCalled;
        Ok(())
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, RoundError> {
        let trump = match (self.phase, self.trump()) {
            (RoundPhase::TrumpCalled | RoundPhase::Playing { .. }, Some(trump))
                if !self.is_ready_for_scoring() =>
            {
                trump
            }
            _ => {
                return Err(RoundError::WrongPhase {
                    action: "play a card",
                    phase: self.phase,
                });
            }
        };

        let trick_no = self.trick_history.len() as u8 + 1;
        self.current_trick.play(seat, card)?;
        self.phase = RoundPhase::Playing { trick: trick_no };

        match self.current_trick.winner(trump) {
            Some(winner) => {
                let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
                self.trick_history.push(finished);
                self.trick_winners.push(winner);
                Ok(PlayOutcome::TrickCompleted {
                    winner,
                    trick: trick_no,
                })
            }
            None => Ok(PlayOutcome::Played),
        }
    }

    /// Tricks taken, indexed by `Team::index`.
    pub fn tricks_won(&self) -> [u8; 2] {
        let mut won = [0u8; 2];
        for winner in &self.trick_winners {
            won[winner.team().index()] += 1;
        }
        won
    }

    pub fn finish(&mut self) -> Result<RoundScore, RoundError> {
        let caller = match &self.call {
            Some(call) if self.is_ready_for_scoring() => call.caller,
            _ => {
                return Err(RoundError::WrongPhase {
                    action: "score the round",
                    phase: self.phase,
                });
            }
        };
        let score = score_round(self.tricks_won(), caller.team());
        self.score = Some(score);
        self.phase = RoundPhase::Scored;
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayOutcome, RoundError, RoundPhase, RoundState, TrumpCall};
    use crate::model::card::Card;
    use crate::model::player::{Seat, Team};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::model::trick::TrickError;

    fn hearts_call(caller: Seat) -> TrumpCall {
        TrumpCall {
            caller,
            up_card: Card::new(Rank::Nine, Suit::Hearts),
            discard: Card::new(Rank::Nine, Suit::Clubs),
        }
    }

    /// Plays one trick led by `leader` where `winner_offset` seats after the
    /// leader plays a trump and everyone else plays clubs.
    fn play_trick(round: &mut RoundState, trick: usize, winner_offset: usize) -> Seat {
        let leader = round.current_trick().leader();
        let ranks = [Rank::Nine, Rank::Ten, Rank::Queen, Rank::King, Rank::Ace];
        let mut outcome = PlayOutcome::Played;
        for (offset, seat) in leader.order_from().into_iter().enumerate() {
            let card = if offset == winner_offset {
                Card::new(ranks[trick], Suit::Hearts)
            } else {
                Card::new(ranks[offset], Suit::Clubs)
            };
            outcome = round.play_card(seat, card).unwrap();
        }
        match outcome {
            PlayOutcome::TrickCompleted { winner, .. } => winner,
            other => panic!("expected completed trick, got {other:?}"),
        }
    }

    #[test]
    fn cannot_play_before_trump_is_called() {
        let mut round = RoundState::deal(Seat::North);
        assert_eq!(round.phase(), RoundPhase::Dealt);
        assert!(matches!(
            round.play_card(Seat::North, Card::new(Rank::Ace, Suit::Clubs)),
            Err(RoundError::WrongPhase { .. })
        ));
    }

    #[test]
    fn dealer_leads_first_trick_and_winner_leads_next() {
        let mut round = RoundState::deal(Seat::East);
        round.declare_trump(hearts_call(Seat::South)).unwrap();
        assert_eq!(round.trump(), Some(Suit::Hearts));
        assert_eq!(round.current_trick().leader(), Seat::East);

        let winner = play_trick(&mut round, 0, 2);
        assert_eq!(winner, Seat::West);
        assert_eq!(round.current_trick().leader(), Seat::West);
        assert_eq!(round.phase(), RoundPhase::Playing { trick: 1 });
        assert_eq!(round.trick_winners(), &[Seat::West]);
    }

    #[test]
    fn out_of_turn_play_is_rejected() {
        let mut round = RoundState::deal(Seat::North);
        round.declare_trump(hearts_call(Seat::North)).unwrap();
        assert_eq!(
            round.play_card(Seat::South, Card::new(Rank::Ace, Suit::Clubs)),
            Err(RoundError::Trick(TrickError::OutOfTurn {
                expected: Seat::North,
                actual: Seat::South
            }))
        );
    }

    #[test]
    fn declaring_twice_is_rejected() {
        let mut round = RoundState::deal(Seat::North);
        round.declare_trump(hearts_call(Seat::North)).unwrap();
        assert!(round.declare_trump(hearts_call(Seat::East)).is_err());
    }

    #[test]
    fn five_tricks_then_scoring() {
        let mut round = RoundState::deal(Seat::North);
        round.declare_trump(hearts_call(Seat::East)).unwrap();
        for trick in 0..5 {
            assert!(round.finish().is_err());
            play_trick(&mut round, trick, 0);
        }
        assert!(round.is_ready_for_scoring());
        assert_eq!(round.tricks_won(), [5, 0]);
        assert!(
            round
                .play_card(Seat::North, Card::new(Rank::Ace, Suit::Spades))
                .is_err()
        );

        let score = round.finish().unwrap();
        assert_eq!(score.winner, Team::NorthSouth);
        assert_eq!(score.points, 3);
        assert!(score.euchred);
        assert_eq!(round.phase(), RoundPhase::Scored);
        assert_eq!(round.score(), Some(&score));
        assert!(round.finish().is_err());
    }
}
