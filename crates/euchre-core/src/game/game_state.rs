use crate::error::GameError;
use crate::game::seating::Seating;
use crate::model::card::Card;
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::hand::{HAND_SIZE, Hand};
use crate::model::player::{Seat, Team};
use crate::model::round::{PlayOutcome, RoundError, RoundState, TrumpCall};
use crate::model::score::ScoreBoard;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

pub const DEFAULT_TARGET_SCORE: u32 = 10;
pub const DEFAULT_MAX_REDEALS: u32 = 32;

/// What happens when all four players decline the up-card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllPassRule {
    /// Abort the round with `GameError::NoTrumpDeclared`.
    #[default]
    Abort,
    /// Throw the hand in, pass the deal left and deal again.
    Redeal,
}

impl AllPassRule {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abort" => Some(AllPassRule::Abort),
            "redeal" => Some(AllPassRule::Redeal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub target_score: u32,
    pub all_pass: AllPassRule,
    /// Consecutive throw-ins allowed under `AllPassRule::Redeal`.
    pub max_redeals: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            all_pass: AllPassRule::Abort,
            max_redeals: DEFAULT_MAX_REDEALS,
        }
    }
}

/// Everything an observer needs to report one scored round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_number: u32,
    pub dealer: Seat,
    pub trump_suit: Suit,
    pub trump_caller: Seat,
    pub up_card: Card,
    pub discard: Card,
    pub per_trick_winners: Vec<Seat>,
    pub tricks_won: [u8; 2],
    pub winning_team: Team,
    pub points: u32,
    pub euchred: bool,
    pub swept: bool,
    /// Hands thrown in before this one was bid.
    pub redeals: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub scores: [u32; 2],
    pub is_over: bool,
    pub winning_team: Option<Team>,
    pub rounds_played: usize,
}

enum Bid {
    Called(TrumpCall),
    Passed(Card),
}

/// Runs deal, bid, five tricks and scoring for each round, and keeps the
/// running score and round history until a team reaches the target.
#[derive(Debug)]
pub struct GameState {
    seating: Seating,
    deck: Deck,
    rng: StdRng,
    seed: u64,
    config: GameConfig,
    scores: ScoreBoard,
    history: Vec<RoundResult>,
    last_round: Option<RoundState>,
}

impl GameState {
    pub fn new(seating: Seating, config: GameConfig) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(seating, config, seed)
    }

    pub fn with_seed(seating: Seating, config: GameConfig, seed: u64) -> Self {
        Self {
            seating,
            deck: Deck::standard(),
            rng: StdRng::seed_from_u64(seed),
            seed,
            config,
            scores: ScoreBoard::new(),
            history: Vec::new(),
            last_round: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seating(&self) -> &Seating {
        &self.seating
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn history(&self) -> &[RoundResult] {
        &self.history
    }

    /// The most recently scored round, with its full trick history.
    pub fn last_round(&self) -> Option<&RoundState> {
        self.last_round.as_ref()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn winner(&self) -> Option<Team> {
        self.scores.winner(self.config.target_score)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn status(&self) -> GameStatus {
        let winning_team = self.winner();
        GameStatus {
            scores: *self.scores.standings(),
            is_over: winning_team.is_some(),
            winning_team,
            rounds_played: self.history.len(),
        }
    }

    /// Plays one full round and rotates the deal. Any error aborts the
    /// round without touching the score.
    pub fn play_round(&mut self) -> Result<RoundResult, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let mut redeals = 0u32;
        let (mut round, call) = loop {
            let mut round = self.deal()?;
            match self.bid(&mut round)? {
                Bid::Called(call) => break (round, call),
                Bid::Passed(candidate) => match self.config.all_pass {
                    AllPassRule::Redeal if redeals < self.config.max_redeals => {
                        redeals += 1;
                        event!(
                            target: "euchre_core::round",
                            Level::INFO,
                            dealer = %self.seating.dealer(),
                            candidate = %candidate,
                            redeals,
                            "all players passed, deal moves left"
                        );
                        self.seating.rotate_dealer();
                    }
                    _ => {
                        event!(
                            target: "euchre_core::round",
                            Level::WARN,
                            dealer = %self.seating.dealer(),
                            candidate = %candidate,
                            "all players passed, round aborted"
                        );
                        return Err(GameError::NoTrumpDeclared {
                            candidate: candidate.suit,
                        });
                    }
                },
            }
        };

        self.play_tricks(&mut round)?;
        let score = round.finish()?;
        self.scores.apply_round(&score);

        let result = RoundResult {
            round_number: self.history.len() as u32 + 1,
            dealer: round.dealer(),
            trump_suit: call.trump(),
            trump_caller: call.caller,
            up_card: call.up_card,
            discard: call.discard,
            per_trick_winners: round.trick_winners().to_vec(),
            tricks_won: score.tricks,
            winning_team: score.winner,
            points: score.points,
            euchred: score.euchred,
            swept: score.swept,
            redeals,
        };

        event!(
            target: "euchre_core::round",
            Level::INFO,
            round = result.round_number,
            trump = %result.trump_suit,
            caller = %result.trump_caller,
            winner = %result.winning_team,
            points = result.points,
            euchred = result.euchred,
            swept = result.swept,
            north_south = self.scores.score(Team::NorthSouth),
            east_west = self.scores.score(Team::EastWest),
            "round scored"
        );

        for seat in Seat::LOOP {
            self.seating
                .player_mut(seat)
                .strategy_mut()
                .observe_round(seat, &result);
        }

        self.history.push(result.clone());
        self.last_round = Some(round);
        self.seating.rotate_dealer();

        if let Some(team) = self.winner() {
            event!(
                target: "euchre_core::game",
                Level::INFO,
                winner = %team,
                rounds = self.history.len(),
                "game over"
            );
        }

        Ok(result)
    }

    /// Plays rounds until a team reaches the target score.
    pub fn play_to_completion(&mut self) -> Result<GameStatus, GameError> {
        while !self.is_over() {
            self.play_round()?;
        }
        Ok(self.status())
    }

    fn deal(&mut self) -> Result<RoundState, GameError> {
        self.deck.shuffle_in_place(&mut self.rng);
        for seat in self.seating.turn_order() {
            let cards = self.deck.draw(HAND_SIZE)?;
            let hand = Hand::dealt(cards).map_err(|err| GameError::from_hand(seat, err))?;
            self.seating.player_mut(seat).deal_hand(hand);
        }
        debug_assert_eq!(self.deck.remaining(), DECK_SIZE - 4 * HAND_SIZE);
        event!(
            target: "euchre_core::round",
            Level::DEBUG,
            dealer = %self.seating.dealer(),
            remaining = self.deck.remaining(),
            "hands dealt"
        );
        Ok(RoundState::deal(self.seating.dealer()))
    }

    fn bid(&mut self, round: &mut RoundState) -> Result<Bid, GameError> {
        let candidate = self.deck.peek_top().ok_or(GameError::InsufficientCards {
            requested: 1,
            remaining: 0,
        })?;
        let dealer = self.seating.dealer();

        for seat in self.seating.turn_order() {
            if !self
                .seating
                .player_mut(seat)
                .declares_trump(dealer, candidate)?
            {
                continue;
            }

            let up_card = self.deck.take_top()?;
            let discard = self.seating.player_mut(dealer).pick_up(up_card)?;
            let call = TrumpCall {
                caller: seat,
                up_card,
                discard,
            };
            round.declare_trump(call)?;
            event!(
                target: "euchre_core::round",
                Level::DEBUG,
                caller = %seat,
                dealer = %dealer,
                up_card = %up_card,
                discard = %discard,
                "trump declared"
            );
            return Ok(Bid::Called(call));
        }

        Ok(Bid::Passed(candidate))
    }

    fn play_tricks(&mut self, round: &mut RoundState) -> Result<(), GameError> {
        let Some(trump) = round.trump() else {
            return Err(RoundError::WrongPhase {
                action: "play tricks",
                phase: round.phase(),
            }
            .into());
        };

        for seat in Seat::LOOP {
            let held = self
                .seating
                .player(seat)
                .hand()
                .ok_or(GameError::HandNotDealt(seat))?;
            held.ensure_size(HAND_SIZE)
                .map_err(|err| GameError::from_hand(seat, err))?;
        }

        while !round.is_ready_for_scoring() {
            let leader = round.current_trick().leader();
            for seat in self.seating.starting_at(leader) {
                let card = self
                    .seating
                    .player_mut(seat)
                    .play_card(trump, round.current_trick())?;
                let outcome = round.play_card(seat, card)?;
                if let PlayOutcome::TrickCompleted { winner, trick } = outcome {
                    event!(
                        target: "euchre_core::round",
                        Level::DEBUG,
                        trick,
                        winner = %winner,
                        "trick taken"
                    );
                }
            }
        }
        Ok(())
    }
}
