use crate::error::GameError;
use crate::game::strategy::{BidContext, DiscardContext, PlayContext, Strategy};
use crate::model::card::Card;
use crate::model::hand::{HAND_SIZE, Hand};
use crate::model::player::{Seat, Team};
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use std::collections::HashSet;
use std::fmt;

/// A named seat with its hand and decision strategy. The hand is only
/// changed through this type's own decision methods.
pub struct Player {
    name: String,
    seat: Seat,
    hand: Option<Hand>,
    strategy: Box<dyn Strategy>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("seat", &self.seat)
            .field("hand", &self.hand)
            .finish_non_exhaustive()
    }
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            seat: Seat::North,
            hand: None,
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn partner(&self) -> Seat {
        self.seat.partner()
    }

    pub fn team(&self) -> Team {
        self.seat.team()
    }

    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    pub(crate) fn deal_hand(&mut self, hand: Hand) {
        self.hand = Some(hand);
    }

    pub(crate) fn declares_trump(
        &mut self,
        dealer: Seat,
        candidate: Card,
    ) -> Result<bool, GameError> {
        let hand = self.hand.as_ref().ok_or(GameError::HandNotDealt(self.seat))?;
        let ctx = BidContext {
            seat: self.seat,
            dealer,
            hand,
            candidate,
        };
        Ok(self.strategy.decide_trump(&ctx))
    }

    /// Takes the up-card into the hand and discards one card, returning the
    /// discard. The hand is back to five cards afterwards.
    pub(crate) fn pick_up(&mut self, up_card: Card) -> Result<Card, GameError> {
        let seat = self.seat;
        let hand = self.hand.as_mut().ok_or(GameError::HandNotDealt(seat))?;
        hand.add(up_card);
        let ctx = DiscardContext {
            seat,
            hand,
            trump: up_card.suit,
        };
        let discard = self.strategy.choose_discard(&ctx);
        if !hand.remove(discard) {
            return Err(GameError::CardNotHeld {
                seat,
                card: discard,
            });
        }
        hand.ensure_size(HAND_SIZE)
            .map_err(|err| GameError::from_hand(seat, err))?;
        Ok(discard)
    }

    pub(crate) fn play_card(&mut self, trump: Suit, trick: &Trick) -> Result<Card, GameError> {
        let seat = self.seat;
        let hand = self.hand.as_mut().ok_or(GameError::HandNotDealt(seat))?;
        let lead_suit = trick.lead_suit();
        let ctx = PlayContext {
            seat,
            hand,
            trump,
            lead_suit,
            trick,
        };
        let card = self.strategy.choose_card_to_play(&ctx);
        if !hand.contains(card) {
            return Err(GameError::CardNotHeld { seat, card });
        }
        if let Some(lead) = lead_suit {
            if card.suit != lead && hand.has_suit(lead) {
                return Err(GameError::MustFollowSuit { seat, card, lead });
            }
        }
        hand.remove(card);
        Ok(card)
    }

    pub(crate) fn strategy_mut(&mut self) -> &mut dyn Strategy {
        self.strategy.as_mut()
    }
}

/// Fixed table of four players. Seats 0/2 and 1/3 are partners for the whole
/// game; only the dealer moves.
#[derive(Debug)]
pub struct Seating {
    players: [Player; 4],
    dealer: Seat,
}

impl Seating {
    pub fn new(mut players: [Player; 4]) -> Result<Self, GameError> {
        let mut seen = HashSet::new();
        for (player, seat) in players.iter_mut().zip(Seat::LOOP) {
            if !seen.insert(player.name.clone()) {
                return Err(GameError::DuplicatePlayer(player.name.clone()));
            }
            player.seat = seat;
        }
        Ok(Self {
            players,
            dealer: Seat::North,
        })
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn rotate_dealer(&mut self) {
        self.dealer = self.dealer.next();
    }

    /// Seats in play order for the deal and the bid: left of the dealer first.
    pub fn turn_order(&self) -> [Seat; 4] {
        self.dealer.next().order_from()
    }

    pub fn starting_at(&self, seat: Seat) -> [Seat; 4] {
        seat.order_from()
    }

    pub fn players(&self) -> &[Player; 4] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub(crate) fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    pub fn names(&self) -> [String; 4] {
        std::array::from_fn(|index| self.players[index].name.clone())
    }

    pub fn seat_of(&self, name: &str) -> Result<Seat, GameError> {
        self.players
            .iter()
            .find(|player| player.name == name)
            .map(|player| player.seat)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    pub fn team_of(&self, name: &str) -> Result<Team, GameError> {
        self.seat_of(name).map(Seat::team)
    }

    pub fn partner_of(&self, name: &str) -> Result<&Player, GameError> {
        let seat = self.seat_of(name)?;
        Ok(self.player(seat.partner()))
    }
}
