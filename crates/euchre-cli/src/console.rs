use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use euchre_bot::NaivePolicy;
use euchre_core::game::{BidContext, DiscardContext, PlayContext, RoundResult, Strategy};
use euchre_core::model::card::Card;
use euchre_core::model::player::Seat;
use tracing::{Level, event};

/// A person at the terminal. Cards are picked by text (`10S`, `jh`) or by
/// their 1-based position in the printed list. Once input runs out the seat
/// is handed to the naive policy for the rest of the game.
pub struct ConsolePolicy<R, W> {
    input: R,
    output: W,
    fallback: NaivePolicy,
    exhausted: bool,
}

impl ConsolePolicy<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead + Send, W: Write + Send> ConsolePolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            fallback: NaivePolicy::default(),
            exhausted: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        // Terminal write failures are not worth stopping the game for.
        let _ = writeln!(self.output, "{text}");
        let _ = self.output.flush();
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let _ = write!(self.output, "{prompt} ");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.exhausted = true;
                event!(
                    target: "euchre_cli::console",
                    Level::INFO,
                    "console input closed, naive policy takes over"
                );
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn pick_card(&mut self, prompt: &str, choices: &[Card]) -> Option<Card> {
        loop {
            let answer = self.read_line(prompt)?;
            match select_card(&answer, choices) {
                Some(card) => return Some(card),
                None => self.say(&format!("'{answer}' is not one of: {}", list(choices))),
            }
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> Strategy for ConsolePolicy<R, W> {
    fn decide_trump(&mut self, ctx: &BidContext) -> bool {
        self.say(&format!(
            "{}: dealer is {}, up-card is {}",
            ctx.seat, ctx.dealer, ctx.candidate
        ));
        self.say(&format!("Your hand: {}", ctx.hand));
        loop {
            let Some(answer) = self.read_line("Order it up? [y/n]") else {
                return self.fallback.decide_trump(ctx);
            };
            match parse_yes_no(&answer) {
                Some(choice) => return choice,
                None => self.say("Please answer y or n."),
            }
        }
    }

    fn choose_discard(&mut self, ctx: &DiscardContext) -> Card {
        self.say(&format!("{}: trump is {}, discard one card", ctx.seat, ctx.trump));
        self.say(&format!("Your hand: {}", numbered(ctx.hand.cards())));
        match self.pick_card("Discard:", ctx.hand.cards()) {
            Some(card) => card,
            None => self.fallback.choose_discard(ctx),
        }
    }

    fn choose_card_to_play(&mut self, ctx: &PlayContext) -> Card {
        let legal = ctx.legal_plays();
        if legal.len() == 1 {
            self.say(&format!("{}: only {} can be played", ctx.seat, legal[0]));
            return legal[0];
        }

        let table: Vec<String> = ctx
            .trick
            .plays()
            .iter()
            .map(|play| format!("{}:{}", play.seat, play.card))
            .collect();
        if table.is_empty() {
            self.say(&format!("{}: you lead, trump is {}", ctx.seat, ctx.trump));
        } else {
            self.say(&format!(
                "{}: trump is {}, on the table {}",
                ctx.seat,
                ctx.trump,
                table.join(" ")
            ));
        }
        self.say(&format!("Playable: {}", numbered(&legal)));
        match self.pick_card("Play:", &legal) {
            Some(card) => card,
            None => self.fallback.choose_card_to_play(ctx),
        }
    }

    fn observe_round(&mut self, seat: Seat, result: &RoundResult) {
        let outcome = if result.winning_team == seat.team() {
            "your team"
        } else {
            "the opponents"
        };
        self.say(&format!(
            "Round {} went to {} for {} point(s)",
            result.round_number, outcome, result.points
        ));
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "pass" => Some(false),
        _ => None,
    }
}

fn select_card(answer: &str, choices: &[Card]) -> Option<Card> {
    if let Ok(position) = answer.parse::<usize>() {
        if (1..=choices.len()).contains(&position) {
            return Some(choices[position - 1]);
        }
    }
    let card = Card::parse(answer)?;
    choices.contains(&card).then_some(card)
}

fn list(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn numbered(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(idx, card)| format!("{}){}", idx + 1, card))
        .collect::<Vec<_>>()
        .join(" ")
}
