use crate::client::{self, WeatherClient};

use rand::Rng;

use std::io::{self, BufRead, Write};

pub const MAX_TURNS: u8 = 5;
const TARGET_MIN: i32 = 50;
const TARGET_MAX: i32 = 150;

/// Running state of one game.
#[derive(Debug)]
pub struct GameState {
    target: f32,
    turns_remaining: u8,
    history: Vec<Turn>,
}

/// One consumed turn, kept for the end-of-game recap.
#[derive(Debug)]
pub struct Turn {
    pub city: String,
    pub reading: f32,
    pub target_after: f32,
}

/// How a finished game ended. The payload is the leftover target value.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Landed on exactly zero.
    Won,
    /// Went below zero; the leftover is a failing score.
    Overshot(f32),
    /// All turns used with the target still positive; lower is better.
    TurnsExhausted(f32),
}

impl GameState {
    pub fn new(target: f32) -> GameState {
        GameState {
            target,
            turns_remaining: MAX_TURNS,
            history: Vec::new(),
        }
    }

    /// Start a game with a whole-degree target drawn uniformly from
    /// [TARGET_MIN, TARGET_MAX].
    pub fn with_random_target<R: Rng>(rng: &mut R) -> GameState {
        GameState::new(rng.gen_range(TARGET_MIN..=TARGET_MAX) as f32)
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn turns_remaining(&self) -> u8 {
        self.turns_remaining
    }

    pub fn turn_number(&self) -> u8 {
        MAX_TURNS - self.turns_remaining + 1
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Subtract a reading, consuming one turn, and evaluate the transition
    /// rules in order: exact zero wins even with turns left, below zero
    /// overshoots, out of turns exhausts, anything else keeps playing.
    pub fn apply_reading(&mut self, city: &str, reading: f32) -> Option<Outcome> {
        debug_assert!(self.turns_remaining > 0, "reading applied after game end");
        self.target -= reading;
        self.turns_remaining -= 1;
        self.history.push(Turn {
            city: city.to_string(),
            reading,
            target_after: self.target,
        });

        if self.target == 0.0 {
            Some(Outcome::Won)
        } else if self.target < 0.0 {
            Some(Outcome::Overshot(self.target))
        } else if self.turns_remaining == 0 {
            Some(Outcome::TurnsExhausted(self.target))
        } else {
            None
        }
    }
}

pub fn print_banner(state: &GameState, reading_label: &str) {
    println!();
    println!("{}", "=".repeat(50));
    println!("🌡️ TEMPERATURE DEDUCTION GAME 🌡️");
    println!("GOAL: end as close to 0°C as you can within {MAX_TURNS} turns.");
    println!("Subtracted each turn: {reading_label}.");
    println!("{}", "=".repeat(50));
    println!("THE STARTING TARGET IS: {:.0}°C", state.target());
    println!("{}", "=".repeat(50));
}

/// Drive the interactive loop until the game reaches a terminal state.
///
/// Blank input and failed fetches re-prompt without consuming a turn.
/// Returns `None` only if `input` runs out before the game ends.
pub fn run(
    weather: &mut dyn WeatherClient,
    input: &mut dyn BufRead,
    state: &mut GameState,
) -> Option<Outcome> {
    loop {
        println!();
        println!("--- TURN {} of {MAX_TURNS} ---", state.turn_number());
        println!("Still to subtract: {:.1}°C", state.target());

        print!("Enter a city (eg 'Madrid', 'Cape Town'): ");
        io::stdout().flush().expect("Unable to flush stdout");
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        let city = line.trim();
        if city.is_empty() {
            continue;
        }

        println!("🌍 Fetching weather data for {city}...");
        let Some(reading) = client::fetch_temperature(weather, city) else {
            continue;
        };

        let before = state.target();
        let outcome = state.apply_reading(city, reading);

        println!();
        println!("City: {city}");
        println!("{}: {reading:.1}°C", weather.reading_label());
        println!("Sum: {before:.1}°C - {reading:.1}°C = {:.1}°C", state.target());

        match outcome {
            Some(Outcome::Won) => {
                println!();
                println!("🎉 PERFECT SCORE! Exactly 0.0°C! 🎉");
                return outcome;
            }
            Some(Outcome::Overshot(left)) => {
                println!();
                println!("🚨 OOPS! Below zero: {left:.1}°C.");
                return outcome;
            }
            Some(Outcome::TurnsExhausted(_)) => return outcome,
            None => {}
        }
    }
}

pub fn report(state: &GameState, outcome: &Outcome) {
    println!();
    println!("{}", "=".repeat(50));
    match outcome {
        Outcome::Won => println!("🏆 YOU WON!"),
        Outcome::TurnsExhausted(left) => {
            println!("Final score: {left:.1}°C left over (lower is better).")
        }
        Outcome::Overshot(left) => println!("Final score: {left:.1}°C (below zero)."),
    }

    if !state.history().is_empty() {
        println!();
        println!("Turns played:");
        for (index, turn) in state.history().iter().enumerate() {
            println!(
                "  {}. {} ({:.1}°C), {:.1}°C left",
                index + 1,
                turn.city,
                turn.reading,
                turn.target_after
            );
        }
    }
}
