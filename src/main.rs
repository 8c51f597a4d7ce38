#![forbid(unsafe_code)]

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate rand;
extern crate reqwest;
extern crate serde;
extern crate time;

mod client;
mod config;
mod game;

use crate::client::WeatherClient;
use crate::client::current::CurrentWeatherClient;
use crate::client::forecast::ForecastClient;
use crate::config::Config;
use crate::game::GameState;

use clap::{Arg, Command};
use env_logger::Env;

use std::io;

fn main() {
    let env = Env::default().filter_or("MY_LOG_LEVEL", "info");
    env_logger::init_from_env(env);

    let matches = Command::new("temp-deduction")
        .version("0.1")
        .about("Subtract real city temperatures until the target hits zero")
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .default_value("forecast")
                .value_parser(["current", "forecast"]),
        )
        .arg(Arg::new("config").short('c').long("config"))
        .get_matches();
    let mode = matches.get_one::<String>("mode").unwrap().as_str();
    let config = match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(path),
        None => Config::default(),
    };

    let mut weather: Box<dyn WeatherClient> = match mode {
        "current" => Box::new(CurrentWeatherClient::new(
            config.api_key.clone(),
            config.current_url.clone(),
        )),
        _ => Box::new(ForecastClient::new(
            config.api_key.clone(),
            config.forecast_url.clone(),
        )),
    };

    if !preflight(weather.as_mut()) {
        return;
    }

    let mut state = GameState::with_random_target(&mut rand::thread_rng());
    game::print_banner(&state, weather.reading_label());

    let stdin = io::stdin();
    match game::run(weather.as_mut(), &mut stdin.lock(), &mut state) {
        Some(outcome) => game::report(&state, &outcome),
        None => println!("\nInput ended before the game did. Goodbye!"),
    }
}

/// Startup connectivity check. Any failure is fatal here, unlike in-game
/// fetches which merely re-prompt.
fn preflight(weather: &mut dyn WeatherClient) -> bool {
    println!();
    println!("🔬 Testing API connection...");
    match weather.verify() {
        Ok(()) => {
            println!("✅ API key accepted. Starting the game!");
            true
        }
        Err(err) => {
            warn!("Startup connectivity check failed");
            println!("❌ {}", err.describe(client::PROBE_CITY));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::client::FetchError;
    use reqwest::StatusCode;

    struct StubClient {
        status: Option<StatusCode>,
    }

    impl WeatherClient for StubClient {
        fn fetch(&mut self, _city: &str) -> Result<f32, FetchError> {
            unreachable!("no turns are played before the pre-flight passes")
        }

        fn verify(&mut self) -> Result<(), FetchError> {
            match self.status {
                Some(status) => Err(FetchError::Http { status }),
                None => Ok(()),
            }
        }

        fn reading_label(&self) -> &'static str {
            "Stub temperature"
        }
    }

    #[test]
    fn preflight_aborts_on_unauthorized() {
        let mut weather = StubClient {
            status: Some(StatusCode::UNAUTHORIZED),
        };
        assert!(!preflight(&mut weather));
    }

    #[test]
    fn preflight_aborts_on_any_other_http_failure() {
        let mut weather = StubClient {
            status: Some(StatusCode::INTERNAL_SERVER_ERROR),
        };
        assert!(!preflight(&mut weather));
    }

    #[test]
    fn preflight_passes_on_ok() {
        let mut weather = StubClient { status: None };
        assert!(preflight(&mut weather));
    }
}
