pub mod current;
pub mod forecast;

use reqwest::StatusCode;
use reqwest::blocking::{Client, ClientBuilder};

use std::time::Duration;

/// City used for the startup connectivity probe.
pub const PROBE_CITY: &str = "London";

const REQUEST_TIMEOUT_SECS: u64 = 5;

pub trait WeatherClient {
    /// Fetch the temperature reading for a city, rounded to one decimal place.
    fn fetch(&mut self, city: &str) -> Result<f32, FetchError>;

    /// One cheap lookup for [`PROBE_CITY`] to prove the endpoint is reachable
    /// and the key is accepted.
    fn verify(&mut self) -> Result<(), FetchError>;

    /// Player-facing name of the reading this client produces.
    fn reading_label(&self) -> &'static str;
}

/// Fetch a reading through the client, downgrading any failure to `None`
/// after printing a diagnostic. Nothing below this boundary can end the game.
pub fn fetch_temperature(client: &mut dyn WeatherClient, city: &str) -> Option<f32> {
    match client.fetch(city) {
        Ok(temp) => Some(temp),
        Err(err) => {
            println!("❌ {}", err.describe(city));
            None
        }
    }
}

#[derive(Debug)]
pub enum FetchError {
    /// Connection failure, or the request timeout elapsing.
    Network { err: reqwest::Error },
    /// The endpoint answered with a non-2xx status.
    Http { status: StatusCode },
    /// The response decoded but held no usable reading.
    Data { detail: String },
}

impl FetchError {
    /// A one-line diagnostic for the player.
    pub fn describe(&self, city: &str) -> String {
        match self {
            FetchError::Network { err } => format!("Network error: {err}"),
            FetchError::Http { status } => match *status {
                StatusCode::NOT_FOUND => format!("City '{city}' not found."),
                StatusCode::UNAUTHORIZED => "ERROR (401): API key rejected.".to_string(),
                status => format!("API error ({status})."),
            },
            FetchError::Data { detail } => detail.clone(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network { err }
    }
}

/// Round a raw reading to the one-decimal resolution shown to the player.
pub(crate) fn round_reading(temp: f32) -> f32 {
    (temp * 10.0).round() / 10.0
}

pub(crate) fn http_client() -> Client {
    ClientBuilder::new()
        .gzip(true)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Unable to construct HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_reading_one_decimal() {
        assert_eq!(round_reading(21.349), 21.3);
        assert_eq!(round_reading(21.35), 21.4);
        assert_eq!(round_reading(-3.04), -3.0);
    }

    #[test]
    fn describe_names_the_city_on_404() {
        let err = FetchError::Http {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.describe("Atlantis"), "City 'Atlantis' not found.");
    }

    #[test]
    fn unauthorized_reads_as_a_credential_problem() {
        let err = FetchError::Http {
            status: StatusCode::UNAUTHORIZED,
        };
        assert_eq!(err.describe("London"), "ERROR (401): API key rejected.");
    }
}
