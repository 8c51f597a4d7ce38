use crate::client::{FetchError, PROBE_CITY, WeatherClient, http_client, round_reading};

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

/// Client for the current-weather endpoint: one reading per city, right now.
pub struct CurrentWeatherClient {
    api_key: String,
    url: String,
    http_client: Client,
}

impl CurrentWeatherClient {
    pub fn new(api_key: String, url: String) -> CurrentWeatherClient {
        CurrentWeatherClient {
            api_key,
            url,
            http_client: http_client(),
        }
    }

    /// Get the current conditions for a city straight from the API
    fn get_from_api(&self, city: &str) -> Result<CurrentResponse, FetchError> {
        let req = self
            .http_client
            .get(&self.url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .build()
            .unwrap_or_else(|_| panic!("Unable to construct request for city {city}"));
        let url = req.url().clone();
        info!("Calling current-weather endpoint: {url}");
        let res = self.http_client.execute(req)?;
        match res.status() {
            StatusCode::OK => res.json().map_err(|err| FetchError::Data {
                detail: format!("Unable to decode response: {err}"),
            }),
            status => Err(FetchError::Http { status }),
        }
    }
}

impl WeatherClient for CurrentWeatherClient {
    fn fetch(&mut self, city: &str) -> Result<f32, FetchError> {
        let data = self.get_from_api(city)?;
        Ok(round_reading(data.main.temp))
    }

    fn verify(&mut self) -> Result<(), FetchError> {
        self.get_from_api(PROBE_CITY).map(|_| ())
    }

    fn reading_label(&self) -> &'static str {
        "Current temperature"
    }
}

/// API responses consist of a UTF-8-encoded, JSON-formatted object.
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: CurrentMain,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn decodes_the_consumed_fields() {
        let body = json!({
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds"}],
            "main": {
                "temp": 12.34,
                "feels_like": 11.5,
                "temp_min": 10.9,
                "temp_max": 13.6,
                "pressure": 1012,
                "humidity": 81
            },
            "name": "London",
            "cod": 200
        });
        let response: CurrentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(round_reading(response.main.temp), 12.3);
    }
}
