use crate::client::{FetchError, PROBE_CITY, WeatherClient, http_client, round_reading};

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// Client for the forecast endpoint: the highest temperature among today's
/// 3-hour forecast blocks for a city.
pub struct ForecastClient {
    api_key: String,
    url: String,
    http_client: Client,
}

impl ForecastClient {
    pub fn new(api_key: String, url: String) -> ForecastClient {
        ForecastClient {
            api_key,
            url,
            http_client: http_client(),
        }
    }

    /// Get the forecast list for a city straight from the API
    fn get_from_api(&self, city: &str, cnt: Option<u8>) -> Result<ForecastResponse, FetchError> {
        let mut builder = self.http_client.get(&self.url).query(&[
            ("q", city),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]);
        if let Some(cnt) = cnt {
            builder = builder.query(&[("cnt", cnt.to_string())]);
        }
        let req = builder
            .build()
            .unwrap_or_else(|_| panic!("Unable to construct request for city {city}"));
        let url = req.url().clone();
        info!("Calling forecast endpoint: {url}");
        let res = self.http_client.execute(req)?;
        match res.status() {
            StatusCode::OK => res.json().map_err(|err| FetchError::Data {
                detail: format!("Unable to decode response: {err}"),
            }),
            status => Err(FetchError::Http { status }),
        }
    }
}

impl WeatherClient for ForecastClient {
    fn fetch(&mut self, city: &str) -> Result<f32, FetchError> {
        let data = self.get_from_api(city, None)?;
        let max = todays_max(&data.list).ok_or_else(|| FetchError::Data {
            detail: format!("No forecast data for today for {city}."),
        })?;
        Ok(round_reading(max))
    }

    fn verify(&mut self) -> Result<(), FetchError> {
        // one entry is enough to prove the key works
        self.get_from_api(PROBE_CITY, Some(1)).map(|_| ())
    }

    fn reading_label(&self) -> &'static str {
        "Highest temperature today"
    }
}

/// Maximum `temp_max` among the leading run of entries dated like the first
/// one. Entries arrive in chronological order, so the scan stops at the
/// first entry from a later date.
fn todays_max(entries: &[ForecastEntry]) -> Option<f32> {
    let today = entries.first()?.forecast_date()?;
    let mut max_temp: Option<f32> = None;
    for entry in entries {
        if entry.forecast_date()? != today {
            break;
        }
        let temp = entry.main.temp_max;
        max_temp = Some(max_temp.map_or(temp, |max| max.max(temp)));
    }
    max_temp
}

/// API responses consist of a UTF-8-encoded, JSON-formatted object.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

/// One 3-hour forecast block.
#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: ForecastMain,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp_max: f32,
}

impl ForecastEntry {
    /// Date portion of the entry's `dt_txt` timestamp ("2023-10-25 15:00:00").
    fn forecast_date(&self) -> Option<Date> {
        PrimitiveDateTime::parse(
            &self.dt_txt,
            &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
        .ok()
        .map(|datetime| datetime.date())
    }
}
