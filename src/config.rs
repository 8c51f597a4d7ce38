use serde::Deserialize;

use std::fs;

const DEFAULT_API_KEY: &str = "b10dc274a5e56f6f6fc4fe68a7987217";
const DEFAULT_CURRENT_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const DEFAULT_FORECAST_URL: &str = "http://api.openweathermap.org/data/2.5/forecast";

#[derive(Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub current_url: String,
    pub forecast_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: DEFAULT_API_KEY.to_string(),
            current_url: DEFAULT_CURRENT_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

impl Config {
    /// Load a config file, filling unset fields from the built-in defaults.
    pub fn from_file(path: &str) -> Self {
        let conf_str = fs::read_to_string(path).expect("Unable to find config file");
        let conf: Config = serde_json::from_str(&conf_str).expect("Unable to parse config");
        conf
    }
}
