use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::Observation;

use super::WeatherProvider;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<Observation> {
        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        if !status.is_success() {
            // 404, 401 and 5xx all collapse into the same lookup failure.
            return Err(anyhow!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        Ok(parsed.into_observation())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<Observation> {
        tracing::debug!(city, "querying OpenWeather");
        self.fetch_current(city).await
    }
}

// Every field is optional on the wire; absences map to NaN / 0 / empty
// strings so one sparse response never aborts the lookup.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWeather {
    id: Option<i64>,
    main: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwCurrentResponse {
    name: Option<String>,
    main: Option<OwMain>,
    weather: Option<Vec<OwWeather>>,
    wind: Option<OwWind>,
}

impl OwCurrentResponse {
    fn into_observation(self) -> Observation {
        let main = self.main.unwrap_or_default();
        let wind = self.wind.unwrap_or_default();
        let condition = self
            .weather
            .and_then(|mut w| if w.is_empty() { None } else { Some(w.remove(0)) })
            .unwrap_or_default();

        Observation {
            location_name: self.name.unwrap_or_default(),
            temperature_c: main.temp.unwrap_or(f64::NAN),
            feels_like_c: main.feels_like.unwrap_or(f64::NAN),
            humidity_pct: main.humidity.unwrap_or(f64::NAN),
            wind_speed_mps: wind.speed.unwrap_or(f64::NAN),
            condition_code: condition.id.unwrap_or(0),
            condition_main: condition.main.unwrap_or_default(),
            condition_description: condition.description.unwrap_or_default(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Cut on a char boundary; provider error bodies are not always ASCII.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response_maps_onto_observation() {
        let body = r#"{
            "name": "Porto",
            "main": {"temp": 23.4, "feels_like": 24.1, "humidity": 61},
            "weather": [{"id": 501, "main": "Rain", "description": "moderate rain"}],
            "wind": {"speed": 7.2}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("parse");
        let obs = parsed.into_observation();

        assert_eq!(obs.location_name, "Porto");
        assert_eq!(obs.temperature_c, 23.4);
        assert_eq!(obs.feels_like_c, 24.1);
        assert_eq!(obs.humidity_pct, 61.0);
        assert_eq!(obs.wind_speed_mps, 7.2);
        assert_eq!(obs.condition_code, 501);
        assert_eq!(obs.condition_main, "Rain");
        assert_eq!(obs.condition_description, "moderate rain");
    }

    #[test]
    fn sparse_response_defaults_instead_of_failing() {
        let parsed: OwCurrentResponse = serde_json::from_str("{}").expect("parse");
        let obs = parsed.into_observation();

        assert!(obs.location_name.is_empty());
        assert!(obs.temperature_c.is_nan());
        assert!(obs.feels_like_c.is_nan());
        assert!(obs.humidity_pct.is_nan());
        assert!(obs.wind_speed_mps.is_nan());
        assert_eq!(obs.condition_code, 0);
        assert!(obs.condition_main.is_empty());
        assert!(obs.condition_description.is_empty());
    }

    #[test]
    fn empty_weather_array_is_tolerated() {
        let body = r#"{"name": "Porto", "weather": []}"#;
        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("parse");
        let obs = parsed.into_observation();

        assert_eq!(obs.condition_code, 0);
        assert!(obs.condition_description.is_empty());
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn multibyte_error_bodies_truncate_on_a_char_boundary() {
        // 3 bytes per char, so the 200-byte cutoff lands mid-character.
        let body = "€".repeat(100);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.strip_suffix("...").unwrap(), "€".repeat(66));
    }
}
