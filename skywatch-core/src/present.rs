//! Pure formatting of observations and failure states into display
//! fragments. The fragments carry no markup; a [`RenderSurface`]
//! implementation materializes them onto whatever surface hosts the widget.
//!
//! [`RenderSurface`]: crate::client::RenderSurface

use crate::model::Observation;

/// One of the weather result card's states.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherCard {
    Loading,
    Current {
        location: String,
        /// Rounded to the nearest integer; `NaN` passes through when the
        /// provider omitted the reading.
        temperature_c: f64,
        feels_like_c: f64,
        humidity_pct: f64,
        description: String,
    },
    /// Lookup failed; names the city text the user asked for, not a
    /// canonical name.
    NotFound { query: String },
    MissingCredential,
}

pub fn loading() -> WeatherCard {
    WeatherCard::Loading
}

pub fn current(obs: &Observation) -> WeatherCard {
    WeatherCard::Current {
        location: obs.location_name.clone(),
        temperature_c: obs.temperature_c.round(),
        feels_like_c: obs.feels_like_c.round(),
        humidity_pct: obs.humidity_pct,
        description: obs.condition_description.clone(),
    }
}

pub fn not_found(query: &str) -> WeatherCard {
    WeatherCard::NotFound {
        query: query.to_string(),
    }
}
