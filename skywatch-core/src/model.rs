use serde::{Deserialize, Serialize};

/// A single current-conditions reading as consumed by the classifier and
/// the presenter.
///
/// Numeric fields are `NaN` when the provider omitted them; classification
/// rules that reference a missing field are skipped rather than failing the
/// whole observation. `condition_code` is 0 when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Canonical location name echoed by the provider; empty when omitted.
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    /// Provider condition taxonomy (2xx thunderstorm, 5xx rain, 6xx snow).
    pub condition_code: i64,
    pub condition_main: String,
    pub condition_description: String,
}

impl Observation {
    /// Location name with the provider-omitted case filled in, as shown in
    /// alert titles.
    pub fn display_name(&self) -> &str {
        if self.location_name.is_empty() {
            "this location"
        } else {
            &self.location_name
        }
    }
}

/// Whether the surface the widget renders into is currently visible.
///
/// The core treats this as a generic signal; the binary decides what
/// "visible" means for its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}
