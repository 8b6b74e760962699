//! Alert classification.
//!
//! A small rule engine that maps a raw [`Observation`] to a severity level,
//! a title, an icon and a list of advisories. Every rule is evaluated
//! against the same observation; later rules may escalate the severity but
//! never lower it. Titles are last-writer-wins among the rules permitted to
//! write one, so a later rule can retitle an alert without changing its
//! severity.

use chrono::{DateTime, Local};

use crate::model::Observation;

/// Ordered alert severity; `Severe` dominates `Warning` dominates `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Severe => "severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbolic reference to a display asset; the rendering surface decides how
/// each one is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertIcon {
    Sun,
    Thunderstorm,
    Rain,
    Snow,
    /// Clear-sky asset; also what the heat rule points at.
    Clear,
    Wind,
}

impl AlertIcon {
    pub fn asset(&self) -> &'static str {
        match self {
            AlertIcon::Sun => "sun",
            AlertIcon::Thunderstorm => "thunderstorm",
            AlertIcon::Rain => "rain",
            AlertIcon::Snow => "snow",
            AlertIcon::Clear => "clear",
            AlertIcon::Wind => "wind",
        }
    }
}

/// Derived alert panel content.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDescriptor {
    pub severity: Severity,
    pub title: String,
    pub icon: AlertIcon,
    /// Free-text context line (condition and update timestamp).
    pub meta: String,
    /// Ordered advisories; never empty.
    pub messages: Vec<String>,
}

/// Classify an observation into an alert descriptor.
///
/// Pure and deterministic given the observation and `now`, which only feeds
/// the `meta` timestamp. Rules referencing a `NaN` measurement are skipped.
pub fn classify(obs: &Observation, now: DateTime<Local>) -> AlertDescriptor {
    let mut severity = Severity::Info;
    let mut title = "No severe alerts";
    let mut icon = AlertIcon::Sun;
    let mut messages: Vec<String> = Vec::new();

    let code = obs.condition_code;

    // Thunderstorm (2xx).
    if (200..300).contains(&code) {
        severity = Severity::Severe;
        title = "Severe Weather Alert";
        icon = AlertIcon::Thunderstorm;
        messages.push(
            "Thunderstorm detected. Stay indoors and avoid open areas if possible.".to_string(),
        );
    }

    // Rain (5xx).
    if (500..600).contains(&code) {
        severity = severity.max(Severity::Warning);
        title = if severity == Severity::Severe {
            "Severe Weather Alert"
        } else {
            "Weather Warning"
        };
        icon = AlertIcon::Rain;
        messages
            .push("Rain detected. Roads may be slippery — allow extra travel time.".to_string());
    }

    // Snow (6xx). The title write is unconditional, unlike the other
    // warning rules.
    if (600..700).contains(&code) {
        severity = severity.max(Severity::Warning);
        title = "Weather Warning";
        icon = AlertIcon::Snow;
        messages.push("Snow/cold conditions detected. Watch for ice and dress warmly.".to_string());
    }

    // Heat.
    if !obs.temperature_c.is_nan() && obs.temperature_c >= 35.0 {
        if obs.temperature_c >= 40.0 {
            severity = Severity::Severe;
            title = "Severe Heat Alert";
        } else if severity != Severity::Severe {
            severity = Severity::Warning;
            title = "Heat Warning";
        }
        icon = AlertIcon::Clear;
        messages.push(format!(
            "High temperature around {}°C. Stay hydrated and avoid direct sun.",
            obs.temperature_c.round()
        ));
    }

    // Wind.
    if !obs.wind_speed_mps.is_nan() && obs.wind_speed_mps >= 15.0 {
        severity = severity.max(Severity::Warning);
        if severity != Severity::Severe {
            title = "Wind Warning";
        }
        icon = AlertIcon::Wind;
        messages.push(
            "Strong wind expected. Secure loose outdoor items and take care when travelling."
                .to_string(),
        );
    }

    if messages.is_empty() {
        return AlertDescriptor {
            severity: Severity::Info,
            title: "No severe alerts".to_string(),
            icon: AlertIcon::Sun,
            meta: format!("Updated: {}", timestamp(now)),
            messages: vec![format!(
                "No major weather alerts right now for {}.",
                obs.display_name()
            )],
        };
    }

    AlertDescriptor {
        severity,
        title: format!("{title} for {}", obs.display_name()),
        icon,
        meta: format!(
            "Condition: {} ({}) · Updated: {}",
            obs.condition_main,
            obs.condition_description,
            timestamp(now)
        ),
        messages,
    }
}

fn timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}
