//! Core library for the `skywatch` weather widget.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather provider behind an injectable fetch trait
//! - Alert classification (observation -> severity, title, advisories)
//! - Presentation fragments and the rendering-surface seam
//! - The auto-refresh scheduler and contact form validation
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries
//! or services.

pub mod alert;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod model;
pub mod present;
pub mod provider;
pub mod scheduler;
pub mod session;

pub use alert::{AlertDescriptor, AlertIcon, Severity, classify};
pub use client::{RenderSurface, WeatherClient};
pub use config::Config;
pub use contact::{ContactForm, FieldErrors, validate};
pub use error::FetchError;
pub use model::{Observation, Visibility};
pub use present::WeatherCard;
pub use provider::WeatherProvider;
pub use scheduler::{DEFAULT_REFRESH_PERIOD, RefreshScheduler};
pub use session::SessionState;
