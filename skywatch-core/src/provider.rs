use crate::model::Observation;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The injected fetch capability: anything that can turn a city name into a
/// current-conditions observation.
///
/// The production implementation is [`openweather::OpenWeatherProvider`];
/// tests substitute stubs to drive the success and failure paths.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> anyhow::Result<Observation>;
}
