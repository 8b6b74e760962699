//! Lookup orchestration: credential check, remote fetch, classification
//! and presentation.

use std::sync::Arc;

use chrono::Local;

use crate::{
    alert::{self, AlertDescriptor},
    config::Config,
    error::FetchError,
    present::{self, WeatherCard},
    provider::{WeatherProvider, openweather::OpenWeatherProvider},
    session::SessionState,
};

/// Where fragments end up. The core only describes what to show; an
/// implementation materializes the three regions (weather card, alert card)
/// onto its surface.
pub trait RenderSurface: Send + Sync {
    fn render_weather(&self, card: &WeatherCard);
    /// `None` clears the alert region.
    fn render_alert(&self, alert: Option<&AlertDescriptor>);
}

/// Drives one weather lookup end to end.
///
/// In-flight lookups are not serialized or cancelled; when two overlap, the
/// last one to resolve owns the rendered state.
#[derive(Clone)]
pub struct WeatherClient {
    provider: Option<Arc<dyn WeatherProvider>>,
    surface: Arc<dyn RenderSurface>,
    session: Arc<SessionState>,
}

impl WeatherClient {
    /// Build a client against OpenWeather using the configured credential.
    /// With no credential every lookup short-circuits to the
    /// missing-credential card.
    pub fn from_config(
        config: &Config,
        surface: Arc<dyn RenderSurface>,
        session: Arc<SessionState>,
    ) -> Self {
        let provider = config.api_key().map(|key| {
            Arc::new(OpenWeatherProvider::new(key.to_owned())) as Arc<dyn WeatherProvider>
        });

        Self {
            provider,
            surface,
            session,
        }
    }

    /// Build a client around an explicit provider.
    pub fn with_provider(
        provider: Arc<dyn WeatherProvider>,
        surface: Arc<dyn RenderSurface>,
        session: Arc<SessionState>,
    ) -> Self {
        Self {
            provider: Some(provider),
            surface,
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Look up `city` and render the outcome.
    ///
    /// Renders the loading card, then either the current-conditions card
    /// plus its alert, or the not-found card naming the requested text. A
    /// failed lookup leaves the recorded last location untouched.
    pub async fn fetch_weather(&self, city: &str) -> Result<(), FetchError> {
        let Some(provider) = self.provider.clone() else {
            self.surface.render_weather(&WeatherCard::MissingCredential);
            self.surface.render_alert(None);
            return Err(FetchError::MissingCredential);
        };

        self.surface.render_weather(&present::loading());
        self.surface.render_alert(None);

        match provider.current(city).await {
            Ok(obs) => {
                let canonical = if obs.location_name.is_empty() {
                    city
                } else {
                    obs.location_name.as_str()
                };
                self.session.record(canonical);

                self.surface.render_weather(&present::current(&obs));
                let alert = alert::classify(&obs, Local::now());
                self.surface.render_alert(Some(&alert));
                Ok(())
            }
            Err(err) => {
                tracing::warn!("weather lookup for {city:?} failed: {err:#}");
                self.surface.render_weather(&present::not_found(city));
                self.surface.render_alert(None);
                Err(FetchError::Remote(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Observation;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Rendered {
        Weather(WeatherCard),
        Alert(Option<AlertDescriptor>),
    }

    #[derive(Default)]
    struct RecordingSurface {
        events: Mutex<Vec<Rendered>>,
    }

    impl RecordingSurface {
        fn events(&self) -> Vec<Rendered> {
            self.events.lock().expect("lock").clone()
        }
    }

    impl RenderSurface for RecordingSurface {
        fn render_weather(&self, card: &WeatherCard) {
            self.events
                .lock()
                .expect("lock")
                .push(Rendered::Weather(card.clone()));
        }

        fn render_alert(&self, alert: Option<&AlertDescriptor>) {
            self.events
                .lock()
                .expect("lock")
                .push(Rendered::Alert(alert.cloned()));
        }
    }

    #[derive(Debug)]
    enum StubProvider {
        Succeed(Observation),
        Fail,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, _city: &str) -> anyhow::Result<Observation> {
            match self {
                StubProvider::Succeed(obs) => Ok(obs.clone()),
                StubProvider::Fail => Err(anyhow!("status 404: city not found")),
            }
        }
    }

    fn stormy(name: &str) -> Observation {
        Observation {
            location_name: name.to_string(),
            temperature_c: 18.0,
            feels_like_c: 17.0,
            humidity_pct: 90.0,
            wind_speed_mps: 8.0,
            condition_code: 211,
            condition_main: "Thunderstorm".to_string(),
            condition_description: "thunderstorm".to_string(),
        }
    }

    fn client_with(
        provider: StubProvider,
    ) -> (WeatherClient, Arc<RecordingSurface>, Arc<SessionState>) {
        let surface = Arc::new(RecordingSurface::default());
        let session = Arc::new(SessionState::new());
        let client =
            WeatherClient::with_provider(Arc::new(provider), surface.clone(), session.clone());
        (client, surface, session)
    }

    #[tokio::test]
    async fn success_renders_loading_then_card_and_alert() {
        let (client, surface, session) = client_with(StubProvider::Succeed(stormy("Kyiv")));

        client.fetch_weather("kyiv").await.expect("fetch");

        let events = surface.events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], Rendered::Weather(WeatherCard::Loading));
        assert_eq!(events[1], Rendered::Alert(None));
        assert!(matches!(
            &events[2],
            Rendered::Weather(WeatherCard::Current { location, .. }) if location == "Kyiv"
        ));
        assert!(matches!(
            &events[3],
            Rendered::Alert(Some(alert)) if alert.severity == crate::alert::Severity::Severe
        ));

        // Canonical provider name wins over the typed query.
        assert_eq!(session.last_location(), Some("Kyiv".to_string()));
    }

    #[tokio::test]
    async fn canonical_name_falls_back_to_the_query() {
        let (client, _surface, session) = client_with(StubProvider::Succeed(stormy("")));

        client.fetch_weather("kyiv").await.expect("fetch");

        assert_eq!(session.last_location(), Some("kyiv".to_string()));
    }

    #[tokio::test]
    async fn failure_keeps_last_location_and_names_the_query() {
        let (client, surface, session) = client_with(StubProvider::Fail);
        session.record("Odesa");

        let err = client.fetch_weather("Atlntis").await.unwrap_err();
        assert!(matches!(err, FetchError::Remote(_)));

        let events = surface.events();
        assert_eq!(
            events[2],
            Rendered::Weather(WeatherCard::NotFound {
                query: "Atlntis".to_string()
            })
        );
        assert_eq!(events[3], Rendered::Alert(None));
        assert_eq!(session.last_location(), Some("Odesa".to_string()));
    }

    #[tokio::test]
    async fn missing_credential_short_circuits_without_a_request() {
        let surface = Arc::new(RecordingSurface::default());
        let session = Arc::new(SessionState::new());
        let client =
            WeatherClient::from_config(&Config::default(), surface.clone(), session.clone());

        let err = client.fetch_weather("Kyiv").await.unwrap_err();
        assert!(matches!(err, FetchError::MissingCredential));

        let events = surface.events();
        assert_eq!(
            events,
            vec![
                Rendered::Weather(WeatherCard::MissingCredential),
                Rendered::Alert(None),
            ]
        );
        assert_eq!(session.last_location(), None);
    }
}
