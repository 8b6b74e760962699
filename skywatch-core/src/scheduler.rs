//! Periodic refresh of the last looked-up location, plus the
//! visibility-triggered refresh.

use std::{sync::Mutex, time::Duration};

use tokio::{
    sync::watch,
    task::{AbortHandle, JoinHandle},
    time::MissedTickBehavior,
};

use crate::{client::WeatherClient, model::Visibility};

/// How often the widget re-queries the last location.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(10 * 60);

/// Re-runs the last lookup on a fixed interval and whenever the surface
/// becomes visible. The two triggers are independent and may both fire.
///
/// `start` follows a replace-don't-append discipline on the timer: arming a
/// new timer always cancels the previous one, so at most one is ever live.
pub struct RefreshScheduler {
    client: WeatherClient,
    period: Duration,
    timer: Mutex<Option<AbortHandle>>,
}

impl RefreshScheduler {
    pub fn new(client: WeatherClient, period: Duration) -> Self {
        Self {
            client,
            period,
            timer: Mutex::new(None),
        }
    }

    /// Arm the repeating refresh timer, cancelling any previous one.
    ///
    /// Each tick re-fetches the last recorded location and is a no-op while
    /// none has been recorded yet. The first refresh happens one full
    /// period after arming.
    pub fn start(&self) {
        let client = self.client.clone();
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Some(city) = client.session().last_location() {
                    // Failures already degraded to a rendered error state.
                    let _ = client.fetch_weather(&city).await;
                }
            }
        });

        let mut guard = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = guard.replace(task.abort_handle()) {
            previous.abort();
        }
    }

    /// Register the visibility observer. Called once at startup; every
    /// transition to [`Visibility::Visible`] re-fetches the last location.
    pub fn observe_visibility(&self, mut rx: watch::Receiver<Visibility>) -> JoinHandle<()> {
        let client = self.client.clone();

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                if *rx.borrow_and_update() != Visibility::Visible {
                    continue;
                }
                if let Some(city) = client.session().last_location() {
                    let _ = client.fetch_weather(&city).await;
                }
            }
        })
    }

    /// Cancel the timer, if armed. Idempotent.
    pub fn dispose(&self) {
        let mut guard = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = guard.take() {
            handle.abort();
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.dispose();
    }
}
