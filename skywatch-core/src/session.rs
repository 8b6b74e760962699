use std::sync::Mutex;

/// The last successfully looked-up location, shared between the client
/// (which records it) and the refresh scheduler (which re-queries it).
///
/// Empty until the first successful fetch; never cleared afterwards. Failed
/// lookups leave it untouched. All writes happen from whichever task is
/// resolving a fetch, so a plain mutex is enough.
#[derive(Debug, Default)]
pub struct SessionState {
    last_location: Mutex<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the canonical name of a successful lookup.
    pub fn record(&self, location: &str) {
        let mut guard = self.last_location.lock().unwrap_or_else(|e| e.into_inner());
        location.clone_into(&mut *guard);
    }

    /// Returns the last recorded location, or `None` before any lookup has
    /// succeeded.
    pub fn last_location(&self) -> Option<String> {
        let guard = self.last_location.lock().unwrap_or_else(|e| e.into_inner());
        if guard.is_empty() {
            None
        } else {
            Some(guard.clone())
        }
    }
}
