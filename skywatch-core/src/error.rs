use thiserror::Error;

/// Failure modes of a weather lookup.
///
/// `MissingCredential` is detected before any network traffic and asks the
/// user to reconfigure. `Remote` covers everything else uniformly: non-2xx
/// status, transport failure, and malformed or incomplete response bodies.
/// The presentation layer does not distinguish between those causes.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no API key configured; run `skywatch configure` first")]
    MissingCredential,

    // anyhow::Error is not a std Error, so it is carried by value rather
    // than as a source.
    #[error("weather lookup failed: {0:#}")]
    Remote(anyhow::Error),
}
