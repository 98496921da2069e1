use thiserror::Error;

/// Top-level error type for the `fritz-api` crate.
///
/// Covers every failure mode of a client run: transport, the
/// `login_sid.lua` handshake, `data.lua` payload decoding, and the
/// counter-page literal extraction. `fritz-cli` maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login was rejected (the router answered with the sentinel SID again).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The router refuses logins for a while after repeated failures.
    #[error("Login blocked by the router for another {seconds}s")]
    LoginBlocked { seconds: u64 },

    /// An expected `<SID>` / `<Challenge>` tag was absent from a login response.
    #[error("Login response is missing the <{tag}> element")]
    MissingTag { tag: &'static str, body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A page did not have the markup this client knows how to read.
    #[error("Unexpected format of page '{page}': {reason}")]
    PageFormat { page: String, reason: String },

    // ── Input ───────────────────────────────────────────────────────
    /// A MAC address that is not six colon-separated hex octets.
    #[error("Invalid MAC address '{value}': {reason}")]
    InvalidMac { value: String, reason: String },
}

impl Error {
    /// Returns `true` if logging in again with other credentials (or later)
    /// might resolve this error.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::LoginBlocked { .. })
    }
}
