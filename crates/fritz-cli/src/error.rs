//! CLI error types with miette diagnostics.
//!
//! Maps `fritz_api::Error` variants into user-facing errors with actionable
//! help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes of the `fritz` binary.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const REJECTED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the FRITZ!Box at {url}")]
    #[diagnostic(
        code(fritz::connection_failed),
        help(
            "Check the hostname and port (e.g. foobarbaz.myfritz.net:46390).\n\
             For a self-signed certificate on the LAN, try --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(fritz::tls_error),
        help("Check ca_cert in the config file, or use --insecure (-k).")
    )]
    TlsError { message: String },

    #[error("Request to the FRITZ!Box timed out")]
    #[diagnostic(
        code(fritz::timeout),
        help("Increase the timeout with --timeout or check the router's responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login failed: {message}")]
    #[diagnostic(
        code(fritz::auth_failed),
        help("Verify FBUSER / FBPASS (or --user / --pass).")
    )]
    AuthFailed { message: String },

    #[error("No {field} given")]
    #[diagnostic(
        code(fritz::no_credentials),
        help("Pass --{flag}, set {env}, or run interactively to be prompted.")
    )]
    NoCredentials {
        field: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("Unexpected login response: the <{tag}> element is missing")]
    #[diagnostic(code(fritz::login_protocol))]
    LoginProtocol { tag: &'static str },

    // ── Pages ────────────────────────────────────────────────────────
    #[error("Could not read page data: {message}")]
    #[diagnostic(
        code(fritz::page_format),
        help("The firmware may have changed its page markup. Inspect the snapshot in the data directory.")
    )]
    PageFormat { message: String },

    #[error("The FRITZ!Box did not add {mac} (reply: {reply})")]
    #[diagnostic(code(fritz::add_mac_rejected))]
    AddMacRejected { mac: String, reply: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fritz::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(fritz::config))]
    Config(Box<figment::Error>),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            Self::AddMacRejected { .. } => exit_code::REJECTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── fritz_api::Error → CliError mapping ──────────────────────────────

impl From<fritz_api::Error> for CliError {
    fn from(err: fritz_api::Error) -> Self {
        use fritz_api::Error as ApiError;

        match err {
            ApiError::Transport(e) if e.is_timeout() => CliError::Timeout,
            ApiError::Transport(e) => CliError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            ApiError::Tls(message) => CliError::TlsError { message },
            ApiError::InvalidUrl(e) => CliError::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },
            ref e if e.is_auth_failure() => CliError::AuthFailed {
                message: e.to_string(),
            },
            ApiError::MissingTag { tag, body } => {
                tracing::debug!(%body, "login response without <{tag}>");
                CliError::LoginProtocol { tag }
            }
            ApiError::Deserialization { message, body } => {
                tracing::debug!(%body, "undecodable page body");
                CliError::PageFormat { message }
            }
            e @ ApiError::PageFormat { .. } => CliError::PageFormat {
                message: e.to_string(),
            },
            ApiError::InvalidMac { value, reason } => CliError::Validation {
                field: "add_mac".into(),
                reason: format!("'{value}': {reason}"),
            },
            e => CliError::Validation {
                field: "input".into(),
                reason: e.to_string(),
            },
        }
    }
}
