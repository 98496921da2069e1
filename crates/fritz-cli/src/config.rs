//! CLI configuration: credential resolution and runtime settings.
//!
//! Credentials come from flags, then `FBHOST`/`FBUSER`/`FBPASS` (which a
//! `.env` file may supply at startup), then an interactive prompt, and are
//! never written anywhere. Non-secret settings come from an optional TOML
//! file plus `FRITZ_*` variables, overridden by flags.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use fritz_api::{Credentials, TlsMode, TransportConfig};

use crate::cli::{GlobalOpts, LoginOpts};
use crate::error::CliError;

// ── TOML config ──────────────────────────────────────────────────────

/// Settings file contents. Credentials are never read from it.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Root directory for daily page snapshots.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Write page snapshots at all.
    #[serde(default = "default_snapshots")]
    pub snapshots: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,

    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            snapshots: default_snapshots(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            lang: default_lang(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_snapshots() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}
fn default_lang() -> String {
    fritz_api::page::DEFAULT_LANG.into()
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fritz-cli", "fritz-cli").map_or_else(
        || PathBuf::from(".fritz-cli").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load the settings from defaults, the config file and `FRITZ_*` env vars.
pub fn load_config() -> Result<Config, CliError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("FRITZ_"))
        .extract()?;
    Ok(config)
}

// ── Runtime settings ─────────────────────────────────────────────────

/// Effective settings after applying flag overrides.
#[derive(Debug)]
pub struct Settings {
    pub snapshot_dir: Option<PathBuf>,
    pub transport: TransportConfig,
    pub lang: String,
}

pub fn resolve_settings(config: Config, global: &GlobalOpts) -> Settings {
    let tls = if global.insecure || config.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca_path) = config.ca_cert {
        TlsMode::CustomCa(ca_path)
    } else {
        TlsMode::System
    };

    let snapshot_dir = (config.snapshots && !global.no_snapshots)
        .then(|| global.data_dir.clone().unwrap_or(config.data_dir));

    Settings {
        snapshot_dir,
        transport: TransportConfig {
            tls,
            timeout: Duration::from_secs(global.timeout.unwrap_or(config.timeout)),
        },
        lang: global.lang.clone().unwrap_or(config.lang),
    }
}

// ── Credentials ──────────────────────────────────────────────────────

/// Interactive fallback for credentials nobody supplied.
pub trait Prompt {
    fn text(&self, prompt: &str) -> Option<String>;
    fn secret(&self, prompt: &str) -> Option<String>;
}

/// Terminal prompts; the password is read without echo.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn text(&self, prompt: &str) -> Option<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .ok()
    }

    fn secret(&self, prompt: &str) -> Option<String> {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .ok()
    }
}

/// Router address plus login.
#[derive(Debug)]
pub struct Login {
    pub host: String,
    pub credentials: Credentials,
}

struct Field {
    name: &'static str,
    flag: &'static str,
    env: &'static str,
    prompt: &'static str,
    secret: bool,
}

const HOST: Field = Field {
    name: "hostname",
    flag: "host",
    env: "FBHOST",
    prompt: "Hostname including port",
    secret: false,
};
const USER: Field = Field {
    name: "username",
    flag: "user",
    env: "FBUSER",
    prompt: "Username",
    secret: false,
};
const PASS: Field = Field {
    name: "password",
    flag: "pass",
    env: "FBPASS",
    prompt: "Password",
    secret: true,
};

/// Resolve host, user and password from flags, the process environment
/// and the terminal.
pub fn resolve_login(opts: &LoginOpts) -> Result<Login, CliError> {
    resolve_login_with(opts, |name| std::env::var(name).ok(), &TerminalPrompt)
}

/// Resolution order per field: flag, env var, prompt. Empty values fall
/// through; an empty result aborts before the next field is asked for.
pub fn resolve_login_with(
    opts: &LoginOpts,
    env: impl Fn(&str) -> Option<String>,
    prompt: &dyn Prompt,
) -> Result<Login, CliError> {
    let host = resolve_field(&HOST, opts.host.as_deref(), &env, prompt)?;
    let username = resolve_field(&USER, opts.user.as_deref(), &env, prompt)?;
    let password = resolve_field(&PASS, opts.pass.as_deref(), &env, prompt)?;
    Ok(Login {
        host,
        credentials: Credentials::new(username, SecretString::from(password)),
    })
}

fn resolve_field(
    field: &Field,
    flag: Option<&str>,
    env: &impl Fn(&str) -> Option<String>,
    prompt: &dyn Prompt,
) -> Result<String, CliError> {
    flag.map(str::to_owned)
        .filter(|v| !v.is_empty())
        .or_else(|| env(field.env).filter(|v| !v.is_empty()))
        .or_else(|| {
            if field.secret {
                prompt.secret(field.prompt)
            } else {
                prompt.text(field.prompt)
            }
        })
        .filter(|v| !v.is_empty())
        .ok_or(CliError::NoCredentials {
            field: field.name,
            flag: field.flag,
            env: field.env,
        })
}
