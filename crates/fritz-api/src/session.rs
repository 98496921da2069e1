// Session handling for the router's `login_sid.lua` endpoint.
//
// The router hands out a 16-character session id (SID). An all-zero SID
// means "not logged in" and comes with a challenge that must be answered
// with MD5 over the UTF-16LE bytes of `{challenge}-{password}`. The SID
// obtained that way is kept for the rest of the process.

use std::sync::LazyLock;

use md5::{Digest, Md5};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Session id the router reports while no session is active.
pub const SENTINEL_SID: &str = "0000000000000000";

const LOGIN_PATH: &str = "login_sid.lua";

// Constant patterns; `tag_patterns_compile` builds all three.
#[allow(clippy::expect_used)]
static SID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<SID>(.*)</SID>").expect("valid SID pattern"));
#[allow(clippy::expect_used)]
static CHALLENGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<Challenge>(.*)</Challenge>").expect("valid Challenge pattern")
});
#[allow(clippy::expect_used)]
static BLOCK_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<BlockTime>(.*)</BlockTime>").expect("valid BlockTime pattern")
});

/// Username and password used to answer the login challenge.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// The fields of a `login_sid.lua` document this client cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInfo {
    pub sid: String,
    pub challenge: Option<String>,
    pub block_time: u64,
}

impl LoginInfo {
    /// Parse a `login_sid.lua` response body.
    ///
    /// `<SID>` is mandatory. `<Challenge>` is only required by callers that
    /// have to log in, so it is kept optional here.
    pub fn parse(body: &str) -> Result<Self, Error> {
        let sid = capture(&SID_RE, body).ok_or_else(|| Error::MissingTag {
            tag: "SID",
            body: body.to_owned(),
        })?;
        let challenge = capture(&CHALLENGE_RE, body);
        let block_time = capture(&BLOCK_TIME_RE, body)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        Ok(Self {
            sid,
            challenge,
            block_time,
        })
    }

    /// Whether the SID is the all-zero "not logged in" marker.
    pub fn needs_login(&self) -> bool {
        is_sentinel(&self.sid)
    }
}

fn capture(re: &Regex, body: &str) -> Option<String> {
    re.captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Whether `sid` is exactly the 16-zero sentinel.
pub fn is_sentinel(sid: &str) -> bool {
    sid == SENTINEL_SID
}

/// Answer a login challenge.
///
/// Returns the lowercase hex MD5 digest of `{challenge}-{password}` encoded
/// as UTF-16LE. The value posted to the router is `{challenge}-{digest}`.
pub fn challenge_response(challenge: &str, password: &str) -> String {
    let text = format!("{challenge}-{password}");
    let bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    hex::encode(Md5::digest(&bytes))
}

/// Process-scoped session state.
///
/// Empty until the first [`Session::ensure`]; once a SID is stored it is
/// reused for every later request of the run.
#[derive(Debug, Default)]
pub struct Session {
    sid: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active SID, if one has been obtained.
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Return a usable SID, logging in first if none is held yet.
    ///
    /// Probes `GET /login_sid.lua`. A non-sentinel SID there is taken as an
    /// existing session. Otherwise the challenge is answered via
    /// `POST /login_sid.lua` and the SID from that response is stored.
    pub async fn ensure(
        &mut self,
        http: &reqwest::Client,
        base_url: &Url,
        credentials: &Credentials,
    ) -> Result<&str, Error> {
        let sid = match self.sid.take() {
            Some(sid) => sid,
            None => login(http, base_url, credentials).await?,
        };
        Ok(self.sid.insert(sid).as_str())
    }
}

async fn login(
    http: &reqwest::Client,
    base_url: &Url,
    credentials: &Credentials,
) -> Result<String, Error> {
    let url = base_url.join(LOGIN_PATH)?;

    debug!("probing session at {}", url);
    let body = http.get(url.clone()).send().await?.text().await?;
    let probe = LoginInfo::parse(&body)?;

    if !probe.needs_login() {
        debug!("router reports an active session");
        return Ok(probe.sid);
    }
    if probe.block_time > 0 {
        return Err(Error::LoginBlocked {
            seconds: probe.block_time,
        });
    }

    let challenge = probe.challenge.ok_or_else(|| Error::MissingTag {
        tag: "Challenge",
        body: body.clone(),
    })?;
    let digest = challenge_response(&challenge, credentials.password.expose_secret());
    let response = format!("{challenge}-{digest}");

    debug!(username = %credentials.username, "answering login challenge");
    let body = http
        .post(url)
        .form(&[
            ("response", response.as_str()),
            ("username", credentials.username.as_str()),
        ])
        .send()
        .await?
        .text()
        .await?;
    let answer = LoginInfo::parse(&body)?;

    if answer.needs_login() {
        if answer.block_time > 0 {
            return Err(Error::LoginBlocked {
                seconds: answer.block_time,
            });
        }
        return Err(Error::Authentication {
            message: format!("router rejected the login for user '{}'", credentials.username),
        });
    }

    debug!("login successful");
    Ok(answer.sid)
}
