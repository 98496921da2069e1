// Router data client
//
// Wraps `reqwest::Client` with the session handshake, `data.lua` form
// encoding, payload decoding and page snapshots. Typed page endpoints are
// implemented as inherent methods in `pages.rs` to keep this module
// focused on transport mechanics.

use std::time::Instant;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::models::DataEnvelope;
use crate::page::{ContentKind, DEFAULT_LANG, PageBody, PageRequest};
use crate::session::{Credentials, Session};
use crate::snapshot::SnapshotStore;
use crate::transport::{self, TransportConfig};

const DATA_PATH: &str = "data.lua";

/// HTTP client for one router.
///
/// Owns the session: the first request logs in, every later request of
/// the same client reuses the SID. Requests are strictly sequential, so
/// methods take `&mut self`.
pub struct FritzClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    session: Session,
    snapshots: Option<SnapshotStore>,
    lang: String,
}

impl FritzClient {
    /// Create a client for `host` (`hostname[:port]` or a full base URL).
    pub fn new(
        host: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = transport::base_url(host)?;
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
            session: Session::new(),
            snapshots: None,
            lang: DEFAULT_LANG.to_owned(),
        }
    }

    /// Write every fetched page to `store`.
    pub fn with_snapshots(mut self, store: SnapshotStore) -> Self {
        self.snapshots = Some(store);
        self
    }

    /// Language the router should render labels in (default `de`).
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The SID in use, once logged in.
    pub fn session_id(&self) -> Option<&str> {
        self.session.sid()
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Fetch one page, logging in first if this client has no session yet.
    ///
    /// The HTTP status is not inspected: the body is decoded as the
    /// request's [`ContentKind`] and decoding decides success.
    pub async fn call(&mut self, request: &PageRequest) -> Result<PageBody, Error> {
        let sid = self
            .session
            .ensure(&self.http, &self.base_url, &self.credentials)
            .await?
            .to_owned();

        let url = self.base_url.join(DATA_PATH)?;
        let form = request.form_body(&sid, &self.lang);
        debug!(page = %request.page, "POST {}", url);

        let started = Instant::now();
        let resp = self
            .http
            .post(url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(form)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        info!(
            page = %request.page,
            %status,
            elapsed_ms = started.elapsed().as_millis(),
            "page fetched"
        );

        let body = match request.kind {
            ContentKind::Json => {
                let value = serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                    message: format!("page '{}': {e}", request.page),
                    body: text.clone(),
                })?;
                PageBody::Json(value)
            }
            ContentKind::Html => PageBody::Text(text),
        };

        if let Some(store) = &self.snapshots {
            store.record(&request.page, &body);
        }
        Ok(body)
    }

    /// Fetch a JSON page and decode its `data` member as `T`.
    pub async fn call_json<T: DeserializeOwned>(
        &mut self,
        request: &PageRequest,
    ) -> Result<T, Error> {
        let PageBody::Json(value) = self.call(request).await? else {
            return Err(Error::Deserialization {
                message: format!("page '{}' was not requested as JSON", request.page),
                body: String::new(),
            });
        };
        let envelope =
            DataEnvelope::<T>::deserialize(&value).map_err(|e| Error::Deserialization {
                message: format!("page '{}': {e}", request.page),
                body: value.to_string(),
            })?;
        Ok(envelope.data)
    }

    /// Fetch a page as raw text.
    pub async fn call_text(&mut self, request: &PageRequest) -> Result<String, Error> {
        Ok(match self.call(request).await? {
            PageBody::Text(text) => text,
            PageBody::Json(value) => value.to_string(),
        })
    }
}
