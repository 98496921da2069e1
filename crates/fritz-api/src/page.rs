// `data.lua` page requests
//
// Every data call is a form POST naming a page. Most pages answer with
// JSON; a few (the online counter) still render HTML with the data in an
// inline script.

use url::form_urlencoded;

/// Page names this client knows about.
pub mod names {
    pub const OVERVIEW: &str = "overview";
    pub const NET_DEVICES: &str = "netDev";
    pub const NET_COUNTER: &str = "netCnt";
    pub const WLAN_KEY: &str = "wKey";
}

/// UI language the router renders labels in.
pub const DEFAULT_LANG: &str = "de";

/// What a page answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Html,
}

impl ContentKind {
    /// File extension used for on-disk snapshots.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

/// One `data.lua` call: a page name, the expected content, and any extra
/// page parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: String,
    pub kind: ContentKind,
    pub params: Vec<(String, String)>,
}

impl PageRequest {
    pub fn json(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            kind: ContentKind::Json,
            params: Vec::new(),
        }
    }

    pub fn html(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            kind: ContentKind::Html,
            params: Vec::new(),
        }
    }

    /// Append page parameters, sent right after `page=`.
    pub fn with_params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(params);
        self
    }

    /// Encode the form body:
    /// `xhr=1&sid=…&page=…[&params…]&lang=…&xhrId=all&initial=`.
    pub fn form_body(&self, sid: &str, lang: &str) -> String {
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("xhr", "1")
            .append_pair("sid", sid)
            .append_pair("page", &self.page);
        for (key, value) in &self.params {
            form.append_pair(key, value);
        }
        form.append_pair("lang", lang)
            .append_pair("xhrId", "all")
            .append_pair("initial", "");
        form.finish()
    }
}

/// A decoded page response.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Json(serde_json::Value),
    Text(String),
}
