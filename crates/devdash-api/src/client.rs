// Auth service HTTP client
//
// Wraps `reqwest::Client` with URL construction against the service root,
// a shared cookie jar (the browser's "credentials: include"), and JSON
// decoding that keeps the HTTP status next to the body. Endpoint methods
// live in `session.rs` and `groups.rs` as inherent impls to keep this
// module focused on transport mechanics.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// A decoded response body together with the status it arrived with.
///
/// Several service calls report success through the status code while
/// still carrying a JSON body on failure, so both are kept.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub body: T,
}

impl<T> Reply<T> {
    /// Mirrors `fetch`'s `response.ok`: any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Raw HTTP client for the auth service.
///
/// Every request goes through the same cookie jar, so a session cookie set
/// by `login` is presented on every later call from this client.
pub struct AuthApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Cookie jar reference for inspecting the session cookie.
    cookie_jar: Option<Arc<Jar>>,
}

impl AuthApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (session auth requires cookies). `base_url` is the
    /// service root, e.g. `https://dash.example.com`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for giving it a cookie store if the session
    /// should survive between calls.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The `Cookie` header this client would send to the service, if any.
    pub fn cookie_header(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the full URL for an endpoint.
    ///
    /// Paths are appended to the base URL rather than joined, so a service
    /// mounted under a prefix (`https://host/portal`) keeps that prefix.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{}", endpoint.path())).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a request and decode the JSON body whatever the status.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<Reply<T>, Error> {
        let reply = self.send_text(endpoint, body).await?;
        Ok(Reply {
            status: reply.status,
            body: decode(&reply.body)?,
        })
    }

    /// Send a request and return the raw body text with its status.
    pub(crate) async fn send_text(
        &self,
        endpoint: Endpoint,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<Reply<String>, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!("{} {}", endpoint.method(), url);

        let mut builder = self.http.request(endpoint.method(), url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        trace!(%status, "response received");
        let text = resp.text().await.map_err(Error::Transport)?;
        Ok(Reply { status, body: text })
    }

    /// Send a request and return only the status, discarding the body.
    pub(crate) async fn send_status(&self, endpoint: Endpoint) -> Result<StatusCode, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!("{} {}", endpoint.method(), url);

        let resp = self
            .http
            .request(endpoint.method(), url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Ok(resp.status())
    }
}

/// Decode a JSON body, keeping a preview of it in the error on failure.
pub(crate) fn decode<T: DeserializeOwned>(text: &str) -> Result<T, Error> {
    serde_json::from_str(text).map_err(|e| {
        let preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: text.to_owned(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_keeps_mount_prefix() {
        let client = AuthApiClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://dash.example.com/portal/").unwrap(),
        );
        let url = client.endpoint_url(Endpoint::Login).unwrap();
        assert_eq!(url.as_str(), "https://dash.example.com/portal/api/login");
    }

    #[test]
    fn decode_error_preview_respects_char_boundaries() {
        let body = "Ошибка".repeat(100);
        let err = decode::<serde_json::Value>(&body).unwrap_err();
        match err {
            Error::Deserialization { message, body: raw } => {
                assert!(message.contains("body preview"));
                assert_eq!(raw, body);
            }
            other => panic!("expected Deserialization, got {other:?}"),
        }
    }
}
