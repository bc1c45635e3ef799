//! Blocking JSON client shared by the REST collaborators.
//!
//! Requests go through an async `reqwest::Client`; each `ApiClient` owns a
//! current-thread runtime and blocks on it, so callers stay synchronous.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{ConfigError, CoreError, Result};

pub struct ApiClient {
    service: &'static str,
    base: Url,
    token: String,
    http: Client,
    runtime: tokio::runtime::Runtime,
}

impl ApiClient {
    /// `base_url` is the API root; a trailing slash is added if missing so
    /// relative paths join underneath it.
    pub fn new(service: &'static str, base_url: &str, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(ConfigError::MissingKey(format!("{service}.access_token")).into());
        }

        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized).map_err(|e| ConfigError::InvalidValue {
            key: format!("{service}.base_url"),
            message: e.to_string(),
        })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            service,
            base,
            token: token.to_string(),
            http: Client::new(),
            runtime,
        })
    }

    /// Absolute URL for `path` with the given query pairs appended.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| CoreError::integration(self.service, format!("bad path '{path}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(path, query)?;
        let value = self.send(Method::GET, url, None::<&Value>)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path, &[])?;
        let value = self.send(Method::POST, url, Some(body))?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.url(path, &[])?;
        self.send(Method::PUT, url, Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path, &[])?;
        self.send(Method::DELETE, url, None::<&Value>)?;
        Ok(())
    }

    fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Value> {
        tracing::debug!(service = self.service, %method, %url, "request");

        let mut request = self.http.request(method, url).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let (status, text) = self
            .runtime
            .block_on(async {
                let response = request.send().await?;
                let status = response.status();
                let text = response.text().await?;
                Ok::<_, reqwest::Error>((status, text))
            })
            .map_err(|e| CoreError::Integration {
                service: self.service.to_string(),
                message: "request failed".to_string(),
                source: Some(Box::new(e)),
            })?;

        self.check(status, &text)
    }

    fn check(&self, status: StatusCode, text: &str) -> Result<Value> {
        let value: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };

        if let Some(err) = value.get("error").or_else(|| value.get("errors")) {
            return Err(CoreError::integration(
                self.service,
                format!("API error ({status}): {err}"),
            ));
        }
        if !status.is_success() {
            return Err(CoreError::integration(
                self.service,
                format!("unexpected status {status}: {value}"),
            ));
        }

        Ok(value)
    }
}
