use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use libris_auth::SessionManager;

use crate::classify::{classify, classify_status};
use crate::config::ApiConfig;
use crate::error::{ApiError, UNEXPECTED_RESPONSE};

/// Whether a call carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Resource calls: attach the stored token when there is one.
    Protected,
    /// Login and registration: never attach a token.
    Public,
}

/// HTTP gateway. Reads the token through the [`SessionManager`] on every call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    sessions: SessionManager,
}

impl ApiClient {
    pub fn new(config: ApiConfig, sessions: SessionManager) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            sessions,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Issue one request and return the raw body of a 2xx response.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        access: Access,
    ) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        let mut req = self.http.request(method.clone(), &url);

        if access == Access::Protected {
            if let Some(token) = self.sessions.token() {
                req = req.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        tracing::debug!(%method, %url, ?access, "api request");

        let resp = req.send().await.map_err(|err| {
            tracing::warn!(%method, %url, "no response: {err}");
            ApiError::generic()
        })?;

        let status = resp.status();
        if let Some(err) = classify_status(status.as_u16()) {
            tracing::warn!(%method, %url, %status, "api error: {err}");
            return Err(err);
        }

        let text = resp.text().await.map_err(|err| {
            tracing::warn!(%method, %url, %status, "failed to read response body: {err}");
            ApiError::generic()
        })?;

        if status.is_success() {
            Ok(text)
        } else {
            let err = classify(status.as_u16(), &text);
            tracing::warn!(%method, %url, %status, "api error: {err}");
            Err(err)
        }
    }

    /// `GET` a protected resource and decode it.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self
            .request::<()>(Method::GET, path, None, Access::Protected)
            .await?;
        decode(&body)
    }

    /// Send a body and ignore whatever comes back.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        access: Access,
    ) -> Result<(), ApiError> {
        self.request(method, path, body, access).await.map(|_| ())
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| {
        tracing::warn!("undecodable response body: {err}");
        ApiError::failed(UNEXPECTED_RESPONSE)
    })
}
