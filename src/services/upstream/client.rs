//! HTTP client for the upstream admin API.
//!
//! Every call takes an explicit `AuthContext`; the client never reads cookies
//! or decides navigation. Responses are classified into `ApiError` variants:
//! 401 becomes `Unauthenticated`, any other non-2xx becomes `Status` with a
//! truncated body.

use reqwest::{Method, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::services::upstream::auth::AuthContext;
use crate::services::upstream::error::{ApiError, ApiResult};
use crate::services::upstream::payload;

/// Resolved upstream endpoints (collection URLs, not templates).
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub users_url: String,
    pub prompt_configs_url: String,
    pub login_url: String,
}

impl Endpoints {
    pub fn from_config(config: &Config) -> Self {
        Self {
            users_url: config.users_url(),
            prompt_configs_url: config.prompt_configs_url(),
            login_url: config.login_url(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

/// Credentials returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: String,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> ApiResult<Self> {
        // No timeout on purpose: the transport default applies.
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send one request. Only transport failures are errors here; the status is
    /// left to the caller (the fallback chain needs to see 404/405).
    pub async fn send(
        &self,
        auth: &AuthContext,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> ApiResult<Response> {
        let mut req = self
            .http
            .request(method.clone(), url)
            .header(header::ACCEPT, "application/json");

        if let Some(value) = auth.authorization_value() {
            req = req.header(header::AUTHORIZATION, value);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        tracing::debug!(
            %method,
            url,
            authenticated = auth.is_authenticated(),
            "upstream request"
        );

        let res = req.send().await.map_err(|e| {
            tracing::warn!(%method, url, error = %e, "upstream request failed");
            ApiError::from(e)
        })?;

        tracing::debug!(%method, url, status = res.status().as_u16(), "upstream response");
        Ok(res)
    }

    pub async fn get_json<T>(&self, auth: &AuthContext, url: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let res = self.send(auth, Method::GET, url, None).await?;
        read_json(res).await
    }

    /// GET a collection that may come back bare or wrapped under `wrapper_field`.
    pub async fn get_list<T>(
        &self,
        auth: &AuthContext,
        url: &str,
        wrapper_field: &str,
    ) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let res = self.send(auth, Method::GET, url, None).await?;
        let payload: Value = read_json(res).await?;
        payload::normalize_list(payload, wrapper_field)
    }

    pub async fn send_json<T>(
        &self,
        auth: &AuthContext,
        method: Method,
        url: &str,
        body: &Value,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let res = self.send(auth, method, url, Some(body)).await?;
        read_json(res).await
    }

    pub async fn delete(&self, auth: &AuthContext, url: &str) -> ApiResult<()> {
        let res = self.send(auth, Method::DELETE, url, None).await?;
        ensure_success(res).await?;
        Ok(())
    }

    /// POST credentials to the login endpoint. Never sends an Authorization header.
    /// A 401 here is a rejected login, not an expired session.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<IssuedToken> {
        let url = &self.endpoints.login_url;
        let body = serde_json::json!({ "username": username, "password": password });

        let res = self
            .send(&AuthContext::anonymous(), Method::POST, url, Some(&body))
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        let payload = payload::parse_lenient(&text);

        match payload::token_from_payload(&payload) {
            Some(token) if status.is_success() => Ok(IssuedToken {
                token,
                token_type: payload::token_type_from_payload(&payload),
            }),
            _ => {
                tracing::info!(status = status.as_u16(), "login rejected");
                Err(ApiError::LoginRejected { status })
            }
        }
    }
}

/// Classify a non-2xx response: 401 → `Unauthenticated`, anything else → `Status`.
pub async fn into_failure(res: Response) -> ApiError {
    let status = res.status();
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthenticated;
    }
    let body = res.text().await.unwrap_or_default();
    ApiError::from_status(status, &body)
}

pub async fn ensure_success(res: Response) -> ApiResult<Response> {
    if res.status().is_success() {
        Ok(res)
    } else {
        Err(into_failure(res).await)
    }
}

pub async fn read_json<T>(res: Response) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let res = ensure_success(res).await?;
    let bytes = res.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
