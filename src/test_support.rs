//! Test-only helpers: an in-process stub of the upstream API, plus small
//! request/response helpers for driving the page router with `oneshot`.
//!
//! The stub is a plain axum router bound to `127.0.0.1:0`. Every request is
//! recorded (method, path, Authorization header, body) and answered by a
//! caller-supplied responder.

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
    response::Response,
};
use serde_json::Value;

use crate::config::Config;
use crate::services::upstream::{ApiClient, Endpoints};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Hit {
    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

pub struct StubReply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

impl StubReply {
    pub fn json(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

pub struct Stub {
    pub base_url: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl Stub {
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn config(&self) -> Config {
        self.config_with(&[])
    }

    pub fn config_with(&self, extra: &[(&str, &str)]) -> Config {
        let base_url = self.base_url.clone();
        let extra: Vec<(String, String)> = extra
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(move |key| {
            if key == "API_BASE_URL" {
                return Some(base_url.clone());
            }
            extra.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .unwrap()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(Endpoints::from_config(&self.config())).unwrap()
    }

    pub fn state(&self) -> AppState {
        AppState::from_config(&self.config()).unwrap()
    }
}

pub async fn spawn_stub<F>(responder: F) -> Stub
where
    F: Fn(&Method, &str) -> StubReply + Send + Sync + 'static,
{
    let hits = Arc::new(Mutex::new(Vec::new()));
    let responder = Arc::new(responder);
    let recorded = hits.clone();

    let app = Router::new().fallback(move |req: Request| {
        let responder = responder.clone();
        let recorded = recorded.clone();
        async move {
            let (parts, body) = req.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .unwrap_or_default();
            let path = parts.uri.path().to_string();

            recorded.lock().unwrap().push(Hit {
                method: parts.method.clone(),
                path: path.clone(),
                authorization: parts
                    .headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });

            let reply = responder(&parts.method, &path);
            (
                reply.status,
                [(header::CONTENT_TYPE, reply.content_type)],
                reply.body,
            )
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Stub {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// GET with an optional `Cookie` header.
pub fn get(uri: &str, cookie: Option<&str>) -> Request {
    let mut req = axum::http::Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::empty()).unwrap()
}

/// Form POST (`application/x-www-form-urlencoded`) with an optional `Cookie` header.
pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request {
    let mut req = axum::http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(form.to_string())).unwrap()
}

pub async fn body_text(res: Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(res: &Response) -> &str {
    res.headers()[header::LOCATION].to_str().unwrap()
}
