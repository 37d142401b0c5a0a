//! HTTP plumbing shared by every `api.rs`.
//!
//! All calls go through [`send`], which attaches the bearer token and the
//! tunnel header, then hands status + body to `decode_response` so every
//! screen sees the same [`ApiError`] categories.

use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::{decode_response, MessageData};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::config::config;
use crate::system::auth::context::{current_token, expire_session};

const TUNNEL_HEADER: &str = "ngrok-skip-browser-warning";

/// Full URL for a path such as `/atms?page=1`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", config().api_base, path)
}

/// `path` plus `?query` when the query is non-empty.
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder
        .header("Authorization", &format!("Bearer {}", token))
        .header(TUNNEL_HEADER, "true")
}

async fn send<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
    let url = request.url();
    let response = request.send().await.map_err(|e| {
        log::warn!("request to {} failed: {}", url, e);
        ApiError::Network(e.to_string())
    })?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let result = decode_response(status, &body);
    if let Err(err) = &result {
        log::error!("{} -> {}: {}", url, status, err);
        if err.is_unauthorized() {
            expire_session();
        }
    }
    result
}

fn require_token() -> Result<String, ApiError> {
    current_token().ok_or_else(|| {
        expire_session();
        ApiError::Unauthorized
    })
}

fn build_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, ApiError> {
    builder
        .json(body)
        .map_err(|e| ApiError::Decode(format!("cannot encode request: {}", e)))
}

fn build_empty(builder: RequestBuilder) -> Result<Request, ApiError> {
    builder
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let token = require_token()?;
    get_json_with_token(path, &token).await
}

/// Same as [`get_json`] but with an explicit token, for session validation.
pub async fn get_json_with_token<T: DeserializeOwned>(path: &str, token: &str) -> Result<T, ApiError> {
    let request = build_empty(authorized(Request::get(&api_url(path)), token))?;
    send(request).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let token = require_token()?;
    let request = build_json(authorized(Request::post(&api_url(path)), &token), body)?;
    send(request).await
}

/// Login is the one call that goes out without a token.
pub async fn post_json_public<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let request = build_json(
        Request::post(&api_url(path)).header(TUNNEL_HEADER, "true"),
        body,
    )?;
    send(request).await
}

/// POST without a body, for workflow actions.
pub async fn post_action(path: &str) -> Result<MessageData, ApiError> {
    let token = require_token()?;
    let request = build_empty(authorized(Request::post(&api_url(path)), &token))?;
    send_ack(request).await
}

pub async fn delete(path: &str) -> Result<MessageData, ApiError> {
    let token = require_token()?;
    let request = build_empty(authorized(Request::delete(&api_url(path)), &token))?;
    send_ack(request).await
}

/// Mutations may answer with an empty `data`; that still counts as success.
async fn send_ack(request: Request) -> Result<MessageData, ApiError> {
    match send::<MessageData>(request).await {
        Err(ApiError::Empty) => Ok(MessageData::default()),
        other => other,
    }
}
