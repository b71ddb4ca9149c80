use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    error::AppError,
    proxy::{self, UpstreamReply},
    state::AppState,
};

/// `POST /api/inscription`: verbatim forward of the inscription payload.
pub async fn inscription_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match forward_inscription(state, body).await {
        Ok(reply) => relay(reply),
        Err(err) => err.into_response(),
    }
}

async fn forward_inscription(
    state: Arc<AppState>,
    body: Bytes,
) -> Result<UpstreamReply, AppError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    let response = state
        .http
        .post(format!("{}/api/v1/inscription", state.config.upstream_url))
        .json(&payload)
        .send()
        .await?;

    debug!(status = response.status().as_u16(), "upstream inscription response");

    let reply = proxy::read_reply(response).await?;

    if reply.status >= 400 {
        error!(status = reply.status, "upstream rejected inscription");
    }

    Ok(reply)
}

/// `GET /api/benefits`: the full catalogue, or a single opaque failure.
pub async fn benefits_handler(State(state): State<Arc<AppState>>) -> Response {
    match fetch_benefits(state).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn fetch_benefits(state: Arc<AppState>) -> Result<Value, AppError> {
    let response = state
        .http
        .get(format!("{}/api/v1/benefits", state.config.upstream_url))
        .send()
        .await
        .map_err(|_| AppError::BenefitsUnavailable)?;

    response
        .json()
        .await
        .map_err(|_| AppError::BenefitsUnavailable)
}

#[derive(Deserialize)]
pub struct UserQuery {
    email: Option<String>,
}

/// `GET /api/user?email=...`: member lookup, upstream errors relayed as-is.
pub async fn user_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Response {
    match fetch_user(state, query).await {
        Ok(reply) => relay(reply),
        Err(err) => err.into_response(),
    }
}

async fn fetch_user(state: Arc<AppState>, query: UserQuery) -> Result<UpstreamReply, AppError> {
    let email = query
        .email
        .filter(|email| !email.is_empty())
        .ok_or(AppError::MissingEmail)?;

    let response = state
        .http
        .get(format!("{}/api/v1/user", state.config.upstream_url))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .map_err(|_| AppError::UserUnavailable)?;

    debug!(status = response.status().as_u16(), email = %email, "upstream user response");

    proxy::read_reply(response).await
}

fn relay(reply: UpstreamReply) -> Response {
    let status =
        StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(reply.body)).into_response()
}
