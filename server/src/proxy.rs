//! Upstream forwarding helpers.
//!
//! The upstream API occasionally answers with HTML error pages. Callers of
//! this proxy always receive JSON, so anything the upstream sends without a
//! JSON content type is folded into a synthetic 500 envelope instead of
//! being relayed for the browser to choke on.

use axum::http::header::CONTENT_TYPE;
use serde_json::Value;

use crate::error::AppError;

/// A normalised upstream response: always a JSON body plus the status to relay.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

pub fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.contains("application/json"))
}

/// Normalises a raw upstream response into a relayable reply.
pub fn classify(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<UpstreamReply, AppError> {
    if !is_json(content_type) {
        return Err(AppError::NonJsonUpstream { status });
    }

    match serde_json::from_slice(body) {
        Ok(body) => Ok(UpstreamReply { status, body }),
        Err(_) => Err(AppError::NonJsonUpstream { status }),
    }
}

/// Reads an upstream response to completion and normalises it.
pub async fn read_reply(response: reqwest::Response) -> Result<UpstreamReply, AppError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response.bytes().await?;

    classify(status, content_type.as_deref(), &body)
}
