use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::controller::PendingRequest;
use crate::events::TurnEvent;
use crate::markup;
use crate::reveal;

/// Request body for the response service.
#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    user_input: &'a str,
}

/// Reply body. The full text arrives in one piece; the typewriter reveal is
/// entirely client-side.
#[derive(Debug, Deserialize)]
struct QueryReply {
    response: String,
}

/// HTTP client for the scheme advisor response service.
#[derive(Clone)]
pub struct ResponseClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ResponseClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, endpoint })
    }

    /// Send one user turn and return the full reply text.
    pub async fn fetch_response(&self, user_input: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&QueryBody { user_input })
            .send()
            .await
            .context("request to response service failed")?;

        if !response.status().is_success() {
            anyhow::bail!("response service returned status {}", response.status());
        }

        let reply: QueryReply = response
            .json()
            .await
            .context("malformed response body")?;
        Ok(reply.response)
    }
}

/// Dispatch one accepted submit.
///
/// Spawns the request task; on success it hands the flattened reply to the
/// reveal task, on any failure it sends a single [`TurnEvent::RequestFailed`].
/// Distinct failure causes all collapse to that one event.
pub fn dispatch(
    client: &ResponseClient,
    request: PendingRequest,
    typing_interval: Duration,
    tx: UnboundedSender<TurnEvent>,
) {
    let client = client.clone();
    tokio::spawn(async move {
        tracing::debug!(generation = request.generation, "dispatching user turn");
        match client.fetch_response(&request.user_input).await {
            Ok(reply) => {
                let reply = markup::flatten_markup(&reply);
                reveal::spawn_reveal(reply, request.generation, typing_interval, tx);
            }
            Err(err) => {
                tracing::warn!(
                    generation = request.generation,
                    error = %err,
                    "response request failed"
                );
                let _ = tx.send(TurnEvent::RequestFailed {
                    generation: request.generation,
                });
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_wire_contract() {
        let body = serde_json::to_value(QueryBody {
            user_input: "list 2 schemes",
        })
        .unwrap();
        assert_eq!(body, json!({ "user_input": "list 2 schemes" }));
    }

    #[test]
    fn reply_body_matches_wire_contract() {
        let reply: QueryReply =
            serde_json::from_str(r#"{ "response": "hi there" }"#).unwrap();
        assert_eq!(reply.response, "hi there");
    }

    #[test]
    fn reply_without_response_field_is_rejected() {
        assert!(serde_json::from_str::<QueryReply>(r#"{ "answer": "hi" }"#).is_err());
    }
}
