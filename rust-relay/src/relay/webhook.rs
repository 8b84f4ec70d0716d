//! Outbound Discord webhook delivery.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

/// Body Discord expects on an execute-webhook call.
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub content: &'a str,
}

/// POST a message to a webhook.
///
/// Transport errors and non-2xx responses are both failures. There is no
/// retry; `timeout` is only applied when configured.
pub async fn deliver(
    client: &Client,
    url: &str,
    content: &str,
    timeout: Option<Duration>,
) -> Result<()> {
    info!(content_length = content.len(), "webhook_delivery_starting");

    let mut request = client.post(url).json(&WebhookPayload { content });
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            if e.is_timeout() {
                error!(error = %e, "webhook_delivery_timeout");
            } else {
                error!(error = %e, "webhook_delivery_error");
            }
            return Err(e).context("Failed to reach webhook");
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(
            status_code = status.as_u16(),
            body_length = body.len(),
            "webhook_delivery_rejected"
        );
        bail!("Webhook responded with {}", status);
    }

    info!(status_code = status.as_u16(), "webhook_delivered");
    Ok(())
}
