//! Submission relay: classify, price, render, deliver, count.
//!
//! ## Processing Flow
//!
//! ```text
//! Submission → Category → RenderedMessage → webhook POST → counter commit
//! ```

pub mod counters;
pub mod webhook;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::config::WebhookConfig;
use crate::error::SubmitError;
use crate::form::{render_message, Category, Submission, FORM_FIELD};
use crate::pricing::Quote;

pub use counters::SequenceCounters;
pub use webhook::{deliver, WebhookPayload};

/// Result of a delivered submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub category: Category,
    /// Sequence number committed for this submission, if numbered
    pub sequence: Option<u32>,
    pub quote: Option<Quote>,
}

/// Everything needed to relay a submission.
#[derive(Clone)]
pub struct Relay {
    client: Client,
    webhooks: WebhookConfig,
    timeout: Option<Duration>,
    counters: Arc<SequenceCounters>,
}

impl Relay {
    pub fn new(
        client: Client,
        webhooks: WebhookConfig,
        timeout: Option<Duration>,
        counters: Arc<SequenceCounters>,
    ) -> Self {
        Self {
            client,
            webhooks,
            timeout,
            counters,
        }
    }

    pub fn counters(&self) -> &SequenceCounters {
        &self.counters
    }

    /// Fail fast when there is nowhere to send anything.
    pub fn ensure_configured(&self) -> Result<(), SubmitError> {
        if self.webhooks.any_configured() {
            Ok(())
        } else {
            Err(SubmitError::Configuration("no webhook URL set".to_string()))
        }
    }

    /// Relay one submission to its webhook.
    ///
    /// The category's counter only advances after the webhook accepted the
    /// message.
    pub async fn relay(&self, submission: &Submission) -> Result<Delivered, SubmitError> {
        let category = Category::classify(submission.get(FORM_FIELD));

        let url = self.webhooks.resolve(category).ok_or_else(|| {
            SubmitError::Configuration(format!("no webhook URL for {}", category.as_str()))
        })?;

        let sequence = self.counters.peek_next(category);
        let message = render_message(submission, category, sequence);

        info!(
            category = category.as_str(),
            sequence = ?sequence,
            total = ?message.quote.map(|q| q.total),
            field_count = submission.len(),
            "submission_rendered"
        );

        deliver(&self.client, url, &message.content(), self.timeout).await?;

        self.counters.commit(category);

        Ok(Delivered {
            category,
            sequence,
            quote: message.quote,
        })
    }
}
