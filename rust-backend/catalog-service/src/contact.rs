//! Contact form relay.
//!
//! Submissions are checked for the three required fields and forwarded as a
//! form-encoded POST to a spreadsheet web-app, whose JSON `{result, message}`
//! reply decides the outcome.

pub mod form;
pub mod webhook;

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use webhook::{FormWebhook, SheetWebhook, WebhookReply};

pub const DEFAULT_WEBHOOK_URL: &str =
    "https://script.google.com/macros/s/AKfycbya5aU8zXDeSmqLtzVJuCRrz8Crq5oxvWOc-BTCNQiNjKIE_SpjNVllPHWCixqx_yUY/exec";
pub const FALLBACK_REJECTION: &str = "Unknown error from sheet script";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("missing required fields: {0}")]
    MissingFields(String),

    #[error("webhook returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("{message}")]
    Rejected { message: String, payload: Value },

    #[error("webhook transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook reply is not valid json: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Body of `POST /contact`; field names are the sheet's column headers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Message")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub message: String,
}

impl ContactRequest {
    /// Presence check only: no trimming, no phone or length rules.
    pub fn validate(self) -> Result<ContactSubmission, RelayError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        match (present(self.name), present(self.phone), present(self.message)) {
            (Some(name), Some(phone), Some(message)) => Ok(ContactSubmission { name, phone, message }),
            (name, phone, message) => {
                let missing: Vec<&str> = [("Name", name.is_none()), ("Phone", phone.is_none()), ("Message", message.is_none())]
                    .into_iter()
                    .filter(|(_, absent)| *absent)
                    .map(|(field, _)| field)
                    .collect();
                Err(RelayError::MissingFields(missing.join(", ")))
            }
        }
    }
}

impl ContactSubmission {
    pub fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("Name", self.name.as_str()),
            ("Phone", self.phone.as_str()),
            ("Message", self.message.as_str()),
        ]
    }
}

/// Turn the webhook's reply into the relay outcome.
///
/// Non-2xx is an upstream failure regardless of body; otherwise the body must
/// be JSON and `result` must equal `"success"`.
pub fn interpret_reply(reply: WebhookReply) -> Result<Value, RelayError> {
    if !reply.is_success() {
        return Err(RelayError::Upstream {
            status: reply.status,
            body: reply.body,
        });
    }

    let payload: Value = serde_json::from_str(&reply.body)?;
    if payload.get("result").and_then(Value::as_str) == Some("success") {
        return Ok(payload);
    }

    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(FALLBACK_REJECTION)
        .to_string();
    Err(RelayError::Rejected { message, payload })
}

#[derive(Clone)]
pub struct ContactRelay {
    webhook: Arc<dyn FormWebhook>,
}

impl ContactRelay {
    pub fn new(webhook: Arc<dyn FormWebhook>) -> Self {
        Self { webhook }
    }

    /// Validate and forward; returns the webhook's JSON payload on success.
    pub async fn submit(&self, request: ContactRequest) -> Result<(ContactSubmission, Value), RelayError> {
        let submission = request.validate()?;
        let reply = self.webhook.post_form(&submission.form_fields()).await?;
        let payload = interpret_reply(reply)?;
        Ok((submission, payload))
    }
}
