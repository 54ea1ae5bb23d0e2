use async_trait::async_trait;
use reqwest::Client;

use super::RelayError;

/// Raw reply from the form endpoint; interpretation happens in the relay.
#[derive(Debug, Clone)]
pub struct WebhookReply {
    pub status: u16,
    pub body: String,
}

impl WebhookReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait FormWebhook: Send + Sync {
    async fn post_form(&self, fields: &[(&'static str, &str)]) -> Result<WebhookReply, RelayError>;
}

/// Spreadsheet web-app reached over HTTPS.
pub struct SheetWebhook {
    client: Client,
    url: String,
}

impl SheetWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl FormWebhook for SheetWebhook {
    async fn post_form(&self, fields: &[(&'static str, &str)]) -> Result<WebhookReply, RelayError> {
        let resp = self.client.post(&self.url).form(fields).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(WebhookReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_success_range() {
        let reply = |status| WebhookReply { status, body: String::new() };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(500).is_success());
    }
}
