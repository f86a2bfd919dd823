//! Outbound Slack Web API client.
//!
//! Thin reqwest wrapper over the two chat methods this bot uses. Constructed
//! once and injected through `AppState`, no module-level singletons, so
//! handlers stay testable without a live network. The base URL is
//! configurable for the same reason.

use potluck_core::{Block, PotluckError, Result};
use serde_json::json;

#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
}

impl SlackClient {
    pub fn new(base_url: &str, bot_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
        }
    }

    /// `chat.postMessage`: post a new message to a channel.
    pub async fn post_message(&self, channel: &str, text: &str, blocks: &[Block]) -> Result<()> {
        self.call(
            "chat.postMessage",
            json!({
                "channel": channel,
                "text": text,
                "blocks": blocks,
            }),
        )
        .await
    }

    /// `chat.update`: replace the content of an existing message, addressed
    /// by channel + timestamp.
    pub async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        text: &str,
        blocks: &[Block],
    ) -> Result<()> {
        self.call(
            "chat.update",
            json!({
                "channel": channel,
                "ts": ts,
                "text": text,
                "blocks": blocks,
            }),
        )
        .await
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> Result<()> {
        let url = format!("{}/{}", self.base_url, method);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PotluckError::PlatformCall(format!("{method}: {e}")))?;

        let envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PotluckError::PlatformCall(format!("{method}: {e}")))?;

        // Slack reports failures inside a 200 envelope.
        if !envelope["ok"].as_bool().unwrap_or(false) {
            let reason = envelope["error"].as_str().unwrap_or("unknown error");
            return Err(PotluckError::PlatformCall(format!("{method}: {reason}")));
        }

        Ok(())
    }
}
