//! Chat platform REST interface.
//!
//! Everything the bot consumes from the hosting platform goes through the
//! [`PlatformClient`] trait: sending messages and embeds, posting polls,
//! adding reactions, updating presence and toggling roles. The gateway,
//! transport and rate-limit internals stay the platform's business; this
//! module only speaks its REST surface.

use crate::logging::Notification;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Send a plain text message to a channel.
    async fn send_message(&self, channel: u64, text: &str) -> Result<()>;

    /// Send a structured log notification as an embed.
    async fn send_log_embed(&self, channel: u64, notification: &Notification) -> Result<()>;

    /// Post a multi-select poll.
    async fn send_poll(
        &self,
        channel: u64,
        question: &str,
        answers: &[String],
        duration_hours: u32,
    ) -> Result<()>;

    /// Add an emoji reaction to a message.
    async fn add_reaction(&self, channel: u64, message: u64, emoji: &str) -> Result<()>;

    /// Update the bot's displayed activity.
    async fn set_activity(&self, name: &str) -> Result<()>;

    async fn grant_role(&self, guild: u64, user: u64, role: u64) -> Result<()>;

    async fn revoke_role(&self, guild: u64, user: u64, role: u64) -> Result<()>;
}

/// reqwest-backed implementation against the platform REST API.
pub struct HttpPlatformClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpPlatformClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn request(&self, method: reqwest::Method, path: &str, body: Option<&Value>) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bot {}", self.token));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to platform API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Platform API error ({}): {}", status, body);
        }

        Ok(())
    }

    async fn post(&self, path: &str, body: &Value) -> Result<()> {
        self.request(reqwest::Method::POST, path, Some(body)).await
    }
}

/// Wire shape of one log embed. Bit-exact fields per the log relay
/// contract: title, body, color, author icon, event timestamp and an
/// optional traceback field.
fn embed_payload(notification: &Notification) -> Value {
    let mut embed = json!({
        "author": {
            "name": notification.title,
            "icon_url": notification.icon_url,
        },
        "description": notification.body,
        "color": notification.color,
        "timestamp": notification.timestamp.to_rfc3339(),
    });
    if let Some(traceback) = &notification.traceback {
        embed["fields"] = json!([{ "name": "Traceback", "value": traceback }]);
    }
    json!({ "embeds": [embed] })
}

#[async_trait]
impl PlatformClient for HttpPlatformClient {
    async fn send_message(&self, channel: u64, text: &str) -> Result<()> {
        self.post(
            &format!("/channels/{channel}/messages"),
            &json!({ "content": text }),
        )
        .await
    }

    async fn send_log_embed(&self, channel: u64, notification: &Notification) -> Result<()> {
        self.post(
            &format!("/channels/{channel}/messages"),
            &embed_payload(notification),
        )
        .await
    }

    async fn send_poll(
        &self,
        channel: u64,
        question: &str,
        answers: &[String],
        duration_hours: u32,
    ) -> Result<()> {
        let answers: Vec<Value> = answers
            .iter()
            .map(|text| json!({ "poll_media": { "text": text } }))
            .collect();
        self.post(
            &format!("/channels/{channel}/messages"),
            &json!({
                "poll": {
                    "question": { "text": question },
                    "answers": answers,
                    "duration": duration_hours,
                    "allow_multiselect": true,
                }
            }),
        )
        .await
    }

    async fn add_reaction(&self, channel: u64, message: u64, emoji: &str) -> Result<()> {
        self.post(
            &format!("/channels/{channel}/messages/{message}/reactions"),
            &json!({ "emoji": emoji }),
        )
        .await
    }

    async fn set_activity(&self, name: &str) -> Result<()> {
        self.post("/presence", &json!({ "activity": name })).await
    }

    async fn grant_role(&self, guild: u64, user: u64, role: u64) -> Result<()> {
        self.request(
            reqwest::Method::PUT,
            &format!("/guilds/{guild}/members/{user}/roles/{role}"),
            None,
        )
        .await
    }

    async fn revoke_role(&self, guild: u64, user: u64, role: u64) -> Result<()> {
        self.request(
            reqwest::Method::DELETE,
            &format!("/guilds/{guild}/members/{user}/roles/{role}"),
            None,
        )
        .await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{to_notification, Level, LogRecord};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_server_expecting(
        http_method: &str,
        expected_path: &str,
        body: Option<Value>,
    ) -> MockServer {
        let server = MockServer::start().await;
        let mut mock = Mock::given(method(http_method))
            .and(path(expected_path))
            .and(header("Authorization", "Bot test-token"));
        if let Some(body) = body {
            mock = mock.and(body_partial_json(body));
        }
        mock.respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    // ==================== Message Tests ====================

    #[tokio::test]
    async fn test_send_message_posts_content() {
        let server = mock_server_expecting(
            "POST",
            "/channels/42/messages",
            Some(json!({ "content": "hello" })),
        )
        .await;

        let client = HttpPlatformClient::new(server.uri(), "test-token");
        client.send_message(42, "hello").await.expect("Should send");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("missing access"))
            .mount(&server)
            .await;

        let client = HttpPlatformClient::new(server.uri(), "test-token");
        let err = client.send_message(42, "hello").await.unwrap_err();
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("missing access"));
    }

    // ==================== Embed Tests ====================

    #[tokio::test]
    async fn test_send_log_embed_wire_shape() {
        let record = LogRecord::with_error(Level::Error, "drain", "Send failed.", "trace");
        let notification = to_notification(&record).expect("Should format");

        let server = mock_server_expecting(
            "POST",
            "/channels/7/messages",
            Some(json!({
                "embeds": [{
                    "author": {
                        "name": "drain",
                        "icon_url": Level::Error.icon_url(),
                    },
                    "description": "Send failed.",
                    "color": Level::Error.color(),
                    "fields": [{ "name": "Traceback", "value": "```\ntrace\n```" }],
                }]
            })),
        )
        .await;

        let client = HttpPlatformClient::new(server.uri(), "test-token");
        client
            .send_log_embed(7, &notification)
            .await
            .expect("Should send");
    }

    #[test]
    fn test_embed_payload_omits_traceback_when_absent() {
        let record = LogRecord::new(Level::Command, "poll", "Poll posted.");
        let notification = to_notification(&record).expect("Should format");

        let payload = embed_payload(&notification);
        assert!(payload["embeds"][0].get("fields").is_none());
        assert_eq!(payload["embeds"][0]["author"]["name"], "poll");
    }

    // ==================== Poll / Role Tests ====================

    #[tokio::test]
    async fn test_send_poll_shape() {
        let server = mock_server_expecting(
            "POST",
            "/channels/5/messages",
            Some(json!({
                "poll": {
                    "question": { "text": "Which days?" },
                    "allow_multiselect": true,
                    "duration": 96,
                }
            })),
        )
        .await;

        let client = HttpPlatformClient::new(server.uri(), "test-token");
        client
            .send_poll(5, "Which days?", &["Montag".to_string()], 96)
            .await
            .expect("Should send");
    }

    #[tokio::test]
    async fn test_grant_and_revoke_role_paths() {
        let server = mock_server_expecting("PUT", "/guilds/1/members/2/roles/3", None).await;
        let client = HttpPlatformClient::new(server.uri(), "test-token");
        client.grant_role(1, 2, 3).await.expect("Should grant");

        let server = mock_server_expecting("DELETE", "/guilds/1/members/2/roles/3", None).await;
        let client = HttpPlatformClient::new(server.uri(), "test-token");
        client.revoke_role(1, 2, 3).await.expect("Should revoke");
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_normalized() {
        let server = mock_server_expecting("POST", "/presence", None).await;
        let client = HttpPlatformClient::new(format!("{}/", server.uri()), "test-token");
        client.set_activity("Schafkopf").await.expect("Should send");
    }
}
