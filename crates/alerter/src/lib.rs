use crate::error::AlerterError;
use async_trait::async_trait;
use configuration::Channel;
use events::{Button, ButtonStyle, ChannelMessage, Embed};
use reqwest::Client;
use serde::Serialize;
pub mod error;
pub mod format;

/// Something that can post to the sales channel.
#[async_trait]
pub trait ChannelNotifier: Send + Sync {
    async fn post(&self, message: &ChannelMessage) -> Result<(), AlerterError>;
}

/// Stand-in used when no webhook is configured. Every post fails with
/// `AlerterError::NotConfigured` so callers can fall back.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl ChannelNotifier for DisabledNotifier {
    async fn post(&self, _message: &ChannelMessage) -> Result<(), AlerterError> {
        Err(AlerterError::NotConfigured)
    }
}

/// The JSON payload of an incoming-webhook call.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    embeds: Vec<WebhookEmbed<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<ActionRow<'a>>,
}

#[derive(Debug, Serialize)]
struct WebhookEmbed<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    color: u32,
    fields: Vec<WebhookField<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<WebhookFooter<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
struct WebhookField<'a> {
    name: &'a str,
    value: &'a str,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct WebhookFooter<'a> {
    text: &'a str,
}

/// A row of buttons (component type 1 holding type 2 children).
#[derive(Debug, Serialize)]
struct ActionRow<'a> {
    #[serde(rename = "type")]
    kind: u8,
    components: Vec<WebhookButton<'a>>,
}

#[derive(Debug, Serialize)]
struct WebhookButton<'a> {
    #[serde(rename = "type")]
    kind: u8,
    style: u8,
    label: &'a str,
    custom_id: &'a str,
}

impl<'a> From<&'a Embed> for WebhookEmbed<'a> {
    fn from(embed: &'a Embed) -> Self {
        Self {
            title: &embed.title,
            description: embed.description.as_deref(),
            color: embed.color,
            fields: embed
                .fields
                .iter()
                .map(|f| WebhookField {
                    name: &f.name,
                    value: &f.value,
                    inline: f.inline,
                })
                .collect(),
            footer: embed.footer.as_deref().map(|text| WebhookFooter { text }),
            timestamp: embed.timestamp.map(|t| t.to_rfc3339()),
        }
    }
}

impl<'a> From<&'a Button> for WebhookButton<'a> {
    fn from(button: &'a Button) -> Self {
        let style = match button.style {
            ButtonStyle::Primary => 1,
            ButtonStyle::Secondary => 2,
            ButtonStyle::Danger => 4,
        };
        Self {
            kind: 2,
            style,
            label: &button.label,
            custom_id: button.id.custom_id(),
        }
    }
}

impl<'a> From<&'a ChannelMessage> for WebhookPayload<'a> {
    fn from(message: &'a ChannelMessage) -> Self {
        let components = if message.buttons.is_empty() {
            Vec::new()
        } else {
            vec![ActionRow {
                kind: 1,
                components: message.buttons.iter().map(WebhookButton::from).collect(),
            }]
        };
        Self {
            content: message.content.as_deref(),
            embeds: message.embeds.iter().map(WebhookEmbed::from).collect(),
            components,
        }
    }
}

/// Posts channel messages to an incoming-webhook URL.
pub struct WebhookAlerter {
    client: Client,
    webhook_url: String,
}

impl WebhookAlerter {
    /// Creates a new `WebhookAlerter`.
    ///
    /// Returns `None` if the webhook URL is missing from the configuration,
    /// allowing the system to gracefully disable channel posts.
    pub fn new(config: &Channel) -> Option<Self> {
        if config.webhook_url.trim().is_empty() {
            tracing::warn!("Channel notifier is not configured (missing webhook_url).");
            return None;
        }
        Some(Self {
            client: Client::new(),
            webhook_url: config.webhook_url.clone(),
        })
    }
}

#[async_trait]
impl ChannelNotifier for WebhookAlerter {
    async fn post(&self, message: &ChannelMessage) -> Result<(), AlerterError> {
        let payload = WebhookPayload::from(message);

        let response = self.client.post(&self.webhook_url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to decode error response".to_string());
            return Err(AlerterError::ApiError(format!("{status}: {error_text}")));
        }

        tracing::debug!(embeds = message.embeds.len(), "Posted message to sales channel.");
        Ok(())
    }
}

/// Builds the notifier described by the configuration, falling back to
/// `DisabledNotifier` when no webhook is set.
pub fn notifier_from_config(config: &Channel) -> std::sync::Arc<dyn ChannelNotifier> {
    match WebhookAlerter::new(config) {
        Some(alerter) => std::sync::Arc::new(alerter),
        None => std::sync::Arc::new(DisabledNotifier),
    }
}
