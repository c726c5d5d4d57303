use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interaction::ButtonId;

/// Colour used on every embed the bot sends (`#00ffff`).
pub const EMBED_COLOR: u32 = 0x00FF_FF;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// A rich card: title, body text and labelled fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            color: EMBED_COLOR,
            fields: Vec::new(),
            footer: None,
            timestamp: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub id: ButtonId,
    pub label: String,
    pub style: ButtonStyle,
}

impl Button {
    pub fn new(id: ButtonId, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            id,
            label: label.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub custom_id: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
}

/// A modal form the adapter should open for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    pub custom_id: String,
    pub title: String,
    pub fields: Vec<FormField>,
}

/// A message posted to the sales channel rather than to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

/// The bot's reply to a single interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Response {
    /// Plain text. Ephemeral replies are shown to the caller only.
    Message { content: String, ephemeral: bool },
    Embed { embed: Embed, ephemeral: bool },
    /// A report too large for one embed, split in order.
    Embeds { embeds: Vec<Embed>, ephemeral: bool },
    /// Open a form instead of replying.
    ShowForm(FormSpec),
    /// Replace the message that carried the clicked button and drop its buttons.
    Update { content: String },
    /// Text with buttons the caller must choose from.
    Confirm {
        content: String,
        buttons: Vec<Button>,
        ephemeral: bool,
    },
}

impl Response {
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Response::Message {
            content: content.into(),
            ephemeral: true,
        }
    }

    pub fn public(content: impl Into<String>) -> Self {
        Response::Message {
            content: content.into(),
            ephemeral: false,
        }
    }
}
