//! # Interaction Events
//!
//! The message types exchanged between a chat-platform adapter and the bot:
//! inbound `Interaction`s (slash commands, button clicks, form submissions)
//! and outbound `Response`s and `ChannelMessage`s.
//!
//! As a Layer 0 crate, it depends only on `core-types` and provides the
//! definitive language every adapter speaks.

// Declare the modules that make up this crate.
pub mod commands;
pub mod interaction;
pub mod response;

// Re-export the core types to provide a clean public API.
pub use commands::{command_definitions, CommandDefinition, CommandOption};
pub use interaction::{ButtonId, Caller, Command, Interaction};
pub use response::{
    Button, ButtonStyle, ChannelMessage, Embed, EmbedField, FormField, FormSpec, Response,
    EMBED_COLOR,
};
