use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// A slash command as it should be registered with the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    /// Shown to everyone but only honoured for administrators.
    pub admin_only: bool,
}

fn agent_option() -> CommandOption {
    CommandOption {
        name: "agent".to_string(),
        description: "The sales agent's name or ID.".to_string(),
        required: true,
    }
}

fn definition(name: &str, description: &str, options: Vec<CommandOption>, admin_only: bool) -> CommandDefinition {
    CommandDefinition {
        name: name.to_string(),
        description: description.to_string(),
        options,
        admin_only,
    }
}

/// Every command the bot handles, for registration at startup.
pub fn command_definitions() -> Vec<CommandDefinition> {
    vec![
        definition(
            "general-sales",
            "Lists every recorded sale of an agent.",
            vec![agent_option()],
            false,
        ),
        definition(
            "weekly-sales",
            "Lists an agent's sales in the current period, including commission.",
            vec![agent_option()],
            false,
        ),
        definition(
            "start-report",
            "Marks the start of a new reporting period. (Admins only)",
            Vec::new(),
            true,
        ),
        definition(
            "finalize-report",
            "Closes the period and posts every agent's totals. (Admins only)",
            Vec::new(),
            true,
        ),
        definition("sale", "Opens the form to register a sale.", Vec::new(), false),
        definition(
            "reset-database",
            "Deletes all recorded sales. (Admins only)",
            Vec::new(),
            true,
        ),
    ]
}
