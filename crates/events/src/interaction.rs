use core_types::SaleForm;
use serde::{Deserialize, Serialize};

/// Who triggered an interaction.
///
/// `is_admin` is decided by the platform adapter from its own role system;
/// the bot trusts it as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// The slash commands the bot understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Command {
    /// All recorded sales of an agent.
    GeneralSales { agent: String },
    /// Sales of an agent in the current report window.
    WeeklySales { agent: String },
    StartReport,
    FinalizeReport,
    /// Opens the sale entry form.
    Sale,
    ResetDatabase,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::GeneralSales { .. } => "general-sales",
            Command::WeeklySales { .. } => "weekly-sales",
            Command::StartReport => "start-report",
            Command::FinalizeReport => "finalize-report",
            Command::Sale => "sale",
            Command::ResetDatabase => "reset-database",
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::StartReport | Command::FinalizeReport | Command::ResetDatabase
        )
    }
}

/// Buttons the bot attaches to its messages.
///
/// Serialized as the button's `custom_id`, the value the platform sends back
/// on a click. The ids match the ones already posted in the sales channel, so
/// buttons on old messages keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonId {
    /// On the standing "register a sale" prompt.
    #[serde(rename = "vender_imovel_btn")]
    RegisterSale,
    /// On every "sale registered" notification. Opens a fresh form; the
    /// original record is never modified.
    #[serde(rename = "editar_venda_btn")]
    EditSale,
    #[serde(rename = "confirm_reset_db_btn")]
    ConfirmReset,
    #[serde(rename = "cancel_reset_db_btn")]
    CancelReset,
}

impl ButtonId {
    pub const ALL: [ButtonId; 4] = [
        ButtonId::RegisterSale,
        ButtonId::EditSale,
        ButtonId::ConfirmReset,
        ButtonId::CancelReset,
    ];

    pub fn custom_id(&self) -> &'static str {
        match self {
            ButtonId::RegisterSale => "vender_imovel_btn",
            ButtonId::EditSale => "editar_venda_btn",
            ButtonId::ConfirmReset => "confirm_reset_db_btn",
            ButtonId::CancelReset => "cancel_reset_db_btn",
        }
    }

    /// Maps a clicked button's `custom_id` back to the button.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.custom_id() == custom_id)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, ButtonId::ConfirmReset)
    }
}

/// One inbound platform event.
///
/// Serialized as `{"type": "...", "payload": {...}}`, for example:
/// `{"type":"Command","payload":{"caller":{...},"command":{"name":"weekly-sales","agent":"bob"}}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Interaction {
    Command { caller: Caller, command: Command },
    Button { caller: Caller, button: ButtonId },
    FormSubmit { caller: Caller, form: SaleForm },
}

impl Interaction {
    pub fn caller(&self) -> &Caller {
        match self {
            Interaction::Command { caller, .. }
            | Interaction::Button { caller, .. }
            | Interaction::FormSubmit { caller, .. } => caller,
        }
    }
}
