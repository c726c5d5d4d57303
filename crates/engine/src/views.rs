//! Everything the bot shows: form layout, embeds and reply texts.

use alerter::format::{format_currency, format_currency_decimal};
use analytics::{AgentReport, AgentTotals, PeriodReport, ReportScope};
use core_types::SaleRecord;
use events::{Button, ButtonId, ButtonStyle, ChannelMessage, Embed, FormField, FormSpec};

pub const SALE_FORM_ID: &str = "sale_form";

/// Embed descriptions longer than this are rejected by the platform.
const DESCRIPTION_LIMIT: usize = 4096;
const TITLE_LIMIT: usize = 256;
/// Most fields the platform accepts on one embed.
pub const MAX_FIELDS: usize = 25;
/// Agent names are cut to this length in field names, which keeps a full
/// embed under the platform's per-message character total.
const AGENT_NAME_LIMIT: usize = 100;

pub const NO_PERMISSION: &str = "You do not have permission to use this command.";
pub const INVALID_VALUE: &str = "Error: the interior value must be a valid number.";
pub const MISSING_FIELD: &str = "Error: every field of the form is required.";
pub const SALE_SAVED: &str = "Sale registered successfully!";
pub const STORAGE_FAILURE: &str = "Could not save the change. Please try again.";
pub const REPORT_STARTED: &str = "A new reporting period has started!";
pub const REPORT_FINALIZED: &str =
    "Weekly report finalized and a new period has started successfully!";
pub const REPORT_EMPTY: &str = "No sales found in this period to generate a report.";
pub const RESET_PROMPT: &str =
    "Are you sure you want to delete ALL sales data? This action cannot be undone.";
pub const RESET_DONE: &str = "Database reset successfully! All sales data has been deleted.";
pub const RESET_CANCELLED: &str = "Database reset cancelled.";

fn field(custom_id: &str, label: &str, placeholder: Option<&str>) -> FormField {
    FormField {
        custom_id: custom_id.to_string(),
        label: label.to_string(),
        placeholder: placeholder.map(str::to_string),
        required: true,
    }
}

/// The five-field sale entry form. Field ids match the `SaleForm` keys.
pub fn sale_form() -> FormSpec {
    FormSpec {
        custom_id: SALE_FORM_ID.to_string(),
        title: "Register Property Sale".to_string(),
        fields: vec![
            field("buyer_id", "Character ID (Buyer)", None),
            field("interior_value", "Interior Value", Some("Digits only")),
            field("has_lock", "Has lock? (yes/no)", None),
            field("has_garage", "With garage? (yes/no)", None),
            field("sold_by", "Sold by: (Your name/ID)", None),
        ],
    }
}

fn code(value: &str) -> String {
    format!("```{value}```")
}

/// The standing prompt with the "Register Sale" button.
pub fn registration_prompt() -> ChannelMessage {
    ChannelMessage {
        content: None,
        embeds: vec![Embed::new("Property Sales Registry").with_description(
            "Click the button below to register a property sale quickly and safely.",
        )],
        buttons: vec![Button::new(ButtonId::RegisterSale, "Register Sale", ButtonStyle::Primary)],
    }
}

/// The channel notification for a freshly recorded sale.
pub fn sale_registered(record: &SaleRecord, notify_user_ids: &[String]) -> ChannelMessage {
    let mentions = notify_user_ids
        .iter()
        .map(|id| format!("<@{id}>"))
        .collect::<Vec<_>>()
        .join(" ");

    let embed = Embed::new("🏡 Property Sale Registered")
        .with_description("---")
        .with_field("Sold to:", code(&record.buyer_id), false)
        .with_field("Interior Value:", code(&format_currency(record.interior_value)), false)
        .with_field("Has lock?", code(&record.has_lock), false)
        .with_field("With garage?", code(&record.has_garage), false)
        .with_field("Sold by:", code(&record.sold_by), false)
        .with_footer("If you have attachments to add (photos/clips), reply to this message with your file.")
        .with_timestamp(record.timestamp);

    ChannelMessage {
        content: (!mentions.is_empty()).then_some(mentions),
        embeds: vec![embed],
        buttons: vec![Button::new(ButtonId::EditSale, "Edit Sale", ButtonStyle::Secondary)],
    }
}

/// The answer to `general-sales` / `weekly-sales` when something matched.
pub fn agent_report(report: &AgentReport) -> Embed {
    let prefix = match report.scope {
        ReportScope::AllTime => "📊 General Sales Report for ",
        ReportScope::CurrentWindow => "📊 Weekly Report for ",
    };
    let query = truncate(&report.query.to_uppercase(), TITLE_LIMIT - prefix.chars().count());
    let title = format!("{prefix}{query}");

    let header = format!(
        "**Total Sales:** {}\n**Total Value Sold:** {}\n**Commission (10%):** {}\n\n**Sale Details:**\n",
        report.summary.count,
        code(&format_currency(report.summary.total_value)),
        code(&format_currency_decimal(report.summary.commission)),
    );

    let lines: Vec<String> = report
        .sales
        .iter()
        .map(|sale| {
            format!(
                "- Sold to: {} | Value: {}",
                code(&sale.buyer_id),
                code(&format_currency(sale.interior_value))
            )
        })
        .collect();

    Embed::new(title).with_description(fit_lines(header, &lines))
}

/// Appends as many lines as fit under the description limit.
fn fit_lines(mut description: String, lines: &[String]) -> String {
    for (i, line) in lines.iter().enumerate() {
        let remaining = lines.len() - i;
        let suffix = format!("\n…and {remaining} more sales");
        let separator = if i == 0 { 0 } else { 1 };
        let needed = description.chars().count() + separator + line.chars().count();
        let reserve = if remaining > 1 { suffix.chars().count() } else { 0 };
        if needed + reserve > DESCRIPTION_LIMIT {
            let suffix = if i == 0 { suffix.trim_start_matches('\n') } else { suffix.as_str() };
            description.push_str(suffix);
            return description;
        }
        if i > 0 {
            description.push('\n');
        }
        description.push_str(line);
    }
    description
}

/// Cuts `text` to at most `limit` characters, marking the cut with `…`.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn no_agent_sales(query: &str, scope: ReportScope) -> String {
    match scope {
        ReportScope::AllTime => format!("I couldn't find any sales recorded for agent \"{query}\"."),
        ReportScope::CurrentWindow => {
            format!("I couldn't find any sales for agent \"{query}\" in this period.")
        }
    }
}

/// The end-of-period report, one inline field per agent.
///
/// Agents are split across as many embeds as needed to stay within
/// `MAX_FIELDS` per embed; every part carries its position in the title.
pub fn period_report(report: &PeriodReport) -> Vec<Embed> {
    let chunks: Vec<&[AgentTotals]> = if report.agents.is_empty() {
        vec![&report.agents[..]]
    } else {
        report.agents.chunks(MAX_FIELDS).collect()
    };
    let parts = chunks.len();

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, agents)| {
            let mut embed = if parts == 1 {
                Embed::new("📄 Final Period Report")
            } else {
                Embed::new(format!("📄 Final Period Report ({}/{parts})", i + 1))
            };
            if i == 0 {
                embed = embed.with_description(
                    "The weekly report has been finalized. Commission payments should be processed based on the values below.",
                );
            }
            agents
                .iter()
                .fold(embed.with_timestamp(report.until), |embed, agent| {
                    embed.with_field(
                        format!("Agent: {}", truncate(&agent.agent, AGENT_NAME_LIMIT)),
                        format!(
                            "**Total Sales:** {}\n**Commission (10%):** {}",
                            format_currency(agent.total_value),
                            format_currency_decimal(agent.commission())
                        ),
                        true,
                    )
                })
        })
        .collect()
}

/// The two buttons of the reset confirmation.
pub fn reset_buttons() -> Vec<Button> {
    vec![
        Button::new(ButtonId::ConfirmReset, "Confirm Reset", ButtonStyle::Danger),
        Button::new(ButtonId::CancelReset, "Cancel", ButtonStyle::Secondary),
    ]
}
