use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::{Config, LogFormat};
use core_types::SaleForm;
use database::JsonFileStore;
use engine::SalesBot;
use events::{ButtonId, Caller, Command, Embed, Interaction, Response};
use std::path::PathBuf;
use std::sync::Arc;

/// The main entry point for the sales ledger.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _log_guard = configuration::init_tracing(&config.logging).context("Failed to initialize logging")?;

    let bot = build_bot(&config);

    match cli.command {
        Commands::Serve => serve(&config, bot).await,
        Commands::RecordSale(args) => {
            let interaction = Interaction::FormSubmit {
                caller: cli_caller(),
                form: args.into(),
            };
            run(&bot, interaction).await
        }
        Commands::GeneralSales(args) => run_command(&bot, Command::GeneralSales { agent: args.agent }).await,
        Commands::WeeklySales(args) => run_command(&bot, Command::WeeklySales { agent: args.agent }).await,
        Commands::StartReport => run_command(&bot, Command::StartReport).await,
        Commands::FinalizeReport => run_command(&bot, Command::FinalizeReport).await,
        Commands::ResetDatabase(args) => reset_database(&bot, args.yes).await,
        Commands::ListCommands => {
            let definitions = events::command_definitions();
            println!("{}", serde_json::to_string_pretty(&definitions)?);
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Records property sales and produces agent and period commission reports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP interaction endpoint.
    Serve,
    /// Record a sale as if the entry form had been submitted.
    RecordSale(RecordSaleArgs),
    /// All recorded sales of an agent.
    GeneralSales(AgentArgs),
    /// Sales of an agent in the current report window.
    WeeklySales(AgentArgs),
    /// Open a new report window starting now.
    StartReport,
    /// Publish the period report and open a new window.
    FinalizeReport,
    /// Delete every recorded sale.
    ResetDatabase(ResetArgs),
    /// Print the slash command definitions as JSON.
    #[command(name = "commands")]
    ListCommands,
}

#[derive(Args)]
struct RecordSaleArgs {
    /// The buyer's character ID.
    #[arg(long)]
    buyer: String,

    /// Interior value; separators such as `.` or `$` are ignored.
    #[arg(long)]
    value: String,

    /// Whether the property has a lock (free text, e.g. "yes").
    #[arg(long)]
    lock: String,

    /// Whether the property comes with a garage (free text, e.g. "no").
    #[arg(long)]
    garage: String,

    /// The agent who made the sale.
    #[arg(long)]
    sold_by: String,
}

impl From<RecordSaleArgs> for SaleForm {
    fn from(args: RecordSaleArgs) -> Self {
        SaleForm {
            buyer_id: args.buyer,
            interior_value: args.value,
            has_lock: args.lock,
            has_garage: args.garage,
            sold_by: args.sold_by,
        }
    }
}

#[derive(Args)]
struct AgentArgs {
    /// Agent name or part of it (case-insensitive).
    #[arg(long)]
    agent: String,
}

#[derive(Args)]
struct ResetArgs {
    /// Confirm the reset without prompting.
    #[arg(long)]
    yes: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn build_bot(config: &Config) -> Arc<SalesBot> {
    let store = Arc::new(JsonFileStore::new(&config.storage.path));
    let notifier = alerter::notifier_from_config(&config.channel);
    tracing::info!(path = %store.path().display(), "Using ledger file.");
    Arc::new(SalesBot::new(store, notifier, &config.channel))
}

/// The operator at the terminal is trusted as an administrator.
fn cli_caller() -> Caller {
    Caller {
        user_id: "cli".to_string(),
        display_name: "Operator".to_string(),
        is_admin: true,
    }
}

async fn serve(config: &Config, bot: Arc<SalesBot>) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    if config.channel.announce_on_startup {
        if let Err(e) = bot.announce().await {
            tracing::warn!(error = %e, "Could not post the registration prompt.");
        }
    }
    web_server::run_server(addr, bot).await
}

async fn run_command(bot: &SalesBot, command: Command) -> anyhow::Result<()> {
    run(
        bot,
        Interaction::Command {
            caller: cli_caller(),
            command,
        },
    )
    .await
}

async fn run(bot: &SalesBot, interaction: Interaction) -> anyhow::Result<()> {
    let response = bot
        .try_handle(interaction)
        .await
        .context("Failed to update the ledger")?;
    print_response(&response);
    Ok(())
}

/// Resets the ledger, walking through the same confirmation the chat flow uses.
async fn reset_database(bot: &SalesBot, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        run_command(bot, Command::ResetDatabase).await?;
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }
    run(
        bot,
        Interaction::Button {
            caller: cli_caller(),
            button: ButtonId::ConfirmReset,
        },
    )
    .await
}

fn print_response(response: &Response) {
    match response {
        Response::Message { content, .. }
        | Response::Update { content }
        | Response::Confirm { content, .. } => println!("{content}"),
        Response::Embed { embed, .. } => println!("{}", embed_table(embed)),
        Response::Embeds { embeds, .. } => {
            for embed in embeds {
                println!("{}", embed_table(embed));
            }
        }
        Response::ShowForm(form) => {
            let labels: Vec<&str> = form.fields.iter().map(|f| f.label.as_str()).collect();
            println!("{} requires: {}", form.title, labels.join(", "));
        }
    }
}

fn embed_table(embed: &Embed) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![embed.title.clone()]);

    if let Some(description) = &embed.description {
        table.add_row(vec![description.replace("```", "")]);
    }
    for field in &embed.fields {
        table.add_row(vec![format!("{}\n{}", field.name, field.value.replace("```", ""))]);
    }
    table
}
