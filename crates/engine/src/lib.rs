use crate::error::EngineError;
use alerter::ChannelNotifier;
use analytics::ReportScope;
use chrono::{DateTime, Utc};
use configuration::Channel;
use core_types::{CoreError, SaleForm};
use database::LedgerStore;
use events::{ButtonId, Caller, ChannelMessage, Command, Interaction, Response};
use std::sync::Arc;

pub mod error;
pub mod views;

/// Source of "now" for timestamps and report windows.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The sales bot: turns one `Interaction` into one `Response`.
///
/// Storage and the channel are injected, so the same bot runs behind the HTTP
/// adapter, the CLI and the tests.
pub struct SalesBot {
    store: Arc<dyn LedgerStore>,
    notifier: Arc<dyn ChannelNotifier>,
    notify_user_ids: Vec<String>,
    clock: Clock,
}

impl SalesBot {
    pub fn new(store: Arc<dyn LedgerStore>, notifier: Arc<dyn ChannelNotifier>, channel: &Channel) -> Self {
        Self {
            store,
            notifier,
            notify_user_ids: channel.notify_user_ids.clone(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the wall clock, e.g. with a fixed instant in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Handles an interaction, turning storage failures into a plain rejection.
    pub async fn handle(&self, interaction: Interaction) -> Response {
        let caller = interaction.caller().user_id.clone();
        match self.try_handle(interaction).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = ?e, caller = %caller, "Interaction failed.");
                Response::ephemeral(views::STORAGE_FAILURE)
            }
        }
    }

    /// Handles an interaction, propagating storage write failures.
    pub async fn try_handle(&self, interaction: Interaction) -> Result<Response, EngineError> {
        match interaction {
            Interaction::Command { caller, command } => self.handle_command(&caller, command).await,
            Interaction::Button { caller, button } => self.handle_button(&caller, button).await,
            Interaction::FormSubmit { caller, form } => self.handle_form(&caller, form).await,
        }
    }

    /// Posts the standing "register a sale" prompt to the channel.
    pub async fn announce(&self) -> Result<(), alerter::error::AlerterError> {
        self.notifier.post(&views::registration_prompt()).await?;
        tracing::info!("Sales registration prompt posted.");
        Ok(())
    }

    async fn handle_command(&self, caller: &Caller, command: Command) -> Result<Response, EngineError> {
        tracing::info!(command = command.name(), caller = %caller.user_id, "Command received.");

        if command.requires_admin() && !caller.is_admin {
            return Ok(deny(caller, command.name()));
        }

        match command {
            Command::GeneralSales { agent } => Ok(self.agent_sales(&agent, ReportScope::AllTime).await),
            Command::WeeklySales { agent } => Ok(self.agent_sales(&agent, ReportScope::CurrentWindow).await),
            Command::StartReport => self.start_report().await,
            Command::FinalizeReport => self.finalize_report().await,
            Command::Sale => Ok(Response::ShowForm(views::sale_form())),
            Command::ResetDatabase => Ok(Response::Confirm {
                content: views::RESET_PROMPT.to_string(),
                buttons: views::reset_buttons(),
                ephemeral: true,
            }),
        }
    }

    async fn handle_button(&self, caller: &Caller, button: ButtonId) -> Result<Response, EngineError> {
        tracing::info!(button = button.custom_id(), caller = %caller.user_id, "Button clicked.");

        if button.requires_admin() && !caller.is_admin {
            return Ok(deny(caller, button.custom_id()));
        }

        match button {
            // Editing never touches the stored record; the form records a new sale.
            ButtonId::RegisterSale | ButtonId::EditSale => Ok(Response::ShowForm(views::sale_form())),
            ButtonId::ConfirmReset => {
                self.store.reset_all().await?;
                tracing::warn!(caller = %caller.user_id, "Ledger reset: all sales deleted.");
                Ok(Response::Update {
                    content: views::RESET_DONE.to_string(),
                })
            }
            ButtonId::CancelReset => Ok(Response::Update {
                content: views::RESET_CANCELLED.to_string(),
            }),
        }
    }

    async fn handle_form(&self, caller: &Caller, form: SaleForm) -> Result<Response, EngineError> {
        let record = match form.into_record(self.now()) {
            Ok(record) => record,
            Err(e @ CoreError::InvalidNumericInput { .. }) => {
                tracing::info!(caller = %caller.user_id, error = %e, "Sale form rejected.");
                return Ok(Response::ephemeral(views::INVALID_VALUE));
            }
            Err(e @ CoreError::MissingField(_)) => {
                tracing::info!(caller = %caller.user_id, error = %e, "Sale form rejected.");
                return Ok(Response::ephemeral(views::MISSING_FIELD));
            }
        };

        self.store.append(record.clone()).await?;
        tracing::info!(
            caller = %caller.user_id,
            sold_by = %record.sold_by,
            interior_value = record.interior_value,
            "Sale recorded."
        );

        let notification = views::sale_registered(&record, &self.notify_user_ids);
        if let Err(e) = self.notifier.post(&notification).await {
            tracing::warn!(error = %e, "Could not post the sale notification to the channel.");
        }

        Ok(Response::ephemeral(views::SALE_SAVED))
    }

    async fn agent_sales(&self, agent: &str, scope: ReportScope) -> Response {
        let query = agent.to_lowercase();
        let ledger = self.store.load().await;
        let report = analytics::agent_report(&ledger, &query, scope);

        if report.summary.count == 0 {
            return Response::public(views::no_agent_sales(&query, scope));
        }
        Response::Embed {
            embed: views::agent_report(&report),
            ephemeral: false,
        }
    }

    async fn start_report(&self) -> Result<Response, EngineError> {
        let now = self.now();
        self.store.set_report_window_start(now).await?;
        tracing::info!(since = %now, "Report window opened.");
        Ok(Response::ephemeral(views::REPORT_STARTED))
    }

    /// Closes the current window at the finalize instant and emits its
    /// report when there is anything to report.
    ///
    /// The window is rolled before posting, in the same store cycle that
    /// takes the snapshot, so a sale lands in exactly one period.
    async fn finalize_report(&self) -> Result<Response, EngineError> {
        let now = self.now();
        let closed = self.store.roll_report_window(now).await?;
        tracing::info!(since = %now, "Report window rolled forward.");

        let report = analytics::period_report(&closed, now);
        if report.is_empty() {
            tracing::info!("Finalize requested with no sales in the window.");
            return Ok(Response::ephemeral(views::REPORT_EMPTY));
        }

        let embeds = views::period_report(&report);
        let mut posted = true;
        for embed in &embeds {
            let message = ChannelMessage {
                content: None,
                embeds: vec![embed.clone()],
                buttons: Vec::new(),
            };
            if let Err(e) = self.notifier.post(&message).await {
                tracing::warn!(error = %e, "Could not post the period report, returning it to the caller.");
                posted = false;
                break;
            }
        }
        if !posted {
            return Ok(Response::Embeds {
                embeds,
                ephemeral: true,
            });
        }

        tracing::info!(
            sales = report.summary.count,
            agents = report.agents.len(),
            total_value = report.summary.total_value,
            "Period report posted."
        );
        Ok(Response::ephemeral(views::REPORT_FINALIZED))
    }
}

fn deny(caller: &Caller, action: &str) -> Response {
    tracing::warn!(caller = %caller.user_id, action, "Admin-only action denied.");
    Response::ephemeral(views::NO_PERMISSION)
}
