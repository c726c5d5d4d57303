//! End-to-end interaction flows against an in-memory ledger and a recording
//! channel.

use alerter::ChannelNotifier;
use alerter::error::AlerterError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use configuration::Channel;
use core_types::{Ledger, SaleForm};
use database::{JsonFileStore, LedgerStore, MemoryStore};
use engine::{views, SalesBot};
use events::{ButtonId, Caller, ChannelMessage, Command, Interaction, Response};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingNotifier {
    posted: Mutex<Vec<ChannelMessage>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    fn posted(&self) -> Vec<ChannelMessage> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelNotifier for RecordingNotifier {
    async fn post(&self, message: &ChannelMessage) -> Result<(), AlerterError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AlerterError::ApiError("channel unavailable".to_string()));
        }
        self.posted.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// A clock the test can move forward.
#[derive(Clone)]
struct TestClock(Arc<Mutex<DateTime<Utc>>>);

impl TestClock {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap())))
    }

    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }

    fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

struct Harness {
    bot: SalesBot,
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    clock: TestClock,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = TestClock::new();
    let channel = Channel {
        notify_user_ids: vec!["583690987793285130".to_string()],
        ..Channel::default()
    };
    let clock_for_bot = clock.clone();
    let bot = SalesBot::new(store.clone(), notifier.clone(), &channel)
        .with_clock(Arc::new(move || clock_for_bot.now()));
    Harness {
        bot,
        store,
        notifier,
        clock,
    }
}

fn agent() -> Caller {
    Caller {
        user_id: "100".to_string(),
        display_name: "Agent".to_string(),
        is_admin: false,
    }
}

fn admin() -> Caller {
    Caller {
        user_id: "1".to_string(),
        display_name: "Boss".to_string(),
        is_admin: true,
    }
}

fn form(sold_by: &str, value: &str) -> SaleForm {
    SaleForm {
        buyer_id: "4821".to_string(),
        interior_value: value.to_string(),
        has_lock: "yes".to_string(),
        has_garage: "no".to_string(),
        sold_by: sold_by.to_string(),
    }
}

async fn submit(h: &Harness, sold_by: &str, value: &str) -> Response {
    h.bot
        .handle(Interaction::FormSubmit {
            caller: agent(),
            form: form(sold_by, value),
        })
        .await
}

async fn command(h: &Harness, caller: Caller, command: Command) -> Response {
    h.bot.handle(Interaction::Command { caller, command }).await
}

async fn click(h: &Harness, caller: Caller, button: ButtonId) -> Response {
    h.bot.handle(Interaction::Button { caller, button }).await
}

#[tokio::test]
async fn sale_command_and_buttons_open_the_form() {
    let h = harness();
    for response in [
        command(&h, agent(), Command::Sale).await,
        click(&h, agent(), ButtonId::RegisterSale).await,
        click(&h, agent(), ButtonId::EditSale).await,
    ] {
        assert_eq!(response, Response::ShowForm(views::sale_form()));
    }
    assert!(h.store.load().await.is_empty());
}

#[tokio::test]
async fn submitted_sale_is_stored_and_announced() {
    let h = harness();

    let response = submit(&h, "Alice", "$1.000").await;
    assert_eq!(response, Response::ephemeral(views::SALE_SAVED));

    let ledger = h.store.load().await;
    assert_eq!(ledger.sales.len(), 1);
    assert_eq!(ledger.sales[0].interior_value, 1_000);
    assert_eq!(ledger.sales[0].timestamp, h.clock.now());

    let posted = h.notifier.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].content.as_deref(), Some("<@583690987793285130>"));
    assert_eq!(posted[0].buttons[0].id, ButtonId::EditSale);
}

#[tokio::test]
async fn invalid_value_is_rejected_without_writing() {
    let h = harness();
    let response = submit(&h, "Alice", "a lot").await;
    assert_eq!(response, Response::ephemeral(views::INVALID_VALUE));
    assert!(h.store.load().await.is_empty());
    assert!(h.notifier.posted().is_empty());
}

#[tokio::test]
async fn sale_is_kept_when_channel_post_fails() {
    let h = harness();
    h.notifier.fail.store(true, Ordering::SeqCst);

    let response = submit(&h, "Alice", "500").await;
    assert_eq!(response, Response::ephemeral(views::SALE_SAVED));
    assert_eq!(h.store.load().await.sales.len(), 1);
}

#[tokio::test]
async fn storage_failure_is_a_plain_rejection() {
    let h = harness();
    h.store.set_fail_writes(true);

    let response = submit(&h, "Alice", "500").await;
    assert_eq!(response, Response::ephemeral(views::STORAGE_FAILURE));
    assert!(h.notifier.posted().is_empty());

    let err = h
        .bot
        .try_handle(Interaction::FormSubmit {
            caller: agent(),
            form: form("Alice", "500"),
        })
        .await;
    assert!(err.is_err());
}

#[tokio::test]
async fn general_sales_matches_agent_substring() {
    let h = harness();
    submit(&h, "Alice", "1000").await;
    submit(&h, "alice B", "500").await;
    submit(&h, "Bob", "700").await;

    let response = command(
        &h,
        agent(),
        Command::GeneralSales {
            agent: "ALICE".to_string(),
        },
    )
    .await;

    match response {
        Response::Embed { embed, ephemeral } => {
            assert!(!ephemeral);
            assert_eq!(embed.title, "📊 General Sales Report for ALICE");
            let description = embed.description.unwrap();
            assert!(description.contains("**Total Sales:** 2"));
            assert!(description.contains("```$1.500```"));
            assert!(description.contains("```$150```"));
        }
        other => panic!("expected an embed, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_agent_gets_plain_message() {
    let h = harness();
    let response = command(
        &h,
        agent(),
        Command::GeneralSales {
            agent: "Zed".to_string(),
        },
    )
    .await;
    assert_eq!(
        response,
        Response::public(views::no_agent_sales("zed", analytics::ReportScope::AllTime))
    );
}

#[tokio::test]
async fn weekly_sales_only_counts_the_open_window() {
    let h = harness();
    submit(&h, "Alice", "1000").await;

    h.clock.advance(Duration::hours(1));
    command(&h, admin(), Command::StartReport).await;
    h.clock.advance(Duration::hours(1));
    submit(&h, "Alice", "300").await;

    let response = command(
        &h,
        agent(),
        Command::WeeklySales {
            agent: "alice".to_string(),
        },
    )
    .await;
    match response {
        Response::Embed { embed, .. } => {
            assert_eq!(embed.title, "📊 Weekly Report for ALICE");
            let description = embed.description.unwrap();
            assert!(description.contains("**Total Sales:** 1"));
            assert!(description.contains("```$300```"));
            assert!(description.contains("```$30```"));
        }
        other => panic!("expected an embed, got {other:?}"),
    }
}

#[tokio::test]
async fn admin_commands_reject_non_admins_without_changes() {
    let h = harness();
    submit(&h, "Alice", "1000").await;
    let before = h.store.load().await;
    let posts_before = h.notifier.posted().len();

    for cmd in [Command::StartReport, Command::FinalizeReport, Command::ResetDatabase] {
        let response = command(&h, agent(), cmd).await;
        assert_eq!(response, Response::ephemeral(views::NO_PERMISSION));
    }
    let response = click(&h, agent(), ButtonId::ConfirmReset).await;
    assert_eq!(response, Response::ephemeral(views::NO_PERMISSION));

    assert_eq!(h.store.load().await, before);
    assert_eq!(h.notifier.posted().len(), posts_before);
}

#[tokio::test]
async fn start_report_opens_window_now() {
    let h = harness();
    let response = command(&h, admin(), Command::StartReport).await;
    assert_eq!(response, Response::ephemeral(views::REPORT_STARTED));
    assert_eq!(h.store.load().await.report_window_start, Some(h.clock.now()));
}

#[tokio::test]
async fn finalize_posts_group_report_and_rolls_window() {
    let h = harness();
    command(&h, admin(), Command::StartReport).await;
    submit(&h, "Bob", "100").await;
    submit(&h, "bob", "200").await;
    submit(&h, "`Bob`", "300").await;

    h.clock.advance(Duration::days(7));
    let finalize_at = h.clock.now();
    let response = command(&h, admin(), Command::FinalizeReport).await;
    assert_eq!(response, Response::ephemeral(views::REPORT_FINALIZED));

    let posted = h.notifier.posted();
    let report = posted.last().unwrap();
    let fields = &report.embeds[0].fields;
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "Agent: Bob");
    assert_eq!(fields[0].value, "**Total Sales:** $400\n**Commission (10%):** $40");
    assert_eq!(fields[1].name, "Agent: bob");

    assert_eq!(h.store.load().await.report_window_start, Some(finalize_at));
}

#[tokio::test]
async fn finalize_with_empty_window_still_rolls_forward() {
    let h = harness();
    submit(&h, "Alice", "1000").await;
    h.clock.advance(Duration::minutes(5));
    command(&h, admin(), Command::StartReport).await;
    let posts_before = h.notifier.posted().len();

    h.clock.advance(Duration::days(1));
    let first = h.clock.now();
    let response = command(&h, admin(), Command::FinalizeReport).await;
    assert_eq!(response, Response::ephemeral(views::REPORT_EMPTY));
    assert_eq!(h.notifier.posted().len(), posts_before);
    assert_eq!(h.store.load().await.report_window_start, Some(first));

    h.clock.advance(Duration::days(1));
    command(&h, admin(), Command::FinalizeReport).await;
    assert_eq!(h.store.load().await.report_window_start, Some(h.clock.now()));
}

#[tokio::test]
async fn finalize_returns_report_when_channel_is_down() {
    let h = harness();
    submit(&h, "Alice", "1000").await;
    h.notifier.fail.store(true, Ordering::SeqCst);
    h.clock.advance(Duration::hours(1));

    let response = command(&h, admin(), Command::FinalizeReport).await;
    match response {
        Response::Embeds { embeds, ephemeral } => {
            assert!(ephemeral);
            assert_eq!(embeds[0].fields[0].name, "Agent: Alice");
        }
        other => panic!("expected the report embeds, got {other:?}"),
    }
    assert_eq!(h.store.load().await.report_window_start, Some(h.clock.now()));
}

#[tokio::test]
async fn large_period_report_is_posted_in_parts() {
    let h = harness();
    for i in 0..30 {
        submit(&h, &format!("Agent {i}"), "1000").await;
    }
    let posts_before = h.notifier.posted().len();
    h.clock.advance(Duration::hours(1));

    let response = command(&h, admin(), Command::FinalizeReport).await;
    assert_eq!(response, Response::ephemeral(views::REPORT_FINALIZED));

    let parts = &h.notifier.posted()[posts_before..];
    assert_eq!(parts.len(), 2);
    let fields: Vec<usize> = parts.iter().map(|m| m.embeds[0].fields.len()).collect();
    assert_eq!(fields, vec![views::MAX_FIELDS, 5]);
}

#[tokio::test]
async fn large_report_falls_back_in_parts_when_channel_is_down() {
    let h = harness();
    for i in 0..30 {
        submit(&h, &format!("Agent {i}"), "1000").await;
    }
    h.notifier.fail.store(true, Ordering::SeqCst);
    h.clock.advance(Duration::hours(1));

    match command(&h, admin(), Command::FinalizeReport).await {
        Response::Embeds { embeds, .. } => {
            assert_eq!(embeds.len(), 2);
            assert!(embeds.iter().all(|e| e.fields.len() <= views::MAX_FIELDS));
        }
        other => panic!("expected the report embeds, got {other:?}"),
    }
}

#[tokio::test]
async fn sale_at_the_finalize_instant_belongs_to_the_next_period() {
    let h = harness();
    command(&h, admin(), Command::StartReport).await;
    h.clock.advance(Duration::hours(1));
    submit(&h, "Alice", "1000").await;
    h.clock.advance(Duration::hours(1));
    // Same instant as the finalize below.
    submit(&h, "Bob", "700").await;
    let posts_before = h.notifier.posted().len();

    command(&h, admin(), Command::FinalizeReport).await;
    let report = &h.notifier.posted()[posts_before];
    let names: Vec<&str> = report.embeds[0].fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Agent: Alice"]);

    let response = command(
        &h,
        agent(),
        Command::WeeklySales {
            agent: "bob".to_string(),
        },
    )
    .await;
    assert!(matches!(response, Response::Embed { .. }));
}

#[tokio::test]
async fn finalize_posts_nothing_when_window_cannot_be_saved() {
    let h = harness();
    submit(&h, "Alice", "1000").await;
    let posts_before = h.notifier.posted().len();
    h.store.set_fail_writes(true);
    h.clock.advance(Duration::hours(1));

    let response = command(&h, admin(), Command::FinalizeReport).await;
    assert_eq!(response, Response::ephemeral(views::STORAGE_FAILURE));
    assert_eq!(h.notifier.posted().len(), posts_before);
    assert_eq!(h.store.load().await.report_window_start, None);
}

#[tokio::test]
async fn reset_needs_confirmation() {
    let h = harness();
    submit(&h, "Alice", "1000").await;
    command(&h, admin(), Command::StartReport).await;

    let prompt = command(&h, admin(), Command::ResetDatabase).await;
    match prompt {
        Response::Confirm { buttons, .. } => {
            let ids: Vec<_> = buttons.iter().map(|b| b.id).collect();
            assert_eq!(ids, vec![ButtonId::ConfirmReset, ButtonId::CancelReset]);
        }
        other => panic!("expected a confirmation prompt, got {other:?}"),
    }
    assert_eq!(h.store.load().await.sales.len(), 1);

    let cancelled = click(&h, admin(), ButtonId::CancelReset).await;
    assert_eq!(
        cancelled,
        Response::Update {
            content: views::RESET_CANCELLED.to_string()
        }
    );
    assert_eq!(h.store.load().await.sales.len(), 1);

    let confirmed = click(&h, admin(), ButtonId::ConfirmReset).await;
    assert_eq!(
        confirmed,
        Response::Update {
            content: views::RESET_DONE.to_string()
        }
    );
    assert_eq!(h.store.load().await, Ledger::new());
}

#[tokio::test]
async fn announce_posts_registration_prompt() {
    let h = harness();
    h.bot.announce().await.unwrap();
    let posted = h.notifier.posted();
    assert_eq!(posted[0].buttons[0].id, ButtonId::RegisterSale);
}

#[tokio::test]
async fn file_backed_bot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.json");
    let notifier = Arc::new(RecordingNotifier::default());

    {
        let bot = SalesBot::new(Arc::new(JsonFileStore::new(&path)), notifier.clone(), &Channel::default());
        bot.handle(Interaction::FormSubmit {
            caller: agent(),
            form: form("Alice", "1000"),
        })
        .await;
    }

    let bot = SalesBot::new(Arc::new(JsonFileStore::new(&path)), notifier, &Channel::default());
    let response = bot
        .handle(Interaction::Command {
            caller: agent(),
            command: Command::GeneralSales {
                agent: "alice".to_string(),
            },
        })
        .await;
    assert!(matches!(response, Response::Embed { .. }));
}
