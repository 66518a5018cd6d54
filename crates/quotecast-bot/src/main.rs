use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use quotecast_core::delivery::QuoteDelivery;
use quotecast_core::QuotecastConfig;
use quotecast_quotes::Corpus;
use quotecast_scheduler::{FiredJob, JobAction, SchedulerEngine, SchedulerHandle};
use quotecast_telegram::{BotState, TelegramAdapter};

/// Telegram bot that sends random quotes on demand or on a schedule.
#[derive(Parser)]
#[command(name = "quotecast", version, about)]
struct Cli {
    /// Telegram bot token (from @BotFather).
    token: String,

    /// Path to the TOML config file. Falls back to $QUOTECAST_CONFIG, then
    /// ./quotecast.toml.
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotecast_bot=info,quotecast_scheduler=info,quotecast_telegram=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = QuotecastConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({e}), using defaults");
        QuotecastConfig::default()
    });
    info!(quotes_path = %config.quotes.path, "config loaded");

    // Fired-job channel: SchedulerEngine → delivery router task
    let (fired_tx, fired_rx) = tokio::sync::mpsc::channel::<FiredJob>(256);
    // Quote delivery channel: delivery router → Telegram delivery task
    let (delivery_tx, delivery_rx) = tokio::sync::mpsc::channel::<QuoteDelivery>(256);

    // Scheduler: management handle for the command handlers + engine for the
    // background tick loop, both over the same store.
    let scheduler = SchedulerHandle::new();
    let engine = SchedulerEngine::new(&scheduler, fired_tx);

    // Delivery router: interprets every fired job's action. The corpus is
    // re-read per firing so quote file edits apply without a restart.
    let quotes_path = config.quotes.path.clone();
    tokio::spawn(run_delivery_router(fired_rx, delivery_tx, quotes_path));

    // Spawn the scheduler engine loop in the background.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move { engine.run(shutdown_rx).await });

    let state = Arc::new(BotState {
        scheduler,
        quotes_path: config.quotes.path,
    });

    let adapter = TelegramAdapter::new(&cli.token, state);
    let result = adapter.run(delivery_rx).await;

    // Signal the scheduler to stop before reporting the outcome.
    let _ = shutdown_tx.send(true);
    result.map_err(Into::into)
}

/// Route fired scheduler jobs to the Telegram delivery task.
///
/// A failed corpus read or pick loses that one firing; the job's future
/// ticks are unaffected.
async fn run_delivery_router(
    mut fired_rx: tokio::sync::mpsc::Receiver<FiredJob>,
    delivery_tx: tokio::sync::mpsc::Sender<QuoteDelivery>,
    quotes_path: String,
) {
    while let Some(fired) = fired_rx.recv().await {
        match fired.action {
            JobAction::SendQuote { chat_id } => {
                let message = match Corpus::load(&quotes_path).and_then(|c| c.pick().cloned()) {
                    Ok(quote) => quote.formatted(),
                    Err(e) => {
                        warn!(job_id = %fired.id, error = %e, "quote pick failed — firing skipped");
                        continue;
                    }
                };

                let delivery = QuoteDelivery {
                    job_id: fired.id.clone(),
                    chat_id,
                    message,
                };
                if delivery_tx.send(delivery).await.is_err() {
                    warn!(job_id = %fired.id, "telegram delivery channel closed — quote dropped");
                }
            }
        }
    }
}
