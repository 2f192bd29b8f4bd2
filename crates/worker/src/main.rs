use std::time::Duration;

use signal_common::config::AppConfig;
use signal_engine::dispatcher::Dispatcher;
use signal_engine::seen::{InMemorySeenSet, SeenStore};
use signal_notifier::onesignal::OneSignalNotifier;
use signal_poller::poller::SignalPoller;
use signal_worker::scheduler::Scheduler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "signal_worker=info,signal_engine=info,signal_poller=info,signal_notifier=info"
                    .into()
            }),
        )
        .json()
        .init();

    tracing::info!("Signal worker starting...");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(
        db_host = %config.database.host,
        db_name = %config.database.name,
        poll_interval_secs = config.poll_interval_secs,
        odds_threshold = config.odds_threshold,
        "Configuration loaded"
    );

    let poller = SignalPoller::from_config(&config);
    let notifier = OneSignalNotifier::new(config.onesignal.clone());
    let dispatcher = Dispatcher::new(notifier, InMemorySeenSet::new());

    let mut scheduler = Scheduler::new(
        poller,
        dispatcher,
        Duration::from_secs(config.poll_interval_secs),
    );

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received shutdown signal, stopping gracefully..."),
            Err(e) => {
                // Without a signal handler the process runs until killed
                tracing::warn!(error = %e, "Could not listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        }
    };

    let cycles = scheduler.run(shutdown).await;

    tracing::info!(
        cycles,
        seen = scheduler.dispatcher().seen().len(),
        "Signal worker stopped."
    );
    Ok(())
}
