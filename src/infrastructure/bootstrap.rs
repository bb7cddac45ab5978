//! Composition root: builds a ready-to-run orchestrator from configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::notifier::line::LineNotifier;
use crate::adapter::outbound::notifier::log::LogNotifier;
use crate::adapter::outbound::state::JsonFileStore;
use crate::adapter::outbound::yahoo::YahooRateSource;
use crate::application::cycle::Orchestrator;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{CycleObserver, Notifier, TracingObserver};

/// Build the notifier for this run.
///
/// Dry runs log the alert instead of sending it.
#[allow(clippy::result_large_err)]
pub fn build_notifier(config: &Config, dry_run: bool) -> Result<Arc<dyn Notifier>> {
    if dry_run {
        info!("Dry-run mode enabled - notifications will only be logged");
        return Ok(Arc::new(LogNotifier));
    }
    Ok(Arc::new(LineNotifier::from_config(&config.notifier)?))
}

/// Build the orchestrator with production adapters.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or an HTTP client
/// cannot be constructed.
#[allow(clippy::result_large_err)]
pub fn build_orchestrator(config: &Config, dry_run: bool) -> Result<Orchestrator> {
    let policy = config.policy()?;
    let source = YahooRateSource::from_config(&config.source, config.symbol())?;
    let notifier = build_notifier(config, dry_run)?;
    let store = JsonFileStore::new(config.state.path.clone());
    let observer: Arc<dyn CycleObserver> = Arc::new(TracingObserver);

    info!(
        pair = %config.alert.pair,
        symbol = %source.symbol(),
        target_rate = policy.threshold(),
        interval_minutes = config.alert.interval_minutes,
        notifier = notifier.name(),
        state = %config.state.path.display(),
        "Configuration loaded"
    );

    Ok(Orchestrator::new(
        config.alert.pair.clone(),
        policy,
        Arc::new(source),
        notifier,
        Arc::new(store),
        observer,
    ))
}
