//! Handler for the `run` command.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::adapter::outbound::state::CycleLock;
use crate::application::cycle::{CycleOutcome, NoAction, Persistence};
use crate::cli::{RunArgs, EXIT_CYCLE_FAILED, EXIT_ERROR, EXIT_OK};
use crate::error::{LockError, Result};
use crate::infrastructure::bootstrap::build_orchestrator;
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::settings::Config;

/// Execute the run command and return the process exit status.
///
/// Without `--strict` every branch exits 0, so a scheduler only hears about
/// problems through the log.
pub async fn execute(config_path: Option<&Path>, args: &RunArgs) -> i32 {
    let mut config = match Config::resolve(config_path) {
        Ok(config) => config,
        Err(e) => {
            let mut logging = LoggingConfig::default();
            apply_logging_overrides(&mut logging, args);
            logging.init();
            error!(error = %e, "Failed to load configuration");
            return error_exit(args);
        }
    };

    apply_logging_overrides(&mut config.logging, args);
    config.init_logging();

    match run_once(&config, args).await {
        Ok(outcome) => {
            report(&outcome);
            if args.strict && outcome.is_failure() {
                EXIT_CYCLE_FAILED
            } else {
                EXIT_OK
            }
        }
        Err(e) => {
            error!(error = %e, error_debug = ?e, "Unexpected error during run");
            error_exit(args)
        }
    }
}

async fn run_once(config: &Config, args: &RunArgs) -> Result<CycleOutcome> {
    let orchestrator = build_orchestrator(config, args.dry_run)?;

    let lock_path = config.state.lock_path();
    let stale_after = Duration::from_secs(config.state.lock_stale_secs);
    let _lock = match CycleLock::acquire(&lock_path, stale_after) {
        Ok(lock) => lock,
        Err(LockError::Held { path }) => {
            warn!(lock = %path, "Another invocation is running, skipping cycle");
            return Ok(CycleOutcome::Skipped {
                reason: format!("lock held: {path}"),
            });
        }
        Err(e) => return Err(e.into()),
    };

    Ok(orchestrator.run_cycle().await)
}

fn apply_logging_overrides(logging: &mut LoggingConfig, args: &RunArgs) {
    if let Some(ref level) = args.log_level {
        logging.level = level.clone();
    }
    if args.json_logs {
        logging.format = "json".to_string();
    }
}

const fn error_exit(args: &RunArgs) -> i32 {
    if args.strict {
        EXIT_ERROR
    } else {
        EXIT_OK
    }
}

fn report(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::Skipped { reason } => {
            info!(reason = %reason, outcome = "skipped", "Cycle finished");
        }
        CycleOutcome::NoAction(NoAction::BelowThreshold { rate }) => {
            info!(rate = %rate, outcome = "below_threshold", "Cycle finished");
        }
        CycleOutcome::NoAction(NoAction::CoolingDown { rate, remaining }) => {
            info!(
                rate = %rate,
                remaining_secs = remaining.num_seconds(),
                outcome = "cooling_down",
                "Cycle finished"
            );
        }
        CycleOutcome::NoAction(NoAction::DeliveryFailed { rate, reason }) => {
            warn!(rate = %rate, reason = %reason, outcome = "delivery_failed", "Cycle finished");
        }
        CycleOutcome::Notified {
            rate,
            persistence: Persistence::Saved,
            ..
        } => {
            info!(rate = %rate, outcome = "notified", "Cycle finished");
        }
        CycleOutcome::Notified {
            rate,
            persistence: Persistence::Failed { reason },
            ..
        } => {
            warn!(rate = %rate, reason = %reason, outcome = "notified_unsaved", "Cycle finished");
        }
    }
}
