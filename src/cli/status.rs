//! Handler for the `status` command.

use std::path::Path;

use chrono::Utc;

use crate::adapter::outbound::state::JsonFileStore;
use crate::domain::record::format_timestamp;
use crate::error::{Result, StoreError};
use crate::infrastructure::config::settings::Config;
use crate::port::StateStore;

/// Execute the status command.
///
/// Reads the record without repairing it.
pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = Config::resolve(config_path)?;
    let policy = config.policy()?;
    let store = JsonFileStore::new(config.state.path.clone());

    println!();
    println!("fxwatch v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Pair:          {} ({})", config.alert.pair, config.symbol());
    println!("Target rate:   {:.2}", policy.threshold());
    println!("Interval:      {} min", config.alert.interval_minutes);
    println!("State file:    {}", store.path().display());

    match store.read().await {
        Ok(Some(record)) if !record.is_never() => {
            let last = record.last_notification();
            println!("Last notified: {}", format_timestamp(last));
            match last.checked_add_signed(policy.cooldown()) {
                Some(next) if next <= Utc::now() => println!("Next alert:    allowed now"),
                Some(next) => println!("Next alert:    not before {}", format_timestamp(next)),
                None => println!("Next alert:    beyond representable range"),
            }
        }
        Ok(_) => {
            println!("Last notified: never");
            println!("Next alert:    allowed now");
        }
        Err(StoreError::Corrupt(reason)) => {
            println!("Last notified: unreadable record ({reason})");
            println!("Next alert:    allowed now (record will be reset)");
        }
        Err(e) => return Err(e.into()),
    }

    println!();
    Ok(())
}
