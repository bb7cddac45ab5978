//! Configuration validation command.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::{Config, ENV_LINE_NOTIFY_TOKEN};

/// Validate configuration and environment without running a cycle.
pub fn execute_config(config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Checking configuration: {}", path.display()),
        None => println!("Checking configuration from environment"),
    }
    println!();

    let config = Config::resolve(config_path)?;
    let policy = config.policy()?;

    println!("✓ Configuration is valid");
    println!();
    println!("Summary:");
    println!("  Pair: {} ({})", config.alert.pair, config.symbol());
    println!("  Target rate: {:.2}", policy.threshold());
    println!("  Interval: {} min", config.alert.interval_minutes);
    println!("  Rate source: {}", config.source.api_url);
    println!("  Notifier: {}", config.notifier.api_url);
    println!("  State file: {}", config.state.path.display());
    println!();

    if config.notifier.token.is_some() {
        println!("✓ Notify token found (from {ENV_LINE_NOTIFY_TOKEN} env var)");
    } else {
        println!("⚠ {ENV_LINE_NOTIFY_TOKEN} is not set");
        println!("  Notifications will fail; use `fxwatch run --dry-run` to test");
    }

    Ok(())
}
