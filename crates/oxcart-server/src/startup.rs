//! Server startup utilities.

use oxcart_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
   ___  _  _  ___  __ _  ____ _____
  / _ \( \/ )/ __)/ _` ||  _ \_   _|
 ( (_) ))  (( (__( (_| ||    / | |
  \___/(_/\_)\___)\__,_||_|\_\ |_|

        Oxcart commerce backend
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}", config.server.addr());
    info!("Health:    http://{}/health", config.server.addr());
    info!("Channels:  email, inventory (poll every {}s)", config.worker.poll_interval_secs);
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }
}
