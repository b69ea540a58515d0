mod bot;
mod config;
mod logging;
mod scheduler;

use relay_logging::{relay_error, relay_info};

#[tokio::main]
async fn main() {
    // Required settings are a startup precondition, not a per-cycle
    // recoverable condition.
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    logging::initialize(config.debug);

    let job = match bot::BotJob::new(&config) {
        Ok(job) => job,
        Err(err) => {
            relay_error!("Could not construct HTTP clients: {err}");
            std::process::exit(1);
        }
    };

    relay_info!("Bot Service Started...");
    scheduler::run_until_shutdown(job).await;
}
