mod bot;

use bot::{run_discord_bot, state::def::BotSettings};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match BotSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Startup aborted: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_discord_bot(settings).await {
        error!("Error running Discord bot: {e}");
        std::process::exit(1);
    }
}
