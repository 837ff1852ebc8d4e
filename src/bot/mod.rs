use std::sync::Arc;

use serenity::{all::GatewayIntents, Client};
use tracing::{info, warn};

use crate::bot::{commands::{commands::BotResult, CommandRegistry, FrozenRegistry, COMMAND_MODULES}, dispatcher::{binder::bind, dispatcher::{BotCommands, CommandTable}}, handler::handler::Handler, state::def::{AppState, BotSettings}};

pub mod state;
pub mod chat_event;
pub mod dispatcher;
pub mod commands;
pub mod permissions;
pub mod handler;
pub mod replies;
#[cfg(test)]
pub mod testing;

/// Declares every command module's commands, freezes the result and binds it into `table`.
/// Call once per process; a second call against the same table fails.
pub fn initialize<T: CommandTable>(table: &mut T) -> BotResult<FrozenRegistry> {
    let mut registry = CommandRegistry::new();
    for module in COMMAND_MODULES {
        let before = registry.all().len();
        (module.register)(&mut registry);
        info!("Loaded {} command(s) from {}", registry.all().len() - before, module.name);
    }

    let snapshot = registry.freeze();
    if snapshot.is_empty() {
        warn!("No commands were declared");
    }
    bind(&snapshot, table)?;
    info!("Bound {} command(s)", snapshot.len());
    Ok(snapshot)
}

pub async fn run_discord_bot(settings: BotSettings) -> BotResult<()> {
    let mut commands = BotCommands::new();
    let catalog = initialize(&mut commands)?;
    info!("Bound commands: {}", commands.names().join(", "));

    let state = Arc::new(AppState { settings, commands, catalog });
    let intents = GatewayIntents::GUILD_MESSAGES | GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&state.settings.discord_token, intents)
        .event_handler(Handler { state: state.clone() })
        .await?;

    client.start().await?;
    Ok(())
}
