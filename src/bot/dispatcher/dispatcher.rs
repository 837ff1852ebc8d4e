use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::bot::chat_event::chat_event::ChatEvent;
use crate::bot::commands::commands::{BotResult, CommandArgs, CommandContext, CommandHandler};
use crate::bot::handler::handler::ChatClient;
use crate::bot::replies::Replies;
use crate::bot::state::def::{AppState, BotError, ConfigurationError};

/// Names the runtime answers itself.
pub const RESERVED_NAMES: &[&str] = &["help"];

/// The live bot's registration primitive.
pub trait CommandTable {
    fn register_command(&mut self, name: &str, help: &str, handler: Arc<dyn CommandHandler>) -> BotResult<()>;
}

#[derive(Clone)]
pub struct BoundCommand {
    pub name: String,
    pub help: String,
    pub handler: Arc<dyn CommandHandler>,
}

/// Commands bound to the running bot, in registration order.
#[derive(Default)]
pub struct BotCommands {
    commands: Vec<BoundCommand>,
    index: HashMap<String, usize>,
}

impl BotCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&BoundCommand> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundCommand> {
        self.commands.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandTable for BotCommands {
    fn register_command(&mut self, name: &str, help: &str, handler: Arc<dyn CommandHandler>) -> BotResult<()> {
        let rejected = |reason: &str| -> BotError {
            ConfigurationError::Rejected { name: name.to_string(), reason: reason.to_string() }.into()
        };

        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(rejected("names must be non-empty and contain no whitespace"));
        }
        if RESERVED_NAMES.contains(&name) {
            return Err(rejected("name is reserved"));
        }
        if self.index.contains_key(name) {
            return Err(rejected("already registered"));
        }

        self.index.insert(name.to_string(), self.commands.len());
        self.commands.push(BoundCommand { name: name.to_string(), help: help.to_string(), handler });
        Ok(())
    }
}

/// Splits `/name rest of message` into the command name and its arguments.
pub fn parse_invocation<'a>(prefix: &str, message: &'a str) -> Option<(&'a str, CommandArgs)> {
    let body = message.strip_prefix(prefix)?;
    let name = body.split_whitespace().next()?;
    // `/ ping` is not an invocation
    if !body.starts_with(name) {
        return None;
    }
    Some((name, CommandArgs::parse(&body[name.len()..])))
}

pub async fn dispatch_message(state: &AppState, event: ChatEvent, client: Arc<dyn ChatClient>) -> BotResult<()> {
    let Some((name, args)) = parse_invocation(&state.settings.prefix, &event.message) else {
        return Ok(());
    };
    let prefix = &state.settings.prefix;
    let channel = event.channel;

    if name == "help" {
        let listing = if state.commands.is_empty() {
            Replies::no_commands()
        } else {
            Replies::help_listing(prefix, state.commands.iter())
        };
        let ctx = CommandContext { event, prefix: prefix.clone(), client, catalog: state.catalog.clone() };
        return ctx.send_long(&listing).await;
    }

    let Some(cmd) = state.commands.get(name) else {
        debug!("Ignoring unknown command `{prefix}{name}`");
        return Ok(());
    };

    if args.is_empty() {
        info!("Invoking command `{prefix}{}` by user {} (ID: {})", cmd.name, event.user.name, event.user.id);
    } else {
        info!(
            "Invoking command `{prefix}{}` by user {} (ID: {}) with args: {:?}",
            cmd.name, event.user.name, event.user.id, args.message()
        );
        debug!("Parsed arguments for `{prefix}{}`: {:?}", cmd.name, args.tokens());
    }
    let user = event.user.name.clone();
    let location = match event.guild {
        Some(guild) => format!("guild {guild}"),
        None => "direct messages".to_string(),
    };
    let ctx = CommandContext { event, prefix: prefix.clone(), client: client.clone(), catalog: state.catalog.clone() };

    match cmd.handler.invoke(ctx, args).await {
        Ok(()) => info!("Command `{prefix}{}` called by user {user} in {location} completed", cmd.name),
        Err(BotError::Authorization(e)) => {
            warn!("User {user} denied `{prefix}{}` in {location}: {e}", cmd.name);
            client.send_message(channel, &Replies::missing_role()).await?;
        }
        // Command bodies report their own failures; nothing here may outlive this invocation
        Err(e) => error!("Command `{prefix}{}` failed in {location}: {e}", cmd.name),
    }

    Ok(())
}
