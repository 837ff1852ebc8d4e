use std::{collections::HashSet, sync::Arc};

use serenity::{all::{ChannelId, Context, EventHandler, GuildId, Http, Message, Ready, RoleId}, async_trait, cache::Cache};
use tracing::{debug, error, info, warn};

use crate::bot::{chat_event::chat_event::map_message, commands::commands::BotResult, dispatcher::dispatcher::dispatch_message, state::def::{AppState, BotSettings}};

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send_message(&self, channel: ChannelId, message: &str) -> BotResult<()>;
}

pub struct DiscordChatClient {
    http: Arc<Http>,
}

impl DiscordChatClient {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatClient for DiscordChatClient {
    async fn send_message(&self, channel: ChannelId, message: &str) -> BotResult<()> {
        channel.say(&self.http, message).await?;
        Ok(())
    }
}

pub struct Handler {
    pub state: Arc<AppState>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if !should_dispatch(&self.state.settings, msg.author.bot, msg.guild_id, &msg.content) {
            return;
        }

        if let Err(e) = handle_event(&self.state, &ctx, &msg).await {
            error!("Event error: {e:?}");
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            "{} is connected to {} guild(s), serving {} command(s)",
            ready.user.name,
            ready.guilds.len(),
            self.state.commands.len()
        );
    }
}

/// Whether a message is worth dispatching: no bot authors, only the authorized guild when one
/// is configured, and only text carrying the command prefix.
pub fn should_dispatch(settings: &BotSettings, is_bot: bool, guild: Option<GuildId>, content: &str) -> bool {
    if is_bot {
        return false;
    }
    if let Some(allowed) = settings.guild_id {
        if guild != Some(GuildId::new(allowed)) {
            return false;
        }
    }
    // Skip the role lookup for ordinary chatter
    content.starts_with(&settings.prefix)
}

pub async fn handle_event(state: &AppState, ctx: &Context, msg: &Message) -> BotResult<()> {
    let roles = match resolve_roles(ctx, msg).await {
        Ok(roles) => roles,
        Err(e) => {
            warn!("Could not resolve roles for {}: {e}", msg.author.name);
            HashSet::new()
        }
    };

    let event = map_message(msg, roles);
    let client: Arc<dyn ChatClient> = Arc::new(DiscordChatClient::new(ctx.http.clone()));
    dispatch_message(state, event, client).await
}

/// Names of the roles the author holds in the message's guild. Direct messages have none.
async fn resolve_roles(ctx: &Context, msg: &Message) -> BotResult<HashSet<String>> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(HashSet::new());
    };

    let role_ids = match &msg.member {
        Some(member) => member.roles.clone(),
        None => guild_id.member(ctx, msg.author.id).await?.roles,
    };

    if let Some(names) = cached_role_names(&ctx.cache, guild_id, &role_ids) {
        return Ok(names);
    }

    debug!("Guild {guild_id} not cached, fetching its roles");
    let guild_roles = guild_id.roles(&ctx.http).await?;
    Ok(role_names(&role_ids, |id| guild_roles.get(id).map(|role| role.name.as_str())))
}

fn cached_role_names(cache: &Cache, guild_id: GuildId, role_ids: &[RoleId]) -> Option<HashSet<String>> {
    let guild = cache.guild(guild_id)?;
    Some(role_names(role_ids, |id| guild.roles.get(id).map(|role| role.name.as_str())))
}

/// Maps held role ids to names. Ids the guild no longer knows are dropped.
fn role_names<'a, F>(role_ids: &[RoleId], lookup: F) -> HashSet<String>
where
    F: Fn(&RoleId) -> Option<&'a str>,
{
    role_ids.iter().filter_map(lookup).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::bot::testing::test_settings;

    fn guild_settings(guild: u64) -> BotSettings {
        BotSettings { guild_id: Some(guild), ..test_settings() }
    }

    #[test]
    fn dispatches_prefixed_messages_from_people() {
        assert!(should_dispatch(&test_settings(), false, None, "/ping"));
        assert!(should_dispatch(&test_settings(), false, Some(GuildId::new(7)), "/ping"));
        assert!(should_dispatch(&guild_settings(7), false, Some(GuildId::new(7)), "/ping"));
    }

    #[test]
    fn ignores_bot_authors() {
        assert!(!should_dispatch(&test_settings(), true, Some(GuildId::new(7)), "/ping"));
    }

    #[test]
    fn ignores_other_guilds_and_direct_messages_when_restricted() {
        let settings = guild_settings(7);
        assert!(!should_dispatch(&settings, false, Some(GuildId::new(8)), "/ping"));
        assert!(!should_dispatch(&settings, false, None, "/ping"));
    }

    #[test]
    fn ignores_text_without_prefix() {
        assert!(!should_dispatch(&test_settings(), false, None, "ping"));
        assert!(!should_dispatch(&test_settings(), false, None, "hello /ping"));
    }

    #[test]
    fn role_names_skip_unknown_ids() {
        let known: HashMap<RoleId, &str> = HashMap::from([(RoleId::new(1), "Moderator"), (RoleId::new(2), "Helper")]);
        let names = role_names(&[RoleId::new(2), RoleId::new(3)], |id| known.get(id).copied());
        assert_eq!(names, HashSet::from(["Helper".to_string()]));
    }
}
