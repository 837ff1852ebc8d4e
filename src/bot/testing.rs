//! Test doubles standing in for Discord.

use std::{collections::HashSet, sync::{atomic::{AtomicUsize, Ordering}, Arc, Mutex}};

use serenity::{all::{ChannelId, GuildId, UserId}, async_trait};

use crate::bot::{chat_event::chat_event::{ChatEvent, ChatUser}, commands::{commands::{handler, BotResult, CommandContext, CommandHandler}, CommandRegistry}, handler::handler::ChatClient, state::def::{BotError, BotSettings}};

#[derive(Default)]
pub struct RecordingClient {
    sent: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for RecordingClient {
    async fn send_message(&self, _channel: ChannelId, message: &str) -> BotResult<()> {
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

pub fn noop_handler() -> Arc<dyn CommandHandler> {
    handler(|_, _| Box::pin(async { Ok::<(), BotError>(()) }))
}

/// A handler that counts its invocations.
pub fn counting_handler() -> (Arc<dyn CommandHandler>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let h = handler(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { Ok::<(), BotError>(()) })
    });
    (h, calls)
}

pub fn test_settings() -> BotSettings {
    BotSettings { discord_token: "token".into(), prefix: "/".into(), guild_id: None }
}

pub fn test_event(message: &str, roles: &[&str]) -> ChatEvent {
    ChatEvent {
        guild: Some(GuildId::new(1)),
        channel: ChannelId::new(2),
        user: ChatUser {
            id: UserId::new(3),
            name: "tester".into(),
            roles: roles.iter().map(|r| r.to_string()).collect::<HashSet<_>>(),
        },
        message: message.to_string(),
    }
}

pub fn test_context(roles: &[&str], client: Arc<RecordingClient>) -> CommandContext {
    CommandContext {
        event: test_event("", roles),
        prefix: "/".into(),
        client,
        catalog: CommandRegistry::new().freeze(),
    }
}
