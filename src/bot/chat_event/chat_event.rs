use std::collections::HashSet;

use serenity::all::{ChannelId, GuildId, Message, UserId};

/// One incoming chat message, reduced to what command dispatch needs.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub guild: Option<GuildId>,
    pub channel: ChannelId,
    pub user: ChatUser,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ChatUser {
    pub id: UserId,
    pub name: String,
    // Role names held at the time the message was received; empty outside guilds
    pub roles: HashSet<String>,
}

pub fn map_message(msg: &Message, roles: HashSet<String>) -> ChatEvent {
    ChatEvent {
        guild: msg.guild_id,
        channel: msg.channel_id,
        user: ChatUser {
            id: msg.author.id,
            name: msg.author.name.clone(),
            roles,
        },
        message: msg.content.clone(),
    }
}
