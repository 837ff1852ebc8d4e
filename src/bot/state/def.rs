use std::fmt;

use thiserror::Error;

use crate::bot::{commands::FrozenRegistry, dispatcher::dispatcher::BotCommands, permissions::permissions::RoleRequirement};

/// Everything the dispatch phase reads. Built once by `initialize`, never mutated afterwards.
pub struct AppState {
    pub settings: BotSettings,
    pub commands: BotCommands,
    pub catalog: FrozenRegistry,
}

#[derive(Clone)]
pub struct BotSettings {
    pub discord_token: String,
    pub prefix: String,
    // Only messages from this guild are dispatched when set
    pub guild_id: Option<u64>,
}

impl fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotSettings")
            .field("discord_token", &"<redacted>")
            .field("prefix", &self.prefix)
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("{0}")]
    Authorization(#[from] AuthorizationError),
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("JSON deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Fatal at startup: a malformed command set or missing setting is never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("command `{0}` is declared more than once")]
    DuplicateCommand(String),
    #[error("command `{command}` has an invalid role list: {reason}")]
    InvalidRoles { command: String, reason: String },
    #[error("command `{name}` was rejected by the command table: {reason}")]
    Rejected { name: String, reason: String },
    #[error("setting `{key}`: {reason}")]
    Setting { key: &'static str, reason: String },
}

/// The invoking principal holds none of the roles a command requires.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required role: {required}")]
pub struct AuthorizationError {
    pub required: RoleRequirement,
}
