use crate::bot::{commands::commands::BotResult, state::def::{BotSettings, ConfigurationError}};

pub const DEFAULT_PREFIX: &str = "/";

impl BotSettings {
    /// Reads settings from the process environment, after loading `.env` if one exists.
    pub fn from_env() -> BotResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigurationError::Setting { key: "DISCORD_TOKEN", reason: "missing".into() })?;

        let prefix = match lookup("COMMAND_PREFIX") {
            Some(p) if p.trim().is_empty() || p.contains(char::is_whitespace) => {
                return Err(ConfigurationError::Setting {
                    key: "COMMAND_PREFIX",
                    reason: format!("`{p}` must be non-empty and contain no whitespace"),
                }.into());
            }
            Some(p) => p,
            None => DEFAULT_PREFIX.to_string(),
        };

        let guild_id = match lookup("DISCORD_GUILD_ID") {
            Some(raw) => {
                let id = raw.trim().parse::<u64>().ok().filter(|id| *id != 0).ok_or_else(|| {
                    ConfigurationError::Setting { key: "DISCORD_GUILD_ID", reason: format!("`{raw}` is not a guild id") }
                })?;
                Some(id)
            }
            None => None,
        };

        Ok(BotSettings { discord_token, prefix, guild_id })
    }
}
