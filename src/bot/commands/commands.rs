use std::sync::Arc;

use futures::future::BoxFuture;

use crate::bot::{chat_event::chat_event::{ChatEvent, ChatUser}, commands::FrozenRegistry, handler::handler::ChatClient, replies::{split_message, DISCORD_MESSAGE_LIMIT}, state::def::BotError};

pub type BotResult<T> = Result<T, BotError>;

pub type CommandFuture = BoxFuture<'static, BotResult<()>>;

/// Anything that can run a command invocation. Shared as `Arc<dyn CommandHandler>` so
/// authorization layers can wrap it without knowing what is inside.
pub trait CommandHandler: Send + Sync {
    fn invoke(&self, ctx: CommandContext, args: CommandArgs) -> CommandFuture;
}

pub struct FnCommand<F> {
    func: F,
}

impl<F> FnCommand<F>
where
    F: Fn(CommandContext, CommandArgs) -> CommandFuture + Send + Sync + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> CommandHandler for FnCommand<F>
where
    F: Fn(CommandContext, CommandArgs) -> CommandFuture + Send + Sync + 'static,
{
    fn invoke(&self, ctx: CommandContext, args: CommandArgs) -> CommandFuture {
        (self.func)(ctx, args)
    }
}

pub fn handler<F>(func: F) -> Arc<dyn CommandHandler>
where
    F: Fn(CommandContext, CommandArgs) -> CommandFuture + Send + Sync + 'static,
{
    Arc::new(FnCommand::new(func))
}

/// Per-invocation context. Each invocation owns its own copy.
#[derive(Clone)]
pub struct CommandContext {
    pub event: ChatEvent,
    // Prefix the command was invoked with
    pub prefix: String,
    pub client: Arc<dyn ChatClient>,
    pub catalog: FrozenRegistry,
}

impl CommandContext {
    pub fn principal(&self) -> &ChatUser {
        &self.event.user
    }

    pub async fn send(&self, message: &str) -> BotResult<()> {
        self.client.send_message(self.event.channel, message).await
    }

    /// Sends `message` in as many chunks as Discord's length limit requires.
    pub async fn send_long(&self, message: &str) -> BotResult<()> {
        for chunk in split_message(message, DISCORD_MESSAGE_LIMIT) {
            self.send(&chunk).await?;
        }
        Ok(())
    }
}

/// Arguments following the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    raw: String,
    tokens: Vec<String>,
    // Byte offset in `raw` where the first token ends, closing quote included
    first_end: usize,
}

impl CommandArgs {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut pending = false;
        let mut first_end = raw.len();

        for (i, c) in raw.char_indices() {
            match c {
                '"' => {
                    quoted = !quoted;
                    pending = true;
                }
                c if c.is_whitespace() && !quoted => {
                    if pending {
                        if tokens.is_empty() {
                            first_end = i;
                        }
                        tokens.push(std::mem::take(&mut current));
                        pending = false;
                    }
                }
                c => {
                    current.push(c);
                    pending = true;
                }
            }
        }
        if pending {
            tokens.push(current);
        }

        Self { raw: raw.to_string(), tokens, first_end }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The whole argument text, untokenized.
    pub fn message(&self) -> &str {
        &self.raw
    }

    /// Untokenized text after the first argument.
    pub fn rest(&self) -> &str {
        self.raw[self.first_end..].trim_start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let args = CommandArgs::parse("  c   翻译 now ");
        assert_eq!(args.tokens(), &["c", "翻译", "now"]);
        assert_eq!(args.message(), "c   翻译 now");
        assert_eq!(args.first(), Some("c"));
        assert_eq!(args.get(5), None);
    }

    #[test]
    fn quotes_group_a_token() {
        let args = CommandArgs::parse(r#"add "Old Norse" "" x"#);
        assert_eq!(args.tokens(), &["add", "Old Norse", "", "x"]);
    }

    #[test]
    fn rest_keeps_original_spacing() {
        let args = CommandArgs::parse("japanese  hello   world");
        assert_eq!(args.rest(), "hello   world");
        assert_eq!(CommandArgs::parse("single").rest(), "");
    }

    #[test]
    fn rest_skips_a_quoted_first_argument() {
        let args = CommandArgs::parse(r#""Old Norse" hello world"#);
        assert_eq!(args.first(), Some("Old Norse"));
        assert_eq!(args.rest(), "hello world");

        let args = CommandArgs::parse(r#"lang "Old Norse" now"#);
        assert_eq!(args.rest(), r#""Old Norse" now"#);
        assert_eq!(CommandArgs::parse(r#""Old Norse""#).rest(), "");
    }

    #[test]
    fn empty_input_has_no_tokens() {
        let args = CommandArgs::parse("   ");
        assert!(args.is_empty());
        assert_eq!(args.len(), 0);
        assert_eq!(args.rest(), "");
        assert_eq!(args, CommandArgs::default());
    }
}
