use std::sync::Arc;

use crate::bot::{commands::commands::{handler, BotResult, CommandArgs, CommandContext, CommandHandler}, replies::Replies};

pub fn ping_command() -> Arc<dyn CommandHandler> {
    handler(|ctx, args| Box::pin(ping(ctx, args)))
}

async fn ping(ctx: CommandContext, _args: CommandArgs) -> BotResult<()> {
    ctx.send(&Replies::pong()).await
}
