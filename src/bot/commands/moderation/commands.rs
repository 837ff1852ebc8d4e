use std::sync::Arc;

use tracing::warn;

use crate::bot::{commands::{commands::{handler, BotResult, CommandArgs, CommandContext, CommandHandler}, moderation::{fetch_quote, guide_text, QuoteOutcome}}, replies::Replies};

pub fn guide_command() -> Arc<dyn CommandHandler> {
    handler(|ctx, args| Box::pin(guide(ctx, args)))
}

pub fn office_command() -> Arc<dyn CommandHandler> {
    handler(|ctx, args| Box::pin(office(ctx, args)))
}

async fn guide(ctx: CommandContext, args: CommandArgs) -> BotResult<()> {
    let text = if args.len() > 1 {
        Replies::guide_usage(&ctx.prefix, args.rest())
    } else {
        guide_text(&ctx.catalog, &ctx.prefix, args.first())
    };
    ctx.send_long(&text).await
}

async fn office(ctx: CommandContext, _args: CommandArgs) -> BotResult<()> {
    let reply = match fetch_quote().await {
        Ok(QuoteOutcome::Quote(quote)) => Replies::quote(&quote.character, &quote.quote),
        Ok(QuoteOutcome::Status(status)) => Replies::quote_status(status),
        Err(e) => {
            warn!("Office quote request failed: {e}");
            Replies::quote_failed(&e.to_string())
        }
    };
    ctx.send(&reply).await
}
