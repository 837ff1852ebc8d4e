use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::bot::{commands::{commands::BotResult, CommandRegistry, FrozenRegistry}, replies::Replies};

pub mod commands;

const STAFF: &[&str] = &["Moderator", "Helper"];

pub const OFFICE_QUOTE_URL: &str = "https://officeapi.akashrajpurohit.com/quote/random";

static HTTP: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("zhongsheng/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
});

pub fn register(registry: &mut CommandRegistry) {
    registry.declare(
        "guide",
        "Display this informative message. Use `guide <command>` for details on one command",
        STAFF,
        commands::guide_command(),
    );
    registry.declare("office", "Responds with a random quote from The Office", STAFF, commands::office_command());
}

/// Text for `guide`: every command grouped by the roles it requires, or only `name` when given.
pub fn guide_text(catalog: &FrozenRegistry, prefix: &str, name: Option<&str>) -> String {
    if let Some(name) = name {
        let name = name.trim_start_matches(prefix);
        return match catalog.get(name) {
            Some(cmd) => Replies::guide_entry(prefix, cmd),
            None => Replies::guide_unknown(prefix, name),
        };
    }

    // Groups appear in the order their first command was declared
    let mut groups: Vec<(&[String], Vec<String>)> = Vec::new();
    for cmd in catalog.all() {
        let line = Replies::guide_line(prefix, cmd);
        match groups.iter().position(|(roles, _)| *roles == cmd.roles()) {
            Some(i) => groups[i].1.push(line),
            None => groups.push((cmd.roles(), vec![line])),
        }
    }

    let sections: Vec<String> = groups
        .iter()
        .map(|(roles, lines)| format!("{}\n{}", Replies::guide_group(roles), lines.join("\n")))
        .collect();
    format!("{}\n\n{}\n\n{}", Replies::guide_header(), sections.join("\n\n"), Replies::guide_footer(prefix))
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct OfficeQuote {
    #[serde(default = "unknown_character")]
    pub character: String,
    #[serde(default = "missing_quote")]
    pub quote: String,
}

fn unknown_character() -> String {
    "Unknown".into()
}

fn missing_quote() -> String {
    "No quote available".into()
}

pub enum QuoteOutcome {
    Quote(OfficeQuote),
    Status(u16),
}

pub fn parse_quote(body: &str) -> BotResult<OfficeQuote> {
    Ok(serde_json::from_str(body)?)
}

pub async fn fetch_quote() -> BotResult<QuoteOutcome> {
    let response = HTTP.get(OFFICE_QUOTE_URL).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Ok(QuoteOutcome::Status(status.as_u16()));
    }
    let body = response.text().await?;
    Ok(QuoteOutcome::Quote(parse_quote(&body)?))
}
