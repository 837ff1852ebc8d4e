use crate::bot::{commands::CommandDescriptor, dispatcher::dispatcher::BoundCommand};

pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

pub struct Replies;

impl Replies {
    pub fn missing_role() -> String {
        "You do not have the correct role for this command.".to_string()
    }

    pub fn pong() -> String {
        "🏓 Pong!".to_string()
    }

    pub fn help_listing<'a>(prefix: &str, commands: impl Iterator<Item = &'a BoundCommand>) -> String {
        let mut out = String::from("**Available commands:**\n");
        for cmd in commands {
            out.push_str(&format!("• `{prefix}{}` - {}\n", cmd.name, cmd.help));
        }
        out
    }

    pub fn no_commands() -> String {
        "No commands are available.".to_string()
    }

    pub fn guide_header() -> String {
        "**Zhongsheng Bot Commands:**".to_string()
    }

    pub fn guide_group(roles: &[String]) -> String {
        match roles {
            [] => "**Available to everyone:**".to_string(),
            [role] => format!("**{role} only:**"),
            roles => format!("**Available to {}:**", roles.join(" & ")),
        }
    }

    pub fn guide_line(prefix: &str, cmd: &CommandDescriptor) -> String {
        format!("**{prefix}{}** - {}", cmd.name(), cmd.help())
    }

    pub fn guide_footer(prefix: &str) -> String {
        format!("Use `{prefix}guide <command>` for detailed information about a specific command.")
    }

    pub fn guide_usage(prefix: &str, extra: &str) -> String {
        format!("Unexpected arguments `{extra}`. Usage: `{prefix}guide [command]`")
    }

    pub fn guide_entry(prefix: &str, cmd: &CommandDescriptor) -> String {
        let roles = if cmd.roles().is_empty() {
            "**No role restrictions**".to_string()
        } else {
            format!("**Required roles:** {}", cmd.roles().join(", "))
        };
        format!("**`{prefix}{}`**\n{}\n{}", cmd.name(), cmd.help(), roles)
    }

    pub fn guide_unknown(prefix: &str, name: &str) -> String {
        format!("🈚 No command named `{name}`. Use `{prefix}guide` to see every command.")
    }

    pub fn quote(character: &str, quote: &str) -> String {
        format!("**{character}**: \"{quote}\"")
    }

    pub fn quote_status(status: u16) -> String {
        format!("⚠️ Failed to fetch quote. API returned status code {status}")
    }

    pub fn quote_failed(error: &str) -> String {
        format!("⚠️ An error occurred: {error}")
    }
}

/// Splits `content` into chunks of at most `max_len` characters, preferring paragraph
/// boundaries, then line boundaries. Lines longer than `max_len` are cut.
pub fn split_message(content: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    if content.chars().count() <= max_len {
        return vec![content.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in content.split("\n\n") {
        if char_len(paragraph) > max_len {
            flush(&mut chunks, &mut current);
            for line in paragraph.split('\n') {
                for piece in hard_split(line, max_len) {
                    let sep = usize::from(!current.is_empty());
                    if char_len(&current) + sep + char_len(&piece) > max_len {
                        flush(&mut chunks, &mut current);
                    }
                    if !current.is_empty() {
                        current.push('\n');
                    }
                    current.push_str(&piece);
                }
            }
        } else {
            let sep = if current.is_empty() { 0 } else { 2 };
            if char_len(&current) + sep + char_len(paragraph) > max_len {
                flush(&mut chunks, &mut current);
            }
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
        }
    }
    flush(&mut chunks, &mut current);

    chunks
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        chunks.push(std::mem::take(current));
    }
}

fn hard_split(line: &str, max_len: usize) -> Vec<String> {
    if char_len(line) <= max_len {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars.chunks(max_len).map(|c| c.iter().collect()).collect()
}
