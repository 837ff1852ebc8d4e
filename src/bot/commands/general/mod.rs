use crate::bot::commands::CommandRegistry;

pub mod commands;

pub fn register(registry: &mut CommandRegistry) {
    registry.declare("ping", "Checks that the bot is responding", &[], commands::ping_command());
}
