use std::sync::Arc;

use crate::bot::commands::commands::CommandHandler;

pub mod commands;
pub mod general;
pub mod moderation;

/// A declared command: identity, required roles and the handler that runs it.
#[derive(Clone)]
pub struct CommandDescriptor {
    name: String,
    help: String,
    roles: Vec<String>,
    handler: Arc<dyn CommandHandler>,
}

impl CommandDescriptor {
    pub fn name(&self) -> &str { &self.name }
    pub fn help(&self) -> &str { &self.help }
    /// Empty means anyone may invoke the command.
    pub fn roles(&self) -> &[String] { &self.roles }
    pub fn handler(&self) -> Arc<dyn CommandHandler> { Arc::clone(&self.handler) }
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

/// Append-only collection filled by each command module's `register` at startup.
#[derive(Default)]
pub struct CommandRegistry {
    descriptors: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate names and bad role lists are only checked at bind time.
    pub fn declare(&mut self, name: impl Into<String>, help: impl Into<String>, roles: &[&str], handler: Arc<dyn CommandHandler>) {
        self.descriptors.push(CommandDescriptor {
            name: name.into(),
            help: help.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            handler,
        });
    }

    pub fn all(&self) -> &[CommandDescriptor] {
        &self.descriptors
    }

    pub fn freeze(self) -> FrozenRegistry {
        FrozenRegistry { descriptors: self.descriptors.into() }
    }
}

/// Read-only snapshot of a registry. Cloning shares the same descriptors.
#[derive(Clone, Debug)]
pub struct FrozenRegistry {
    descriptors: Arc<[CommandDescriptor]>,
}

impl FrozenRegistry {
    pub fn all(&self) -> &[CommandDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

pub struct CommandModule {
    pub name: &'static str,
    pub register: fn(&mut CommandRegistry),
}

/// Every command module, in the order their commands are declared.
pub const COMMAND_MODULES: &[CommandModule] = &[
    CommandModule { name: "general", register: general::register },
    CommandModule { name: "moderation", register: moderation::register },
];
