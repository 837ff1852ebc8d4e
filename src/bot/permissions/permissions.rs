use core::fmt;
use std::{collections::HashSet, fmt::Display, sync::Arc};

use crate::bot::{chat_event::chat_event::ChatUser, commands::commands::{CommandArgs, CommandContext, CommandFuture, CommandHandler}, state::def::{AuthorizationError, BotError}};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RoleRequirement {
    Everyone,
    Role(String),
    // Holding any one of these is enough
    AnyRole(Vec<String>),
}

impl RoleRequirement {
    pub fn from_roles(roles: &[String]) -> Self {
        match roles {
            [] => RoleRequirement::Everyone,
            [role] => RoleRequirement::Role(role.clone()),
            roles => RoleRequirement::AnyRole(roles.to_vec()),
        }
    }

    pub fn permits(&self, held: &HashSet<String>) -> bool {
        match self {
            RoleRequirement::Everyone => true,
            RoleRequirement::Role(role) => held.contains(role),
            RoleRequirement::AnyRole(roles) => roles.iter().any(|r| held.contains(r)),
        }
    }
}

impl Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleRequirement::Everyone => write!(f, "everyone"),
            RoleRequirement::Role(role) => write!(f, "{}", role),
            RoleRequirement::AnyRole(roles) => write!(f, "any of {}", roles.join(", ")),
        }
    }
}

pub fn has_permission(user: &ChatUser, required: &RoleRequirement) -> bool {
    required.permits(&user.roles)
}

/// Checks the principal's roles before handing the invocation to `inner`.
pub struct RoleGate {
    inner: Arc<dyn CommandHandler>,
    requirement: RoleRequirement,
}

impl CommandHandler for RoleGate {
    fn invoke(&self, ctx: CommandContext, args: CommandArgs) -> CommandFuture {
        if has_permission(ctx.principal(), &self.requirement) {
            return self.inner.invoke(ctx, args);
        }

        let required = self.requirement.clone();
        Box::pin(async move { Err::<(), _>(BotError::from(AuthorizationError { required })) })
    }
}

/// Wraps `handler` so it only runs for principals holding one of `roles`.
/// With no roles the handler is returned as-is.
pub fn authorize(handler: Arc<dyn CommandHandler>, roles: &[String]) -> Arc<dyn CommandHandler> {
    match RoleRequirement::from_roles(roles) {
        RoleRequirement::Everyone => handler,
        requirement => Arc::new(RoleGate { inner: handler, requirement }),
    }
}
