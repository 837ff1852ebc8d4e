use std::collections::HashSet;

use tracing::debug;

use crate::bot::{commands::{commands::BotResult, CommandDescriptor, FrozenRegistry}, dispatcher::dispatcher::CommandTable, permissions::permissions::authorize, state::def::ConfigurationError};

/// Attaches every descriptor to `table`, in declaration order, behind its role check.
///
/// The snapshot is validated as a whole first, so a malformed command set binds nothing.
/// Binding the same snapshot into the same table twice fails: the table already holds every name.
pub fn bind<T: CommandTable>(snapshot: &FrozenRegistry, table: &mut T) -> BotResult<()> {
    validate(snapshot.all())?;

    for descriptor in snapshot.all() {
        let handler = authorize(descriptor.handler(), descriptor.roles());
        table.register_command(descriptor.name(), descriptor.help(), handler)?;
        debug!("Bound command `{}` (roles: {:?})", descriptor.name(), descriptor.roles());
    }

    Ok(())
}

fn validate(descriptors: &[CommandDescriptor]) -> Result<(), ConfigurationError> {
    let mut names = HashSet::new();

    for descriptor in descriptors {
        if !names.insert(descriptor.name()) {
            return Err(ConfigurationError::DuplicateCommand(descriptor.name().to_string()));
        }

        let mut roles = HashSet::new();
        for role in descriptor.roles() {
            let reason = if role.trim().is_empty() {
                "role names must not be blank".to_string()
            } else if !roles.insert(role.as_str()) {
                format!("role `{role}` is listed twice")
            } else {
                continue;
            };
            return Err(ConfigurationError::InvalidRoles { command: descriptor.name().to_string(), reason });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::bot::{commands::{commands::CommandArgs, CommandRegistry}, dispatcher::dispatcher::BotCommands, state::def::{AuthorizationError, BotError}, testing::{counting_handler, test_context, RecordingClient}};

    #[test]
    fn binds_in_declaration_order() {
        let mut registry = CommandRegistry::new();
        for name in ["A", "B", "C"] {
            let (h, _) = counting_handler();
            registry.declare(name, "", &[], h);
        }
        let mut table = BotCommands::new();

        bind(&registry.freeze(), &mut table).unwrap();

        assert_eq!(table.names(), ["A", "B", "C"]);
    }

    #[test]
    fn second_bind_fails() {
        let (h, _) = counting_handler();
        let mut registry = CommandRegistry::new();
        registry.declare("ping", "pong", &[], h);
        let frozen = registry.freeze();
        let mut table = BotCommands::new();

        bind(&frozen, &mut table).unwrap();
        let err = bind(&frozen, &mut table).unwrap_err();

        assert!(matches!(err, BotError::Configuration(ConfigurationError::Rejected { ref name, .. }) if name == "ping"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn duplicate_names_bind_nothing() {
        let mut registry = CommandRegistry::new();
        let (first, _) = counting_handler();
        let (second, _) = counting_handler();
        registry.declare("other", "", &[], counting_handler().0);
        registry.declare("dup", "one", &[], first);
        registry.declare("dup", "two", &[], second);
        let mut table = BotCommands::new();

        let err = bind(&registry.freeze(), &mut table).unwrap_err();

        assert!(matches!(err, BotError::Configuration(ConfigurationError::DuplicateCommand(ref n)) if n == "dup"));
        assert!(table.is_empty());
    }

    #[test]
    fn rejects_invalid_role_lists() {
        let cases: [&[&str]; 2] = [&["Moderator", "Moderator"], &[" "]];
        for roles in cases {
            let mut registry = CommandRegistry::new();
            registry.declare("cmd", "", roles, counting_handler().0);
            let err = bind(&registry.freeze(), &mut BotCommands::new()).unwrap_err();
            assert!(matches!(err, BotError::Configuration(ConfigurationError::InvalidRoles { .. })), "{roles:?}");
        }
    }

    #[test]
    fn reserved_name_aborts_binding() {
        let mut registry = CommandRegistry::new();
        registry.declare("help", "", &[], counting_handler().0);
        let err = bind(&registry.freeze(), &mut BotCommands::new()).unwrap_err();
        assert!(matches!(err, BotError::Configuration(ConfigurationError::Rejected { .. })));
    }

    #[tokio::test]
    async fn bound_commands_carry_their_role_check() {
        let (kick, calls) = counting_handler();
        let mut registry = CommandRegistry::new();
        registry.declare("kick", "", &["Moderator"], kick);
        let mut table = BotCommands::new();
        bind(&registry.freeze(), &mut table).unwrap();
        let bound = table.get("kick").unwrap();

        let err = bound.handler.invoke(test_context(&["Helper"], RecordingClient::new()), CommandArgs::default()).await.unwrap_err();
        assert!(matches!(err, BotError::Authorization(AuthorizationError { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        bound.handler.invoke(test_context(&["Moderator"], RecordingClient::new()), CommandArgs::default()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
