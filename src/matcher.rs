//! Command matching
//!
//! Finds the registered name or alias that the start of a message body
//! refers to. The longest match wins so a short alias can never shadow a
//! longer one sharing its prefix (`pour` vs `pour water`).

use tracing::trace;

use crate::command::{CommandEntry, CommandRegistry};

/// A successful match: the command entry and the literal the body matched
pub struct CommandMatch<'r> {
    pub entry: &'r CommandEntry,
    /// Matched name/alias, lowercased; its length is what the dispatcher
    /// strips before resolving arguments
    pub matched: &'r str,
}

/// Find the longest registered name or alias that is a case-insensitive
/// literal prefix of `body`. Equal-length candidates tie-break to the
/// lexicographically smallest so the choice is deterministic. No match is
/// not an error.
pub fn find_match<'r>(registry: &'r CommandRegistry, body: &str) -> Option<CommandMatch<'r>> {
    let mut best: Option<&'r str> = None;
    for alias in registry.aliases() {
        if !is_ci_prefix(alias, body) {
            continue;
        }
        let better = match best {
            None => true,
            Some(current) => {
                alias.len() > current.len() || (alias.len() == current.len() && alias < current)
            }
        };
        if better {
            best = Some(alias);
        }
    }

    let matched = best?;
    trace!(matched, "matched command name");
    let entry = registry
        .entry_for_alias(matched)
        .unwrap_or_else(|| unreachable!("alias came from the registry"));
    Some(CommandMatch { entry, matched })
}

/// ASCII-case-insensitive prefix test. Byte-wise comparison keeps the
/// matched length valid as a byte offset into `body`.
fn is_ci_prefix(prefix: &str, body: &str) -> bool {
    body.len() >= prefix.len()
        && body.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandBody, CommandError, CommandSpec};
    use crate::resolve::ResolvedArgs;
    use crate::types::Message;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoopBody;

    #[async_trait]
    impl CommandBody for NoopBody {
        async fn execute(&self, _: &Message, _: &ResolvedArgs) -> Result<(), CommandError> {
            Ok(())
        }
    }

    fn registry(specs: Vec<CommandSpec>) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for spec in specs {
            registry.register(spec, Arc::new(NoopBody)).unwrap();
        }
        registry
    }

    #[test]
    fn longest_alias_wins() {
        let registry = registry(vec![CommandSpec::builder("command")
            .alias("cmd")
            .build()
            .unwrap()]);
        let m = find_match(&registry, "command now").unwrap();
        assert_eq!(m.matched, "command");
    }

    #[test]
    fn longest_match_across_commands() {
        let registry = registry(vec![
            CommandSpec::builder("pour").build().unwrap(),
            CommandSpec::builder("pour water").build().unwrap(),
        ]);
        let m = find_match(&registry, "pour water").unwrap();
        assert_eq!(m.matched, "pour water");

        let m = find_match(&registry, "pour tea").unwrap();
        assert_eq!(m.matched, "pour");
    }

    #[test]
    fn alias_can_match_without_trailing_separator() {
        // prefix matching is literal; no word boundary is required
        let registry = registry(vec![CommandSpec::builder("roll").build().unwrap()]);
        let m = find_match(&registry, "roll20").unwrap();
        assert_eq!(m.matched, "roll");
    }

    #[test]
    fn match_is_case_insensitive() {
        let registry = registry(vec![CommandSpec::builder("Ping").build().unwrap()]);
        let m = find_match(&registry, "PING me").unwrap();
        assert_eq!(m.matched, "ping");
    }

    #[test]
    fn no_match_is_none() {
        let registry = registry(vec![CommandSpec::builder("ping").build().unwrap()]);
        assert!(find_match(&registry, "pong").is_none());
    }
}
