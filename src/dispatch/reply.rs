//! User-visible reply texts
//!
//! Plain strings only; richer presentation (embeds, markdown) is a host
//! concern.

use std::time::Duration;

use crate::command::CommandSpec;
use crate::resolve::ResolvedArgs;
use crate::types::Capability;

pub(crate) const GUILD_ONLY: &str = "This command can only be used in a server channel.";

pub(crate) const STORE_UNAVAILABLE: &str =
    "Unable to run the command because the cooldown store is unavailable.";

pub(crate) const STORE_TROUBLE: &str =
    "Something went wrong while managing the command's cooldown.";

pub(crate) const EXECUTION_FAILED: &str = "Something went wrong while executing the command.";

/// Wrong-usage reply: the signature followed by each invalid argument's
/// name and its override message or description
pub(crate) fn wrong_usage(spec: &CommandSpec, args: &ResolvedArgs) -> String {
    let mut text = format!("Wrong command usage: {}\n\nWrong arguments:", spec.signature());
    for arg in spec.args() {
        if args.invalid_ids().contains(&arg.id()) {
            text.push('\n');
            text.push_str(&arg.name().to_lowercase());
            let message = arg.usage_message();
            if !message.is_empty() {
                text.push_str(": ");
                text.push_str(message);
            }
        }
    }
    text
}

pub(crate) fn missing_capabilities(missing: &[&Capability]) -> String {
    let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
    let plural = if names.len() > 1 { "capabilities" } else { "capability" };
    format!(
        "You need the {} {} to run this command.",
        names.join(", "),
        plural
    )
}

pub(crate) fn on_cooldown(remaining: Duration) -> String {
    // sub-second precision would only add noise
    let shown = if remaining >= Duration::from_secs(1) {
        Duration::from_secs(remaining.as_secs())
    } else {
        Duration::from_secs(1)
    };
    format!(
        "The command is on cooldown: {} remaining.",
        humantime::format_duration(shown)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{ArgSpec, CommandSpec};
    use crate::resolve::resolve;

    #[test]
    fn wrong_usage_lists_each_invalid_argument() {
        let spec = CommandSpec::builder("roll")
            .argument(
                ArgSpec::builder(0, "Sides")
                    .options(["6", "20"])
                    .description("die size"),
            )
            .argument(
                ArgSpec::builder(1, "Count")
                    .parse_number(true)
                    .error_message("count must be a number"),
            )
            .build()
            .unwrap();
        let choose = |_: crate::command::ArgId, _: &str| 0;
        let args = resolve(&spec, "7 many", &choose);

        let text = wrong_usage(&spec, &args);
        assert!(text.contains("roll <sides(6|20)> <count>"));
        assert!(text.contains("sides: die size"));
        assert!(text.contains("count: count must be a number"));
    }

    #[test]
    fn cooldown_reply_rounds_to_seconds() {
        let text = on_cooldown(Duration::from_millis(4_850));
        assert_eq!(text, "The command is on cooldown: 4s remaining.");

        let text = on_cooldown(Duration::from_millis(120));
        assert_eq!(text, "The command is on cooldown: 1s remaining.");
    }

    #[test]
    fn capability_reply_pluralizes() {
        let kick = Capability::new("Kick Members");
        let ban = Capability::new("Ban Members");
        assert_eq!(
            missing_capabilities(&[&kick]),
            "You need the Kick Members capability to run this command."
        );
        assert_eq!(
            missing_capabilities(&[&kick, &ban]),
            "You need the Kick Members, Ban Members capabilities to run this command."
        );
    }
}
