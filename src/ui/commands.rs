use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Commands invoked by starting a message with a leading slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    /// Show available commands
    Help,
    /// Exit the application
    Bye,
}

impl SlashCommand {
    /// Command string without the leading '/'.
    pub fn keyword(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            SlashCommand::Help => "show available commands",
            SlashCommand::Bye => "exit",
        }
    }
}

/// Parse a slash command from committed input. Anything after the keyword is
/// ignored.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    if !input.starts_with('/') {
        return None;
    }

    let head = input[1..].split_whitespace().next()?;
    SlashCommand::from_str(head)
        .ok()
        .or_else(|| match head.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Some(SlashCommand::Bye),
            "h" => Some(SlashCommand::Help),
            _ => None,
        })
}

/// One-line help shown in the status area.
pub fn help_text() -> String {
    let mut help = String::from("Commands:");
    for command in SlashCommand::iter() {
        help.push_str(&format!(" /{} ({})", command.keyword(), command.description()));
    }
    help.push_str("  ·  Esc quits");
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_slash_command("/help"), Some(SlashCommand::Help));
        assert_eq!(parse_slash_command("/bye"), Some(SlashCommand::Bye));
        assert_eq!(parse_slash_command("/bye now"), Some(SlashCommand::Bye));
    }

    #[test]
    fn parses_aliases() {
        assert_eq!(parse_slash_command("/q"), Some(SlashCommand::Bye));
        assert_eq!(parse_slash_command("/quit"), Some(SlashCommand::Bye));
        assert_eq!(parse_slash_command("/h"), Some(SlashCommand::Help));
    }

    #[test]
    fn plain_messages_are_not_commands() {
        assert_eq!(parse_slash_command("hello"), None);
        assert_eq!(parse_slash_command("what is /help"), None);
        assert_eq!(parse_slash_command("/unknown"), None);
        assert_eq!(parse_slash_command("/"), None);
    }
}
