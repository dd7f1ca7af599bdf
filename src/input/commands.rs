//! # Command Definitions
//!
//! Word commands the player can type instead of a guess.

/// A typed command and the words that trigger it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Words that trigger the command; the first is shown in help
    pub aliases: &'static [&'static str],
    /// One-line description for the help text
    pub description: &'static str,
    pub kind: CommandKind,
}

/// What a command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    NewGame,
    TestConnection,
    Help,
    Quit,
}

/// Every command the game understands.
pub const COMMANDS: &[Command] = &[
    Command {
        aliases: &["new", "n", "reset", "again"],
        description: "start a new round",
        kind: CommandKind::NewGame,
    },
    Command {
        aliases: &["test", "ping"],
        description: "check that the oracle can be reached",
        kind: CommandKind::TestConnection,
    },
    Command {
        aliases: &["help", "?", "h"],
        description: "show this help",
        kind: CommandKind::Help,
    },
    Command {
        aliases: &["quit", "q", "exit"],
        description: "leave the game",
        kind: CommandKind::Quit,
    },
];

impl Command {
    /// Finds the command matching a word, ignoring case.
    pub fn lookup(word: &str) -> Option<&'static Command> {
        let word = word.to_ascii_lowercase();
        COMMANDS
            .iter()
            .find(|command| command.aliases.iter().any(|alias| *alias == word))
    }
}

/// Help text listing every command.
pub fn help_text() -> String {
    let mut lines = vec!["Type a number to guess, or one of:".to_string()];
    for command in COMMANDS {
        lines.push(format!("  {:<6} {}", command.aliases[0], command.description));
    }
    lines.join("\n")
}
