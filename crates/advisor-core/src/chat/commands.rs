//! Slash commands intercepted before an input reaches the transcript.

/// Definition of a command.
#[derive(Debug, Clone)]
pub struct Command {
    /// Primary name (e.g., "name") - without the leading slash.
    pub name: &'static str,
    /// Aliases - without leading slashes.
    pub aliases: &'static [&'static str],
    /// Argument hint shown in help (empty when the command takes none).
    pub usage: &'static str,
    /// Short description shown in help.
    pub description: &'static str,
}

impl Command {
    /// Returns true if `word` is this command's name or one of its aliases.
    pub fn is_named(&self, word: &str) -> bool {
        self.name.eq_ignore_ascii_case(word)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(word))
    }
}

/// Available commands.
pub const COMMANDS: &[Command] = &[
    Command {
        name: "name",
        aliases: &[],
        usage: "<your name>",
        description: "Tell the advisor what to call you",
    },
    Command {
        name: "help",
        aliases: &["commands"],
        usage: "",
        description: "List available commands",
    },
    Command {
        name: "reset",
        aliases: &["clear"],
        usage: "",
        description: "Start the conversation over",
    },
];

/// A recognised command with its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedCommand<'a> {
    Name(&'a str),
    Help,
    Reset,
}

/// Parses `/command args`. Unregistered words are not commands.
pub fn parse(input: &str) -> Option<ParsedCommand<'_>> {
    let body = input.trim().strip_prefix('/')?;
    let (word, arg) = body
        .split_once(char::is_whitespace)
        .map_or((body, ""), |(w, a)| (w, a.trim()));

    let command = COMMANDS.iter().find(|c| c.is_named(word))?;
    match command.name {
        "name" => Some(ParsedCommand::Name(arg)),
        "help" => Some(ParsedCommand::Help),
        "reset" => Some(ParsedCommand::Reset),
        _ => None,
    }
}

/// Help text listing every command, formatted as a bullet list.
pub fn help_text() -> String {
    let mut text = String::from("Here's what I understand:\n");
    for command in COMMANDS {
        let mut line = format!("- **/{}", command.name);
        if !command.usage.is_empty() {
            line.push(' ');
            line.push_str(command.usage);
        }
        line.push_str("**: ");
        line.push_str(command.description);
        if !command.aliases.is_empty() {
            line.push_str(" (also ");
            let aliases: Vec<String> = command.aliases.iter().map(|a| format!("/{a}")).collect();
            line.push_str(&aliases.join(", "));
            line.push(')');
        }
        text.push_str(&line);
        text.push('\n');
    }
    text.push_str("Anything else goes straight to the advisor.");
    text
}
