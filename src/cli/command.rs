//! Console command parsing.

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `list` / `ls`
    List,
    /// `add <text>` / `create <text>`
    Add(String),
    /// `update <id> <text>`
    Update { id: String, description: String },
    /// `delete <id>` / `remove <id>`
    Delete(String),
    /// `complete <id>` / `done <id>`
    Toggle(String),
    /// `stats`, or `stats json` for machine-readable output
    Stats { json: bool },
    /// `help` / `h`
    Help,
    /// `quit` / `exit` / `q`
    Quit,
    /// Blank line
    Empty,
    /// Known command with missing arguments; carries the hint to print
    Usage(&'static str),
    /// Anything else
    Unknown(String),
}

impl Command {
    /// Parses a line. The verb is case-insensitive; arguments keep their case.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" if rest.is_empty() => Command::Quit,
            "help" | "h" if rest.is_empty() => Command::Help,
            "list" | "ls" if rest.is_empty() => Command::List,
            "stats" => match rest.to_ascii_lowercase().as_str() {
                "" => Command::Stats { json: false },
                "json" => Command::Stats { json: true },
                _ => Command::Usage("Usage: stats [json]"),
            },
            "add" | "create" => {
                if rest.is_empty() {
                    Command::Usage("Please provide a task description. Usage: add <task>")
                } else {
                    Command::Add(rest.to_string())
                }
            }
            "update" => match rest.split_once(char::is_whitespace) {
                Some((id, description)) if !description.trim().is_empty() => Command::Update {
                    id: id.to_string(),
                    description: description.trim().to_string(),
                },
                _ => Command::Usage(
                    "Please provide both task ID and new description. Usage: update <id> <new_task>",
                ),
            },
            "delete" | "remove" => {
                if rest.is_empty() {
                    Command::Usage("Please provide a task ID. Usage: delete <id>")
                } else {
                    Command::Delete(rest.to_string())
                }
            }
            "complete" | "done" => {
                if rest.is_empty() {
                    Command::Usage("Please provide a task ID. Usage: complete <id>")
                } else {
                    Command::Toggle(rest.to_string())
                }
            }
            _ => Command::Unknown(line.to_string()),
        }
    }
}
