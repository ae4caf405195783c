//! Parsing of console input lines.

use std::path::PathBuf;

use herald_core::config::ScheduleSlot;

/// Command words offered for completion, with their argument hint.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/refresh", "re-read the backend, discarding unsaved edits"),
    ("/status", "show the session state"),
    ("/show", "show the draft configuration"),
    ("/groups", "list target groups"),
    ("/set", "<sun_thu|fri|sat|message|confirmation> <value>"),
    ("/select", "<number|id|name> add a target group"),
    ("/deselect", "<number|id|name> remove a target group"),
    ("/forget", "drop saved groups that no longer exist"),
    ("/image", "<file> attach a new png/jpg image"),
    ("/noimage", "drop the newly attached image"),
    ("/save", "save the draft to the backend"),
    ("/trigger", "broadcast the saved configuration now"),
    ("/help", "show this list"),
];

/// Draft field addressed by `/set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Slot(ScheduleSlot),
    Message,
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Refresh,
    Status,
    Show,
    Groups,
    Set { field: DraftField, value: String },
    Select(String),
    Deselect(String),
    Forget,
    Image(PathBuf),
    NoImage,
    Save,
    Trigger,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Whether the line should be preceded by an automatic refresh.
    pub fn wants_auto_refresh(&self) -> bool {
        !matches!(self, Self::Refresh | Self::Help | Self::Quit)
    }

    /// Parses one trimmed, non-empty input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Ok(Self::Quit);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "/refresh" => Self::Refresh,
            "/status" => Self::Status,
            "/show" => Self::Show,
            "/groups" => Self::Groups,
            "/set" => parse_set(rest)?,
            "/select" => Self::Select(required(word, rest)?),
            "/deselect" => Self::Deselect(required(word, rest)?),
            "/forget" => Self::Forget,
            "/image" => Self::Image(PathBuf::from(required(word, rest)?)),
            "/noimage" => Self::NoImage,
            "/save" => Self::Save,
            "/trigger" => Self::Trigger,
            "/help" => Self::Help,
            other => return Err(format!("Unknown command: {} (try /help)", other)),
        };
        Ok(command)
    }
}

fn required(word: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("{} needs an argument", word))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_set(rest: &str) -> Result<ConsoleCommand, String> {
    let (name, value) = rest
        .split_once(char::is_whitespace)
        .map(|(name, value)| (name, value.trim()))
        .unwrap_or((rest, ""));

    let field = match name {
        "" => return Err("/set needs a field and a value".to_string()),
        "message" | "msg" => DraftField::Message,
        "confirmation" | "confirmation_number" => DraftField::Confirmation,
        slot => DraftField::Slot(slot.parse().map_err(|e: herald_core::HeraldError| e.to_string())?),
    };

    // Messages may span lines; `\n` in the input stands for a line break.
    let value = match field {
        DraftField::Message => value.replace("\\n", "\n"),
        _ => value.to_string(),
    };
    Ok(ConsoleCommand::Set { field, value })
}
