//! Colored panels printed after each command.

use colored::Colorize;
use herald_application::ConsoleView;
use herald_core::config::{ConfigDraft, ScheduleSlot};
use herald_core::roster::Roster;
use herald_core::session::SessionState;

use crate::command::COMMANDS;

pub fn print_banner(backend_url: &str) {
    println!("{}", "=== Herald Console ===".bright_magenta().bold());
    println!("{}", format!("Backend: {}", backend_url).bright_black());
    println!(
        "{}",
        "Type '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();
}

pub fn print_help() {
    for (cmd, about) in COMMANDS {
        println!("  {} {}", format!("{:<10}", cmd).bright_cyan(), about.bright_black());
    }
    println!("  {} {}", format!("{:<10}", "quit").bright_cyan(), "leave the console".bright_black());
}

pub fn print_status(view: &ConsoleView) {
    let session = &view.session;
    let label = match session.state {
        SessionState::Connected => session.state.label().bright_green(),
        SessionState::AwaitingScan => session.state.label().yellow(),
        SessionState::Disconnected => session.state.label().yellow(),
        SessionState::BackendUnreachable => session.state.label().red(),
    };
    match &session.raw_state {
        Some(raw) => println!("Session: {} {}", label, format!("({})", raw).bright_black()),
        None => println!("Session: {}", label),
    }

    if let Some(err) = &session.error {
        println!("{}", format!("  {}", err).red());
    }
    if session.state == SessionState::AwaitingScan {
        match &session.artifact {
            Some(artifact) => println!(
                "{}",
                format!(
                    "  QR code ready ({}); export it with `herald status --qr-out FILE`",
                    artifact.mime_type().unwrap_or("image")
                )
                .yellow()
            ),
            None => println!("{}", "  QR code not available yet".bright_black()),
        }
    }
    if let Some(at) = view.fetched_at {
        println!(
            "{}",
            format!("  fetched {}", at.format("%H:%M:%S UTC")).bright_black()
        );
    }
}

pub fn print_draft(view: &ConsoleView) {
    if let Some(err) = &view.config_error {
        println!("{}", format!("Failed to load config: {}", err).red());
    }

    let draft = view.editor.draft();
    let title = if view.editor.is_dirty() {
        format!("{} {}", "Draft".bold(), "(unsaved edits)".yellow())
    } else {
        "Draft".bold().to_string()
    };
    println!("{}", title);
    for line in draft_lines(draft, &view.roster) {
        println!("  {}", line);
    }
    for id in draft.unresolved_ids() {
        println!(
            "{}",
            format!("  ! {} is not in the group list; /save is blocked until /refresh finds it or /forget", id)
                .yellow()
        );
    }
}

pub fn print_groups(view: &ConsoleView) {
    if let Some(hint) = view.roster_hint() {
        println!("{}", hint.yellow());
        return;
    }
    for line in group_lines(&view.roster, view.editor.draft()) {
        println!("  {}", line);
    }
}

pub fn print_error(message: impl AsRef<str>) {
    println!("{}", message.as_ref().red());
}

pub fn print_ok(message: impl AsRef<str>) {
    println!("{}", message.as_ref().bright_green());
}

/// Plain lines for the draft panel.
pub fn draft_lines(draft: &ConfigDraft, roster: &Roster) -> Vec<String> {
    let mut lines = Vec::new();
    for slot in ScheduleSlot::ALL {
        lines.push(format!("{:<18} {}", slot.label(), draft.schedule.get(slot)));
    }
    lines.push(format!("Confirmation:      {}", draft.confirmation_number));

    let mut message = draft.message.lines();
    lines.push(format!("Message:           {}", message.next().unwrap_or("")));
    lines.extend(message.map(|line| format!("                   {}", line)));

    let image = match (draft.new_attachment(), draft.existing_attachment()) {
        (Some(new), _) => format!("{} (new)", new.file_name),
        (None, Some(existing)) => existing.to_string(),
        (None, None) => "(none)".to_string(),
    };
    lines.push(format!("Image:             {}", image));

    let names = draft.selected_names(roster);
    let targets = if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    };
    lines.push(format!("Target groups:     {}", targets));
    lines
}

/// Numbered roster with the draft's selection marked.
pub fn group_lines(roster: &Roster, draft: &ConfigDraft) -> Vec<String> {
    roster
        .groups()
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let mark = if draft.selected_ids().contains(&group.id) { "x" } else { " " };
            format!("[{}] {:>2}. {}", mark, i + 1, group.name)
        })
        .collect()
}
