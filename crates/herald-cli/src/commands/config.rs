use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use clap::Args;
use herald_application::{ConsoleUseCase, ConsoleView};
use herald_core::config::{ConfigDraft, RefreshMode, ScheduleSlot};
use herald_core::roster::Roster;
use herald_infrastructure::load_attachment;

#[derive(Args, Debug, Default)]
pub struct SaveArgs {
    /// Send time for Sunday to Thursday (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub sun_thu: Option<String>,

    /// Send time for Friday (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub fri: Option<String>,

    /// Send time for Saturday (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub sat: Option<String>,

    /// Broadcast message text
    #[arg(long)]
    pub message: Option<String>,

    /// Number that receives the delivery confirmation
    #[arg(long, value_name = "NUMBER")]
    pub confirmation_number: Option<String>,

    /// Add a target group by list number, id, or name (repeatable)
    #[arg(long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Start from an empty target selection
    #[arg(long)]
    pub clear_groups: bool,

    /// Drop saved target groups that are missing from the current group list
    #[arg(long)]
    pub forget_unresolved: bool,

    /// New broadcast image (png, jpg, jpeg); the saved image is kept otherwise
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

pub async fn show(console: &ConsoleUseCase) -> Result<()> {
    let view = console.refresh(ConsoleView::new(), RefreshMode::Auto).await;
    if let Some(err) = &view.config_error {
        bail!("Failed to load config: {}", err);
    }

    for line in describe_draft(view.editor.draft(), &view.roster) {
        println!("{}", line);
    }
    if let Some(hint) = view.roster_hint() {
        println!();
        println!("{}", hint);
    }
    Ok(())
}

pub async fn save(console: &ConsoleUseCase, args: SaveArgs) -> Result<()> {
    let mut view = console.refresh(ConsoleView::new(), RefreshMode::Auto).await;
    if let Some(err) = &view.config_error {
        bail!("Failed to load config: {}", err);
    }

    apply_edits(&mut view, &args)?;
    if let Some(path) = &args.image {
        let attachment = load_attachment(path).await?;
        view.editor.edit().attach(attachment);
    }

    let (view, outcome) = console.save(view).await;
    let receipt = outcome.map_err(|err| anyhow!("Error saving: {}", err.operator_message()))?;

    println!("✓ Configuration saved successfully!");
    println!("  Target groups: {}", receipt.target_count);
    if receipt.attachment_sent {
        println!("  New image uploaded");
    }
    if let Some(err) = &view.config_error {
        println!("  Could not re-read the saved configuration: {}", err);
    }
    Ok(())
}

/// Applies the command-line overrides to the seeded draft.
pub fn apply_edits(view: &mut ConsoleView, args: &SaveArgs) -> Result<()> {
    let slots = [
        (ScheduleSlot::SunThu, &args.sun_thu),
        (ScheduleSlot::Fri, &args.fri),
        (ScheduleSlot::Sat, &args.sat),
    ];
    for (slot, value) in slots {
        if let Some(value) = value {
            view.editor.edit().set_slot(slot, value.as_str());
        }
    }
    if let Some(message) = &args.message {
        view.editor.edit().message = message.clone();
    }
    if let Some(number) = &args.confirmation_number {
        view.editor.edit().confirmation_number = number.clone();
    }
    if args.clear_groups {
        view.editor.edit().clear_selection();
    }
    if args.forget_unresolved {
        view.editor.forget_unresolved();
    }
    for choice in &args.groups {
        let group = view
            .roster
            .lookup(choice)
            .ok_or_else(|| anyhow!("Unknown group: {} (see `herald groups`)", choice))?
            .clone();
        view.editor.select(&group);
    }
    Ok(())
}

/// Lines describing the draft the way the operator edits it.
pub fn describe_draft(draft: &ConfigDraft, roster: &Roster) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Confirmation number: {}", or_none(&draft.confirmation_number)));
    lines.push("Schedule:".to_string());
    for slot in ScheduleSlot::ALL {
        lines.push(format!("  {:<18} {}", slot.label(), draft.schedule.get(slot)));
    }

    lines.push("Message:".to_string());
    if draft.message.is_empty() {
        lines.push("  (none)".to_string());
    } else {
        lines.extend(draft.message.lines().map(|line| format!("  {}", line)));
    }

    match (draft.new_attachment(), draft.existing_attachment()) {
        (Some(new), _) => lines.push(format!("Image: {} (new, {} bytes)", new.file_name, new.len())),
        (None, Some(existing)) => lines.push(format!("Image: {}", existing)),
        (None, None) => lines.push("Image: (none)".to_string()),
    }

    let names = draft.selected_names(roster);
    if names.is_empty() {
        lines.push("Target groups: (none)".to_string());
    } else {
        lines.push(format!("Target groups: {}", names.join(", ")));
    }

    if !draft.unresolved_ids().is_empty() {
        lines.push(format!(
            "Warning: saved target groups missing from the current group list block saving (refresh, or --forget-unresolved): {}",
            draft.unresolved_ids().join(", ")
        ));
    }
    lines
}

fn or_none(value: &str) -> &str {
    if value.trim().is_empty() { "(none)" } else { value }
}
