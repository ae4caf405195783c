use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use herald_application::{ConsoleUseCase, ConsoleView};
use herald_core::config::RefreshMode;
use herald_infrastructure::{ConsoleSettings, HeraldPaths, SettingsOverrides, load_attachment};

mod command;
mod helper;
mod render;

use command::{ConsoleCommand, DraftField};
use helper::ConsoleHelper;

/// Whether the loop keeps reading input.
enum Flow {
    Continue,
    Quit,
}

/// Logs go to a daily file so they never interleave with the prompt.
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = HeraldPaths::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;
    let appender = tracing_appender::rolling::daily(&log_dir, "herald-console.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "herald=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(guard)
}

/// Runs one command against `view` and hands the view back.
async fn execute(
    console: &ConsoleUseCase,
    mut view: ConsoleView,
    command: ConsoleCommand,
) -> (ConsoleView, Flow) {
    match command {
        ConsoleCommand::Quit => return (view, Flow::Quit),
        ConsoleCommand::Help => render::print_help(),
        ConsoleCommand::Refresh => {
            let had_edits = view.editor.is_dirty();
            view = console.refresh(view, RefreshMode::Explicit).await;
            if had_edits && view.config_error.is_none() {
                println!("{}", "Unsaved edits discarded.".yellow());
            }
            render::print_status(&view);
            render::print_draft(&view);
        }
        ConsoleCommand::Status => render::print_status(&view),
        ConsoleCommand::Show => render::print_draft(&view),
        ConsoleCommand::Groups => render::print_groups(&view),
        ConsoleCommand::Set { field, value } => {
            let draft = view.editor.edit();
            match field {
                DraftField::Slot(slot) => draft.set_slot(slot, value),
                DraftField::Message => draft.message = value,
                DraftField::Confirmation => draft.confirmation_number = value,
            }
            render::print_draft(&view);
        }
        ConsoleCommand::Select(choice) => match view.roster.lookup(&choice).cloned() {
            Some(group) => {
                if !view.editor.select(&group) {
                    println!("{}", format!("{} is already selected", group.name).bright_black());
                }
                render::print_groups(&view);
            }
            None => render::print_error(format!("Unknown group: {} (see /groups)", choice)),
        },
        ConsoleCommand::Deselect(choice) => match view.roster.lookup(&choice).cloned() {
            Some(group) => {
                if !view.editor.deselect(&group.id) {
                    println!("{}", format!("{} was not selected", group.name).bright_black());
                }
                render::print_groups(&view);
            }
            None => render::print_error(format!("Unknown group: {} (see /groups)", choice)),
        },
        ConsoleCommand::Forget => {
            let dropped = view.editor.forget_unresolved();
            println!("{}", format!("Forgot {} unresolved group(s)", dropped).bright_black());
        }
        ConsoleCommand::Image(path) => match load_attachment(&path).await {
            Ok(attachment) => {
                render::print_ok(format!(
                    "Attached {} ({} bytes); it is uploaded on /save",
                    attachment.file_name,
                    attachment.len()
                ));
                view.editor.edit().attach(attachment);
            }
            Err(err) => render::print_error(err.to_string()),
        },
        ConsoleCommand::NoImage => match view.editor.edit().detach() {
            Some(attachment) => render::print_ok(format!("Dropped {}", attachment.file_name)),
            None => println!("{}", "No new image attached".bright_black()),
        },
        ConsoleCommand::Save => {
            if let Some(err) = &view.config_error {
                render::print_error(format!("Cannot save without a loaded config: {}", err));
                return (view, Flow::Continue);
            }
            let (next, outcome) = console.save(view).await;
            view = next;
            match outcome {
                Ok(receipt) => {
                    render::print_ok(format!(
                        "Configuration saved successfully! ({} target group(s){})",
                        receipt.target_count,
                        if receipt.attachment_sent { ", new image" } else { "" }
                    ));
                }
                Err(err) => render::print_error(format!("Error saving: {}", err.operator_message())),
            }
        }
        ConsoleCommand::Trigger => match console.trigger().await {
            Ok(()) => render::print_ok("Broadcast triggered!"),
            Err(err) => render::print_error(format!("Failed: {}", err.operator_message())),
        },
    }
    (view, Flow::Continue)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging()?;

    let settings = ConsoleSettings::load(&SettingsOverrides::default())?;
    let gateway = Arc::new(settings.gateway()?);
    let console = ConsoleUseCase::new(gateway, settings.request_timeout());
    tracing::info!(backend = %settings.backend_url, "console started");

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ConsoleHelper::new()));

    render::print_banner(&settings.backend_url);
    let mut view = console.refresh(ConsoleView::new(), RefreshMode::Auto).await;
    render::print_status(&view);
    if let Some(hint) = view.roster_hint() {
        println!("{}", hint.yellow());
    }
    println!();

    loop {
        match rl.readline("herald> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match ConsoleCommand::parse(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        render::print_error(message);
                        continue;
                    }
                };

                if command.wants_auto_refresh() {
                    view = console.refresh(view, RefreshMode::Auto).await;
                }
                let (next, flow) = execute(&console, view, command).await;
                view = next;
                if let Flow::Quit = flow {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    if view.editor.is_dirty() {
        tracing::info!("console closed with unsaved edits");
    }
    Ok(())
}
