use std::path::Path;

use anyhow::{Context, Result};
use herald_application::{ConsoleUseCase, ConsoleView};
use herald_core::config::RefreshMode;
use herald_core::session::SessionState;

pub async fn run(console: &ConsoleUseCase, qr_out: Option<&Path>) -> Result<()> {
    let view = console.refresh(ConsoleView::new(), RefreshMode::Auto).await;

    for line in describe(&view) {
        println!("{}", line);
    }

    if let Some(path) = qr_out {
        match &view.session.artifact {
            Some(artifact) => {
                let bytes = artifact.decode_image()?;
                std::fs::write(path, &bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("✓ QR code written to {}", path.display());
            }
            None => println!("No QR code to write"),
        }
    }

    Ok(())
}

/// Status panel lines for `view`.
pub fn describe(view: &ConsoleView) -> Vec<String> {
    let session = &view.session;
    let mut lines = Vec::new();

    match &session.raw_state {
        Some(raw) => lines.push(format!("Session:  {} ({})", session.state, raw)),
        None => lines.push(format!("Session:  {}", session.state)),
    }

    match session.state {
        SessionState::BackendUnreachable => {
            if let Some(err) = &session.error {
                lines.push(format!("Error:    {}", err));
            }
        }
        SessionState::AwaitingScan => {
            if session.artifact.is_some() {
                lines.push("QR code:  available (use --qr-out FILE to save it)".to_string());
            } else {
                lines.push("QR code:  not available yet".to_string());
            }
        }
        SessionState::Connected | SessionState::Disconnected => {}
    }

    if let Some(at) = view.fetched_at {
        lines.push(format!("Fetched:  {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    lines
}
