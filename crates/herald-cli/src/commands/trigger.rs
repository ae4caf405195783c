use anyhow::{Result, bail};
use herald_application::ConsoleUseCase;

/// Broadcasts whatever the backend has persisted; local edits play no part.
pub async fn run(console: &ConsoleUseCase) -> Result<()> {
    match console.trigger().await {
        Ok(()) => {
            println!("✓ Broadcast triggered");
            Ok(())
        }
        Err(err) => bail!("Failed: {}", err.operator_message()),
    }
}
