pub mod config;
pub mod groups;
pub mod status;
pub mod trigger;

use std::sync::Arc;

use anyhow::{Context, Result};
use herald_application::ConsoleUseCase;
use herald_infrastructure::{ConsoleSettings, SettingsOverrides};

use crate::ConnectionArgs;

/// Resolves settings and builds the use case every command runs against.
pub fn connect(args: &ConnectionArgs) -> Result<ConsoleUseCase> {
    let overrides = SettingsOverrides {
        settings_path: args.settings.clone(),
        backend_url: args.backend_url.clone(),
        request_timeout_ms: args.timeout_ms,
    };
    let settings = ConsoleSettings::load(&overrides).context("Failed to load console settings")?;
    let gateway = settings.gateway()?;
    tracing::debug!(
        backend = %settings.backend_url,
        timeout_ms = settings.request_timeout_ms,
        "console settings resolved"
    );
    Ok(ConsoleUseCase::new(Arc::new(gateway), settings.request_timeout()))
}
