//! Loading a local image chosen as the broadcast attachment.

use std::path::Path;

use herald_core::config::Attachment;
use herald_core::error::{HeraldError, Result};

/// File extensions the backend accepts as a broadcast image.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Reads `path` into an [`Attachment`], guessing the MIME type from its extension.
pub async fn load_attachment(path: &Path) -> Result<Attachment> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(HeraldError::attachment(format!(
            "{} is not an image (allowed: {})",
            path.display(),
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| HeraldError::attachment(format!("invalid file name: {}", path.display())))?
        .to_string();

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        HeraldError::attachment(format!("Failed to read {}: {}", path.display(), e))
    })?;

    if bytes.is_empty() {
        return Err(HeraldError::attachment(format!("{} is empty", path.display())));
    }

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    tracing::debug!(file = %file_name, mime = %mime_type, len = bytes.len(), "attachment loaded");
    Ok(Attachment::new(file_name, mime_type, bytes))
}
