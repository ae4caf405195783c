pub mod model;
pub mod view;

pub use model::{AWAITING_SCAN_LABEL, ScanArtifact, ScanPayload, SessionStatus};
pub use view::{SessionState, SessionView};
