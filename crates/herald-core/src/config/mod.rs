pub mod draft;
pub mod editor;
pub mod model;

pub use draft::{Attachment, ConfigDraft};
pub use editor::{ConfigEditor, RefreshMode};
pub use model::{ConfigUpdate, PersistedConfig, Schedule, ScheduleSlot};
