pub mod attachment;
pub mod http_gateway;
pub mod paths;
pub mod settings;

pub use crate::attachment::load_attachment;
pub use crate::http_gateway::HttpBackendGateway;
pub use crate::paths::HeraldPaths;
pub use crate::settings::{ConsoleSettings, SettingsOverrides};
