pub mod model;
pub mod resolver;

pub use model::{Roster, TargetGroup};
pub use resolver::{Resolution, partition, resolve_groups, resolve_names};
