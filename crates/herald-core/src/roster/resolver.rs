//! Maps persisted target identifiers onto the current roster.
//!
//! Everything here is a pure function of `(roster, ids)`. Output order always
//! follows the persisted identifier list, never the roster.

use super::model::{Roster, TargetGroup};

/// Identifiers split by whether the current roster knows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Identifiers present in the roster, in input order.
    pub resolved: Vec<String>,
    /// Identifiers with no match in the roster, in input order.
    pub unresolved: Vec<String>,
}

/// Returns the groups for every identifier that resolves, in `ids` order.
pub fn resolve_groups<'a>(roster: &'a Roster, ids: &[String]) -> Vec<&'a TargetGroup> {
    ids.iter().filter_map(|id| roster.find_by_id(id)).collect()
}

/// Returns the display names used as the default editor selection.
///
/// Identifiers with no match are skipped.
pub fn resolve_names(roster: &Roster, ids: &[String]) -> Vec<String> {
    resolve_groups(roster, ids)
        .into_iter()
        .map(|g| g.name.clone())
        .collect()
}

/// Splits `ids` into resolvable and unresolvable identifiers.
pub fn partition(roster: &Roster, ids: &[String]) -> Resolution {
    let mut resolution = Resolution::default();
    for id in ids {
        if roster.contains_id(id) {
            resolution.resolved.push(id.clone());
        } else {
            resolution.unresolved.push(id.clone());
        }
    }
    resolution
}
