//! Roster domain models.

use serde::{Deserialize, Serialize};

/// An addressable broadcast target as reported by the backend.
///
/// `id` is stable and backend-assigned. `name` is mutable and not unique,
/// so lookups key on `id` and display uses `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    pub id: String,
    pub name: String,
}

impl TargetGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One snapshot of the live roster, in backend order.
///
/// Snapshots are replaced wholesale on refresh; there is no incremental merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    groups: Vec<TargetGroup>,
}

impl Roster {
    pub fn new(groups: Vec<TargetGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[TargetGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.groups.iter().any(|g| g.id == id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&TargetGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Resolves an operator choice to a group.
    ///
    /// Accepts, in order: a 1-based position in the roster, an exact id,
    /// or an exact name (first match wins when names repeat).
    pub fn lookup(&self, choice: &str) -> Option<&TargetGroup> {
        let choice = choice.trim();
        if let Ok(position) = choice.parse::<usize>()
            && position >= 1
            && let Some(group) = self.groups.get(position - 1)
        {
            return Some(group);
        }
        self.find_by_id(choice)
            .or_else(|| self.groups.iter().find(|g| g.name == choice))
    }
}

impl From<Vec<TargetGroup>> for Roster {
    fn from(groups: Vec<TargetGroup>) -> Self {
        Self::new(groups)
    }
}
