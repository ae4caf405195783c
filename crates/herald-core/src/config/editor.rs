//! Ownership of the draft across refresh cycles.

use serde::{Deserialize, Serialize};

use super::draft::ConfigDraft;
use super::model::PersistedConfig;
use crate::roster::{Roster, TargetGroup};

/// Why a refresh cycle is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshMode {
    /// Driven by any interaction; never overwrites pending edits.
    Auto,
    /// Operator asked for a refresh; re-seeds even over pending edits.
    Explicit,
}

/// Holds the draft and decides, each cycle, whether it is re-seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEditor {
    draft: ConfigDraft,
    dirty: bool,
    seeded: bool,
}

impl ConfigEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ConfigDraft {
        &self.draft
    }

    /// Mutable access for an operator edit; marks the draft as pending.
    pub fn edit(&mut self) -> &mut ConfigDraft {
        self.dirty = true;
        &mut self.draft
    }

    /// Selects `group`; the draft only becomes pending if it was not selected.
    pub fn select(&mut self, group: &TargetGroup) -> bool {
        if self.draft.selected_ids().contains(&group.id) {
            return false;
        }
        self.edit().select(group)
    }

    /// Deselects `id`; the draft only becomes pending if it was selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        if !self.draft.selected_ids().iter().any(|selected| selected == id) {
            return false;
        }
        self.edit().deselect(id)
    }

    /// Forgets unresolved targets. Returns how many were dropped.
    pub fn forget_unresolved(&mut self) -> usize {
        if self.draft.unresolved_ids().is_empty() {
            return 0;
        }
        self.edit().forget_unresolved()
    }

    /// True while the operator has edits that were neither saved nor discarded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True once the draft has been seeded from a fetched configuration.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn should_seed(&self, mode: RefreshMode) -> bool {
        mode == RefreshMode::Explicit || !self.dirty
    }

    /// Re-seeds from `config` if `mode` allows it. Returns whether it did.
    pub fn seed(&mut self, config: &PersistedConfig, roster: &Roster, mode: RefreshMode) -> bool {
        if !self.should_seed(mode) {
            return false;
        }
        self.draft = ConfigDraft::seed(config, roster);
        self.dirty = false;
        self.seeded = true;
        true
    }

    /// Re-splits the draft's selection against a new roster snapshot.
    pub fn reconcile(&mut self, roster: &Roster) {
        self.draft.reconcile(roster);
    }

    /// Marks the draft as saved so the next cycle replaces it with a fresh seed.
    ///
    /// The chosen attachment has been consumed by the save and is dropped.
    pub fn discard(&mut self) {
        self.draft.detach();
        self.dirty = false;
    }
}
