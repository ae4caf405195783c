//! The operator's in-progress, unsaved edit of the configuration.

use std::fmt;

use super::model::{ConfigUpdate, PersistedConfig, Schedule, ScheduleSlot};
use crate::error::{HeraldError, Result};
use crate::roster::{Roster, TargetGroup, partition, resolve_groups};

/// A newly chosen local image, sent as the `image` part on save.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image bytes are kept out of debug output.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Locally owned, mutable copy of the persisted configuration.
///
/// Target selection is held as identifiers. `selected_ids` only ever holds
/// identifiers the roster knew at the last reconcile; the rest wait in
/// `unresolved_ids` until they resolve again or the operator forgets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDraft {
    pub confirmation_number: String,
    pub schedule: Schedule,
    pub message: String,
    selected_ids: Vec<String>,
    unresolved_ids: Vec<String>,
    /// Backend-held image reference at seed time (display only).
    existing_attachment: Option<String>,
    new_attachment: Option<Attachment>,
}

impl Default for ConfigDraft {
    fn default() -> Self {
        Self {
            confirmation_number: String::new(),
            schedule: Schedule::default().with_fallbacks(),
            message: String::new(),
            selected_ids: Vec::new(),
            unresolved_ids: Vec::new(),
            existing_attachment: None,
            new_attachment: None,
        }
    }
}

impl ConfigDraft {
    /// Builds a fresh draft from the persisted configuration.
    ///
    /// Persisted identifiers missing from `roster` are kept aside as
    /// unresolved rather than selected.
    pub fn seed(config: &PersistedConfig, roster: &Roster) -> Self {
        let resolution = partition(roster, &config.target_group_ids);
        Self {
            confirmation_number: config.confirmation_number.clone(),
            schedule: config.schedule.clone().with_fallbacks(),
            message: config.message.clone(),
            selected_ids: resolution.resolved,
            unresolved_ids: resolution.unresolved,
            existing_attachment: config.attachment.clone(),
            new_attachment: None,
        }
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    pub fn unresolved_ids(&self) -> &[String] {
        &self.unresolved_ids
    }

    pub fn existing_attachment(&self) -> Option<&str> {
        self.existing_attachment.as_deref()
    }

    pub fn new_attachment(&self) -> Option<&Attachment> {
        self.new_attachment.as_ref()
    }

    /// Selected groups as they currently appear in `roster`.
    pub fn selected_groups<'a>(&self, roster: &'a Roster) -> Vec<&'a TargetGroup> {
        resolve_groups(roster, &self.selected_ids)
    }

    /// Display names of the current selection.
    pub fn selected_names(&self, roster: &Roster) -> Vec<String> {
        self.selected_groups(roster)
            .into_iter()
            .map(|g| g.name.clone())
            .collect()
    }

    pub fn set_slot(&mut self, slot: ScheduleSlot, value: impl Into<String>) {
        self.schedule.set(slot, value);
    }

    /// Adds a roster entry to the selection. Returns false if already selected.
    pub fn select(&mut self, group: &TargetGroup) -> bool {
        if self.selected_ids.contains(&group.id) {
            return false;
        }
        self.unresolved_ids.retain(|id| id != &group.id);
        self.selected_ids.push(group.id.clone());
        true
    }

    /// Removes an identifier from the selection. Returns false if absent.
    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.selected_ids.len();
        self.selected_ids.retain(|selected| selected != id);
        before != self.selected_ids.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    /// Drops every unresolved identifier. Returns how many were dropped.
    pub fn forget_unresolved(&mut self) -> usize {
        let count = self.unresolved_ids.len();
        self.unresolved_ids.clear();
        count
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.new_attachment = Some(attachment);
    }

    /// Removes the newly chosen attachment. The backend's image is untouched.
    pub fn detach(&mut self) -> Option<Attachment> {
        self.new_attachment.take()
    }

    /// Re-splits the selection against a new roster snapshot.
    ///
    /// Vanished identifiers move to unresolved; unresolved identifiers that
    /// reappeared are selected again at the end of the selection.
    pub fn reconcile(&mut self, roster: &Roster) {
        let selected = partition(roster, &self.selected_ids);
        let waiting = partition(roster, &self.unresolved_ids);

        let mut selected_ids = selected.resolved;
        for id in waiting.resolved {
            if !selected_ids.contains(&id) {
                selected_ids.push(id);
            }
        }

        let mut unresolved_ids = selected.unresolved;
        for id in waiting.unresolved {
            if !unresolved_ids.contains(&id) {
                unresolved_ids.push(id);
            }
        }

        self.selected_ids = selected_ids;
        self.unresolved_ids = unresolved_ids;
    }

    /// Checks the draft before dispatch.
    ///
    /// Schedule times must be non-empty; their format is the backend's
    /// business. An empty target selection is valid, but persisted targets
    /// that did not resolve block the save until they resolve again or are
    /// forgotten, so a roster outage cannot erase them.
    pub fn validate(&self) -> Result<()> {
        let mut problems: Vec<String> = ScheduleSlot::ALL
            .iter()
            .filter(|slot| self.schedule.get(**slot).trim().is_empty())
            .map(|slot| format!("{} time is empty", slot.label()))
            .collect();
        problems.extend(self.unresolved_ids.iter().map(|id| {
            format!(
                "target group {} is not in the current group list (refresh, or forget it)",
                id
            )
        }));

        if problems.is_empty() {
            Ok(())
        } else {
            Err(HeraldError::Validation(problems))
        }
    }

    /// Builds the structured update for `roster`.
    ///
    /// Only identifiers present in `roster` are sent, in selection order.
    pub fn to_update(&self, roster: &Roster) -> ConfigUpdate {
        ConfigUpdate {
            schedule: self.schedule.clone(),
            message: self.message.clone(),
            target_group_ids: self
                .selected_groups(roster)
                .into_iter()
                .map(|g| g.id.clone())
                .collect(),
            confirmation_number: self.confirmation_number.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{FALLBACK_FRI, FALLBACK_SAT, FALLBACK_SUN_THU};

    fn roster() -> Roster {
        Roster::new(vec![
            TargetGroup::new("g1", "Family"),
            TargetGroup::new("g2", "Work"),
            TargetGroup::new("g3", "Choir"),
        ])
    }

    fn persisted(ids: &[&str]) -> PersistedConfig {
        PersistedConfig {
            confirmation_number: "972500000000@c.us".to_string(),
            schedule: Schedule::new("07:00", "", "21:00"),
            message: "Good morning".to_string(),
            target_group_ids: ids.iter().map(|s| s.to_string()).collect(),
            attachment: Some("/app/data/uploads/broadcast_image.jpg".to_string()),
        }
    }

    #[test]
    fn test_default_draft_uses_fallback_schedule() {
        let draft = ConfigDraft::default();
        assert_eq!(
            draft.schedule,
            Schedule::new(FALLBACK_SUN_THU, FALLBACK_FRI, FALLBACK_SAT)
        );
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_seed_splits_resolvable_identifiers() {
        let draft = ConfigDraft::seed(&persisted(&["g3", "g9", "g1"]), &roster());
        assert_eq!(draft.selected_ids(), ["g3", "g1"]);
        assert_eq!(draft.unresolved_ids(), ["g9"]);
        assert_eq!(draft.selected_names(&roster()), vec!["Choir", "Family"]);
        assert_eq!(draft.schedule.fri, FALLBACK_FRI);
        assert_eq!(
            draft.existing_attachment(),
            Some("/app/data/uploads/broadcast_image.jpg")
        );
        assert!(draft.new_attachment().is_none());
    }

    #[test]
    fn test_seed_against_empty_roster_selects_nothing() {
        let draft = ConfigDraft::seed(&persisted(&["g1", "g2"]), &Roster::default());
        assert!(draft.selected_ids().is_empty());
        assert_eq!(draft.unresolved_ids(), ["g1", "g2"]);
    }

    #[test]
    fn test_select_and_deselect() {
        let roster = roster();
        let mut draft = ConfigDraft::default();
        assert!(draft.select(roster.lookup("Work").unwrap()));
        assert!(!draft.select(roster.lookup("g2").unwrap()));
        assert!(draft.deselect("g2"));
        assert!(!draft.deselect("g2"));
        assert!(draft.selected_ids().is_empty());
    }

    #[test]
    fn test_reconcile_moves_ids_both_ways() {
        let mut draft = ConfigDraft::seed(&persisted(&["g1", "g4"]), &roster());
        assert_eq!(draft.unresolved_ids(), ["g4"]);

        // g1 disappears, g4 shows up
        let next = Roster::new(vec![
            TargetGroup::new("g2", "Work"),
            TargetGroup::new("g4", "Book club"),
        ]);
        draft.reconcile(&next);
        assert_eq!(draft.selected_ids(), ["g4"]);
        assert_eq!(draft.unresolved_ids(), ["g1"]);
    }

    #[test]
    fn test_forget_unresolved() {
        let mut draft = ConfigDraft::seed(&persisted(&["x", "y", "g1"]), &roster());
        assert_eq!(draft.forget_unresolved(), 2);
        assert!(draft.unresolved_ids().is_empty());
        assert_eq!(draft.selected_ids(), ["g1"]);
    }

    #[test]
    fn test_validate_reports_every_empty_slot() {
        let mut draft = ConfigDraft::default();
        draft.set_slot(ScheduleSlot::Fri, "  ");
        draft.set_slot(ScheduleSlot::Sat, "");
        match draft.validate() {
            Err(HeraldError::Validation(problems)) => {
                assert_eq!(problems, vec!["Friday time is empty", "Saturday time is empty"]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_schedule_passed_through_verbatim() {
        let mut draft = ConfigDraft::default();
        draft.set_slot(ScheduleSlot::SunThu, "whenever");
        draft.set_slot(ScheduleSlot::Fri, " 09:00 ");
        assert!(draft.validate().is_ok());

        let update = draft.to_update(&roster());
        assert_eq!(update.schedule.sun_thu, "whenever");
        assert_eq!(update.schedule.fri, " 09:00 ");
    }

    #[test]
    fn test_validate_blocks_unresolved_targets_until_forgotten() {
        let mut draft = ConfigDraft::seed(&persisted(&["g1", "g2"]), &Roster::default());
        match draft.validate() {
            Err(HeraldError::Validation(problems)) => {
                assert_eq!(problems.len(), 2);
                assert!(problems[0].contains("g1"));
                assert!(problems[1].contains("g2"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }

        draft.forget_unresolved();
        assert!(draft.validate().is_ok());
        assert!(draft.to_update(&roster()).target_group_ids.is_empty());
    }

    #[test]
    fn test_update_drops_ids_missing_from_roster() {
        let draft = ConfigDraft::seed(&persisted(&["g2", "g1"]), &roster());
        let shrunk = Roster::new(vec![TargetGroup::new("g1", "Family")]);
        assert_eq!(draft.to_update(&shrunk).target_group_ids, vec!["g1"]);
        assert_eq!(draft.to_update(&roster()).target_group_ids, vec!["g2", "g1"]);
    }

    #[test]
    fn test_attachment_debug_hides_bytes() {
        let attachment = Attachment::new("poster.png", "image/png", vec![1, 2, 3]);
        let debug = format!("{:?}", attachment);
        assert!(debug.contains("len: 3"));
        assert!(!debug.contains("[1, 2, 3]"));
    }
}
