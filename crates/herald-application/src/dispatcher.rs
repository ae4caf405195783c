//! Outbound operations: saving the draft and triggering a broadcast.
//!
//! Neither operation is retried. A duplicate call produces a duplicate
//! backend-side action.

use std::sync::Arc;

use herald_core::config::ConfigDraft;
use herald_core::error::Result;
use herald_core::gateway::BackendGateway;
use herald_core::roster::Roster;

/// What a successful save actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Number of target identifiers in the saved payload.
    pub target_count: usize,
    /// Whether a new image part went out with the request.
    pub attachment_sent: bool,
}

pub struct UpdateDispatcher {
    gateway: Arc<dyn BackendGateway>,
}

impl UpdateDispatcher {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    /// Validates `draft` and saves it to the backend.
    ///
    /// A draft still holding unresolved targets is rejected before anything
    /// is sent. Selected identifiers are mapped through `roster`. The image
    /// part is only sent when the draft carries a newly chosen attachment, so
    /// an existing backend image is left untouched otherwise.
    pub async fn submit(&self, draft: &ConfigDraft, roster: &Roster) -> Result<SubmitReceipt> {
        draft.validate()?;

        let update = draft.to_update(roster);
        let image = draft.new_attachment();
        let receipt = SubmitReceipt {
            target_count: update.target_group_ids.len(),
            attachment_sent: image.is_some(),
        };

        match self.gateway.save_config(&update, image).await {
            Ok(()) => {
                tracing::info!(
                    targets = receipt.target_count,
                    image = receipt.attachment_sent,
                    "configuration saved"
                );
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!(error = %err, "configuration save failed");
                Err(err)
            }
        }
    }

    /// Asks the backend to broadcast its persisted configuration now.
    ///
    /// The unsaved draft plays no part in this.
    pub async fn trigger_now(&self) -> Result<()> {
        match self.gateway.trigger_broadcast().await {
            Ok(()) => {
                tracing::info!("broadcast triggered");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "broadcast trigger failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackendGateway;
    use herald_core::config::{Attachment, PersistedConfig, Schedule, ScheduleSlot};
    use herald_core::error::HeraldError;
    use herald_core::roster::TargetGroup;

    fn roster() -> Roster {
        Roster::new(vec![
            TargetGroup::new("g1", "Family"),
            TargetGroup::new("g2", "Work"),
        ])
    }

    fn draft(ids: &[&str]) -> ConfigDraft {
        let config = PersistedConfig {
            confirmation_number: " 972500000000@c.us ".to_string(),
            schedule: Schedule::new("07:30", "09:00", "21:00"),
            message: "Shabbat shalom".to_string(),
            target_group_ids: ids.iter().map(|s| s.to_string()).collect(),
            attachment: Some("/app/data/uploads/broadcast_image.png".to_string()),
        };
        ConfigDraft::seed(&config, &roster())
    }

    #[tokio::test]
    async fn test_submit_sends_resolved_ids_in_order() {
        let mock = Arc::new(MockBackendGateway::connected());
        let dispatcher = UpdateDispatcher::new(mock.clone());

        let receipt = dispatcher.submit(&draft(&["g2", "g1"]), &roster()).await.unwrap();
        assert_eq!(receipt.target_count, 2);
        assert!(!receipt.attachment_sent);

        let saved = mock.saved();
        assert_eq!(saved.len(), 1);
        let (update, image) = &saved[0];
        assert_eq!(update.target_group_ids, vec!["g2", "g1"]);
        assert_eq!(update.confirmation_number, "972500000000@c.us");
        assert!(image.is_none());
    }

    #[tokio::test]
    async fn test_submit_empty_selection_is_allowed() {
        let mock = Arc::new(MockBackendGateway::connected());
        let dispatcher = UpdateDispatcher::new(mock.clone());

        let receipt = dispatcher.submit(&draft(&[]), &roster()).await.unwrap();
        assert_eq!(receipt.target_count, 0);

        let (update, _) = &mock.saved()[0];
        assert!(update.target_group_ids.is_empty());
        assert!(update.to_data_field().unwrap().contains(r#""targetGroups":[]"#));
    }

    #[tokio::test]
    async fn test_submit_passes_new_attachment() {
        let mock = Arc::new(MockBackendGateway::connected());
        let dispatcher = UpdateDispatcher::new(mock.clone());
        let mut draft = draft(&["g1"]);
        draft.attach(Attachment::new("poster.jpg", "image/jpeg", vec![1, 2, 3]));

        let receipt = dispatcher.submit(&draft, &roster()).await.unwrap();
        assert!(receipt.attachment_sent);

        let (_, image) = &mock.saved()[0];
        assert_eq!(image.as_ref().unwrap().file_name, "poster.jpg");
    }

    #[tokio::test]
    async fn test_unresolved_targets_block_submit_until_forgotten() {
        let mock = Arc::new(MockBackendGateway::connected());
        let dispatcher = UpdateDispatcher::new(mock.clone());
        let mut draft = draft(&["g1", "g9"]);

        let err = dispatcher.submit(&draft, &roster()).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("g9"));
        assert_eq!(mock.count("POST /config"), 0);

        draft.forget_unresolved();
        let receipt = dispatcher.submit(&draft, &roster()).await.unwrap();
        assert_eq!(receipt.target_count, 1);
        assert_eq!(mock.saved()[0].0.target_group_ids, vec!["g1"]);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let mock = Arc::new(MockBackendGateway::connected());
        let dispatcher = UpdateDispatcher::new(mock.clone());
        let mut draft = draft(&["g1"]);
        draft.set_slot(ScheduleSlot::Fri, "  ");

        let err = dispatcher.submit(&draft, &roster()).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(mock.count("POST /config"), 0);
    }

    #[tokio::test]
    async fn test_save_failure_is_surfaced() {
        let mock = Arc::new(MockBackendGateway::connected());
        mock.set_save(Err(HeraldError::bad_response(500, r#"{"error":"disk full"}"#)));
        let dispatcher = UpdateDispatcher::new(mock.clone());

        let err = dispatcher.submit(&draft(&["g1"]), &roster()).await.unwrap_err();
        assert_eq!(err.operator_message(), r#"{"error":"disk full"}"#);
        assert_eq!(mock.count("POST /config"), 1);
    }

    #[tokio::test]
    async fn test_trigger_failure_text_is_verbatim() {
        let mock = Arc::new(MockBackendGateway::connected());
        mock.set_trigger(Err(HeraldError::bad_response(400, r#"{"error":"Client not ready"}"#)));
        let dispatcher = UpdateDispatcher::new(mock.clone());

        let err = dispatcher.trigger_now().await.unwrap_err();
        assert_eq!(err.operator_message(), r#"{"error":"Client not ready"}"#);
    }

    #[tokio::test]
    async fn test_trigger_is_not_retried() {
        let mock = Arc::new(MockBackendGateway::connected());
        mock.set_trigger(Err(HeraldError::unreachable("connection refused")));
        let dispatcher = UpdateDispatcher::new(mock.clone());

        assert!(dispatcher.trigger_now().await.is_err());
        assert_eq!(mock.count("POST /broadcast"), 1);
    }
}
