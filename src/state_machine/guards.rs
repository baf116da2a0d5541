use super::events::StatusUpdate;
use super::workflow::WorkflowDefinition;
use crate::error::{invalid_transition, validation_error, LiaisonResult};
use crate::models::GrantApplication;
use crate::validation::{validate_long_text, validate_text};

/// Trait for implementing state transition guards
///
/// Guards only inspect; they never mutate the application.
pub trait TransitionGuard: Send + Sync {
    /// Check if a transition is allowed
    fn check(&self, application: &GrantApplication, update: &StatusUpdate) -> LiaisonResult<()>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;
}

/// Guard requiring a non-empty reason; the author is optional
pub struct ReasonProvidedGuard;

impl TransitionGuard for ReasonProvidedGuard {
    fn check(&self, _application: &GrantApplication, update: &StatusUpdate) -> LiaisonResult<()> {
        validate_text("reason", &update.reason)?;
        if !update.changed_by.trim().is_empty() {
            validate_text("changed_by", &update.changed_by)?;
        }
        if let Some(next_steps) = &update.next_steps {
            validate_long_text("next_steps", next_steps)?;
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Transition must carry a reason"
    }
}

/// Guard enforcing the workflow transition table
pub struct ReachableStatusGuard;

impl TransitionGuard for ReachableStatusGuard {
    fn check(&self, application: &GrantApplication, update: &StatusUpdate) -> LiaisonResult<()> {
        if !WorkflowDefinition::allows(application.status, update.new_status) {
            return Err(invalid_transition(application.status, update.new_status));
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Target status must be reachable from the current status"
    }
}

/// Guard restricting milestones to the vocabulary of the status being left
pub struct MilestoneVocabularyGuard;

impl TransitionGuard for MilestoneVocabularyGuard {
    fn check(&self, application: &GrantApplication, update: &StatusUpdate) -> LiaisonResult<()> {
        let Some(label) = update.milestone_label() else {
            return Ok(());
        };

        if WorkflowDefinition::canonical_milestone(application.status, label).is_none() {
            return Err(validation_error(format!(
                "milestone '{label}' is not defined when leaving {}",
                application.status
            )));
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Milestone must belong to the current status vocabulary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiaisonError;
    use crate::state_machine::ApplicationStatus;
    use crate::test_helpers::application_in;

    #[test]
    fn test_guard_descriptions() {
        assert_eq!(
            ReasonProvidedGuard.description(),
            "Transition must carry a reason"
        );
        assert_eq!(
            ReachableStatusGuard.description(),
            "Target status must be reachable from the current status"
        );
    }

    #[test]
    fn test_reason_required() {
        let app = application_in(ApplicationStatus::PendingSubmission);
        let update = StatusUpdate::new(ApplicationStatus::UnderReview, "  ", "pi");
        assert!(matches!(
            ReasonProvidedGuard.check(&app, &update),
            Err(LiaisonError::Validation(_))
        ));
    }

    #[test]
    fn test_author_optional() {
        let app = application_in(ApplicationStatus::PendingSubmission);
        let update = StatusUpdate::new(ApplicationStatus::UnderReview, "submitted", "");
        assert!(ReasonProvidedGuard.check(&app, &update).is_ok());

        let long_author = StatusUpdate::new(ApplicationStatus::UnderReview, "submitted", "x".repeat(501));
        assert!(ReasonProvidedGuard.check(&app, &long_author).is_err());
    }

    #[test]
    fn test_unreachable_status_rejected() {
        let app = application_in(ApplicationStatus::Approved);
        let update = StatusUpdate::new(ApplicationStatus::UnderReview, "re-review", "pi");
        assert_eq!(
            ReachableStatusGuard.check(&app, &update),
            Err(LiaisonError::InvalidTransition {
                from: "Approved".to_string(),
                to: "Under Review".to_string(),
            })
        );
    }

    #[test]
    fn test_milestone_from_previous_status_only() {
        let app = application_in(ApplicationStatus::UnderReview);
        let ok = StatusUpdate::new(ApplicationStatus::Approved, "approved", "pi")
            .with_milestone("Panel Review Completed");
        assert!(MilestoneVocabularyGuard.check(&app, &ok).is_ok());

        let wrong = StatusUpdate::new(ApplicationStatus::Approved, "approved", "pi")
            .with_milestone("Award Letter Received");
        assert!(MilestoneVocabularyGuard.check(&app, &wrong).is_err());
    }
}
