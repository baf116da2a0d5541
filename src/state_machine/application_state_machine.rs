use super::{
    actions::{NotesLogAction, PriorityAdjustmentAction, TransitionAction},
    events::StatusUpdate,
    guards::{MilestoneVocabularyGuard, ReachableStatusGuard, ReasonProvidedGuard, TransitionGuard},
    workflow::WorkflowDefinition,
};
use crate::constants::system::SYSTEM_ACTOR;
use crate::error::LiaisonResult;
use crate::models::{GrantApplication, StatusHistoryEntry};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validates and applies status transitions of a grant application
///
/// The machine holds no application state of its own: callers pass the
/// record to mutate. Every guard runs before the first write, so a failed
/// transition leaves the application untouched.
pub struct ApplicationStateMachine {
    guards: Vec<Box<dyn TransitionGuard>>,
    actions: Vec<Box<dyn TransitionAction>>,
}

impl Default for ApplicationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ApplicationStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationStateMachine")
            .field(
                "guards",
                &self.guards.iter().map(|g| g.description()).collect::<Vec<_>>(),
            )
            .field(
                "actions",
                &self.actions.iter().map(|a| a.description()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ApplicationStateMachine {
    /// Create a state machine with the standard guards and actions
    pub fn new() -> Self {
        Self {
            guards: vec![
                Box::new(ReasonProvidedGuard),
                Box::new(ReachableStatusGuard),
                Box::new(MilestoneVocabularyGuard),
            ],
            actions: vec![Box::new(PriorityAdjustmentAction), Box::new(NotesLogAction)],
        }
    }

    /// Check guard conditions for the transition
    pub fn check_guards(
        &self,
        application: &GrantApplication,
        update: &StatusUpdate,
    ) -> LiaisonResult<()> {
        for guard in &self.guards {
            tracing::debug!(
                application_id = %application.id,
                guard = guard.description(),
                "Checking transition guard"
            );
            guard.check(application, update)?;
        }
        Ok(())
    }

    /// Attempt to transition the application
    ///
    /// Appends the audit entry, sets `status` and `last_contact`, then runs the
    /// post-transition actions. Returns the appended entry.
    ///
    /// `changed_at` never precedes the previous entry, even if `now` does.
    pub fn transition(
        &self,
        application: &mut GrantApplication,
        update: &StatusUpdate,
        now: DateTime<Utc>,
    ) -> LiaisonResult<StatusHistoryEntry> {
        self.check_guards(application, update)?;

        let entry = self.build_entry(application, update, now);
        application.status_history.append(entry.clone());
        application.status = entry.new_status;
        application.last_contact = entry.changed_at;

        self.execute_actions(application, &entry);

        Ok(entry)
    }

    fn build_entry(
        &self,
        application: &GrantApplication,
        update: &StatusUpdate,
        now: DateTime<Utc>,
    ) -> StatusHistoryEntry {
        let milestone = update.milestone_label().map(|label| {
            WorkflowDefinition::canonical_milestone(application.status, label)
                .map_or_else(|| label.to_string(), str::to_string)
        });

        let changed_at = application
            .status_history
            .last()
            .map_or(now, |last| last.changed_at.max(now));
        let changed_by = match update.changed_by.trim() {
            "" => SYSTEM_ACTOR,
            author => author,
        };

        StatusHistoryEntry {
            id: Uuid::new_v4().to_string(),
            previous_status: Some(application.status),
            new_status: update.new_status,
            reason: update.reason.trim().to_string(),
            milestone,
            expected_date: update.expected_date,
            next_steps: update.next_steps_text().map(str::to_string),
            changed_by: changed_by.to_string(),
            changed_at,
            visibility: update.visibility,
        }
    }

    /// Execute actions after successful transition
    fn execute_actions(&self, application: &mut GrantApplication, entry: &StatusHistoryEntry) {
        for action in &self.actions {
            action.execute(application, entry);
        }
    }
}
