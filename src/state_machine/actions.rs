use super::states::ApplicationStatus;
use crate::models::{GrantApplication, Priority, StatusHistoryEntry};

/// Trait for implementing post-transition actions
///
/// Actions run after every guard passed and the audit entry was appended, so
/// they cannot fail.
pub trait TransitionAction: Send + Sync {
    /// Execute the action
    fn execute(&self, application: &mut GrantApplication, entry: &StatusHistoryEntry);

    /// Get a description of this action for logging
    fn description(&self) -> &'static str;
}

/// Action to raise or lower priority on a funding decision
///
/// Only `Approved` and `Rejected` touch priority; every other status leaves
/// it as it was.
pub struct PriorityAdjustmentAction;

impl PriorityAdjustmentAction {
    pub fn priority_for(status: ApplicationStatus) -> Option<Priority> {
        match status {
            ApplicationStatus::Approved => Some(Priority::High),
            ApplicationStatus::Rejected => Some(Priority::Low),
            _ => None,
        }
    }
}

impl TransitionAction for PriorityAdjustmentAction {
    fn execute(&self, application: &mut GrantApplication, entry: &StatusHistoryEntry) {
        if let Some(priority) = Self::priority_for(entry.new_status) {
            if priority != application.priority {
                tracing::debug!(
                    application_id = %application.id,
                    from = %application.priority,
                    to = %priority,
                    "Priority adjusted by status change"
                );
                application.priority = priority;
            }
        }
    }

    fn description(&self) -> &'static str {
        "Adjust priority for funding decisions"
    }
}

/// Action to write the transition into the human-readable notes log
pub struct NotesLogAction;

impl NotesLogAction {
    fn render(entry: &StatusHistoryEntry) -> String {
        let mut line = match entry.previous_status {
            Some(previous) => format!(
                "Status changed from {previous} to {} by {}: {}",
                entry.new_status, entry.changed_by, entry.reason
            ),
            None => format!(
                "Status set to {} by {}: {}",
                entry.new_status, entry.changed_by, entry.reason
            ),
        };
        if let Some(milestone) = &entry.milestone {
            line.push_str(&format!(" (milestone: {milestone})"));
        }
        if let Some(next_steps) = &entry.next_steps {
            line.push_str(&format!(" Next steps: {next_steps}"));
        }
        line
    }
}

impl TransitionAction for NotesLogAction {
    fn execute(&self, application: &mut GrantApplication, entry: &StatusHistoryEntry) {
        application.append_note(entry.changed_at, &Self::render(entry));
    }

    fn description(&self) -> &'static str {
        "Append transition to notes log"
    }
}
