use super::states::ApplicationStatus;
use crate::models::Visibility;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Request to move an application to a new status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub new_status: ApplicationStatus,
    pub reason: String,
    /// Label from the milestone vocabulary of the status being left
    #[serde(default)]
    pub milestone: Option<String>,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_steps: Option<String>,
    /// When present a "Status Update" call is scheduled at this time
    #[serde(default)]
    pub follow_up_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visibility: Visibility,
    /// Blank authors are recorded as `system`
    #[serde(default)]
    pub changed_by: String,
}

impl StatusUpdate {
    pub fn new(
        new_status: ApplicationStatus,
        reason: impl Into<String>,
        changed_by: impl Into<String>,
    ) -> Self {
        Self {
            new_status,
            reason: reason.into(),
            milestone: None,
            expected_date: None,
            next_steps: None,
            follow_up_date: None,
            visibility: Visibility::default(),
            changed_by: changed_by.into(),
        }
    }

    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        self.milestone = Some(milestone.into());
        self
    }

    pub fn with_expected_date(mut self, date: NaiveDate) -> Self {
        self.expected_date = Some(date);
        self
    }

    pub fn with_next_steps(mut self, next_steps: impl Into<String>) -> Self {
        self.next_steps = Some(next_steps.into());
        self
    }

    pub fn with_follow_up(mut self, at: DateTime<Utc>) -> Self {
        self.follow_up_date = Some(at);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Milestone with surrounding whitespace removed, `None` when blank
    pub fn milestone_label(&self) -> Option<&str> {
        self.milestone
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    /// Next steps with surrounding whitespace removed, `None` when blank
    pub fn next_steps_text(&self) -> Option<&str> {
        self.next_steps
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
