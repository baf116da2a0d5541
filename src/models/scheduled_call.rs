//! Scheduled follow-up calls and their recorded outcomes.

use super::application::Priority;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

crate::labeled_enum! {
    /// Lifecycle of a call; moves to `Completed` exactly once
    pub enum CallStatus {
        Scheduled => "Scheduled",
        Completed => "Completed",
    }
}

crate::labeled_enum! {
    /// How a completed call went
    pub enum OutcomeStatus {
        Successful => "Successful",
        PartiallySuccessful => "Partially Successful",
        NoAnswer => "No Answer",
        Postponed => "Postponed",
        Unsuccessful => "Unsuccessful",
    }
}

/// Terminal result of a call, written once when it is completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOutcome {
    pub status: OutcomeStatus,
    pub summary: String,
    pub next_steps: Option<String>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub follow_up_type: Option<String>,
    /// 1 (poor) to 5 (excellent)
    pub rating: u8,
    pub completed_at: DateTime<Utc>,
}

/// A communication task with a funder contact
///
/// References its application by id; the call itself is an independent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCall {
    pub id: String,
    pub application_id: String,
    pub title: String,
    pub date_time: DateTime<Utc>,
    pub duration_minutes: u32,
    pub call_type: String,
    pub priority: Priority,
    pub agenda: String,
    pub participants: Vec<String>,
    pub location: String,
    pub reminder_before_minutes: u32,
    pub notes: String,
    pub status: CallStatus,
    pub outcome: Option<CallOutcome>,
    pub created_at: DateTime<Utc>,
    /// Call whose outcome spawned this one
    #[serde(default)]
    pub follow_up_of: Option<String>,
}

impl ScheduledCall {
    pub fn is_completed(&self) -> bool {
        self.status == CallStatus::Completed
    }

    /// Still scheduled and its start time has been reached
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == CallStatus::Scheduled && self.date_time <= now
    }

    /// Still scheduled and starting in the future
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == CallStatus::Scheduled && self.date_time > now
    }

    /// When the reminder for this call should fire
    pub fn reminder_at(&self) -> DateTime<Utc> {
        self.date_time - Duration::minutes(i64::from(self.reminder_before_minutes))
    }

    /// Still scheduled, reminder time reached, call not yet started
    pub fn is_reminder_pending(&self, now: DateTime<Utc>) -> bool {
        self.is_upcoming(now) && self.reminder_at() <= now
    }
}

/// Request to put a call on the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCall {
    pub title: String,
    pub date_time: DateTime<Utc>,
    /// Defaults to the configured call duration
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub call_type: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub agenda: String,
    #[serde(default)]
    pub participants: Vec<String>,
    /// Defaults to the configured location
    #[serde(default)]
    pub location: Option<String>,
    /// Defaults to the configured reminder lead time
    #[serde(default)]
    pub reminder_before_minutes: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

impl ScheduleCall {
    pub fn new(
        title: impl Into<String>,
        date_time: DateTime<Utc>,
        call_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date_time,
            duration_minutes: None,
            call_type: call_type.into(),
            priority: Priority::default(),
            agenda: String::new(),
            participants: Vec::new(),
            location: None,
            reminder_before_minutes: None,
            notes: String::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_agenda(mut self, agenda: impl Into<String>) -> Self {
        self.agenda = agenda.into();
        self
    }

    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_reminder(mut self, minutes_before: u32) -> Self {
        self.reminder_before_minutes = Some(minutes_before);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Request to complete a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub status: OutcomeStatus,
    pub summary: String,
    #[serde(default)]
    pub next_steps: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub follow_up_type: Option<String>,
    pub rating: u8,
}

impl RecordOutcome {
    pub fn new(status: OutcomeStatus, summary: impl Into<String>, rating: u8) -> Self {
        Self {
            status,
            summary: summary.into(),
            next_steps: None,
            follow_up_date: None,
            follow_up_type: None,
            rating,
        }
    }

    pub fn with_next_steps(mut self, next_steps: impl Into<String>) -> Self {
        self.next_steps = Some(next_steps.into());
        self
    }

    /// Ask for a chained call of `call_type` at `date_time`
    pub fn with_follow_up(mut self, date_time: DateTime<Utc>, call_type: impl Into<String>) -> Self {
        self.follow_up_date = Some(date_time);
        self.follow_up_type = Some(call_type.into());
        self
    }
}

/// Criteria for listing calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFilter {
    pub application_id: Option<String>,
    pub status: Option<CallStatus>,
}

impl CallFilter {
    pub fn for_application(application_id: impl Into<String>) -> Self {
        Self {
            application_id: Some(application_id.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: CallStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, call: &ScheduledCall) -> bool {
        self.application_id
            .as_deref()
            .map_or(true, |id| id == call.application_id)
            && self.status.map_or(true, |status| status == call.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn call_at(date_time: DateTime<Utc>) -> ScheduledCall {
        ScheduledCall {
            id: "call-1".to_string(),
            application_id: "app-1".to_string(),
            title: "Budget check-in".to_string(),
            date_time,
            duration_minutes: 45,
            call_type: "Budget Review".to_string(),
            priority: Priority::High,
            agenda: String::new(),
            participants: vec!["PI".to_string()],
            location: "Zoom".to_string(),
            reminder_before_minutes: 30,
            notes: String::new(),
            status: CallStatus::Scheduled,
            outcome: None,
            created_at: date_time - Duration::days(2),
            follow_up_of: None,
        }
    }

    #[test]
    fn test_due_and_upcoming_are_exclusive() {
        let at = Utc.with_ymd_and_hms(2026, 4, 10, 15, 0, 0).unwrap();
        let call = call_at(at);

        assert!(call.is_upcoming(at - Duration::minutes(1)));
        assert!(!call.is_due(at - Duration::minutes(1)));
        assert!(call.is_due(at));
        assert!(!call.is_upcoming(at));

        let mut done = call.clone();
        done.status = CallStatus::Completed;
        assert!(!done.is_due(at + Duration::hours(1)));
        assert!(!done.is_upcoming(at - Duration::hours(1)));
    }

    #[test]
    fn test_reminder_window() {
        let at = Utc.with_ymd_and_hms(2026, 4, 10, 15, 0, 0).unwrap();
        let call = call_at(at);
        assert_eq!(call.reminder_at(), at - Duration::minutes(30));

        assert!(!call.is_reminder_pending(at - Duration::minutes(31)));
        assert!(call.is_reminder_pending(at - Duration::minutes(30)));
        assert!(call.is_reminder_pending(at - Duration::seconds(1)));
        assert!(!call.is_reminder_pending(at));

        let mut done = call.clone();
        done.status = CallStatus::Completed;
        assert!(!done.is_reminder_pending(at - Duration::minutes(10)));
    }

    #[test]
    fn test_outcome_status_labels() {
        assert_eq!(OutcomeStatus::NoAnswer.to_string(), "No Answer");
        assert_eq!(
            "partially successful".parse::<OutcomeStatus>().unwrap(),
            OutcomeStatus::PartiallySuccessful
        );
        assert!("Maybe".parse::<OutcomeStatus>().is_err());
    }

    #[test]
    fn test_call_filter() {
        let call = call_at(Utc.with_ymd_and_hms(2026, 4, 10, 15, 0, 0).unwrap());
        assert!(CallFilter::default().matches(&call));
        assert!(CallFilter::for_application("app-1").matches(&call));
        assert!(!CallFilter::for_application("app-2").matches(&call));
        assert!(!CallFilter::for_application("app-1")
            .with_status(CallStatus::Completed)
            .matches(&call));
    }
}
