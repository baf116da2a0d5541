//! # Audit Trail
//!
//! Append-only record of every status transition of an application. Entries
//! are immutable once appended and kept in insertion order, which is also
//! `changed_at` order: the clock is read under the application's store lock
//! and a new entry is never stamped earlier than the one before it.

use crate::state_machine::ApplicationStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

crate::labeled_enum! {
    /// Who may see a transition record
    pub enum Visibility {
        /// Staff only
        Internal => "Internal",
        /// May be shown to the funder contact
        Shared => "Shared",
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Internal
    }
}

/// One transition of an application's status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub id: String,
    /// `None` only for records that predate any known status
    pub previous_status: Option<ApplicationStatus>,
    pub new_status: ApplicationStatus,
    pub reason: String,
    pub milestone: Option<String>,
    pub expected_date: Option<NaiveDate>,
    pub next_steps: Option<String>,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    pub visibility: Visibility,
}

/// Ordered, grow-only sequence of [`StatusHistoryEntry`]
///
/// Entries can be appended by the crate but never removed or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditTrail {
    entries: Vec<StatusHistoryEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Only the state machine writes to the trail.
    pub(crate) fn append(&mut self, entry: StatusHistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[StatusHistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&StatusHistoryEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatusHistoryEntry> {
        self.entries.iter()
    }

    /// Status implied by the trail, `None` while it is empty
    pub fn current_status(&self) -> Option<ApplicationStatus> {
        self.last().map(|entry| entry.new_status)
    }

    /// `changed_at` never decreases along the trail
    pub fn is_chronological(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].changed_at <= pair[1].changed_at)
    }

    /// Entries with the given visibility, in order
    pub fn with_visibility(&self, visibility: Visibility) -> Vec<StatusHistoryEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.visibility == visibility)
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a AuditTrail {
    type Item = &'a StatusHistoryEntry;
    type IntoIter = std::slice::Iter<'a, StatusHistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(to: ApplicationStatus, visibility: Visibility) -> StatusHistoryEntry {
        StatusHistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            previous_status: Some(ApplicationStatus::PendingSubmission),
            new_status: to,
            reason: "test".to_string(),
            milestone: None,
            expected_date: None,
            next_steps: None,
            changed_by: "tester".to_string(),
            changed_at: Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap(),
            visibility,
        }
    }

    #[test]
    fn test_trail_grows_in_order() {
        let mut trail = AuditTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.current_status(), None);

        trail.append(entry(ApplicationStatus::UnderReview, Visibility::Internal));
        trail.append(entry(ApplicationStatus::Approved, Visibility::Shared));

        assert_eq!(trail.len(), 2);
        assert_eq!(trail.current_status(), Some(ApplicationStatus::Approved));
        assert_eq!(trail.entries()[0].new_status, ApplicationStatus::UnderReview);
    }

    #[test]
    fn test_chronological_check() {
        let mut trail = AuditTrail::new();
        trail.append(entry(ApplicationStatus::UnderReview, Visibility::Internal));
        trail.append(entry(ApplicationStatus::Approved, Visibility::Internal));
        assert!(trail.is_chronological());

        let mut earlier = entry(ApplicationStatus::Active, Visibility::Internal);
        earlier.changed_at = earlier.changed_at - chrono::Duration::seconds(1);
        trail.append(earlier);
        assert!(!trail.is_chronological());
    }

    #[test]
    fn test_visibility_filter() {
        let mut trail = AuditTrail::new();
        trail.append(entry(ApplicationStatus::UnderReview, Visibility::Internal));
        trail.append(entry(ApplicationStatus::Approved, Visibility::Shared));

        let shared = trail.with_visibility(Visibility::Shared);
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].new_status, ApplicationStatus::Approved);
    }

    #[test]
    fn test_trail_serializes_as_list() {
        let mut trail = AuditTrail::new();
        trail.append(entry(ApplicationStatus::UnderReview, Visibility::Internal));

        let json = serde_json::to_value(&trail).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["new_status"], "Under Review");
        assert_eq!(json[0]["visibility"], "Internal");
    }
}
