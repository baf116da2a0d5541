//! Grant application records and the filters used to list them.

use super::status_history::AuditTrail;
use crate::constants::NOTES_TIMESTAMP_FORMAT;
use crate::state_machine::ApplicationStatus;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

crate::labeled_enum! {
    /// Kind of funding organisation
    pub enum FunderType {
        Federal => "Federal",
        Private => "Private",
        International => "International",
        Corporate => "Corporate",
    }
}

crate::labeled_enum! {
    /// Attention level, shared by applications and calls
    pub enum Priority {
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A grant application tracked by the liaison office
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantApplication {
    pub id: String,
    pub proposal_title: String,
    pub funder_name: String,
    pub funder_type: FunderType,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub grant_amount: Decimal,
    pub status: ApplicationStatus,
    pub priority: Priority,
    pub application_date: NaiveDate,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub last_contact: DateTime<Utc>,
    /// Human-readable activity log. Display only; `status_history` is authoritative.
    pub notes: String,
    pub status_history: AuditTrail,
}

impl GrantApplication {
    /// Append a timestamped line to the notes log
    pub(crate) fn append_note(&mut self, at: DateTime<Utc>, line: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes
            .push_str(&format!("[{}] {}", at.format(NOTES_TIMESTAMP_FORMAT), line));
    }

    /// Check the status/audit-trail invariant
    ///
    /// With an empty trail the status is whatever the application was entered with.
    pub fn status_matches_history(&self) -> bool {
        self.status_history
            .current_status()
            .map_or(true, |status| status == self.status)
    }
}

/// Fields supplied when an application is entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGrantApplication {
    pub proposal_title: String,
    pub funder_name: String,
    pub funder_type: FunderType,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    pub grant_amount: Decimal,
    /// Defaults to `Pending Submission`
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    /// Defaults to `Medium`
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Defaults to the current date
    #[serde(default)]
    pub application_date: Option<NaiveDate>,
    #[serde(default)]
    pub follow_up_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewGrantApplication {
    pub fn new(
        proposal_title: impl Into<String>,
        funder_name: impl Into<String>,
        funder_type: FunderType,
        grant_amount: Decimal,
    ) -> Self {
        Self {
            proposal_title: proposal_title.into(),
            funder_name: funder_name.into(),
            funder_type,
            contact_person: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            grant_amount,
            status: None,
            priority: None,
            application_date: None,
            follow_up_date: None,
            notes: None,
        }
    }

    pub fn with_contact(
        mut self,
        person: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        self.contact_person = person.into();
        self.contact_email = email.into();
        self.contact_phone = phone.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_application_date(mut self, date: NaiveDate) -> Self {
        self.application_date = Some(date);
        self
    }
}

/// Criteria for `list_applications`; all present criteria must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub priority: Option<Priority>,
    /// Case-insensitive substring of title, funder name or contact person
    pub search: Option<String>,
}

impl ApplicationFilter {
    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn matches(&self, application: &GrantApplication) -> bool {
        if self.status.is_some_and(|status| status != application.status) {
            return false;
        }
        if self
            .priority
            .is_some_and(|priority| priority != application.priority)
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                [
                    &application.proposal_title,
                    &application.funder_name,
                    &application.contact_person,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn application() -> GrantApplication {
        GrantApplication {
            id: "app-1".to_string(),
            proposal_title: "Coral Reef Resilience".to_string(),
            funder_name: "Ocean Futures Foundation".to_string(),
            funder_type: FunderType::Private,
            contact_person: "Dana Whitfield".to_string(),
            contact_email: "dana@example.org".to_string(),
            contact_phone: "+1 555 0100".to_string(),
            grant_amount: "125000.50".parse().unwrap(),
            status: ApplicationStatus::UnderReview,
            priority: Priority::Medium,
            application_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            follow_up_date: None,
            last_contact: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
            notes: String::new(),
            status_history: AuditTrail::new(),
        }
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let app = application();
        assert!(ApplicationFilter::default().with_search("CORAL").matches(&app));
        assert!(ApplicationFilter::default().with_search("futures").matches(&app));
        assert!(ApplicationFilter::default().with_search("whitfield").matches(&app));
        assert!(!ApplicationFilter::default().with_search("glacier").matches(&app));
        assert!(ApplicationFilter::default().with_search("   ").matches(&app));
    }

    #[test]
    fn test_filters_are_and_combined() {
        let app = application();
        let filter = ApplicationFilter::default()
            .with_status(ApplicationStatus::UnderReview)
            .with_priority(Priority::Medium)
            .with_search("reef");
        assert!(filter.matches(&app));

        let filter = filter.with_priority(Priority::High);
        assert!(!filter.matches(&app));
    }

    #[test]
    fn test_append_note_formats_lines() {
        let mut app = application();
        let at = Utc.with_ymd_and_hms(2026, 2, 3, 14, 30, 0).unwrap();
        app.append_note(at, "first");
        app.append_note(at, "second");
        assert_eq!(app.notes, "[2026-02-03 14:30] first\n[2026-02-03 14:30] second");
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(FunderType::International.to_string(), "International");
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert!("Urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_grant_amount_serializes_exactly() {
        let app = application();
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["grant_amount"], "125000.50");
        assert_eq!(json["funder_type"], "Private");
    }
}
