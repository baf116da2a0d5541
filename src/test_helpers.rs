//! # Test Helpers
//!
//! Fixtures shared by the unit tests of several modules.

use crate::models::{AuditTrail, FunderType, GrantApplication, Priority};
use crate::state_machine::ApplicationStatus;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

/// Fixed instant most unit tests treat as "now"
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

/// Application in `status` with an empty audit trail
pub fn application_in(status: ApplicationStatus) -> GrantApplication {
    GrantApplication {
        id: "app-1".to_string(),
        proposal_title: "Urban Heat Islands".to_string(),
        funder_name: "City Climate Fund".to_string(),
        funder_type: FunderType::Corporate,
        contact_person: "R. Osei".to_string(),
        contact_email: "r.osei@cityclimate.org".to_string(),
        contact_phone: String::new(),
        grant_amount: Decimal::new(40_000, 0),
        status,
        priority: Priority::Medium,
        application_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        follow_up_date: None,
        last_contact: Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap(),
        notes: String::new(),
        status_history: AuditTrail::new(),
    }
}
