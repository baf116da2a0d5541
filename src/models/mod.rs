//! # Data Models
//!
//! Records owned by the liaison engine: grant applications with their audit
//! trail, and scheduled calls with their outcomes. All types serialize with
//! the display labels of their enums, RFC 3339 timestamps and string-encoded
//! decimal amounts.

pub mod application;
pub mod scheduled_call;
pub mod status_history;

pub use application::{ApplicationFilter, FunderType, GrantApplication, NewGrantApplication, Priority};
pub use scheduled_call::{
    CallFilter, CallOutcome, CallStatus, OutcomeStatus, RecordOutcome, ScheduleCall, ScheduledCall,
};
pub use status_history::{AuditTrail, StatusHistoryEntry, Visibility};
