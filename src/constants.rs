//! # System Constants
//!
//! Operation names used in structured logs and the defaults applied when a
//! caller leaves optional scheduling fields empty.

/// Operation names emitted with every structured log line
pub mod operations {
    pub const APPLICATION_CREATED: &str = "application.created";
    pub const APPLICATION_DELETED: &str = "application.deleted";
    pub const STATUS_TRANSITIONED: &str = "application.status_transitioned";
    pub const TRANSITION_REJECTED: &str = "application.transition_rejected";

    pub const CALL_SCHEDULED: &str = "call.scheduled";
    pub const CALL_COMPLETED: &str = "call.completed";
    pub const FOLLOW_UP_SCHEDULED: &str = "call.follow_up_scheduled";
    pub const OUTCOME_REJECTED: &str = "call.outcome_rejected";
}

/// Fixed values of the engine
pub mod system {
    /// Call type of follow-ups spawned by a status change
    pub const STATUS_UPDATE_CALL_TYPE: &str = "Status Update";

    /// Used when a transition schedules a follow-up without next steps
    pub const DEFAULT_STATUS_UPDATE_AGENDA: &str =
        "Review application status change and agree on next steps";

    pub const DEFAULT_CALL_DURATION_MINUTES: u32 = 30;
    pub const DEFAULT_REMINDER_MINUTES: u32 = 15;
    pub const DEFAULT_CALL_LOCATION: &str = "Phone";

    pub const MIN_OUTCOME_RATING: u8 = 1;
    pub const MAX_OUTCOME_RATING: u8 = 5;

    /// Author recorded for transitions submitted without one
    pub const SYSTEM_ACTOR: &str = "system";
}

/// Format of timestamps written into the free-text notes log
pub const NOTES_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
