//! # Scheduler
//!
//! Follow-up call planning and outcome recording. Due calls are never pushed:
//! they are detected lazily by comparing `date_time` with the clock at read time.

pub mod follow_up;

pub use follow_up::FollowUpScheduler;
