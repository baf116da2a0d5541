#![allow(clippy::doc_markdown)] // Allow status labels and product names in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Grant Liaison
//!
//! Status workflow and follow-up scheduling engine for grant applications.
//!
//! ## Overview
//!
//! A research office tracks each grant application through a fixed workflow
//! (submission, review, award, contract, active funding, closure). Every status
//! change is validated against the workflow table, recorded in an append-only
//! audit trail and may schedule a follow-up call with the funder. Calls are
//! resolved with an outcome, which can in turn chain the next call.
//!
//! ## Module Organization
//!
//! - [`state_machine`] - Workflow table, guards and transition actions
//! - [`scheduler`] - Call planning and outcome recording
//! - [`models`] - Applications, audit entries and calls
//! - [`store`] - Concurrent in-memory store with JSON snapshots
//! - [`service`] - [`LiaisonService`], the public entry point
//! - [`stats`] - Dashboard counters
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured `tracing` setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use grant_liaison::models::{FunderType, NewGrantApplication, OutcomeStatus, RecordOutcome};
//! use grant_liaison::state_machine::{ApplicationStatus, StatusUpdate};
//! use grant_liaison::LiaisonService;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), grant_liaison::LiaisonError> {
//! let service = LiaisonService::new();
//! let app = service.create_application(NewGrantApplication::new(
//!     "Soil Carbon Mapping",
//!     "National Science Agency",
//!     FunderType::Federal,
//!     Decimal::new(120_000, 0),
//! ))?;
//!
//! let follow_up_at = service.now() + chrono::Duration::days(7);
//! let outcome = service.update_status(
//!     &app.id,
//!     StatusUpdate::new(ApplicationStatus::UnderReview, "Submitted", "liaison")
//!         .with_follow_up(follow_up_at),
//! )?;
//!
//! let call = outcome.follow_up.expect("follow-up call");
//! service.record_outcome(&call.id, RecordOutcome::new(OutcomeStatus::Successful, "Confirmed receipt", 5))?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
pub mod macros;

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod state_machine;
pub mod stats;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigManager, LiaisonConfig};
pub use constants::{operations, system};
pub use error::{LiaisonError, LiaisonResult};
pub use service::{LiaisonService, OutcomeRecorded, TransitionOptions, TransitionOutcome};
pub use stats::LiaisonStats;
pub use store::{InMemoryStore, LiaisonSnapshot};
