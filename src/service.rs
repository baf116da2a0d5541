//! # Liaison Service
//!
//! Entry point of the engine. Owns the store, the clock, the status state
//! machine and the follow-up scheduler, and turns each public operation into
//! one atomic unit of work on the store.
//!
//! ```rust
//! use grant_liaison::models::{FunderType, NewGrantApplication};
//! use grant_liaison::state_machine::{ApplicationStatus, StatusUpdate};
//! use grant_liaison::LiaisonService;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), grant_liaison::LiaisonError> {
//! let service = LiaisonService::new();
//! let app = service.create_application(NewGrantApplication::new(
//!     "Coastal Resilience",
//!     "Ocean Trust",
//!     FunderType::Private,
//!     Decimal::new(50_000, 0),
//! ))?;
//!
//! let outcome = service.update_status(
//!     &app.id,
//!     StatusUpdate::new(ApplicationStatus::UnderReview, "Submitted", "liaison"),
//! )?;
//! assert_eq!(outcome.application.status_history.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::clock::{Clock, SystemClock};
use crate::config::LiaisonConfig;
use crate::constants::operations;
use crate::error::{not_found, LiaisonResult};
use crate::logging::{log_call_operation, log_error, log_transition};
use crate::models::{
    ApplicationFilter, CallFilter, CallStatus, GrantApplication, NewGrantApplication,
    RecordOutcome, ScheduleCall, ScheduledCall, StatusHistoryEntry, Visibility,
};
use crate::scheduler::FollowUpScheduler;
use crate::state_machine::{
    ApplicationStateMachine, ApplicationStatus, StatusUpdate, WorkflowDefinition,
};
use crate::stats::{LiaisonStats, StatsAggregator};
use crate::store::InMemoryStore;
use crate::validation::validate_new_application;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Result of a successful status update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub application: GrantApplication,
    /// Status-update call created when the update carried a follow-up date
    pub follow_up: Option<ScheduledCall>,
}

/// Result of a successful outcome recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecorded {
    pub call: ScheduledCall,
    /// Call chained by the outcome's follow-up date and type
    pub follow_up: Option<ScheduledCall>,
}

/// What can happen next to an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOptions {
    pub current: ApplicationStatus,
    pub allowed: Vec<ApplicationStatus>,
    pub milestones: &'static [&'static str],
    pub suggested_actions: &'static [&'static str],
}

/// Grant liaison engine
pub struct LiaisonService {
    store: InMemoryStore,
    clock: Arc<dyn Clock>,
    state_machine: ApplicationStateMachine,
    scheduler: FollowUpScheduler,
}

impl std::fmt::Debug for LiaisonService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiaisonService")
            .field("applications", &self.store.application_count())
            .field("calls", &self.store.call_count())
            .field("state_machine", &self.state_machine)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl Default for LiaisonService {
    fn default() -> Self {
        Self::new()
    }
}

impl LiaisonService {
    /// Empty service with default configuration and the system clock
    pub fn new() -> Self {
        Self::with_config(&LiaisonConfig::default())
    }

    pub fn with_config(config: &LiaisonConfig) -> Self {
        Self {
            store: InMemoryStore::new(),
            clock: Arc::new(SystemClock),
            state_machine: ApplicationStateMachine::new(),
            scheduler: FollowUpScheduler::new(config.scheduling.clone()),
        }
    }

    /// Replace the clock, typically with a `ManualClock` in tests
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the store, e.g. with one restored from a snapshot
    pub fn with_store(mut self, store: InMemoryStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    // =========================================================================
    // Applications
    // =========================================================================

    pub fn create_application(&self, fields: NewGrantApplication) -> LiaisonResult<GrantApplication> {
        if let Err(error) = validate_new_application(&fields) {
            log_error(operations::APPLICATION_CREATED, "-", &error);
            return Err(error);
        }
        let now = self.clock.now();

        let application = GrantApplication {
            id: Uuid::new_v4().to_string(),
            proposal_title: fields.proposal_title.trim().to_string(),
            funder_name: fields.funder_name.trim().to_string(),
            funder_type: fields.funder_type,
            contact_person: fields.contact_person.trim().to_string(),
            contact_email: fields.contact_email.trim().to_string(),
            contact_phone: fields.contact_phone.trim().to_string(),
            grant_amount: fields.grant_amount,
            status: fields.status.unwrap_or_default(),
            priority: fields.priority.unwrap_or_default(),
            application_date: fields.application_date.unwrap_or_else(|| now.date_naive()),
            follow_up_date: fields.follow_up_date,
            last_contact: now,
            notes: fields.notes.unwrap_or_default(),
            status_history: Default::default(),
        };

        self.store.insert_application(application.clone())?;
        tracing::info!(
            operation = operations::APPLICATION_CREATED,
            application_id = %application.id,
            status = %application.status,
            funder = %application.funder_name,
            "📝 APPLICATION_CREATED"
        );
        Ok(application)
    }

    pub fn get_application(&self, id: &str) -> LiaisonResult<GrantApplication> {
        self.store
            .get_application(id)
            .ok_or_else(|| not_found("Application", id))
    }

    /// Delete an application and every call it owns
    pub fn delete_application(&self, id: &str) -> LiaisonResult<GrantApplication> {
        let (application, calls) = self
            .store
            .remove_application(id)
            .ok_or_else(|| not_found("Application", id))?;
        tracing::info!(
            operation = operations::APPLICATION_DELETED,
            application_id = %id,
            removed_calls = calls.len(),
            "🗑️ APPLICATION_DELETED"
        );
        Ok(application)
    }

    /// Applications matching `filter`, newest application date first
    pub fn list_applications(&self, filter: &ApplicationFilter) -> Vec<GrantApplication> {
        let mut applications: Vec<_> = self
            .store
            .applications()
            .into_iter()
            .filter(|application| filter.matches(application))
            .collect();
        applications.sort_by(|a, b| {
            b.application_date
                .cmp(&a.application_date)
                .then_with(|| a.proposal_title.cmp(&b.proposal_title))
                .then_with(|| a.id.cmp(&b.id))
        });
        applications
    }

    // =========================================================================
    // Status workflow
    // =========================================================================

    /// Move an application to a new status
    ///
    /// Appends one audit entry, applies the priority rule and, when the update
    /// carries a follow-up date, schedules a status-update call. Nothing is
    /// written unless all of it succeeds.
    pub fn update_status(&self, id: &str, update: StatusUpdate) -> LiaisonResult<TransitionOutcome> {
        let result = self.store.with_application(id, |application, unit| {
            let from = application.status;
            let entry = self
                .state_machine
                .transition(application, &update, self.clock.now())?;

            let follow_up = update.follow_up_date.map(|at| {
                let call = self
                    .scheduler
                    .schedule_follow_up(application, &update, at, entry.changed_at);
                application.follow_up_date = Some(at);
                call
            });
            if let Some(call) = &follow_up {
                unit.stage_call(call.clone())?;
            }

            Ok((
                from,
                entry.changed_by,
                TransitionOutcome {
                    application: application.clone(),
                    follow_up,
                },
            ))
        });

        match result {
            Ok((from, changed_by, outcome)) => {
                let follow_up_id = outcome.follow_up.as_ref().map(|call| call.id.as_str());
                log_transition(id, from, update.new_status, &changed_by, follow_up_id);
                if let Some(call) = &outcome.follow_up {
                    log_call_operation(
                        operations::FOLLOW_UP_SCHEDULED,
                        id,
                        &call.id,
                        &call.call_type,
                        Some("status update"),
                    );
                }
                Ok(outcome)
            }
            Err(error) => {
                log_error(operations::TRANSITION_REJECTED, id, &error);
                Err(error)
            }
        }
    }

    pub fn transition_options(&self, id: &str) -> LiaisonResult<TransitionOptions> {
        let current = self.get_application(id)?.status;
        let rule = WorkflowDefinition::rule(current);
        Ok(TransitionOptions {
            current,
            allowed: WorkflowDefinition::allowed_targets(current),
            milestones: rule.milestones,
            suggested_actions: rule.suggested_actions,
        })
    }

    /// Audit trail of an application, optionally limited to one visibility
    pub fn status_history(
        &self,
        id: &str,
        visibility: Option<Visibility>,
    ) -> LiaisonResult<Vec<StatusHistoryEntry>> {
        let application = self.get_application(id)?;
        Ok(match visibility {
            Some(visibility) => application.status_history.with_visibility(visibility),
            None => application.status_history.entries().to_vec(),
        })
    }

    // =========================================================================
    // Calls
    // =========================================================================

    pub fn schedule_call(&self, application_id: &str, request: ScheduleCall) -> LiaisonResult<ScheduledCall> {
        let result = self.store.with_application(application_id, |application, unit| {
            let call = self.scheduler.schedule(application, &request, self.clock.now())?;
            unit.stage_call(call.clone())?;
            Ok(call)
        });

        match result {
            Ok(call) => {
                log_call_operation(
                    operations::CALL_SCHEDULED,
                    application_id,
                    &call.id,
                    &call.call_type,
                    None,
                );
                Ok(call)
            }
            Err(error) => {
                log_error(operations::CALL_SCHEDULED, application_id, &error);
                Err(error)
            }
        }
    }

    /// Complete a call and chain its follow-up, if the outcome asks for one
    pub fn record_outcome(&self, call_id: &str, request: RecordOutcome) -> LiaisonResult<OutcomeRecorded> {
        let result = self
            .store
            .get_call(call_id)
            .ok_or_else(|| not_found("Call", call_id))
            .and_then(|call| {
                self.store.with_application(&call.application_id, |application, unit| {
                    // Re-read under the application lock
                    let mut call = unit.call(call_id).ok_or_else(|| not_found("Call", call_id))?;
                    let follow_up = self
                        .scheduler
                        .complete(application, &mut call, &request, self.clock.now())?;

                    unit.stage_call(call.clone())?;
                    if let Some(follow_up) = &follow_up {
                        unit.stage_call(follow_up.clone())?;
                    }
                    Ok(OutcomeRecorded { call, follow_up })
                })
            });

        match result {
            Ok(recorded) => {
                let call = &recorded.call;
                log_call_operation(
                    operations::CALL_COMPLETED,
                    &call.application_id,
                    &call.id,
                    &call.call_type,
                    call.outcome.as_ref().map(|outcome| outcome.status.as_str()),
                );
                if let Some(follow_up) = &recorded.follow_up {
                    log_call_operation(
                        operations::FOLLOW_UP_SCHEDULED,
                        &follow_up.application_id,
                        &follow_up.id,
                        &follow_up.call_type,
                        Some("chained"),
                    );
                }
                Ok(recorded)
            }
            Err(error) => {
                log_error(operations::OUTCOME_REJECTED, call_id, &error);
                Err(error)
            }
        }
    }

    pub fn get_call(&self, id: &str) -> LiaisonResult<ScheduledCall> {
        self.store.get_call(id).ok_or_else(|| not_found("Call", id))
    }

    /// Calls matching `filter`, earliest first
    pub fn list_calls(&self, filter: &CallFilter) -> Vec<ScheduledCall> {
        let mut calls = self.store.find_calls(filter);
        calls.sort_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)));
        calls
    }

    /// Scheduled calls whose start time has been reached
    pub fn due_calls(&self) -> Vec<ScheduledCall> {
        let now = self.clock.now();
        let mut calls = self.list_calls(&CallFilter::default().with_status(CallStatus::Scheduled));
        calls.retain(|call| call.is_due(now));
        calls
    }

    pub fn upcoming_calls(&self) -> Vec<ScheduledCall> {
        let now = self.clock.now();
        let mut calls = self.list_calls(&CallFilter::default().with_status(CallStatus::Scheduled));
        calls.retain(|call| call.is_upcoming(now));
        calls
    }

    /// Scheduled calls whose reminder has fired but which have not started
    pub fn pending_reminders(&self) -> Vec<ScheduledCall> {
        let now = self.clock.now();
        let mut calls = self.list_calls(&CallFilter::default().with_status(CallStatus::Scheduled));
        calls.retain(|call| call.is_reminder_pending(now));
        calls
    }

    pub fn stats(&self) -> LiaisonStats {
        let applications = self.store.applications();
        let calls = self.store.calls();
        StatsAggregator::compute(&applications, &calls, self.clock.now())
    }
}
