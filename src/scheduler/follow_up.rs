//! # Follow-Up Scheduler
//!
//! Creates scheduled calls and resolves them with an outcome. Work is split in
//! two phases so callers can keep compound operations atomic:
//!
//! - `plan_*` methods validate and build a call without touching anything
//! - `note_scheduled` / `complete` apply the side effects and cannot fail once
//!   their own checks passed
//!
//! Chained follow-ups (from a status change or a call outcome) are built by
//! the same `build_call` path as manual ones. Only caller requests go through
//! `validate_schedule_request`; titles and agendas derived from an already
//! stored application or call are not held to the caller's length limits.

use crate::config::SchedulingConfig;
use crate::constants::{system, NOTES_TIMESTAMP_FORMAT};
use crate::error::{LiaisonError, LiaisonResult};
use crate::models::{
    CallOutcome, CallStatus, GrantApplication, OutcomeStatus, RecordOutcome, ScheduleCall,
    ScheduledCall,
};
use crate::state_machine::StatusUpdate;
use crate::validation::{validate_outcome_request, validate_schedule_request};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Builds and resolves [`ScheduledCall`]s using the configured defaults
#[derive(Debug, Clone)]
pub struct FollowUpScheduler {
    config: SchedulingConfig,
}

impl Default for FollowUpScheduler {
    fn default() -> Self {
        Self::new(SchedulingConfig::default())
    }
}

impl FollowUpScheduler {
    pub fn new(config: SchedulingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Validate a request and build the call it describes
    pub fn plan_call(
        &self,
        application: &GrantApplication,
        request: &ScheduleCall,
        now: DateTime<Utc>,
    ) -> LiaisonResult<ScheduledCall> {
        validate_schedule_request(request)?;
        Ok(self.build_call(application, request, now))
    }

    /// Build the call a request describes without validating it
    fn build_call(
        &self,
        application: &GrantApplication,
        request: &ScheduleCall,
        now: DateTime<Utc>,
    ) -> ScheduledCall {
        let location = request
            .location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .unwrap_or(self.config.default_location.as_str())
            .to_string();

        ScheduledCall {
            id: Uuid::new_v4().to_string(),
            application_id: application.id.clone(),
            title: request.title.trim().to_string(),
            date_time: request.date_time,
            duration_minutes: request
                .duration_minutes
                .unwrap_or(self.config.default_call_duration_minutes),
            call_type: request.call_type.trim().to_string(),
            priority: request.priority,
            agenda: request.agenda.trim().to_string(),
            participants: request
                .participants
                .iter()
                .map(|participant| participant.trim().to_string())
                .collect(),
            location,
            reminder_before_minutes: request
                .reminder_before_minutes
                .unwrap_or(self.config.default_reminder_minutes),
            notes: request.notes.clone(),
            status: CallStatus::Scheduled,
            outcome: None,
            created_at: now,
            follow_up_of: None,
        }
    }

    /// Record a freshly planned call on its application
    pub fn note_scheduled(
        &self,
        application: &mut GrantApplication,
        call: &ScheduledCall,
        now: DateTime<Utc>,
    ) {
        application.append_note(
            now,
            &format!(
                "Scheduled {} call \"{}\" for {}",
                call.call_type,
                call.title,
                call.date_time.format(NOTES_TIMESTAMP_FORMAT)
            ),
        );
        application.last_contact = now;
    }

    /// Validate, build and note a call in one step
    pub fn schedule(
        &self,
        application: &mut GrantApplication,
        request: &ScheduleCall,
        now: DateTime<Utc>,
    ) -> LiaisonResult<ScheduledCall> {
        let call = self.plan_call(application, request, now)?;
        self.note_scheduled(application, &call, now);
        Ok(call)
    }

    /// Build and note the call following a status change
    pub fn schedule_follow_up(
        &self,
        application: &mut GrantApplication,
        update: &StatusUpdate,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ScheduledCall {
        let request = self.status_follow_up_request(application, update, at);
        let call = self.build_call(application, &request, now);
        self.note_scheduled(application, &call, now);
        call
    }

    /// Request for the call that follows a status change
    ///
    /// `application` is expected to already carry the new status and priority.
    pub fn status_follow_up_request(
        &self,
        application: &GrantApplication,
        update: &StatusUpdate,
        at: DateTime<Utc>,
    ) -> ScheduleCall {
        let agenda = update
            .next_steps_text()
            .unwrap_or(system::DEFAULT_STATUS_UPDATE_AGENDA);

        let mut request = ScheduleCall::new(
            format!("{}: {}", self.config.status_update_call_type, application.proposal_title),
            at,
            self.config.status_update_call_type.clone(),
        )
        .with_priority(application.priority)
        .with_agenda(agenda)
        .with_notes(format!(
            "Status changed to {}: {}",
            update.new_status,
            update.reason.trim()
        ));

        if !application.contact_person.trim().is_empty() {
            request = request.with_participants([application.contact_person.trim()]);
        }
        request
    }

    /// Request for the call chained to `original` by its outcome
    ///
    /// `None` unless the outcome carries both a follow-up date and type.
    pub fn chained_follow_up_request(
        &self,
        original: &ScheduledCall,
        outcome: &RecordOutcome,
    ) -> Option<ScheduleCall> {
        let at = outcome.follow_up_date?;
        let call_type = outcome
            .follow_up_type
            .as_deref()
            .map(str::trim)
            .filter(|call_type| !call_type.is_empty())?;

        let context = outcome
            .next_steps
            .as_deref()
            .map(str::trim)
            .filter(|steps| !steps.is_empty())
            .unwrap_or(outcome.summary.trim());

        Some(
            ScheduleCall::new(format!("Follow-up: {}", original.title), at, call_type)
                .with_priority(original.priority)
                .with_agenda(format!("Follow-up to \"{}\": {}", original.title, context))
                .with_participants(original.participants.iter().cloned())
                .with_duration(original.duration_minutes)
                .with_location(original.location.clone())
                .with_reminder(original.reminder_before_minutes),
        )
    }

    /// Resolve `call` with an outcome and plan its chained follow-up
    ///
    /// Nothing is mutated unless every check passes. Returns the chained
    /// call, which the caller must store alongside the updated original.
    pub fn complete(
        &self,
        application: &mut GrantApplication,
        call: &mut ScheduledCall,
        request: &RecordOutcome,
        now: DateTime<Utc>,
    ) -> LiaisonResult<Option<ScheduledCall>> {
        if call.is_completed() || call.outcome.is_some() {
            return Err(LiaisonError::DoubleCompletion {
                call_id: call.id.clone(),
            });
        }
        validate_outcome_request(request)?;

        let chained = self
            .chained_follow_up_request(call, request)
            .map(|follow_up| {
                let mut planned = self.build_call(application, &follow_up, now);
                planned.follow_up_of = Some(call.id.clone());
                planned
            });

        let outcome = CallOutcome {
            status: request.status,
            summary: request.summary.trim().to_string(),
            next_steps: request
                .next_steps
                .as_deref()
                .map(str::trim)
                .filter(|steps| !steps.is_empty())
                .map(str::to_string),
            follow_up_date: request.follow_up_date,
            follow_up_type: request
                .follow_up_type
                .as_deref()
                .map(str::trim)
                .filter(|call_type| !call_type.is_empty())
                .map(str::to_string),
            rating: request.rating,
            completed_at: now,
        };

        application.append_note(
            now,
            &format!(
                "Completed call \"{}\": {} ({}/5) - {}",
                call.title, outcome.status, outcome.rating, outcome.summary
            ),
        );
        if outcome.status != OutcomeStatus::NoAnswer {
            application.last_contact = now;
        }

        call.status = CallStatus::Completed;
        call.outcome = Some(outcome);

        if let Some(follow_up) = &chained {
            self.note_scheduled(application, follow_up, now);
        }

        Ok(chained)
    }
}
