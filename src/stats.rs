//! # Statistics Aggregator
//!
//! Pure read-side summaries over the application and call collections.
//! Recomputed from the collections on every call; nothing is cached.

use crate::models::{CallStatus, GrantApplication, Priority, ScheduledCall};
use crate::state_machine::ApplicationStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of dashboard counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiaisonStats {
    /// Only statuses with at least one application appear
    pub per_status_counts: BTreeMap<ApplicationStatus, usize>,
    /// Exact sum of `grant_amount` over `Approved` applications
    pub total_approved_funding: Decimal,
    pub per_call_status_counts: BTreeMap<CallStatus, usize>,
    /// Scheduled calls starting after `computed_at`
    pub upcoming_calls: usize,
    /// Scheduled calls whose start time has been reached
    pub overdue_calls: usize,
    pub per_priority_counts: BTreeMap<Priority, usize>,
    /// Mean outcome rating of completed calls, `None` without any
    pub average_outcome_rating: Option<Decimal>,
    pub computed_at: DateTime<Utc>,
}

/// Stateless aggregator
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    pub fn compute<'a, A, C>(applications: A, calls: C, now: DateTime<Utc>) -> LiaisonStats
    where
        A: IntoIterator<Item = &'a GrantApplication>,
        C: IntoIterator<Item = &'a ScheduledCall>,
    {
        let mut per_status_counts = BTreeMap::new();
        let mut per_priority_counts = BTreeMap::new();
        let mut total_approved_funding = Decimal::ZERO;

        for application in applications {
            *per_status_counts.entry(application.status).or_insert(0) += 1;
            *per_priority_counts.entry(application.priority).or_insert(0) += 1;
            if application.status == ApplicationStatus::Approved {
                total_approved_funding += application.grant_amount;
            }
        }

        let mut per_call_status_counts = BTreeMap::new();
        let mut upcoming_calls = 0;
        let mut overdue_calls = 0;
        let mut rating_total = 0u32;
        let mut rated_calls = 0u32;

        for call in calls {
            *per_call_status_counts.entry(call.status).or_insert(0) += 1;
            if call.is_upcoming(now) {
                upcoming_calls += 1;
            } else if call.is_due(now) {
                overdue_calls += 1;
            }
            if let Some(outcome) = &call.outcome {
                rating_total += u32::from(outcome.rating);
                rated_calls += 1;
            }
        }

        let average_outcome_rating = (rated_calls > 0).then(|| {
            (Decimal::from(rating_total) / Decimal::from(rated_calls)).round_dp(2)
        });

        LiaisonStats {
            per_status_counts,
            total_approved_funding,
            per_call_status_counts,
            upcoming_calls,
            overdue_calls,
            per_priority_counts,
            average_outcome_rating,
            computed_at: now,
        }
    }
}
