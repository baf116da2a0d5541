#![allow(dead_code)]

use grant_liaison::models::OutcomeStatus;
use grant_liaison::state_machine::ApplicationStatus;
use proptest::prelude::*;
use proptest::sample::select;

/// Strategy for any workflow status
pub fn status_strategy() -> impl Strategy<Value = ApplicationStatus> {
    select(ApplicationStatus::ALL.to_vec())
}

/// Strategy for sequences of requested target statuses
pub fn status_walk_strategy() -> impl Strategy<Value = Vec<ApplicationStatus>> {
    prop::collection::vec(status_strategy(), 1..24)
}

pub fn outcome_status_strategy() -> impl Strategy<Value = OutcomeStatus> {
    select(OutcomeStatus::ALL.to_vec())
}

/// Ratings outside the accepted 1..=5 range
pub fn invalid_rating_strategy() -> impl Strategy<Value = u8> {
    prop_oneof![Just(0u8), 6u8..=u8::MAX]
}

/// Free text that is never blank
pub fn reason_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.]{0,60}"
}
