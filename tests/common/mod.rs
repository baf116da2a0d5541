#![allow(dead_code)]

pub mod builders;
pub mod strategies;

pub use builders::*;
pub use strategies::*;

use chrono::{DateTime, TimeZone, Utc};
use grant_liaison::{LiaisonService, ManualClock};
use std::sync::Arc;

/// Instant the integration tests start their clocks at
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 6, 10, 30, 0).unwrap()
}

/// Service driven by a manual clock set to [`t0`]
pub fn test_service() -> (LiaisonService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let service = LiaisonService::new().with_clock(clock.clone());
    (service, clock)
}
