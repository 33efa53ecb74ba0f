// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test-only fixtures shared across crates. Gated behind `test-support` so
//! production builds never pull this in.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::job::{JobAction, JobRecord};
use crate::{FakeClock, JobId};

/// A `FakeClock` pinned to a fixed, readable epoch (2026-01-01T00:00:00Z).
pub fn fixed_clock() -> FakeClock {
    let clock = FakeClock::new();
    clock.set_epoch_ms(1_767_225_600_000);
    clock
}

pub fn sample_job_record(action: JobAction) -> JobRecord {
    JobRecord::new(
        JobId::one_off(),
        action,
        "http://hottub.local",
        false,
        Utc::now(),
        Utc::now(),
        BTreeMap::new(),
    )
}
