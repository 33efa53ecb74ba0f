// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

#[test]
fn cron_fields_have_no_leading_zeros() {
    let instant = chrono_tz::UTC.with_ymd_and_hms(2026, 3, 5, 7, 5, 0).unwrap().with_timezone(&Utc);
    let fields = cron_fields_at(instant, chrono_tz::UTC);
    assert_eq!(fields.render(), "5 7 5 3 4");
}

#[test]
fn daily_render_has_no_leading_zeros() {
    assert_eq!(CronFields::daily(7, 5), "5 7 * * *");
    assert_eq!(CronFields::daily(22, 30), "30 22 * * *");
}

#[test]
fn next_daily_occurrence_rolls_to_tomorrow_when_already_passed() {
    let now = chrono_tz::UTC.with_ymd_and_hms(2026, 3, 5, 8, 0, 0).unwrap().with_timezone(&Utc);
    let next = next_daily_occurrence(now, chrono_tz::UTC, 7, 0);
    assert_eq!(next.with_timezone(&chrono_tz::UTC).format("%Y-%m-%d").to_string(), "2026-03-06");
}

#[test]
fn next_daily_occurrence_stays_today_when_still_ahead() {
    let now = chrono_tz::UTC.with_ymd_and_hms(2026, 3, 5, 6, 0, 0).unwrap().with_timezone(&Utc);
    let next = next_daily_occurrence(now, chrono_tz::UTC, 7, 0);
    assert_eq!(next.with_timezone(&chrono_tz::UTC).format("%Y-%m-%d").to_string(), "2026-03-05");
}

#[test]
fn host_timezone_never_panics_and_has_a_fallback() {
    // Smoke test: whatever the sandbox's IANA detection returns, this must
    // resolve to *some* Tz rather than panicking.
    let _ = host_timezone();
}
