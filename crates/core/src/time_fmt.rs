// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron field formatting and host-OS timezone resolution.
//!
//! The task-table runner evaluates cron fields in the *host's* configured
//! timezone, which is not necessarily the timezone `chrono::Local` resolves
//! to inside this process (a supervisor or container may override `TZ`).
//! Every caller that emits cron fields must go through [`host_timezone`].

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The five cron fields, rendered without leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronFields {
    pub minute: u32,
    pub hour: u32,
    pub day_of_month: u32,
    pub month: u32,
    pub day_of_week: u32,
}

impl CronFields {
    /// `m h dom mon dow`, e.g. `5 7 * * *` for a daily schedule, using `*`
    /// for day-of-month/month/day-of-week on one-off "any day" entries is
    /// the caller's responsibility — this type always renders concrete
    /// values for all five fields.
    pub fn render(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }

    pub fn daily(hour: u32, minute: u32) -> String {
        format!("{minute} {hour} * * *")
    }
}

/// Resolve the OS-configured timezone regardless of any `TZ` override this
/// process happens to be running under. Falls back to UTC — a
/// misconfigured environment should degrade to a predictable timezone, not
/// silently schedule in a guessed one.
pub fn host_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(chrono_tz::UTC)
}

/// Render the five cron fields for an absolute instant, in the given
/// timezone.
pub fn cron_fields_at(instant: DateTime<Utc>, tz: Tz) -> CronFields {
    let local = instant.with_timezone(&tz);
    CronFields {
        minute: local.format("%M").to_string().parse().unwrap_or(0),
        hour: local.format("%H").to_string().parse().unwrap_or(0),
        day_of_month: local.format("%d").to_string().parse().unwrap_or(1),
        month: local.format("%m").to_string().parse().unwrap_or(1),
        day_of_week: local.format("%w").to_string().parse().unwrap_or(0),
    }
}

/// Next occurrence (today or tomorrow) of `hour:minute` in timezone `tz`,
/// expressed as a UTC instant strictly after `now`.
pub fn next_daily_occurrence(now: DateTime<Utc>, tz: Tz, hour: u32, minute: u32) -> DateTime<Utc> {
    let local_now = now.with_timezone(&tz);
    let today = local_now.date_naive();
    let candidate_naive = today.and_hms_opt(hour, minute, 0).unwrap_or(today.and_hms_opt(0, 0, 0).expect("midnight is always valid"));
    let candidate = tz
        .from_local_datetime(&candidate_naive)
        .single()
        .unwrap_or_else(|| tz.from_utc_datetime(&candidate_naive));
    let candidate_utc = candidate.with_timezone(&Utc);
    if candidate_utc > now {
        candidate_utc
    } else {
        candidate_utc + chrono::Duration::days(1)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
