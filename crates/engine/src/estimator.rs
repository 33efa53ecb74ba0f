// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C9: mines the append-only temperature and equipment-event logs to fit
//! the five-field [`HeatingCharacteristics`] the deadline planner consumes.
//!
//! Every number here comes from a deterministic walk over sorted, already-
//! parsed log rows — given identical inputs, the output is bit-identical.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};
use hottub_core::{Clock, Equipment, EquipmentEventRow, HeatingCharacteristics, RelayAction, TemperatureLogRow};
use hottub_storage::{read_all_temperature_logs, EquipmentEventLogWriter};

use crate::error::EngineError;

/// Session length outside which a heater cycle is treated as garbage
/// (sensor glitch, manual override, crash mid-session).
const MIN_SESSION_DURATION_MINUTES: i64 = 5;
const MAX_SESSION_DURATION_HOURS: i64 = 6;

/// The water temperature must rise this much above the session's starting
/// temperature before we consider heating to have "started" for lag
/// purposes.
const STARTUP_RISE_THRESHOLD_F: f64 = 0.5;

/// How far past `heater off` to scan for the overshoot peak.
const OVERSHOOT_WINDOW_MINUTES: i64 = 10;

/// How long the heater must have been off before a temperature-log pair is
/// eligible as a cooling sample — thermal mass is still equilibrating
/// before this.
const SETTLE_PERIOD_MINUTES: i64 = 15;

/// Cooling-sample pairs further apart than this are treated as a gap in
/// reporting, not a continuous cooling curve.
const MAX_COOLING_GAP_MINUTES: i64 = 10;

/// Below this many retained cooling samples the fit isn't trustworthy.
const MIN_COOLING_SAMPLES: usize = 3;

pub struct Estimator<C: Clock> {
    log_dir: PathBuf,
    events: EquipmentEventLogWriter,
    clock: C,
}

impl<C: Clock> Estimator<C> {
    pub fn new(log_dir: impl Into<PathBuf>, events: EquipmentEventLogWriter, clock: C) -> Self {
        Self { log_dir: log_dir.into(), events, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.clock.epoch_ms() as i64).single().unwrap_or_else(Utc::now)
    }

    pub fn estimate(&self, since: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Result<HeatingCharacteristics, EngineError> {
        let mut temp_rows = read_all_temperature_logs(&self.log_dir)?;
        filter_range(&mut temp_rows, since, until, |r| r.timestamp);
        temp_rows.sort_by_key(|r| r.timestamp);

        let mut events = self.events.read_all()?;
        filter_range(&mut events, since, until, |r| r.timestamp);
        events.sort_by_key(|e| e.timestamp);

        let sessions = extract_heater_sessions(&events);
        let metrics: Vec<SessionMetrics> = sessions.iter().filter_map(|s| session_metrics(s, &temp_rows)).collect();

        let cooling = fit_cooling_coefficient(&temp_rows);

        Ok(HeatingCharacteristics {
            heating_velocity_f_per_min: mean_of(metrics.iter().map(|m| m.velocity)),
            startup_lag_minutes: mean_of(metrics.iter().map(|m| m.startup_lag_minutes)),
            overshoot_degrees_f: mean_of(metrics.iter().map(|m| m.overshoot)),
            cooling_coefficient_k: cooling.k,
            cooling_r_squared: cooling.r_squared,
            cooling_data_points: cooling.data_points,
            sessions_analyzed: metrics.len(),
            generated_at: Some(self.now()),
        })
    }
}

fn filter_range<T>(items: &mut Vec<T>, since: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>, ts: impl Fn(&T) -> DateTime<Utc>) {
    if let Some(since) = since {
        items.retain(|i| ts(i) >= since);
    }
    if let Some(until) = until {
        items.retain(|i| ts(i) <= until);
    }
}

fn mean_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

struct HeaterSession {
    on_at: DateTime<Utc>,
    off_at: DateTime<Utc>,
}

/// Walk the event log pairing each `heater on` with the next `heater off`.
/// An `on` with no following `off` (the session is still running) is
/// dropped — there's nothing to measure yet.
fn extract_heater_sessions(events: &[EquipmentEventRow]) -> Vec<HeaterSession> {
    let mut sessions = Vec::new();
    let mut pending_on: Option<DateTime<Utc>> = None;
    for event in events {
        if event.equipment != Equipment::Heater {
            continue;
        }
        match event.action {
            RelayAction::On => pending_on = Some(event.timestamp),
            RelayAction::Off => {
                if let Some(on_at) = pending_on.take() {
                    sessions.push(HeaterSession { on_at, off_at: event.timestamp });
                }
            }
        }
    }
    sessions
}

struct SessionMetrics {
    velocity: f64,
    startup_lag_minutes: f64,
    overshoot: f64,
}

fn session_metrics(session: &HeaterSession, temp_rows: &[TemperatureLogRow]) -> Option<SessionMetrics> {
    let duration = session.off_at - session.on_at;
    if duration < Duration::minutes(MIN_SESSION_DURATION_MINUTES) || duration > Duration::hours(MAX_SESSION_DURATION_HOURS) {
        return None;
    }

    let in_session: Vec<&TemperatureLogRow> = temp_rows.iter().filter(|r| r.timestamp >= session.on_at && r.timestamp <= session.off_at).collect();
    if in_session.len() < 2 {
        return None;
    }

    let start_temp = in_session.first()?.water_temp_f;
    let end_temp = in_session.last()?.water_temp_f;
    if end_temp <= start_temp {
        return None;
    }

    let startup_lag_minutes = in_session
        .iter()
        .find(|r| r.water_temp_f >= start_temp + STARTUP_RISE_THRESHOLD_F)
        .map(|r| (r.timestamp - session.on_at).num_seconds() as f64 / 60.0)
        .unwrap_or(0.0);

    let lag_cutoff = session.on_at + Duration::seconds((startup_lag_minutes * 60.0).round() as i64);
    let steady_cutoff = session.off_at - Duration::minutes(2);
    let steady_rows: Vec<&TemperatureLogRow> = in_session.iter().copied().filter(|r| r.timestamp > lag_cutoff && r.timestamp < steady_cutoff).collect();

    let velocity = if steady_rows.len() >= 2 {
        linear_regression_slope(&steady_rows)
    } else {
        (end_temp - start_temp) / (duration.num_seconds() as f64 / 60.0)
    };

    let water_temp_at_off = end_temp;
    let overshoot_window_end = session.off_at + Duration::minutes(OVERSHOOT_WINDOW_MINUTES);
    let max_after_off = temp_rows
        .iter()
        .filter(|r| r.timestamp >= session.off_at && r.timestamp <= overshoot_window_end)
        .map(|r| r.water_temp_f)
        .fold(water_temp_at_off, f64::max);

    Some(SessionMetrics { velocity, startup_lag_minutes, overshoot: max_after_off - water_temp_at_off })
}

/// Ordinary least squares slope of `water_temp_f` against elapsed minutes.
fn linear_regression_slope(rows: &[&TemperatureLogRow]) -> f64 {
    let t0 = rows[0].timestamp;
    let xs: Vec<f64> = rows.iter().map(|r| (r.timestamp - t0).num_seconds() as f64 / 60.0).collect();
    let ys: Vec<f64> = rows.iter().map(|r| r.water_temp_f).collect();
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        numerator += (x - mean_x) * (y - mean_y);
        denominator += (x - mean_x).powi(2);
    }
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

struct CoolingSample {
    k: f64,
    dt_min: f64,
    delta_ln: f64,
}

struct CoolingFit {
    k: Option<f64>,
    r_squared: Option<f64>,
    data_points: usize,
}

/// Rows eligible as cooling samples: `heater_on=false` and at least
/// [`SETTLE_PERIOD_MINUTES`] since the heater was last known on.
fn settled_off_rows(temp_rows: &[TemperatureLogRow]) -> Vec<&TemperatureLogRow> {
    let mut last_on_at: Option<DateTime<Utc>> = None;
    let mut eligible = Vec::new();
    for row in temp_rows {
        if row.heater_on {
            last_on_at = Some(row.timestamp);
            continue;
        }
        if let Some(on_at) = last_on_at {
            if row.timestamp - on_at >= Duration::minutes(SETTLE_PERIOD_MINUTES) {
                eligible.push(row);
            }
        }
    }
    eligible
}

fn cooling_point(a: &TemperatureLogRow, b: &TemperatureLogRow) -> Option<CoolingSample> {
    let dt_min = (b.timestamp - a.timestamp).num_seconds() as f64 / 60.0;
    if dt_min <= 0.0 {
        return None;
    }
    let ambient = a.ambient_temp_f.or(b.ambient_temp_f)?;
    let t1 = a.water_temp_f - ambient;
    let t2 = b.water_temp_f - ambient;
    if t1.abs() < 1.0 || t2.abs() < 1.0 || t1 <= 0.0 || t2 <= 0.0 {
        return None;
    }
    let delta_ln = -(t2 / t1).ln();
    Some(CoolingSample { k: delta_ln / dt_min, dt_min, delta_ln })
}

/// Iteratively drop points more than 2σ above the mean `k` until the set
/// stops shrinking — pump-induced cooling bursts show as high-k outliers.
fn prune_outliers(mut samples: Vec<CoolingSample>) -> Vec<CoolingSample> {
    loop {
        if samples.len() < 2 {
            break;
        }
        let mean = samples.iter().map(|s| s.k).sum::<f64>() / samples.len() as f64;
        let variance = samples.iter().map(|s| (s.k - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        let threshold = mean + 2.0 * variance.sqrt();
        let before = samples.len();
        samples.retain(|s| s.k <= threshold);
        if samples.len() == before {
            break;
        }
    }
    samples
}

fn fit_cooling_coefficient(temp_rows: &[TemperatureLogRow]) -> CoolingFit {
    let eligible = settled_off_rows(temp_rows);
    let raw_samples: Vec<CoolingSample> = eligible
        .windows(2)
        .filter(|w| w[1].timestamp - w[0].timestamp <= Duration::minutes(MAX_COOLING_GAP_MINUTES))
        .filter_map(|w| cooling_point(w[0], w[1]))
        .collect();

    let samples = prune_outliers(raw_samples);
    if samples.len() < MIN_COOLING_SAMPLES {
        return CoolingFit { k: None, r_squared: None, data_points: samples.len() };
    }

    let k_mean = samples.iter().map(|s| s.k).sum::<f64>() / samples.len() as f64;
    let mean_y = samples.iter().map(|s| s.delta_ln).sum::<f64>() / samples.len() as f64;
    let ss_tot: f64 = samples.iter().map(|s| (s.delta_ln - mean_y).powi(2)).sum();
    let ss_res: f64 = samples.iter().map(|s| (s.delta_ln - k_mean * s.dt_min).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { (1.0 - ss_res / ss_tot).max(0.0) } else { 1.0 };

    CoolingFit { k: Some(k_mean), r_squared: Some(r_squared), data_points: samples.len() }
}

#[cfg(test)]
#[path = "estimator_tests.rs"]
mod tests;
