// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hottubd estimate` — C9: mine the logs, persist the fit, print a summary.

use chrono::{DateTime, Utc};
use hottub_engine::estimator::Estimator;

use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};
use crate::wiring::Deps;

fn parse_bound(spec: Option<&str>, label: &str) -> Result<Option<DateTime<Utc>>, ExitError> {
    spec.map(|s| s.parse().map_err(|_| ExitError::new(2, format!("invalid --{label} timestamp {s:?}, expected RFC 3339"))))
        .transpose()
}

pub async fn run(deps: &Deps, since: Option<&str>, until: Option<&str>, format: OutputFormat) -> Result<(), ExitError> {
    let since = parse_bound(since, "since")?;
    let until = parse_bound(until, "until")?;

    let estimator = Estimator::new(deps.config.log_dir.clone(), deps.event_log.clone(), deps.clock.clone());
    let characteristics = estimator.estimate(since, until)?;
    deps.characteristics.put(&characteristics)?;

    format_or_json(format, &characteristics, || {
        println!("sessions analyzed:   {}", characteristics.sessions_analyzed);
        println!(
            "heating velocity:    {}",
            characteristics.heating_velocity_f_per_min.map(|v| format!("{v:.3} °F/min")).unwrap_or_else(|| "n/a".to_string())
        );
        println!(
            "startup lag:         {}",
            characteristics.startup_lag_minutes.map(|v| format!("{v:.1} min")).unwrap_or_else(|| "n/a".to_string())
        );
        println!(
            "overshoot:           {}",
            characteristics.overshoot_degrees_f.map(|v| format!("{v:.2} °F")).unwrap_or_else(|| "n/a".to_string())
        );
        println!(
            "cooling coefficient: {}",
            characteristics.cooling_coefficient_k.map(|v| format!("{v:.5} (r²={:.3})", characteristics.cooling_r_squared.unwrap_or(0.0))).unwrap_or_else(|| "n/a".to_string())
        );
    })
    .map_err(|e| ExitError::new(1, e.to_string()))
}
