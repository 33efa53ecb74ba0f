// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hottubd`: the one-shot CLI front door every host crontab entry invokes.
//! One process, one operation, one exit code.

mod commands;
mod exit_error;
mod output;
mod wiring;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use exit_error::ExitError;
use output::OutputFormat;
use wiring::Deps;

#[derive(Parser)]
#[command(name = "hottubd", version, about = "Hot tub heating controller and scheduler")]
struct Cli {
    /// Path to a TOML config file (defaults to $HOTTUB_CONFIG or /etc/hottub/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one controller tick (C8 checkAndAdjust).
    Tick,
    /// Start heating toward a target temperature.
    Start {
        #[arg(long)]
        target: f64,
    },
    /// Stop heating and clear any scheduled wake-ups.
    Stop,
    /// Book a job in the task table.
    Schedule {
        /// heat-on | heat-off | pump-on | pump-off | start-heating | wake-up
        action: String,
        /// RFC 3339 instant the job should first fire at.
        #[arg(long)]
        at: String,
        #[arg(long)]
        recurring: bool,
        /// Extra parameters stored on the job record, `key=value`.
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Cancel a previously scheduled job.
    Cancel {
        job_id: String,
    },
    /// List scheduled jobs, reconciling orphaned task-table entries.
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Mine the logs and refit heating characteristics (C9).
    Estimate {
        #[arg(long)]
        since: Option<String>,
        #[arg(long)]
        until: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Install a recurring wake-up job ahead of a daily ready-by deadline (C10).
    PlanReadyBy {
        #[arg(long)]
        ready_by: String,
        #[arg(long)]
        target: f64,
    },
    /// The wake-up job's own handler (C10 handleWakeUp).
    WakeUp {
        #[arg(long)]
        ready_by: String,
        #[arg(long)]
        target: f64,
    },
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    let (key, value) = s.split_once('=').ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("HOTTUB_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.code);
    }
}

async fn run(cli: Cli) -> Result<(), ExitError> {
    let deps = Deps::load(cli.config.as_deref())?;

    match cli.command {
        Command::Tick => commands::tick::run(&deps).await,
        Command::Start { target } => commands::start_stop::start(&deps, target).await,
        Command::Stop => commands::start_stop::stop(&deps).await,
        Command::Schedule { action, at, recurring, params } => commands::schedule::schedule(&deps, &action, &at, recurring, params).await,
        Command::Cancel { job_id } => commands::schedule::cancel(&deps, &job_id).await,
        Command::List { output } => commands::schedule::list(&deps, output).await,
        Command::Estimate { since, until, output } => commands::estimate::run(&deps, since.as_deref(), until.as_deref(), output).await,
        Command::PlanReadyBy { ready_by, target } => commands::plan::plan_ready_by(&deps, &ready_by, target).await,
        Command::WakeUp { ready_by, target } => commands::plan::wake_up(&deps, &ready_by, target).await,
    }
}
