use clap::Args;
use std::path::PathBuf;
use triage_sync_core::{sync, FailurePolicy, Outcome, RunOptions, RunReport};

#[derive(Args)]
pub struct RunArgs {
    /// Config file (default: ~/.config/triage-sync/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the lookback window, in days
    #[arg(long)]
    timespan: Option<i64>,
    /// Decide and report, but write nothing
    #[arg(long)]
    dry_run: bool,
    /// Record per-event failures and keep going
    #[arg(long)]
    continue_on_error: bool,
    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(days) = args.timespan {
        config.timespan = days;
    }

    let options = RunOptions {
        dry_run: args.dry_run,
        failure_policy: if args.continue_on_error {
            FailurePolicy::SkipEvent
        } else {
            FailurePolicy::Abort
        },
    };

    let report = sync::run(&config, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "Window: {} .. {}",
        report.from.format("%Y-%m-%d %H:%M"),
        report.to.format("%Y-%m-%d %H:%M")
    );
    println!(
        "Events: {} fetched, {} linked to Jira",
        report.events_fetched, report.events_linked
    );

    for item in &report.outcomes {
        let detail = match &item.outcome {
            Outcome::Applied { direction, mutation, .. } => format!("{direction}: {mutation}"),
            Outcome::Planned { direction, mutation, .. } => {
                format!("{direction}: would {mutation}")
            }
            Outcome::UpToDate { target, .. } => format!("up to date ({target})"),
            Outcome::MissingTransition { transition_name, .. } => {
                format!("no '{transition_name}' transition available, skipped")
            }
            Outcome::Failed { message } => format!("FAILED: {message}"),
        };
        println!("  {} [{}] {}", item.event_id, item.issue_key, detail);
    }

    if report.dry_run {
        println!("Dry run, nothing written.");
    } else {
        println!("Applied {} change(s).", report.mutations_applied());
    }
    if report.failures() > 0 {
        println!("{} event(s) failed.", report.failures());
    }
    println!("Sync complete.");
}
