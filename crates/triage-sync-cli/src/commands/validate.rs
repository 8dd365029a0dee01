use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file (default: ~/.config/triage-sync/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Checks the configuration only; neither service is contacted.
pub fn run(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_deref())?;
    let settings = config.validate()?;
    tracing::info!(
        service_id = %settings.service_id,
        tracker = %settings.tracker_url,
        timespan_days = settings.timespan_days,
        "configuration is valid"
    );
    println!("Sync Jira");
    Ok(())
}
