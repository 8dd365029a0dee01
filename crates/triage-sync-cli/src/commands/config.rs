use clap::Subcommand;
use std::path::PathBuf;
use triage_sync_core::SyncConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a commented starter config
    Init {
        /// Where to write it (default: ~/.config/triage-sync/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config with secrets masked
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default config file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Init { config, force } => {
            let path = super::config_path(config.as_deref())?;
            if path.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )
                .into());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, SyncConfig::template())?;
            println!("wrote {}", path.display());
        }
        ConfigAction::Show { config } => {
            let path = super::config_path(config.as_deref())?;
            let loaded = SyncConfig::load_from(&path)?;
            let json = serde_json::to_string_pretty(&loaded.redacted())?;
            println!("{json}");
        }
        ConfigAction::Path => {
            println!("{}", SyncConfig::default_path()?.display());
        }
    }
    Ok(())
}
