use clap::Subcommand;
use triage_sync_core::integrations::keyring_store;
use triage_sync_core::CoreError;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Jira password or API token: login / logout / status
    Tracker {
        #[command(subcommand)]
        action: AuthOp,
    },
    /// OverOps API key: login / logout / status
    Source {
        #[command(subcommand)]
        action: AuthOp,
    },
}

#[derive(Subcommand)]
pub enum AuthOp {
    /// Store the secret in the OS keyring
    Login {
        #[arg(long)]
        secret: String,
    },
    /// Remove the stored secret
    Logout,
    /// Check whether a secret is stored
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Tracker { action: op } => handle(op, "Jira", keyring_store::TRACKER_PASSWORD),
        AuthAction::Source { action: op } => handle(op, "OverOps", keyring_store::SOURCE_API_KEY),
    }
}

fn handle(op: AuthOp, label: &str, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    match op {
        AuthOp::Login { secret } => {
            let secret = secret.trim();
            if secret.is_empty() {
                return Err("--secret must not be empty".into());
            }
            keyring_store::set(key, secret).map_err(CoreError::from)?;
            println!("{label} credential stored");
        }
        AuthOp::Logout => {
            keyring_store::delete(key).map_err(CoreError::from)?;
            println!("{label} credential removed");
        }
        AuthOp::Status => {
            let stored = keyring_store::get(key).map_err(CoreError::from)?;
            println!(
                "{label}: {}",
                if stored.is_some() {
                    "credential stored"
                } else {
                    "no credential stored"
                }
            );
        }
    }
    Ok(())
}
