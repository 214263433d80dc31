//! `carangos init` command - data directory setup

use clap::Args;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::auth::{self, AuthError, DEFAULT_ADMIN, DEFAULT_ADMIN_PASSWORD, ORGANOGRAM_ACCOUNTS};
use crate::core::config::{Config, CONFIG_FILE};
use crate::core::finance;
use crate::core::store::DataDir;
use crate::entities::expense::Expense;
use crate::entities::user::UserAccount;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Password for the `admin` account
    #[arg(long, default_value = DEFAULT_ADMIN_PASSWORD)]
    pub admin_password: String,

    /// Also create one account per role of the plant's organogram
    #[arg(long)]
    pub seed_org: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let dir = DataDir::create(&global.data_dir).into_diagnostic()?;
    let fresh = !dir.is_initialized();

    let mut seed: Vec<(&str, &str, &str)> =
        vec![(DEFAULT_ADMIN, args.admin_password.as_str(), "admin")];
    if args.seed_org {
        seed.extend(ORGANOGRAM_ACCOUNTS.iter().copied());
    }

    let created = dir.update(|accounts: &mut Vec<UserAccount>| {
        let mut rng = rand::rng();
        let mut created = Vec::new();
        for (username, password, role) in &seed {
            if accounts.iter().any(|a| a.username == *username) {
                tracing::debug!(username, "account exists, skipping");
                continue;
            }
            auth::create_account(accounts, username, password, role, &mut rng)?;
            created.push(username.to_string());
        }
        Ok::<_, AuthError>(created)
    })
    .into_diagnostic()?;

    if !dir.path_of::<Expense>().exists() {
        dir.save(&finance::default_expenses()).into_diagnostic()?;
    }

    let config_path = dir.root().join(CONFIG_FILE);
    if !config_path.exists() {
        std::fs::write(&config_path, Config::default_template()).into_diagnostic()?;
    }

    if fresh {
        println!(
            "{} Initialized data directory at {}",
            style("✓").green(),
            style(dir.root().display()).cyan()
        );
    } else {
        println!("Data directory {} already initialized", dir.root().display());
    }

    if created.is_empty() {
        println!("No new accounts created.");
    } else {
        println!("Created accounts: {}", created.join(", "));
    }

    if fresh {
        println!();
        println!("Next steps:");
        println!(
            "  {} --user admin --password <password> whoami",
            style("carangos").yellow()
        );
        println!("  {} access matrix", style("carangos").yellow());
    }

    Ok(())
}
