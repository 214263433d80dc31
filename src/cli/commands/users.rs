//! `carangos users` and `carangos whoami` - login accounts

use clap::{Args, Subcommand};
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::{self, Session};
use crate::cli::output;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::{AccessPolicy, Module};
use crate::core::auth::{self, AuthError};
use crate::core::shortid::ShortIdIndex;
use crate::entities::user::UserAccount;

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// List login accounts
    List,
    /// Create a login account
    Add(AddArgs),
    /// Delete a login account
    Remove(RemoveArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Initial password
    #[arg(long = "new-password")]
    pub new_password: String,

    /// Role tag (e.g., gerente_rh, func_estoque)
    #[arg(long)]
    pub role: String,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Username (or @N from the last listing)
    pub username: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    #[tabled(rename = "#")]
    #[serde(skip)]
    short_id: String,
    #[tabled(rename = "USERNAME")]
    username: String,
    #[tabled(rename = "ROLE")]
    role: String,
    #[tabled(rename = "MODULES")]
    modules: String,
}

pub fn run(cmd: UserCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        UserCommands::List => run_list(global),
        UserCommands::Add(args) => run_add(args, global),
        UserCommands::Remove(args) => run_remove(args, global),
    }
}

fn module_names(modules: &[Module]) -> String {
    if modules.is_empty() {
        return "-".to_string();
    }
    modules
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::UserManagement)?;
    let mut accounts: Vec<UserAccount> = session.dir.load().into_diagnostic()?;
    accounts.sort_by(|a, b| a.username.cmp(&b.username));

    if accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&session.dir);
    short_ids.rebuild::<UserAccount>(accounts.iter().map(|a| a.username.clone()));
    if let Err(e) = short_ids.save(&session.dir) {
        tracing::warn!("failed to save short IDs: {}", e);
    }

    let policy = AccessPolicy::shared();
    let rows: Vec<UserRow> = accounts
        .iter()
        .enumerate()
        .map(|(i, a)| UserRow {
            short_id: format!("@{}", i + 1),
            username: a.username.clone(),
            role: a.role.clone(),
            modules: module_names(&policy.modules_for(&a.role)),
        })
        .collect();

    output::print_rows(&rows, global.format, |r| r.username.clone())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::UserManagement)?;

    let account = session
        .dir
        .update(|accounts: &mut Vec<UserAccount>| {
            auth::create_account(
                accounts,
                &args.username,
                &args.new_password,
                &args.role,
                &mut rand::rng(),
            )
        })
        .into_diagnostic()?;

    let modules = AccessPolicy::shared().modules_for(&account.role);
    helpers::success(format!(
        "Created account {} with role {}",
        style(&account.username).cyan(),
        style(&account.role).yellow()
    ));
    if modules.is_empty() {
        println!(
            "{}",
            style("Warning: this role is not on any allow-list and reaches no module").yellow()
        );
    } else {
        println!("Modules: {}", module_names(&modules));
    }
    Ok(())
}

fn run_remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::UserManagement)?;
    let username = ShortIdIndex::load(&session.dir)
        .resolve::<UserAccount>(&args.username)
        .ok_or_else(|| miette::miette!("No account listed as '{}'", args.username))?;

    if username == session.principal.username {
        miette::bail!("Refusing to remove the account you are logged in with");
    }

    let accounts: Vec<UserAccount> = session.dir.load().into_diagnostic()?;
    if !accounts.iter().any(|a| a.username == username) {
        return Err(AuthError::UnknownUser(username)).into_diagnostic();
    }

    if !helpers::confirm(&format!("Remove account '{}'?", username), args.yes)? {
        return Ok(());
    }

    let removed = session
        .dir
        .update(|accounts: &mut Vec<UserAccount>| auth::remove_account(accounts, &username))
        .into_diagnostic()?;
    helpers::success(format!("Removed account {}", removed.username));
    Ok(())
}

/// `carangos whoami`
pub fn run_whoami(global: &GlobalOpts) -> Result<()> {
    let session = Session::login(global)?;
    let principal = &session.principal;
    let modules = AccessPolicy::shared().modules_for(&principal.role);

    if global.format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Whoami<'a> {
            username: &'a str,
            role: &'a str,
            modules: &'a [Module],
        }
        return output::print_json(&Whoami {
            username: &principal.username,
            role: &principal.role,
            modules: &modules,
        });
    }

    println!("{}: {}", style("Username").bold(), style(&principal.username).cyan());
    println!("{}: {}", style("Role").bold(), style(&principal.role).yellow());
    println!("{}:", style("Modules").bold());
    if modules.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for module in modules {
        println!("  • {} ({})", module.label(), module.as_str());
    }
    Ok(())
}
