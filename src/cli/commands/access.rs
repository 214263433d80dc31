//! `carangos access` command - inspect the role allow-lists
//!
//! Diagnostic only: nothing here needs a login.

use clap::{Args, Subcommand};
use console::style;
use miette::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::output;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::{self, AccessPolicy, Module};

#[derive(Debug, Subcommand)]
pub enum AccessCommands {
    /// Decide whether a role may use a module
    Check(CheckArgs),
    /// Print every known role against every module
    Matrix,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Role tag (e.g., gerente_rh)
    pub role: String,

    /// Module: production, inventory, finance, hr or users
    pub module: Module,
}

#[derive(Debug, Serialize, Tabled)]
struct MatrixRow {
    #[tabled(rename = "ROLE")]
    role: String,
    #[tabled(rename = "PRODUCTION")]
    production: String,
    #[tabled(rename = "INVENTORY")]
    inventory: String,
    #[tabled(rename = "FINANCE")]
    finance: String,
    #[tabled(rename = "HR")]
    hr: String,
    #[tabled(rename = "USERS")]
    users: String,
}

pub fn run(cmd: AccessCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AccessCommands::Check(args) => run_check(args, global),
        AccessCommands::Matrix => run_matrix(global),
    }
}

fn run_check(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let allowed = access::is_authorized(&args.role, args.module);

    match global.format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Decision<'a> {
                role: &'a str,
                module: Module,
                allowed: bool,
            }
            output::print_json(&Decision {
                role: &args.role,
                module: args.module,
                allowed,
            })
        }
        OutputFormat::Id => {
            println!("{}", if allowed { "allowed" } else { "denied" });
            Ok(())
        }
        _ => {
            let verdict = if allowed {
                style("allowed").green()
            } else {
                style("denied").red()
            };
            println!("{} on {}: {}", args.role, args.module.label(), verdict);
            Ok(())
        }
    }
}

fn mark(allowed: bool) -> String {
    if allowed { "✓" } else { "" }.to_string()
}

fn run_matrix(global: &GlobalOpts) -> Result<()> {
    let policy = AccessPolicy::shared();
    let rows: Vec<MatrixRow> = policy
        .known_roles()
        .into_iter()
        .map(|role| MatrixRow {
            role: role.to_string(),
            production: mark(policy.is_authorized(role, Module::Production)),
            inventory: mark(policy.is_authorized(role, Module::Inventory)),
            finance: mark(policy.is_authorized(role, Module::Finance)),
            hr: mark(policy.is_authorized(role, Module::HumanResources)),
            users: mark(policy.is_authorized(role, Module::UserManagement)),
        })
        .collect();

    output::print_rows(&rows, global.format, |r| r.role.clone())
}
