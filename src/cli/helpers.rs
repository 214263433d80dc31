//! Shared helper functions for CLI commands
//!
//! Opening the data directory, logging in and gating commands on module
//! access all go through here so every command reports them the same way.

use console::style;
use miette::{bail, IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::access::Module;
use crate::core::auth::{self, AuthError, Principal};
use crate::core::config::Config;
use crate::core::store::DataDir;
use crate::entities::user::UserAccount;

/// An authenticated command context
#[derive(Debug, Clone)]
pub struct Session {
    pub dir: DataDir,
    pub principal: Principal,
    pub config: Config,
}

impl Session {
    /// Open the data directory and log in
    pub fn login(global: &GlobalOpts) -> Result<Self> {
        let dir = open_data_dir(global)?;
        let principal = authenticate(&dir, global)?;
        let config = Config::load(dir.root()).into_diagnostic()?;
        Ok(Self {
            dir,
            principal,
            config,
        })
    }

    /// Log in and require access to `module`
    pub fn for_module(global: &GlobalOpts, module: Module) -> Result<Self> {
        let session = Self::login(global)?;
        require_access(&session.principal, module)?;
        Ok(session)
    }
}

/// Open an initialized data directory
pub fn open_data_dir(global: &GlobalOpts) -> Result<DataDir> {
    DataDir::open(&global.data_dir).into_diagnostic()
}

/// Log in with the global credentials
pub fn authenticate(dir: &DataDir, global: &GlobalOpts) -> Result<Principal> {
    let (Some(user), Some(password)) = (global.user.as_deref(), global.password.as_deref()) else {
        return Err(AuthError::MissingCredentials).into_diagnostic();
    };
    let accounts: Vec<UserAccount> = dir.load().into_diagnostic()?;
    auth::login(&accounts, user, password).into_diagnostic()
}

/// Fail with a denial message unless the principal may use `module`
pub fn require_access(principal: &Principal, module: Module) -> Result<()> {
    if principal.can_access(module) {
        return Ok(());
    }
    tracing::info!(user = %principal.username, role = %principal.role, %module, "access denied");
    bail!(
        "Access denied: role '{}' cannot use the {} module",
        principal.role,
        module.label()
    )
}

/// Format a BRL amount as `R$ 1.234,56`
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Ask a `[y/N]` question on stdin; `yes` skips the prompt
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    print!("{} [y/N] ", prompt);
    std::io::Write::flush(&mut std::io::stdout()).into_diagnostic()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).into_diagnostic()?;
    if input.trim().eq_ignore_ascii_case("y") {
        Ok(true)
    } else {
        println!("Aborted.");
        Ok(false)
    }
}

/// Print a success line
pub fn success(message: impl std::fmt::Display) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a section heading
pub fn heading(title: &str) {
    println!();
    println!("{}", style(title).bold());
    println!("{}", style("─".repeat(60)).dim());
}
