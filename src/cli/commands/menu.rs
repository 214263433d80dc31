//! `carangos menu` command - interactive module menu

use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::fin;
use crate::cli::helpers::{format_money, Session};
use crate::cli::GlobalOpts;
use crate::core::access::{self, Module};
use crate::core::inventory;
use crate::core::production::WeeklyStats;
use crate::entities::employee::Employee;
use crate::entities::product::{Order, Product};
use crate::entities::production::ProductionEntry;
use crate::entities::user::UserAccount;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = Session::login(global)?;
    let theme = ColorfulTheme::default();

    let mut items: Vec<&str> = Module::ALL.iter().map(|m| m.label()).collect();
    items.push("Exit");

    println!(
        "Logged in as {} ({})",
        style(&session.principal.username).cyan(),
        style(&session.principal.role).yellow()
    );

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Module")
            .items(&items)
            .default(0)
            .interact_opt()
            .into_diagnostic()?;

        let Some(module) = choice.and_then(|i| Module::ALL.get(i).copied()) else {
            break;
        };

        if !access::is_authorized(&session.principal.role, module) {
            tracing::info!(role = %session.principal.role, %module, "menu access denied");
            println!(
                "{}",
                style(format!(
                    "Access denied: role '{}' cannot use {}",
                    session.principal.role,
                    module.label()
                ))
                .red()
            );
            continue;
        }

        show_summary(&session, module)?;
    }
    Ok(())
}

/// One-screen summary of a module, pointing at its subcommand
fn show_summary(session: &Session, module: Module) -> Result<()> {
    println!();
    println!("{}", style(module.label()).bold().underlined());
    match module {
        Module::Production => {
            let entries: Vec<ProductionEntry> = session.dir.load().into_diagnostic()?;
            let stats = WeeklyStats::compute(&entries);
            println!("  Week total:     {} units", stats.total);
            println!("  Daily average:  {:.1} units", stats.daily_average);
            println!("  Records:        {}", entries.len());
            println!("  See `carangos prod --help`");
        }
        Module::Inventory => {
            let products: Vec<Product> = session.dir.load().into_diagnostic()?;
            let orders: Vec<Order> = session.dir.load().into_diagnostic()?;
            println!("  Products:       {}", products.len());
            println!(
                "  Stock value:    {}",
                format_money(inventory::inputs_cost(&products))
            );
            println!("  Orders:         {}", orders.len());
            println!("  See `carangos stock --help`");
        }
        Module::Finance => {
            let cost = fin::cost_breakdown(session)?;
            println!("  Fixed expenses: {}", format_money(cost.fixed_expenses));
            println!("  Total cost:     {}", format_money(cost.total));
            println!("  Sale price:     {}", format_money(cost.sale_price));
            println!("  See `carangos fin --help`");
        }
        Module::HumanResources => {
            let employees: Vec<Employee> = session.dir.load().into_diagnostic()?;
            println!("  Employees:      {}", employees.len());
            println!("  See `carangos emp --help`");
        }
        Module::UserManagement => {
            let accounts: Vec<UserAccount> = session.dir.load().into_diagnostic()?;
            println!("  Accounts:       {}", accounts.len());
            println!("  See `carangos users --help`");
        }
    }
    println!();
    Ok(())
}
