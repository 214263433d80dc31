//! `carangos dashboard` command - landing summary after login

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::commands::fin;
use crate::cli::helpers::{self, format_money, Session};
use crate::cli::output;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::{self, AccessPolicy, Module};
use crate::entities::employee::Employee;

#[derive(Debug, Serialize)]
struct Overview {
    weekly_production: u64,
    total_cost: f64,
    sale_price: f64,
    headcount: usize,
}

#[derive(Debug, Serialize)]
struct Dashboard<'a> {
    username: &'a str,
    role: &'a str,
    modules: Vec<Module>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<Overview>,
}

fn overview(session: &Session) -> Result<Overview> {
    let cost = fin::cost_breakdown(session)?;
    let employees: Vec<Employee> = session.dir.load().into_diagnostic()?;
    Ok(Overview {
        weekly_production: cost.cars,
        total_cost: cost.total,
        sale_price: cost.sale_price,
        headcount: employees.len(),
    })
}

pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = Session::login(global)?;
    let principal = &session.principal;

    let overview = if access::is_global(&principal.role) {
        Some(overview(&session)?)
    } else {
        None
    };
    let dashboard = Dashboard {
        username: &principal.username,
        role: &principal.role,
        modules: AccessPolicy::shared().modules_for(&principal.role),
        overview,
    };

    if global.format == OutputFormat::Json {
        return output::print_json(&dashboard);
    }

    helpers::heading(&format!("Carangos S/A - {}", dashboard.username));
    println!("  Role: {}", style(dashboard.role).yellow());
    println!();

    if let Some(o) = &dashboard.overview {
        println!("  Weekly production:  {} cars", style(o.weekly_production).cyan());
        println!("  Total cost:         {}", format_money(o.total_cost));
        println!("  Suggested price:    {}", style(format_money(o.sale_price)).green());
        println!("  Employees:          {}", o.headcount);
        return Ok(());
    }

    if dashboard.modules.is_empty() {
        println!("  {}", style("Your role has no module access.").dim());
        return Ok(());
    }
    println!("  Your modules:");
    for module in &dashboard.modules {
        println!("  • {} ({})", module.label(), module.as_str());
    }
    Ok(())
}
