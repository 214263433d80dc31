//! `carangos fin` command - expenses, utilities and cost reports

use clap::{Args, Subcommand};
use console::style;
use miette::{bail, IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::{self, format_money, Session};
use crate::cli::output;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::Module;
use crate::core::finance::{self, CostBreakdown, PlantReport, UtilityCosts};
use crate::core::inventory;
use crate::core::production::WeeklyStats;
use crate::core::store::StoreError;
use crate::entities::employee::Employee;
use crate::entities::expense::{Expense, ExpenseKind};
use crate::entities::product::Product;
use crate::entities::production::ProductionEntry;

#[derive(Debug, Subcommand)]
pub enum FinCommands {
    /// Fixed monthly expenses
    #[command(subcommand)]
    Expenses(ExpenseCommands),
    /// Monthly water and power cost for the current headcount
    Utilities(DaysArgs),
    /// Monthly salary cost at the configured hours
    Salaries,
    /// Utilities plus salaries
    Report(DaysArgs),
    /// Production cost, cost per car and suggested sale price
    Cost,
}

#[derive(Debug, Subcommand)]
pub enum ExpenseCommands {
    /// Set one or more expenses
    Set(SetArgs),
    /// Show the current expenses
    Show,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(long)]
    pub water: Option<f64>,

    #[arg(long)]
    pub power: Option<f64>,

    #[arg(long)]
    pub salaries: Option<f64>,

    #[arg(long)]
    pub taxes: Option<f64>,
}

#[derive(Debug, Args)]
pub struct DaysArgs {
    /// Operating days in the month (defaults to the configured value)
    #[arg(long)]
    pub days: Option<u32>,
}

#[derive(Debug, Serialize, Tabled)]
struct ExpenseRow {
    #[tabled(rename = "EXPENSE")]
    kind: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

pub fn run(cmd: FinCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        FinCommands::Expenses(ExpenseCommands::Set(args)) => run_expenses_set(args, global),
        FinCommands::Expenses(ExpenseCommands::Show) => run_expenses_show(global),
        FinCommands::Utilities(args) => run_utilities(args, global),
        FinCommands::Salaries => run_salaries(global),
        FinCommands::Report(args) => run_report(args, global),
        FinCommands::Cost => run_cost(global),
    }
}

fn run_expenses_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let changes: Vec<(ExpenseKind, f64)> = [
        (ExpenseKind::Agua, args.water),
        (ExpenseKind::Luz, args.power),
        (ExpenseKind::Salarios, args.salaries),
        (ExpenseKind::Impostos, args.taxes),
    ]
    .into_iter()
    .filter_map(|(kind, value)| value.map(|v| (kind, v)))
    .collect();

    if changes.is_empty() {
        bail!("Nothing to change. Pass at least one of --water, --power, --salaries, --taxes");
    }
    if let Some((kind, value)) = changes.iter().find(|(_, v)| v.is_nan() || *v < 0.0) {
        bail!("Invalid value for {}: {}", kind, value);
    }

    let session = Session::for_module(global, Module::Finance)?;
    session
        .dir
        .update(|expenses: &mut Vec<Expense>| {
            for (kind, value) in &changes {
                finance::set_expense(expenses, *kind, *value);
            }
            Ok::<_, StoreError>(())
        })
        .into_diagnostic()?;

    for (kind, value) in &changes {
        helpers::success(format!("{} set to {}", kind, format_money(*value)));
    }
    Ok(())
}

fn run_expenses_show(global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Finance)?;
    let expenses: Vec<Expense> = session.dir.load().into_diagnostic()?;

    if global.format == OutputFormat::Json {
        return output::print_json(&expenses);
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            kind: e.kind.to_string(),
            value: format_money(e.value),
        })
        .collect();
    output::print_rows(&rows, global.format, |r| r.kind.clone())?;

    if matches!(global.format, OutputFormat::Auto | OutputFormat::Table) {
        println!(
            "{} {}",
            style("Total:").bold(),
            format_money(finance::fixed_expenses(&expenses))
        );
    }
    Ok(())
}

fn print_utilities(utilities: &UtilityCosts) {
    println!(
        "  Period:         {} days, {} workers",
        utilities.days, utilities.workers
    );
    println!("  Water:          {}", format_money(utilities.water));
    println!("  Generator:      {}", format_money(utilities.generator));
    println!("  Grid:           {}", format_money(utilities.grid));
    println!("  Power:          {}", format_money(utilities.power()));
}

fn run_utilities(args: DaysArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Finance)?;
    let employees: Vec<Employee> = session.dir.load().into_diagnostic()?;
    let days = args.days.unwrap_or(session.config.operating_days);
    let utilities = UtilityCosts::compute(days, employees.len());

    if global.format == OutputFormat::Json {
        return output::print_json(&utilities);
    }

    helpers::heading("Utility costs");
    print_utilities(&utilities);
    println!(
        "  {}          {}",
        style("Total:").bold(),
        style(format_money(utilities.total())).yellow()
    );
    Ok(())
}

fn run_salaries(global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Finance)?;
    let employees: Vec<Employee> = session.dir.load().into_diagnostic()?;
    let run = finance::salary_costs(&employees, &session.config);

    if global.format == OutputFormat::Json {
        return output::print_json(&run);
    }

    helpers::heading("Salary costs");
    println!(
        "  Hours:          {} regular, {} overtime",
        session.config.payroll.regular_hours, session.config.payroll.overtime_hours
    );
    for (department, totals) in &run.by_department {
        println!(
            "  {:<32} {:>3} staff  {}",
            department.to_string(),
            totals.headcount,
            format_money(totals.gross)
        );
    }
    println!();
    println!("  Gross:          {}", format_money(run.totals.gross));
    println!("  IRPF:           {}", format_money(run.totals.irpf));
    println!(
        "  {}            {}",
        style("Net:").bold(),
        style(format_money(run.totals.net)).yellow()
    );
    Ok(())
}

fn run_report(args: DaysArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Finance)?;
    let employees: Vec<Employee> = session.dir.load().into_diagnostic()?;
    let days = args.days.unwrap_or(session.config.operating_days);
    let report = PlantReport::compute(&employees, days, &session.config);

    match global.format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Id => {
            println!("{:.2}", report.total);
            Ok(())
        }
        _ => {
            helpers::heading("Monthly operating cost");
            print_utilities(&report.utilities);
            println!("  Salaries:       {}", format_money(report.salaries.gross));
            println!(
                "  {}          {}",
                style("Total:").bold(),
                style(format_money(report.total)).yellow()
            );
            Ok(())
        }
    }
}

/// Unit economics from expenses, stock and the week's production
pub fn cost_breakdown(session: &Session) -> Result<CostBreakdown> {
    let expenses: Vec<Expense> = session.dir.load().into_diagnostic()?;
    let products: Vec<Product> = session.dir.load().into_diagnostic()?;
    let entries: Vec<ProductionEntry> = session.dir.load().into_diagnostic()?;

    Ok(CostBreakdown::compute(
        finance::fixed_expenses(&expenses),
        inventory::inputs_cost(&products),
        WeeklyStats::compute(&entries).total,
        session.config.sale_markup,
    ))
}

fn run_cost(global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Finance)?;
    let cost = cost_breakdown(&session)?;

    match global.format {
        OutputFormat::Json => output::print_json(&cost),
        OutputFormat::Id => {
            println!("{:.2}", cost.sale_price);
            Ok(())
        }
        _ => {
            helpers::heading("Production cost");
            println!("  Fixed expenses: {}", format_money(cost.fixed_expenses));
            println!("  Inputs:         {}", format_money(cost.inputs));
            println!("  Total:          {}", format_money(cost.total));
            println!("  Cars produced:  {}", cost.cars);
            if cost.cars == 0 {
                println!(
                    "  {}",
                    style("No production recorded this week; per-car figures are zero").yellow()
                );
            }
            println!("  Cost per car:   {}", format_money(cost.cost_per_car));
            println!(
                "  {}     {}",
                style("Sale price:").bold(),
                style(format_money(cost.sale_price)).green()
            );
            Ok(())
        }
    }
}
