//! `carangos prod` command - production records and reports

use chrono::Utc;
use clap::{Args, Subcommand};
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::{self, Session};
use crate::cli::output;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::Module;
use crate::core::production::{PerformanceReport, Target, Tier, WeeklyStats};
use crate::core::store::StoreError;
use crate::entities::production::{ProductionEntry, Shift, Weekday};

#[derive(Debug, Subcommand)]
pub enum ProdCommands {
    /// Record units assembled in one shift
    Record(RecordArgs),
    /// Weekly totals and averages
    Stats,
    /// Projection and comparison with the monthly target
    Report(ReportArgs),
    /// Clear the week's records
    Reset(ResetArgs),
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Day of the week (segunda .. domingo)
    #[arg(long)]
    pub day: Weekday,

    /// Shift (manha, tarde, noite)
    #[arg(long)]
    pub shift: Shift,

    /// Units assembled
    #[arg(long, short = 'q')]
    pub quantity: u32,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Monthly production target (defaults to the configured target)
    #[arg(long)]
    pub target: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ShiftRow {
    #[tabled(rename = "SHIFT")]
    shift: Shift,
    #[tabled(rename = "TOTAL")]
    total: u64,
    #[tabled(rename = "PER DAY")]
    average: String,
}

pub fn run(cmd: ProdCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProdCommands::Record(args) => run_record(args, global),
        ProdCommands::Stats => run_stats(global),
        ProdCommands::Report(args) => run_report(args, global),
        ProdCommands::Reset(args) => run_reset(args, global),
    }
}

fn run_record(args: RecordArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Production)?;
    let entry = ProductionEntry {
        day: args.day,
        shift: args.shift,
        quantity: args.quantity,
        recorded: Utc::now(),
    };

    session
        .dir
        .update(|entries: &mut Vec<ProductionEntry>| {
            entries.push(entry.clone());
            Ok::<_, StoreError>(())
        })
        .into_diagnostic()?;

    helpers::success(format!(
        "Recorded {} units on {} ({})",
        entry.quantity, entry.day, entry.shift
    ));
    Ok(())
}

fn shift_rows(stats: &WeeklyStats) -> Vec<ShiftRow> {
    Shift::ALL
        .into_iter()
        .map(|shift| ShiftRow {
            shift,
            total: stats.shift_totals.get(&shift).copied().unwrap_or(0),
            average: format!("{:.1}", stats.shift_averages.get(&shift).copied().unwrap_or(0.0)),
        })
        .collect()
}

fn run_stats(global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Production)?;
    let entries: Vec<ProductionEntry> = session.dir.load().into_diagnostic()?;
    let stats = WeeklyStats::compute(&entries);

    match global.format {
        OutputFormat::Json => output::print_json(&stats),
        OutputFormat::Id => {
            println!("{}", stats.total);
            Ok(())
        }
        OutputFormat::Csv => output::print_csv(&shift_rows(&stats)),
        OutputFormat::Auto | OutputFormat::Table => {
            helpers::heading("Weekly production");
            println!("  Total:         {} units", style(stats.total).yellow());
            println!("  Daily average: {:.1} units", stats.daily_average);
            println!();
            output::print_table(&shift_rows(&stats));
            Ok(())
        }
    }
}

fn run_report(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Production)?;
    let entries: Vec<ProductionEntry> = session.dir.load().into_diagnostic()?;

    let fallback = session.config.production_target;
    let target = Target::from_monthly(args.target.unwrap_or(fallback), fallback);
    let report = PerformanceReport::compute(&entries, target);

    if global.format == OutputFormat::Json {
        return output::print_json(&report);
    }

    helpers::heading("Production report");
    println!("  Weekly total:   {} units", style(report.stats.total).yellow());
    println!("  Daily average:  {:.1} units", report.stats.daily_average);
    println!();
    println!("{}", style("Projection").bold());
    println!("  Monthly:        {:.0} units", report.projection.monthly);
    println!("  Annual:         {:.0} units", report.projection.annual);
    println!();
    println!("{}", style("Shifts").bold());
    for shift in Shift::ALL {
        let avg = report.stats.shift_averages.get(&shift).copied().unwrap_or(0.0);
        let best = if shift == report.best_shift {
            style(" (best)").green().to_string()
        } else {
            String::new()
        };
        println!("  {:<6} {:>8.1} units/day{}", shift.to_string(), avg, best);
    }
    println!();
    println!("{}", style("Target").bold());
    println!(
        "  Weekly {:.1} · Monthly {:.1} · Annual {:.1}",
        report.target.weekly, report.target.monthly, report.target.annual
    );
    let status = if report.above_target() {
        style("ABOVE TARGET").green()
    } else {
        style("BELOW TARGET").red()
    };
    println!("  Status:         {}", status);
    println!("  Efficiency:     {:.1}% of target", report.efficiency);
    println!("  Difference:     {:+.1} units", report.difference);
    println!();
    let recommendation = match report.tier {
        Tier::OnTarget => style(report.tier.recommendation()).green(),
        Tier::NearTarget => style(report.tier.recommendation()).yellow(),
        Tier::Critical => style(report.tier.recommendation()).red(),
    };
    println!("  {}", recommendation);
    println!(
        "  Shift '{}' has the lowest output; look for bottlenecks there",
        report.worst_shift
    );
    Ok(())
}

fn run_reset(args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Production)?;
    if !helpers::confirm("Clear every production record of the week?", args.yes)? {
        return Ok(());
    }

    let cleared = session
        .dir
        .update(|entries: &mut Vec<ProductionEntry>| {
            let n = entries.len();
            entries.clear();
            Ok::<_, StoreError>(n)
        })
        .into_diagnostic()?;
    helpers::success(format!("Cleared {} production records", cleared));
    Ok(())
}
