//! `carangos emp` command - employees and payroll

use clap::{Args, Subcommand};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::{self, format_money, truncate_str, Session};
use crate::cli::output;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::Module;
use crate::core::catalog::Department;
use crate::core::employees;
use crate::core::matricula::RandomDigits;
use crate::core::payroll::PayrollRun;
use crate::core::shortid::ShortIdIndex;
use crate::entities::employee::{Employee, EmployeeChanges, NewEmployee};

#[derive(Debug, Subcommand)]
pub enum EmpCommands {
    /// Hire an employee
    New(NewArgs),
    /// List employees
    List(ListArgs),
    /// Show one employee
    Show(ShowArgs),
    /// Change an employee's name, address or phone
    Edit(EditArgs),
    /// Remove an employee
    Rm(RmArgs),
    /// Compute payslips
    Payroll(PayrollArgs),
    /// List the job titles each department hires for
    Titles(TitlesArgs),
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// CPF (taxpayer number)
    #[arg(long)]
    pub cpf: Option<String>,

    /// RG (identity card number)
    #[arg(long)]
    pub rg: Option<String>,

    /// CTPS (work card number)
    #[arg(long)]
    pub ctps: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Number of dependent children
    #[arg(long, default_value_t = 0)]
    pub dependents: u32,

    /// Department: OPERACIONAL, ESTOQUE, FINANCEIRO or RH
    #[arg(long, short = 'd')]
    pub department: Option<Department>,

    /// Job title from the department's catalog
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Hourly rate in BRL (defaults to the title's base rate)
    #[arg(long)]
    pub rate: Option<f64>,

    /// Prompt for every field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only this department
    #[arg(long, short = 'd')]
    pub department: Option<Department>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Matrícula or @N from the last listing
    pub id: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Matrícula or @N from the last listing
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct RmArgs {
    /// Matrícula or @N from the last listing
    pub id: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct PayrollArgs {
    /// Only this department
    #[arg(long, short = 'd')]
    pub department: Option<Department>,

    /// Regular hours in the month (defaults to the configured payslip hours)
    #[arg(long)]
    pub hours: Option<f64>,

    /// Overtime hours in the month
    #[arg(long, default_value_t = 0.0)]
    pub overtime: f64,
}

#[derive(Debug, Args)]
pub struct TitlesArgs {
    /// Only this department
    #[arg(long, short = 'd')]
    pub department: Option<Department>,
}

#[derive(Debug, Serialize, Tabled)]
struct EmployeeRow {
    #[tabled(rename = "#")]
    #[serde(skip)]
    short_id: String,
    #[tabled(rename = "MATRÍCULA")]
    matricula: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DEPARTMENT")]
    department: Department,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "RATE")]
    #[serde(rename = "hourly_rate")]
    rate: String,
}

#[derive(Debug, Serialize, Tabled)]
struct PayslipRow {
    #[tabled(rename = "MATRÍCULA")]
    matricula: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DEPARTMENT")]
    department: Department,
    #[tabled(rename = "GROSS")]
    gross: String,
    #[tabled(rename = "OVERTIME")]
    overtime: String,
    #[tabled(rename = "IRPF")]
    irpf: String,
    #[tabled(rename = "NET")]
    net: String,
}

#[derive(Debug, Serialize, Tabled)]
struct TitleRow {
    #[tabled(rename = "DEPARTMENT")]
    department: Department,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "LEVEL")]
    level: u8,
    #[tabled(rename = "BASE RATE")]
    base_rate: String,
}

pub fn run(cmd: EmpCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EmpCommands::New(args) => run_new(args, global),
        EmpCommands::List(args) => run_list(args, global),
        EmpCommands::Show(args) => run_show(args, global),
        EmpCommands::Edit(args) => run_edit(args, global),
        EmpCommands::Rm(args) => run_rm(args, global),
        EmpCommands::Payroll(args) => run_payroll(args, global),
        EmpCommands::Titles(args) => run_titles(args, global),
    }
}

fn required(value: Option<String>, flag: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| miette::miette!("Missing --{} (or use -i for interactive mode)", flag))
}

/// Collect a hire request from the terminal
fn prompt_new_employee() -> Result<NewEmployee> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Full name")
        .interact_text()
        .into_diagnostic()?;
    let cpf: String = Input::with_theme(&theme)
        .with_prompt("CPF")
        .interact_text()
        .into_diagnostic()?;
    let rg: String = Input::with_theme(&theme)
        .with_prompt("RG")
        .interact_text()
        .into_diagnostic()?;
    let ctps: String = Input::with_theme(&theme)
        .with_prompt("CTPS (optional)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    let address: String = Input::with_theme(&theme)
        .with_prompt("Address")
        .interact_text()
        .into_diagnostic()?;
    let phone: String = Input::with_theme(&theme)
        .with_prompt("Phone")
        .interact_text()
        .into_diagnostic()?;
    let dependents: u32 = Input::with_theme(&theme)
        .with_prompt("Dependent children")
        .default(0)
        .interact_text()
        .into_diagnostic()?;

    let departments: Vec<&str> = Department::ALL.iter().map(|d| d.code()).collect();
    let dept_idx = Select::with_theme(&theme)
        .with_prompt("Department")
        .items(&departments)
        .default(0)
        .interact()
        .into_diagnostic()?;
    let department = Department::ALL[dept_idx];

    let titles: Vec<String> = department
        .titles()
        .iter()
        .map(|t| format!("{} ({}/h)", t.title, format_money(t.base_rate)))
        .collect();
    let title_idx = Select::with_theme(&theme)
        .with_prompt("Job title")
        .items(&titles)
        .default(0)
        .interact()
        .into_diagnostic()?;

    Ok(NewEmployee {
        name,
        cpf,
        rg,
        ctps: Some(ctps).filter(|c| !c.trim().is_empty()),
        address,
        phone,
        dependents,
        department,
        title: department.titles()[title_idx].title.to_string(),
        hourly_rate: None,
    })
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::HumanResources)?;

    let request = if args.interactive {
        prompt_new_employee()?
    } else {
        let department = args
            .department
            .ok_or_else(|| miette::miette!("Missing --department (or use -i for interactive mode)"))?;
        NewEmployee {
            name: required(args.name, "name")?,
            cpf: required(args.cpf, "cpf")?,
            rg: required(args.rg, "rg")?,
            ctps: args.ctps,
            address: args.address.unwrap_or_default(),
            phone: args.phone.unwrap_or_default(),
            dependents: args.dependents,
            department,
            title: required(args.title, "title")?,
            hourly_rate: args.rate,
        }
    };

    let employee = employees::hire(&session.dir, request, &mut RandomDigits::thread()).into_diagnostic()?;

    match global.format {
        OutputFormat::Id => println!("{}", employee.matricula),
        OutputFormat::Json => output::print_json(&employee)?,
        _ => {
            helpers::success(format!(
                "Hired {} with matrícula {}",
                style(&employee.name).yellow(),
                style(&employee.matricula).cyan()
            ));
            println!(
                "   {} · {} · {}/h",
                employee.department,
                employee.title,
                format_money(employee.hourly_rate)
            );
        }
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::HumanResources)?;
    let staff: Vec<Employee> = session.dir.load().into_diagnostic()?;
    let listed = employees::roster(&staff, args.department);

    if listed.is_empty() {
        println!("No employees found.");
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&session.dir);
    short_ids.rebuild::<Employee>(listed.iter().map(|e| e.matricula.clone()));
    if let Err(e) = short_ids.save(&session.dir) {
        tracing::warn!("failed to save short IDs: {}", e);
    }

    let rows: Vec<EmployeeRow> = listed
        .iter()
        .enumerate()
        .map(|(i, e)| EmployeeRow {
            short_id: format!("@{}", i + 1),
            matricula: e.matricula.clone(),
            name: truncate_str(&e.name, 30),
            department: e.department,
            title: e.title.clone(),
            rate: format!("{:.2}", e.hourly_rate),
        })
        .collect();

    if global.format == OutputFormat::Json {
        return output::print_json(&listed);
    }
    output::print_rows(&rows, global.format, |r| r.matricula.clone())
}

/// Resolve a matrícula or @N reference
fn resolve(session: &Session, reference: &str) -> Result<String> {
    ShortIdIndex::load(&session.dir)
        .resolve::<Employee>(reference)
        .ok_or_else(|| miette::miette!("No employee listed as '{}'. Run 'carangos emp list' first", reference))
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::HumanResources)?;
    let matricula = resolve(&session, &args.id)?;
    let staff: Vec<Employee> = session.dir.load().into_diagnostic()?;
    let emp = employees::find(&staff, &matricula).into_diagnostic()?;

    match global.format {
        OutputFormat::Json => return output::print_json(emp),
        OutputFormat::Id => {
            println!("{}", emp.matricula);
            return Ok(());
        }
        _ => {}
    }

    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("Matrícula").bold(), style(&emp.matricula).cyan());
    println!("{}: {}", style("Name").bold(), style(&emp.name).yellow());
    println!("{}: {}", style("Department").bold(), emp.department);
    println!("{}: {}", style("Title").bold(), emp.title);
    println!("{}: {}/h", style("Hourly rate").bold(), format_money(emp.hourly_rate));
    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("CPF").bold(), emp.cpf);
    println!("{}: {}", style("RG").bold(), emp.rg);
    println!("{}: {}", style("CTPS").bold(), output::or_dash(&emp.ctps));
    println!("{}: {}", style("Address").bold(), emp.address);
    println!("{}: {}", style("Phone").bold(), emp.phone);
    println!("{}: {}", style("Dependents").bold(), emp.dependents);
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}",
        style("Hired").dim(),
        emp.created.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::HumanResources)?;
    let matricula = resolve(&session, &args.id)?;

    let changes = EmployeeChanges {
        name: args.name,
        address: args.address,
        phone: args.phone,
    };
    if changes.is_empty() {
        miette::bail!("Nothing to change. Pass --name, --address or --phone");
    }

    let (emp, changed) = employees::edit(&session.dir, &matricula, &changes).into_diagnostic()?;
    if changed {
        helpers::success(format!("Updated {} ({})", emp.name, emp.matricula));
    } else {
        println!("No changes for {} ({})", emp.name, emp.matricula);
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::HumanResources)?;
    let matricula = resolve(&session, &args.id)?;

    let staff: Vec<Employee> = session.dir.load().into_diagnostic()?;
    let emp = employees::find(&staff, &matricula).into_diagnostic()?;
    let prompt = format!("Remove {} ({})?", emp.name, emp.matricula);
    if !helpers::confirm(&prompt, args.yes)? {
        return Ok(());
    }

    let removed = employees::dismiss(&session.dir, &matricula).into_diagnostic()?;
    helpers::success(format!("Removed {} ({})", removed.name, removed.matricula));
    Ok(())
}

fn run_payroll(args: PayrollArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::HumanResources)?;
    let staff: Vec<Employee> = session.dir.load().into_diagnostic()?;
    let selected = employees::roster(&staff, args.department);

    if selected.is_empty() {
        println!("No employees found.");
        return Ok(());
    }

    let hours = args.hours.unwrap_or(session.config.payroll.payslip_hours);
    let run = PayrollRun::compute(selected, hours, args.overtime);

    if global.format == OutputFormat::Json {
        return output::print_json(&run);
    }

    let rows: Vec<PayslipRow> = run
        .payslips
        .iter()
        .map(|p| PayslipRow {
            matricula: p.matricula.clone(),
            name: truncate_str(&p.name, 24),
            department: p.department,
            gross: format_money(p.gross),
            overtime: format_money(p.overtime_pay),
            irpf: format_money(p.irpf),
            net: format_money(p.net),
        })
        .collect();
    output::print_rows(&rows, global.format, |r| r.matricula.clone())?;

    if matches!(global.format, OutputFormat::Auto | OutputFormat::Table) {
        println!(
            "{} {}h regular, {}h overtime",
            style("Hours:").dim(),
            hours,
            args.overtime
        );
        for (dept, totals) in &run.by_department {
            println!(
                "  {:<12} {:>3} employees  gross {:>16}  net {:>16}",
                dept.code(),
                totals.headcount,
                format_money(totals.gross),
                format_money(totals.net)
            );
        }
        println!(
            "{} {} employees  gross {}  IRPF {}  net {}",
            style("Total:").bold(),
            run.totals.headcount,
            style(format_money(run.totals.gross)).yellow(),
            format_money(run.totals.irpf),
            style(format_money(run.totals.net)).green()
        );
    }
    Ok(())
}

fn run_titles(args: TitlesArgs, global: &GlobalOpts) -> Result<()> {
    // The catalog is static configuration, readable by anyone logged in
    Session::login(global)?;

    let rows: Vec<TitleRow> = Department::ALL
        .into_iter()
        .filter(|d| args.department.map_or(true, |only| only == *d))
        .flat_map(|d| {
            d.titles().iter().map(move |t| TitleRow {
                department: d,
                title: t.title.to_string(),
                level: t.level,
                base_rate: format!("{:.2}", t.base_rate),
            })
        })
        .collect();
    output::print_rows(&rows, global.format, |r| r.title.clone())
}
