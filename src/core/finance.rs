//! Plant cost calculations
//!
//! Utility costs scale with headcount: the plant runs 24 hours a day, water
//! is billed per worker-hour, and power is split between 8 generator hours
//! and 16 grid hours a day.

use serde::Serialize;

use crate::core::config::Config;
use crate::core::payroll::{PayrollRun, PayrollTotals};
use crate::entities::employee::Employee;
use crate::entities::expense::{Expense, ExpenseKind};

pub const WATER_RATE: f64 = 1.50;
pub const GENERATOR_RATE: f64 = 1.60;
pub const GRID_RATE: f64 = 2.40;

const PLANT_HOURS_PER_DAY: f64 = 24.0;
const GENERATOR_HOURS_PER_DAY: f64 = 8.0;
const GRID_HOURS_PER_DAY: f64 = 16.0;

/// Zero-valued entries for every expense kind
pub fn default_expenses() -> Vec<Expense> {
    ExpenseKind::ALL
        .into_iter()
        .map(|kind| Expense { kind, value: 0.0 })
        .collect()
}

/// Set one expense, adding it when missing
pub fn set_expense(expenses: &mut Vec<Expense>, kind: ExpenseKind, value: f64) {
    match expenses.iter_mut().find(|e| e.kind == kind) {
        Some(e) => e.value = value,
        None => expenses.push(Expense { kind, value }),
    }
}

/// Sum of the fixed monthly expenses
pub fn fixed_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.value).sum()
}

/// Monthly water and power costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilityCosts {
    pub days: u32,
    pub workers: usize,
    pub water: f64,
    pub generator: f64,
    pub grid: f64,
}

impl UtilityCosts {
    pub fn compute(days: u32, workers: usize) -> Self {
        let worker_days = f64::from(days) * workers as f64;
        Self {
            days,
            workers,
            water: PLANT_HOURS_PER_DAY * worker_days * WATER_RATE,
            generator: GENERATOR_HOURS_PER_DAY * worker_days * GENERATOR_RATE,
            grid: GRID_HOURS_PER_DAY * worker_days * GRID_RATE,
        }
    }

    pub fn power(&self) -> f64 {
        self.generator + self.grid
    }

    pub fn total(&self) -> f64 {
        self.water + self.power()
    }
}

/// Monthly payroll at the configured finance hours
pub fn salary_costs(employees: &[Employee], config: &Config) -> PayrollRun {
    PayrollRun::compute(
        employees,
        config.payroll.regular_hours,
        config.payroll.overtime_hours,
    )
}

/// Monthly operating cost report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlantReport {
    pub utilities: UtilityCosts,
    pub salaries: PayrollTotals,
    /// Water, power and gross salaries
    pub total: f64,
}

impl PlantReport {
    pub fn compute(employees: &[Employee], days: u32, config: &Config) -> Self {
        let utilities = UtilityCosts::compute(days, employees.len());
        let salaries = salary_costs(employees, config).totals;
        Self {
            total: utilities.total() + salaries.gross,
            utilities,
            salaries,
        }
    }
}

/// Fixed expenses plus inputs
pub fn production_cost(fixed: f64, inputs: f64) -> f64 {
    fixed + inputs
}

/// Cost of one car; zero when nothing was produced
pub fn cost_per_car(total_cost: f64, cars: u64) -> f64 {
    if cars == 0 {
        return 0.0;
    }
    total_cost / cars as f64
}

pub fn sale_price(unit_cost: f64, markup: f64) -> f64 {
    unit_cost * markup
}

/// Unit economics for the week's production
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub fixed_expenses: f64,
    pub inputs: f64,
    pub total: f64,
    pub cars: u64,
    pub cost_per_car: f64,
    pub sale_price: f64,
}

impl CostBreakdown {
    pub fn compute(fixed_expenses: f64, inputs: f64, cars: u64, markup: f64) -> Self {
        let total = production_cost(fixed_expenses, inputs);
        let unit = cost_per_car(total, cars);
        Self {
            fixed_expenses,
            inputs,
            total,
            cars,
            cost_per_car: unit,
            sale_price: sale_price(unit, markup),
        }
    }
}
