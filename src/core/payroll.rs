//! Payroll arithmetic
//!
//! Gross pay, overtime, the simplified IRPF (income tax) table and net pay,
//! plus payroll runs over a set of employees grouped by department.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::catalog::Department;
use crate::entities::employee::Employee;

/// Overtime premium (50% over the hourly rate)
pub const OVERTIME_MULTIPLIER: f64 = 1.5;

/// Title fragments that exclude overtime pay (case-insensitive)
const NO_OVERTIME_TITLES: &[&str] = &["gerente", "diretor"];

/// IRPF brackets: (upper bound, rate, deduction); the last applies above every bound
const IRPF_BRACKETS: &[(f64, f64, f64)] = &[
    (2259.20, 0.0, 0.0),
    (2826.65, 0.075, 169.44),
    (3751.05, 0.15, 381.44),
    (4664.68, 0.225, 662.77),
];
const IRPF_TOP_RATE: (f64, f64) = (0.275, 896.00);

/// Base pay for the regular hours
pub fn gross_pay(hours: f64, hourly_rate: f64) -> f64 {
    hours * hourly_rate
}

/// Whether a title earns overtime
pub fn earns_overtime(title: &str) -> bool {
    let lower = title.to_lowercase();
    !NO_OVERTIME_TITLES.iter().any(|t| lower.contains(t))
}

/// Overtime pay; zero for managers and directors
pub fn overtime_pay(hours: f64, hourly_rate: f64, title: &str) -> f64 {
    if !earns_overtime(title) {
        return 0.0;
    }
    hours * hourly_rate * OVERTIME_MULTIPLIER
}

/// Simplified monthly IRPF withholding on total gross pay
pub fn irpf(gross: f64) -> f64 {
    for &(limit, rate, deduction) in IRPF_BRACKETS {
        if gross <= limit {
            return gross * rate - deduction;
        }
    }
    let (rate, deduction) = IRPF_TOP_RATE;
    gross * rate - deduction
}

/// Net pay after IRPF
pub fn net_pay(gross: f64, irpf: f64) -> f64 {
    gross - irpf
}

/// One employee's payslip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payslip {
    pub matricula: String,
    pub name: String,
    pub department: Department,
    pub title: String,
    pub hourly_rate: f64,
    pub hours: f64,
    pub overtime_hours: f64,
    pub base_pay: f64,
    pub overtime_pay: f64,
    pub gross: f64,
    pub irpf: f64,
    pub net: f64,
}

impl Payslip {
    pub fn compute(employee: &Employee, hours: f64, overtime_hours: f64) -> Self {
        let base = gross_pay(hours, employee.hourly_rate);
        let extra = overtime_pay(overtime_hours, employee.hourly_rate, &employee.title);
        let gross = base + extra;
        let tax = irpf(gross);

        Self {
            matricula: employee.matricula.clone(),
            name: employee.name.clone(),
            department: employee.department,
            title: employee.title.clone(),
            hourly_rate: employee.hourly_rate,
            hours,
            overtime_hours,
            base_pay: base,
            overtime_pay: extra,
            gross,
            irpf: tax,
            net: net_pay(gross, tax),
        }
    }

    pub fn pays_irpf(&self) -> bool {
        self.irpf > 0.0
    }
}

/// Sums over a set of payslips
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PayrollTotals {
    pub headcount: usize,
    pub gross: f64,
    pub irpf: f64,
    pub net: f64,
}

impl PayrollTotals {
    fn add(&mut self, slip: &Payslip) {
        self.headcount += 1;
        self.gross += slip.gross;
        self.irpf += slip.irpf;
        self.net += slip.net;
    }
}

/// A payroll run: payslips sorted by department then name, with subtotals
#[derive(Debug, Clone, Default, Serialize)]
pub struct PayrollRun {
    pub payslips: Vec<Payslip>,
    pub by_department: BTreeMap<Department, PayrollTotals>,
    pub totals: PayrollTotals,
}

impl PayrollRun {
    pub fn compute<'a, I>(employees: I, hours: f64, overtime_hours: f64) -> Self
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        let mut payslips: Vec<Payslip> = employees
            .into_iter()
            .map(|e| Payslip::compute(e, hours, overtime_hours))
            .collect();
        payslips.sort_by(|a, b| a.department.cmp(&b.department).then_with(|| a.name.cmp(&b.name)));

        let mut run = PayrollRun::default();
        for slip in &payslips {
            run.by_department.entry(slip.department).or_default().add(slip);
            run.totals.add(slip);
        }
        run.payslips = payslips;
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn employee(name: &str, department: Department, title: &str, rate: f64) -> Employee {
        Employee {
            matricula: format!("{}", name.len()),
            name: name.to_string(),
            cpf: String::new(),
            rg: String::new(),
            ctps: None,
            address: String::new(),
            phone: String::new(),
            dependents: 0,
            department,
            title: title.to_string(),
            hourly_rate: rate,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_overtime_excluded_for_managers() {
        assert!(approx(overtime_pay(10.0, 8.0, "Operador de Máquinas"), 120.0));
        assert_eq!(overtime_pay(10.0, 15.0, "Gerente Financeiro"), 0.0);
        assert_eq!(overtime_pay(10.0, 15.0, "DIRETOR de Vendas"), 0.0);
        assert!(earns_overtime("Coordenador de RH"));
    }

    #[test]
    fn test_irpf_brackets() {
        assert_eq!(irpf(0.0), 0.0);
        assert_eq!(irpf(2259.20), 0.0);
        assert!(approx(irpf(2500.0), 2500.0 * 0.075 - 169.44));
        assert!(approx(irpf(3000.0), 3000.0 * 0.15 - 381.44));
        assert!(approx(irpf(4000.0), 4000.0 * 0.225 - 662.77));
        assert!(approx(irpf(10000.0), 10000.0 * 0.275 - 896.00));
    }

    #[test]
    fn test_payslip_for_line_worker() {
        let emp = employee("Ana", Department::Operacional, "Operador de Máquinas", 8.50);
        let slip = Payslip::compute(&emp, 220.0, 10.0);
        assert!(approx(slip.base_pay, 1870.0));
        assert!(approx(slip.overtime_pay, 127.5));
        assert!(approx(slip.gross, 1997.5));
        assert_eq!(slip.irpf, 0.0);
        assert!(!slip.pays_irpf());
        assert!(approx(slip.net, 1997.5));
    }

    #[test]
    fn test_payslip_for_manager_pays_tax() {
        let emp = employee("Bia", Department::Financeiro, "Gerente Financeiro", 15.0);
        let slip = Payslip::compute(&emp, 220.0, 10.0);
        assert!(approx(slip.gross, 3300.0));
        assert_eq!(slip.overtime_pay, 0.0);
        assert!(approx(slip.irpf, 3300.0 * 0.15 - 381.44));
        assert!(slip.pays_irpf());
        assert!(approx(slip.net, slip.gross - slip.irpf));
    }

    #[test]
    fn test_payroll_run_groups_by_department() {
        let staff = vec![
            employee("Zeca", Department::Rh, "Analista de RH", 11.50),
            employee("Ana", Department::Operacional, "Auxiliar de Produção", 6.90),
            employee("Bruno", Department::Operacional, "Operador de Máquinas", 8.50),
        ];
        let run = PayrollRun::compute(&staff, 176.0, 0.0);

        let names: Vec<&str> = run.payslips.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Zeca"]);
        assert_eq!(run.by_department[&Department::Operacional].headcount, 2);
        assert_eq!(run.by_department[&Department::Rh].headcount, 1);
        assert_eq!(run.totals.headcount, 3);

        let sum: f64 = run.by_department.values().map(|t| t.gross).sum();
        assert!(approx(sum, run.totals.gross));
        assert!(approx(run.totals.net, run.totals.gross - run.totals.irpf));
    }

    #[test]
    fn test_empty_run() {
        let run = PayrollRun::compute(&Vec::<Employee>::new(), 176.0, 10.0);
        assert!(run.payslips.is_empty());
        assert_eq!(run.totals, PayrollTotals::default());
    }
}
