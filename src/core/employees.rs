//! Employee records - hiring, editing and dismissal
//!
//! Hiring runs the whole validate, generate, append sequence inside one
//! [`DataDir::update`] so two hires can never read the same sequence.

use chrono::Utc;
use thiserror::Error;

use crate::core::catalog::Department;
use crate::core::matricula::{self, DigitSource};
use crate::core::store::{DataDir, StoreError};
use crate::entities::employee::{Employee, EmployeeChanges, NewEmployee};

/// Check-digit redraws tried when a generated matrícula is already on file
const CHECK_DIGIT_REDRAWS: usize = 20;

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("'{title}' is not a job title of {department}. Options: {options}")]
    UnknownTitle {
        title: String,
        department: Department,
        options: String,
    },

    #[error("An employee with CPF {0} already exists")]
    DuplicateCpf(String),

    #[error("No employee with matrícula '{0}'")]
    NotFound(String),

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("Hourly rate must be positive, got {0}")]
    InvalidRate(f64),

    #[error("Could not find a free matrícula: '{0}' and its check-digit variants are taken")]
    MatriculaExhausted(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Check a hire request against the catalog and the current staff
fn validate(new: &NewEmployee, staff: &[Employee]) -> Result<(), EmployeeError> {
    for (field, value) in [("Name", &new.name), ("CPF", &new.cpf), ("RG", &new.rg)] {
        if value.trim().is_empty() {
            return Err(EmployeeError::MissingField(field));
        }
    }

    if new.department.title(&new.title).is_none() {
        let options: Vec<&str> = new.department.titles().iter().map(|t| t.title).collect();
        return Err(EmployeeError::UnknownTitle {
            title: new.title.clone(),
            department: new.department,
            options: options.join(", "),
        });
    }

    if let Some(rate) = new.hourly_rate.filter(|r| r.is_nan() || *r <= 0.0) {
        return Err(EmployeeError::InvalidRate(rate));
    }

    let cpf = new.cpf.trim();
    if staff.iter().any(|e| e.cpf == cpf) {
        return Err(EmployeeError::DuplicateCpf(cpf.to_string()));
    }
    Ok(())
}

/// Hire someone and persist the record with a freshly generated matrícula
pub fn hire<D>(dir: &DataDir, new: NewEmployee, digits: &mut D) -> Result<Employee, EmployeeError>
where
    D: DigitSource + ?Sized,
{
    dir.update(|staff: &mut Vec<Employee>| {
        validate(&new, staff)?;

        let generated = matricula::generate(
            new.department.code(),
            &new.title,
            staff.iter().map(|e| e.matricula.as_str()),
            digits,
        );
        let matricula = unique_matricula(generated, staff, digits)?;
        let base_rate = new
            .department
            .title(&new.title)
            .map(|t| t.base_rate)
            .unwrap_or_default();

        let employee = Employee {
            matricula,
            name: new.name.trim().to_string(),
            cpf: new.cpf.trim().to_string(),
            rg: new.rg.trim().to_string(),
            ctps: new.ctps.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            address: new.address.trim().to_string(),
            phone: new.phone.trim().to_string(),
            dependents: new.dependents,
            department: new.department,
            title: new.title,
            hourly_rate: new.hourly_rate.unwrap_or(base_rate),
            created: Utc::now(),
        };
        tracing::info!(matricula = %employee.matricula, department = %employee.department, "hired employee");
        staff.push(employee.clone());
        Ok(employee)
    })
}

/// Redraw the check digit until the matrícula is free among `staff`
///
/// The max-scan can hand out a sequence already on file, e.g. once hex
/// fields like `400` read back as decimal.
fn unique_matricula<D>(
    mut id: String,
    staff: &[Employee],
    digits: &mut D,
) -> Result<String, EmployeeError>
where
    D: DigitSource + ?Sized,
{
    let taken = |id: &str| staff.iter().any(|e| e.matricula == id);
    let mut redraws = 0;
    while taken(&id) {
        if redraws == CHECK_DIGIT_REDRAWS {
            return Err(EmployeeError::MatriculaExhausted(id));
        }
        redraws += 1;
        tracing::debug!(matricula = %id, "matrícula already on file, redrawing check digit");
        id.pop();
        id.push(char::from(b'0' + digits.next_digit() % 10));
    }
    Ok(id)
}

/// Find an employee by matrícula
pub fn find<'a>(staff: &'a [Employee], matricula: &str) -> Result<&'a Employee, EmployeeError> {
    staff
        .iter()
        .find(|e| e.matricula == matricula)
        .ok_or_else(|| EmployeeError::NotFound(matricula.to_string()))
}

/// Staff sorted for listing: by department, then name
pub fn roster(staff: &[Employee], department: Option<Department>) -> Vec<&Employee> {
    let mut list: Vec<&Employee> = staff
        .iter()
        .filter(|e| department.map_or(true, |d| e.department == d))
        .collect();
    list.sort_by(|a, b| a.department.cmp(&b.department).then_with(|| a.name.cmp(&b.name)));
    list
}

/// Apply edits to one employee; returns the record and whether it changed
pub fn edit(
    dir: &DataDir,
    matricula: &str,
    changes: &EmployeeChanges,
) -> Result<(Employee, bool), EmployeeError> {
    dir.update(|staff: &mut Vec<Employee>| {
        let employee = staff
            .iter_mut()
            .find(|e| e.matricula == matricula)
            .ok_or_else(|| EmployeeError::NotFound(matricula.to_string()))?;
        let changed = employee.apply(changes);
        Ok((employee.clone(), changed))
    })
}

/// Remove an employee record
pub fn dismiss(dir: &DataDir, matricula: &str) -> Result<Employee, EmployeeError> {
    dir.update(|staff: &mut Vec<Employee>| {
        let idx = staff
            .iter()
            .position(|e| e.matricula == matricula)
            .ok_or_else(|| EmployeeError::NotFound(matricula.to_string()))?;
        let removed = staff.remove(idx);
        tracing::info!(matricula = %removed.matricula, "removed employee");
        Ok(removed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matricula::FixedDigit;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DataDir) {
        let tmp = TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path()).unwrap();
        (tmp, dir)
    }

    fn new_hire(name: &str, cpf: &str, department: Department, title: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            cpf: cpf.to_string(),
            rg: "12.345.678-9".to_string(),
            ctps: None,
            address: "Rua A, 10".to_string(),
            phone: "11999990000".to_string(),
            dependents: 0,
            department,
            title: title.to_string(),
            hourly_rate: None,
        }
    }

    #[test]
    fn test_hire_assigns_sequential_matriculas() {
        let (_tmp, dir) = setup();
        let a = hire(
            &dir,
            new_hire("Ana", "111", Department::Operacional, "Auxiliar de Produção"),
            &mut FixedDigit(7),
        )
        .unwrap();
        let b = hire(
            &dir,
            new_hire("Bruno", "222", Department::Estoque, "Analista"),
            &mut FixedDigit(4),
        )
        .unwrap();

        assert_eq!(a.matricula, "110017");
        assert_eq!(b.matricula, "220024");
        assert_eq!(a.hourly_rate, 6.90);
        assert_eq!(dir.load::<Employee>().unwrap().len(), 2);
    }

    #[test]
    fn test_hire_rejects_title_from_other_department() {
        let (_tmp, dir) = setup();
        let err = hire(
            &dir,
            new_hire("Ana", "111", Department::Rh, "Analista"),
            &mut FixedDigit(0),
        )
        .unwrap_err();
        assert!(matches!(err, EmployeeError::UnknownTitle { .. }));
        assert!(err.to_string().contains("Analista de RH"));
        assert!(dir.load::<Employee>().unwrap().is_empty());
    }

    #[test]
    fn test_hire_rejects_duplicate_cpf_and_blank_fields() {
        let (_tmp, dir) = setup();
        let hire_rh = |name: &str, cpf: &str| {
            hire(
                &dir,
                new_hire(name, cpf, Department::Rh, "Assistente de RH"),
                &mut FixedDigit(1),
            )
        };
        hire_rh("Ana", "111").unwrap();
        assert!(matches!(hire_rh("Outra Ana", " 111 "), Err(EmployeeError::DuplicateCpf(_))));
        assert!(matches!(hire_rh("  ", "333"), Err(EmployeeError::MissingField("Name"))));
    }

    #[test]
    fn test_rate_override() {
        let (_tmp, dir) = setup();
        let mut req = new_hire("Carla", "444", Department::Financeiro, "Gerente Financeiro");
        req.hourly_rate = Some(18.0);
        assert_eq!(hire(&dir, req.clone(), &mut FixedDigit(0)).unwrap().hourly_rate, 18.0);

        req.cpf = "555".to_string();
        req.hourly_rate = Some(0.0);
        assert!(matches!(
            hire(&dir, req, &mut FixedDigit(0)),
            Err(EmployeeError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_edit_and_dismiss() {
        let (_tmp, dir) = setup();
        let emp = hire(
            &dir,
            new_hire("Ana", "111", Department::Operacional, "Operador de Máquinas"),
            &mut FixedDigit(3),
        )
        .unwrap();

        let (updated, changed) = edit(
            &dir,
            &emp.matricula,
            &EmployeeChanges {
                phone: Some("1133334444".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(changed);
        assert_eq!(updated.phone, "1133334444");
        assert_eq!(updated.matricula, emp.matricula);

        let removed = dismiss(&dir, &emp.matricula).unwrap();
        assert_eq!(removed.name, "Ana");
        assert!(matches!(
            dismiss(&dir, &emp.matricula),
            Err(EmployeeError::NotFound(_))
        ));
    }

    /// Cycles through 0..=9
    struct CountingDigits(u8);

    impl DigitSource for CountingDigits {
        fn next_digit(&mut self) -> u8 {
            let d = self.0 % 10;
            self.0 = self.0.wrapping_add(1);
            d
        }
    }

    fn on_file(matricula: &str, cpf: &str) -> Employee {
        Employee {
            matricula: matricula.to_string(),
            name: format!("Veterano {}", cpf),
            cpf: cpf.to_string(),
            rg: "1".to_string(),
            ctps: None,
            address: String::new(),
            phone: String::new(),
            dependents: 0,
            department: Department::Operacional,
            title: "Auxiliar de Produção".to_string(),
            hourly_rate: 6.90,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_hire_never_duplicates_matricula_after_hex_rollover() {
        let (_tmp, dir) = setup();
        dir.save(&[on_file("113FF0", "900")]).unwrap();

        let a = hire(
            &dir,
            new_hire("Ana", "111", Department::Operacional, "Auxiliar de Produção"),
            &mut CountingDigits(0),
        )
        .unwrap();
        // "400" reads back as decimal, so the scan hands out 1024 again
        let b = hire(
            &dir,
            new_hire("Bruno", "222", Department::Operacional, "Auxiliar de Produção"),
            &mut CountingDigits(0),
        )
        .unwrap();

        assert_eq!(a.matricula, "114000");
        assert_eq!(b.matricula, "114001");
        assert_ne!(a.matricula, b.matricula);
    }

    #[test]
    fn test_hire_fails_when_every_check_digit_is_taken() {
        let (_tmp, dir) = setup();
        dir.save(&[on_file("113FF0", "900"), on_file("114000", "901")]).unwrap();

        let err = hire(
            &dir,
            new_hire("Ana", "111", Department::Operacional, "Auxiliar de Produção"),
            &mut FixedDigit(0),
        )
        .unwrap_err();
        assert!(matches!(err, EmployeeError::MatriculaExhausted(ref id) if id == "114000"));
        assert_eq!(dir.load::<Employee>().unwrap().len(), 2);
    }

    #[test]
    fn test_roster_ordering_and_filter() {
        let (_tmp, dir) = setup();
        for (name, cpf, dept, title) in [
            ("Zeca", "1", Department::Operacional, "Auxiliar de Produção"),
            ("Bia", "2", Department::Rh, "Analista de RH"),
            ("Ana", "3", Department::Operacional, "Operador de Máquinas"),
        ] {
            hire(&dir, new_hire(name, cpf, dept, title), &mut FixedDigit(0)).unwrap();
        }
        let staff = dir.load::<Employee>().unwrap();

        let names: Vec<&str> = roster(&staff, None).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Zeca", "Bia"]);
        assert_eq!(roster(&staff, Some(Department::Rh)).len(), 1);
        assert!(find(&staff, "999999").is_err());
    }
}
