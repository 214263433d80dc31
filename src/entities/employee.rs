//! Employee entity type - one hired person

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::catalog::Department;
use crate::core::entity::Record;

/// An employee record
///
/// `department`, `title` and `matricula` are fixed at hire time. Changing
/// department or title means removing the record and hiring again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Generated identifier, never changed after hire
    pub matricula: String,

    /// Full name
    pub name: String,

    /// CPF (individual taxpayer number)
    pub cpf: String,

    /// RG (identity card number)
    pub rg: String,

    /// CTPS (work card number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctps: Option<String>,

    pub address: String,

    pub phone: String,

    /// Number of dependent children
    #[serde(default)]
    pub dependents: u32,

    pub department: Department,

    /// Job title from the department's catalog
    pub title: String,

    /// Hourly rate in BRL (catalog base rate unless overridden at hire)
    pub hourly_rate: f64,

    /// Hire timestamp
    pub created: DateTime<Utc>,
}

/// Data collected for a new hire, before a matrícula is assigned
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub cpf: String,
    pub rg: String,
    pub ctps: Option<String>,
    pub address: String,
    pub phone: String,
    pub dependents: u32,
    pub department: Department,
    pub title: String,
    /// Overrides the catalog base rate when set
    pub hourly_rate: Option<f64>,
}

/// Editable fields of an existing employee
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.phone.is_none()
    }
}

impl Employee {
    /// Apply edits in place, ignoring blank values. Returns whether anything changed.
    pub fn apply(&mut self, changes: &EmployeeChanges) -> bool {
        let mut changed = false;
        for (field, value) in [
            (&mut self.name, &changes.name),
            (&mut self.address, &changes.address),
            (&mut self.phone, &changes.phone),
        ] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                if field.as_str() != v {
                    *field = v.to_string();
                    changed = true;
                }
            }
        }
        changed
    }
}

impl Record for Employee {
    const FILE: &'static str = "employees.json";
    const NAME: &'static str = "employee";

    fn key(&self) -> &str {
        &self.matricula
    }
}
