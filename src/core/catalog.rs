//! Department and job-title catalog
//!
//! Static configuration: the four departments of the plant, the job titles
//! each one hires for (ranked by seniority), and the base hourly rate of
//! every title. The digit tables used by matrícula generation are derived
//! from the same entries so the two can never drift apart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::access::Module;

/// Digit used when a department or title is not in the catalog
pub const UNMAPPED_DIGIT: char = '0';

/// A department of the plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Operacional,
    Estoque,
    Financeiro,
    Rh,
}

/// A job title offered by a department
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobTitle {
    /// Title as it appears on the employee record
    pub title: &'static str,
    /// Seniority level within the department (1 = entry level)
    pub level: u8,
    /// Base hourly rate in BRL
    pub base_rate: f64,
}

const OPERACIONAL_TITLES: &[JobTitle] = &[
    JobTitle { title: "Auxiliar de Produção", level: 1, base_rate: 6.90 },
    JobTitle { title: "Operador de Máquinas", level: 2, base_rate: 8.50 },
    JobTitle { title: "Técnico de Manutenção", level: 4, base_rate: 12.00 },
    JobTitle { title: "Inspetor de Qualidade", level: 3, base_rate: 10.00 },
];

const ESTOQUE_TITLES: &[JobTitle] = &[
    JobTitle { title: "Auxiliar de Estoque", level: 1, base_rate: 7.00 },
    JobTitle { title: "Analista", level: 2, base_rate: 8.00 },
    JobTitle { title: "Coordenador", level: 3, base_rate: 11.00 },
];

const FINANCEIRO_TITLES: &[JobTitle] = &[
    JobTitle { title: "Assistente Financeiro", level: 1, base_rate: 9.00 },
    JobTitle { title: "Analista Financeiro", level: 2, base_rate: 12.50 },
    JobTitle { title: "Gerente Financeiro", level: 3, base_rate: 15.00 },
];

const RH_TITLES: &[JobTitle] = &[
    JobTitle { title: "Assistente de RH", level: 1, base_rate: 9.50 },
    JobTitle { title: "Analista de RH", level: 2, base_rate: 11.50 },
    JobTitle { title: "Coordenador de RH", level: 3, base_rate: 14.00 },
];

#[derive(Debug, Error)]
#[error("Unknown department '{0}'. Use one of: OPERACIONAL, ESTOQUE, FINANCEIRO, RH")]
pub struct UnknownDepartment(pub String);

impl Department {
    /// All departments, in catalog order
    pub const ALL: [Department; 4] = [
        Department::Operacional,
        Department::Estoque,
        Department::Financeiro,
        Department::Rh,
    ];

    /// Canonical department code (e.g., "OPERACIONAL")
    pub fn code(&self) -> &'static str {
        match self {
            Department::Operacional => "OPERACIONAL",
            Department::Estoque => "ESTOQUE",
            Department::Financeiro => "FINANCEIRO",
            Department::Rh => "RH",
        }
    }

    /// Exact lookup by canonical code
    pub fn from_code(code: &str) -> Option<Department> {
        Department::ALL.into_iter().find(|d| d.code() == code)
    }

    /// First matrícula digit for this department
    pub fn digit(&self) -> char {
        match self {
            Department::Operacional => '1',
            Department::Estoque => '2',
            Department::Financeiro => '3',
            Department::Rh => '4',
        }
    }

    /// Job titles of this department, in catalog order
    pub fn titles(&self) -> &'static [JobTitle] {
        match self {
            Department::Operacional => OPERACIONAL_TITLES,
            Department::Estoque => ESTOQUE_TITLES,
            Department::Financeiro => FINANCEIRO_TITLES,
            Department::Rh => RH_TITLES,
        }
    }

    /// Find one of this department's titles by exact name
    pub fn title(&self, name: &str) -> Option<&'static JobTitle> {
        self.titles().iter().find(|t| t.title == name)
    }

    /// The business module this department runs
    pub fn module(&self) -> Module {
        match self {
            Department::Operacional => Module::Production,
            Department::Estoque => Module::Inventory,
            Department::Financeiro => Module::Finance,
            Department::Rh => Module::HumanResources,
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Department {
    type Err = UnknownDepartment;

    /// Case-insensitive, accepts the canonical codes and the module names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "operacional" | "production" | "producao" => Ok(Department::Operacional),
            "estoque" | "inventory" => Ok(Department::Estoque),
            "financeiro" | "finance" => Ok(Department::Financeiro),
            "rh" | "hr" => Ok(Department::Rh),
            _ => Err(UnknownDepartment(s.to_string())),
        }
    }
}

/// First matrícula digit for a department code, `'0'` if unmapped
pub fn department_digit(department: &str) -> char {
    Department::from_code(department)
        .map(|d| d.digit())
        .unwrap_or(UNMAPPED_DIGIT)
}

/// Second matrícula digit for a job title, `'0'` if unmapped
pub fn job_level_digit(title: &str) -> char {
    find_title(title)
        .and_then(|(_, t)| char::from_digit(u32::from(t.level), 10))
        .unwrap_or(UNMAPPED_DIGIT)
}

/// Look a title up across every department
pub fn find_title(title: &str) -> Option<(Department, &'static JobTitle)> {
    Department::ALL
        .into_iter()
        .find_map(|d| d.title(title).map(|t| (d, t)))
}

/// Department a title belongs to
pub fn department_of_title(title: &str) -> Option<Department> {
    find_title(title).map(|(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_digits() {
        assert_eq!(department_digit("OPERACIONAL"), '1');
        assert_eq!(department_digit("ESTOQUE"), '2');
        assert_eq!(department_digit("FINANCEIRO"), '3');
        assert_eq!(department_digit("RH"), '4');
    }

    #[test]
    fn test_department_digit_is_exact() {
        assert_eq!(department_digit("operacional"), UNMAPPED_DIGIT);
        assert_eq!(department_digit("MARKETING"), UNMAPPED_DIGIT);
        assert_eq!(department_digit(""), UNMAPPED_DIGIT);
    }

    #[test]
    fn test_job_levels() {
        assert_eq!(job_level_digit("Auxiliar de Produção"), '1');
        assert_eq!(job_level_digit("Inspetor de Qualidade"), '3');
        assert_eq!(job_level_digit("Técnico de Manutenção"), '4');
        assert_eq!(job_level_digit("Coordenador"), '3');
        assert_eq!(job_level_digit("Gerente Financeiro"), '3');
        assert_eq!(job_level_digit("Assistente de RH"), '1');
        assert_eq!(job_level_digit("Astronauta"), UNMAPPED_DIGIT);
    }

    #[test]
    fn test_titles_are_unique_across_departments() {
        let mut seen = std::collections::HashSet::new();
        for dept in Department::ALL {
            for t in dept.titles() {
                assert!(seen.insert(t.title), "duplicate title {}", t.title);
                assert!((1..=4).contains(&t.level));
            }
        }
    }

    #[test]
    fn test_department_of_title() {
        assert_eq!(department_of_title("Analista"), Some(Department::Estoque));
        assert_eq!(department_of_title("Analista de RH"), Some(Department::Rh));
        assert_eq!(department_of_title("analista"), None);
    }

    #[test]
    fn test_base_rates() {
        let (_, t) = find_title("Operador de Máquinas").unwrap();
        assert_eq!(t.base_rate, 8.50);
        let (_, t) = find_title("Coordenador de RH").unwrap();
        assert_eq!(t.base_rate, 14.00);
    }

    #[test]
    fn test_department_parse() {
        assert_eq!("rh".parse::<Department>().unwrap(), Department::Rh);
        assert_eq!("Estoque".parse::<Department>().unwrap(), Department::Estoque);
        assert_eq!("production".parse::<Department>().unwrap(), Department::Operacional);
        assert!("marketing".parse::<Department>().is_err());
    }

    #[test]
    fn test_department_serde_uses_codes() {
        let json = serde_json::to_string(&Department::Rh).unwrap();
        assert_eq!(json, "\"RH\"");
        let back: Department = serde_json::from_str("\"OPERACIONAL\"").unwrap();
        assert_eq!(back, Department::Operacional);
    }
}
