//! Fixed expense entity type - monthly water, power, salary and tax bills

use serde::{Deserialize, Serialize};

use crate::core::entity::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Agua,
    Luz,
    Salarios,
    Impostos,
}

impl ExpenseKind {
    pub const ALL: [ExpenseKind; 4] = [
        ExpenseKind::Agua,
        ExpenseKind::Luz,
        ExpenseKind::Salarios,
        ExpenseKind::Impostos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Agua => "agua",
            ExpenseKind::Luz => "luz",
            ExpenseKind::Salarios => "salarios",
            ExpenseKind::Impostos => "impostos",
        }
    }
}

impl std::fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseKind::Agua => write!(f, "Água"),
            ExpenseKind::Luz => write!(f, "Luz"),
            ExpenseKind::Salarios => write!(f, "Salários"),
            ExpenseKind::Impostos => write!(f, "Impostos"),
        }
    }
}

/// One fixed monthly expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub kind: ExpenseKind,
    pub value: f64,
}

impl Record for Expense {
    const FILE: &'static str = "expenses.json";
    const NAME: &'static str = "expense";

    fn key(&self) -> &str {
        self.kind.as_str()
    }
}
