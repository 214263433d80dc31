//! Role-based access control
//!
//! Roles are plain string tags. There is no runtime role hierarchy: each
//! module carries a static allow-list built once from [`MODULE_ROLES`] and
//! [`GLOBAL_ROLES`], plus the single cross-grant in [`CROSS_GRANTS`].
//! Denial is a normal `false`, never an error.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Roles that reach every module
pub const GLOBAL_ROLES: &[&str] = &["admin", "presidente", "conselho"];

/// A business module (or the user-management pseudo-module)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Production,
    Inventory,
    Finance,
    HumanResources,
    UserManagement,
}

/// Department roles declared by one module
#[derive(Debug, Clone, Copy)]
pub struct ModuleRoles {
    pub module: Module,
    /// Director-level role; `None` when the module is overseen through a cross-grant
    pub director: Option<&'static str>,
    pub manager: &'static str,
    pub worker: &'static str,
}

/// Department roles per business module
pub const MODULE_ROLES: &[ModuleRoles] = &[
    ModuleRoles {
        module: Module::Production,
        director: Some("diretor_operacional"),
        manager: "gerente_montagem",
        worker: "func_producao",
    },
    ModuleRoles {
        module: Module::Inventory,
        director: None,
        manager: "gerente_insumos",
        worker: "func_estoque",
    },
    ModuleRoles {
        module: Module::Finance,
        director: Some("diretor_financeiro"),
        manager: "gerente_financeiro",
        worker: "func_financeiro",
    },
    ModuleRoles {
        module: Module::HumanResources,
        director: Some("diretor_rh"),
        manager: "gerente_rh",
        worker: "func_rh",
    },
];

/// Hard-coded extra grants: (role, module)
pub const CROSS_GRANTS: &[(&str, Module)] = &[("diretor_operacional", Module::Inventory)];

/// Pseudo-modules that reuse another module's allow-list
const INHERITED_LISTS: &[(Module, Module)] = &[(Module::UserManagement, Module::HumanResources)];

#[derive(Debug, Error)]
#[error("Unknown module '{0}'. Use one of: production, inventory, finance, hr, users")]
pub struct UnknownModule(pub String);

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Production,
        Module::Inventory,
        Module::Finance,
        Module::HumanResources,
        Module::UserManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Production => "production",
            Module::Inventory => "inventory",
            Module::Finance => "finance",
            Module::HumanResources => "hr",
            Module::UserManagement => "users",
        }
    }

    /// Human readable name for menus and messages
    pub fn label(&self) -> &'static str {
        match self {
            Module::Production => "Production",
            Module::Inventory => "Inventory",
            Module::Finance => "Finance",
            Module::HumanResources => "Human Resources",
            Module::UserManagement => "User Management",
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Module {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "operacional" => Ok(Module::Production),
            "inventory" | "estoque" => Ok(Module::Inventory),
            "finance" | "financeiro" => Ok(Module::Finance),
            "hr" | "rh" | "human_resources" => Ok(Module::HumanResources),
            "users" | "user_management" => Ok(Module::UserManagement),
            _ => Err(UnknownModule(s.to_string())),
        }
    }
}

/// Static allow-lists, one set of role tags per module
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    allow: HashMap<Module, HashSet<&'static str>>,
}

impl AccessPolicy {
    /// Build the plant's allow-lists from the role tables
    pub fn standard() -> Self {
        let mut allow: HashMap<Module, HashSet<&'static str>> = HashMap::new();

        for entry in MODULE_ROLES {
            let set = allow.entry(entry.module).or_default();
            set.extend(GLOBAL_ROLES.iter().copied());
            set.extend(entry.director);
            set.insert(entry.manager);
            set.insert(entry.worker);
        }

        for (role, module) in CROSS_GRANTS {
            allow.entry(*module).or_default().insert(*role);
        }

        for (module, source) in INHERITED_LISTS {
            let inherited = allow.get(source).cloned().unwrap_or_default();
            allow.insert(*module, inherited);
        }

        Self { allow }
    }

    /// Process-wide policy, built on first use
    pub fn shared() -> &'static AccessPolicy {
        static POLICY: OnceLock<AccessPolicy> = OnceLock::new();
        POLICY.get_or_init(AccessPolicy::standard)
    }

    /// Whether `role` may use `module`
    pub fn is_authorized(&self, role: &str, module: Module) -> bool {
        self.allow
            .get(&module)
            .is_some_and(|roles| roles.contains(role))
    }

    /// Roles allowed on a module, sorted
    pub fn allowed_roles(&self, module: Module) -> Vec<&'static str> {
        let mut roles: Vec<&'static str> = self
            .allow
            .get(&module)
            .map(|r| r.iter().copied().collect())
            .unwrap_or_default();
        roles.sort_unstable();
        roles
    }

    /// Modules a role can reach, in [`Module::ALL`] order
    pub fn modules_for(&self, role: &str) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|m| self.is_authorized(role, *m))
            .collect()
    }

    /// Every role tag that appears in at least one allow-list
    pub fn known_roles(&self) -> BTreeSet<&'static str> {
        self.allow.values().flatten().copied().collect()
    }
}

/// Whether `role` is one of the executive roles with plant-wide access
pub fn is_global(role: &str) -> bool {
    GLOBAL_ROLES.contains(&role)
}

/// Check `role` against the shared policy
pub fn is_authorized(role: &str, module: Module) -> bool {
    AccessPolicy::shared().is_authorized(role, module)
}
