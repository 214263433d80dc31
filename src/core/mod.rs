//! Core module - domain rules, persistence and configuration

pub mod access;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod employees;
pub mod entity;
pub mod finance;
pub mod inventory;
pub mod matricula;
pub mod payroll;
pub mod production;
pub mod shortid;
pub mod store;

pub use access::{is_authorized, AccessPolicy, Module};
pub use auth::{AuthError, Principal};
pub use catalog::{Department, JobTitle};
pub use config::{Config, ConfigError};
pub use employees::EmployeeError;
pub use entity::Record;
pub use inventory::InventoryError;
pub use shortid::ShortIdIndex;
pub use store::{DataDir, StoreError};
