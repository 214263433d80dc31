//! CLI command implementations

pub mod access;
pub mod completions;
pub mod dashboard;
pub mod emp;
pub mod fin;
pub mod init;
pub mod menu;
pub mod prod;
pub mod stock;
pub mod users;
