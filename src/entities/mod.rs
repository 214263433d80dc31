//! Record types persisted by the plant's modules

pub mod employee;
pub mod expense;
pub mod product;
pub mod production;
pub mod user;
