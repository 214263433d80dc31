//! Carangos: plant management for a vehicle assembly line
//!
//! Role-gated modules for production, inventory, finance and human
//! resources over a directory of JSON files, driven from the command line.

pub mod cli;
pub mod core;
pub mod entities;
