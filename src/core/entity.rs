//! Record trait - common interface for every persisted record type

use serde::{de::DeserializeOwned, Serialize};

/// A record kept as one JSON array per type in the data directory
pub trait Record: Serialize + DeserializeOwned {
    /// File name inside the data directory (e.g., "employees.json")
    const FILE: &'static str;

    /// Singular noun for messages (e.g., "employee")
    const NAME: &'static str;

    /// Natural key used for lookups (matrícula, username, product code...)
    fn key(&self) -> &str;
}
