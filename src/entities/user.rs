//! User account entity type - login credentials and role tag

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;

/// A login account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,

    /// Salted password digest (`sha256$<salt>$<digest>`)
    pub password_hash: String,

    /// Role tag checked against the module allow-lists
    pub role: String,

    pub created: DateTime<Utc>,
}

impl Record for UserAccount {
    const FILE: &'static str = "users.json";
    const NAME: &'static str = "user";

    fn key(&self) -> &str {
        &self.username
    }
}
