//! Product and order entity types - stock items and the orders drawn against them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;

/// A product held in stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product code
    pub code: String,

    pub name: String,

    /// Manufacturing date as printed on the batch (free text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufactured: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,

    /// Units on hand
    pub quantity: u32,

    /// Storage location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Unit value in BRL
    pub unit_value: f64,
}

impl Product {
    /// Value of the units on hand
    pub fn stock_value(&self) -> f64 {
        f64::from(self.quantity) * self.unit_value
    }
}

impl Record for Product {
    const FILE: &'static str = "products.json";
    const NAME: &'static str = "product";

    fn key(&self) -> &str {
        &self.code
    }
}

/// An outgoing order, recorded with the quantity actually delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order code
    pub code: String,

    pub customer: String,

    /// Product name at the time of the order
    pub product: String,

    /// Quantity the customer asked for
    pub requested: u32,

    /// Quantity delivered (less than requested on partial fulfilment)
    pub quantity: u32,

    /// Delivered quantity times unit value
    pub total: f64,

    pub created: DateTime<Utc>,
}

impl Order {
    pub fn is_partial(&self) -> bool {
        self.quantity < self.requested
    }
}

impl Record for Order {
    const FILE: &'static str = "orders.json";
    const NAME: &'static str = "order";

    fn key(&self) -> &str {
        &self.code
    }
}
