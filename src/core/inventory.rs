//! Stock movements - receiving products and dispatching orders

use chrono::Utc;
use thiserror::Error;

use crate::core::store::DataDir;
use crate::entities::product::{Order, Product};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product '{0}' not found in stock")]
    ProductNotFound(String),

    #[error("Product '{0}' is out of stock")]
    OutOfStock(String),

    #[error("Order '{0}' already exists")]
    DuplicateOrder(String),

    #[error("Quantity must be greater than zero")]
    ZeroQuantity,

    #[error("'{0}' is a new product; a unit value is required")]
    MissingUnitValue(String),

    #[error(transparent)]
    Store(#[from] crate::core::store::StoreError),
}

/// What receiving a product did to the stock
#[derive(Debug, Clone, PartialEq)]
pub enum Receipt {
    /// A new product was registered
    Created(Product),
    /// An existing product was topped up; carries the updated product and the units added
    Restocked { product: Product, added: u32 },
}

impl Receipt {
    pub fn product(&self) -> &Product {
        match self {
            Receipt::Created(p) => p,
            Receipt::Restocked { product, .. } => product,
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Find a product sharing the code, or the name ignoring case
pub fn find_existing<'a>(products: &'a mut [Product], code: &str, name: &str) -> Option<&'a mut Product> {
    products
        .iter_mut()
        .find(|p| p.code == code || same_name(&p.name, name))
}

/// Find a product by name, ignoring case
pub fn find_by_name<'a>(products: &'a [Product], name: &str) -> Option<&'a Product> {
    products.iter().find(|p| same_name(&p.name, name))
}

/// Units arriving at the warehouse
#[derive(Debug, Clone, Default)]
pub struct Incoming {
    pub code: String,
    pub name: String,
    pub manufactured: Option<String>,
    pub supplier: Option<String>,
    pub quantity: u32,
    pub location: Option<String>,
    /// Required only when the product is new
    pub unit_value: Option<f64>,
}

/// Register incoming units
///
/// When a product with the same code or name is already stocked only its
/// quantity changes; the other fields of `incoming` are ignored.
pub fn receive(products: &mut Vec<Product>, incoming: Incoming) -> Result<Receipt, InventoryError> {
    if let Some(existing) = find_existing(products, &incoming.code, &incoming.name) {
        existing.quantity = existing.quantity.saturating_add(incoming.quantity);
        tracing::debug!(code = %existing.code, added = incoming.quantity, "restocked product");
        return Ok(Receipt::Restocked {
            product: existing.clone(),
            added: incoming.quantity,
        });
    }

    let unit_value = incoming
        .unit_value
        .ok_or_else(|| InventoryError::MissingUnitValue(incoming.name.clone()))?;
    let product = Product {
        code: incoming.code,
        name: incoming.name,
        manufactured: incoming.manufactured,
        supplier: incoming.supplier,
        quantity: incoming.quantity,
        location: incoming.location,
        unit_value,
    };
    tracing::debug!(code = %product.code, "registered product");
    products.push(product.clone());
    Ok(Receipt::Created(product))
}

/// [`receive`] against the stored stock
pub fn receive_into(dir: &DataDir, incoming: Incoming) -> Result<Receipt, InventoryError> {
    dir.update(|products: &mut Vec<Product>| receive(products, incoming))
}

/// An order request before stock is checked
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub code: String,
    pub customer: String,
    pub product: String,
    pub quantity: u32,
}

/// Dispatch an order against stock
///
/// Fills as much as is on hand: a request above the stock level is
/// partially fulfilled and the order records the delivered quantity.
pub fn dispatch(
    products: &mut [Product],
    orders: &[Order],
    request: OrderRequest,
) -> Result<Order, InventoryError> {
    if request.quantity == 0 {
        return Err(InventoryError::ZeroQuantity);
    }
    if orders.iter().any(|o| o.code == request.code) {
        return Err(InventoryError::DuplicateOrder(request.code));
    }

    let product = products
        .iter_mut()
        .find(|p| same_name(&p.name, &request.product))
        .ok_or_else(|| InventoryError::ProductNotFound(request.product.clone()))?;

    if product.quantity == 0 {
        return Err(InventoryError::OutOfStock(product.name.clone()));
    }

    let delivered = request.quantity.min(product.quantity);
    if delivered < request.quantity {
        tracing::info!(
            order = %request.code,
            requested = request.quantity,
            delivered,
            "insufficient stock, order partially fulfilled"
        );
    }
    product.quantity -= delivered;

    Ok(Order {
        code: request.code,
        customer: request.customer,
        product: product.name.clone(),
        requested: request.quantity,
        quantity: delivered,
        total: f64::from(delivered) * product.unit_value,
        created: Utc::now(),
    })
}

/// [`dispatch`] against the stored stock, recording the order
pub fn dispatch_order(dir: &DataDir, request: OrderRequest) -> Result<Order, InventoryError> {
    dir.update_pair(|products: &mut Vec<Product>, orders: &mut Vec<Order>| {
        let order = dispatch(products, orders, request)?;
        orders.push(order.clone());
        Ok(order)
    })
}

/// Products sorted by name, ignoring case
pub fn sorted_by_name(products: &[Product]) -> Vec<&Product> {
    let mut sorted: Vec<&Product> = products.iter().collect();
    sorted.sort_by_key(|p| p.name.to_lowercase());
    sorted
}

/// Value of everything in stock (sum of quantity times unit value)
pub fn inputs_cost(products: &[Product]) -> f64 {
    products.iter().map(Product::stock_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, name: &str, quantity: u32, unit_value: f64) -> Product {
        Product {
            code: code.to_string(),
            name: name.to_string(),
            manufactured: None,
            supplier: None,
            quantity,
            location: None,
            unit_value,
        }
    }

    fn incoming(code: &str, name: &str, quantity: u32, unit_value: Option<f64>) -> Incoming {
        Incoming {
            code: code.to_string(),
            name: name.to_string(),
            quantity,
            unit_value,
            ..Default::default()
        }
    }

    fn request(code: &str, name: &str, quantity: u32) -> OrderRequest {
        OrderRequest {
            code: code.to_string(),
            customer: "Loja Centro".to_string(),
            product: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_receive_new_product() {
        let mut stock = Vec::new();
        let receipt = receive(&mut stock, incoming("P1", "Pneu", 40, Some(250.0))).unwrap();
        assert!(matches!(receipt, Receipt::Created(_)));
        assert_eq!(stock.len(), 1);

        assert!(matches!(
            receive(&mut stock, incoming("P2", "Motor", 1, None)),
            Err(InventoryError::MissingUnitValue(_))
        ));
        assert_eq!(stock.len(), 1);
    }

    #[test]
    fn test_receive_merges_by_code_or_name() {
        let mut stock = vec![product("P1", "Pneu", 40, 250.0)];

        let receipt = receive(&mut stock, incoming("P1", "Pneu Aro 15", 10, Some(999.0))).unwrap();
        assert_eq!(
            receipt,
            Receipt::Restocked {
                product: product("P1", "Pneu", 50, 250.0),
                added: 10
            }
        );

        let receipt = receive(&mut stock, incoming("X9", "PNEU", 5, None)).unwrap();
        assert_eq!(receipt.product().quantity, 55);
        assert_eq!(receipt.product().unit_value, 250.0);
        assert_eq!(stock.len(), 1);
    }

    #[test]
    fn test_dispatch_full_order() {
        let mut stock = vec![product("P1", "Pneu", 40, 250.0)];
        let order = dispatch(&mut stock, &[], request("O1", "pneu", 8)).unwrap();
        assert_eq!(order.quantity, 8);
        assert_eq!(order.total, 2000.0);
        assert_eq!(order.product, "Pneu");
        assert!(!order.is_partial());
        assert_eq!(stock[0].quantity, 32);
    }

    #[test]
    fn test_dispatch_partial_fill_empties_stock() {
        let mut stock = vec![product("P2", "Volante", 3, 100.0)];
        let order = dispatch(&mut stock, &[], request("O2", "Volante", 5)).unwrap();
        assert_eq!(order.requested, 5);
        assert_eq!(order.quantity, 3);
        assert_eq!(order.total, 300.0);
        assert!(order.is_partial());
        assert_eq!(stock[0].quantity, 0);

        let err = dispatch(&mut stock, &[order], request("O3", "Volante", 1)).unwrap_err();
        assert!(matches!(err, InventoryError::OutOfStock(_)));
    }

    #[test]
    fn test_dispatch_errors_leave_stock_alone() {
        let mut stock = vec![product("P1", "Pneu", 4, 250.0)];
        assert!(matches!(
            dispatch(&mut stock, &[], request("O1", "Motor", 1)),
            Err(InventoryError::ProductNotFound(_))
        ));
        assert!(matches!(
            dispatch(&mut stock, &[], request("O1", "Pneu", 0)),
            Err(InventoryError::ZeroQuantity)
        ));
        let existing = dispatch(&mut stock, &[], request("O1", "Pneu", 1)).unwrap();
        assert!(matches!(
            dispatch(&mut stock, &[existing], request("O1", "Pneu", 1)),
            Err(InventoryError::DuplicateOrder(_))
        ));
        assert_eq!(stock[0].quantity, 3);
    }

    #[test]
    fn test_stored_dispatch_records_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = DataDir::create(tmp.path()).unwrap();
        receive_into(&dir, incoming("P1", "Pneu", 4, Some(250.0))).unwrap();

        let order = dispatch_order(&dir, request("O1", "Pneu", 6)).unwrap();
        assert_eq!(order.quantity, 4);

        let products: Vec<Product> = dir.load().unwrap();
        let orders: Vec<Order> = dir.load().unwrap();
        assert_eq!(products[0].quantity, 0);
        assert_eq!(orders, vec![order]);

        assert!(dispatch_order(&dir, request("O2", "Pneu", 1)).is_err());
        assert_eq!(dir.load::<Order>().unwrap().len(), 1);
    }

    #[test]
    fn test_sorting_and_inputs_cost() {
        let stock = vec![
            product("P1", "volante", 2, 100.0),
            product("P2", "Banco", 1, 300.0),
            product("P3", "Pneu", 4, 250.0),
        ];
        let names: Vec<&str> = sorted_by_name(&stock).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Banco", "Pneu", "volante"]);
        assert_eq!(inputs_cost(&stock), 1500.0);
    }
}
