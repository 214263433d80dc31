//! `carangos stock` command - products and orders

use clap::{Args, Subcommand};
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::helpers::{self, format_money, truncate_str, Session};
use crate::cli::output;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::Module;
use crate::core::inventory::{self, Incoming, OrderRequest, Receipt};
use crate::entities::product::{Order, Product};

#[derive(Debug, Subcommand)]
pub enum StockCommands {
    /// Receive units (new product, or top up one with the same code or name)
    In(InArgs),
    /// Dispatch an order
    Out(OutArgs),
    /// List products on hand
    List,
    /// List dispatched orders
    Orders,
}

#[derive(Debug, Args)]
pub struct InArgs {
    /// Product code
    #[arg(long)]
    pub code: String,

    /// Product name
    #[arg(long)]
    pub name: String,

    /// Units received
    #[arg(long, short = 'q')]
    pub quantity: u32,

    /// Unit value in BRL (required for new products)
    #[arg(long)]
    pub unit_value: Option<f64>,

    /// Manufacturing date
    #[arg(long)]
    pub manufactured: Option<String>,

    #[arg(long)]
    pub supplier: Option<String>,

    /// Storage location
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Debug, Args)]
pub struct OutArgs {
    /// Order code
    #[arg(long)]
    pub order: String,

    /// Product name
    #[arg(long)]
    pub product: String,

    #[arg(long)]
    pub customer: String,

    /// Units requested
    #[arg(long, short = 'q')]
    pub quantity: u32,
}

#[derive(Debug, Serialize, Tabled)]
struct ProductRow {
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "QTY")]
    quantity: u32,
    #[tabled(rename = "UNIT VALUE")]
    unit_value: String,
    #[tabled(rename = "SUPPLIER")]
    supplier: String,
    #[tabled(rename = "LOCATION")]
    location: String,
}

#[derive(Debug, Serialize, Tabled)]
struct OrderRow {
    #[tabled(rename = "ORDER")]
    code: String,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "REQUESTED")]
    requested: u32,
    #[tabled(rename = "DELIVERED")]
    delivered: u32,
    #[tabled(rename = "TOTAL")]
    total: String,
}

pub fn run(cmd: StockCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        StockCommands::In(args) => run_in(args, global),
        StockCommands::Out(args) => run_out(args, global),
        StockCommands::List => run_list(global),
        StockCommands::Orders => run_orders(global),
    }
}

fn run_in(args: InArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Inventory)?;
    let incoming = Incoming {
        code: args.code,
        name: args.name,
        manufactured: args.manufactured,
        supplier: args.supplier,
        quantity: args.quantity,
        location: args.location,
        unit_value: args.unit_value,
    };

    let receipt = inventory::receive_into(&session.dir, incoming).into_diagnostic()?;
    match &receipt {
        Receipt::Created(p) => helpers::success(format!(
            "Registered {} ({}) with {} units at {}",
            style(&p.name).yellow(),
            p.code,
            p.quantity,
            format_money(p.unit_value)
        )),
        Receipt::Restocked { product, added } => {
            println!("Product already registered; quantity updated.");
            helpers::success(format!(
                "Added {} units to {} ({}), now {}",
                added,
                style(&product.name).yellow(),
                product.code,
                product.quantity
            ));
        }
    }
    Ok(())
}

fn run_out(args: OutArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Inventory)?;
    let request = OrderRequest {
        code: args.order,
        customer: args.customer,
        product: args.product,
        quantity: args.quantity,
    };

    let order = inventory::dispatch_order(&session.dir, request).into_diagnostic()?;
    if order.is_partial() {
        println!(
            "{}",
            style(format!(
                "Insufficient stock: order partially fulfilled ({} of {})",
                order.quantity, order.requested
            ))
            .yellow()
        );
    }
    helpers::success(format!(
        "Order {} for {}: {} × {} = {}",
        order.code,
        order.customer,
        order.quantity,
        order.product,
        format_money(order.total)
    ));
    Ok(())
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Inventory)?;
    let products: Vec<Product> = session.dir.load().into_diagnostic()?;
    let sorted = inventory::sorted_by_name(&products);

    if sorted.is_empty() {
        println!("No products in stock.");
        return Ok(());
    }
    if global.format == OutputFormat::Json {
        return output::print_json(&sorted);
    }

    let rows: Vec<ProductRow> = sorted
        .iter()
        .map(|p| ProductRow {
            code: p.code.clone(),
            name: truncate_str(&p.name, 30),
            quantity: p.quantity,
            unit_value: format!("{:.2}", p.unit_value),
            supplier: output::or_dash(&p.supplier),
            location: output::or_dash(&p.location),
        })
        .collect();
    output::print_rows(&rows, global.format, |r| r.code.clone())?;

    if matches!(global.format, OutputFormat::Auto | OutputFormat::Table) {
        println!(
            "{} {}",
            style("Stock value:").dim(),
            format_money(inventory::inputs_cost(&products))
        );
    }
    Ok(())
}

fn run_orders(global: &GlobalOpts) -> Result<()> {
    let session = Session::for_module(global, Module::Inventory)?;
    let orders: Vec<Order> = session.dir.load().into_diagnostic()?;

    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }
    if global.format == OutputFormat::Json {
        return output::print_json(&orders);
    }

    let rows: Vec<OrderRow> = orders
        .iter()
        .map(|o| OrderRow {
            code: o.code.clone(),
            customer: truncate_str(&o.customer, 24),
            product: truncate_str(&o.product, 24),
            requested: o.requested,
            delivered: o.quantity,
            total: format_money(o.total),
        })
        .collect();
    output::print_rows(&rows, global.format, |r| r.code.clone())
}
