//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto if is_list => OutputFormat::Table,
        other => other,
    }
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

/// CSV with a header row on stdout
pub fn print_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()
}

/// Rounded box table on stdout
pub fn print_table<T: Tabled>(rows: &[T]) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

/// Print listing rows in the requested format
///
/// `key` picks the value printed by `--format id`. `Auto` renders a table.
pub fn print_rows<T, K>(rows: &[T], format: OutputFormat, key: K) -> Result<()>
where
    T: Tabled + Serialize,
    K: Fn(&T) -> String,
{
    match effective_format(format, true) {
        OutputFormat::Json => print_json(rows),
        OutputFormat::Csv => print_csv(rows),
        OutputFormat::Id => {
            for row in rows {
                println!("{}", key(row));
            }
            Ok(())
        }
        OutputFormat::Table | OutputFormat::Auto => {
            print_table(rows);
            Ok(())
        }
    }
}

/// Render an optional text column
pub fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}
