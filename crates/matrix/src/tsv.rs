//! Per-field type coercion for tab-separated records.

use std::fmt;
use std::sync::Arc;

/// Converts raw field text into a [`Cell`] for a custom column type.
pub trait ValueAdapter: fmt::Debug + Send + Sync {
    /// `None` when the text isn't a valid value for this column.
    fn deserialize(&self, raw: &str) -> Option<Cell>;
}

/// Target type of one column.
#[derive(Debug, Clone)]
pub enum ColumnType {
    Integer,
    Long,
    Float,
    Double,
    Text,
    Adapter(Arc<dyn ValueAdapter>),
}

/// A converted field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
}

/// Convert each field to its column's type.
///
/// Only the first `min(values.len(), types.len())` fields are converted. An
/// `Integer` field that holds a decimal widens its column to `Double` in
/// `types` and is converted again; any other failure keeps the raw text.
pub fn convert_columns(values: &[&str], types: &mut [ColumnType]) -> Vec<Cell> {
    let columns = values.len().min(types.len());
    let mut cells = Vec::with_capacity(columns);

    for (index, raw) in values.iter().copied().take(columns).enumerate() {
        let cell = match convert(raw, &types[index]) {
            Some(cell) => cell,
            None if matches!(types[index], ColumnType::Integer) && is_double(raw) => {
                tracing::trace!(column = index, value = raw, "widening integer column to double");
                types[index] = ColumnType::Double;
                convert(raw, &types[index]).unwrap_or_else(|| Cell::Text(raw.to_string()))
            }
            None => Cell::Text(raw.to_string()),
        };
        cells.push(cell);
    }
    cells
}

fn convert(raw: &str, ty: &ColumnType) -> Option<Cell> {
    match ty {
        ColumnType::Integer => raw.parse().ok().map(Cell::Integer),
        ColumnType::Long => raw.trim().parse().ok().map(Cell::Long),
        ColumnType::Float => raw.trim().parse().ok().map(Cell::Float),
        ColumnType::Double => raw.trim().parse().ok().map(Cell::Double),
        ColumnType::Text => Some(Cell::Text(raw.to_string())),
        ColumnType::Adapter(adapter) => adapter.deserialize(raw),
    }
}

fn is_double(raw: &str) -> bool {
    raw.trim().parse::<f64>().is_ok()
}
