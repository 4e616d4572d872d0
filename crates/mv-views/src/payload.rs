//! Hover and click payloads delivered to caller callbacks

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mv_core::{ColumnMeta, ResultSet};
use mv_render::ShapeId;

/// One column/value pair from the row behind an interacted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub column: ColumnMeta,
    pub value: Value,
}

/// Payload for hover-start events. Hover-end is delivered as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverPayload {
    pub dimensions: Vec<Dimension>,
    pub source: ShapeId,
}

/// Payload for click events.
///
/// Both primary-key fields are `None` when the result set has no
/// primary-key column; that is a valid state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickPayload {
    pub dimensions: Vec<Dimension>,
    pub source: ShapeId,
    pub primary_key_column: Option<ColumnMeta>,
    pub primary_key_value: Option<Value>,
}

/// Zip the columns with the row at `row_index`.
///
/// A stale index (the result set was replaced between render and event
/// delivery) degrades to all-null values instead of failing.
pub fn dimensions_for_row(result_set: &ResultSet, row_index: usize) -> Vec<Dimension> {
    let row = result_set.row(row_index);
    result_set
        .columns
        .iter()
        .enumerate()
        .map(|(col_index, column)| Dimension {
            column: column.clone(),
            value: row
                .and_then(|row| row.get(col_index))
                .cloned()
                .unwrap_or(Value::Null),
        })
        .collect()
}
