//! Tabular result-set model: columns with metadata, rows of scalar values

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row of scalar values, positionally aligned with the columns.
pub type Row = Vec<Value>;

/// The column/row output of a query, the pipeline's primary input.
///
/// Rows hold heterogeneous JSON scalars; `Value::Null` is a first-class
/// cell value, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(columns: Vec<ColumnMeta>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Position of the column with the given name, if any.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    /// Position of the first column marked as a primary key.
    pub fn primary_key_index(&self) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.semantic_type == Some(SemanticType::PrimaryKey))
    }

    /// Row at `index`, or `None` when the index is out of range.
    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }
}

/// Metadata for a single result-set column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub display_name: String,
    pub base_type: BaseType,
    pub semantic_type: Option<SemanticType>,
    pub binning_info: Option<BinningInfo>,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, base_type: BaseType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            base_type,
            semantic_type: None,
            binning_info: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_semantic_type(mut self, semantic_type: SemanticType) -> Self {
        self.semantic_type = Some(semantic_type);
        self
    }

    pub fn with_binning(mut self, bin_width: f64) -> Self {
        self.binning_info = Some(BinningInfo { bin_width });
        self
    }
}

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Text,
    Integer,
    Float,
    Boolean,
}

/// Semantic role of a column, beyond its storage type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    PrimaryKey,
    ForeignKey,
    Latitude,
    Longitude,
    Quantity,
}

/// Binning applied to a numeric column by the query layer.
///
/// Bins are addressed by their left/bottom edge, so bounds computed over
/// binned coordinates must be padded by the bin width on the far side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinningInfo {
    pub bin_width: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn column_index_matches_by_exact_name() {
        let rs = ResultSet::new(
            vec![
                ColumnMeta::new("id", BaseType::Integer),
                ColumnMeta::new("geometry", BaseType::Text),
            ],
            vec![],
        );
        assert_eq!(rs.column_index("geometry"), Some(1));
        assert_eq!(rs.column_index("Geometry"), None);
    }

    #[test]
    fn primary_key_index_finds_first_pk_column() {
        let rs = ResultSet::new(
            vec![
                ColumnMeta::new("name", BaseType::Text),
                ColumnMeta::new("id", BaseType::Integer).with_semantic_type(SemanticType::PrimaryKey),
                ColumnMeta::new("other_id", BaseType::Integer)
                    .with_semantic_type(SemanticType::PrimaryKey),
            ],
            vec![],
        );
        assert_eq!(rs.primary_key_index(), Some(1));
    }

    #[test]
    fn row_lookup_is_none_out_of_range() {
        let rs = ResultSet::new(
            vec![ColumnMeta::new("id", BaseType::Integer)],
            vec![vec![json!(1)]],
        );
        assert!(rs.row(0).is_some());
        assert!(rs.row(1).is_none());
    }
}
