//! Visualization settings supplied by the caller on every render

use serde::{Deserialize, Serialize};

/// Column selection and mode configuration for a map view.
///
/// Column settings hold a column name; `None` or a name that matches no
/// result-set column disables that extraction path rather than erroring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapSettings {
    pub polygon_column: Option<String>,
    pub latitude_column: Option<String>,
    pub longitude_column: Option<String>,
    pub metric_column: Option<String>,
    #[serde(default)]
    pub map_type: MapType,
}

impl MapSettings {
    /// Whether the settings that feed geometry extraction are unchanged.
    ///
    /// The view recomputes features only when one of these keys changes;
    /// presentation-only settings never trigger re-extraction.
    pub fn same_geometry_inputs(&self, other: &Self) -> bool {
        self.polygon_column == other.polygon_column
            && self.latitude_column == other.latitude_column
            && self.longitude_column == other.longitude_column
            && self.metric_column == other.metric_column
            && self.map_type == other.map_type
    }
}

/// Map rendering mode. Pin needs only coordinates; Heat and Region
/// additionally require a non-null metric per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    #[default]
    Pin,
    Heat,
    Region,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_inputs_ignore_nothing_relevant() {
        let a = MapSettings {
            polygon_column: Some("geom".into()),
            ..Default::default()
        };
        let mut b = a.clone();
        assert!(a.same_geometry_inputs(&b));

        b.metric_column = Some("count".into());
        assert!(!a.same_geometry_inputs(&b));

        b = a.clone();
        b.map_type = MapType::Heat;
        assert!(!a.same_geometry_inputs(&b));
    }
}
