use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::VariantNames;

/// Coarse shape category derived from a GeoJSON geometry type string.
///
/// Sources advertise which families they can produce, and a realized feature
/// collection is classified by the set of families it actually contains.
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, VariantNames,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GeometryFamily {
    Point,
    Line,
    Polygon,
    Other,
}

impl GeometryFamily {
    /// Map a GeoJSON geometry type string to its family. Unrecognized
    /// strings (including `GeometryCollection`) classify as `Other`.
    pub fn from_geojson_type(geometry_type: &str) -> Self {
        match geometry_type {
            "Point" | "MultiPoint" => Self::Point,
            "LineString" | "MultiLineString" => Self::Line,
            "Polygon" | "MultiPolygon" => Self::Polygon,
            _ => Self::Other,
        }
    }
}

/// Whether a feature collection contains a single geometry family.
///
/// At most one flag is true. All flags are false for an empty collection,
/// a mixed collection, or any collection containing an `Other` family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryTypeClassification {
    pub is_points_only: bool,
    pub is_lines_only: bool,
    pub is_polygons_only: bool,
}

impl GeometryTypeClassification {
    pub fn from_families(families: &BTreeSet<GeometryFamily>) -> Self {
        let only = |family: GeometryFamily| families.len() == 1 && families.contains(&family);
        Self {
            is_points_only: only(GeometryFamily::Point),
            is_lines_only: only(GeometryFamily::Line),
            is_polygons_only: only(GeometryFamily::Polygon),
        }
    }
}
