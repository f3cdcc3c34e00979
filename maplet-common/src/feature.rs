use crate::geometry::GeometryFamily;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GeoJSON-shaped feature collection, reduced to the parts this core reads.
///
/// Coordinates are never inspected (painting and hit-testing live elsewhere),
/// so only the geometry type string and the attribute map are modeled;
/// anything else in the source JSON is ignored on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<FeatureGeometry>,
    // GeoJSON allows a null properties member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
}

impl Feature {
    /// Family of this feature's geometry. Features with no geometry at all
    /// classify as `Other`, same as an unrecognized type string.
    pub fn geometry_family(&self) -> GeometryFamily {
        self.geometry
            .as_ref()
            .map(|geometry| GeometryFamily::from_geojson_type(&geometry.geometry_type))
            .unwrap_or(GeometryFamily::Other)
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|properties| properties.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_ignores_coordinates() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
                    "properties": { "population": 350 }
                }
            ]
        }))
        .unwrap();

        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.geometry_family(), GeometryFamily::Point);
        assert_eq!(feature.property("population"), Some(&json!(350)));
    }

    #[test]
    fn test_null_properties_and_missing_geometry() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "geometry": null, "properties": null }
            ]
        }))
        .unwrap();

        let feature = &collection.features[0];
        assert_eq!(feature.geometry_family(), GeometryFamily::Other);
        assert_eq!(feature.property("anything"), None);
    }
}
