use maplet_common::feature::FeatureCollection;
use maplet_common::geometry::{GeometryFamily, GeometryTypeClassification};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Observed numeric range of a field across a feature collection, used to
/// anchor scaled color and size ramps. Only present when at least one
/// numeric observation exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub delta: f64,
}

/// Statistical and categorical metadata plucked from one data snapshot.
/// Recomputed whole on every new snapshot; never merged incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMeta {
    pub geometry_types: GeometryTypeClassification,
    pub field_meta: BTreeMap<String, FieldRange>,
}

/// Scan a feature collection once, classifying its geometry families and
/// accumulating min/max for each requested field. Missing data, malformed
/// geometry, and non-numeric values all degrade to neutral output; this
/// function cannot fail.
pub fn pluck_style_meta(
    collection: Option<&FeatureCollection>,
    field_names: &BTreeSet<String>,
) -> StyleMeta {
    let Some(collection) = collection else {
        return StyleMeta::default();
    };

    let mut families: BTreeSet<GeometryFamily> = BTreeSet::new();
    let mut ranges: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for feature in &collection.features {
        families.insert(feature.geometry_family());
        for name in field_names {
            let Some(value) = feature.property(name).and_then(numeric_value) else {
                continue;
            };
            let range = ranges.entry(name.as_str()).or_insert((value, value));
            range.0 = range.0.min(value);
            range.1 = range.1.max(value);
        }
    }

    StyleMeta {
        geometry_types: GeometryTypeClassification::from_families(&families),
        field_meta: ranges
            .into_iter()
            .map(|(name, (min, max))| {
                (
                    name.to_string(),
                    FieldRange {
                        min,
                        max,
                        delta: max - min,
                    },
                )
            })
            .collect(),
    }
}

/// Numeric reading of a property value: JSON numbers always count, strings
/// count when the whole string parses as a finite f64. Everything else is
/// ignored.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
