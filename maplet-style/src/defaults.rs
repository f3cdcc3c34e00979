use crate::descriptor::{StyleProperty, StylePropertyKey, StylePropertyOptions};
use crate::error::MapletStyleError;
use lazy_static::lazy_static;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

lazy_static! {
    /// Fallback shape for each style property, applied when a dynamic field
    /// binding is invalidated. Process-wide constant data.
    ///
    /// `labelBorderSize` and `symbolizeAs` keep the legacy untyped shape so
    /// that substituted descriptors round-trip exactly.
    static ref DEFAULT_STYLE_PROPERTIES: BTreeMap<StylePropertyKey, StyleProperty> = {
        use StylePropertyKey::*;
        BTreeMap::from([
            (FillColor, StyleProperty::Static(options([]))),
            (LineColor, StyleProperty::Static(options([]))),
            (IconSize, StyleProperty::Dynamic(options([]))),
            (Icon, StyleProperty::Static(options([("value", json!("marker"))]))),
            (IconOrientation, StyleProperty::Static(options([("orientation", json!(0))]))),
            (LabelText, StyleProperty::Static(options([("value", json!(""))]))),
            (LabelBorderColor, StyleProperty::Static(options([("color", json!("#FFFFFF"))]))),
            (LabelBorderSize, StyleProperty::Untyped(options([("size", json!("SMALL"))]))),
            (LabelColor, StyleProperty::Static(options([("color", json!("#000000"))]))),
            (LabelSize, StyleProperty::Static(options([("size", json!(14))]))),
            (LineWidth, StyleProperty::Static(options([("size", json!(1))]))),
            (SymbolizeAs, StyleProperty::Untyped(options([("value", json!("circle"))]))),
        ])
    };
}

fn options<const N: usize>(entries: [(&str, Value); N]) -> StylePropertyOptions {
    let mut options = StylePropertyOptions::default();
    for (key, value) in entries {
        options = options.with_entry(key, value);
    }
    options
}

/// Fallback for a known property key. Total over the closed key set.
pub fn default_style_property(key: StylePropertyKey) -> StyleProperty {
    DEFAULT_STYLE_PROPERTIES[&key].clone()
}

/// By-name lookup for callers holding a raw key string. Out-of-set names
/// are a programmer error and propagate.
pub fn default_style_property_by_name(name: &str) -> Result<StyleProperty, MapletStyleError> {
    Ok(default_style_property(StylePropertyKey::from_name(name)?))
}

/// The complete default property map, one entry per key.
pub fn default_style_properties() -> BTreeMap<StylePropertyKey, StyleProperty> {
    StylePropertyKey::iter()
        .map(|key| (key, default_style_property(key)))
        .collect()
}

/// Replacement for a property whose field binding no longer resolves.
///
/// Only the shape degrades: the result starts from the invalidated
/// property's options with the field removed, then the table fallback's
/// options are overlaid (table wins on conflicts) under the table
/// fallback's type tag. Sibling options like `iconSize.options.color`
/// survive untouched.
pub fn fallback_for_invalidated(
    key: StylePropertyKey,
    invalidated: &StylePropertyOptions,
) -> StyleProperty {
    let fallback = default_style_property(key);
    let mut options = invalidated.without_field();
    options.field = fallback.options().field.clone();
    for (name, value) in &fallback.options().extra {
        options.extra.insert(name.clone(), value.clone());
    }
    match fallback {
        StyleProperty::Static(_) => StyleProperty::Static(options),
        StyleProperty::Dynamic(_) => StyleProperty::Dynamic(options),
        StyleProperty::Untyped(_) => StyleProperty::Untyped(options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldOrigin, FieldReference};
    use serde_json::json;

    #[test]
    fn test_table_matches_expected_shapes() {
        let table = default_style_properties();
        let as_json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            as_json,
            json!({
                "fillColor": { "type": "STATIC", "options": {} },
                "lineColor": { "type": "STATIC", "options": {} },
                "iconSize": { "type": "DYNAMIC", "options": {} },
                "icon": { "type": "STATIC", "options": { "value": "marker" } },
                "iconOrientation": { "type": "STATIC", "options": { "orientation": 0 } },
                "labelText": { "type": "STATIC", "options": { "value": "" } },
                "labelBorderColor": { "type": "STATIC", "options": { "color": "#FFFFFF" } },
                "labelBorderSize": { "options": { "size": "SMALL" } },
                "labelColor": { "type": "STATIC", "options": { "color": "#000000" } },
                "labelSize": { "type": "STATIC", "options": { "size": 14 } },
                "lineWidth": { "type": "STATIC", "options": { "size": 1 } },
                "symbolizeAs": { "options": { "value": "circle" } },
            })
        );
    }

    #[test]
    fn test_by_name_rejects_unknown_key() {
        assert!(default_style_property_by_name("fillColor").is_ok());
        assert!(matches!(
            default_style_property_by_name("spin"),
            Err(MapletStyleError::UnknownStyleProperty(name)) if name == "spin"
        ));
    }

    #[test]
    fn test_fallback_preserves_sibling_options() {
        let invalidated = StylePropertyOptions::default()
            .with_entry("color", json!("a color"))
            .with_field(FieldReference {
                name: "gone".to_string(),
                origin: FieldOrigin::Source,
            });

        let replacement = fallback_for_invalidated(StylePropertyKey::IconSize, &invalidated);
        assert_eq!(
            serde_json::to_value(&replacement).unwrap(),
            json!({ "type": "DYNAMIC", "options": { "color": "a color" } })
        );
    }

    #[test]
    fn test_fallback_table_options_win_on_conflict() {
        let invalidated = StylePropertyOptions::default()
            .with_entry("value", json!("stale"))
            .with_field(FieldReference {
                name: "gone".to_string(),
                origin: FieldOrigin::Source,
            });

        let replacement = fallback_for_invalidated(StylePropertyKey::Icon, &invalidated);
        assert_eq!(
            serde_json::to_value(&replacement).unwrap(),
            json!({ "type": "STATIC", "options": { "value": "marker" } })
        );
    }
}
