use crate::error::MapletStyleError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, VariantNames};

/// The closed set of styleable properties on a vector layer.
///
/// String lookup goes through `FromStr`; out-of-set names surface
/// `UnknownStyleProperty` instead of silently extending the schema.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum StylePropertyKey {
    FillColor,
    LineColor,
    IconSize,
    Icon,
    IconOrientation,
    LabelText,
    LabelBorderColor,
    LabelBorderSize,
    LabelColor,
    LabelSize,
    LineWidth,
    SymbolizeAs,
}

impl StylePropertyKey {
    pub fn from_name(name: &str) -> Result<Self, MapletStyleError> {
        name.parse()
            .map_err(|_| MapletStyleError::UnknownStyleProperty(name.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleType {
    Static,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldOrigin {
    Source,
    Join,
}

/// A dynamic property's binding to an attribute field on the data source
/// (or on a joined term source, which this crate leaves untouched).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReference {
    pub name: String,
    pub origin: FieldOrigin,
}

/// Options bag carried by every style property. The field binding is the
/// only option this crate interprets; every sibling option (color stops,
/// size range, label template, ...) is preserved verbatim through the
/// flattened map so reconciliation can never corrupt it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylePropertyOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldReference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StylePropertyOptions {
    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn with_field(mut self, field: FieldReference) -> Self {
        self.field = Some(field);
        self
    }

    pub fn without_field(&self) -> Self {
        Self {
            field: None,
            extra: self.extra.clone(),
        }
    }
}

/// One style rule: a static value, a field-driven dynamic value, or the
/// legacy untyped shape that carries no `type` tag at all.
///
/// `Untyped` exists only so that descriptors written by old versions
/// round-trip byte-for-byte; nothing outside the default table produces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StylePropertyRepr", into = "StylePropertyRepr")]
pub enum StyleProperty {
    Static(StylePropertyOptions),
    Dynamic(StylePropertyOptions),
    Untyped(StylePropertyOptions),
}

impl StyleProperty {
    pub fn style_type(&self) -> Option<StyleType> {
        match self {
            Self::Static(_) => Some(StyleType::Static),
            Self::Dynamic(_) => Some(StyleType::Dynamic),
            Self::Untyped(_) => None,
        }
    }

    pub fn options(&self) -> &StylePropertyOptions {
        match self {
            Self::Static(options) | Self::Dynamic(options) | Self::Untyped(options) => options,
        }
    }

    pub fn field(&self) -> Option<&FieldReference> {
        self.options().field.as_ref()
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

/// Wire shape of a style property: optional `type` tag plus options.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StylePropertyRepr {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    style_type: Option<StyleType>,
    #[serde(default)]
    options: StylePropertyOptions,
}

impl From<StylePropertyRepr> for StyleProperty {
    fn from(repr: StylePropertyRepr) -> Self {
        match repr.style_type {
            Some(StyleType::Static) => Self::Static(repr.options),
            Some(StyleType::Dynamic) => Self::Dynamic(repr.options),
            None => Self::Untyped(repr.options),
        }
    }
}

impl From<StyleProperty> for StylePropertyRepr {
    fn from(property: StyleProperty) -> Self {
        let (style_type, options) = match property {
            StyleProperty::Static(options) => (Some(StyleType::Static), options),
            StyleProperty::Dynamic(options) => (Some(StyleType::Dynamic), options),
            StyleProperty::Untyped(options) => (None, options),
        };
        Self {
            style_type,
            options,
        }
    }
}

/// The per-layer style configuration: an immutable mapping from the closed
/// key set to style properties. Keys absent from the map simply have no
/// configured style; transforms return fresh descriptors and never mutate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    #[serde(default)]
    pub properties: BTreeMap<StylePropertyKey, StyleProperty>,
}

impl StyleDescriptor {
    pub fn new(properties: BTreeMap<StylePropertyKey, StyleProperty>) -> Self {
        Self { properties }
    }

    pub fn from_value(value: Value) -> Result<Self, MapletStyleError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn get(&self, key: StylePropertyKey) -> Option<&StyleProperty> {
        self.properties.get(&key)
    }

    /// Copy of this descriptor with every unconfigured key filled from the
    /// default-style table. Stored descriptors are often partial; this is
    /// the explicit completion step, reconciliation never adds keys itself.
    pub fn with_defaults(&self) -> Self {
        let mut properties = self.properties.clone();
        for key in StylePropertyKey::iter() {
            properties
                .entry(key)
                .or_insert_with(|| crate::defaults::default_style_property(key));
        }
        Self { properties }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_key_names() {
        assert_eq!(StylePropertyKey::FillColor.to_string(), "fillColor");
        assert_eq!(StylePropertyKey::SymbolizeAs.to_string(), "symbolizeAs");
        assert_eq!(
            StylePropertyKey::from_name("labelBorderSize").unwrap(),
            StylePropertyKey::LabelBorderSize
        );
        assert!(matches!(
            StylePropertyKey::from_name("notAStyleProperty"),
            Err(MapletStyleError::UnknownStyleProperty(name)) if name == "notAStyleProperty"
        ));
    }

    #[test]
    fn test_property_round_trip_static() {
        let value = json!({ "type": "STATIC", "options": { "color": "#FF0000" } });
        let property: StyleProperty = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(property.style_type(), Some(StyleType::Static));
        assert_eq!(serde_json::to_value(&property).unwrap(), value);
    }

    #[test]
    fn test_property_round_trip_dynamic_with_field() {
        let value = json!({
            "type": "DYNAMIC",
            "options": {
                "color": "Blues",
                "field": { "name": "population", "origin": "SOURCE" }
            }
        });
        let property: StyleProperty = serde_json::from_value(value.clone()).unwrap();
        assert!(property.is_dynamic());
        assert_eq!(property.field().unwrap().name, "population");
        assert_eq!(property.field().unwrap().origin, FieldOrigin::Source);
        assert_eq!(serde_json::to_value(&property).unwrap(), value);
    }

    #[test]
    fn test_property_round_trip_untyped() {
        // legacy shape: no type tag
        let value = json!({ "options": { "size": "SMALL" } });
        let property: StyleProperty = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(property.style_type(), None);
        assert_eq!(serde_json::to_value(&property).unwrap(), value);
    }

    #[test]
    fn test_descriptor_rejects_unknown_key() {
        let result = StyleDescriptor::from_value(json!({
            "properties": {
                "glowColor": { "type": "STATIC", "options": {} }
            }
        }));
        assert!(matches!(
            result,
            Err(MapletStyleError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_with_defaults_completes_every_key() {
        let descriptor = StyleDescriptor::from_value(json!({
            "properties": {
                "fillColor": { "type": "STATIC", "options": { "color": "#00FF00" } }
            }
        }))
        .unwrap();

        let complete = descriptor.with_defaults();
        assert_eq!(complete.properties.len(), StylePropertyKey::VARIANTS.len());
        // configured keys are untouched
        assert_eq!(
            complete.get(StylePropertyKey::FillColor),
            descriptor.get(StylePropertyKey::FillColor)
        );
        // unconfigured keys come from the default table
        assert_eq!(
            serde_json::to_value(complete.get(StylePropertyKey::Icon).unwrap()).unwrap(),
            json!({ "type": "STATIC", "options": { "value": "marker" } })
        );
    }
}
