use crate::defaults::fallback_for_invalidated;
use crate::descriptor::{FieldOrigin, StyleDescriptor, StyleProperty};
use std::collections::{BTreeMap, BTreeSet};

/// Result of reconciling a descriptor against the source's current fields.
///
/// `has_changes` is false iff every dynamic SOURCE binding still resolved,
/// in which case `next_style_descriptor` is value-equal to the input.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorChanges {
    pub has_changes: bool,
    pub next_style_descriptor: StyleDescriptor,
}

/// Build a corrected descriptor in which every dynamic property bound to a
/// SOURCE field that is no longer present has been replaced by its default
/// fallback. Everything else passes through unchanged, including JOIN-origin
/// bindings (join management owns those) and dynamic properties with no
/// field reference at all.
///
/// Pure over (descriptor, valid field names); the input is never mutated.
pub fn descriptor_with_missing_style_props_removed(
    descriptor: &StyleDescriptor,
    valid_field_names: &BTreeSet<String>,
) -> DescriptorChanges {
    let mut has_changes = false;
    let mut properties = BTreeMap::new();

    for (key, property) in &descriptor.properties {
        let next = match missing_source_field(property, valid_field_names) {
            Some(field_name) => {
                tracing::debug!(
                    key = %key,
                    field = field_name,
                    "replacing style property bound to a missing field"
                );
                has_changes = true;
                fallback_for_invalidated(*key, property.options())
            }
            None => property.clone(),
        };
        properties.insert(*key, next);
    }

    DescriptorChanges {
        has_changes,
        next_style_descriptor: StyleDescriptor::new(properties),
    }
}

/// Name of the property's SOURCE field binding when that field is no longer
/// among the valid names; `None` when the property needs no substitution.
fn missing_source_field<'a>(
    property: &'a StyleProperty,
    valid_field_names: &BTreeSet<String>,
) -> Option<&'a str> {
    let StyleProperty::Dynamic(options) = property else {
        return None;
    };
    let field = options.field.as_ref()?;
    (field.origin == FieldOrigin::Source && !valid_field_names.contains(&field.name))
        .then_some(field.name.as_str())
}
