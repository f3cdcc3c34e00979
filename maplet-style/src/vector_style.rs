use crate::descriptor::{FieldOrigin, StyleDescriptor, StyleProperty};
use crate::fields::{OrdinalField, OrdinalFieldSource};
use crate::meta::{pluck_style_meta, StyleMeta};
use crate::reconcile::{descriptor_with_missing_style_props_removed, DescriptorChanges};
use maplet_common::data_request::DataRequest;
use std::collections::BTreeSet;

/// The style of one vector layer: a descriptor plus the operations that keep
/// it consistent with the layer's data source. Read-only over its inputs;
/// every operation returns fresh values.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStyle {
    descriptor: StyleDescriptor,
}

impl VectorStyle {
    pub fn new(descriptor: StyleDescriptor) -> Self {
        Self { descriptor }
    }

    /// Construct from a possibly partial stored descriptor, filling
    /// unconfigured keys from the default-style table.
    pub fn with_defaults(descriptor: &StyleDescriptor) -> Self {
        Self {
            descriptor: descriptor.with_defaults(),
        }
    }

    pub fn descriptor(&self) -> &StyleDescriptor {
        &self.descriptor
    }

    /// Field names bound by any dynamic property, whatever their origin.
    pub fn dynamic_field_names(&self) -> BTreeSet<String> {
        self.bound_field_names(|_| true)
    }

    /// Field names bound by dynamic properties reading source fields; the
    /// names reconciliation validates.
    pub fn dynamic_source_field_names(&self) -> BTreeSet<String> {
        self.bound_field_names(|origin| origin == FieldOrigin::Source)
    }

    fn bound_field_names(&self, keep_origin: impl Fn(FieldOrigin) -> bool) -> BTreeSet<String> {
        self.descriptor
            .properties
            .values()
            .filter(|property| property.is_dynamic())
            .filter_map(StyleProperty::field)
            .filter(|field| keep_origin(field.origin))
            .map(|field| field.name.clone())
            .collect()
    }

    /// Reconcile this style's descriptor against the source's next field
    /// list. Fields reporting themselves invalid are treated as absent.
    #[tracing::instrument(skip_all)]
    pub fn descriptor_with_missing_style_props_removed(
        &self,
        next_ordinal_fields: &[OrdinalField],
    ) -> DescriptorChanges {
        let valid_field_names: BTreeSet<String> = next_ordinal_fields
            .iter()
            .filter(|field| field.is_valid())
            .map(|field| field.name().to_string())
            .collect();
        descriptor_with_missing_style_props_removed(&self.descriptor, &valid_field_names)
    }

    /// Convenience for callers holding the source itself rather than a
    /// refreshed field list: look up each bound source field and reconcile
    /// against whatever still exists.
    pub fn reconcile_against_source(&self, source: &dyn OrdinalFieldSource) -> DescriptorChanges {
        let next_ordinal_fields: Vec<OrdinalField> = self
            .dynamic_source_field_names()
            .iter()
            .filter_map(|name| source.field_by_name(name))
            .collect();
        self.descriptor_with_missing_style_props_removed(&next_ordinal_fields)
    }

    /// Compute style metadata from a single source-data snapshot. A request
    /// whose data has not arrived yields neutral meta.
    #[tracing::instrument(skip_all)]
    pub fn pluck_style_meta_from_source_data_request(
        &self,
        source_data_request: &DataRequest,
    ) -> StyleMeta {
        pluck_style_meta(source_data_request.data(), &self.dynamic_field_names())
    }
}
