use maplet_common::geometry::GeometryFamily;
use serde::{Deserialize, Serialize};

/// An attribute column currently available on the feature data source.
/// Dynamic style bindings are validated against these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalField {
    name: String,
}

impl OrdinalField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Seam to the data source collaborator that owns field discovery.
pub trait OrdinalFieldSource {
    fn field_by_name(&self, name: &str) -> Option<OrdinalField>;

    fn create_field(&self, name: &str) -> OrdinalField;

    /// Geometry families this source can produce.
    fn supported_shape_types(&self) -> Vec<GeometryFamily>;
}
