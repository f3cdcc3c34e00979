use crate::feature::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request id under which a layer's realized source data is cached.
pub const SOURCE_DATA_REQUEST_ID: &str = "source";

/// A single snapshot of fetched source data. `data` is `None` while the
/// fetch is in flight or has never been issued; consumers treat that as
/// "no features" rather than an error.
///
/// Staleness is the caller's concern: a newer request may complete before
/// an older one, and outputs computed from superseded snapshots must be
/// discarded upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<FeatureCollection>,
}

impl DataRequest {
    pub fn new(data: FeatureCollection) -> Self {
        Self { data: Some(data) }
    }

    /// A request whose data has not arrived yet.
    pub fn pending() -> Self {
        Self { data: None }
    }

    pub fn data(&self) -> Option<&FeatureCollection> {
        self.data.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Keyed store of the data requests a layer has issued.
#[derive(Debug, Clone, Default)]
pub struct DataRequestCache {
    requests: HashMap<String, DataRequest>,
}

impl DataRequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, request_id: impl Into<String>, request: DataRequest) {
        self.requests.insert(request_id.into(), request);
    }

    pub fn get(&self, request_id: &str) -> Option<&DataRequest> {
        self.requests.get(request_id)
    }

    /// The request carrying the layer's realized source features, if any.
    pub fn source_data_request(&self) -> Option<&DataRequest> {
        self.get(SOURCE_DATA_REQUEST_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_request_has_no_data() {
        let request = DataRequest::pending();
        assert!(!request.has_data());
        assert_eq!(request.data(), None);
    }

    #[test]
    fn test_cache_source_request_lookup() {
        let mut cache = DataRequestCache::new();
        assert!(cache.source_data_request().is_none());

        cache.insert(
            SOURCE_DATA_REQUEST_ID,
            DataRequest::new(FeatureCollection::default()),
        );
        let request = cache.source_data_request().unwrap();
        assert!(request.has_data());
    }
}
