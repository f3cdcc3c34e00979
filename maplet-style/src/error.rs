use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapletStyleError {
    // Contract violation on the closed property-key set, not a data condition
    #[error("Unknown style property: {0}")]
    UnknownStyleProperty(String),

    #[error("Invalid style descriptor")]
    InvalidDescriptor(#[from] serde_json::Error),
}
