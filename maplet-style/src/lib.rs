pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod fields;
pub mod meta;
pub mod reconcile;
pub mod vector_style;
