pub mod data_request;
pub mod feature;
pub mod geometry;
