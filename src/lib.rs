//! Client-side resource layer for the puja booking portal: typed stores
//! over the REST API, one per backend collection, plus the shared HTTP
//! client and the third-party geo lookups the address forms use.

pub mod client;
pub mod config;
pub mod errors;
pub mod geo;
pub mod models;
pub mod notify;
pub mod stores;
