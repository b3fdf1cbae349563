pub mod config;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod geo;
pub mod gtfs_rt;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod stops;

pub use error::Error;
