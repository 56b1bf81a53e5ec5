// src/source/mod.rs
//
// Source Ports - Consumed Capabilities

pub mod catalog_source;

pub use catalog_source::CatalogSource;

#[cfg(test)]
pub use catalog_source::MockCatalogSource;
