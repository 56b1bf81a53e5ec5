// src/error/mod.rs
//
// Error Module - Source and Mutation Failures

pub mod types;

pub use types::{MutationError, SourceError, SourceResult};
