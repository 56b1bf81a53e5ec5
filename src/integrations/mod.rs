// src/integrations/mod.rs
//
// External Integrations Module
//
// Remote API clients. They implement the source ports the stores consume
// and never touch store state directly.

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbConfig};
