// src/integrations/tmdb/mod.rs
//
// TMDB Integration Module

pub mod client;

pub use client::{TmdbClient, TmdbConfig};
