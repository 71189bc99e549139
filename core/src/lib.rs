//! streamdash-core: analytics over a music/podcast streaming catalog.
//!
//! Layers, bottom-up:
//!   store        the only code that talks to SQLite
//!   query_cache  time-based memoization of query results
//!   dashboard    cached, error-tolerant report assembly
//!   web          axum router, sessions and HTML rendering
//!   seed         deterministic demo catalog

pub mod config;
pub mod dashboard;
pub mod error;
pub mod name_generator;
pub mod query_cache;
pub mod reports;
pub mod rng;
pub mod seed;
pub mod store;
pub mod types;
pub mod web;
