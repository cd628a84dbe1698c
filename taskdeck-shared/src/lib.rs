//! # taskdeck Shared Library
//!
//! This crate contains the data models, persistence layer, and store
//! abstraction shared by the taskdeck API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Entity types and input structs
//! - `store`: The `Store` trait plus Postgres and in-memory implementations
//! - `db`: Connection pool and migration runner

pub mod db;
pub mod models;
pub mod store;

/// Current version of the taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
