//! # taskdeck Import Library
//!
//! CSV parsing and database seeding for taskdeck. Reads user, project, and
//! task CSV exports and writes them through the shared `Store` trait, so the
//! importer works against either PostgreSQL or the in-memory store.
//!
//! ## Modules
//!
//! - `records`: CSV row types and readers
//! - `importer`: seeding logic with skip-existing semantics

pub mod importer;
pub mod records;
