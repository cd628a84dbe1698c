//! # taskdeck API Server Library
//!
//! This library provides the core functionality for the taskdeck API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `membership`: The project membership rule (≤ 3 members per project)
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod membership;
pub mod routes;
