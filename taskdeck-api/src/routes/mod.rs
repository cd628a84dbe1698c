/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `meta`: Service metadata endpoints (`/`, `/api/`)
/// - `health`: Health check endpoint
/// - `users`: User CRUD endpoints
/// - `projects`: Project listing and membership endpoints
/// - `tasks`: Task listing endpoints

pub mod health;
pub mod meta;
pub mod projects;
pub mod tasks;
pub mod users;
