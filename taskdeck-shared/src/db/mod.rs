/// Database layer for taskdeck
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a startup health check
/// - `migrations`: Database migration runner built on sqlx migrations
///
/// Entity access lives in the `store` module; this module only provides the
/// plumbing underneath `PgStore`.

pub mod migrations;
pub mod pool;
