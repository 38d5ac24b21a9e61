/// Database layer for Taskgraph
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Database migration runner (sqlx migrations)
///
/// Models live in the `models` module at the crate root.

pub mod migrations;
pub mod pool;
