//! # taskdeck CSV Importer
//!
//! Parses the user/project/task CSV exports and optionally seeds the
//! database with them. Without `--save` the run is a dry run that only
//! parses and reports counts.
//!
//! ## Usage
//!
//! ```bash
//! # Parse the exports in the current directory
//! cargo run -p taskdeck-import
//!
//! # Parse and write to the database
//! DATABASE_URL=postgresql://localhost/taskdeck cargo run -p taskdeck-import -- --save
//!
//! # Exports living elsewhere
//! cargo run -p taskdeck-import -- /data/exports --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use taskdeck_import::importer::import_all;
use taskdeck_import::records::{
    read_records, ProjectRecord, TaskRecord, UserRecord, PROJECTS_FILE, TASKS_FILE, USERS_FILE,
};
use taskdeck_shared::db::{
    migrations,
    pool::{create_pool, DatabaseConfig},
};
use taskdeck_shared::store::PgStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn read_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(read_records(file)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_import=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "taskdeck CSV Importer v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let mut save_to_db = false;
    let mut base_dir = PathBuf::from(".");

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--save" => save_to_db = true,
            other => base_dir = PathBuf::from(other),
        }
    }

    let users: Vec<UserRecord> = read_file(&base_dir.join(USERS_FILE))?;
    let projects: Vec<ProjectRecord> = read_file(&base_dir.join(PROJECTS_FILE))?;
    let tasks: Vec<TaskRecord> = read_file(&base_dir.join(TASKS_FILE))?;

    tracing::info!(
        users = users.len(),
        projects = projects.len(),
        tasks = tasks.len(),
        "CSV files parsed"
    );

    if !save_to_db {
        tracing::info!("Dry run complete; pass --save to write to the database");
        return Ok(());
    }

    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    let pool = create_pool(DatabaseConfig {
        url,
        ..Default::default()
    })
    .await?;
    migrations::run_migrations(&pool).await?;

    let store = PgStore::new(pool);
    let summary = import_all(&store, users, projects, tasks).await?;

    tracing::info!(total = summary.total(), "Records saved to database");
    Ok(())
}
