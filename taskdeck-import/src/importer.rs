/// Database seeding from parsed CSV records
///
/// Each `import_*` function writes through the [`Store`] trait and skips
/// rows that already exist (users by email, projects and tasks by title),
/// so re-running the importer is harmless. CSV ids are export artifacts;
/// the store assigns fresh identifiers.
///
/// Tasks in the export carry no project column, so they are attached to the
/// first project in the store. With no project present, tasks are skipped.

use std::collections::HashSet;

use taskdeck_shared::models::{CreateProject, CreateTask, CreateUser};
use taskdeck_shared::store::{Store, StoreError};
use tracing::{debug, info, warn};

use crate::records::{ProjectRecord, TaskRecord, UserRecord};

/// Import error types
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Malformed CSV input
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Unreadable input file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Store write failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Per-entity counts of newly inserted rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub users: usize,
    pub projects: usize,
    pub tasks: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.users + self.projects + self.tasks
    }
}

/// Imports users, skipping emails that already exist.
pub async fn import_users(
    store: &dyn Store,
    records: Vec<UserRecord>,
) -> Result<usize, ImportError> {
    let mut saved = 0;

    for record in records {
        if store.find_user_by_email(&record.email).await?.is_some() {
            debug!(email = %record.email, "User already exists, skipping");
            continue;
        }

        store
            .create_user(CreateUser {
                name: record.name,
                email: record.email,
                password: record.password,
            })
            .await?;
        saved += 1;
    }

    info!(saved, "Users imported");
    Ok(saved)
}

/// Imports projects, skipping titles that already exist.
pub async fn import_projects(
    store: &dyn Store,
    records: Vec<ProjectRecord>,
) -> Result<usize, ImportError> {
    let mut existing: HashSet<String> = store
        .list_projects()
        .await?
        .into_iter()
        .map(|summary| summary.project.title)
        .collect();

    let mut saved = 0;

    for record in records {
        if existing.contains(&record.title) {
            debug!(title = %record.title, "Project already exists, skipping");
            continue;
        }

        existing.insert(record.title.clone());
        store
            .create_project(CreateProject {
                title: record.title,
                description: Some(record.description),
                order: record.order,
            })
            .await?;
        saved += 1;
    }

    info!(saved, "Projects imported");
    Ok(saved)
}

/// Imports tasks into the first project, skipping titles that already exist.
///
/// Returns 0 without writing anything when the store holds no project.
pub async fn import_tasks(
    store: &dyn Store,
    records: Vec<TaskRecord>,
) -> Result<usize, ImportError> {
    let Some(first) = store.list_projects().await?.into_iter().next() else {
        warn!("No projects in store, skipping task import");
        return Ok(0);
    };
    let project_id = first.project.id;

    let mut existing: HashSet<String> = store
        .list_tasks()
        .await?
        .into_iter()
        .map(|task| task.title)
        .collect();

    let mut saved = 0;

    for record in records {
        if existing.contains(&record.title) {
            debug!(title = %record.title, "Task already exists, skipping");
            continue;
        }

        existing.insert(record.title.clone());
        store
            .create_task(CreateTask {
                title: record.title,
                description: Some(record.description),
                order: record.order,
                project_id,
            })
            .await?;
        saved += 1;
    }

    info!(saved, "Tasks imported");
    Ok(saved)
}

/// Imports everything in dependency order: users, projects, then tasks.
pub async fn import_all(
    store: &dyn Store,
    users: Vec<UserRecord>,
    projects: Vec<ProjectRecord>,
    tasks: Vec<TaskRecord>,
) -> Result<ImportSummary, ImportError> {
    let summary = ImportSummary {
        users: import_users(store, users).await?,
        projects: import_projects(store, projects).await?,
        tasks: import_tasks(store, tasks).await?,
    };

    info!(
        users = summary.users,
        projects = summary.projects,
        tasks = summary.tasks,
        total = summary.total(),
        "Import complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_shared::store::MemStore;

    fn user_record(email: &str) -> UserRecord {
        UserRecord {
            id: 1,
            name: "Imported".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    fn project_record(title: &str) -> ProjectRecord {
        ProjectRecord {
            id: 1,
            title: title.to_string(),
            description: "desc".to_string(),
            order: 0,
        }
    }

    fn task_record(title: &str) -> TaskRecord {
        TaskRecord {
            id: 1,
            title: title.to_string(),
            description: "desc".to_string(),
            created_at: "2024-01-01".to_string(),
            order: 0,
        }
    }

    #[tokio::test]
    async fn test_import_users_skips_existing_emails() {
        let store = MemStore::new();
        store
            .create_user(CreateUser {
                name: "John".to_string(),
                email: "john@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        let saved = import_users(
            &store,
            vec![user_record("john@example.com"), user_record("jane@example.com")],
        )
        .await
        .unwrap();

        assert_eq!(saved, 1);
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_projects_skips_duplicate_titles_within_batch() {
        let store = MemStore::new();

        let saved = import_projects(
            &store,
            vec![project_record("Apollo"), project_record("Apollo")],
        )
        .await
        .unwrap();

        assert_eq!(saved, 1);
    }

    #[tokio::test]
    async fn test_import_tasks_attach_to_first_project() {
        let store = MemStore::new();
        import_projects(
            &store,
            vec![project_record("First"), project_record("Second")],
        )
        .await
        .unwrap();

        let saved = import_tasks(&store, vec![task_record("T1")]).await.unwrap();
        assert_eq!(saved, 1);

        let tasks = store.list_tasks().await.unwrap();
        let first = store.list_projects().await.unwrap().remove(0);
        assert_eq!(tasks[0].project_id, first.project.id);
    }

    #[tokio::test]
    async fn test_import_tasks_without_projects_is_a_noop() {
        let store = MemStore::new();

        let saved = import_tasks(&store, vec![task_record("Orphan")]).await.unwrap();

        assert_eq!(saved, 0);
        assert!(store.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_all_counts_per_entity() {
        let store = MemStore::new();

        let summary = import_all(
            &store,
            vec![user_record("a@example.com")],
            vec![project_record("Apollo")],
            vec![task_record("T1"), task_record("T2")],
        )
        .await
        .unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                users: 1,
                projects: 1,
                tasks: 2,
            }
        );
        assert_eq!(summary.total(), 4);
    }
}
