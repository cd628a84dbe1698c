/// In-memory store for testing
///
/// Implements [`Store`] over mutex-guarded vectors. Useful for:
/// - Exercising handlers and the membership rule without a database
/// - Property tests for the member cap under concurrency
///
/// All semantics mirror `PgStore`: ids are assigned sequentially starting at
/// 1, listings are in insertion order, email uniqueness is checked on every
/// user write, and deleting a user or project removes the dependent rows the
/// database would cascade away. Because every operation runs under one
/// mutex, the check-then-insert sequence in `add_member` is atomic here for
/// free.

use crate::models::{
    CreateProject, CreateTask, CreateUser, Membership, Project, ProjectSummary, Task, UpdateUser,
    User, MAX_PROJECT_MEMBERS,
};
use crate::store::{Store, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct MemState {
    users: Vec<User>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    memberships: Vec<Membership>,
    next_user_id: i64,
    next_project_id: i64,
    next_task_id: i64,
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemStore {
    state: Mutex<MemState>,
}

impl MemStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut state = self.state.lock().expect("store lock poisoned");

        if state.users.iter().any(|u| u.email == data.email) {
            return Err(StoreError::DuplicateEmail);
        }

        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            name: data.name,
            email: data.email,
            password: data.password,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());

        Ok(user)
    }

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state.users.clone())
    }

    async fn update_user(&self, id: i64, data: UpdateUser) -> StoreResult<Option<User>> {
        let mut state = self.state.lock().expect("store lock poisoned");

        // A missing user is None, even when the requested email is taken
        let Some(index) = state.users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(ref email) = data.email {
            if state.users.iter().any(|u| u.email == *email && u.id != id) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let user = &mut state.users[index];

        if let Some(name) = data.name {
            user.name = name;
        }
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(password) = data.password {
            user.password = password;
        }

        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        let mut state = self.state.lock().expect("store lock poisoned");

        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        state.memberships.retain(|m| m.user_id != id);

        Ok(state.users.len() < before)
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        let mut state = self.state.lock().expect("store lock poisoned");

        state.next_project_id += 1;
        let now = Utc::now();
        let project = Project {
            id: state.next_project_id,
            title: data.title,
            description: data.description,
            order: data.order,
            created_at: now,
            updated_at: now,
        };
        state.projects.push(project.clone());

        Ok(project)
    }

    async fn find_project(&self, id: i64) -> StoreResult<Option<Project>> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn list_projects(&self) -> StoreResult<Vec<ProjectSummary>> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state
            .projects
            .iter()
            .map(|p| ProjectSummary {
                project: p.clone(),
                user_count: state
                    .memberships
                    .iter()
                    .filter(|m| m.project_id == p.id)
                    .count() as i64,
            })
            .collect())
    }

    async fn delete_project(&self, id: i64) -> StoreResult<bool> {
        let mut state = self.state.lock().expect("store lock poisoned");

        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        state.tasks.retain(|t| t.project_id != id);
        state.memberships.retain(|m| m.project_id != id);

        Ok(state.projects.len() < before)
    }

    async fn add_member(&self, project_id: i64, user_id: i64) -> StoreResult<Membership> {
        // One lock covers the whole check-then-insert sequence.
        let mut state = self.state.lock().expect("store lock poisoned");

        if !state.projects.iter().any(|p| p.id == project_id) {
            return Err(StoreError::ProjectNotFound);
        }

        if state
            .memberships
            .iter()
            .any(|m| m.project_id == project_id && m.user_id == user_id)
        {
            return Err(StoreError::AlreadyMember);
        }

        let member_count = state
            .memberships
            .iter()
            .filter(|m| m.project_id == project_id)
            .count() as i64;

        if member_count >= MAX_PROJECT_MEMBERS {
            return Err(StoreError::ProjectFull);
        }

        let membership = Membership {
            project_id,
            user_id,
            assigned_at: Utc::now(),
        };
        state.memberships.push(membership.clone());

        Ok(membership)
    }

    async fn is_member(&self, project_id: i64, user_id: i64) -> StoreResult<bool> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state
            .memberships
            .iter()
            .any(|m| m.project_id == project_id && m.user_id == user_id))
    }

    async fn count_members(&self, project_id: i64) -> StoreResult<i64> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state
            .memberships
            .iter()
            .filter(|m| m.project_id == project_id)
            .count() as i64)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut state = self.state.lock().expect("store lock poisoned");

        state.next_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: state.next_task_id,
            title: data.title,
            description: data.description,
            order: data.order,
            project_id: data.project_id,
            created_at: now,
            updated_at: now,
        };
        state.tasks.push(task.clone());

        Ok(task)
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state.tasks.clone())
    }

    async fn list_tasks_by_project(
        &self,
        project_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Task>> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_tasks_by_project(&self, project_id: i64) -> StoreResult<i64> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn seed_user(store: &MemStore, name: &str, email: &str) -> User {
        store
            .create_user(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_project(store: &MemStore, title: &str) -> Project {
        store
            .create_project(CreateProject {
                title: title.to_string(),
                description: None,
                order: 0,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemStore::new();
        seed_user(&store, "John", "john@example.com").await;

        let err = store
            .create_user(CreateUser {
                name: "Impostor".to_string(),
                email: "john@example.com".to_string(),
                password: "other".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_only_supplied_fields() {
        let store = MemStore::new();
        let user = seed_user(&store, "John", "john@example.com").await;

        let updated = store
            .update_user(
                user.id,
                UpdateUser {
                    name: Some("Jane".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Jane");
        assert_eq!(updated.email, "john@example.com");
        assert_eq!(updated.password, "secret");
    }

    #[tokio::test]
    async fn test_update_duplicate_email_rejected() {
        let store = MemStore::new();
        seed_user(&store, "John", "john@example.com").await;
        let jane = seed_user(&store, "Jane", "jane@example.com").await;

        let err = store
            .update_user(
                jane.id,
                UpdateUser {
                    email: Some("john@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_none_even_with_taken_email() {
        let store = MemStore::new();
        seed_user(&store, "John", "john@example.com").await;

        let result = store
            .update_user(
                999,
                UpdateUser {
                    email: Some("john@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_member_cap_enforced() {
        let store = MemStore::new();
        let project = seed_project(&store, "Capped").await;

        for i in 0..3 {
            let user = seed_user(&store, "U", &format!("u{}@example.com", i)).await;
            store.add_member(project.id, user.id).await.unwrap();
        }

        let fourth = seed_user(&store, "U4", "u4@example.com").await;
        let err = store.add_member(project.id, fourth.id).await.unwrap_err();

        assert!(matches!(err, StoreError::ProjectFull));
        assert_eq!(store.count_members(project.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_member_rejected_without_change() {
        let store = MemStore::new();
        let project = seed_project(&store, "P").await;
        let user = seed_user(&store, "John", "john@example.com").await;

        store.add_member(project.id, user.id).await.unwrap();
        let err = store.add_member(project.id, user.id).await.unwrap_err();

        assert!(matches!(err, StoreError::AlreadyMember));
        assert_eq!(store.count_members(project.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_member_to_missing_project() {
        let store = MemStore::new();
        let user = seed_user(&store, "John", "john@example.com").await;

        let err = store.add_member(42, user.id).await.unwrap_err();
        assert!(matches!(err, StoreError::ProjectNotFound));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_member_cap_holds_under_concurrent_adds() {
        let store = Arc::new(MemStore::new());
        let project = seed_project(&store, "Contended").await;

        let mut users = Vec::new();
        for i in 0..8 {
            users.push(seed_user(&store, "U", &format!("c{}@example.com", i)).await);
        }

        let handles: Vec<_> = users
            .into_iter()
            .map(|user| {
                let store = Arc::clone(&store);
                let project_id = project.id;
                tokio::spawn(async move { store.add_member(project_id, user.id).await })
            })
            .collect();

        let results = futures::future::join_all(handles).await;
        let successes = results
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(_))))
            .count();

        assert_eq!(successes, 3);
        assert_eq!(store.count_members(project.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_project_cascades() {
        let store = MemStore::new();
        let project = seed_project(&store, "Doomed").await;
        let user = seed_user(&store, "John", "john@example.com").await;

        store.add_member(project.id, user.id).await.unwrap();
        store
            .create_task(CreateTask {
                title: "T1".to_string(),
                description: None,
                order: 0,
                project_id: project.id,
            })
            .await
            .unwrap();

        assert!(store.delete_project(project.id).await.unwrap());
        assert!(store.list_tasks().await.unwrap().is_empty());
        assert_eq!(store.count_members(project.id).await.unwrap(), 0);
        // The user itself survives
        assert!(store.find_user(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_user_removes_memberships() {
        let store = MemStore::new();
        let project = seed_project(&store, "P").await;
        let user = seed_user(&store, "John", "john@example.com").await;

        store.add_member(project.id, user.id).await.unwrap();
        assert!(store.delete_user(user.id).await.unwrap());

        assert_eq!(store.count_members(project.id).await.unwrap(), 0);
        assert!(store.find_project(project.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_task_pagination_slices_by_id_order() {
        let store = MemStore::new();
        let project = seed_project(&store, "P").await;

        for i in 1..=3 {
            store
                .create_task(CreateTask {
                    title: format!("T{}", i),
                    description: None,
                    order: i,
                    project_id: project.id,
                })
                .await
                .unwrap();
        }

        let page = store
            .list_tasks_by_project(project.id, 2, 2)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "T3");

        // Out-of-range page is empty, not an error
        let empty = store
            .list_tasks_by_project(project.id, 2, 10)
            .await
            .unwrap();
        assert!(empty.is_empty());

        assert_eq!(store.count_tasks_by_project(project.id).await.unwrap(), 3);
    }
}
