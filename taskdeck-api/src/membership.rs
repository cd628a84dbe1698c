/// Project membership rule enforcement
///
/// Gatekeeper for adding a user to a project. Membership only grows through
/// this entry point, so the cap check here (plus the store's atomic
/// check-then-insert) is sufficient to keep every project at or below
/// [`MAX_PROJECT_MEMBERS`] members.
///
/// Precondition checks run in a fixed order:
/// 1. project exists - else `NotFound`
/// 2. user exists, looked up by email - else `NotFound`
/// 3. user not already a member - else `Conflict` (rejected, not ignored)
/// 4. member count below the cap - else `CapacityExceeded`
///
/// Checks 3 and 4 happen inside `Store::add_member` under the store's
/// transactional guarantee, which closes the race where two concurrent adds
/// both observe a count of 2.

use crate::error::{ApiError, ApiResult};
use taskdeck_shared::models::{Project, MAX_PROJECT_MEMBERS};
use taskdeck_shared::store::Store;

/// Resolves the email to a user and adds them to the project, enforcing the
/// member cap.
///
/// Returns the project together with its member count after the add.
pub async fn add_member_by_email(
    store: &dyn Store,
    project_id: i64,
    email: &str,
) -> ApiResult<(Project, i64)> {
    let project = store
        .find_project(project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    store.add_member(project.id, user.id).await?;

    let user_count = store.count_members(project.id).await?;

    tracing::info!(
        project_id = project.id,
        user_id = user.id,
        user_count,
        "User added to project"
    );

    Ok((project, user_count))
}

/// Whether the given email belongs to a member of the project.
///
/// Unknown emails count as non-members; the caller decides how to surface
/// that (task listing turns it into `Forbidden`).
pub async fn is_member_email(
    store: &dyn Store,
    project_id: i64,
    email: &str,
) -> ApiResult<bool> {
    let Some(user) = store.find_user_by_email(email).await? else {
        return Ok(false);
    };

    Ok(store.is_member(project_id, user.id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_shared::models::{CreateProject, CreateUser};
    use taskdeck_shared::store::MemStore;

    async fn seed_user(store: &MemStore, email: &str) {
        store
            .create_user(CreateUser {
                name: "Member".to_string(),
                email: email.to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
    }

    async fn seed_project(store: &MemStore) -> Project {
        store
            .create_project(CreateProject {
                title: "Apollo".to_string(),
                description: None,
                order: 0,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_member_happy_path() {
        let store = MemStore::new();
        let project = seed_project(&store).await;
        seed_user(&store, "a@example.com").await;

        let (returned, user_count) =
            add_member_by_email(&store, project.id, "a@example.com")
                .await
                .unwrap();

        assert_eq!(returned.id, project.id);
        assert_eq!(user_count, 1);
        assert!(is_member_email(&store, project.id, "a@example.com")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_missing_project_is_not_found() {
        let store = MemStore::new();
        seed_user(&store, "a@example.com").await;

        let err = add_member_by_email(&store, 99, "a@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let store = MemStore::new();
        let project = seed_project(&store).await;

        let err = add_member_by_email(&store, project.id, "ghost@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_member_is_conflict() {
        let store = MemStore::new();
        let project = seed_project(&store).await;
        seed_user(&store, "a@example.com").await;

        add_member_by_email(&store, project.id, "a@example.com")
            .await
            .unwrap();
        let err = add_member_by_email(&store, project.id, "a@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_fourth_member_is_capacity_exceeded() {
        let store = MemStore::new();
        let project = seed_project(&store).await;

        for i in 0..MAX_PROJECT_MEMBERS {
            let email = format!("m{}@example.com", i);
            seed_user(&store, &email).await;
            add_member_by_email(&store, project.id, &email)
                .await
                .unwrap();
        }

        seed_user(&store, "overflow@example.com").await;
        let err = add_member_by_email(&store, project.id, "overflow@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::CapacityExceeded(_)));
        // Membership is unchanged by the failed add
        assert!(!is_member_email(&store, project.id, "overflow@example.com")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_non_member_email_is_not_member() {
        let store = MemStore::new();
        let project = seed_project(&store).await;
        seed_user(&store, "outsider@example.com").await;

        assert!(!is_member_email(&store, project.id, "outsider@example.com")
            .await
            .unwrap());
        // Unknown email behaves the same way
        assert!(!is_member_email(&store, project.id, "ghost@example.com")
            .await
            .unwrap());
    }
}
