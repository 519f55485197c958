use async_trait::async_trait;
use axum_helpers::{ApiResponse, EmptyContent, PagedContent};
use std::sync::Arc;
use tracing::{Span, error, info, warn};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserQuery, UserRequest};
use crate::repository::UserRepository;

/// Business rules over the repository, answered as envelopes.
///
/// Inputs are expected to have passed the validator already.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, input: UserRequest) -> UserResult<ApiResponse<User>>;

    async fn find_all_users(
        &self,
        query: UserQuery,
    ) -> UserResult<ApiResponse<PagedContent<User>>>;

    async fn find_user_by_id(&self, id: Uuid) -> UserResult<ApiResponse<User>>;

    async fn update_user(&self, id: Uuid, input: UserRequest) -> UserResult<ApiResponse<User>>;

    async fn delete_user(&self, id: Uuid) -> UserResult<ApiResponse<EmptyContent>>;
}

#[derive(Clone)]
pub struct DefaultUserService<R: UserRepository> {
    repository: Arc<R>,
    span: Span,
}

impl<R: UserRepository> DefaultUserService<R> {
    pub fn new(repository: R, span: Span) -> Self {
        Self {
            repository: Arc::new(repository),
            span,
        }
    }

    /// Any lookup failure counts as "not found"; data-access errors are logged first.
    async fn existing_user(&self, id: Uuid) -> UserResult<User> {
        match self.repository.find_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                info!(parent: &self.span, user_id = %id, "User not found");
                Err(UserError::NotFound)
            }
            Err(e) => {
                error!(parent: &self.span, user_id = %id, error = %e, "Error while finding user by id");
                Err(UserError::NotFound)
            }
        }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for DefaultUserService<R> {
    async fn create_user(&self, input: UserRequest) -> UserResult<ApiResponse<User>> {
        info!(parent: &self.span, "Create user");

        if let Some(existing) = self
            .repository
            .find_by_email_or_username_or_phone(&input)
            .await?
        {
            warn!(
                parent: &self.span,
                user_id = %existing.id,
                "User with email {}, username {} or phone {} already exists",
                input.email, input.username, input.phone
            );
            return Err(UserError::AlreadyExists(existing));
        }

        let user = self.repository.create(input).await?;
        Ok(ApiResponse::ok("User created successfully", user))
    }

    async fn find_all_users(
        &self,
        query: UserQuery,
    ) -> UserResult<ApiResponse<PagedContent<User>>> {
        info!(parent: &self.span, ?query, "Find all users");

        let users = self.repository.find_all(query).await?;
        if users.is_empty() {
            return Err(UserError::NoUsersFound);
        }

        Ok(ApiResponse::ok(
            "Users found successfully",
            PagedContent::from_results(users),
        ))
    }

    async fn find_user_by_id(&self, id: Uuid) -> UserResult<ApiResponse<User>> {
        info!(parent: &self.span, user_id = %id, "Find user by id");

        let user = self.existing_user(id).await?;
        Ok(ApiResponse::ok("User found", user))
    }

    async fn update_user(&self, id: Uuid, input: UserRequest) -> UserResult<ApiResponse<User>> {
        info!(parent: &self.span, user_id = %id, "Update user by id");

        self.existing_user(id).await?;

        if let Some(existing) = self
            .repository
            .find_by_email_or_username_or_phone_excluding_id(&input, id)
            .await?
        {
            warn!(
                parent: &self.span,
                user_id = %id,
                conflicting_id = %existing.id,
                "Values already held by another user"
            );
            return Err(UserError::ValuesAlreadyExist(existing));
        }

        let user = self.repository.update(id, input).await?;
        Ok(ApiResponse::ok("User updated successfully", user))
    }

    async fn delete_user(&self, id: Uuid) -> UserResult<ApiResponse<EmptyContent>> {
        info!(parent: &self.span, user_id = %id, "Delete user by id");

        self.existing_user(id).await?;

        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound);
        }

        Ok(ApiResponse::ok("User deleted successfully", EmptyContent {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use axum::http::StatusCode;
    use mockall::predicate::eq;

    fn user(id: Uuid) -> User {
        User {
            id,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            phone: "5550100".to_string(),
        }
    }

    fn request() -> UserRequest {
        UserRequest::new("jdoe", "jdoe@example.com", "5550100")
    }

    fn service(repo: MockUserRepository) -> DefaultUserService<MockUserRepository> {
        DefaultUserService::new(repo, Span::none())
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let id = Uuid::now_v7();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_or_username_or_phone()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|input| input.username == "jdoe")
            .times(1)
            .returning(move |_| Ok(user(id)));

        let response = service(repo).create_user(request()).await.unwrap();

        assert_eq!(response.code, 200);
        assert_eq!(response.message, "User created successfully");
        assert_eq!(response.content, user(id));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_skips_insert() {
        let existing = user(Uuid::now_v7());
        let conflict = existing.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_or_username_or_phone()
            .returning(move |_| Ok(Some(conflict.clone())));
        repo.expect_create().never();

        let err = service(repo).create_user(request()).await.unwrap_err();

        assert!(matches!(err, UserError::AlreadyExists(ref u) if *u == existing));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_user_insert_failure_is_500() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_or_username_or_phone()
            .returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(UserError::Database("connection reset".to_string())));

        let err = service(repo).create_user(request()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_create_user_unique_violation_is_400() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_or_username_or_phone()
            .returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(UserError::NonUniqueValues));

        let err = service(repo).create_user(request()).await.unwrap_err();
        assert_eq!(err.client_message(), "Bad request, non-unique values");
    }

    #[tokio::test]
    async fn test_find_all_users_builds_page() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all()
            .returning(|_| Ok(vec![user(Uuid::now_v7()), user(Uuid::now_v7())]));

        let response = service(repo)
            .find_all_users(UserQuery::default())
            .await
            .unwrap();

        assert_eq!(response.message, "Users found successfully");
        assert_eq!(response.content.count, 2);
        assert!(response.content.previous.is_none());
        assert!(response.content.next.is_none());
    }

    #[tokio::test]
    async fn test_find_all_users_empty_is_404() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().returning(|_| Ok(vec![]));

        let err = service(repo)
            .find_all_users(UserQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::NoUsersFound));
    }

    #[tokio::test]
    async fn test_find_all_users_failure_is_500() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all()
            .returning(|_| Err(UserError::Database("timeout".to_string())));

        let err = service(repo)
            .find_all_users(UserQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_find_user_by_id() {
        let id = Uuid::now_v7();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |id| Ok(Some(user(id))));

        let response = service(repo).find_user_by_id(id).await.unwrap();
        assert_eq!(response.message, "User found");
        assert_eq!(response.content.id, id);
    }

    #[tokio::test]
    async fn test_find_user_lookup_error_is_404() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(UserError::Database("timeout".to_string())));

        let err = service(repo)
            .find_user_by_id(Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::NotFound));
    }

    #[tokio::test]
    async fn test_update_user_missing_is_404() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_find_by_email_or_username_or_phone_excluding_id()
            .never();
        repo.expect_update().never();

        let err = service(repo)
            .update_user(Uuid::now_v7(), request())
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::NotFound));
    }

    #[tokio::test]
    async fn test_update_user_values_taken() {
        let id = Uuid::now_v7();
        let other = user(Uuid::now_v7());
        let conflict = other.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(user(id))));
        repo.expect_find_by_email_or_username_or_phone_excluding_id()
            .withf(move |_, exclude_id| *exclude_id == id)
            .returning(move |_, _| Ok(Some(conflict.clone())));
        repo.expect_update().never();

        let err = service(repo).update_user(id, request()).await.unwrap_err();

        assert_eq!(err.client_message(), "Bad request, values already exists");
        assert!(matches!(err, UserError::ValuesAlreadyExist(ref u) if *u == other));
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let id = Uuid::now_v7();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(user(id))));
        repo.expect_find_by_email_or_username_or_phone_excluding_id()
            .returning(|_, _| Ok(None));
        repo.expect_update()
            .with(eq(id), eq(request()))
            .returning(|id, _| Ok(user(id)));

        let response = service(repo).update_user(id, request()).await.unwrap();
        assert_eq!(response.message, "User updated successfully");
        assert_eq!(response.content.id, id);
    }

    #[tokio::test]
    async fn test_update_user_unique_violation_is_400() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(user(id))));
        repo.expect_find_by_email_or_username_or_phone_excluding_id()
            .returning(|_, _| Ok(None));
        repo.expect_update()
            .returning(|_, _| Err(UserError::NonUniqueValues));

        let err = service(repo)
            .update_user(Uuid::now_v7(), request())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_user_missing_never_deletes() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let err = service(repo).delete_user(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, UserError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_user_failure_is_500() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(user(id))));
        repo.expect_delete()
            .returning(|_| Err(UserError::Database("timeout".to_string())));

        let err = service(repo).delete_user(Uuid::now_v7()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(user(id))));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let response = service(repo).delete_user(Uuid::now_v7()).await.unwrap();
        assert_eq!(response.code, 200);
        assert_eq!(response.message, "User deleted successfully");
    }
}
