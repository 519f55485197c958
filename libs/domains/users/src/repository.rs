use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{Span, info};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserQuery, UserRequest};

/// Repository trait for User persistence.
///
/// Every call is a single statement and is never retried. Writes that would break
/// the uniqueness of username, email or phone fail with [`UserError::NonUniqueValues`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: UserRequest) -> UserResult<User>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// First user sharing the email, username or phone of `values`.
    async fn find_by_email_or_username_or_phone(
        &self,
        values: &UserRequest,
    ) -> UserResult<Option<User>>;

    /// Same as [`Self::find_by_email_or_username_or_phone`], ignoring `exclude_id`.
    async fn find_by_email_or_username_or_phone_excluding_id(
        &self,
        values: &UserRequest,
        exclude_id: Uuid,
    ) -> UserResult<Option<User>>;

    /// Email is an exact match, username a case-insensitive substring.
    async fn find_all(&self, query: UserQuery) -> UserResult<Vec<User>>;

    /// Writes only the non-empty fields of `input`.
    async fn update(&self, id: Uuid, input: UserRequest) -> UserResult<User>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

fn collides(user: &User, values: &UserRequest) -> bool {
    user.email == values.email || user.username == values.username || user.phone == values.phone
}

/// In-memory implementation of UserRepository (for development/testing).
///
/// Enforces the same unique columns as the `users` table.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<Uuid, User>>>,
    span: Span,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_span(Span::none())
    }

    pub fn with_span(span: Span) -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            span,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: UserRequest) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| collides(u, &input)) {
            return Err(UserError::NonUniqueValues);
        }

        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            phone: input.phone,
        };
        users.insert(user.id, user.clone());

        info!(parent: &self.span, user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email_or_username_or_phone(
        &self,
        values: &UserRequest,
    ) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| collides(u, values)).cloned())
    }

    async fn find_by_email_or_username_or_phone_excluding_id(
        &self,
        values: &UserRequest,
        exclude_id: Uuid,
    ) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.id != exclude_id && collides(u, values))
            .cloned())
    }

    async fn find_all(&self, query: UserQuery) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let username = query.username_filter().map(str::to_lowercase);
        let email = query.email_filter();

        Ok(users
            .values()
            .filter(|u| email.is_none_or(|e| u.email == e))
            .filter(|u| {
                username
                    .as_deref()
                    .is_none_or(|name| u.username.to_lowercase().contains(name))
            })
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, input: UserRequest) -> UserResult<User> {
        let mut users = self.users.write().await;

        let mut updated = users.get(&id).cloned().ok_or(UserError::NotFound)?;
        if !input.username.is_empty() {
            updated.username = input.username;
        }
        if !input.email.is_empty() {
            updated.email = input.email;
        }
        if !input.phone.is_empty() {
            updated.phone = input.phone;
        }

        let clash = users.values().any(|u| {
            u.id != id
                && (u.username == updated.username
                    || u.email == updated.email
                    || u.phone == updated.phone)
        });
        if clash {
            return Err(UserError::NonUniqueValues);
        }

        users.insert(id, updated.clone());
        info!(parent: &self.span, user_id = %id, "Updated user");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let removed = self.users.write().await.remove(&id).is_some();
        if removed {
            info!(parent: &self.span, user_id = %id, "Deleted user");
        }
        Ok(removed)
    }
}
