use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Select, SqlErr,
};
use tracing::{Span, error, info};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{User, UserQuery, UserRequest},
    repository::UserRepository,
};

pub struct PgUserRepository {
    db: DatabaseConnection,
    span: Span,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection, span: Span) -> Self {
        Self { db, span }
    }

    /// Unique violations become [`UserError::NonUniqueValues`]; anything else is logged
    /// and reported as [`UserError::Database`].
    fn map_err(&self, err: DbErr) -> UserError {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            info!(parent: &self.span, %detail, "Unique constraint violated");
            return UserError::NonUniqueValues;
        }

        error!(parent: &self.span, error = %err, "Database error");
        UserError::Database(err.to_string())
    }

    fn duplicates_of(values: &UserRequest) -> Select<entity::Entity> {
        entity::Entity::find()
            .filter(
                Condition::any()
                    .add(entity::Column::Email.eq(values.email.as_str()))
                    .add(entity::Column::Username.eq(values.username.as_str()))
                    .add(entity::Column::Phone.eq(values.phone.as_str())),
            )
            .order_by_asc(entity::Column::Id)
    }
}

/// `ILIKE` pattern matching `term` anywhere, with `\`, `%` and `_` taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: UserRequest) -> UserResult<User> {
        let model = entity::ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(input.username),
            email: Set(input.email),
            phone: Set(input.phone),
        }
        .insert(&self.db)
        .await
        .map_err(|e| self.map_err(e))?;

        info!(parent: &self.span, user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| self.map_err(e))?;

        Ok(model.map(Into::into))
    }

    async fn find_by_email_or_username_or_phone(
        &self,
        values: &UserRequest,
    ) -> UserResult<Option<User>> {
        let model = Self::duplicates_of(values)
            .one(&self.db)
            .await
            .map_err(|e| self.map_err(e))?;

        Ok(model.map(Into::into))
    }

    async fn find_by_email_or_username_or_phone_excluding_id(
        &self,
        values: &UserRequest,
        exclude_id: Uuid,
    ) -> UserResult<Option<User>> {
        let model = Self::duplicates_of(values)
            .filter(entity::Column::Id.ne(exclude_id))
            .one(&self.db)
            .await
            .map_err(|e| self.map_err(e))?;

        Ok(model.map(Into::into))
    }

    async fn find_all(&self, query: UserQuery) -> UserResult<Vec<User>> {
        let mut select = entity::Entity::find();

        if let Some(email) = query.email_filter() {
            select = select.filter(entity::Column::Email.eq(email));
        }

        if let Some(username) = query.username_filter() {
            select = select.filter(
                Expr::col((entity::Entity, entity::Column::Username))
                    .ilike(contains_pattern(username)),
            );
        }

        let models = select
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| self.map_err(e))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UserRequest) -> UserResult<User> {
        let mut active = entity::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if !input.username.is_empty() {
            active.username = Set(input.username);
        }
        if !input.email.is_empty() {
            active.email = Set(input.email);
        }
        if !input.phone.is_empty() {
            active.phone = Set(input.phone);
        }

        if !active.is_changed() {
            return self.find_by_id(id).await?.ok_or(UserError::NotFound);
        }

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => UserError::NotFound,
            other => self.map_err(other),
        })?;

        info!(parent: &self.span, user_id = %id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| self.map_err(e))?;

        if result.rows_affected > 0 {
            info!(parent: &self.span, user_id = %id, "Deleted user");
        }
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(username: &str) -> entity::Model {
        entity::Model {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            phone: "5550100".to_string(),
        }
    }

    fn repo(db: MockDatabase) -> PgUserRepository {
        PgUserRepository::new(db.into_connection(), Span::none())
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("doe"), "%doe%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let row = model("jdoe");
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row.clone()]]),
        );

        let user = repo
            .create(UserRequest::new("jdoe", "jdoe@example.com", "5550100"))
            .await
            .unwrap();

        assert_eq!(user, User::from(row));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<entity::Model>::new()]),
        );

        assert_eq!(repo.find_by_id(Uuid::now_v7()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_lookup_returns_first_match() {
        let row = model("jdoe");
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row.clone()]]),
        );

        let found = repo
            .find_by_email_or_username_or_phone_excluding_id(
                &UserRequest::new("jdoe", "x@example.com", "1"),
                Uuid::now_v7(),
            )
            .await
            .unwrap();

        assert_eq!(found.map(|u| u.id), Some(row.id));
    }

    #[tokio::test]
    async fn test_find_all_maps_rows() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model("jdoe"), model("jane")]]),
        );

        let users = repo
            .find_all(UserQuery {
                username: Some("j".to_string()),
                email: None,
            })
            .await
            .unwrap();

        let names: Vec<_> = users.into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["jdoe", "jane"]);
    }

    #[tokio::test]
    async fn test_query_failure_is_database_error() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_string())]),
        );

        let err = repo.find_all(UserQuery::default()).await.unwrap_err();
        assert!(
            matches!(err, UserError::Database(ref msg) if str::contains(msg, "connection reset"))
        );
    }

    #[tokio::test]
    async fn test_update_returns_updated_row() {
        let mut row = model("jdoe");
        row.email = "new@example.com".to_string();
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row.clone()]]),
        );

        let user = repo
            .update(row.id, UserRequest::new("", "new@example.com", ""))
            .await
            .unwrap();

        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.username, "jdoe");
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_not_found() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<entity::Model>::new()]),
        );

        let err = repo
            .update(Uuid::now_v7(), UserRequest::new("jdoe", "", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]));

        let id = Uuid::now_v7();
        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
    }
}
