use axum::Router;
use domain_users::{DefaultUserService, DefaultUserValidator, PgUserRepository, handlers};
use tracing::info_span;

/// Users routes backed by PostgreSQL.
pub fn router(state: &crate::state::AppState) -> Router {
    let span = info_span!("users");
    let repository = PgUserRepository::new(state.db.clone(), span.clone());
    let service = DefaultUserService::new(repository, span.clone());
    let validator = DefaultUserValidator::new(span.clone());

    handlers::router(service, validator, span)
}
