use axum::{Router, middleware, routing::get};
use axum_helpers::{api_key_middleware, create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;
pub mod users;

/// Creates the API routes without the base path.
/// The base path is added by the `create_router` helper.
///
/// Every route in here requires the API key.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .route_layer(middleware::from_fn_with_state(
            state.config.auth.clone(),
            api_key_middleware,
        ))
}

/// Creates a router with the /ready endpoint that checks the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The complete application: documented API routes plus the open health endpoints.
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.http)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone())))
}
