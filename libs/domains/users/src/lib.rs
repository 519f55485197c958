//! Users Domain
//!
//! CRUD over the `users` table, answered with `{code, message, content}` envelopes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← parse body/path/query, run the validator
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← duplicate and existence checks, envelope shaping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + Postgres and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User record, request and query DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{DefaultUserService, DefaultUserValidator, InMemoryUserRepository, handlers};
//! use tracing::Span;
//!
//! let span = Span::none();
//! let service = DefaultUserService::new(InMemoryUserRepository::new(), span.clone());
//! let validator = DefaultUserValidator::new(span.clone());
//!
//! let router: axum::Router = handlers::router(service, validator, span);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validator;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{User, UserQuery, UserRequest};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{DefaultUserService, UserService};
pub use validator::{DefaultUserValidator, UserValidator, ValidationError};
