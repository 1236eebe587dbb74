//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the user, vocabulary and
//! progress repository ports backed by PostgreSQL via the Diesel ORM with
//! async support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/flashcards");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_progress_repository;
mod diesel_user_repository;
mod diesel_vocabulary_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_progress_repository::DieselProgressRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vocabulary_repository::DieselVocabularyRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
