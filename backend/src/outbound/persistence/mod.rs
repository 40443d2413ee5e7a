//! Document storage adapters.
//!
//! [`DieselDocumentRepository`] persists listings in PostgreSQL via
//! `diesel-async` over a `bb8` pool; [`InMemoryDocumentRepository`] keeps
//! them in process memory when no database is configured.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; adapters translate them to domain records.
//!
//! # Example
//!
//! ```ignore
//! use marketplace::outbound::persistence::{DbPool, DieselDocumentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/marketplace")).await?;
//! let repo = DieselDocumentRepository::new(pool);
//! ```

mod diesel_document_repository;
mod in_memory_document_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_document_repository::DieselDocumentRepository;
pub use in_memory_document_repository::InMemoryDocumentRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
