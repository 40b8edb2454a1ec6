//! Persistence for the Rendezvous meeting scheduler
//!
//! Provides [`ScheduleRepository`], the store the scheduler reads slots and
//! selections from and writes meetings to, with two implementations:
//!
//! - [`SqlScheduleRepository`] over an `sqlx::Any` pool (SQLite schema)
//! - [`MemoryScheduleRepository`] for configurations without a database
//!
//! # Example
//!
//! ```rust,no_run
//! use rendezvous_db::{DbClient, RepositoryFactory, ScheduleRepository, ScheduleRepositoryFactory};
//! use rendezvous_db::SqlScheduleRepository;
//!
//! async fn setup() -> Result<SqlScheduleRepository, rendezvous_db::DbError> {
//!     let client = DbClient::from_url("sqlite://data/rendezvous.db").await?;
//!     let repo: SqlScheduleRepository = ScheduleRepositoryFactory::new().create_repository(client);
//!     repo.init_schema().await?;
//!     Ok(repo)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod repository;

pub use client::DbClient;
pub use error::DbError;
pub use repository::RepositoryFactory;

pub use repositories::{
    MemoryScheduleRepository, OverlapQuery, ScheduleRepository, ScheduleRepositoryFactory,
    SqlScheduleRepository,
};
