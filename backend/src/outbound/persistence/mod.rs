//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types. Unique violations on the claims table surface
//!   as `ClaimRepositoryError::Duplicate`.

mod diesel_claim_repository;
mod diesel_deal_repository;
mod diesel_user_directory;
mod models;
mod pool;
mod schema;

pub use diesel_claim_repository::DieselClaimRepository;
pub use diesel_deal_repository::DieselDealRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use pool::{DbPool, PoolConfig, PoolError};
