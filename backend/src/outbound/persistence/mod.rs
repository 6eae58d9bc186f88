//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven repository ports, backed
//! by PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Transactional units**: mutations that pair a write with a recount or
//!   a conditional notification run inside one transaction.
//! - **Strongly typed errors**: all database errors are mapped to the
//!   per-port error enums.

mod diesel_engagement_repository;
mod diesel_error_mapping;
mod diesel_feed_query;
mod diesel_follow_repository;
mod diesel_notification_repository;
mod diesel_post_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_engagement_repository::DieselEngagementRepository;
pub use diesel_feed_query::DieselFeedQuery;
pub use diesel_follow_repository::DieselFollowRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
