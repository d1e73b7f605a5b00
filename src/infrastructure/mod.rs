//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the interfaces the domain and application
//! layers depend on.
//!
//! # Modules
//!
//! - [`cache`] - Cache stores (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`wikipedia`] - Upstream article source

pub mod cache;
pub mod persistence;
pub mod wikipedia;
