//! Domain layer containing business entities and logic.
//!
//! Entities and repository interfaces are independent of infrastructure
//! concerns; services in [`crate::application::services`] orchestrate them.
//!
//! # Architecture
//!
//! - [`entities`] - Introductions, cache entries and user profiles
//! - [`repositories`] - Data access trait definitions
//! - [`cache_key`] - Deterministic cache key derivation
//! - [`clock`] - Wall-clock abstraction used to stamp fresh scrapes
//! - [`language`] - Language edition code validation
//!
//! # Lookup Flow
//!
//! 1. HTTP handler receives `GET /introduction/{article_name}`
//! 2. The caller's credential is resolved to an optional user profile
//! 3. The user's preferred language, if any, replaces the requested one
//! 4. The introduction is served from cache, or fetched from Wikipedia and cached

pub mod cache_key;
pub mod clock;
pub mod entities;
pub mod language;
pub mod repositories;
