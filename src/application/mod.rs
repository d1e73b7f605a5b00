//! Application layer services implementing business logic.
//!
//! Services orchestrate collaborators (cache store, article source, user
//! repository) and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::introduction_service::IntroductionService`] - Request orchestration and error normalization
//! - [`services::introduction_resolver::IntroductionResolver`] - Cache-or-fetch resolution
//! - [`services::user_service::UserService`] - Credential validation and user lookup

pub mod services;
