//! Business logic services for the application layer.

pub mod introduction_resolver;
pub mod introduction_service;
pub mod user_service;

pub use introduction_resolver::IntroductionResolver;
pub use introduction_service::IntroductionService;
pub use user_service::{UserResolver, UserService};
