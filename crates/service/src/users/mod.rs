//! Users module: domain types, the storage abstraction with its two
//! backends, and the service that ties validation to storage.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use repository::{MemoryUserRepository, UserRepository};
pub use service::UserService;
