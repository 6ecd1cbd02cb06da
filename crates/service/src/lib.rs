//! Service layer for the user API.
//! - `users::UserService` validates submissions with a pluggable policy.
//! - `users::UserRepository` abstracts storage (in-memory or SeaORM).

pub mod errors;
pub mod users;
#[cfg(test)]
pub mod test_support;
