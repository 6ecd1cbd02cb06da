//! Data model for the user API: the `users` entity, its schema rules and the
//! validation policies shared by both storage flavors.

pub mod db;
pub mod errors;
pub mod user;
pub mod validation;
