use std::sync::Arc;

use models::validation::{PresencePolicy, SchemaPolicy};
use sea_orm::DatabaseConnection;
use service::users::{repo::seaorm::SeaOrmUserRepository, MemoryUserRepository, UserService};

/// Client-facing wording of one API flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiProfile {
    pub welcome: &'static str,
    pub created: &'static str,
    pub invalid: &'static str,
    pub list_failed: &'static str,
    pub create_failed: &'static str,
}

impl ApiProfile {
    pub const MEMORY: Self = Self {
        welcome: "Welcome to the User API!",
        created: "User added successfully!",
        invalid: "Username and age are required",
        list_failed: "Error fetching users",
        create_failed: "Error adding user",
    };

    pub const DATABASE: Self = Self {
        welcome: "Welcome to the User API with SeaORM!",
        created: "User added successfully with SeaORM!",
        invalid: "Validation error",
        list_failed: "Error fetching users",
        create_failed: "Error adding user",
    };
}

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub profile: ApiProfile,
}

impl AppState {
    pub fn new(users: UserService, profile: ApiProfile) -> Self {
        Self { users, profile }
    }

    /// Fresh in-memory store with the presence policy.
    pub fn memory() -> Self {
        let users = UserService::new(Arc::new(MemoryUserRepository::new()), Arc::new(PresencePolicy));
        Self::new(users, ApiProfile::MEMORY)
    }

    /// Database store with the schema policy.
    pub fn database(db: DatabaseConnection) -> Self {
        let users = UserService::new(Arc::new(SeaOrmUserRepository::new(db)), Arc::new(SchemaPolicy));
        Self::new(users, ApiProfile::DATABASE)
    }
}
