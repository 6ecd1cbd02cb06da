use async_trait::async_trait;
use models::validation::NewUser;
use tokio::sync::RwLock;

use super::domain::User;
use crate::errors::ServiceError;

/// Storage abstraction for users. Implementations own the collection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, in the backend's order.
    async fn list(&self) -> Result<Vec<User>, ServiceError>;
    /// Persist an accepted submission and return the stored user.
    async fn create(&self, new_user: NewUser) -> Result<User, ServiceError>;
}

/// Process-local, append-only backend. Insertion order is list order.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, ServiceError> {
        let user = User { id: None, username: new_user.username, age: new_user.age, created_at: None };
        let mut users = self.users.write().await;
        users.push(user.clone());
        Ok(user)
    }
}
