use std::sync::Arc;

use models::validation::{self, UserCandidate, ValidationPolicy};
use tracing::{info, instrument, warn};

use super::domain::User;
use super::repository::UserRepository;
use crate::errors::ServiceError;

/// User business service independent of web framework.
///
/// Storage and validation are both injected, so the same service runs the
/// in-memory flavor and the database flavor.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    policy: Arc<dyn ValidationPolicy>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, policy: Arc<dyn ValidationPolicy>) -> Self {
        Self { repo, policy }
    }

    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        self.repo.list().await
    }

    /// Validate a submission and store it. Nothing is written when validation fails.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::validation::{PresencePolicy, UserCandidate};
    /// use service::users::{MemoryUserRepository, UserService};
    ///
    /// let svc = UserService::new(Arc::new(MemoryUserRepository::new()), Arc::new(PresencePolicy));
    /// let user = tokio_test::block_on(svc.create(UserCandidate::new("alice", 30))).unwrap();
    /// assert_eq!(user.username, "alice");
    /// assert!(tokio_test::block_on(svc.create(UserCandidate::default())).is_err());
    /// assert_eq!(tokio_test::block_on(svc.list()).unwrap().len(), 1);
    /// ```
    #[instrument(skip(self, candidate), fields(policy = self.policy.name()))]
    pub async fn create(&self, candidate: UserCandidate) -> Result<User, ServiceError> {
        let new_user = match self.policy.validate(&candidate) {
            Ok(new_user) => new_user,
            Err(violations) => {
                let messages = validation::messages(&violations);
                warn!(violations = ?messages, "user_rejected");
                return Err(ServiceError::Validation(messages));
            }
        };
        let user = self.repo.create(new_user).await?;
        info!(username = %user.username, age = user.age, id = ?user.id, "user_created");
        Ok(user)
    }
}
