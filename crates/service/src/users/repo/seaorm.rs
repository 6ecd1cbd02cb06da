use sea_orm::DatabaseConnection;

use models::validation::NewUser;

use crate::errors::ServiceError;
use crate::users::domain::User;
use crate::users::repository::UserRepository;

/// Database backend; the `users` entity schema is authoritative on write.
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let rows = models::user::list(&self.db).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, ServiceError> {
        let created = models::user::create(&self.db, &new_user.username, new_user.age).await?;
        Ok(User::from(created))
    }
}
