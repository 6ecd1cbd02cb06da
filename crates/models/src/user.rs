use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveValue, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validation::{self, AGE_REQUIRED, USERNAME_REQUIRED};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub age: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// Schema enforcement at write time. Inserts that skip [`create`] still get
/// the username trimmed and the field rules applied; updates are refused.
#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            return Err(DbErr::Custom("users are immutable once created".into()));
        }

        let username = match &self.username {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v.trim().to_string()),
            ActiveValue::NotSet => None,
        };
        let age = match &self.age {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(i64::from(*v)),
            ActiveValue::NotSet => None,
        };

        let mut violations = Vec::new();
        match username.as_deref() {
            Some(name) => violations.extend(validation::check_username(name).err().map(str::to_string)),
            None => violations.push(USERNAME_REQUIRED.to_string()),
        }
        match age {
            Some(age) => violations.extend(validation::check_age(age).err().map(str::to_string)),
            None => violations.push(AGE_REQUIRED.to_string()),
        }
        if !violations.is_empty() {
            return Err(DbErr::Custom(format!("validation error: {}", violations.join("; "))));
        }

        if let Some(name) = username {
            self.username = Set(name);
        }
        if matches!(self.created_at, ActiveValue::NotSet) {
            self.created_at = Set(Utc::now().into());
        }
        Ok(self)
    }
}

/// Validate against the schema and insert a new user with a fresh id and
/// creation timestamp. Every violated rule is reported at once.
pub async fn create(db: &DatabaseConnection, username: &str, age: i64) -> Result<Model, ModelError> {
    let username = username.trim();
    let violations = validation::schema_violations(username, age);
    if !violations.is_empty() {
        return Err(ModelError::Validation(violations));
    }
    // In range after the schema check.
    let age = i32::try_from(age).map_err(|e| ModelError::Db(e.to_string()))?;

    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        age: Set(age),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// All users, oldest first.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
