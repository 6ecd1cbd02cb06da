use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user as returned to clients.
///
/// The in-memory backend has no id or timestamp; both are omitted from JSON then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub username: String,
    pub age: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self {
        Self {
            id: Some(m.id),
            username: m.username,
            age: i64::from(m.age),
            created_at: Some(m.created_at.with_timezone(&Utc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_user_has_no_id_or_timestamp() {
        let u = User { id: None, username: "ann".into(), age: 20, created_at: None };
        assert_eq!(serde_json::to_value(&u).unwrap(), json!({"username": "ann", "age": 20}));
    }

    #[test]
    fn stored_user_uses_camel_case() {
        let id = Uuid::new_v4();
        let created = Utc::now();
        let u = User { id: Some(id), username: "ann".into(), age: 20, created_at: Some(created) };
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v["id"], json!(id.to_string()));
        assert!(v.get("createdAt").is_some());
        assert!(v.get("created_at").is_none());
    }
}
