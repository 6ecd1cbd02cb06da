//! Validation policies for user submissions.
//!
//! A [`UserCandidate`] carries the raw JSON values a client sent. A
//! [`ValidationPolicy`] either turns it into a [`NewUser`] or reports every
//! rule it violates. Two policies exist:
//!
//! - [`PresencePolicy`]: both fields must be truthy; no length or range rules.
//! - [`SchemaPolicy`]: the declared `users` schema (trimmed username of at least
//!   two characters, whole-number age in `1..=120`). All rules are evaluated
//!   and reported together.

use serde::Deserialize;
use serde_json::{Number, Value};

pub const USERNAME_AND_AGE_REQUIRED: &str = "Username and age are required";
pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USERNAME_NOT_STRING: &str = "Username must be a string";
pub const USERNAME_TOO_SHORT: &str = "Username must be at least 2 characters";
pub const AGE_REQUIRED: &str = "Age is required";
pub const AGE_NOT_NUMBER: &str = "Age must be a number";
pub const AGE_NOT_WHOLE: &str = "Age must be a whole number";
pub const AGE_TOO_SMALL: &str = "Age must be at least 1";
pub const AGE_TOO_LARGE: &str = "Age must be at most 120";

pub const USERNAME_MIN_CHARS: usize = 2;
pub const AGE_MIN: i64 = 1;
pub const AGE_MAX: i64 = 120;

/// Fields as submitted. `null` and absent are both `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserCandidate {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
}

impl UserCandidate {
    /// Build a candidate from any JSON body; non-objects yield an empty candidate.
    pub fn from_json(body: &Value) -> Self {
        match body {
            Value::Object(map) => Self {
                username: map.get("username").filter(|v| !v.is_null()).cloned(),
                age: map.get("age").filter(|v| !v.is_null()).cloned(),
            },
            _ => Self::default(),
        }
    }

    pub fn new(username: impl Into<Value>, age: impl Into<Value>) -> Self {
        Self { username: Some(username.into()), age: Some(age.into()) }
    }
}

/// A submission that passed a policy and may be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub message: String,
}

impl Violation {
    fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}

/// Messages of a violation list, in order.
pub fn messages(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(|v| v.message.clone()).collect()
}

pub trait ValidationPolicy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Accept the candidate, or return every violated rule.
    fn validate(&self, candidate: &UserCandidate) -> Result<NewUser, Vec<Violation>>;
}

/// JavaScript-style truthiness of a JSON value.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 2^63; every finite `f64` strictly below it in magnitude fits an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Integer value of a JSON number, accepting floats with no fractional part.
/// Numbers outside the `i64` range are not accepted.
fn whole_number(n: &Number) -> Result<i64, &'static str> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64() {
        Some(f) if !f.is_finite() => Err(AGE_NOT_NUMBER),
        Some(f) if f.fract() != 0.0 => Err(AGE_NOT_WHOLE),
        Some(f) if (-I64_BOUND..I64_BOUND).contains(&f) => Ok(f as i64),
        _ => Err(AGE_NOT_NUMBER),
    }
}

/// Both fields truthy; otherwise one combined message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresencePolicy;

impl ValidationPolicy for PresencePolicy {
    fn name(&self) -> &'static str {
        "presence"
    }

    fn validate(&self, candidate: &UserCandidate) -> Result<NewUser, Vec<Violation>> {
        let username = candidate.username.as_ref().filter(|v| truthy(v));
        let age = candidate.age.as_ref().filter(|v| truthy(v));
        let (Some(username), Some(age)) = (username, age) else {
            return Err(vec![Violation::new(USERNAME_AND_AGE_REQUIRED)]);
        };

        let mut violations = Vec::new();
        let username = match username {
            Value::String(s) => Some(s.clone()),
            _ => {
                violations.push(Violation::new(USERNAME_NOT_STRING));
                None
            }
        };
        let age = match age {
            Value::Number(n) => whole_number(n),
            _ => Err(AGE_NOT_NUMBER),
        };
        let age = match age {
            Ok(age) => Some(age),
            Err(m) => {
                violations.push(Violation::new(m));
                None
            }
        };

        match (username, age) {
            (Some(username), Some(age)) if violations.is_empty() => Ok(NewUser { username, age }),
            _ => Err(violations),
        }
    }
}

/// Trim and check a username against the schema.
pub fn check_username(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(USERNAME_REQUIRED);
    }
    if trimmed.chars().count() < USERNAME_MIN_CHARS {
        return Err(USERNAME_TOO_SHORT);
    }
    Ok(trimmed.to_string())
}

/// Check an age against the schema range.
pub fn check_age(age: i64) -> Result<i64, &'static str> {
    if age < AGE_MIN {
        return Err(AGE_TOO_SMALL);
    }
    if age > AGE_MAX {
        return Err(AGE_TOO_LARGE);
    }
    Ok(age)
}

/// Schema rules applied to already-typed fields, as the entity does on write.
pub fn schema_violations(username: &str, age: i64) -> Vec<String> {
    [check_username(username).err(), check_age(age).err()]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

/// The declared `users` schema. Numeric strings are cast the way the object
/// mapper casts them; everything else must already have the right type.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaPolicy;

impl SchemaPolicy {
    /// Whole numbers too large for `i64` still fail the range rule rather
    /// than the type rule.
    fn number(n: &Number) -> Result<i64, &'static str> {
        whole_number(n).or_else(|e| match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => {
                Err(if f > 0.0 { AGE_TOO_LARGE } else { AGE_TOO_SMALL })
            }
            _ => Err(e),
        })
    }

    fn username(value: Option<&Value>) -> Result<String, &'static str> {
        match value {
            None => Err(USERNAME_REQUIRED),
            Some(Value::String(s)) => check_username(s),
            Some(_) => Err(USERNAME_NOT_STRING),
        }
    }

    fn age(value: Option<&Value>) -> Result<i64, &'static str> {
        let age = match value {
            None => return Err(AGE_REQUIRED),
            Some(Value::Number(n)) => Self::number(n)?,
            Some(Value::String(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(AGE_REQUIRED);
                }
                match s.parse::<i64>() {
                    Ok(i) => i,
                    Err(_) => {
                        let f: f64 = s.parse().map_err(|_| AGE_NOT_NUMBER)?;
                        let n = Number::from_f64(f).ok_or(AGE_NOT_NUMBER)?;
                        Self::number(&n)?
                    }
                }
            }
            Some(_) => return Err(AGE_NOT_NUMBER),
        };
        check_age(age)
    }
}

impl ValidationPolicy for SchemaPolicy {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn validate(&self, candidate: &UserCandidate) -> Result<NewUser, Vec<Violation>> {
        let username = Self::username(candidate.username.as_ref());
        let age = Self::age(candidate.age.as_ref());
        match (username, age) {
            (Ok(username), Ok(age)) => Ok(NewUser { username, age }),
            (username, age) => {
                let mut violations = Vec::new();
                if let Err(m) = username {
                    violations.push(Violation::new(m));
                }
                if let Err(m) = age {
                    violations.push(Violation::new(m));
                }
                Err(violations)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(body: Value) -> UserCandidate {
        UserCandidate::from_json(&body)
    }

    #[test]
    fn presence_accepts_any_truthy_pair() {
        let user = PresencePolicy.validate(&candidate(json!({"username": "a", "age": 500}))).unwrap();
        assert_eq!(user, NewUser { username: "a".into(), age: 500 });
    }

    #[test]
    fn presence_keeps_username_untrimmed() {
        let user = PresencePolicy.validate(&candidate(json!({"username": " ann ", "age": 3}))).unwrap();
        assert_eq!(user.username, " ann ");
    }

    #[test]
    fn presence_reports_one_combined_message() {
        for body in [
            json!({}),
            json!({"username": "ann"}),
            json!({"age": 30}),
            json!({"username": "", "age": 30}),
            json!({"username": "ann", "age": 0}),
            json!({"username": null, "age": null}),
            json!("not an object"),
        ] {
            let violations = PresencePolicy.validate(&candidate(body.clone())).unwrap_err();
            assert_eq!(messages(&violations), vec![USERNAME_AND_AGE_REQUIRED], "body: {body}");
        }
    }

    #[test]
    fn presence_rejects_non_numeric_age() {
        let violations = PresencePolicy.validate(&candidate(json!({"username": "ann", "age": "thirty"}))).unwrap_err();
        assert_eq!(messages(&violations), vec![AGE_NOT_NUMBER]);
        let violations = PresencePolicy.validate(&candidate(json!({"username": "ann", "age": "30"}))).unwrap_err();
        assert_eq!(messages(&violations), vec![AGE_NOT_NUMBER]);
    }

    #[test]
    fn presence_rejects_fractional_age() {
        let violations = PresencePolicy.validate(&candidate(json!({"username": "ann", "age": 30.5}))).unwrap_err();
        assert_eq!(messages(&violations), vec![AGE_NOT_WHOLE]);
    }

    #[test]
    fn presence_rejects_ages_beyond_i64_instead_of_clamping() {
        for age in [json!(1e20), json!(-1e20), json!(u64::MAX)] {
            let violations = PresencePolicy.validate(&candidate(json!({"username": "ab", "age": age}))).unwrap_err();
            assert_eq!(messages(&violations), vec![AGE_NOT_NUMBER], "age: {age}");
        }
        let user = PresencePolicy.validate(&candidate(json!({"username": "ab", "age": i64::MAX}))).unwrap();
        assert_eq!(user.age, i64::MAX);
        let user = PresencePolicy.validate(&candidate(json!({"username": "ab", "age": 1e15}))).unwrap();
        assert_eq!(user.age, 1_000_000_000_000_000);
    }

    #[test]
    fn presence_rejects_non_string_username() {
        let violations = PresencePolicy.validate(&candidate(json!({"username": 42, "age": 30}))).unwrap_err();
        assert_eq!(messages(&violations), vec![USERNAME_NOT_STRING]);
    }

    #[test]
    fn schema_accepts_and_trims() {
        let user = SchemaPolicy.validate(&candidate(json!({"username": "  alice  ", "age": 30}))).unwrap();
        assert_eq!(user, NewUser { username: "alice".into(), age: 30 });
    }

    #[test]
    fn schema_bounds_are_inclusive() {
        assert!(SchemaPolicy.validate(&candidate(json!({"username": "ab", "age": 1}))).is_ok());
        assert!(SchemaPolicy.validate(&candidate(json!({"username": "ab", "age": 120}))).is_ok());
    }

    #[test]
    fn schema_age_out_of_range() {
        let v = SchemaPolicy.validate(&candidate(json!({"username": "alice", "age": 0}))).unwrap_err();
        assert_eq!(messages(&v), vec![AGE_TOO_SMALL]);
        let v = SchemaPolicy.validate(&candidate(json!({"username": "alice", "age": 121}))).unwrap_err();
        assert_eq!(messages(&v), vec![AGE_TOO_LARGE]);
    }

    #[test]
    fn schema_huge_ages_fail_the_range_rule() {
        for (age, msg) in [(json!(1e20), AGE_TOO_LARGE), (json!(u64::MAX), AGE_TOO_LARGE), (json!(-1e20), AGE_TOO_SMALL)] {
            let v = SchemaPolicy.validate(&candidate(json!({"username": "alice", "age": age}))).unwrap_err();
            assert_eq!(messages(&v), vec![msg], "age: {age}");
        }
        let v = SchemaPolicy.validate(&candidate(json!({"username": "alice", "age": "1e20"}))).unwrap_err();
        assert_eq!(messages(&v), vec![AGE_TOO_LARGE]);
    }

    #[test]
    fn schema_short_username() {
        let v = SchemaPolicy.validate(&candidate(json!({"username": "a", "age": 30}))).unwrap_err();
        assert_eq!(messages(&v), vec![USERNAME_TOO_SHORT]);
        let v = SchemaPolicy.validate(&candidate(json!({"username": " a  ", "age": 30}))).unwrap_err();
        assert_eq!(messages(&v), vec![USERNAME_TOO_SHORT]);
    }

    #[test]
    fn schema_collects_all_violations() {
        let v = SchemaPolicy.validate(&candidate(json!({"username": "a", "age": 121}))).unwrap_err();
        assert_eq!(messages(&v), vec![USERNAME_TOO_SHORT, AGE_TOO_LARGE]);
        let v = SchemaPolicy.validate(&candidate(json!({}))).unwrap_err();
        assert_eq!(messages(&v), vec![USERNAME_REQUIRED, AGE_REQUIRED]);
    }

    #[test]
    fn schema_whitespace_username_is_missing() {
        let v = SchemaPolicy.validate(&candidate(json!({"username": "   ", "age": 30}))).unwrap_err();
        assert_eq!(messages(&v), vec![USERNAME_REQUIRED]);
    }

    #[test]
    fn schema_casts_numeric_strings() {
        let user = SchemaPolicy.validate(&candidate(json!({"username": "bob", "age": " 42 "}))).unwrap();
        assert_eq!(user.age, 42);
        let user = SchemaPolicy.validate(&candidate(json!({"username": "bob", "age": "42.0"}))).unwrap();
        assert_eq!(user.age, 42);
    }

    #[test]
    fn schema_age_type_errors() {
        let v = SchemaPolicy.validate(&candidate(json!({"username": "bob", "age": "old"}))).unwrap_err();
        assert_eq!(messages(&v), vec![AGE_NOT_NUMBER]);
        let v = SchemaPolicy.validate(&candidate(json!({"username": "bob", "age": true}))).unwrap_err();
        assert_eq!(messages(&v), vec![AGE_NOT_NUMBER]);
        let v = SchemaPolicy.validate(&candidate(json!({"username": "bob", "age": 30.5}))).unwrap_err();
        assert_eq!(messages(&v), vec![AGE_NOT_WHOLE]);
        let v = SchemaPolicy.validate(&candidate(json!({"username": "bob", "age": ""}))).unwrap_err();
        assert_eq!(messages(&v), vec![AGE_REQUIRED]);
    }

    #[test]
    fn schema_username_type_error() {
        let v = SchemaPolicy.validate(&candidate(json!({"username": ["x", "y"], "age": 30}))).unwrap_err();
        assert_eq!(messages(&v), vec![USERNAME_NOT_STRING]);
    }

    #[test]
    fn typed_schema_rules() {
        assert!(schema_violations("alice", 30).is_empty());
        assert_eq!(schema_violations("a", 0), vec![USERNAME_TOO_SHORT, AGE_TOO_SMALL]);
        assert_eq!(check_username("  zoë "), Ok("zoë".to_string()));
    }
}
