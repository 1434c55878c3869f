use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the backend.
///
/// Depending on the table the backend hands out either bigint or text/uuid
/// keys, so the id keeps whichever form it arrived in and writes it back the
/// same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// Parse a path/query fragment back into an id, preferring the numeric form
    pub fn parse(s: &str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(n) => EntityId::Number(n),
            Err(_) => EntityId::Text(s.trim().to_string()),
        }
    }

    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::Text(String::new())
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Number(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_both_forms() {
        let n: EntityId = serde_json::from_str("42").unwrap();
        let s: EntityId = serde_json::from_str("\"a1b2\"").unwrap();
        assert_eq!(n, EntityId::Number(42));
        assert_eq!(s, EntityId::Text("a1b2".into()));
        assert_eq!(serde_json::to_string(&n).unwrap(), "42");
    }

    #[test]
    fn test_parse_prefers_number() {
        assert_eq!(EntityId::parse("17"), EntityId::Number(17));
        assert_eq!(EntityId::parse(" x-1 "), EntityId::Text("x-1".into()));
        assert_eq!(EntityId::Number(17).as_string(), "17");
    }
}
