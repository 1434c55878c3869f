use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Deserialize a joined relation that the backend may return as `null`, a
/// single object or an array (one-to-many joins), keeping the first element.
pub fn first_of_many<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<OneOrMany<T>>::deserialize(deserializer)?;
    Ok(match value {
        None => None,
        Some(OneOrMany::One(item)) => Some(item),
        Some(OneOrMany::Many(items)) => items.into_iter().next(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Child {
        n: i32,
    }

    #[derive(Deserialize, Debug)]
    struct Parent {
        #[serde(default, deserialize_with = "first_of_many")]
        child: Option<Child>,
    }

    #[test]
    fn test_accepts_null_object_and_array() {
        let p: Parent = serde_json::from_str(r#"{"child": null}"#).unwrap();
        assert_eq!(p.child, None);
        let p: Parent = serde_json::from_str(r#"{"child": {"n": 1}}"#).unwrap();
        assert_eq!(p.child, Some(Child { n: 1 }));
        let p: Parent = serde_json::from_str(r#"{"child": [{"n": 2}, {"n": 3}]}"#).unwrap();
        assert_eq!(p.child, Some(Child { n: 2 }));
        let p: Parent = serde_json::from_str(r#"{"child": []}"#).unwrap();
        assert_eq!(p.child, None);
        let p: Parent = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.child, None);
    }
}
