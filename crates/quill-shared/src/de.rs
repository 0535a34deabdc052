//! Deserialization helpers.

use serde::{Deserialize, Deserializer};

/// Distinguishes "field absent" from "field set to null" for nullable patch
/// fields.
///
/// Use with `#[serde(default, deserialize_with = "de::double_option")]` on an
/// `Option<Option<T>>` field: absent deserializes to `None` (leave the column
/// unchanged), an explicit `null` to `Some(None)` (null the column out), and
/// a value to `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "super::double_option")]
        excerpt: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.excerpt, None);

        let null: Body = serde_json::from_str(r#"{"excerpt": null}"#).unwrap();
        assert_eq!(null.excerpt, Some(None));

        let set: Body = serde_json::from_str(r#"{"excerpt": "hi"}"#).unwrap();
        assert_eq!(set.excerpt, Some(Some("hi".to_string())));
    }
}
