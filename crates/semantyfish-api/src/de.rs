//! Lenient field deserializers
//!
//! The catalog is loose about JSON types: codes and measurements arrive as
//! numbers or numeric strings, flags as booleans or FishBase-style `-1`/`0`.
//! A value of the wrong shape decodes to `None` rather than failing the
//! whole payload.

use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Deserialize a code that can be either string or number
pub(crate) fn code<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CodeVisitor;

    impl<'de> Visitor<'de> for CodeVisitor {
        type Value = Option<u64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a code")
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(u64::try_from(v).ok())
        }

        fn visit_f64<E>(self, v: f64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((v.fract() == 0.0 && v >= 0.0).then_some(v as u64))
        }

        fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.trim().parse::<u64>().ok())
        }

        fn visit_bool<E>(self, _v: bool) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(CodeVisitor)
}

/// Deserialize a nested object; anything that does not fit `T` becomes `None`
pub(crate) fn nested<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserialize a list of nested objects, keeping only the entries that fit `T`
pub(crate) fn nested_list<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Deserialize a measurement; unparseable strings become `None`
pub(crate) fn number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Deserialize free text, stringifying scalars the catalog sometimes sends
pub(crate) fn text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Deserialize a flag; any non-zero number counts as set
pub(crate) fn flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "-1" | "1" => Some(true),
            "false" | "no" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Deserialize a list of strings, accepting a single string as a one-item list
pub(crate) fn text_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
        ),
        Some(Value::String(s)) if !s.is_empty() => Some(vec![s]),
        _ => None,
    })
}

/// Interpret a search result entry as a species id
pub(crate) fn id_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "code")]
        code: Option<u64>,
        #[serde(default, deserialize_with = "number")]
        number: Option<f64>,
        #[serde(default, deserialize_with = "flag")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "text")]
        text: Option<String>,
    }

    #[test]
    fn test_code_accepts_number_and_string() {
        let p: Probe = serde_json::from_str(r#"{"code": 8961}"#).unwrap();
        assert_eq!(p.code, Some(8961));
        let p: Probe = serde_json::from_str(r#"{"code": "416"}"#).unwrap();
        assert_eq!(p.code, Some(416));
        let p: Probe = serde_json::from_str(r#"{"code": null}"#).unwrap();
        assert_eq!(p.code, None);
        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.code, None);
    }

    #[test]
    fn test_code_absorbs_garbage() {
        for raw in [
            r#"{"code": "n/a"}"#,
            r#"{"code": -3}"#,
            r#"{"code": 4.5}"#,
            r#"{"code": true}"#,
            r#"{"code": [1]}"#,
            r#"{"code": {"value": 1}}"#,
        ] {
            let p: Probe = serde_json::from_str(raw).unwrap();
            assert_eq!(p.code, None, "{}", raw);
        }
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Inner {
        #[serde(deserialize_with = "code")]
        code: Option<u64>,
    }

    #[derive(Deserialize)]
    struct Outer {
        #[serde(default, deserialize_with = "nested")]
        inner: Option<Inner>,
        #[serde(default, deserialize_with = "nested_list")]
        items: Option<Vec<Inner>>,
    }

    #[test]
    fn test_nested_wrong_shape_is_none() {
        let o: Outer = serde_json::from_str(r#"{"inner": "none", "items": "x"}"#).unwrap();
        assert_eq!(o.inner, None);
        assert_eq!(o.items, None);

        let o: Outer = serde_json::from_str(r#"{"inner": {"code": 7}}"#).unwrap();
        assert_eq!(o.inner, Some(Inner { code: Some(7) }));
    }

    #[test]
    fn test_nested_list_keeps_entries_that_fit() {
        let o: Outer = serde_json::from_str(r#"{"items": [{"code": 1}, null, 5, {"code": "2"}]}"#).unwrap();
        assert_eq!(
            o.items,
            Some(vec![Inner { code: Some(1) }, Inner { code: Some(2) }])
        );
    }

    #[test]
    fn test_number_is_lenient() {
        let p: Probe = serde_json::from_str(r#"{"number": "239"}"#).unwrap();
        assert_eq!(p.number, Some(239.0));
        let p: Probe = serde_json::from_str(r#"{"number": "unknown"}"#).unwrap();
        assert_eq!(p.number, None);
    }

    #[test]
    fn test_flag_accepts_fishbase_minus_one() {
        let p: Probe = serde_json::from_str(r#"{"flag": -1}"#).unwrap();
        assert_eq!(p.flag, Some(true));
        let p: Probe = serde_json::from_str(r#"{"flag": 0}"#).unwrap();
        assert_eq!(p.flag, Some(false));
        let p: Probe = serde_json::from_str(r#"{"flag": true}"#).unwrap();
        assert_eq!(p.flag, Some(true));
    }

    #[test]
    fn test_text_stringifies_numbers() {
        let p: Probe = serde_json::from_str(r#"{"text": 12}"#).unwrap();
        assert_eq!(p.text.as_deref(), Some("12"));
    }

    #[test]
    fn test_id_from_value() {
        assert_eq!(id_from_value(&serde_json::json!(143)), Some(143));
        assert_eq!(id_from_value(&serde_json::json!("137")), Some(137));
        assert_eq!(id_from_value(&serde_json::json!({"id": 1})), None);
    }
}
