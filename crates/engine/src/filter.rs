//! Query-parameter validation for list endpoints.
//!
//! Clients send everything as strings; these helpers convert them into
//! typed filters and reject junk (`""`, `"null"`, `"undefined"`) instead of
//! silently ignoring it. Each list operation composes the parsed values
//! into its own filter struct.

use std::str::FromStr;

use crate::{EngineError, ResultEngine};

const NOT_ACCEPTED: &[&str] = &["", "null", "undefined"];

/// A `min..=max` filter where either bound may be absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeFilter<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

/// A parsed, whitelisted ordering request.
#[derive(Clone, Debug)]
pub struct Ordering {
    pub field: String,
    pub desc: bool,
}

/// Parse a single typed query parameter.
pub fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> ResultEngine<Option<T>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if NOT_ACCEPTED.contains(&raw) {
        return Err(EngineError::InvalidInput(format!(
            "invalid filter value for {name}: {raw:?}"
        )));
    }
    raw.parse::<T>().map(Some).map_err(|_| {
        EngineError::InvalidInput(format!("invalid format for {name}: {raw:?}"))
    })
}

/// Booleans accept only `true`/`false` (case-insensitive).
pub fn parse_bool(name: &str, raw: Option<&str>) -> ResultEngine<Option<bool>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(EngineError::InvalidInput(format!(
            "invalid format for {name}: expected true or false"
        ))),
    }
}

pub fn parse_range<T: FromStr>(
    name: &str,
    min_raw: Option<&str>,
    max_raw: Option<&str>,
) -> ResultEngine<RangeFilter<T>> {
    Ok(RangeFilter {
        min: parse_param(&format!("{name}_min"), min_raw)?,
        max: parse_param(&format!("{name}_max"), max_raw)?,
    })
}

/// `exclude` is a comma-separated id list.
pub fn parse_exclude(raw: Option<&str>) -> ResultEngine<Vec<i64>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(|part| {
            part.trim().parse::<i64>().map_err(|_| {
                EngineError::InvalidInput(
                    "invalid exclude parameter, expected comma-separated ids".to_string(),
                )
            })
        })
        .collect()
}

/// `ordering=field` or `ordering=-field`, restricted to a whitelist.
pub fn parse_ordering(raw: Option<&str>, allowed: &[&str]) -> ResultEngine<Option<Ordering>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let (field, desc) = match raw.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };
    if !allowed.contains(&field) {
        return Err(EngineError::InvalidInput(format!(
            "ordering by {field:?} is not supported"
        )));
    }
    Ok(Some(Ordering {
        field: field.to_string(),
        desc,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_params() {
        assert_eq!(parse_param::<i64>("id", Some("42")).unwrap(), Some(42));
        assert_eq!(parse_param::<i64>("id", None).unwrap(), None);
        assert!(parse_param::<i64>("id", Some("abc")).is_err());
    }

    #[test]
    fn rejects_placeholder_values() {
        assert!(parse_param::<i64>("id", Some("null")).is_err());
        assert!(parse_param::<i64>("id", Some("undefined")).is_err());
        assert!(parse_param::<i64>("id", Some("")).is_err());
    }

    #[test]
    fn bools_are_strict() {
        assert_eq!(parse_bool("is_used", Some("TRUE")).unwrap(), Some(true));
        assert!(parse_bool("is_used", Some("1")).is_err());
    }

    #[test]
    fn exclude_lists_must_be_integers() {
        assert_eq!(parse_exclude(Some("1, 2,3")).unwrap(), vec![1, 2, 3]);
        assert!(parse_exclude(Some("1,x")).is_err());
        assert!(parse_exclude(None).unwrap().is_empty());
    }

    #[test]
    fn ordering_is_whitelisted() {
        let ordering = parse_ordering(Some("-price"), &["id", "price"])
            .unwrap()
            .unwrap();
        assert_eq!(ordering.field, "price");
        assert!(ordering.desc);
        assert!(parse_ordering(Some("password"), &["id", "price"]).is_err());
    }
}
