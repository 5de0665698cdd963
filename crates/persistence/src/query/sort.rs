//! Sort expression parsing.
//!
//! The sort parameter is a JSON array of single-entry objects mapping a field
//! to a direction, e.g. `[{"username":"ASC"},{"email":"desc"}]`. A single
//! object is accepted as a one-element array. Field names and direction
//! tokens are passed through untouched; the store decides whether they are
//! valid.

use serde_json::{Map, Value};

use crate::error::{QueryError, QueryResult};
use crate::types::{OrderBy, SortClause};

/// Parses the serialized sort parameter into a store ordering.
///
/// An absent, blank or `null` parameter yields the empty ordering.
pub fn parse_sort(raw: Option<&str>) -> QueryResult<OrderBy> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(OrderBy::new());
    };

    let parsed: Value = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;

    let mut order_by = OrderBy::new();
    match parsed {
        Value::Null => {}
        Value::Object(entry) => order_by.push(sort_clause(entry)?),
        Value::Array(entries) => {
            for entry in entries {
                match entry {
                    Value::Object(entry) => order_by.push(sort_clause(entry)?),
                    _ => return Err(malformed("sort entries must be objects")),
                }
            }
        }
        _ => return Err(malformed("expected an array of sort objects")),
    }

    Ok(order_by)
}

fn sort_clause(entry: Map<String, Value>) -> QueryResult<SortClause> {
    if entry.len() != 1 {
        return Err(malformed(format!(
            "sort objects must have exactly one field, got {}",
            entry.len()
        )));
    }

    match entry.into_iter().next() {
        Some((field, Value::String(direction))) => Ok(SortClause::new(field, direction)),
        Some((field, _)) => Err(malformed(format!("direction for '{}' must be a string", field))),
        None => Err(malformed("empty sort object")),
    }
}

fn malformed(detail: impl Into<String>) -> QueryError {
    QueryError::Malformed {
        parameter: "sort",
        detail: detail.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_passes_through_in_order() {
        let order = parse_sort(Some(r#"[{"username":"ASC"},{"email":"desc"}]"#)).unwrap();
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!([{"username": "ASC"}, {"email": "desc"}])
        );
    }

    #[test]
    fn test_single_object_is_accepted() {
        let order = parse_sort(Some(r#"{"email":"DESC"}"#)).unwrap();
        assert_eq!(order, OrderBy::from(vec![SortClause::new("email", "DESC")]));
    }

    #[test]
    fn test_fields_and_directions_are_not_validated() {
        let order = parse_sort(Some(r#"[{"nickname":"sideways"}]"#)).unwrap();
        assert_eq!(order, OrderBy::from(vec![SortClause::new("nickname", "sideways")]));
    }

    #[test]
    fn test_empty_inputs() {
        for raw in [None, Some(""), Some("null"), Some("[]")] {
            assert!(parse_sort(raw).unwrap().is_empty(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_malformed_sort() {
        for raw in [
            "abc",
            "[{",
            "42",
            r#""username""#,
            r#"["username"]"#,
            r#"[{"username": 1}]"#,
            r#"[{}]"#,
            r#"[{"username": "ASC", "email": "DESC"}]"#,
        ] {
            let err = parse_sort(Some(raw)).unwrap_err();
            assert!(
                matches!(err, QueryError::Malformed { parameter: "sort", .. }),
                "input {:?}",
                raw
            );
        }
    }
}
