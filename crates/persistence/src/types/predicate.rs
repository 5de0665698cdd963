//! Store-native predicate and ordering types.
//!
//! These are the shapes a [`RecordStore`](crate::core::RecordStore) understands.
//! They serialize to the familiar `{field: {operator: operand}}` form so that
//! a translated query can be logged or compared as JSON.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// A single operand value, passed through exactly as the client supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean operand.
    Bool(bool),
    /// A numeric operand.
    Number(Number),
    /// A string operand.
    String(String),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(Number::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// A predicate fragment applied to one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldFilter {
    /// Substring match.
    Contains(Scalar),
    /// Exact equality; `None` matches null.
    Equals(Option<Scalar>),
    /// Strictly greater than.
    Gt(Scalar),
    /// Greater than or equal.
    Gte(Scalar),
    /// Strictly less than.
    Lt(Scalar),
    /// Less than or equal.
    Lte(Scalar),
    /// Membership in a set of values.
    In(Vec<Scalar>),
    /// Negation of the inner fragment.
    Not(Box<FieldFilter>),
}

/// A conjunction of per-field fragments, at most one per field.
///
/// The empty clause matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WhereClause(BTreeMap<String, FieldFilter>);

impl WhereClause {
    /// Creates an empty (match-all) clause.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fragment for a field, returning the one it replaced.
    pub fn insert(&mut self, field: impl Into<String>, filter: FieldFilter) -> Option<FieldFilter> {
        self.0.insert(field.into(), filter)
    }

    /// Returns the fragment for a field.
    pub fn get(&self, field: &str) -> Option<&FieldFilter> {
        self.0.get(field)
    }

    /// Returns the number of constrained fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no field is constrained.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the fragments in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldFilter)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Sort direction as understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

impl SortDirection {
    /// Parses a direction token, ignoring case.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Ascending)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Descending)
        } else {
            None
        }
    }

    /// Returns the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// One `{field: direction}` ordering entry.
///
/// The direction token is kept verbatim; the store decides whether it is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    /// The field to order by.
    pub field: String,
    /// The direction token as supplied.
    pub direction: String,
}

impl SortClause {
    /// Creates a sort clause.
    pub fn new(field: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: direction.into(),
        }
    }

    /// Interprets the direction token.
    pub fn direction(&self) -> Option<SortDirection> {
        SortDirection::parse(&self.direction)
    }
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.direction)?;
        map.end()
    }
}

/// An ordered list of sort clauses; earlier clauses take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderBy(Vec<SortClause>);

impl OrderBy {
    /// Creates an empty ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clause.
    pub fn push(&mut self, clause: SortClause) {
        self.0.push(clause);
    }

    /// Returns the number of clauses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no ordering was requested.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the clauses in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &SortClause> {
        self.0.iter()
    }
}

impl From<Vec<SortClause>> for OrderBy {
    fn from(clauses: Vec<SortClause>) -> Self {
        Self(clauses)
    }
}

/// Arguments for a bounded, filtered, ordered read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindManyArgs {
    /// Number of matching records to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// Maximum number of records to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<u64>,
    /// Ordering of the result.
    pub order_by: OrderBy,
    /// Records must match this predicate.
    #[serde(rename = "where")]
    pub predicate: WhereClause,
}

impl FindManyArgs {
    /// Creates unbounded, unordered, unfiltered arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the skip count.
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the take count.
    pub fn with_take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    /// Sets the ordering.
    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    /// Sets the predicate.
    pub fn with_predicate(mut self, predicate: WhereClause) -> Self {
        self.predicate = predicate;
        self
    }

    /// Returns count arguments over the same ordering and predicate.
    pub fn count_args(&self) -> CountArgs {
        CountArgs {
            order_by: self.order_by.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

/// Arguments for counting matching records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountArgs {
    /// Ordering; validated by the store but irrelevant to the count.
    pub order_by: OrderBy,
    /// Records must match this predicate.
    #[serde(rename = "where")]
    pub predicate: WhereClause,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_deserialize() {
        let s: Scalar = serde_json::from_value(json!("a")).unwrap();
        assert_eq!(s, Scalar::from("a"));
        let n: Scalar = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(n, Scalar::from(4));
        let b: Scalar = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(b, Scalar::Bool(true));
        assert!(serde_json::from_value::<Scalar>(json!(null)).is_err());
        assert!(serde_json::from_value::<Scalar>(json!(["a"])).is_err());
    }

    #[test]
    fn test_field_filter_serialization() {
        let not_in = FieldFilter::Not(Box::new(FieldFilter::In(vec![Scalar::from("9")])));
        assert_eq!(serde_json::to_value(&not_in).unwrap(), json!({"not": {"in": ["9"]}}));

        let is_null = FieldFilter::Equals(None);
        assert_eq!(serde_json::to_value(&is_null).unwrap(), json!({"equals": null}));

        let gte = FieldFilter::Gte(Scalar::from(5));
        assert_eq!(serde_json::to_value(&gte).unwrap(), json!({"gte": 5}));
    }

    #[test]
    fn test_where_clause_insert_replaces() {
        let mut clause = WhereClause::new();
        assert!(clause.insert("a", FieldFilter::Gt(Scalar::from("1"))).is_none());
        let previous = clause.insert("a", FieldFilter::Lt(Scalar::from("2")));
        assert_eq!(previous, Some(FieldFilter::Gt(Scalar::from("1"))));
        assert_eq!(clause.len(), 1);
        assert_eq!(clause.get("a"), Some(&FieldFilter::Lt(Scalar::from("2"))));
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("ASC"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("Desc"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("sideways"), None);
    }

    #[test]
    fn test_order_by_serialization() {
        let order = OrderBy::from(vec![
            SortClause::new("username", "ASC"),
            SortClause::new("email", "desc"),
        ]);
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!([{"username": "ASC"}, {"email": "desc"}])
        );
    }

    #[test]
    fn test_find_many_args_serialization() {
        let mut predicate = WhereClause::new();
        predicate.insert("email", FieldFilter::Equals(Some(Scalar::from("x@y.z"))));
        let args = FindManyArgs::new()
            .with_skip(10)
            .with_take(10)
            .with_predicate(predicate);

        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({
                "skip": 10,
                "take": 10,
                "orderBy": [],
                "where": {"email": {"equals": "x@y.z"}}
            })
        );
        assert_eq!(args.count_args().predicate, args.predicate);
    }
}
