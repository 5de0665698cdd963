//! Filter parsing and translation.
//!
//! A filter parameter is a JSON array of `{key, operation, value}` clauses.
//! Clauses are applied in order and a later clause for the same key replaces
//! an earlier one.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::types::{FieldFilter, Scalar, WhereClause};

/// The operations a filter clause may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperation {
    /// Substring match.
    Like,
    /// Exact equality.
    Eq,
    /// Negated equality.
    Neq,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Membership in a sequence.
    In,
    /// Non-membership in a sequence.
    NotIn,
    /// The field is null. The clause value is ignored.
    IsNull,
}

impl FilterOperation {
    /// Parses an operation name. Names are matched exactly.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "like" => Some(FilterOperation::Like),
            "eq" => Some(FilterOperation::Eq),
            "neq" => Some(FilterOperation::Neq),
            "gt" => Some(FilterOperation::Gt),
            "gte" => Some(FilterOperation::Gte),
            "lt" => Some(FilterOperation::Lt),
            "lte" => Some(FilterOperation::Lte),
            "in" => Some(FilterOperation::In),
            "notin" => Some(FilterOperation::NotIn),
            "isnull" => Some(FilterOperation::IsNull),
            _ => None,
        }
    }

    /// Returns the wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperation::Like => "like",
            FilterOperation::Eq => "eq",
            FilterOperation::Neq => "neq",
            FilterOperation::Gt => "gt",
            FilterOperation::Gte => "gte",
            FilterOperation::Lt => "lt",
            FilterOperation::Lte => "lte",
            FilterOperation::In => "in",
            FilterOperation::NotIn => "notin",
            FilterOperation::IsNull => "isnull",
        }
    }
}

/// The operation named by a clause, recognised or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseOperation {
    /// One of the supported operations.
    Known(FilterOperation),
    /// An operation name nobody understands. Such clauses are skipped.
    Unrecognized(String),
}

/// A clause value: a single scalar or a sequence of scalars.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A single value.
    Scalar(Scalar),
    /// A list of values.
    Sequence(Vec<Scalar>),
}

/// One parsed `{key, operation, value}` unit.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    /// The record field the clause constrains.
    pub key: String,
    /// The requested operation.
    pub operation: ClauseOperation,
    /// The operand, if one was supplied.
    pub value: Option<FilterValue>,
}

impl FilterClause {
    /// Creates a clause with a recognised operation.
    pub fn new(key: impl Into<String>, operation: FilterOperation, value: Option<FilterValue>) -> Self {
        Self {
            key: key.into(),
            operation: ClauseOperation::Known(operation),
            value,
        }
    }
}

/// Shape of a clause before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawClause {
    key: Option<Value>,
    operation: Option<Value>,
    value: Option<Value>,
}

/// An ordered sequence of filter clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression(Vec<FilterClause>);

impl FilterExpression {
    /// Parses the serialized filter parameter.
    ///
    /// An absent, blank or `null` parameter yields the empty expression.
    /// Entries without a string `operation` are skipped. An entry with a
    /// recognised operation must name a non-empty `key`.
    pub fn parse(raw: Option<&str>) -> QueryResult<Self> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let parsed: Value = serde_json::from_str(raw).map_err(|e| QueryError::Malformed {
            parameter: "filter",
            detail: e.to_string(),
        })?;

        let entries = match parsed {
            Value::Null => return Ok(Self::default()),
            Value::Array(entries) => entries,
            other => {
                return Err(QueryError::Malformed {
                    parameter: "filter",
                    detail: format!("expected an array of clauses, got {}", kind_of(&other)),
                });
            }
        };

        let mut clauses = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(clause) = parse_clause(entry)? {
                clauses.push(clause);
            }
        }
        Ok(Self(clauses))
    }

    /// Returns the clauses in application order.
    pub fn clauses(&self) -> &[FilterClause] {
        &self.0
    }

    /// Returns `true` if there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<FilterClause>> for FilterExpression {
    fn from(clauses: Vec<FilterClause>) -> Self {
        Self(clauses)
    }
}

fn parse_clause(entry: Value) -> QueryResult<Option<FilterClause>> {
    // Entries that are not objects carry no operation and are skipped.
    let raw: RawClause = match entry {
        Value::Object(_) => serde_json::from_value(entry).unwrap_or_default(),
        _ => RawClause::default(),
    };

    let Some(Value::String(name)) = raw.operation else {
        return Ok(None);
    };

    let key = match raw.key {
        Some(Value::String(key)) => key,
        _ => String::new(),
    };

    let operation = match FilterOperation::parse(&name) {
        Some(op) => op,
        None => {
            return Ok(Some(FilterClause {
                key,
                operation: ClauseOperation::Unrecognized(name),
                value: None,
            }));
        }
    };

    if key.is_empty() {
        return Err(QueryError::MissingKey {
            operation: operation.as_str(),
        });
    }

    let value = match raw.value {
        _ if operation == FilterOperation::IsNull => None,
        None | Some(Value::Null) => None,
        Some(v) => Some(serde_json::from_value::<FilterValue>(v).map_err(|_| {
            QueryError::ValueShape {
                key: key.clone(),
                operation: operation.as_str(),
                expected: "a scalar or a sequence of scalars",
            }
        })?),
    };

    Ok(Some(FilterClause::new(key, operation, value)))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Translates a filter expression into a store predicate.
///
/// Clauses with unrecognised operations are skipped. The value is never
/// coerced; it is only checked for shape: `in` and `notin` need a sequence,
/// every other operation except `isnull` needs a scalar.
pub fn translate(expression: &FilterExpression) -> QueryResult<WhereClause> {
    let mut predicate = WhereClause::new();

    for clause in expression.clauses() {
        let operation = match &clause.operation {
            ClauseOperation::Known(op) => *op,
            ClauseOperation::Unrecognized(name) => {
                debug!(key = %clause.key, operation = %name, "Ignoring unrecognized filter operation");
                continue;
            }
        };

        let fragment = fragment_for(&clause.key, operation, clause.value.as_ref())?;
        predicate.insert(clause.key.clone(), fragment);
    }

    Ok(predicate)
}

fn fragment_for(
    key: &str,
    operation: FilterOperation,
    value: Option<&FilterValue>,
) -> QueryResult<FieldFilter> {
    let fragment = match operation {
        FilterOperation::Like => FieldFilter::Contains(scalar(key, operation, value)?),
        FilterOperation::Eq => FieldFilter::Equals(Some(scalar(key, operation, value)?)),
        FilterOperation::Neq => {
            let operand = scalar(key, operation, value)?;
            FieldFilter::Not(Box::new(FieldFilter::Equals(Some(operand))))
        }
        FilterOperation::Gt => FieldFilter::Gt(scalar(key, operation, value)?),
        FilterOperation::Gte => FieldFilter::Gte(scalar(key, operation, value)?),
        FilterOperation::Lt => FieldFilter::Lt(scalar(key, operation, value)?),
        FilterOperation::Lte => FieldFilter::Lte(scalar(key, operation, value)?),
        FilterOperation::In => FieldFilter::In(sequence(key, operation, value)?),
        FilterOperation::NotIn => {
            FieldFilter::Not(Box::new(FieldFilter::In(sequence(key, operation, value)?)))
        }
        FilterOperation::IsNull => FieldFilter::Equals(None),
    };
    Ok(fragment)
}

fn scalar(key: &str, operation: FilterOperation, value: Option<&FilterValue>) -> QueryResult<Scalar> {
    match value {
        Some(FilterValue::Scalar(s)) => Ok(s.clone()),
        _ => Err(QueryError::ValueShape {
            key: key.to_string(),
            operation: operation.as_str(),
            expected: "a scalar",
        }),
    }
}

fn sequence(
    key: &str,
    operation: FilterOperation,
    value: Option<&FilterValue>,
) -> QueryResult<Vec<Scalar>> {
    match value {
        Some(FilterValue::Sequence(items)) => Ok(items.clone()),
        _ => Err(QueryError::ValueShape {
            key: key.to_string(),
            operation: operation.as_str(),
            expected: "a sequence",
        }),
    }
}
