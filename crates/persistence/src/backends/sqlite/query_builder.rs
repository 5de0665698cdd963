//! SQL generation for application predicates and orderings.
//!
//! Field names never reach the SQL text directly; they are looked up in a
//! fixed column allow-list. Every operand is bound as a parameter.

use crate::error::ValidationError;
use crate::types::{Application, FieldFilter, FindManyArgs, OrderBy, Scalar, WhereClause};

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
    /// Float parameter.
    Float(f64),
}

impl From<&Scalar> for SqlParam {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::String(s) => SqlParam::String(s.clone()),
            Scalar::Bool(b) => SqlParam::Integer(i64::from(*b)),
            Scalar::Number(n) => match n.as_i64() {
                Some(i) => SqlParam::Integer(i),
                None => SqlParam::Float(n.as_f64().unwrap_or(f64::MAX)),
            },
        }
    }
}

impl SqlFragment {
    /// Creates a fragment without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    fn append(&mut self, other: SqlFragment) {
        if other.sql.is_empty() {
            return;
        }
        if !self.sql.is_empty() {
            self.sql.push(' ');
        }
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
    }
}

/// Columns of the `applications` table that may be filtered or sorted on.
fn column_for(field: &str) -> Result<&'static str, ValidationError> {
    Application::FIELDS
        .iter()
        .copied()
        .find(|column| *column == field)
        .ok_or_else(|| ValidationError::UnknownField {
            field: field.to_string(),
        })
}

/// Builds the `WHERE` clause, or an empty fragment for the match-all predicate.
pub fn build_where(predicate: &WhereClause) -> Result<SqlFragment, ValidationError> {
    if predicate.is_empty() {
        return Ok(SqlFragment::default());
    }

    let mut conditions = Vec::with_capacity(predicate.len());
    let mut params = Vec::new();
    for (field, filter) in predicate.iter() {
        let column = column_for(field)?;
        let fragment = build_condition(column, filter);
        conditions.push(fragment.sql);
        params.extend(fragment.params);
    }

    Ok(SqlFragment::with_params(
        format!("WHERE {}", conditions.join(" AND ")),
        params,
    ))
}

fn build_condition(column: &str, filter: &FieldFilter) -> SqlFragment {
    match filter {
        // instr keeps the match case-sensitive and needs no wildcard escaping.
        FieldFilter::Contains(v) => {
            SqlFragment::with_params(format!("instr({}, ?) > 0", column), vec![v.into()])
        }
        FieldFilter::Equals(Some(v)) => {
            SqlFragment::with_params(format!("{} = ?", column), vec![v.into()])
        }
        FieldFilter::Equals(None) => SqlFragment::new(format!("{} IS NULL", column)),
        FieldFilter::Gt(v) => SqlFragment::with_params(format!("{} > ?", column), vec![v.into()]),
        FieldFilter::Gte(v) => SqlFragment::with_params(format!("{} >= ?", column), vec![v.into()]),
        FieldFilter::Lt(v) => SqlFragment::with_params(format!("{} < ?", column), vec![v.into()]),
        FieldFilter::Lte(v) => SqlFragment::with_params(format!("{} <= ?", column), vec![v.into()]),
        FieldFilter::In(values) if values.is_empty() => SqlFragment::new("0"),
        FieldFilter::In(values) => {
            let placeholders = vec!["?"; values.len()].join(", ");
            SqlFragment::with_params(
                format!("{} IN ({})", column, placeholders),
                values.iter().map(SqlParam::from).collect(),
            )
        }
        FieldFilter::Not(inner) => {
            let inner = build_condition(column, inner);
            SqlFragment::with_params(format!("NOT ({})", inner.sql), inner.params)
        }
    }
}

/// Builds the `ORDER BY` clause.
///
/// Insertion order breaks ties so paging is stable.
pub fn build_order_by(order_by: &OrderBy) -> Result<String, ValidationError> {
    let mut terms = Vec::with_capacity(order_by.len() + 1);
    for clause in order_by.iter() {
        let column = column_for(&clause.field)?;
        let direction = clause
            .direction()
            .ok_or_else(|| ValidationError::InvalidSortDirection {
                field: clause.field.clone(),
                direction: clause.direction.clone(),
            })?;
        terms.push(format!("{} {}", column, direction.as_sql()));
    }
    terms.push("rowid ASC".to_string());
    Ok(format!("ORDER BY {}", terms.join(", ")))
}

/// Builds the `LIMIT`/`OFFSET` clause.
pub fn build_limit(skip: Option<u64>, take: Option<u64>) -> SqlFragment {
    let clamp = |n: u64| SqlParam::Integer(i64::try_from(n).unwrap_or(i64::MAX));
    match (take, skip) {
        (Some(take), skip) => SqlFragment::with_params(
            "LIMIT ? OFFSET ?",
            vec![clamp(take), clamp(skip.unwrap_or(0))],
        ),
        (None, Some(skip)) => SqlFragment::with_params("LIMIT -1 OFFSET ?", vec![clamp(skip)]),
        (None, None) => SqlFragment::default(),
    }
}

/// Builds the full page query.
pub fn build_find_many(args: &FindManyArgs) -> Result<SqlFragment, ValidationError> {
    let mut query = SqlFragment::new("SELECT id, username, email FROM applications");
    query.append(build_where(&args.predicate)?);
    query.append(SqlFragment::new(build_order_by(&args.order_by)?));
    query.append(build_limit(args.skip, args.take));
    Ok(query)
}

/// Builds the count query. The ordering is validated but not emitted.
pub fn build_count(predicate: &WhereClause, order_by: &OrderBy) -> Result<SqlFragment, ValidationError> {
    build_order_by(order_by)?;
    let mut query = SqlFragment::new("SELECT COUNT(*) FROM applications");
    query.append(build_where(predicate)?);
    Ok(query)
}
