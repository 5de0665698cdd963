//! Core types for the persistence layer.
//!
//! This module provides the fundamental types used throughout the persistence layer:
//!
//! - [`Application`], [`NewApplication`], [`ApplicationUpdate`] - The record and its inputs
//! - [`WhereClause`], [`FieldFilter`], [`Scalar`] - Store-native predicates
//! - [`OrderBy`], [`SortClause`] - Store-native ordering
//! - [`FindManyArgs`], [`CountArgs`] - Arguments for bounded reads
//!
//! # Examples
//!
//! ## Building a Predicate by Hand
//!
//! ```
//! use roster_persistence::types::{FieldFilter, Scalar, WhereClause};
//! use serde_json::json;
//!
//! let mut predicate = WhereClause::new();
//! predicate.insert("username", FieldFilter::Contains(Scalar::from("ada")));
//! predicate.insert("email", FieldFilter::Not(Box::new(FieldFilter::Equals(None))));
//!
//! assert_eq!(
//!     serde_json::to_value(&predicate).unwrap(),
//!     json!({
//!         "username": {"contains": "ada"},
//!         "email": {"not": {"equals": null}}
//!     })
//! );
//! ```
//!
//! ## Bounded Reads
//!
//! ```
//! use roster_persistence::types::{FindManyArgs, OrderBy, SortClause};
//!
//! let args = FindManyArgs::new()
//!     .with_skip(20)
//!     .with_take(10)
//!     .with_order_by(OrderBy::from(vec![SortClause::new("email", "DESC")]));
//!
//! assert_eq!(args.skip, Some(20));
//! assert_eq!(args.count_args().order_by.len(), 1);
//! ```

mod application;
mod predicate;

pub use application::{Application, ApplicationUpdate, NewApplication};
pub use predicate::{
    CountArgs, FieldFilter, FindManyArgs, OrderBy, Scalar, SortClause, SortDirection, WhereClause,
};
