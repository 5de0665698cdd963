//! Route configuration for the REST API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod application_routes;

pub use application_routes::create_routes;
