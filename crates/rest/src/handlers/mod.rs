//! HTTP request handlers.
//!
//! | Handler | HTTP Method | URL Pattern |
//! |---------|-------------|-------------|
//! | [`create_handler`] | POST | `/v1/applications` |
//! | [`find_all_handler`] | GET | `/v1/applications` |
//! | [`search_handler`] | GET | `/v1/applications/search` |
//! | [`find_one_handler`] | GET | `/v1/applications/{id}` |
//! | [`update_handler`] | PUT | `/v1/applications/{id}` |
//! | [`delete_handler`] | DELETE | `/v1/applications/{id}` |
//! | [`health_handler`] | GET | `/health` |
//! | [`liveness_handler`] | GET | `/_liveness` |
//! | [`readiness_handler`] | GET | `/_readiness` |
//! | [`metrics_handler`] | GET | `/metrics` |

pub mod applications;
pub mod health;
pub mod metrics;

pub use applications::{
    create_handler, delete_handler, find_all_handler, find_one_handler, search_handler,
    update_handler,
};
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use metrics::metrics_handler;
