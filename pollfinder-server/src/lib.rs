//! pollfinder-server: HTTP surface for the poll review tool
//!
//! Serves review-worthy poll records out of the `expanded_polls` MongoDB
//! collection and records reviewer feedback against them.

pub mod db;
pub mod http;

pub use db::{MongoPollStore, StoreConfig};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
