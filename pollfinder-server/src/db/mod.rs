//! Document store layer
//!
//! One long-lived MongoDB client, created at startup and shared by every
//! handler through [`PollStore`](pollfinder_core::PollStore).

pub mod mongo;

pub use mongo::{filter_document, MongoPollStore, StoreConfig, COLLECTION_NAME, DEFAULT_DATABASE};
