//! Command implementations for the pollfinder CLI

pub mod serve;

pub use serve::run_serve;
