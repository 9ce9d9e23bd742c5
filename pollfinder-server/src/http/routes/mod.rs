//! Route handlers organized by resource

pub mod feedback;
pub mod health;
pub mod polls;
pub mod root;
