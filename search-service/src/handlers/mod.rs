//! HTTP handlers for the search service.

pub mod ask;
pub mod health;
pub mod root;
