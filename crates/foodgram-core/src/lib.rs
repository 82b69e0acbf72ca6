//! Cross-cutting plumbing shared by Foodgram services.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
