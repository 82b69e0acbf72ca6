//! Domain types shared across all Foodgram crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; handlers may use the page envelope directly.

pub mod pagination;
