//! Auth types shared across Foodgram crates.
//!
//! Token issuance lives in the gateway. Services only read the identity headers it injects.

pub mod identity;
