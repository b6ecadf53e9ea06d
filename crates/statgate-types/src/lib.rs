//! Shared types, adapter traits, and core utilities for statgate.
//!
//! This crate contains the types shared between the gate core and all
//! adapter implementations, so storage adapters compile without pulling in
//! the HTTP middleware.

pub mod auth_adapter;
pub mod error;
pub mod meta_adapter;
pub mod prelude;
pub mod rate_limit_store;
pub mod types;

// vim: ts=4
