//! Coinhall Core - Shared domain types.
//!
//! This crate provides the types used by every Coinhall component:
//! - `server` - HTTP backend for the virtual-economy app
//! - `cli` - Operator tools that work directly on the data file
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no file access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, balances, record IDs and event kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
