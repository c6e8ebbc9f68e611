//! Storekeep Core - Shared types library.
//!
//! This crate provides common types used across all Storekeep components:
//! - `admin` - The in-process admin catalog store
//! - `cli` - Command-line tools for loading fixtures and inspecting a store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no locks,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
