//! Aula Core - Shared types library.
//!
//! This crate provides common types used across the Aula components:
//! - `storefront` - Public-facing course storefront
//! - `integration-tests` - Router-level tests for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated handles, prices, cursor pagination and search resource types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
