//! Core types for Aula.
//!
//! This module provides type-safe wrappers for common storefront concepts.

pub mod handle;
pub mod pagination;
pub mod price;
pub mod search;

pub use handle::*;
pub use pagination::{PaginationDirection, PaginationRequest};
pub use price::{CurrencyCode, Price, PriceError};
pub use search::{SearchType, plural_to_singular};
