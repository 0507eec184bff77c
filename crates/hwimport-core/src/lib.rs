//! Hwimport Core - Discoverer catalog types
//!
//! This crate provides the shared data model for the hardware import screen:
//! - Discoverer records as served by the daemon and consumed by the UI
//! - The closed set of discoverer types the UI knows how to dispatch
//! - Catalog validation and lookup helpers
//! - Validation of the input fields a discoverer asks the operator for

pub mod catalog;
pub mod discoverer;

pub use catalog::{find_discoverer, validate_catalog, CatalogError};
pub use discoverer::{Discoverer, DiscovererId, DiscovererKind, FieldError, UiField};
