//! Catalog helpers
//!
//! A catalog is an ordered slice of discoverers. Order is display order and
//! the id is the lookup key; the first entry with a given id wins.

use std::collections::HashSet;
use thiserror::Error;

use crate::discoverer::{Discoverer, DiscovererId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate discoverer id: {0}")]
    DuplicateId(String),
    #[error("Discoverer #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
}

/// Find the first discoverer with the given id
pub fn find_discoverer<'a>(catalog: &'a [Discoverer], id: &DiscovererId) -> Option<&'a Discoverer> {
    catalog.iter().find(|d| &d.id == id)
}

/// Check a catalog before it is served
pub fn validate_catalog(catalog: &[Discoverer]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for (index, discoverer) in catalog.iter().enumerate() {
        if discoverer.id.as_str().is_empty() {
            return Err(CatalogError::EmptyField { index, field: "id" });
        }
        if discoverer.name.trim().is_empty() {
            return Err(CatalogError::EmptyField { index, field: "name" });
        }
        if !seen.insert(discoverer.id.as_str()) {
            return Err(CatalogError::DuplicateId(discoverer.id.to_string()));
        }
        if !discoverer.kind.is_supported() {
            tracing::warn!(
                id = %discoverer.id,
                kind = %discoverer.kind,
                "Discoverer type has no import view"
            );
        }
    }
    Ok(())
}
