//! Selector options derived from the catalog

use hwimport_core::{Discoverer, DiscovererId};

/// Label of the leading "nothing selected" option
pub const DEFAULT_PLACEHOLDER: &str = "Choose a product ...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// `None` for the placeholder
    pub value: Option<DiscovererId>,
    pub label: String,
}

/// Placeholder first, then one option per discoverer in catalog order
pub fn project_options(catalog: &[Discoverer], placeholder: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption {
        value: None,
        label: placeholder.to_string(),
    })
    .chain(catalog.iter().map(|d| SelectOption {
        value: Some(d.id.clone()),
        label: d.name.clone(),
    }))
    .collect()
}
