//! Discoverer selection and view resolution

use hwimport_core::{find_discoverer, Discoverer, DiscovererId, DiscovererKind};
use tracing::debug;

/// Which import view handles a discoverer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    NetworkScanImport,
    StringImport,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkScanImport => "network-scan-import",
            Self::StringImport => "string-import",
        }
    }
}

/// How the import view should collect devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Scan,
    FromString,
}

/// The import view to show for the current selection
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView {
    pub kind: ViewKind,
    pub discoverer: Discoverer,
}

impl ResolvedView {
    /// Identity of the view instance; a new id means a fresh instance
    pub fn key(&self) -> &DiscovererId {
        &self.discoverer.id
    }

    pub fn input_mode(&self) -> InputMode {
        match self.kind {
            ViewKind::NetworkScanImport => InputMode::Scan,
            ViewKind::StringImport => InputMode::FromString,
        }
    }
}

/// Resolve the selection against the catalog
///
/// Stale ids and unsupported types resolve to `None`.
pub fn resolve(catalog: &[Discoverer], selection: Option<&DiscovererId>) -> Option<ResolvedView> {
    let discoverer = find_discoverer(catalog, selection?)?;
    let kind = match &discoverer.kind {
        DiscovererKind::ScanDevices => ViewKind::NetworkScanImport,
        DiscovererKind::FromString => ViewKind::StringImport,
        DiscovererKind::Unsupported(raw) => {
            debug!(id = %discoverer.id, kind = %raw, "No import view for discoverer type");
            return None;
        }
    };
    Some(ResolvedView {
        kind,
        discoverer: discoverer.clone(),
    })
}

/// Owns the operator's current pick
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Option<DiscovererId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&DiscovererId> {
        self.selected.as_ref()
    }

    /// Select a discoverer by id; ids missing from the catalog are accepted
    pub fn select(&mut self, id: impl Into<DiscovererId>) -> bool {
        self.set(Some(id.into()))
    }

    pub fn clear(&mut self) -> bool {
        self.set(None)
    }

    /// Replace the selection; returns true when it changed
    pub fn set(&mut self, selection: Option<DiscovererId>) -> bool {
        if self.selected == selection {
            return false;
        }
        debug!(selection = ?selection, "Discoverer selection changed");
        self.selected = selection;
        true
    }

    pub fn resolve(&self, catalog: &[Discoverer]) -> Option<ResolvedView> {
        resolve(catalog, self.selected.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Discoverer> {
        vec![
            Discoverer::new("a", "Router", DiscovererKind::ScanDevices),
            Discoverer::new("b", "Manual", DiscovererKind::FromString),
            Discoverer::new("u", "Mystery", DiscovererKind::from("Unknown")),
        ]
    }

    #[test]
    fn test_unselected_resolves_to_nothing() {
        let controller = SelectionController::new();
        assert!(controller.selected().is_none());
        assert!(controller.resolve(&catalog()).is_none());
    }

    #[test]
    fn test_scan_devices_resolves_to_network_scan() {
        let mut controller = SelectionController::new();
        assert!(controller.select("a"));

        let view = controller.resolve(&catalog()).unwrap();
        assert_eq!(view.kind, ViewKind::NetworkScanImport);
        assert_eq!(view.kind.as_str(), "network-scan-import");
        assert_eq!(view.discoverer.name, "Router");
        assert_eq!(view.input_mode(), InputMode::Scan);
    }

    #[test]
    fn test_from_string_resolves_to_string_import() {
        let catalog = vec![Discoverer::new("b", "Manual", DiscovererKind::FromString)];
        let view = resolve(&catalog, Some(&DiscovererId::from("b"))).unwrap();
        assert_eq!(view.kind, ViewKind::StringImport);
        assert_eq!(view.input_mode(), InputMode::FromString);
        assert_eq!(view.key().as_str(), "b");
    }

    #[test]
    fn test_unknown_type_resolves_to_nothing() {
        assert!(resolve(&catalog(), Some(&DiscovererId::from("u"))).is_none());
    }

    #[test]
    fn test_stale_selection_resolves_to_nothing() {
        let mut controller = SelectionController::new();
        controller.select("z");
        assert_eq!(controller.selected().map(|id| id.as_str()), Some("z"));
        assert!(controller.resolve(&catalog()).is_none());
        assert!(controller.resolve(&[]).is_none());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let catalog = catalog();
        for id in ["a", "b", "u", "z"] {
            let selection = DiscovererId::from(id);
            assert_eq!(
                resolve(&catalog, Some(&selection)),
                resolve(&catalog, Some(&selection))
            );
        }
    }

    #[test]
    fn test_opaque_config_forwarded() {
        let mut router = Discoverer::new("a", "Router", DiscovererKind::ScanDevices);
        router
            .config
            .insert("subnet".to_string(), serde_json::json!("10.0.0.0/24"));
        let view = resolve(&[router.clone()], Some(&DiscovererId::from("a"))).unwrap();
        assert_eq!(view.discoverer, router);
    }

    #[test]
    fn test_set_reports_changes() {
        let mut controller = SelectionController::new();
        assert!(!controller.clear());
        assert!(controller.select("a"));
        assert!(!controller.select("a"));
        assert!(controller.clear());
    }
}
