//! Import view seam
//!
//! The import views themselves live outside this crate. The screen asks a
//! [`ViewFactory`] for an instance whenever the resolved discoverer id changes
//! and drops the previous one, so per-discoverer view state never leaks into
//! the next pick.

use hwimport_core::{Discoverer, DiscovererId};
use tracing::debug;

use crate::selection::{InputMode, ResolvedView, ViewKind};

/// What an import view is created with
#[derive(Debug, Clone, PartialEq)]
pub struct ImportViewProps {
    pub kind: ViewKind,
    pub discoverer: Discoverer,
    pub input_mode: InputMode,
}

impl From<&ResolvedView> for ImportViewProps {
    fn from(view: &ResolvedView) -> Self {
        Self {
            kind: view.kind,
            discoverer: view.discoverer.clone(),
            input_mode: view.input_mode(),
        }
    }
}

/// A live import view drawn in the screen's content region
pub trait ImportView {
    fn ui(&mut self, ui: &mut egui::Ui);
}

/// Builds import views for resolved discoverers
pub trait ViewFactory {
    type View: ImportView;

    fn create(&mut self, props: ImportViewProps) -> Self::View;
}

/// Holds at most one view instance, keyed by discoverer id
pub struct ViewSlot<V> {
    current: Option<(DiscovererId, V)>,
}

impl<V> Default for ViewSlot<V> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<V> ViewSlot<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Option<&DiscovererId> {
        self.current.as_ref().map(|(key, _)| key)
    }

    pub fn view_mut(&mut self) -> Option<&mut V> {
        self.current.as_mut().map(|(_, view)| view)
    }

    /// Match the slot to the resolved view; returns true when a new instance was created
    pub fn sync<F>(&mut self, resolved: Option<&ResolvedView>, factory: &mut F) -> bool
    where
        F: ViewFactory<View = V>,
    {
        let Some(resolved) = resolved else {
            self.clear();
            return false;
        };
        if self.key() == Some(resolved.key()) {
            return false;
        }
        debug!(id = %resolved.key(), kind = resolved.kind.as_str(), "Instantiating import view");
        let view = factory.create(ImportViewProps::from(resolved));
        self.current = Some((resolved.key().clone(), view));
        true
    }

    pub fn clear(&mut self) {
        if let Some((key, _)) = self.current.take() {
            debug!(id = %key, "Discarding import view");
        }
    }
}
