//! The import screen: catalog loader, selection and view slot bound together
//!
//! Every applied change (catalog arrived, selection moved) reruns the option
//! projection and the resolver, re-keys the view slot and publishes the new
//! [`RenderModel`] to subscribers.

use hwimport_core::{Discoverer, DiscovererId};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::loader::{CatalogLoader, LoadState};
use crate::projection::{project_options, SelectOption, DEFAULT_PLACEHOLDER};
use crate::selection::{ResolvedView, SelectionController};
use crate::source::CatalogSource;
use crate::view::{ViewFactory, ViewSlot};

/// Everything needed to draw the screen
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    /// Selector options, placeholder first
    pub options: Vec<SelectOption>,
    pub selected: Option<DiscovererId>,
    /// View for the content region, if any
    pub active: Option<ResolvedView>,
}

pub struct ImportScreen<F: ViewFactory> {
    loader: CatalogLoader,
    selection: SelectionController,
    factory: F,
    slot: ViewSlot<F::View>,
    placeholder: String,
    model: RenderModel,
    model_tx: watch::Sender<RenderModel>,
}

impl<F: ViewFactory> ImportScreen<F> {
    pub fn new(factory: F) -> Self {
        let model = RenderModel {
            options: project_options(&[], DEFAULT_PLACEHOLDER),
            selected: None,
            active: None,
        };
        let (model_tx, _) = watch::channel(model.clone());
        Self {
            loader: CatalogLoader::new(),
            selection: SelectionController::new(),
            factory,
            slot: ViewSlot::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            model,
            model_tx,
        }
    }

    /// Use a different label for the "nothing selected" option
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self.recompute();
        self
    }

    /// Start the one catalog fetch; must be called inside a tokio runtime
    pub fn mount<S: CatalogSource>(&mut self, source: Arc<S>) -> bool {
        self.loader.start(source)
    }

    /// Apply a finished fetch, if any; call once per frame
    pub fn pump(&mut self) -> bool {
        if self.loader.poll() {
            self.recompute();
            true
        } else {
            false
        }
    }

    pub fn select(&mut self, id: impl Into<DiscovererId>) {
        self.set_selection(Some(id.into()));
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    pub fn set_selection(&mut self, selection: Option<DiscovererId>) {
        if self.selection.set(selection) {
            self.recompute();
        }
    }

    /// Stop listening for the catalog and drop the live view
    pub fn teardown(&mut self) {
        self.loader.teardown();
        self.slot.clear();
    }

    pub fn catalog(&self) -> &[Discoverer] {
        self.loader.catalog()
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn selected(&self) -> Option<&DiscovererId> {
        self.selection.selected()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn model(&self) -> &RenderModel {
        &self.model
    }

    /// Receive a fresh [`RenderModel`] after every change
    pub fn subscribe(&self) -> watch::Receiver<RenderModel> {
        self.model_tx.subscribe()
    }

    /// The live import view and its discoverer id
    pub fn active_view_mut(&mut self) -> Option<(DiscovererId, &mut F::View)> {
        let key = self.slot.key()?.clone();
        self.slot.view_mut().map(|view| (key, view))
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    fn recompute(&mut self) {
        let catalog = self.loader.catalog();
        let active = self.selection.resolve(catalog);
        self.slot.sync(active.as_ref(), &mut self.factory);

        self.model = RenderModel {
            options: project_options(catalog, &self.placeholder),
            selected: self.selection.selected().cloned(),
            active,
        };
        debug!(
            options = self.model.options.len(),
            active = ?self.model.active.as_ref().map(|v| v.kind.as_str()),
            "Import screen recomputed"
        );
        self.model_tx.send_replace(self.model.clone());
    }
}
