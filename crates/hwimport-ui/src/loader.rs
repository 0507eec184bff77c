//! One-shot catalog loading
//!
//! The fetch runs on the tokio runtime and parks its result in a shared slot;
//! the UI loop drains the slot with [`CatalogLoader::poll`] once per frame.
//! Every fetch is stamped with the loader's generation. Tearing the loader
//! down bumps the generation, so a fetch that completes afterwards finds a
//! mismatched stamp and its result is dropped.

use hwimport_core::Discoverer;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

use crate::source::{CatalogSource, FetchError};

type FetchResult = Result<Vec<Discoverer>, FetchError>;

/// Where the loader is in its single fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch issued yet
    Idle,
    /// Fetch in flight
    Loading,
    /// Catalog replaced by the fetch result
    Loaded,
    /// Fetch failed, catalog left empty
    Failed,
    /// Torn down before the fetch finished
    Cancelled,
}

#[derive(Default)]
struct PendingSlot {
    generation: u64,
    result: Option<FetchResult>,
}

/// Handle a fetch task uses to hand its result back to the loader
pub struct FetchCompletion {
    generation: u64,
    slot: Arc<Mutex<PendingSlot>>,
}

impl FetchCompletion {
    /// Deliver the fetch result; returns false when the loader has moved on
    pub fn deliver(self, result: FetchResult) -> bool {
        let Ok(mut slot) = self.slot.lock() else {
            warn!("Catalog slot poisoned, dropping fetch result");
            return false;
        };
        if slot.generation != self.generation {
            debug!(
                issued = self.generation,
                current = slot.generation,
                "Dropping catalog fetch result for torn-down loader"
            );
            return false;
        }
        slot.result = Some(result);
        true
    }
}

/// Loads the discoverer catalog exactly once
pub struct CatalogLoader {
    catalog: Vec<Discoverer>,
    state: LoadState,
    generation: u64,
    torn_down: bool,
    slot: Arc<Mutex<PendingSlot>>,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            state: LoadState::Idle,
            generation: 0,
            torn_down: false,
            slot: Arc::new(Mutex::new(PendingSlot::default())),
        }
    }

    /// Current catalog; empty until a fetch succeeds
    pub fn catalog(&self) -> &[Discoverer] {
        &self.catalog
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Issue the fetch and hand back the completion handle
    ///
    /// Returns `None` if a fetch was already issued or the loader is torn down.
    pub fn begin(&mut self) -> Option<FetchCompletion> {
        if self.torn_down {
            debug!("Catalog loader torn down, not fetching");
            return None;
        }
        if self.state != LoadState::Idle {
            debug!(state = ?self.state, "Catalog fetch already issued");
            return None;
        }
        self.state = LoadState::Loading;
        Some(FetchCompletion {
            generation: self.generation,
            slot: self.slot.clone(),
        })
    }

    /// Spawn the fetch against `source` on the current tokio runtime
    pub fn start<S: CatalogSource>(&mut self, source: Arc<S>) -> bool {
        let Some(completion) = self.begin() else {
            return false;
        };
        tokio::spawn(async move {
            let result = source.list_discoverers().await;
            completion.deliver(result);
        });
        true
    }

    /// Apply a delivered result; returns true when the catalog state changed
    pub fn poll(&mut self) -> bool {
        if self.state != LoadState::Loading {
            return false;
        }
        let result = match self.slot.lock() {
            Ok(mut slot) => slot.result.take(),
            Err(_) => {
                error!("Catalog slot poisoned");
                Some(Err(FetchError::Transport("result slot poisoned".to_string())))
            }
        };
        match result {
            None => false,
            Some(Ok(discoverers)) => {
                info!(count = discoverers.len(), "Discoverer catalog loaded");
                self.catalog = discoverers;
                self.state = LoadState::Loaded;
                true
            }
            Some(Err(e)) => {
                error!(error = %e, "Failed to load discoverer catalog");
                self.catalog.clear();
                self.state = LoadState::Failed;
                true
            }
        }
    }

    /// Stop accepting results; any fetch still in flight becomes a no-op
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.generation += 1;
        if self.state == LoadState::Loading {
            self.state = LoadState::Cancelled;
        }
        if let Ok(mut slot) = self.slot.lock() {
            slot.generation = self.generation;
            slot.result = None;
        }
        debug!(generation = self.generation, state = ?self.state, "Catalog loader torn down");
    }
}

impl Drop for CatalogLoader {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwimport_core::DiscovererKind;
    use std::future::Future;
    use tokio::sync::Notify;

    fn router() -> Discoverer {
        Discoverer::new("a", "Router", DiscovererKind::ScanDevices)
    }

    struct FixedSource(FetchResult);

    impl CatalogSource for FixedSource {
        fn list_discoverers(&self) -> impl Future<Output = FetchResult> + Send {
            let result = self.0.clone();
            async move { result }
        }
    }

    /// Holds the fetch open until released
    struct GatedSource {
        gate: Arc<Notify>,
    }

    impl CatalogSource for GatedSource {
        async fn list_discoverers(&self) -> FetchResult {
            self.gate.notified().await;
            Ok(vec![router()])
        }
    }

    async fn poll_until_settled(loader: &mut CatalogLoader) {
        for _ in 0..100 {
            if loader.poll() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("catalog fetch never completed");
    }

    #[test]
    fn test_begin_only_once() {
        let mut loader = CatalogLoader::new();
        assert_eq!(loader.state(), LoadState::Idle);
        assert!(loader.begin().is_some());
        assert_eq!(loader.state(), LoadState::Loading);
        assert!(loader.begin().is_none());
    }

    #[test]
    fn test_success_replaces_catalog() {
        let mut loader = CatalogLoader::new();
        let completion = loader.begin().unwrap();
        assert!(!loader.poll());

        assert!(completion.deliver(Ok(vec![router()])));
        assert!(loader.poll());
        assert_eq!(loader.state(), LoadState::Loaded);
        assert_eq!(loader.catalog().len(), 1);
        assert!(!loader.poll());
    }

    #[test]
    fn test_failure_leaves_catalog_empty() {
        let mut loader = CatalogLoader::new();
        let completion = loader.begin().unwrap();
        completion.deliver(Err(FetchError::Status(503)));

        assert!(loader.poll());
        assert_eq!(loader.state(), LoadState::Failed);
        assert!(loader.catalog().is_empty());
    }

    #[test]
    fn test_delivery_after_teardown_is_dropped() {
        let mut loader = CatalogLoader::new();
        let completion = loader.begin().unwrap();
        loader.teardown();
        assert_eq!(loader.state(), LoadState::Cancelled);

        assert!(!completion.deliver(Ok(vec![router()])));
        assert!(!loader.poll());
        assert_eq!(loader.state(), LoadState::Cancelled);
        assert!(loader.catalog().is_empty());
        assert!(loader.begin().is_none());
    }

    #[test]
    fn test_teardown_keeps_settled_state() {
        let mut idle = CatalogLoader::new();
        idle.teardown();
        assert_eq!(idle.state(), LoadState::Idle);
        assert!(idle.begin().is_none());

        let mut loaded = CatalogLoader::new();
        loaded.begin().unwrap().deliver(Ok(vec![router()]));
        assert!(loaded.poll());
        loaded.teardown();
        assert_eq!(loaded.state(), LoadState::Loaded);
        assert_eq!(loaded.catalog().len(), 1);
    }

    #[test]
    fn test_delivery_after_drop_is_dropped() {
        let mut loader = CatalogLoader::new();
        let completion = loader.begin().unwrap();
        drop(loader);
        assert!(!completion.deliver(Ok(vec![router()])));
    }

    #[tokio::test]
    async fn test_start_spawns_fetch() {
        let mut loader = CatalogLoader::new();
        assert!(loader.start(Arc::new(FixedSource(Ok(vec![router()])))));
        assert!(!loader.start(Arc::new(FixedSource(Ok(Vec::new())))));

        poll_until_settled(&mut loader).await;
        assert_eq!(loader.state(), LoadState::Loaded);
        assert_eq!(loader.catalog()[0].name, "Router");
    }

    #[tokio::test]
    async fn test_start_failure_is_contained() {
        let mut loader = CatalogLoader::new();
        loader.start(Arc::new(FixedSource(Err(FetchError::Transport(
            "connection refused".to_string(),
        )))));

        poll_until_settled(&mut loader).await;
        assert_eq!(loader.state(), LoadState::Failed);
        assert!(loader.catalog().is_empty());
    }

    #[tokio::test]
    async fn test_in_flight_fetch_after_teardown() {
        let gate = Arc::new(Notify::new());
        let mut loader = CatalogLoader::new();
        loader.start(Arc::new(GatedSource { gate: gate.clone() }));

        loader.teardown();
        gate.notify_one();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(!loader.poll());
        assert_eq!(loader.state(), LoadState::Cancelled);
        assert!(loader.catalog().is_empty());
    }
}
