//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use dockpanel::config::PanelConfig;
use dockpanel::error::{ProviderError, StorageError};
use dockpanel::navigation::{Location, MemoryHistory};
use dockpanel::panel::{PanelController, PanelViewDescriptor};
use dockpanel::pointer::PointerEvents;
use dockpanel::provider::{PanelViewProvider, PanelViewRegistry, SnapshotSink, Subscription};
use dockpanel::resize::Bounds;
use dockpanel::runtime::PanelRuntime;
use dockpanel::storage::{KeyValueStore, MemoryStore, SizeStore};
use dockpanel::wrapper::ResizablePanel;

pub type TestRuntime = PanelRuntime<String, MemoryHistory>;

/// Container box used by most tests: 1000x600 starting at (0, 200)
pub fn test_bounds() -> Bounds {
    Bounds::new(0.0, 200.0, 1000.0, 800.0)
}

/// Three views, deliberately published out of priority order
pub fn sample_views() -> Vec<PanelViewDescriptor> {
    vec![
        PanelViewDescriptor::new("history", "History", 0).with_content("3 commits"),
        PanelViewDescriptor::new("refs", "References", 10)
            .with_content("12 references")
            .with_location_provider("references"),
        PanelViewDescriptor::new("defs", "Definitions", 20).with_content("1 definition"),
    ]
}

/// A mounted runtime over a fresh registry, history and pointer dispatcher
pub fn test_runtime(
    config: &PanelConfig,
    registry: &PanelViewRegistry,
    store: SizeStore,
    href: &str,
) -> TestRuntime {
    test_runtime_with(config, Rc::new(registry.clone()), store, href)
}

/// Like [`test_runtime`], over any provider
pub fn test_runtime_with(
    config: &PanelConfig,
    provider: Rc<dyn PanelViewProvider>,
    store: SizeStore,
    href: &str,
) -> TestRuntime {
    let events = PointerEvents::new();
    let controller = PanelController::mount(
        config,
        provider,
        |view: &PanelViewDescriptor| view.content.clone(),
        Location::parse(href),
    );
    let panel = ResizablePanel::new(config, controller, &events, store, test_bounds());
    PanelRuntime::new(panel, MemoryHistory::new(href), events)
}

/// Memory store that counts successful writes
#[derive(Debug, Clone, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    pub writes: Rc<Cell<usize>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.set(self.writes.get() + 1);
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

/// Store whose writes fail once `full` is set, like a browser over quota
#[derive(Debug, Clone, Default)]
pub struct QuotaStore {
    inner: MemoryStore,
    pub full: Rc<Cell<bool>>,
}

impl KeyValueStore for QuotaStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.full.get() {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

/// Provider whose `subscribe` fails while `failures_left` is non-zero, then
/// hands over to the registry
#[derive(Debug, Clone)]
pub struct FlakyProvider {
    registry: PanelViewRegistry,
    pub failures_left: Rc<Cell<u32>>,
    pub calls: Rc<Cell<u32>>,
}

impl FlakyProvider {
    pub fn new(registry: &PanelViewRegistry, failures: u32) -> Self {
        Self {
            registry: registry.clone(),
            failures_left: Rc::new(Cell::new(failures)),
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl PanelViewProvider for FlakyProvider {
    fn subscribe(
        &self,
        container: &str,
        sink: SnapshotSink,
    ) -> Result<Subscription, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        if self.failures_left.get() > 0 {
            self.failures_left.set(self.failures_left.get() - 1);
            return Err(ProviderError::SubscribeFailed("host not ready".to_string()));
        }
        self.registry.subscribe(container, sink)
    }
}
