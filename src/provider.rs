//! Panel view descriptor provider
//!
//! Contributions (extensions, built-in features) publish panel views into a
//! named container. Consumers subscribe to a container and receive a snapshot
//! of its full view list every time it changes, starting with the current list
//! if one has been published. The stream is unbounded and cannot be restarted;
//! after a failure the consumer must subscribe again.
//!
//! Each subscription carries a [`CancellationToken`]. Dropping the
//! [`Subscription`] cancels it exactly once; providers stop delivering to
//! cancelled sinks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{SendError, Sender};
use std::sync::Arc;

use crate::error::ProviderError;
use crate::panel::PanelViewDescriptor;

/// Item delivered on a subscription
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    Snapshot(Vec<PanelViewDescriptor>),
    Failed(ProviderError),
}

/// Shared cancelled flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Provider-side end of a subscription
#[derive(Debug, Clone)]
pub struct SnapshotSink {
    tx: Sender<ProviderEvent>,
    token: CancellationToken,
}

impl SnapshotSink {
    pub fn new(tx: Sender<ProviderEvent>, token: CancellationToken) -> Self {
        Self { tx, token }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Deliver an event; returns false once the subscriber is gone
    pub fn send(&self, event: ProviderEvent) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        match self.tx.send(event) {
            Ok(()) => true,
            Err(SendError(_)) => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Consumer-side handle; cancels on drop
pub struct Subscription {
    token: CancellationToken,
    teardown: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

impl Subscription {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            teardown: None,
        }
    }

    /// Run `teardown` when the subscription is cancelled
    pub fn with_teardown(mut self, teardown: impl FnOnce() + 'static) -> Self {
        self.teardown = Some(Box::new(teardown));
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    fn cancel(&mut self) {
        self.token.cancel();
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Source of panel view snapshots for a container
pub trait PanelViewProvider {
    fn subscribe(&self, container: &str, sink: SnapshotSink)
        -> Result<Subscription, ProviderError>;
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    views: HashMap<String, Vec<PanelViewDescriptor>>,
    sinks: Vec<(u64, String, SnapshotSink)>,
}

/// In-process contribution registry
///
/// Clones share the same registry.
#[derive(Clone, Default)]
pub struct PanelViewRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl std::fmt::Debug for PanelViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PanelViewRegistry")
            .field("containers", &inner.views.keys().collect::<Vec<_>>())
            .field("subscribers", &inner.sinks.len())
            .finish()
    }
}

impl PanelViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the view list of `container` and notify its subscribers
    pub fn publish(&self, container: &str, views: Vec<PanelViewDescriptor>) {
        let mut inner = self.inner.borrow_mut();
        tracing::debug!(container, count = views.len(), "publishing panel views");
        inner.views.insert(container.to_string(), views.clone());
        inner.sinks.retain(|(_, tag, sink)| {
            tag != container || sink.send(ProviderEvent::Snapshot(views.clone()))
        });
    }

    /// Terminate every live stream for `container` with `error`
    pub fn fail(&self, container: &str, error: ProviderError) {
        let mut inner = self.inner.borrow_mut();
        tracing::debug!(container, %error, "failing panel view streams");
        inner.sinks.retain(|(_, tag, sink)| {
            if tag == container {
                sink.send(ProviderEvent::Failed(error.clone()));
                false
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self, container: &str) -> usize {
        self.inner
            .borrow()
            .sinks
            .iter()
            .filter(|(_, tag, sink)| tag == container && !sink.is_closed())
            .count()
    }
}

impl PanelViewProvider for PanelViewRegistry {
    fn subscribe(
        &self,
        container: &str,
        sink: SnapshotSink,
    ) -> Result<Subscription, ProviderError> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;

        if let Some(views) = inner.views.get(container) {
            sink.send(ProviderEvent::Snapshot(views.clone()));
        }
        let token = sink.token().clone();
        inner.sinks.push((id, container.to_string(), sink));

        let registry: Weak<RefCell<RegistryInner>> = Rc::downgrade(&self.inner);
        Ok(Subscription::new(token).with_teardown(move || {
            if let Some(inner) = registry.upgrade() {
                if let Ok(mut inner) = inner.try_borrow_mut() {
                    inner.sinks.retain(|(sink_id, _, _)| *sink_id != id);
                }
            }
        }))
    }
}
