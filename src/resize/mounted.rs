//! A drag resizer wired to global pointer events and persisted size

use std::cell::RefCell;
use std::rc::Rc;

use super::{Bounds, DragResizer, Edge};
use crate::pointer::{ListenerGuard, PointerEvents, PointerKind};
use crate::storage::SizeStore;

struct Shared {
    resizer: DragResizer,
    store: SizeStore,
    key: String,
}

/// A mounted resizer
///
/// Mounting registers exactly one global move listener and one global up
/// listener. Both are owned by this value and removed when it is dropped,
/// including in the middle of a drag. Edge and bounds updates go through
/// shared state, so the listeners never need to be re-registered.
pub struct MountedResizer {
    shared: Rc<RefCell<Shared>>,
    default_size: i64,
    _listeners: [ListenerGuard; 2],
}

impl std::fmt::Debug for MountedResizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("MountedResizer")
            .field("resizer", &shared.resizer)
            .field("key", &shared.key)
            .field("default_size", &self.default_size)
            .finish()
    }
}

impl MountedResizer {
    pub fn mount(
        resizer: DragResizer,
        events: &PointerEvents,
        store: SizeStore,
        key: impl Into<String>,
        default_size: i64,
    ) -> Self {
        let shared = Rc::new(RefCell::new(Shared {
            resizer,
            store,
            key: key.into(),
        }));

        let on_move = {
            let shared = Rc::clone(&shared);
            events.add_listener(PointerKind::Move, move |point| {
                let shared = shared.borrow();
                if let Some(size) = shared.resizer.pointer_moved(point) {
                    tracing::trace!(size, key = %shared.key, "resize");
                    shared.store.write(&shared.key, size);
                }
            })
        };
        let on_up = {
            let shared = Rc::clone(&shared);
            events.add_listener(PointerKind::Up, move |_| {
                shared.borrow_mut().resizer.end_drag();
            })
        };

        Self {
            shared,
            default_size,
            _listeners: [on_move, on_up],
        }
    }

    /// Pointer pressed on the handle element
    pub fn handle_pressed(&self) {
        self.shared.borrow_mut().resizer.begin_drag();
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.borrow().resizer.is_dragging()
    }

    pub fn edge(&self) -> Edge {
        self.shared.borrow().resizer.edge()
    }

    pub fn set_edge(&self, edge: Edge) {
        self.shared.borrow_mut().resizer.set_edge(edge);
    }

    pub fn bounds(&self) -> Bounds {
        self.shared.borrow().resizer.bounds()
    }

    pub fn set_bounds(&self, bounds: Bounds) {
        self.shared.borrow_mut().resizer.set_bounds(bounds);
    }

    /// Current persisted size, which another instance sharing the key may have written
    pub fn size(&self) -> i64 {
        let shared = self.shared.borrow();
        shared.store.read(&shared.key, self.default_size)
    }

    /// Deregister the listeners; equivalent to dropping
    pub fn unmount(self) {
        tracing::debug!("resizer unmounted");
    }
}
