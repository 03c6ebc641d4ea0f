//! Global pointer event dispatch
//!
//! Stands in for the document-level event target: components register
//! listeners for a pointer event kind and receive every event of that kind,
//! wherever the pointer is. Registration returns a [`ListenerGuard`]; dropping
//! the guard deregisters the listener, so a component that owns its guards
//! cannot leak listeners across mount/unmount cycles.
//!
//! Listeners for one kind run in registration order.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Position in logical page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

impl PointerEvent {
    pub fn kind(&self) -> PointerKind {
        match self {
            PointerEvent::Down(_) => PointerKind::Down,
            PointerEvent::Move(_) => PointerKind::Move,
            PointerEvent::Up(_) => PointerKind::Up,
        }
    }

    pub fn point(&self) -> Point {
        match *self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => p,
        }
    }
}

type Handler = Rc<RefCell<dyn FnMut(Point)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, PointerKind, Handler)>,
}

/// Shared dispatcher for global pointer events
#[derive(Clone, Default)]
pub struct PointerEvents {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for PointerEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl PointerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every event of `kind`
    #[must_use = "dropping the guard deregisters the listener"]
    pub fn add_listener(
        &self,
        kind: PointerKind,
        handler: impl FnMut(Point) + 'static,
    ) -> ListenerGuard {
        let handler: Handler = Rc::new(RefCell::new(handler));
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, kind, handler));
        tracing::trace!(id, ?kind, "pointer listener registered");
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every listener of its kind, returning how many ran
    ///
    /// Listeners removed by an earlier listener during the same dispatch are
    /// skipped.
    pub fn dispatch(&self, event: PointerEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(id, _, handler)| (*id, Rc::clone(handler)))
            .collect();

        let mut invoked = 0;
        for (id, handler) in targets {
            if !self.is_registered(id) {
                continue;
            }
            // A listener that re-enters dispatch does not see its own event
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (&mut *handler)(event.point());
                invoked += 1;
            }
        }
        invoked
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn listener_count_for(&self, kind: PointerKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.registry
            .borrow()
            .listeners
            .iter()
            .any(|(listener, _, _)| *listener == id)
    }
}

/// Keeps a listener registered for as long as it lives
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            // try_borrow_mut: a guard dropped from inside dispatch must not panic
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.listeners.retain(|(id, _, _)| *id != self.id);
                tracing::trace!(id = self.id, "pointer listener removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_reaches_matching_kind_only() {
        let events = PointerEvents::new();
        let moves = Rc::new(Cell::new(0));
        let counter = Rc::clone(&moves);
        let _guard =
            events.add_listener(PointerKind::Move, move |_| counter.set(counter.get() + 1));

        events.dispatch(PointerEvent::Move(Point::new(1.0, 1.0)));
        events.dispatch(PointerEvent::Up(Point::new(1.0, 1.0)));

        assert_eq!(moves.get(), 1);
    }

    #[test]
    fn test_dropping_guard_deregisters() {
        let events = PointerEvents::new();
        let guard = events.add_listener(PointerKind::Up, |_| {});
        assert_eq!(events.listener_count(), 1);
        drop(guard);
        assert_eq!(events.listener_count(), 0);
        assert_eq!(events.dispatch(PointerEvent::Up(Point::default())), 0);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let events = PointerEvents::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        let _a = events.add_listener(PointerKind::Move, move |_| first.borrow_mut().push("a"));
        let _b = events.add_listener(PointerKind::Move, move |_| second.borrow_mut().push("b"));

        events.dispatch(PointerEvent::Move(Point::default()));

        assert_eq!(*order.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_guard_outliving_dispatcher_is_harmless() {
        let events = PointerEvents::new();
        let guard = events.add_listener(PointerKind::Move, |_| {});
        drop(events);
        drop(guard);
    }
}
