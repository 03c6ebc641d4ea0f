//! Resizable panel
//!
//! Puts the panel inside a box whose size along the resize edge's axis comes
//! from the persisted size store, with a drag handle on that edge.

use std::fmt;

use crate::config::PanelConfig;
use crate::panel::{PanelController, PanelFrame};
use crate::pointer::PointerEvents;
use crate::resize::{Bounds, Dimension, DragResizer, Edge, MountedResizer};
use crate::storage::SizeStore;

pub struct ResizablePanel<C> {
    controller: PanelController<C>,
    resizer: MountedResizer,
    min_size: i64,
}

impl<C: fmt::Debug> fmt::Debug for ResizablePanel<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizablePanel")
            .field("controller", &self.controller)
            .field("resizer", &self.resizer)
            .field("min_size", &self.min_size)
            .finish()
    }
}

/// Panel frame plus the box it is laid out in
#[derive(Debug, PartialEq)]
pub struct ResizableFrame<'a, C> {
    pub edge: Edge,
    pub dimension: Dimension,
    /// Presented size: the persisted size, floored at the minimum
    pub size: i64,
    pub dragging: bool,
    pub panel: PanelFrame<'a, C>,
}

impl<C: fmt::Display> fmt::Display for ResizableFrame<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {}px (handle: {}{})",
            self.dimension,
            self.size,
            self.edge,
            if self.dragging { ", dragging" } else { "" }
        )?;
        write!(f, "{}", self.panel)
    }
}

impl<C> ResizablePanel<C> {
    pub fn new(
        config: &PanelConfig,
        controller: PanelController<C>,
        events: &PointerEvents,
        store: SizeStore,
        bounds: Bounds,
    ) -> Self {
        let resizer = MountedResizer::mount(
            DragResizer::new(config.edge, bounds),
            events,
            store,
            config.storage_key.clone(),
            config.default_size,
        );
        Self {
            controller,
            resizer,
            min_size: config.min_size,
        }
    }

    pub fn controller(&self) -> &PanelController<C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PanelController<C> {
        &mut self.controller
    }

    pub fn resizer(&self) -> &MountedResizer {
        &self.resizer
    }

    /// Size the container is laid out at
    pub fn size(&self) -> i64 {
        self.resizer.size().max(self.min_size)
    }

    pub fn frame(&self) -> ResizableFrame<'_, C> {
        let edge = self.resizer.edge();
        ResizableFrame {
            edge,
            dimension: edge.dimension(),
            size: self.size(),
            dragging: self.resizer.is_dragging(),
            panel: self.controller.frame(),
        }
    }

    /// Tear down listeners and the view subscription
    pub fn unmount(self) {
        self.resizer.unmount();
        self.controller.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Location;
    use crate::panel::PanelViewDescriptor;
    use crate::pointer::{Point, PointerEvent};
    use crate::provider::PanelViewRegistry;
    use std::rc::Rc;

    fn panel(events: &PointerEvents, store: SizeStore) -> ResizablePanel<String> {
        let config = PanelConfig::default();
        let registry = PanelViewRegistry::new();
        let controller = PanelController::mount(
            &config,
            Rc::new(registry),
            |view: &PanelViewDescriptor| view.content.clone(),
            Location::parse("/"),
        );
        ResizablePanel::new(
            &config,
            controller,
            events,
            store,
            Bounds::new(0.0, 200.0, 1000.0, 800.0),
        )
    }

    #[test]
    fn test_default_size_and_axis() {
        let events = PointerEvents::new();
        let panel = panel(&events, SizeStore::in_memory());
        let frame = panel.frame();
        assert_eq!(frame.size, 350);
        assert_eq!(frame.dimension, Dimension::Height);
    }

    #[test]
    fn test_presented_size_is_floored() {
        let events = PointerEvents::new();
        let store = SizeStore::in_memory();
        let panel = panel(&events, store.clone());

        panel.resizer().handle_pressed();
        events.dispatch(PointerEvent::Move(Point::new(10.0, 790.0)));

        assert_eq!(store.read("sidebar-width", 0), 10);
        assert_eq!(panel.size(), 96);
    }

    #[test]
    fn test_unmount_releases_listeners() {
        let events = PointerEvents::new();
        let panel = panel(&events, SizeStore::in_memory());
        assert_eq!(events.listener_count(), 2);
        panel.unmount();
        assert_eq!(events.listener_count(), 0);
    }
}
