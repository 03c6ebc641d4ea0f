//! Event loop glue
//!
//! Routes messages to the panel and performs the commands it returns against
//! the navigator. Location replacements are fed straight back to the panel as
//! `LocationChanged`, closing the tab selection round trip.

use crate::commands::Cmd;
use crate::messages::{Msg, PanelMsg, ResizeMsg};
use crate::navigation::Navigator;
use crate::panel::PanelController;
use crate::pointer::PointerEvents;
use crate::wrapper::{ResizableFrame, ResizablePanel};

pub struct PanelRuntime<C, N> {
    panel: ResizablePanel<C>,
    navigator: N,
    events: PointerEvents,
    redraws: usize,
}

impl<C, N: Navigator> PanelRuntime<C, N> {
    /// `events` must be the dispatcher the panel's resizer was mounted on
    pub fn new(panel: ResizablePanel<C>, navigator: N, events: PointerEvents) -> Self {
        let mut runtime = Self {
            panel,
            navigator,
            events,
            redraws: 0,
        };
        let location = runtime.navigator.location();
        runtime.dispatch(Msg::Panel(PanelMsg::LocationChanged(location)));
        runtime.dispatch(Msg::Pump);
        runtime
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let cmd = self.update(msg);
        if let Some(cmd) = cmd {
            self.execute(cmd);
        }
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        match msg {
            Msg::Panel(msg) => self.panel.controller_mut().update(msg),
            Msg::Pump => self.panel.controller_mut().pump(),
            Msg::Navigate(href) => {
                self.navigator.push(&href);
                let location = self.navigator.location();
                self.panel
                    .controller_mut()
                    .update(PanelMsg::LocationChanged(location))
            }
            Msg::Resize(ResizeMsg::HandlePressed) => {
                self.panel.resizer().handle_pressed();
                Some(Cmd::Redraw)
            }
            Msg::Resize(ResizeMsg::Pointer(event)) => {
                let was_dragging = self.panel.resizer().is_dragging();
                self.events.dispatch(event);
                was_dragging.then_some(Cmd::Redraw)
            }
            Msg::Resize(ResizeMsg::BoundsChanged(bounds)) => {
                self.panel.resizer().set_bounds(bounds);
                Some(Cmd::Redraw)
            }
            Msg::Resize(ResizeMsg::EdgeChanged(edge)) => {
                if self.panel.resizer().edge() == edge {
                    return None;
                }
                tracing::debug!(%edge, "resize edge changed");
                self.panel.resizer().set_edge(edge);
                Some(Cmd::Redraw)
            }
        }
    }

    fn execute(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraws += 1,
            Cmd::ReplaceLocation(href) => {
                tracing::debug!(%href, "replacing location");
                self.navigator.replace(&href);
                let location = self.navigator.location();
                self.dispatch(Msg::Panel(PanelMsg::LocationChanged(location)));
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
        }
    }

    pub fn panel(&self) -> &ResizablePanel<C> {
        &self.panel
    }

    pub fn controller(&self) -> &PanelController<C> {
        self.panel.controller()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn events(&self) -> &PointerEvents {
        &self.events
    }

    /// Number of redraws requested so far
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    pub fn frame(&self) -> ResizableFrame<'_, C> {
        self.panel.frame()
    }

    /// Unmount the panel, handing back the navigator
    pub fn shutdown(self) -> N {
        self.panel.unmount();
        self.navigator
    }
}
