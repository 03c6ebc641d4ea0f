//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::error::ProviderError;
use crate::navigation::Location;
use crate::panel::PanelViewDescriptor;
use crate::pointer::PointerEvent;
use crate::resize::{Bounds, Edge};

/// Panel controller messages
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMsg {
    /// The provider delivered a new snapshot (possibly empty)
    ViewsUpdated(Vec<PanelViewDescriptor>),
    /// The provider stream terminated abnormally
    ProviderFailed(ProviderError),
    /// The current location changed (including our own replacements)
    LocationChanged(Location),
    /// Tab header at this index was clicked
    SelectTab(usize),
    /// Keyboard: activate the next tab, wrapping
    NextTab,
    /// Keyboard: activate the previous tab, wrapping
    PrevTab,
    /// Close button: drop the fragment
    Close,
    /// Show the views of a different container
    SetContainer(String),
    /// Resubscribe after the retry budget ran out
    Retry,
}

/// Resize handle and pointer messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeMsg {
    /// Pointer pressed on the resize handle
    HandlePressed,
    /// Global pointer event
    Pointer(PointerEvent),
    /// Layout moved or resized the container
    BoundsChanged(Bounds),
    /// The panel was docked against a different edge
    EdgeChanged(Edge),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Panel(PanelMsg),
    Resize(ResizeMsg),
    /// Navigation from outside the panel (link click, address bar)
    Navigate(String),
    /// Drain pending provider events
    Pump,
}
