//! Tabbed panel
//!
//! Contributions publish panel views into a container; the panel shows one
//! tab per view, ordered by priority, and keeps the active tab in the location
//! fragment so it survives reloads and can be linked to.
//!
//! ## Architecture
//!
//! - `PanelViewDescriptor`: a contributed view (external, read-only)
//! - `PanelItem`: tab built from a descriptor for one snapshot
//! - `TabsContainer`: indexed tab strip with at most one active entry
//! - `fragment`: encoding of the active view id in the location fragment
//! - `PanelController`: subscription, items and active tab state machine
//! - `PanelFrame`: what a renderer draws

mod controller;
mod descriptor;
pub mod fragment;
mod frame;
mod tabs;

pub use controller::{PanelController, PanelState};
pub use descriptor::{build_items, PanelItem, PanelViewDescriptor};
pub use frame::{ActiveViewScope, FrameBody, PanelFrame};
pub use tabs::{TabEntry, TabHeader, TabsContainer};
