//! dockpanel - headless tabbed panel
//!
//! This crate provides the state machines behind a resizable, tabbed panel
//! implementing the Elm Architecture pattern: contributed panel views become
//! tabs, the active tab lives in the location fragment, and the panel's size
//! is dragged along one edge and persisted.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod messages;
pub mod navigation;
pub mod panel;
pub mod pointer;
pub mod provider;
pub mod resize;
pub mod runtime;
pub mod scenario;
pub mod storage;
pub mod tracing;
pub mod wrapper;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PanelConfig;
pub use messages::{Msg, PanelMsg, ResizeMsg};
pub use panel::{PanelController, PanelState, PanelViewDescriptor};
pub use runtime::PanelRuntime;
pub use storage::SizeStore;
pub use wrapper::ResizablePanel;
