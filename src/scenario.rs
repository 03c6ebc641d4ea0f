//! Scripted panel sessions
//!
//! A scenario is a YAML document describing the starting location and a list
//! of steps: provider snapshots and failures, navigation, tab clicks and
//! pointer gestures. Replaying it drives a real panel runtime against an
//! in-process registry and in-memory history.
//!
//! ```yaml
//! location: /repo/main.go#L42
//! steps:
//!   - publish:
//!       - { id: refs, title: References, priority: 10, location_provider: refs }
//!       - { id: history, title: History }
//!   - select: 0
//!   - press_handle
//!   - move: { x: 0, y: 300 }
//!   - release
//!   - close
//! ```

use std::rc::Rc;

use serde::Deserialize;

use crate::config::PanelConfig;
use crate::error::ProviderError;
use crate::messages::{Msg, PanelMsg, ResizeMsg};
use crate::navigation::{Location, MemoryHistory, Navigator};
use crate::panel::{PanelController, PanelViewDescriptor};
use crate::pointer::{Point, PointerEvent, PointerEvents};
use crate::provider::PanelViewRegistry;
use crate::resize::{Bounds, Edge};
use crate::runtime::PanelRuntime;
use crate::storage::SizeStore;
use crate::wrapper::{ResizableFrame, ResizablePanel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_location")]
    pub location: String,
    /// Container box in page coordinates
    #[serde(default = "default_bounds")]
    pub bounds: Bounds,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_location() -> String {
    "/".to_string()
}

fn default_bounds() -> Bounds {
    Bounds::new(0.0, 0.0, 1280.0, 800.0)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Provider publishes a new view list for the panel's container
    Publish(Vec<PanelViewDescriptor>),
    /// Provider stream fails with this message
    Fail(String),
    /// Host navigates to a new location
    Navigate(String),
    Select(usize),
    Next,
    Prev,
    Close,
    Retry,
    Container(String),
    PressHandle,
    Move(Point),
    Release,
    Bounds(Bounds),
    Edge(Edge),
}

impl Scenario {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Replay every step, reporting the frame after each one
    ///
    /// Frame index 0 is the state right after mounting. Returns the final
    /// location.
    pub fn replay(
        &self,
        config: &PanelConfig,
        store: SizeStore,
        mut on_frame: impl FnMut(usize, Option<&Step>, &ResizableFrame<'_, String>),
    ) -> String {
        let registry = PanelViewRegistry::new();
        let events = PointerEvents::new();
        let history = MemoryHistory::new(&self.location);

        let controller = PanelController::mount(
            config,
            Rc::new(registry.clone()),
            render_view,
            Location::parse(&self.location),
        );
        let panel = ResizablePanel::new(config, controller, &events, store, self.bounds);
        let mut runtime = PanelRuntime::new(panel, history, events);
        on_frame(0, None, &runtime.frame());

        let mut last_pointer = Point::default();
        for (i, step) in self.steps.iter().enumerate() {
            tracing::debug!(step = i + 1, ?step, "replaying");
            let container = runtime.controller().container().to_string();
            let msg = match step {
                Step::Publish(views) => {
                    registry.publish(&container, views.clone());
                    Msg::Pump
                }
                Step::Fail(message) => {
                    registry.fail(&container, ProviderError::StreamFailed(message.clone()));
                    Msg::Pump
                }
                Step::Navigate(href) => Msg::Navigate(href.clone()),
                Step::Select(index) => Msg::Panel(PanelMsg::SelectTab(*index)),
                Step::Next => Msg::Panel(PanelMsg::NextTab),
                Step::Prev => Msg::Panel(PanelMsg::PrevTab),
                Step::Close => Msg::Panel(PanelMsg::Close),
                Step::Retry => Msg::Panel(PanelMsg::Retry),
                Step::Container(tag) => Msg::Panel(PanelMsg::SetContainer(tag.clone())),
                Step::PressHandle => Msg::Resize(ResizeMsg::HandlePressed),
                Step::Move(point) => {
                    last_pointer = *point;
                    Msg::Resize(ResizeMsg::Pointer(PointerEvent::Move(*point)))
                }
                Step::Release => Msg::Resize(ResizeMsg::Pointer(PointerEvent::Up(last_pointer))),
                Step::Bounds(bounds) => Msg::Resize(ResizeMsg::BoundsChanged(*bounds)),
                Step::Edge(edge) => Msg::Resize(ResizeMsg::EdgeChanged(*edge)),
            };
            runtime.dispatch(msg);
            // Provider deliveries land on the next turn of the loop
            runtime.dispatch(Msg::Pump);
            on_frame(i + 1, Some(step), &runtime.frame());
        }

        let location = runtime.navigator().location().href();
        runtime.shutdown();
        location
    }
}

fn render_view(view: &PanelViewDescriptor) -> String {
    if view.content.is_empty() {
        format!("<{}>", view.title)
    } else {
        view.content.clone()
    }
}
