//! Panel controller
//!
//! Owns the subscription to a container's panel views, the tab items built
//! from each snapshot, and the active tab derived from the location fragment.
//!
//! ```text
//! Empty ──snapshot──▶ Populated ──snapshot──▶ Populated
//!   │                     │
//!   └───stream error──────┴──▶ Failed ──resubscribe + snapshot──▶ Populated
//! ```
//!
//! `Empty` means no snapshot has arrived yet; an empty snapshot still moves
//! the panel to `Populated`. A failed subscribe also lands in `Failed`, and
//! the panel keeps showing the failure until the next snapshot arrives, even
//! once a resubscribe has gone through. Selecting a tab never sets the active index
//! directly: it asks for a location replacement, and the active tab follows
//! once the new location comes back through [`PanelMsg::LocationChanged`].

use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use super::descriptor::{build_items, PanelItem, PanelViewDescriptor};
use super::fragment;
use super::frame::{ActiveViewScope, FrameBody, PanelFrame};
use super::tabs::TabsContainer;
use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::error::ProviderError;
use crate::messages::PanelMsg;
use crate::navigation::Location;
use crate::provider::{
    CancellationToken, PanelViewProvider, ProviderEvent, SnapshotSink, Subscription,
};

/// Lifecycle of the panel content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    /// Subscribed, nothing delivered yet
    Empty,
    /// At least one snapshot delivered
    Populated,
    /// The stream or the subscribe call failed
    ///
    /// Held until a snapshot arrives on a fresh subscription.
    Failed(ProviderError),
}

struct LiveSubscription {
    rx: Receiver<ProviderEvent>,
    _subscription: Subscription,
}

type Render<C> = Box<dyn Fn(&PanelViewDescriptor) -> C>;

pub struct PanelController<C> {
    provider: Rc<dyn PanelViewProvider>,
    render: Render<C>,
    container: String,
    subscription: Option<LiveSubscription>,
    state: PanelState,
    tabs: TabsContainer<PanelItem<C>>,
    location: Location,
    max_resubscribe_attempts: u32,
    resubscribe_attempts: u32,
}

impl<C: std::fmt::Debug> std::fmt::Debug for PanelController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelController")
            .field("container", &self.container)
            .field("state", &self.state)
            .field("tabs", &self.tabs)
            .field("location", &self.location)
            .field("subscribed", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

impl<C> PanelController<C> {
    /// Subscribe to the configured container
    ///
    /// `render` builds the content for each view every time a snapshot
    /// arrives. Provider events are applied by [`PanelController::pump`].
    pub fn mount(
        config: &PanelConfig,
        provider: Rc<dyn PanelViewProvider>,
        render: impl Fn(&PanelViewDescriptor) -> C + 'static,
        location: Location,
    ) -> Self {
        let mut controller = Self {
            provider,
            render: Box::new(render),
            container: config.container.clone(),
            subscription: None,
            state: PanelState::Empty,
            tabs: TabsContainer::default(),
            location,
            max_resubscribe_attempts: config.max_resubscribe_attempts,
            resubscribe_attempts: 0,
        };
        controller.subscribe();
        controller
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Items in display order
    pub fn items(&self) -> &[PanelItem<C>] {
        self.tabs.entries()
    }

    pub fn tabs(&self) -> &TabsContainer<PanelItem<C>> {
        &self.tabs
    }

    pub fn active_index(&self) -> Option<usize> {
        self.tabs.active_index()
    }

    pub fn active_item(&self) -> Option<&PanelItem<C>> {
        self.tabs.active()
    }

    /// Scope handed to the panel toolbar for the active view
    pub fn toolbar_scope(&self) -> Option<ActiveViewScope<'_>> {
        self.tabs.active().map(|item| ActiveViewScope {
            id: &item.id,
            has_locations: item.has_locations,
        })
    }

    pub fn frame(&self) -> PanelFrame<'_, C> {
        let body = match &self.state {
            PanelState::Empty => FrameBody::Empty,
            PanelState::Failed(error) => FrameBody::Failed(error),
            PanelState::Populated => FrameBody::Tabs {
                headers: self.tabs.headers(),
                content: self.tabs.active().map(|item| &item.content),
            },
        };
        PanelFrame {
            body,
            toolbar: self.toolbar_scope(),
        }
    }

    /// Apply every provider event delivered since the last pump
    ///
    /// Also retries a subscription that could not be re-established last time.
    pub fn pump(&mut self) -> Option<Cmd> {
        if self.subscription.is_none()
            && matches!(self.state, PanelState::Failed(_))
            && self.resubscribe_attempts < self.max_resubscribe_attempts
        {
            self.try_resubscribe();
        }

        let mut cmds = Vec::new();
        for event in self.drain() {
            let msg = match event {
                ProviderEvent::Snapshot(views) => PanelMsg::ViewsUpdated(views),
                ProviderEvent::Failed(error) => PanelMsg::ProviderFailed(error),
            };
            let failed = matches!(msg, PanelMsg::ProviderFailed(_));
            if let Some(cmd) = self.update(msg) {
                cmds.push(cmd);
            }
            // Anything after a failure belongs to the dead stream
            if failed {
                break;
            }
        }

        match Cmd::batch(cmds) {
            Cmd::None => None,
            cmd => Some(cmd),
        }
    }

    pub fn update(&mut self, msg: PanelMsg) -> Option<Cmd> {
        match msg {
            PanelMsg::ViewsUpdated(views) => {
                let items = build_items(&views, &*self.render);
                tracing::debug!(
                    container = %self.container,
                    count = items.len(),
                    "panel views updated"
                );
                self.tabs.set_entries(items);
                self.state = PanelState::Populated;
                self.resubscribe_attempts = 0;
                self.sync_active_tab();
                Some(Cmd::Redraw)
            }

            PanelMsg::ProviderFailed(error) => {
                tracing::warn!(container = %self.container, %error, "panel view stream failed");
                self.subscription = None;
                self.tabs.set_entries(Vec::new());
                self.state = PanelState::Failed(error);
                self.try_resubscribe();
                Some(Cmd::Redraw)
            }

            PanelMsg::LocationChanged(location) => {
                if location == self.location {
                    return None;
                }
                self.location = location;
                let before = self.tabs.active_index();
                self.sync_active_tab();
                (self.tabs.active_index() != before).then_some(Cmd::Redraw)
            }

            PanelMsg::SelectTab(index) => {
                let index = self.tabs.select(index)?;
                Some(self.replace_with_active(index))
            }

            PanelMsg::NextTab => {
                let index = self.tabs.next_index()?;
                Some(self.replace_with_active(index))
            }

            PanelMsg::PrevTab => {
                let index = self.tabs.prev_index()?;
                Some(self.replace_with_active(index))
            }

            PanelMsg::Close => Some(Cmd::ReplaceLocation(self.location.pathname.clone())),

            PanelMsg::SetContainer(container) => {
                if container == self.container {
                    return None;
                }
                tracing::debug!(from = %self.container, to = %container, "panel container changed");
                self.container = container;
                self.tabs.set_entries(Vec::new());
                self.state = PanelState::Empty;
                self.resubscribe_attempts = 0;
                self.subscribe();
                Some(Cmd::Redraw)
            }

            PanelMsg::Retry => {
                if self.subscription.is_some() {
                    return None;
                }
                tracing::info!(container = %self.container, "retrying panel view subscription");
                self.resubscribe_attempts = 0;
                self.subscribe();
                Some(Cmd::Redraw)
            }
        }
    }

    /// Drop the subscription; equivalent to dropping the controller
    pub fn unmount(mut self) {
        self.subscription = None;
        tracing::debug!(container = %self.container, "panel unmounted");
    }

    fn replace_with_active(&self, index: usize) -> Cmd {
        let id = &self.tabs.entries()[index].id;
        let location = Location::new(
            self.location.pathname.clone(),
            fragment::with_active_id(&self.location.fragment, id),
        );
        Cmd::ReplaceLocation(location.href())
    }

    fn sync_active_tab(&mut self) {
        let index =
            fragment::active_id(&self.location.fragment).and_then(|id| self.tabs.position(id));
        if index != self.tabs.active_index() {
            tracing::debug!(?index, fragment = %self.location.fragment, "active panel tab changed");
        }
        self.tabs.set_active(index);
    }

    fn drain(&mut self) -> Vec<ProviderEvent> {
        let Some(live) = &self.subscription else {
            return Vec::new();
        };
        let mut events = Vec::new();
        loop {
            match live.rx.try_recv() {
                Ok(event) => {
                    let failed = matches!(event, ProviderEvent::Failed(_));
                    events.push(event);
                    if failed {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    events.push(ProviderEvent::Failed(ProviderError::Disconnected));
                    break;
                }
            }
        }
        events
    }

    /// Replace any current subscription with a fresh one for `self.container`
    fn subscribe(&mut self) {
        // Tear down before subscribing so the provider never sees two live sinks
        self.subscription = None;

        let (tx, rx) = mpsc::channel();
        let sink = SnapshotSink::new(tx, CancellationToken::new());
        match self.provider.subscribe(&self.container, sink) {
            Ok(subscription) => {
                tracing::debug!(container = %self.container, "subscribed to panel views");
                self.subscription = Some(LiveSubscription {
                    rx,
                    _subscription: subscription,
                });
            }
            Err(error) => {
                tracing::warn!(
                    container = %self.container,
                    %error,
                    "panel view subscription failed"
                );
                self.state = PanelState::Failed(error);
            }
        }
    }

    fn try_resubscribe(&mut self) {
        if self.resubscribe_attempts >= self.max_resubscribe_attempts {
            tracing::warn!(
                container = %self.container,
                attempts = self.resubscribe_attempts,
                "giving up on panel view stream"
            );
            return;
        }
        self.resubscribe_attempts += 1;
        tracing::info!(
            container = %self.container,
            attempt = self.resubscribe_attempts,
            "resubscribing to panel views"
        );
        self.subscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::PanelViewRegistry;

    fn mount(registry: &PanelViewRegistry, href: &str) -> PanelController<String> {
        PanelController::mount(
            &PanelConfig::default(),
            Rc::new(registry.clone()),
            |view: &PanelViewDescriptor| view.title.to_uppercase(),
            Location::parse(href),
        )
    }

    fn views() -> Vec<PanelViewDescriptor> {
        vec![
            PanelViewDescriptor::new("history", "History", 0),
            PanelViewDescriptor::new("refs", "References", 10).with_location_provider("refs"),
            PanelViewDescriptor::new("defs", "Definitions", 20),
        ]
    }

    #[test]
    fn test_empty_until_first_snapshot() {
        let registry = PanelViewRegistry::new();
        let mut panel = mount(&registry, "/f#L1");
        assert_eq!(panel.pump(), None);
        assert_eq!(panel.state(), &PanelState::Empty);
        assert!(matches!(panel.frame().body, FrameBody::Empty));

        registry.publish("panel", Vec::new());
        assert_eq!(panel.pump(), Some(Cmd::Redraw));
        assert_eq!(panel.state(), &PanelState::Populated);
        assert!(panel.items().is_empty());
    }

    #[test]
    fn test_active_tab_follows_fragment() {
        let registry = PanelViewRegistry::new();
        registry.publish("panel", views());
        let mut panel = mount(&registry, "/f#L1=refs");
        panel.pump();

        assert_eq!(panel.active_index(), Some(1));
        assert_eq!(panel.active_item().map(|i| i.content.as_str()), Some("REFERENCES"));

        panel.update(PanelMsg::LocationChanged(Location::parse("/f#L1=defs")));
        assert_eq!(panel.active_index(), Some(0));

        panel.update(PanelMsg::LocationChanged(Location::parse("/f#L1")));
        assert_eq!(panel.active_index(), None);
        assert_eq!(panel.items().len(), 3);
    }

    #[test]
    fn test_active_tab_recomputed_when_items_change() {
        let registry = PanelViewRegistry::new();
        let mut panel = mount(&registry, "/f#=history");
        registry.publish("panel", vec![PanelViewDescriptor::new("refs", "References", 0)]);
        panel.pump();
        assert_eq!(panel.active_index(), None);

        registry.publish("panel", views());
        panel.pump();
        assert_eq!(panel.active_index(), Some(2));
    }

    #[test]
    fn test_select_replaces_fragment_value() {
        let registry = PanelViewRegistry::new();
        registry.publish("panel", views());
        let mut panel = mount(&registry, "/repo/file.go#L42=history");
        panel.pump();

        assert_eq!(
            panel.update(PanelMsg::SelectTab(1)),
            Some(Cmd::ReplaceLocation("/repo/file.go#L42=refs".into()))
        );
        assert_eq!(panel.update(PanelMsg::SelectTab(3)), None);
        // Active tab only moves once the location comes back
        assert_eq!(panel.active_index(), Some(2));
    }

    #[test]
    fn test_close_drops_fragment() {
        let registry = PanelViewRegistry::new();
        let mut panel = mount(&registry, "/repo/file.go#L42=refs=x");
        assert_eq!(
            panel.update(PanelMsg::Close),
            Some(Cmd::ReplaceLocation("/repo/file.go".into()))
        );
    }

    #[test]
    fn test_toolbar_scope_reports_locations() {
        let registry = PanelViewRegistry::new();
        registry.publish("panel", views());
        let mut panel = mount(&registry, "/f#L1=refs");
        panel.pump();
        let scope = panel.toolbar_scope().unwrap();
        assert_eq!(scope.id, "refs");
        assert!(scope.has_locations);

        panel.update(PanelMsg::LocationChanged(Location::parse("/f")));
        assert!(panel.toolbar_scope().is_none());
    }

    #[test]
    fn test_failure_resubscribes_and_recovers() {
        let registry = PanelViewRegistry::new();
        registry.publish("panel", views());
        let mut panel = mount(&registry, "/f");
        panel.pump();

        registry.fail("panel", ProviderError::StreamFailed("extension host crashed".into()));
        panel.pump();
        assert!(matches!(panel.state(), PanelState::Failed(_)));
        assert!(panel.items().is_empty());
        assert_eq!(registry.subscriber_count("panel"), 1);

        // The new subscription replays the current snapshot
        panel.pump();
        assert_eq!(panel.state(), &PanelState::Populated);
        assert_eq!(panel.items().len(), 3);
    }

    #[test]
    fn test_gives_up_after_retry_budget() {
        let registry = PanelViewRegistry::new();
        let mut panel = mount(&registry, "/f");
        for _ in 0..=PanelConfig::default().max_resubscribe_attempts {
            registry.fail("panel", ProviderError::StreamFailed("boom".into()));
            panel.pump();
        }
        assert!(!panel.is_subscribed());
        assert_eq!(registry.subscriber_count("panel"), 0);

        panel.update(PanelMsg::Retry);
        assert!(panel.is_subscribed());
    }

    #[test]
    fn test_set_container_resubscribes_once() {
        let registry = PanelViewRegistry::new();
        let mut panel = mount(&registry, "/f");
        assert_eq!(registry.subscriber_count("panel"), 1);

        panel.update(PanelMsg::SetContainer("sidebar".into()));
        assert_eq!(registry.subscriber_count("panel"), 0);
        assert_eq!(registry.subscriber_count("sidebar"), 1);
        assert_eq!(panel.state(), &PanelState::Empty);

        assert_eq!(panel.update(PanelMsg::SetContainer("sidebar".into())), None);
        assert_eq!(registry.subscriber_count("sidebar"), 1);
    }

    #[test]
    fn test_unmount_unsubscribes() {
        let registry = PanelViewRegistry::new();
        let panel = mount(&registry, "/f");
        panel.unmount();
        assert_eq!(registry.subscriber_count("panel"), 0);
    }
}
