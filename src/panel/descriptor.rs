//! Panel view descriptors and the tab items derived from them

use serde::{Deserialize, Serialize};

use super::tabs::TabEntry;

/// A panel view contributed to a container
///
/// Owned by the provider; the panel only reads snapshots of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelViewDescriptor {
    /// Unique within a container
    pub id: String,
    pub title: String,
    /// Higher priorities are laid out first. Defaults to 0.
    #[serde(default)]
    pub priority: i32,
    /// Body the contribution wants shown in the tab
    #[serde(default)]
    pub content: String,
    /// Location provider backing the view, if it lists locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_provider: Option<String>,
}

impl PanelViewDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>, priority: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority,
            content: String::new(),
            location_provider: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_location_provider(mut self, provider: impl Into<String>) -> Self {
        self.location_provider = Some(provider.into());
        self
    }
}

/// A tab and the content shown when it is active
#[derive(Debug, Clone, PartialEq)]
pub struct PanelItem<C> {
    pub id: String,
    pub label: String,
    pub priority: i32,
    pub content: C,
    /// True when the view has a location provider, even one with no results
    pub has_locations: bool,
}

impl<C> TabEntry for PanelItem<C> {
    fn tab_id(&self) -> &str {
        &self.id
    }

    fn tab_label(&self) -> &str {
        &self.label
    }
}

/// Build tab items from a snapshot, highest priority first
///
/// The sort is stable: views with equal priority keep the order the provider
/// delivered them in. Views with an empty id are skipped, since an empty
/// fragment value always means no active tab and they could never be selected.
pub fn build_items<C>(
    views: &[PanelViewDescriptor],
    render: &dyn Fn(&PanelViewDescriptor) -> C,
) -> Vec<PanelItem<C>> {
    let mut items: Vec<PanelItem<C>> = views
        .iter()
        .filter(|view| {
            if view.id.is_empty() {
                tracing::warn!(title = %view.title, "skipping panel view with an empty id");
            }
            !view.id.is_empty()
        })
        .map(|view| PanelItem {
            id: view.id.clone(),
            label: view.title.clone(),
            priority: view.priority,
            content: render(view),
            has_locations: view.location_provider.is_some(),
        })
        .collect();
    items.sort_by(|a, b| b.priority.cmp(&a.priority));
    items
}
