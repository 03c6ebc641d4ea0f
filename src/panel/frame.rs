//! Renderable snapshot of the panel

use std::fmt;

use super::tabs::TabHeader;
use crate::error::ProviderError;

/// Toolbar context for the active view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveViewScope<'a> {
    pub id: &'a str,
    pub has_locations: bool,
}

#[derive(Debug, PartialEq)]
pub enum FrameBody<'a, C> {
    /// Placeholder shown before the first snapshot
    Empty,
    /// Fallback shown while the view stream is down
    Failed(&'a ProviderError),
    /// Tab strip plus the active view's content, if any tab is active
    Tabs {
        headers: Vec<TabHeader<'a>>,
        content: Option<&'a C>,
    },
}

#[derive(Debug, PartialEq)]
pub struct PanelFrame<'a, C> {
    pub body: FrameBody<'a, C>,
    pub toolbar: Option<ActiveViewScope<'a>>,
}

impl<C: fmt::Display> fmt::Display for PanelFrame<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            FrameBody::Empty => writeln!(f, "(loading panel views)"),
            FrameBody::Failed(error) => writeln!(f, "(panel unavailable: {})", error),
            FrameBody::Tabs { headers, content } => {
                for header in headers {
                    if header.active {
                        write!(f, "[*{}*] ", header.label)?;
                    } else {
                        write!(f, "[ {} ] ", header.label)?;
                    }
                }
                writeln!(f, "[x]")?;
                if let Some(scope) = &self.toolbar {
                    writeln!(
                        f,
                        "toolbar: {}{}",
                        scope.id,
                        if scope.has_locations { " (locations)" } else { "" }
                    )?;
                }
                match content {
                    Some(content) => writeln!(f, "{}", content),
                    None => writeln!(f, "(no active view)"),
                }
            }
        }
    }
}
