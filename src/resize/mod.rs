//! Drag-to-resize along one edge
//!
//! A resize handle sits on one edge of a container. Pressing it starts a drag;
//! while dragging, every global pointer move is converted into a size along the
//! edge's axis; releasing the pointer anywhere ends the drag.
//!
//! - `right`: pointer x minus the container's left edge
//! - `left`: the container's right edge minus pointer x
//! - `top`: the container's bottom edge minus pointer y
//!
//! Sizes are not capped. The only limit is the presentation floor applied by
//! whoever lays the container out.

mod mounted;

pub use mounted::MountedResizer;

use serde::{Deserialize, Serialize};

use crate::pointer::Point;

/// Edge of the container that carries the resize handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
}

impl Edge {
    /// The container dimension this edge resizes
    pub fn dimension(&self) -> Dimension {
        match self {
            Edge::Left | Edge::Right => Dimension::Width,
            Edge::Top => Dimension::Height,
        }
    }

    /// Size implied by a pointer at `point` for a container at `bounds`
    pub fn size_at(&self, bounds: &Bounds, point: Point) -> f64 {
        match self {
            Edge::Right => point.x - bounds.left,
            Edge::Left => bounds.right - point.x,
            Edge::Top => bounds.bottom - point.y,
        }
    }

    pub const ALL: [Edge; 3] = [Edge::Left, Edge::Right, Edge::Top];
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
        })
    }
}

impl std::str::FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Edge::Left),
            "right" => Ok(Edge::Right),
            "top" => Ok(Edge::Top),
            other => Err(format!("unknown edge {:?} (expected left, right or top)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        })
    }
}

/// Bounding box of the resizable container in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Drag gesture state for one resize handle
#[derive(Debug, Clone)]
pub struct DragResizer {
    edge: Edge,
    bounds: Bounds,
    state: DragState,
}

impl DragResizer {
    pub fn new(edge: Edge, bounds: Bounds) -> Self {
        Self {
            edge,
            bounds,
            state: DragState::Idle,
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
    }

    /// Update the container box after layout moved it
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Pointer pressed on the handle
    pub fn begin_drag(&mut self) {
        if self.state == DragState::Idle {
            tracing::debug!(edge = %self.edge, "resize drag started");
        }
        self.state = DragState::Dragging;
    }

    /// Pointer released anywhere
    pub fn end_drag(&mut self) {
        if self.state == DragState::Dragging {
            tracing::debug!(edge = %self.edge, "resize drag ended");
        }
        self.state = DragState::Idle;
    }

    /// New size for a pointer move, or `None` while idle
    pub fn pointer_moved(&self, point: Point) -> Option<i64> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging => Some(self.edge.size_at(&self.bounds, point).round() as i64),
        }
    }
}
