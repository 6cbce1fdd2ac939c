//! View capability consumed by the frame builder, plus an in-memory view tree
//!
//! The builder only needs a handful of things from a view hierarchy: read and
//! write a frame, walk direct subviews, find the superview and set a corner
//! radius. [`ViewHierarchy`] captures exactly that so any toolkit can be
//! adapted; [`ViewTree`] is the arena implementation used by documents, the
//! CLI and the tests.

use std::fmt::Write as _;

use super::error::LayoutError;
use super::types::{Point, Rect};

/// Handle to a view inside a hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub usize);

/// What the frame builder needs from a view hierarchy.
///
/// Ids passed to these methods must belong to the hierarchy; use
/// [`ViewHierarchy::contains`] to check ids of unknown origin. Superview
/// chains must be acyclic.
pub trait ViewHierarchy {
    fn contains(&self, view: ViewId) -> bool;

    /// Frame in the superview's coordinate space
    fn frame(&self, view: ViewId) -> Rect;

    fn set_frame(&mut self, view: ViewId, frame: Rect);

    /// Direct subviews in order
    fn subviews(&self, view: ViewId) -> Vec<ViewId>;

    fn superview(&self, view: ViewId) -> Option<ViewId>;

    fn set_corner_radius(&mut self, view: ViewId, radius: f64);

    /// Origin of `view` in the coordinate space of its outermost ancestor
    fn absolute_origin(&self, view: ViewId) -> Point {
        let mut origin = Point::new(0.0, 0.0);
        let mut current = Some(view);
        while let Some(id) = current {
            let frame = self.frame(id);
            origin.x += frame.x;
            origin.y += frame.y;
            current = self.superview(id);
        }
        origin
    }

    /// Frame of `view` expressed in the coordinate space of `space`'s
    /// subviews. `None` means the outermost space.
    fn convert_frame(&self, view: ViewId, space: Option<ViewId>) -> Rect {
        let frame = self.frame(view);
        let origin = self.absolute_origin(view);
        let base = space
            .map(|id| self.absolute_origin(id))
            .unwrap_or(Point::new(0.0, 0.0));
        Rect::new(
            origin.x - base.x,
            origin.y - base.y,
            frame.width,
            frame.height,
        )
    }
}

/// A single node of a [`ViewTree`]
#[derive(Debug, Clone)]
pub struct ViewNode {
    pub name: String,
    pub frame: Rect,
    pub corner_radius: Option<f64>,
    pub parent: Option<ViewId>,
    pub children: Vec<ViewId>,
}

/// Arena-backed view hierarchy.
///
/// Root views play the role of windows.
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    nodes: Vec<ViewNode>,
    roots: Vec<ViewId>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level view
    pub fn add_root(&mut self, name: impl Into<String>, frame: Rect) -> ViewId {
        let id = self.insert(name, frame);
        self.link(id, None);
        id
    }

    /// Add a view as the last subview of `parent`
    pub fn add_subview(&mut self, parent: ViewId, name: impl Into<String>, frame: Rect) -> ViewId {
        let id = self.insert(name, frame);
        self.link(id, Some(parent));
        id
    }

    /// Create a view that is not part of the hierarchy yet
    pub fn insert(&mut self, name: impl Into<String>, frame: Rect) -> ViewId {
        let id = ViewId(self.nodes.len());
        self.nodes.push(ViewNode {
            name: name.into(),
            frame,
            corner_radius: None,
            parent: None,
            children: vec![],
        });
        id
    }

    /// Move `view` under `parent`, or make it a window when `None`.
    ///
    /// Fails when `parent` is the view itself or one of its descendants.
    pub fn attach(&mut self, view: ViewId, parent: Option<ViewId>) -> Result<(), LayoutError> {
        for id in std::iter::once(view).chain(parent) {
            if !self.contains(id) {
                return Err(LayoutError::UnknownView(id));
            }
        }
        if let Some(parent) = parent {
            if self.is_within(parent, view) {
                return Err(LayoutError::CyclicHierarchy { view, parent });
            }
        }
        self.link(view, parent);
        Ok(())
    }

    /// Whether `view` is `ancestor` or lies somewhere below it
    fn is_within(&self, view: ViewId, ancestor: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    fn link(&mut self, view: ViewId, parent: Option<ViewId>) {
        self.remove_from_superview(view);
        match parent {
            Some(parent) => {
                self.nodes[view.0].parent = Some(parent);
                self.nodes[parent.0].children.push(view);
            }
            None => self.roots.push(view),
        }
    }

    /// Detach a view from its superview. The node stays addressable.
    pub fn remove_from_superview(&mut self, view: ViewId) {
        if let Some(parent) = self.nodes[view.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != view);
        }
        self.roots.retain(|root| *root != view);
    }

    pub fn roots(&self) -> &[ViewId] {
        &self.roots
    }

    pub fn node(&self, view: ViewId) -> Option<&ViewNode> {
        self.nodes.get(view.0)
    }

    pub fn name(&self, view: ViewId) -> &str {
        &self.nodes[view.0].name
    }

    pub fn corner_radius(&self, view: ViewId) -> Option<f64> {
        self.nodes[view.0].corner_radius
    }

    /// Find the first view with the given name
    pub fn find(&self, name: &str) -> Option<ViewId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(ViewId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indented one-line-per-view dump of every window and its subviews
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            self.write_outline(&mut out, *root, 0);
        }
        out
    }

    fn write_outline(&self, out: &mut String, view: ViewId, depth: usize) {
        let node = &self.nodes[view.0];
        let f = node.frame;
        let _ = write!(
            out,
            "{}[{}] x={:.1} y={:.1} w={:.1} h={:.1}",
            "  ".repeat(depth),
            node.name,
            f.x,
            f.y,
            f.width,
            f.height
        );
        if let Some(radius) = node.corner_radius {
            let _ = write!(out, " r={:.1}", radius);
        }
        out.push('\n');
        for child in &node.children {
            self.write_outline(out, *child, depth + 1);
        }
    }
}

impl ViewHierarchy for ViewTree {
    fn contains(&self, view: ViewId) -> bool {
        view.0 < self.nodes.len()
    }

    fn frame(&self, view: ViewId) -> Rect {
        self.nodes[view.0].frame
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        self.nodes[view.0].frame = frame;
    }

    fn subviews(&self, view: ViewId) -> Vec<ViewId> {
        self.nodes[view.0].children.clone()
    }

    fn superview(&self, view: ViewId) -> Option<ViewId> {
        self.nodes[view.0].parent
    }

    fn set_corner_radius(&mut self, view: ViewId, radius: f64) {
        self.nodes[view.0].corner_radius = Some(radius);
    }
}
