//! framemaker - per-view frame layout from declarative relations
//!
//! A [`Maker`] collects relations for one view (edges, sizes, centers,
//! containment), resolves them in priority order and commits a single frame.
//! Layouts can also be described in TOML documents and resolved as a whole.
//!
//! # Example
//!
//! ```rust
//! use framemaker::{configure_frame, Rect, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let root = tree.add_root("root", Rect::new(0.0, 0.0, 320.0, 480.0));
//! let a = tree.add_subview(root, "a", Rect::zero());
//! let b = tree.add_subview(root, "b", Rect::zero());
//!
//! configure_frame(&mut tree, a, |maker| {
//!     maker.top(20.0).left(0.0).size(20.0, 20.0);
//! })
//! .unwrap();
//! let frame = configure_frame(&mut tree, b, |maker| {
//!     maker.left(a.right().offset(10.0)).top(a.top()).size(40.0, 20.0);
//! })
//! .unwrap();
//!
//! assert_eq!(frame, Rect::new(30.0, 20.0, 40.0, 20.0));
//! ```

pub mod document;
pub mod error;
pub mod layout;

pub use document::LayoutDocument;
pub use error::DocumentError;
pub use layout::{
    configure_frame, configure_frame_with, Anchor, Attribute, Dimension, EdgeInsets,
    GeometryValue, KeyboardTracking, LayoutConfig, LayoutError, Maker, Priority, Rect, Sides,
    ViewHierarchy, ViewId, ViewTree,
};

/// Resolve a TOML layout document with default configuration
///
/// ```rust
/// let tree = framemaker::resolve(r#"
///     [[view]]
///     name = "root"
///     frame = [0, 0, 100, 100]
///
///     [[view]]
///     name = "child"
///     parent = "root"
///     relations = [{ attribute = "width", value = 50 }]
/// "#).unwrap();
///
/// assert!(tree.outline().contains("[child] x=0.0 y=0.0 w=50.0 h=0.0"));
/// ```
pub fn resolve(source: &str) -> Result<ViewTree, DocumentError> {
    resolve_with_config(source, &LayoutConfig::default())
}

/// Resolve a TOML layout document with custom configuration
pub fn resolve_with_config(source: &str, config: &LayoutConfig) -> Result<ViewTree, DocumentError> {
    LayoutDocument::parse(source)?.resolve(config)
}
