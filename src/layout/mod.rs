//! Relation resolution engine
//!
//! Relations are declared on a [`Maker`] bound to one view, queued as
//! prioritized handlers and resolved into a single frame commit.

pub mod config;
pub mod container;
pub mod edges;
pub mod error;
pub mod handler;
pub mod maker;
pub mod parameter;
pub mod tracking;
pub mod types;
pub mod view;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use handler::{Action, Handler, HandlerQueue, Priority, Stage};
pub use maker::Maker;
pub use parameter::{Anchor, GeometryValue, Parameter, SideParameter, ValueParameter};
pub use tracking::KeyboardTracking;
pub use types::*;
pub use view::{ViewHierarchy, ViewId, ViewNode, ViewTree};

/// Configure one view and commit its frame when the closure returns.
///
/// ```
/// use framemaker::{configure_frame, Rect, ViewTree};
///
/// let mut tree = ViewTree::new();
/// let root = tree.add_root("root", Rect::new(0.0, 0.0, 100.0, 100.0));
/// let view = tree.add_subview(root, "view", Rect::zero());
///
/// let frame = configure_frame(&mut tree, view, |maker| {
///     maker.top(10.0).left(10.0).size(30.0, 20.0);
/// })
/// .unwrap();
/// assert_eq!(frame, Rect::new(10.0, 10.0, 30.0, 20.0));
/// ```
pub fn configure_frame<V, F>(views: &mut V, view: ViewId, configure: F) -> Result<Rect, LayoutError>
where
    V: ViewHierarchy + ?Sized,
    F: FnOnce(&mut Maker<'_, V>),
{
    configure_frame_with(views, view, &LayoutConfig::default(), configure)
}

/// [`configure_frame`] with an explicit configuration
pub fn configure_frame_with<V, F>(
    views: &mut V,
    view: ViewId,
    config: &LayoutConfig,
    configure: F,
) -> Result<Rect, LayoutError>
where
    V: ViewHierarchy + ?Sized,
    F: FnOnce(&mut Maker<'_, V>),
{
    let mut maker = Maker::with_config(views, view, config.clone());
    configure(&mut maker);
    maker.apply()
}
