//! Error types for relation declaration

use thiserror::Error;

use super::types::Attribute;
use super::view::ViewId;

/// Programmer errors caught while relations are declared.
///
/// A builder keeps the first one it sees and returns it from `apply`
/// without touching the view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A relation reads an attribute that cannot feed the one being set
    #[error("'{target}' cannot be related to '{from}'")]
    IncompatibleAttribute { target: Attribute, from: Attribute },

    /// NaN or infinite input
    #[error("non-finite value for '{attribute}'")]
    NonFiniteValue { attribute: Attribute },

    /// A view id that does not belong to the hierarchy
    #[error("view {0:?} is not part of the hierarchy")]
    UnknownView(ViewId),

    /// An inset relation on a view that has no superview to inset from
    #[error("view {view:?} has no superview for '{attribute}'")]
    NoSuperview { view: ViewId, attribute: Attribute },

    /// Attaching would make a view its own ancestor
    #[error("attaching {view:?} under {parent:?} would create a cycle")]
    CyclicHierarchy { view: ViewId, parent: ViewId },

    /// Keyboard tracking was set up without any window to attach to
    #[error("no window to attach to")]
    NoWindow,
}

impl LayoutError {
    pub fn incompatible(target: Attribute, from: Attribute) -> Self {
        Self::IncompatibleAttribute { target, from }
    }
}
