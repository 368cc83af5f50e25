//! Traits for the UI elements validators read from.
//!
//! The core never talks to a toolkit directly. Hosts implement [`Node`] for
//! anything that sits in the control tree (forms, panels, tab pages) and
//! [`Control`] for input elements that carry a value.

use std::sync::Arc;

use crate::subscription::Subscription;

/// Callback fired when a control finishes an edit or loses focus.
pub type ValidatingCallback = Box<dyn Fn() + Send + Sync>;

/// An element of the control tree.
pub trait Node: Send + Sync {
    /// Stable identifier, unique within the tree.
    fn node_id(&self) -> String;

    /// The containing element, or `None` for a top-level element.
    fn parent(&self) -> Option<Arc<dyn Node>>;

    /// Position among its siblings in keyboard navigation order.
    fn tab_index(&self) -> u32;
}

/// An input element a validator can be bound to.
pub trait Control: Node {
    /// The current text of the control.
    fn text(&self) -> String;

    /// Ask the toolkit to move keyboard focus to this control.
    fn focus(&self);

    /// Register `callback` for the control's validating event.
    ///
    /// The returned [`Subscription`] removes the callback when released.
    fn subscribe_validating(&self, callback: ValidatingCallback) -> Subscription;
}

/// Whether two nodes are the same element.
pub fn same_node(a: &dyn Node, b: &dyn Node) -> bool {
    a.node_id() == b.node_id()
}
