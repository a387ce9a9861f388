//! Module implement the node model for the red-black tree.

use std::{ops::Deref, sync::Arc};

use crate::arena::NodeId;

/// Node color. Sentinel leafs are always [Color::Black], freshly
/// inserted nodes start out [Color::Red].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Color {
    Red,
    Black,
}

/// Payload stored in a data-bearing node.
///
/// The variant decides who is responsible for releasing the underlying
/// value: an [Owned][Value::Owned] payload is dropped along with the
/// tree, while a [Shared][Value::Shared] payload only gives up one
/// strong reference and the caller keeps theirs alive.
#[derive(Clone, Debug)]
pub enum Value<T> {
    Owned(T),
    Shared(Arc<T>),
}

impl<T> Value<T> {
    /// Return whether the tree is the sole owner of this payload.
    #[inline]
    pub fn is_owned(&self) -> bool {
        match self {
            Value::Owned(_) => true,
            Value::Shared(_) => false,
        }
    }

    #[inline]
    pub fn as_value(&self) -> &T {
        match self {
            Value::Owned(value) => value,
            Value::Shared(value) => value.as_ref(),
        }
    }
}

impl<T> Deref for Value<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.as_value()
    }
}

impl<T> PartialEq for Value<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Value<T>) -> bool {
        self.as_value().eq(other.as_value())
    }
}

// Node corresponds to a single cell in the tree, either data-bearing
// or a sentinel leaf. Sentinels carry no payload and no children,
// data-bearing nodes always have both children. `parent` is a
// non-owning back-reference, used only for upward traversal.
pub(crate) struct Node<T> {
    pub value: Option<Value<T>>, // None marks a sentinel leaf
    pub black: bool,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<T> Node<T> {
    // Sentinel leafs start black and childless.
    pub fn new_sentinel(parent: Option<NodeId>) -> Node<T> {
        Node {
            value: None,
            black: true,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.value.is_none()
    }

    #[inline]
    pub fn to_color(&self) -> Color {
        if self.black {
            Color::Black
        } else {
            Color::Red
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        self.value.as_ref().map(Value::as_value)
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
