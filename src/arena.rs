//! Module implement the allocation pool backing the red-black tree.
//!
//! Nodes live in a slot vector and refer to each other through
//! [NodeId] handles instead of pointers. Freed slots are recycled via
//! a free list. Dropping the pool releases every node, and every
//! exclusively owned payload, without recursing on tree height.

use crate::node::Node;

/// Handle to a node in the pool. Stable until the node is freed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(usize);

pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub fn new() -> Arena<T> {
        Arena {
            slots: Vec::default(),
            free: Vec::default(),
        }
    }

    /// Return number of live nodes, sentinels included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn alloc_sentinel(&mut self, parent: Option<NodeId>) -> NodeId {
        let node = Node::new_sentinel(parent);
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Some(node));
                id
            }
        }
    }

    /// Release the slot and hand the node back, links and payload
    /// intact.
    pub fn free(&mut self, id: NodeId) -> Node<T> {
        match self.slots[id.0].take() {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => panic!("free on vacant slot {:?}, call-the-programmer", id),
        }
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        match self.slots[id.0].as_ref() {
            Some(node) => node,
            None => panic!("access on vacant slot {:?}, call-the-programmer", id),
        }
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots[id.0].as_mut() {
            Some(node) => node,
            None => panic!("access on vacant slot {:?}, call-the-programmer", id),
        }
    }

    #[inline]
    pub fn has_value(&self, id: NodeId) -> bool {
        !self.node(id).is_sentinel()
    }

    // An absent node reads as black, same as a sentinel.
    #[inline]
    pub fn is_black(&self, id: Option<NodeId>) -> bool {
        id.map_or(true, |id| self.node(id).is_black())
    }
}

// Relative lookups, pure O(1) reads over existing links. Absence is an
// explicit None, never a fault.
impl<T> Arena<T> {
    pub fn grandparent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        self.node(parent).parent
    }

    /// Grandparent's other child.
    pub fn uncle(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let grandp = self.node(parent).parent?;
        if self.node(grandp).left == Some(parent) {
            self.node(grandp).right
        } else {
            self.node(grandp).left
        }
    }

    /// Parent's other child.
    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        if self.node(parent).left == Some(id) {
            self.node(parent).right
        } else {
            self.node(parent).left
        }
    }
}

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;
