//! Module implement the ordered multiset index and its balancing
//! engine.
//!
//! The tree uses the sentinel-leaf model: every downward path ends in
//! a black, payload-less sentinel node. An empty index is a single
//! sentinel root. Insertion converts the reached sentinel into a red
//! data-bearing node and hangs two fresh sentinels under it; deletion
//! splices a data-bearing node out and recycles its slot. Balancing
//! follows the classic recolor/rotate walks, insertion fix-up climbing
//! from the new node and the five-case "double-black" walk after
//! removing a black node.

use std::{borrow::Borrow, cmp::Ordering, fmt, sync::Arc};

use crate::{
    arena::{Arena, NodeId},
    depth::Depth,
    node::{Color, Node, Value},
    op::Write,
    stats::Stats,
    Result,
};

pub const MAX_TREE_DEPTH: usize = 100;

/// Index type, ordered multiset backed by a red-black tree.
///
/// Parametrised over the stored type, which must supply a total order.
/// Duplicate values are allowed and keep their insertion order among
/// equals. All mutations take `&mut self`; the index is defined for
/// strictly sequential, single-writer use.
pub struct Index<T> {
    name: String,
    root: NodeId,
    arena: Arena<T>,
    n_count: usize,
}

impl<T> Index<T> {
    /// Create an empty index, a single black sentinel root.
    pub fn new(name: &str) -> Index<T> {
        let mut arena = Arena::new();
        let root = arena.alloc_sentinel(None);
        Index {
            name: name.to_string(),
            root,
            arena,
            n_count: 0,
        }
    }

    /// Return name of this index instance.
    #[inline]
    pub fn to_name(&self) -> String {
        self.name.clone()
    }

    /// Return number of data-bearing entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Return whether index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return statistics for this instance. The `blacks` and `depths`
    /// fields are available only from [Index::validate].
    pub fn to_stats(&self) -> Stats {
        use std::mem::size_of;

        let mut stats = Stats::new(&self.name);
        stats.node_size = size_of::<Node<T>>();
        stats.n_count = self.n_count;
        stats.n_sentinels = self.arena.len() - self.n_count;
        stats
    }

    pub fn close(self) -> Result<()> {
        Ok(())
    }

    pub fn purge(self) -> Result<()> {
        Ok(())
    }
}

impl<T> Index<T>
where
    T: Ord,
{
    /// Insert `value` into the index. The tree exclusively owns the
    /// payload and shall drop it along with the node. Never fails.
    pub fn insert(&mut self, value: T) {
        self.insert_node(Value::Owned(value))
    }

    /// Insert a shared payload. The index holds one strong reference,
    /// the caller retains responsibility for its own.
    pub fn insert_shared(&mut self, value: Arc<T>) {
        self.insert_node(Value::Shared(value))
    }

    /// Apply `op` on this index. For more detail refer to [Write]
    /// type. Returns the detached payload for remove ops.
    pub fn write(&mut self, op: Write<T>) -> Result<Option<Value<T>>> {
        match op {
            Write::Ins {
                value,
                exclusive: true,
            } => {
                self.insert(value);
                Ok(None)
            }
            Write::Ins {
                value,
                exclusive: false,
            } => {
                self.insert_shared(Arc::new(value));
                Ok(None)
            }
            Write::Rem { key } => Ok(Some(self.remove(&key)?)),
        }
    }

    /// Remove the first entry matching `key` and return its payload,
    /// detached from the tree. If key is missing return
    /// [Error::KeyNotFound][crate::Error::KeyNotFound] and leave the
    /// tree untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Value<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = match self.find_node(key) {
            Some(node) => node,
            None => return err_at!(KeyNotFound, msg: "remove missing key"),
        };

        let left = self.arena.node(node).left.unwrap();
        let right = self.arena.node(node).right.unwrap();

        if self.arena.has_value(left) && self.arena.has_value(right) {
            // Two data-bearing children. Splice out the in-order
            // predecessor and relocate it into `node`'s position.
            // Duplicates go right on insert, so left tends to be the
            // shallower arm.
            let mut pred = left;
            while self.arena.has_value(pred) {
                pred = self.arena.node(pred).right.unwrap();
            }
            let pred = self.arena.node(pred).parent.unwrap();
            // both children bear data, pred sits below node.left.
            self.splice(pred)?;
            self.relocate(pred, node);
        } else {
            self.splice(node)?;
        }

        let node = self.arena.free(node);
        self.n_count -= 1;
        Ok(node.value.unwrap())
    }

    fn insert_node(&mut self, value: Value<T>) {
        // Descend to the first sentinel; equal values route right, so
        // an equal key lands after the existing duplicates.
        let mut at = self.root;
        while let Some(data) = self.arena.node(at).as_value() {
            at = match value.as_value().cmp(data) {
                Ordering::Less => self.arena.node(at).left.unwrap(),
                Ordering::Equal | Ordering::Greater => {
                    self.arena.node(at).right.unwrap()
                }
            };
        }

        // Convert the sentinel into a red data-bearing node with two
        // fresh sentinel children.
        let left = self.arena.alloc_sentinel(Some(at));
        let right = self.arena.alloc_sentinel(Some(at));
        {
            let node = self.arena.node_mut(at);
            node.value = Some(value);
            node.set_red();
            node.left = Some(left);
            node.right = Some(right);
        }
        self.n_count += 1;

        self.insert_repair(at)
    }

    // Climb from the freshly inserted node restoring the red-black
    // invariants.
    fn insert_repair(&mut self, mut n: NodeId) {
        loop {
            // case 1: n is root, force black.
            let parent = match self.arena.node(n).parent {
                Some(parent) => parent,
                None => {
                    self.arena.node_mut(n).set_black();
                    break;
                }
            };
            // case 2: black parent, nothing violated.
            if self.arena.node(parent).is_black() {
                break;
            }
            // red parent cannot be the root, grandparent must exist.
            let grandp = self.arena.grandparent(n).unwrap();
            // case 3: red uncle, recolor and resume two levels up.
            if let Some(uncle) = self.arena.uncle(n) {
                if !self.arena.is_black(Some(uncle)) {
                    self.arena.node_mut(parent).set_black();
                    self.arena.node_mut(uncle).set_black();
                    self.arena.node_mut(grandp).set_red();
                    n = grandp;
                    continue;
                }
            }
            // case 4: zig-zag shape, straighten it with one rotation,
            // continuing from the demoted end of the line.
            if Some(n) == self.arena.node(parent).right
                && Some(parent) == self.arena.node(grandp).left
            {
                self.rotate_left(parent);
                n = self.arena.node(n).left.unwrap();
            } else if Some(n) == self.arena.node(parent).left
                && Some(parent) == self.arena.node(grandp).right
            {
                self.rotate_right(parent);
                n = self.arena.node(n).right.unwrap();
            }
            // case 5: straight line, rotate at the grandparent. This
            // restores the black count, fix-up terminates.
            let parent = self.arena.node(n).parent.unwrap();
            let grandp = self.arena.node(parent).parent.unwrap();
            self.arena.node_mut(parent).set_black();
            self.arena.node_mut(grandp).set_red();
            if Some(n) == self.arena.node(parent).left {
                self.rotate_right(grandp);
            } else {
                self.rotate_left(grandp);
            }
            break;
        }
    }

    // Prepare-removal: unlink `n`, which has at most one data-bearing
    // child, replacing it with that child, and settle the black count
    // when a black node got unlinked.
    fn splice(&mut self, n: NodeId) -> Result<()> {
        let left = self.arena.node(n).left.unwrap();
        let right = self.arena.node(n).right.unwrap();
        let child = if self.arena.has_value(right) { right } else { left };

        // child takes n's place under n's parent.
        let parent = self.arena.node(n).parent;
        self.arena.node_mut(child).parent = parent;
        match parent {
            Some(parent) => {
                if self.arena.node(parent).left == Some(n) {
                    self.arena.node_mut(parent).left = Some(child);
                } else {
                    self.arena.node_mut(parent).right = Some(child);
                }
            }
            None => self.root = child,
        }

        if self.arena.has_value(child) {
            // child is a red data node with two sentinel children;
            // drop the sentinel facing n's other child and adopt that
            // child in its place.
            if child == left {
                let stale = self.arena.node(child).right.unwrap();
                if self.arena.has_value(stale) {
                    return err_at!(Fatal, msg: "splice: data node in sentinel slot");
                }
                self.arena.free(stale);
                self.arena.node_mut(child).right = Some(right);
                self.arena.node_mut(right).parent = Some(child);
            } else {
                let stale = self.arena.node(child).left.unwrap();
                if self.arena.has_value(stale) {
                    return err_at!(Fatal, msg: "splice: data node in sentinel slot");
                }
                self.arena.free(stale);
                self.arena.node_mut(child).left = Some(left);
                self.arena.node_mut(left).parent = Some(child);
            }
        } else {
            // both children are sentinels, child is the left one;
            // discard the unused right sentinel.
            self.arena.free(right);
        }

        let was_black = self.arena.node(n).is_black();
        {
            let node = self.arena.node_mut(n);
            node.parent = None;
            node.left = None;
            node.right = None;
        }

        if was_black {
            if self.arena.is_black(Some(child)) {
                self.remove_repair(child)?;
            } else {
                // red child absorbs the missing black unit.
                self.arena.node_mut(child).set_black();
            }
        }

        Ok(())
    }

    // Move `pred`, already spliced out of its own location, into
    // `node`'s position. It takes over node's links and color; pred is
    // physically moved, not recolored, so its own color is irrelevant.
    fn relocate(&mut self, pred: NodeId, node: NodeId) {
        let parent = self.arena.node(node).parent;
        self.arena.node_mut(pred).parent = parent;
        match parent {
            Some(parent) => {
                if self.arena.node(parent).left == Some(node) {
                    self.arena.node_mut(parent).left = Some(pred);
                } else {
                    self.arena.node_mut(parent).right = Some(pred);
                }
            }
            None => self.root = pred,
        }

        // node's links are read after the splice, the splice may have
        // replaced one of them.
        let left = self.arena.node(node).left.unwrap();
        let right = self.arena.node(node).right.unwrap();
        self.arena.node_mut(pred).left = Some(left);
        self.arena.node_mut(left).parent = Some(pred);
        self.arena.node_mut(pred).right = Some(right);
        self.arena.node_mut(right).parent = Some(pred);

        let black = self.arena.node(node).is_black();
        self.arena.node_mut(pred).black = black;
    }

    // Double-black walk: the subtree headed by `n` is short one black
    // unit. Sibling and nephew handles are recomputed after every
    // rotation, never reused stale.
    fn remove_repair(&mut self, mut n: NodeId) -> Result<()> {
        loop {
            // D1: reached the root, the whole tree shrank one black
            // level.
            let parent = match self.arena.node(n).parent {
                Some(parent) => parent,
                None => return Ok(()),
            };
            let mut sibling = match self.arena.sibling(n) {
                Some(sibling) => sibling,
                None => return err_at!(Fatal, msg: "remove_repair: missing sibling"),
            };

            // D2: red sibling. Rotate it above the parent and rework
            // with the former nephew as the new sibling.
            if !self.arena.is_black(Some(sibling)) {
                self.arena.node_mut(parent).set_red();
                self.arena.node_mut(sibling).set_black();
                if self.arena.node(parent).left == Some(n) {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                sibling = match self.arena.sibling(n) {
                    Some(sibling) => sibling,
                    None => {
                        return err_at!(Fatal, msg: "remove_repair: missing sibling")
                    }
                };
            }

            // sibling is black and data-bearing from here on.
            let (sl, sr) = {
                let s = self.arena.node(sibling);
                match (s.left, s.right) {
                    (Some(sl), Some(sr)) => (sl, sr),
                    _ => {
                        return err_at!(Fatal, msg: "remove_repair: sentinel sibling")
                    }
                }
            };
            let parent_black = self.arena.is_black(Some(parent));
            let nephews_black =
                self.arena.is_black(Some(sl)) && self.arena.is_black(Some(sr));

            // D3: everything black, push the deficiency one level up.
            if parent_black && nephews_black {
                self.arena.node_mut(sibling).set_red();
                n = parent;
                continue;
            }
            // D4: red parent absorbs the missing black locally.
            if !parent_black && nephews_black {
                self.arena.node_mut(sibling).set_red();
                self.arena.node_mut(parent).set_black();
                return Ok(());
            }
            // D5: near nephew red, far nephew black. Rotate at the
            // sibling to expose a red far nephew.
            if self.arena.node(parent).left == Some(n)
                && self.arena.is_black(Some(sr))
                && !self.arena.is_black(Some(sl))
            {
                self.arena.node_mut(sibling).set_red();
                self.arena.node_mut(sl).set_black();
                self.rotate_right(sibling);
            } else if self.arena.node(parent).right == Some(n)
                && self.arena.is_black(Some(sl))
                && !self.arena.is_black(Some(sr))
            {
                self.arena.node_mut(sibling).set_red();
                self.arena.node_mut(sr).set_black();
                self.rotate_left(sibling);
            }

            // D6: far nephew red, rotation at the parent settles the
            // debt.
            let sibling = match self.arena.sibling(n) {
                Some(sibling) => sibling,
                None => return err_at!(Fatal, msg: "remove_repair: missing sibling"),
            };
            let black = self.arena.node(parent).is_black();
            self.arena.node_mut(sibling).black = black;
            self.arena.node_mut(parent).set_black();
            if self.arena.node(parent).left == Some(n) {
                let far = match self.arena.node(sibling).right {
                    Some(far) => far,
                    None => return err_at!(Fatal, msg: "remove_repair: missing nephew"),
                };
                self.arena.node_mut(far).set_black();
                self.rotate_left(parent);
            } else {
                let far = match self.arena.node(sibling).left {
                    Some(far) => far,
                    None => return err_at!(Fatal, msg: "remove_repair: missing nephew"),
                };
                self.arena.node_mut(far).set_black();
                self.rotate_right(parent);
            }
            return Ok(());
        }
    }

    // Promote n's right child above n, preserving in-order order and
    // keeping the authoritative root reference in sync when n was the
    // root.
    fn rotate_left(&mut self, n: NodeId) {
        let pivot = match self.arena.node(n).right {
            Some(pivot) if self.arena.has_value(pivot) => pivot,
            _ => panic!("rotate_left: no pivot, call-the-programmer"),
        };
        let inner = self.arena.node(pivot).left.unwrap();

        self.arena.node_mut(n).right = Some(inner);
        self.arena.node_mut(inner).parent = Some(n);
        self.arena.node_mut(pivot).left = Some(n);

        let parent = self.arena.node(n).parent;
        self.arena.node_mut(n).parent = Some(pivot);
        self.arena.node_mut(pivot).parent = parent;
        match parent {
            Some(parent) => {
                if self.arena.node(parent).left == Some(n) {
                    self.arena.node_mut(parent).left = Some(pivot);
                } else {
                    self.arena.node_mut(parent).right = Some(pivot);
                }
            }
            None => self.root = pivot,
        }
    }

    fn rotate_right(&mut self, n: NodeId) {
        let pivot = match self.arena.node(n).left {
            Some(pivot) if self.arena.has_value(pivot) => pivot,
            _ => panic!("rotate_right: no pivot, call-the-programmer"),
        };
        let inner = self.arena.node(pivot).right.unwrap();

        self.arena.node_mut(n).left = Some(inner);
        self.arena.node_mut(inner).parent = Some(n);
        self.arena.node_mut(pivot).right = Some(n);

        let parent = self.arena.node(n).parent;
        self.arena.node_mut(n).parent = Some(pivot);
        self.arena.node_mut(pivot).parent = parent;
        match parent {
            Some(parent) => {
                if self.arena.node(parent).left == Some(n) {
                    self.arena.node_mut(parent).left = Some(pivot);
                } else {
                    self.arena.node_mut(parent).right = Some(pivot);
                }
            }
            None => self.root = pivot,
        }
    }
}

impl<T> Index<T> {
    /// Get a reference to the first entry matching `key`. If key is
    /// not found return
    /// [Error::KeyNotFound][crate::Error::KeyNotFound].
    pub fn get<Q>(&self, key: &Q) -> Result<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find_node(key) {
            Some(id) => Ok(self.arena.node(id).as_value().unwrap()),
            None => err_at!(KeyNotFound, msg: "get missing key"),
        }
    }

    /// Return whether `key` is present in the index.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    // Ordered descent from root to a data-bearing node or failure.
    fn find_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut at = self.root;
        while let Some(data) = self.arena.node(at).as_value() {
            at = match data.borrow().cmp(key) {
                Ordering::Less => self.arena.node(at).right.unwrap(),
                Ordering::Greater => self.arena.node(at).left.unwrap(),
                Ordering::Equal => return Some(at),
            };
        }
        None
    }

    /// Full in-order scan over the stored values, in non-decreasing
    /// order. Lazy; each call starts a fresh walk.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.iter_nodes(false),
        }
    }

    /// Diagnostic in-order walk reporting every node's value, color
    /// and root-ness. Set `sentinels` to also yield the sentinel
    /// leafs, exposing the internal structure.
    pub fn iter_nodes(&self, sentinels: bool) -> IterNodes<'_, T> {
        let mut paths = Vec::default();
        build_iter(IFlag::Left, &self.arena, Some(self.root), &mut paths);

        IterNodes {
            index: self,
            paths,
            sentinels,
        }
    }
}

impl<T> Index<T>
where
    T: Ord + fmt::Debug,
{
    /// Validate the tree with following rules:
    ///
    /// * Root node and every sentinel leaf is black.
    /// * No consecutive reds on any parent-child edge.
    /// * Same number of blacks on every root-to-sentinel path.
    /// * Sort order between a node and its left/right child, duplicate
    ///   values in non-decreasing in-order position.
    /// * Data-bearing nodes have both children, sentinels have none,
    ///   and every child's parent link points back.
    /// * Maximum depth does not exceed [MAX_TREE_DEPTH].
    ///
    /// Returns statistics with `blacks` and `depths` filled in.
    pub fn validate(&self) -> Result<Stats> {
        if !self.arena.is_black(Some(self.root)) {
            return err_at!(Fatal, msg: "root node must be black");
        }
        if self.arena.node(self.root).parent.is_some() {
            return err_at!(Fatal, msg: "root node has a parent");
        }

        let mut depths = Depth::default();
        let (blacks, n_count) =
            validate_tree(&self.arena, self.root, false, 0, 0, &mut depths)?;
        if n_count != self.n_count {
            return err_at!(Fatal, msg: "n_count {} != {}", n_count, self.n_count);
        }

        let mut stats = self.to_stats();
        stats.blacks = Some(blacks);
        stats.depths = Some(depths);
        Ok(stats)
    }
}

// Render the tree the way the interactive console prints it, in-order
// with sentinels, `<value>/<color>` and a `/ROOT` marker.
impl<T> fmt::Display for Index<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.iter_nodes(true) {
            let color = match entry.color {
                Color::Black => "B",
                Color::Red => "R",
            };
            match entry.value {
                Some(value) => write!(f, "{}/{}", value, color)?,
                None => write!(f, "null/{}", color)?,
            }
            if entry.is_root {
                write!(f, "/ROOT")?;
            }
            write!(f, " ")?;
        }
        Ok(())
    }
}

fn validate_tree<T>(
    arena: &Arena<T>,
    id: NodeId,
    fromred: bool,
    mut n_blacks: usize,
    depth: usize,
    depths: &mut Depth,
) -> Result<(usize, usize)>
where
    T: Ord + fmt::Debug,
{
    let node = arena.node(id);
    let red = !node.is_black();

    if fromred && red {
        return err_at!(Fatal, msg: "consecutive reds");
    }
    if depth > MAX_TREE_DEPTH {
        return err_at!(Fatal, msg: "tree exceeds max depth {}", depth);
    }
    if !red {
        n_blacks += 1;
    }

    let value = match node.as_value() {
        Some(value) => value,
        None => {
            // sentinel leaf terminates the path.
            if red {
                return err_at!(Fatal, msg: "red sentinel leaf");
            }
            if node.left.is_some() || node.right.is_some() {
                return err_at!(Fatal, msg: "sentinel with children");
            }
            depths.sample(depth);
            return Ok((n_blacks, 0));
        }
    };

    let (left, right) = match (node.left, node.right) {
        (Some(left), Some(right)) => (left, right),
        _ => return err_at!(Fatal, msg: "data node without both children"),
    };
    if arena.node(left).parent != Some(id) || arena.node(right).parent != Some(id) {
        return err_at!(Fatal, msg: "parent link out of sync");
    }

    // confirm sort order; rotations can move an equal value onto the
    // left arm, so equality is allowed on both sides.
    if let Some(lv) = arena.node(left).as_value() {
        if lv.cmp(value) == Ordering::Greater {
            return err_at!(Fatal, msg: "sort order left:{:?} parent:{:?}", lv, value);
        }
    }
    if let Some(rv) = arena.node(right).as_value() {
        if rv.cmp(value) == Ordering::Less {
            return err_at!(Fatal, msg: "sort order right:{:?} parent:{:?}", rv, value);
        }
    }

    let (lb, lc) = validate_tree(arena, left, red, n_blacks, depth + 1, depths)?;
    let (rb, rc) = validate_tree(arena, right, red, n_blacks, depth + 1, depths)?;

    if lb != rb {
        return err_at!(Fatal, msg: "unbalanced blacks l:{} r:{}", lb, rb);
    }

    Ok((lb, lc + rc + 1))
}

/// Iterator type, to do full table scan over the stored values.
pub struct Iter<'a, T> {
    inner: IterNodes<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.value.unwrap())
    }
}

/// Single element yielded by [IterNodes]: the value (`None` for a
/// sentinel leaf), its color, and whether it is the current root.
pub struct NodeEntry<'a, T> {
    pub value: Option<&'a T>,
    pub color: Color,
    pub is_root: bool,
}

/// Iterator type, diagnostic in-order walk over the tree's nodes.
///
/// Continuous iteration without walking the whole tree from root on
/// each step, achieved by maintaining the path to the previous
/// iterated node as a stack of [Fragment]s.
pub struct IterNodes<'a, T> {
    index: &'a Index<T>,
    paths: Vec<Fragment>,
    sentinels: bool,
}

impl<'a, T> Iterator for IterNodes<'a, T> {
    type Item = NodeEntry<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let index: &'a Index<T> = self.index;
        loop {
            let (id, flag) = {
                let path = self.paths.last()?;
                (path.id, path.flag)
            };
            match flag {
                IFlag::Left => {
                    self.paths.last_mut().unwrap().flag = IFlag::Center;
                    let node = index.arena.node(id);
                    if !node.is_sentinel() || self.sentinels {
                        break Some(NodeEntry {
                            value: node.as_value(),
                            color: node.to_color(),
                            is_root: id == index.root,
                        });
                    }
                }
                IFlag::Center => {
                    self.paths.last_mut().unwrap().flag = IFlag::Right;
                    let right = index.arena.node(id).right;
                    build_iter(IFlag::Left, &index.arena, right, &mut self.paths);
                }
                IFlag::Right => {
                    self.paths.pop();
                }
            }
        }
    }
}

// Tree-path element: a node and how much of it is already iterated.
struct Fragment {
    flag: IFlag,
    id: NodeId,
}

#[derive(Copy, Clone)]
enum IFlag {
    Left,   // left arm is being iterated.
    Center, // current node is iterated.
    Right,  // right arm is being iterated.
}

fn build_iter<T>(
    flag: IFlag,
    arena: &Arena<T>,
    node: Option<NodeId>,
    paths: &mut Vec<Fragment>,
) {
    if let Some(id) = node {
        paths.push(Fragment { flag, id });
        let node = match flag {
            IFlag::Left => arena.node(id).left,
            IFlag::Right => arena.node(id).right,
            IFlag::Center => unreachable!(),
        };
        build_iter(flag, arena, node, paths)
    }
}

#[cfg(any(test, feature = "perf"))]
use rand::{rngs::SmallRng, Rng, SeedableRng};

#[cfg(any(test, feature = "perf"))]
pub fn load_index<T>(seed: u128, inserts: usize, removes: usize) -> Index<T>
where
    T: Ord,
    rand::distributions::Standard: rand::distributions::Distribution<T>,
{
    let mut rng = SmallRng::from_seed(crate::to_seed(seed));
    let mut index = Index::new("testing");

    let (mut ins, mut rems) = (inserts, removes);
    while (ins + rems) > 0 {
        let value: T = rng.gen();
        match rng.gen::<usize>() % (ins + rems) {
            i if i < ins => {
                index.insert(value);
                ins -= 1;
            }
            _ => {
                index.remove(&value).ok();
                rems -= 1;
            }
        }
    }

    index
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
