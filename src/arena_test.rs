use crate::node::Value;

use super::*;

#[test]
fn test_rbset_arena_alloc() {
    let mut arena: Arena<u32> = Arena::new();
    assert_eq!(arena.len(), 0);

    let a = arena.alloc_sentinel(None);
    let b = arena.alloc_sentinel(Some(a));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.node(b).parent, Some(a));
    assert_eq!(arena.has_value(a), false);
    assert_eq!(arena.is_black(Some(a)), true);
    assert_eq!(arena.is_black(None), true);

    // freed slots get recycled before the vector grows.
    let node = arena.free(b);
    assert_eq!(node.is_sentinel(), true);
    assert_eq!(arena.len(), 1);
    let c = arena.alloc_sentinel(None);
    assert_eq!(c, b);
    assert_eq!(arena.len(), 2);
}

#[test]
#[should_panic(expected = "free on vacant slot")]
fn test_rbset_arena_double_free() {
    let mut arena: Arena<u32> = Arena::new();
    let a = arena.alloc_sentinel(None);
    arena.free(a);
    arena.free(a);
}

#[test]
fn test_rbset_arena_relatives() {
    // hand-wire a three-level path g -> p -> n with u as p's sibling.
    let mut arena: Arena<u32> = Arena::new();
    let g = arena.alloc_sentinel(None);
    let p = arena.alloc_sentinel(Some(g));
    let u = arena.alloc_sentinel(Some(g));
    let n = arena.alloc_sentinel(Some(p));
    let s = arena.alloc_sentinel(Some(p));
    arena.node_mut(g).left = Some(p);
    arena.node_mut(g).right = Some(u);
    arena.node_mut(p).left = Some(n);
    arena.node_mut(p).right = Some(s);

    assert_eq!(arena.grandparent(n), Some(g));
    assert_eq!(arena.uncle(n), Some(u));
    assert_eq!(arena.sibling(n), Some(s));
    assert_eq!(arena.sibling(s), Some(n));
    assert_eq!(arena.sibling(p), Some(u));

    assert_eq!(arena.grandparent(p), None);
    assert_eq!(arena.uncle(p), None);
    assert_eq!(arena.sibling(g), None);

    arena.node_mut(n).value = Some(Value::Owned(42));
    arena.node_mut(n).set_red();
    assert_eq!(arena.has_value(n), true);
    assert_eq!(arena.is_black(Some(n)), false);
}
