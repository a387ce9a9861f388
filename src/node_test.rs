use std::sync::Arc;

use super::*;

#[test]
fn test_rbset_node() {
    let mut node: Node<u32> = Node::new_sentinel(None);
    assert_eq!(node.is_sentinel(), true);
    assert_eq!(node.is_black(), true);
    assert_eq!(node.to_color(), Color::Black);
    assert_eq!(node.as_value(), None);
    assert_eq!(node.left.is_none(), true);
    assert_eq!(node.right.is_none(), true);

    node.value = Some(Value::Owned(10));
    node.set_red();
    assert_eq!(node.is_sentinel(), false);
    assert_eq!(node.is_black(), false);
    assert_eq!(node.to_color(), Color::Red);
    assert_eq!(node.as_value(), Some(&10));

    node.set_black();
    assert_eq!(node.is_black(), true);
    node.set_red();
    assert_eq!(node.is_black(), false);
}

#[test]
fn test_rbset_value() {
    let owned: Value<u32> = Value::Owned(10);
    assert_eq!(owned.is_owned(), true);
    assert_eq!(owned.as_value(), &10);
    assert_eq!(*owned, 10);

    let payload = Arc::new(10_u32);
    let shared: Value<u32> = Value::Shared(Arc::clone(&payload));
    assert_eq!(shared.is_owned(), false);
    assert_eq!(shared.as_value(), &10);
    assert_eq!(Arc::strong_count(&payload), 2);

    assert_eq!(owned, shared);

    std::mem::drop(shared);
    assert_eq!(Arc::strong_count(&payload), 1);
}
