//! Tests for DOM tree mutation methods: remove_child, insert_before,
//! move_children, insert_text, clone_element.

use marten_dom::{
    Attribute, AttributesMap, DomTree, ElementData, ElementKind, Namespace, NodeId, NodeType,
};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::html(
        ElementKind::from_name(tag),
        tag,
        AttributesMap::new(),
    )))
}

/// Helper to build `div > [a, b, c]` under the root.
fn three_children(tree: &mut DomTree) -> (NodeId, NodeId, NodeId, NodeId) {
    let parent = alloc_element(tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let a = alloc_element(tree, "a");
    let b = alloc_element(tree, "b");
    let c = alloc_element(tree, "i");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);
    (parent, a, b, c)
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = three_children(&mut tree);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_not_a_child_is_noop() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = three_children(&mut tree);
    let stranger = alloc_element(&mut tree, "span");

    tree.remove_child(parent, stranger);

    assert_eq!(tree.children(parent), &[a, b, c]);
}

// ========== append_child ==========

#[test]
fn test_append_child_moves_from_old_parent() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = three_children(&mut tree);
    let other = alloc_element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, other);

    tree.append_child(other, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.children(other), &[b]);
    assert_eq!(tree.parent(b), Some(other));
    assert_eq!(tree.next_sibling(a), Some(c));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = three_children(&mut tree);
    let new = alloc_element(&mut tree, "span");

    tree.insert_before(parent, new, a);

    assert_eq!(tree.children(parent), &[new, a, b, c]);
    assert_eq!(tree.prev_sibling(new), None);
    assert_eq!(tree.next_sibling(new), Some(a));
    assert_eq!(tree.prev_sibling(a), Some(new));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = three_children(&mut tree);
    let new = alloc_element(&mut tree, "span");

    tree.insert_before(parent, new, c);

    assert_eq!(tree.children(parent), &[a, b, new, c]);
    assert_eq!(tree.next_sibling(b), Some(new));
    assert_eq!(tree.prev_sibling(c), Some(new));
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = three_children(&mut tree);
    let new = alloc_element(&mut tree, "span");
    let stranger = alloc_element(&mut tree, "em");

    tree.insert_before(parent, new, stranger);

    assert_eq!(tree.children(parent), &[a, b, c, new]);
}

// ========== move_children ==========

#[test]
fn test_move_children_preserves_order() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = three_children(&mut tree);
    let target = alloc_element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, target);

    tree.move_children(parent, target);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.children(target), &[a, b, c]);
    assert!(tree.children(target).iter().all(|&id| tree.parent(id) == Some(target)));
}

// ========== insert_text ==========

#[test]
fn test_insert_text_merges_with_last_text_child() {
    let mut tree = DomTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);

    let first = tree.insert_text(p, None, "Hello");
    let second = tree.insert_text(p, None, ", world");

    assert_eq!(first, second);
    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.as_text(first), Some("Hello, world"));
}

#[test]
fn test_insert_text_before_reference_merges_with_previous_sibling() {
    let mut tree = DomTree::new();
    let body = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, body);
    let _ = tree.insert_text(body, None, "a");
    let table = alloc_element(&mut tree, "table");
    tree.append_child(body, table);

    let text = tree.insert_text(body, Some(table), "b");

    assert_eq!(tree.children(body), &[text, table]);
    assert_eq!(tree.as_text(text), Some("ab"));
}

#[test]
fn test_insert_text_does_not_merge_across_elements() {
    let mut tree = DomTree::new();
    let body = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, body);
    let _ = tree.insert_text(body, None, "a");
    let br = alloc_element(&mut tree, "br");
    tree.append_child(body, br);
    let _ = tree.insert_text(body, None, "b");

    assert_eq!(tree.children(body).len(), 3);
    assert_eq!(tree.text_content(body), "ab");
}

// ========== clone_element ==========

#[test]
fn test_clone_element_copies_data_not_identity() {
    let mut tree = DomTree::new();
    let attrs: AttributesMap = [Attribute::new("class", "x")].into_iter().collect();
    let b = tree.alloc(NodeType::Element(ElementData::html(ElementKind::B, "b", attrs)));
    tree.append_child(NodeId::ROOT, b);
    let _ = tree.insert_text(b, None, "bold");

    let clone = tree.clone_element(b).expect("b is an element");

    assert_ne!(clone, b);
    assert_eq!(tree.parent(clone), None);
    assert!(tree.children(clone).is_empty());
    let data = tree.as_element(clone).expect("clone is an element");
    assert_eq!(data.kind, ElementKind::B);
    assert_eq!(data.namespace, Namespace::Html);
    assert_eq!(data.attrs.get("class"), Some("x"));
}

#[test]
fn test_clone_element_rejects_text() {
    let mut tree = DomTree::new();
    let text = tree.alloc(NodeType::Text("x".to_string()));
    assert_eq!(tree.clone_element(text), None);
}

// ========== traversal ==========

#[test]
fn test_ancestors_and_descendant_check() {
    let mut tree = DomTree::new();
    let (parent, _, b, _) = three_children(&mut tree);
    let inner = alloc_element(&mut tree, "span");
    tree.append_child(b, inner);

    let chain: Vec<_> = tree.ancestors(inner).collect();
    assert_eq!(chain, vec![b, parent, NodeId::ROOT]);
    assert!(tree.is_descendant_of(inner, parent));
    assert!(!tree.is_descendant_of(parent, inner));
}

#[test]
fn test_document_element_and_body() {
    let mut tree = DomTree::new();
    let comment = tree.alloc(NodeType::Comment("c".to_string()));
    tree.append_child(NodeId::ROOT, comment);
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let head = alloc_element(&mut tree, "head");
    tree.append_child(html, head);
    let body = alloc_element(&mut tree, "body");
    tree.append_child(html, body);

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.find_first(NodeId::ROOT, ElementKind::Head), Some(head));
}
