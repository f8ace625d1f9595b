//! Edge case tests for hookwork-dom
//!
//! Tree surgery, attribute bookkeeping and observer delivery.

use hookwork_dom::{Document, DomError, FocusOptions, MutationObserverInit, MutationType, NodeId};

fn element(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
    let id = doc.create_element(tag);
    doc.append_child(parent, id).unwrap();
    id
}

// ============================================================================
// TREE STRUCTURE
// ============================================================================

#[test]
fn test_move_node_between_parents() {
    let mut doc = Document::new();
    let body = doc.body();
    let a = element(&mut doc, body, "div");
    let b = element(&mut doc, body, "div");
    let child = element(&mut doc, a, "span");

    doc.append_child(b, child).unwrap();

    assert_eq!(doc.children(a).count(), 0);
    assert_eq!(doc.children(b).collect::<Vec<_>>(), vec![child]);
    assert_eq!(doc.parent(child), Some(b));
}

#[test]
fn test_move_emits_remove_then_add() {
    let mut doc = Document::new();
    let body = doc.body();
    let a = element(&mut doc, body, "div");
    let b = element(&mut doc, body, "div");
    let child = element(&mut doc, a, "span");

    let observer = doc.observe(body, MutationObserverInit::everything());
    doc.append_child(b, child).unwrap();

    let records = doc.take_records(observer);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].target, a);
    assert_eq!(records[0].removed_nodes, vec![child]);
    assert_eq!(records[1].target, b);
    assert_eq!(records[1].added_nodes, vec![child]);
}

#[test]
fn test_cycle_rejected_without_side_effects() {
    let mut doc = Document::new();
    let body = doc.body();
    let outer = element(&mut doc, body, "div");
    let inner = element(&mut doc, outer, "div");

    assert_eq!(
        doc.append_child(inner, outer),
        Err(DomError::HierarchyRequest { parent: inner, child: outer })
    );
    // The failed insert did not detach anything
    assert_eq!(doc.parent(outer), Some(body));
}

#[test]
fn test_insert_before_foreign_reference() {
    let mut doc = Document::new();
    let body = doc.body();
    let list = element(&mut doc, body, "ul");
    let stranger = element(&mut doc, body, "p");
    let item = doc.create_element("li");

    assert_eq!(
        doc.insert_before(list, item, stranger),
        Err(DomError::NotAChild { parent: list, reference: stranger })
    );
    assert!(!doc.is_connected(item));
}

#[test]
fn test_unknown_node() {
    let mut doc = Document::new();
    let ghost = NodeId::from_raw(9_999);
    assert_eq!(doc.remove(ghost), Err(DomError::NotFound(ghost)));
    assert!(!doc.is_connected(ghost));
    assert_eq!(doc.attribute(ghost, "id"), None);

    // Writes to unknown nodes are ignored
    doc.set_attribute(ghost, "id", "x");
    doc.add_class(ghost, "is-active");
}

#[test]
fn test_text_nodes_ignore_attributes() {
    let mut doc = Document::new();
    let body = doc.body();
    let text = doc.create_text("hello");
    doc.append_child(body, text).unwrap();

    doc.set_attribute(text, "class", "x");
    assert_eq!(doc.attribute(text, "class"), None);
    assert_eq!(doc.text_content(body), "hello");
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_elements_with_attribute_document_order() {
    let mut doc = Document::new();
    let body = doc.body();
    let first = element(&mut doc, body, "section");
    let nested = element(&mut doc, first, "div");
    let last = element(&mut doc, body, "section");
    for id in [last, nested, first] {
        doc.set_attribute(id, "data-is", "carousel");
    }

    assert_eq!(doc.elements_with_attribute(doc.root(), "data-is"), vec![first, nested, last]);
    assert_eq!(doc.elements_with_attribute(first, "data-is"), vec![nested]);
}

#[test]
fn test_closest_is_inclusive() {
    let mut doc = Document::new();
    let body = doc.body();
    let root = element(&mut doc, body, "div");
    let button = element(&mut doc, root, "button");
    doc.set_attribute(root, "data-is", "accordion");

    let found = doc.closest(button, |id| doc.has_attribute(id, "data-is"));
    assert_eq!(found, Some(root));
    assert_eq!(doc.closest(root, |id| id == root), Some(root));
}

#[test]
fn test_get_element_by_id() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = element(&mut doc, body, "div");
    doc.set_attribute(div, "id", "hero");

    assert_eq!(doc.get_element_by_id("hero"), Some(div));
    assert_eq!(doc.get_element_by_id("nope"), None);
}

#[test]
fn test_dataset_camel_case() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = element(&mut doc, body, "div");
    doc.set_attribute(div, "data-single-expansion", "");
    doc.set_attribute(div, "title", "x");

    let data = doc.dataset(div);
    assert!(data.has("singleExpansion"));
    assert_eq!(data.len(), 1);
}

// ============================================================================
// OBSERVATION
// ============================================================================

#[test]
fn test_character_data_records_old_value() {
    let mut doc = Document::new();
    let body = doc.body();
    let text = doc.create_text("before");
    doc.append_child(body, text).unwrap();
    let observer = doc.observe(body, MutationObserverInit::everything());

    doc.set_text(text, "after");

    let records = doc.take_records(observer);
    assert_eq!(records[0].mutation_type, MutationType::CharacterData);
    assert_eq!(records[0].old_value.as_deref(), Some("before"));
}

#[test]
fn test_non_subtree_observer_sees_only_target() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = element(&mut doc, body, "div");
    let observer = doc.observe(body, MutationObserverInit {
        child_list: true,
        attributes: true,
        ..Default::default()
    });

    doc.set_attribute(div, "class", "deep");
    assert!(!doc.has_records(observer));

    doc.set_attribute(body, "class", "shallow");
    assert!(doc.has_records(observer));
}

#[test]
fn test_remove_attribute_records_only_when_present() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = element(&mut doc, body, "div");
    doc.set_attribute(div, "data-is", "carousel");
    let observer = doc.observe(body, MutationObserverInit::everything());

    doc.remove_attribute(div, "data-is");
    doc.remove_attribute(div, "data-is");

    let records = doc.take_records(observer);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].old_value.as_deref(), Some("carousel"));
}

#[test]
fn test_focus_requires_connected_element() {
    let mut doc = Document::new();
    let loose = doc.create_element("button");
    assert!(!doc.focus(loose, FocusOptions::default()));
    assert!(!doc.focus(doc.root(), FocusOptions::default()));
    assert_eq!(doc.active_element(), None);
}
