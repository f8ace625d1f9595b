//! Document - High-level document API
//!
//! All mutations go through `Document` so observers see them. Structural
//! operations return `Result`; attribute and class writes on a missing or
//! non-element node are ignored.

use crate::observer::ObserverRegistry;
use crate::{
    DOMStringMap, DOMTokenList, DomTree, MutationObserverInit, MutationRecord, NodeData,
    NodeId, ObserverId, Result,
};
use std::collections::HashMap;

/// Options for `Document::focus`
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusOptions {
    /// Do not scroll the focused element into view
    pub prevent_scroll: bool,
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    active_element: Option<NodeId>,
    scrolled_into_view: Option<NodeId>,
    observers: ObserverRegistry,
}

impl Document {
    /// Create a document with `<html><head/><body/></html>`
    pub fn new() -> Self {
        let mut document = Self::empty();
        let html = document.tree.create_element("html");
        let head = document.tree.create_element("head");
        let body = document.tree.create_element("body");

        // Fresh nodes under a fresh root: these inserts cannot fail
        let _ = document.tree.append_child(NodeId::ROOT, html);
        let _ = document.tree.append_child(html, head);
        let _ = document.tree.append_child(html, body);

        document.finalize();
        document
    }

    /// Create an empty document (no structure)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            active_element: None,
            scrolled_into_view: None,
            observers: ObserverRegistry::default(),
        }
    }

    /// Locate `<html>`, `<head>` and `<body>` after the tree was built
    pub fn finalize(&mut self) {
        self.html_element = self.find_child_tag(NodeId::ROOT, "html");
        self.head_element = self.find_child_tag(self.html_element, "head");
        self.body_element = self.find_child_tag(self.html_element, "body");
    }

    fn find_child_tag(&self, parent: NodeId, tag: &str) -> NodeId {
        self.tree.children(parent)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.tag == tag))
            .map(|(id, _)| id)
            .unwrap_or(NodeId::NONE)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable tree access for loaders building detached subtrees.
    /// Mutations made this way are not observed.
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Append `child` to `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.tree.check_insert(parent, child)?;
        self.remove(child)?;
        self.tree.append_child(parent, child)?;
        self.record(MutationRecord::child_list(parent, vec![child], Vec::new()));
        Ok(())
    }

    /// Insert `child` before `reference` under `parent`
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> Result<()> {
        self.tree.check_insert(parent, child)?;
        if reference.is_valid() && self.tree.parent(reference) != Some(parent) {
            return Err(crate::DomError::NotAChild { parent, reference });
        }
        if child == reference {
            return Ok(());
        }
        self.remove(child)?;
        self.tree.insert_before(parent, child, reference)?;
        self.record(MutationRecord::child_list(parent, vec![child], Vec::new()));
        Ok(())
    }

    /// Detach a node (and its subtree) from its parent
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        if self.tree.get(node).is_none() {
            return Err(crate::DomError::NotFound(node));
        }
        let Some(parent) = self.tree.parent(node) else {
            return Ok(());
        };

        // Queue the record while the parent chain is still intact
        self.record(MutationRecord::child_list(parent, Vec::new(), vec![node]));
        self.tree.detach(node);

        if self.active_element.is_some_and(|active| self.tree.is_inclusive_ancestor(node, active)) {
            self.active_element = None;
        }
        Ok(())
    }

    /// Parent of a node
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    /// Direct children
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.children(node).map(|(id, _)| id)
    }

    /// Descendants in document order (excluding `node`)
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.descendants(node).map(|(id, _)| id)
    }

    /// Ancestors, nearest first (excluding `node`)
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.ancestors(node)
    }

    /// Inclusive containment check
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.is_inclusive_ancestor(ancestor, node)
    }

    /// Whether the node is attached to the document
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(NodeId::ROOT, node)
    }

    /// Nearest inclusive ancestor element satisfying `pred`
    pub fn closest(&self, node: NodeId, pred: impl Fn(NodeId) -> bool) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .filter(|&id| self.is_element(id))
            .find(|&id| pred(id))
    }

    /// Descendant elements of `scope` carrying `name`, in document order
    pub fn elements_with_attribute(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.tree.descendants(scope)
            .filter(|(_, node)| node.as_element().is_some_and(|e| e.has_attr(name)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Sort nodes into document order and drop duplicates.
    /// Detached nodes sort last.
    pub fn sort_document_order(&self, nodes: &mut Vec<NodeId>) {
        let positions: HashMap<NodeId, usize> = self.tree.descendants(NodeId::ROOT)
            .enumerate()
            .map(|(pos, (id, _))| (id, pos))
            .collect();
        nodes.sort_by_key(|id| (positions.get(id).copied().unwrap_or(usize::MAX), *id));
        nodes.dedup();
    }

    /// Check that the node is an element
    pub fn is_element(&self, node: NodeId) -> bool {
        self.tree.get(node).is_some_and(|n| n.is_element())
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tree.get(node)?.as_element().map(|e| e.tag.as_str())
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(text) = self.tree.get(node).and_then(|n| n.as_text()) {
            return text.to_string();
        }
        self.tree.descendants(node)
            .filter_map(|(_, n)| n.as_text())
            .collect()
    }

    /// Replace the data of a text node
    pub fn set_text(&mut self, node: NodeId, content: &str) {
        let Some(NodeData::Text(text)) = self.tree.get_mut(node).map(|n| &mut n.data) else {
            return;
        };
        let old = std::mem::replace(text, content.to_string());
        self.record(MutationRecord::character_data(node, old));
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(NodeId::ROOT)
            .find(|(_, node)| node.as_element().and_then(|e| e.id()) == Some(id))
            .map(|(node_id, _)| node_id)
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Get an attribute value
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree.get(node)?.as_element()?.get_attr(name)
    }

    /// Check attribute presence
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(elem) = self.tree.get_mut(node).and_then(|n| n.as_element_mut()) else {
            return;
        };
        let old = elem.set_attr(name, value);
        self.record(MutationRecord::attribute(node, name, old));
    }

    /// Remove an attribute (no record when it was absent)
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        let Some(elem) = self.tree.get_mut(node).and_then(|n| n.as_element_mut()) else {
            return;
        };
        if let Some(old) = elem.remove_attr(name) {
            self.record(MutationRecord::attribute(node, name, Some(old)));
        }
    }

    /// Parsed `class` attribute
    pub fn class_list(&self, node: NodeId) -> DOMTokenList {
        DOMTokenList::from_string(self.attribute(node, "class").unwrap_or(""))
    }

    /// Check a class
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_list(node).contains(class)
    }

    /// Add a class
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let mut list = self.class_list(node);
        if list.add(class) {
            self.set_attribute(node, "class", &list.value());
        }
    }

    /// Remove a class
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        let mut list = self.class_list(node);
        if list.remove(class) {
            self.set_attribute(node, "class", &list.value());
        }
    }

    /// Toggle a class; returns whether it is present afterwards
    pub fn toggle_class(&mut self, node: NodeId, class: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.has_class(node, class));
        if present {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
        present
    }

    /// `data-*` attributes of an element
    pub fn dataset(&self, node: NodeId) -> DOMStringMap {
        self.tree.get(node)
            .and_then(|n| n.as_element())
            .map(|e| DOMStringMap::from_attributes(&e.attrs))
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Focus a connected element. Returns false if it cannot take focus.
    pub fn focus(&mut self, node: NodeId, options: FocusOptions) -> bool {
        if !self.is_element(node) || !self.is_connected(node) {
            return false;
        }
        self.active_element = Some(node);
        if !options.prevent_scroll {
            self.scrolled_into_view = Some(node);
        }
        true
    }

    /// Drop focus
    pub fn blur(&mut self) {
        self.active_element = None;
    }

    /// Currently focused element
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Last element a focus call scrolled into view
    pub fn scrolled_into_view(&self) -> Option<NodeId> {
        self.scrolled_into_view
    }

    // ------------------------------------------------------------------
    // Mutation observation
    // ------------------------------------------------------------------

    /// Start observing `target`
    pub fn observe(&mut self, target: NodeId, options: MutationObserverInit) -> ObserverId {
        self.observers.observe(target, options)
    }

    /// Stop an observer; pending records are dropped
    pub fn disconnect(&mut self, observer: ObserverId) -> bool {
        self.observers.disconnect(observer)
    }

    /// Drain the records queued for an observer
    pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.observers.take_records(observer)
    }

    /// Whether an observer has queued records
    pub fn has_records(&self, observer: ObserverId) -> bool {
        self.observers.has_records(observer)
    }

    fn record(&mut self, record: MutationRecord) {
        if self.observers.is_empty() {
            return;
        }
        let path: Vec<NodeId> = std::iter::once(record.target)
            .chain(self.tree.ancestors(record.target))
            .collect();
        // Only connected targets are observable
        if path.last() != Some(&NodeId::ROOT) {
            return;
        }
        tracing::trace!("mutation {:?} on {:?}", record.mutation_type, record.target);
        self.observers.notify(record, &path);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MutationType;

    #[test]
    fn test_structure() {
        let doc = Document::new();
        assert!(doc.body().is_valid());
        assert_eq!(doc.tag_name(doc.body()), Some("body"));
        assert_eq!(doc.parent(doc.head()), Some(doc.document_element()));
    }

    #[test]
    fn test_class_helpers_skip_redundant_writes() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div).unwrap();
        let observer = doc.observe(doc.body(), MutationObserverInit::everything());

        doc.add_class(div, "is-active");
        doc.add_class(div, "is-active");
        doc.remove_class(div, "missing");

        assert!(doc.has_class(div, "is-active"));
        assert_eq!(doc.take_records(observer).len(), 1);
    }

    #[test]
    fn test_detached_mutations_not_recorded() {
        let mut doc = Document::new();
        let observer = doc.observe(doc.root(), MutationObserverInit::everything());
        let div = doc.create_element("div");
        let span = doc.create_element("span");

        doc.append_child(div, span).unwrap();
        doc.set_attribute(span, "data-is", "carousel");
        assert!(!doc.has_records(observer));

        doc.append_child(doc.body(), div).unwrap();
        let records = doc.take_records(observer);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mutation_type, MutationType::ChildList);
        assert_eq!(records[0].added_nodes, vec![div]);
    }

    #[test]
    fn test_remove_records_and_clears_focus() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let button = doc.create_element("button");
        doc.append_child(doc.body(), div).unwrap();
        doc.append_child(div, button).unwrap();
        assert!(doc.focus(button, FocusOptions::default()));

        let observer = doc.observe(doc.body(), MutationObserverInit::everything());
        doc.remove(div).unwrap();

        let records = doc.take_records(observer);
        assert_eq!(records[0].removed_nodes, vec![div]);
        assert_eq!(doc.active_element(), None);
        assert!(!doc.is_connected(button));
        assert!(!doc.focus(button, FocusOptions::default()));
    }

    #[test]
    fn test_focus_prevent_scroll() {
        let mut doc = Document::new();
        let a = doc.create_element("button");
        let b = doc.create_element("button");
        doc.append_child(doc.body(), a).unwrap();
        doc.append_child(doc.body(), b).unwrap();

        doc.focus(a, FocusOptions::default());
        doc.focus(b, FocusOptions { prevent_scroll: true });

        assert_eq!(doc.active_element(), Some(b));
        assert_eq!(doc.scrolled_into_view(), Some(a));
    }

    #[test]
    fn test_sort_document_order() {
        let mut doc = Document::new();
        let first = doc.create_element("p");
        let second = doc.create_element("p");
        let detached = doc.create_element("p");
        doc.append_child(doc.body(), first).unwrap();
        doc.append_child(doc.body(), second).unwrap();

        let mut nodes = vec![detached, second, first, second];
        doc.sort_document_order(&mut nodes);
        assert_eq!(nodes, vec![first, second, detached]);
    }
}
