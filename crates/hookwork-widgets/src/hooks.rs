//! Element Cache
//!
//! Hooked descendants of a root grouped by role. `data-hook-<kind>="<role>"`
//! puts an element into a role; a role with one element stays a single
//! reference and becomes an ordered list once a second element shares it.
//! The root itself is cached under `"self"`.

use crate::hook_attribute;
use hookwork_dom::{Document, NodeId};
use std::collections::BTreeMap;

/// Role under which the root is cached
pub const SELF_ROLE: &str = "self";

/// Elements sharing one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Single(NodeId),
    Many(Vec<NodeId>),
}

impl Role {
    /// Elements in document order
    pub fn as_slice(&self) -> &[NodeId] {
        match self {
            Role::Single(node) => std::slice::from_ref(node),
            Role::Many(nodes) => nodes,
        }
    }

    pub fn first(&self) -> NodeId {
        self.as_slice()[0]
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.as_slice().get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Index of `node` within the role
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.as_slice().iter().position(|&n| n == node)
    }

    fn push(&mut self, node: NodeId) {
        match self {
            Role::Single(first) => *self = Role::Many(vec![*first, node]),
            Role::Many(nodes) => nodes.push(node),
        }
    }
}

/// Hooked elements of one root, by role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookMap {
    roles: BTreeMap<String, Role>,
}

impl HookMap {
    /// Cache the hooks of `root` for `kind`.
    ///
    /// A hook belongs to `root` only if no other root of the same kind sits
    /// between them; `is_root` identifies those other roots.
    pub fn scan(document: &Document, root: NodeId, kind: &str, is_root: impl Fn(NodeId) -> bool) -> Self {
        let mut map = HookMap::default();
        map.insert(SELF_ROLE, root);

        let attr = hook_attribute(kind);
        for node in document.elements_with_attribute(root, &attr) {
            let owner = document.ancestors(node).find(|&a| a == root || is_root(a));
            if owner != Some(root) {
                continue;
            }
            match document.attribute(node, &attr) {
                Some(role) if !role.is_empty() && role != SELF_ROLE => map.insert(role, node),
                _ => tracing::trace!("ignoring unnamed hook {:?}", node),
            }
        }

        tracing::trace!("cached {} roles for {} root {:?}", map.roles.len(), kind, root);
        map
    }

    fn insert(&mut self, role: &str, node: NodeId) {
        match self.roles.get_mut(role) {
            Some(existing) => existing.push(node),
            None => {
                self.roles.insert(role.to_string(), Role::Single(node));
            }
        }
    }

    pub fn get(&self, role: &str) -> Option<&Role> {
        self.roles.get(role)
    }

    /// Elements of `role`; empty when the role is absent
    pub fn nodes(&self, role: &str) -> &[NodeId] {
        self.get(role).map(Role::as_slice).unwrap_or_default()
    }

    /// First element of `role`
    pub fn first(&self, role: &str) -> Option<NodeId> {
        self.get(role).map(Role::first)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.first(SELF_ROLE)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(doc: &mut Document, parent: NodeId, hook: Option<&str>) -> NodeId {
        let id = doc.create_element("div");
        doc.append_child(parent, id).unwrap();
        if let Some(role) = hook {
            doc.set_attribute(id, "data-hook-accordion", role);
        }
        id
    }

    #[test]
    fn test_single_then_many() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = child(&mut doc, body, None);
        let button = child(&mut doc, root, Some("button"));
        let a = child(&mut doc, root, Some("item"));
        let b = child(&mut doc, root, Some("item"));

        let hooks = HookMap::scan(&doc, root, "accordion", |_| false);
        assert_eq!(hooks.get("button"), Some(&Role::Single(button)));
        assert_eq!(hooks.get("item"), Some(&Role::Many(vec![a, b])));
        assert_eq!(hooks.root(), Some(root));
        assert!(hooks.nodes("panel").is_empty());
    }

    #[test]
    fn test_other_kind_ignored() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = child(&mut doc, body, None);
        let foreign = child(&mut doc, root, None);
        doc.set_attribute(foreign, "data-hook-carousel", "item");

        let hooks = HookMap::scan(&doc, root, "accordion", |_| false);
        assert!(!hooks.contains("item"));
    }

    #[test]
    fn test_nested_root_claims_its_hooks() {
        let mut doc = Document::new();
        let body = doc.body();
        let outer = child(&mut doc, body, None);
        let outer_item = child(&mut doc, outer, Some("item"));
        let inner = child(&mut doc, outer_item, None);
        let inner_item = child(&mut doc, inner, Some("item"));

        let outer_hooks = HookMap::scan(&doc, outer, "accordion", |n| n == inner);
        assert_eq!(outer_hooks.nodes("item"), [outer_item]);

        let inner_hooks = HookMap::scan(&doc, inner, "accordion", |n| n == inner || n == outer);
        assert_eq!(inner_hooks.nodes("item"), [inner_item]);
    }

    #[test]
    fn test_role_position() {
        let role = Role::Many(vec![NodeId::from_raw(4), NodeId::from_raw(9)]);
        assert_eq!(role.position(NodeId::from_raw(9)), Some(1));
        assert_eq!(role.get(2), None);
        assert_eq!(role.len(), 2);
        assert!(!role.is_empty());
        assert!(Role::Many(Vec::new()).is_empty());
        assert!(!Role::Single(NodeId::from_raw(1)).is_empty());
    }
}
