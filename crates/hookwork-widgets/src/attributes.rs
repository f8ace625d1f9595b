//! Attribute Reader
//!
//! Collects a root's `data-*` options. Keys come back camelCased the way
//! `dataset` exposes them; the discovery marker and hook attributes are
//! reserved and never surface as options.

use crate::{HOOK_PREFIX, MARKER_ATTR};
use hookwork_dom::{DOMStringMap, Document, NodeId};

/// Read the raw option values declared on `element`
pub fn read_options(document: &Document, element: NodeId) -> DOMStringMap {
    let Some(elem) = document.tree().get(element).and_then(|n| n.as_element()) else {
        return DOMStringMap::new();
    };
    DOMStringMap::from_attributes(elem.attrs.iter().filter(|attr| !is_reserved(&attr.name)))
}

fn is_reserved(name: &str) -> bool {
    name == MARKER_ATTR
        || name == HOOK_PREFIX
        || name.strip_prefix(HOOK_PREFIX).is_some_and(|rest| rest.starts_with('-'))
}
