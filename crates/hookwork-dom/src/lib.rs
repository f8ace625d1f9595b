//! hookwork DOM - Document Object Model
//!
//! Arena-backed DOM tree for server-rendered markup:
//! - `NodeId` handles (4 bytes) instead of pointers
//! - attribute, class list and dataset access
//! - focus tracking
//! - mutation observation for connected nodes

mod node;
mod tree;
mod document;
mod classlist;
mod dataset;
mod observer;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children, Descendants, Ancestors};
pub use document::{Document, FocusOptions};
pub use classlist::DOMTokenList;
pub use dataset::DOMStringMap;
pub use observer::{MutationObserverInit, MutationRecord, MutationType, ObserverId};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);
    
    /// Build an ID from a raw arena index
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }
    
    /// Raw arena index
    pub const fn raw(self) -> u32 {
        self.0
    }
    
    /// Check that this is not the `NONE` sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
    
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),
    
    #[error("Cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    
    #[error("Node {reference:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, reference: NodeId },
}

/// Result alias for DOM operations
pub type Result<T> = std::result::Result<T, DomError>;
