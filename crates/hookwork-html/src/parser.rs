//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the arena DOM. Subtrees are
//! built detached and only then attached, so a fragment insert produces one
//! child-list mutation per top-level node.

use crate::HtmlError;
use hookwork_dom::{Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        let dom = Self::read(html)?;

        let mut document = Document::empty();
        let tree = document.tree_mut();
        for child in dom.document.children.borrow().iter() {
            if let Some(id) = self.build(child, tree)? {
                tree.append_child(NodeId::ROOT, id)?;
            }
        }
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Parse `html` as body content and append the top-level nodes to
    /// `parent`. Returns the inserted nodes in order.
    pub fn insert_fragment(
        &self,
        document: &mut Document,
        parent: NodeId,
        html: &str,
    ) -> Result<Vec<NodeId>, HtmlError> {
        if !document.tree().get(parent).is_some_and(|n| n.is_container()) {
            return Err(HtmlError::InvalidParent(parent));
        }

        // A leading <body> keeps head-ish tags (style, meta, ...) in content
        let dom = Self::read(&format!("<!DOCTYPE html><body>{html}"))?;
        let Some(body) = find_body(&dom.document) else {
            return Ok(Vec::new());
        };

        let mut roots = Vec::new();
        for child in body.children.borrow().iter() {
            if let Some(id) = self.build(child, document.tree_mut())? {
                roots.push(id);
            }
        }
        for &id in &roots {
            document.append_child(parent, id)?;
        }

        tracing::debug!("Inserted {} fragment nodes under {:?}", roots.len(), parent);
        Ok(roots)
    }

    fn read(html: &str) -> Result<RcDom, HtmlError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    /// Build a detached copy of an RcDom subtree
    fn build(&self, handle: &Handle, tree: &mut DomTree) -> Result<Option<NodeId>, HtmlError> {
        let id = match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                // Inter-tag whitespace carries no structure
                if text.trim().is_empty() {
                    return Ok(None);
                }
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(&contents.to_string()),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                    for attr in attrs.borrow().iter() {
                        elem.set_attr(&attr.name.local, &attr.value.to_string());
                    }
                }

                for child in handle.children.borrow().iter() {
                    if let Some(child_id) = self.build(child, tree)? {
                        tree.append_child(id, child_id)?;
                    }
                }
                id
            }
            RcNodeData::Document
            | RcNodeData::Doctype { .. }
            | RcNodeData::ProcessingInstruction { .. } => return Ok(None),
        };
        Ok(Some(id))
    }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = document.children.borrow().iter()
        .find(|h| is_element(h, "html"))
        .cloned()?;
    let body = html.children.borrow().iter()
        .find(|h| is_element(h, "body"))
        .cloned();
    body
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    matches!(&handle.data, RcNodeData::Element { name, .. } if &*name.local == tag)
}
