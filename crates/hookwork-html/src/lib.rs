//! hookwork HTML loader
//!
//! Turns server-rendered markup into a `hookwork_dom::Document`, either as
//! a whole page or as a fragment injected under an existing node.

mod parser;

pub use parser::HtmlParser;

use hookwork_dom::{Document, NodeId};

/// Parse a full HTML page
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// Parse `html` as body content and append it under `parent`
pub fn insert_fragment(document: &mut Document, parent: NodeId, html: &str) -> Result<Vec<NodeId>, HtmlError> {
    HtmlParser::new().insert_fragment(document, parent, html)
}

/// Loader errors
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Tree construction failed: {0}")]
    Dom(#[from] hookwork_dom::DomError),

    #[error("Fragment parent {0:?} cannot hold children")]
    InvalidParent(NodeId),
}
