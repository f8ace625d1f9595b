//! Facade errors

use hookwork_dom::DomError;
use hookwork_html::HtmlError;
use hookwork_widgets::RuntimeError;

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Markup error: {0}")]
    Html(#[from] HtmlError),
    
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
    
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
    
    #[error("No element with id {0:?}")]
    MissingElement(String),
}
