//! hookwork
//!
//! Declarative widget lifecycle engine. Server-rendered markup declares
//! carousels and accordions through `data-*` attributes; the engine loads
//! the markup, discovers every widget root, wires up its behaviour and keeps
//! watching the page for injected markup.
//!
//! # Example
//! ```rust,ignore
//! use hookwork::{Engine, Config};
//!
//! let engine = Engine::new(Config::default());
//! let mut page = engine.load_html(html)?;
//! page.advance(5_000)?;
//! ```

mod engine;
mod page;
mod error;

pub use engine::Engine;
pub use page::Page;
pub use error::Error;

pub use hookwork_widgets::{
    accordion, carousel, Accordion, Carousel, CommandEnvelope, Component, ComponentDefinition, Config,
    Key, RuntimeError, Runtime, UiEvent,
};
pub use hookwork_host::{EditorChannel, Host, MediaLog, VisibilityState};
pub use hookwork_dom::{Document, NodeId};

// Re-export sub-crates
pub use hookwork_dom as dom;
pub use hookwork_html as html;
pub use hookwork_host as host;
pub use hookwork_widgets as widgets;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
