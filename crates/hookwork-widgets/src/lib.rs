//! hookwork widgets
//!
//! Declarative widget lifecycle engine. Server-rendered markup marks widget
//! roots with `data-is="<kind>"`; the runtime discovers them, strips the
//! marker, reads `data-*` options, caches `data-hook-<kind>` descendants by
//! role and mounts one component per root.
//!
//! # Example
//! ```rust,ignore
//! let mut runtime = Runtime::new(Config::default(), document, Host::new());
//! runtime.define(carousel::DEFINITION)?;
//! runtime.start(carousel::KIND)?;
//! runtime.advance(5_000)?;
//! ```

pub mod attributes;
pub mod options;
pub mod hooks;
pub mod events;
pub mod component;
pub mod command;
pub mod carousel;
pub mod accordion;
mod config;
mod registrar;
mod runtime;

pub use attributes::read_options;
pub use options::{OptionDefault, OptionSpec, Properties, Value};
pub use hooks::{HookMap, Role};
pub use events::{EventKind, HandlerId, Key, Listener, ListenerTable, UiEvent};
pub use component::{Component, ComponentDefinition, Cx, InstanceId, Mount};
pub use command::{CommandEnvelope, Operation, RemoteCommand};
pub use carousel::Carousel;
pub use accordion::Accordion;
pub use config::Config;
pub use registrar::RegistrationService;
pub use runtime::Runtime;

use hookwork_dom::{DomError, NodeId};

/// Discovery marker attribute; its value names the component kind
pub const MARKER_ATTR: &str = "data-is";

/// Prefix of hook attributes (`data-hook-<kind>`)
pub const HOOK_PREFIX: &str = "data-hook";

/// Root identity attribute matched by remote commands
pub const IDENTITY_ATTR: &str = "data-id";

/// Hook attribute name for a component kind
pub fn hook_attribute(kind: &str) -> String {
    format!("{HOOK_PREFIX}-{kind}")
}

/// Built-in component definitions
pub const DEFAULT_COMPONENTS: [ComponentDefinition; 2] = [carousel::DEFINITION, accordion::DEFINITION];

/// Runtime errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("Component already defined: {0}")]
    AlreadyDefined(String),
    
    #[error("Unknown component kind: {0}")]
    UnknownKind(String),
    
    #[error("Node is not connected: {0:?}")]
    NotConnected(NodeId),
    
    #[error("Timer step limit exceeded after {0} timers")]
    TimerStepLimit(usize),
    
    #[error("Mutation flush did not settle after {0} passes")]
    FlushLimit(usize),
    
    #[error(transparent)]
    Dom(#[from] DomError),
}
