//! Component lifecycle
//!
//! A component definition names a kind, its option schema and a mount
//! function. Mounted instances receive their resolved options and cached
//! hooks once, then react to events, timers and remote commands through a
//! `Cx` that lends them the document and host for the duration of a call.

use crate::command::RemoteCommand;
use crate::events::{EventKind, HandlerId, ListenerTable, UiEvent};
use crate::hooks::HookMap;
use crate::options::{OptionSpec, Properties};
use hookwork_dom::{Document, FocusOptions, NodeId};
use hookwork_host::{Host, MediaError, OwnerId, TimerId};
use std::any::Any;
use std::fmt;

/// Identity of a mounted widget instance
pub type InstanceId = OwnerId;

/// A mounted widget
pub trait Component: fmt::Debug + Any {
    fn kind(&self) -> &'static str;

    fn root(&self) -> NodeId;

    /// Run the handler registered under `handler`
    fn handle_event(&mut self, handler: HandlerId, event: &mut UiEvent, cx: &mut Cx<'_>);

    fn handle_timer(&mut self, _timer: TimerId, _cx: &mut Cx<'_>) {}

    fn handle_command(&mut self, _command: &RemoteCommand, _cx: &mut Cx<'_>) {}

    /// Called once before the instance is dropped. Listeners, timers and
    /// subscriptions are released by the runtime afterwards.
    fn dispose(&mut self, _cx: &mut Cx<'_>) {}

    fn as_any(&self) -> &dyn Any;
}

/// Everything a component receives at mount time
#[derive(Debug, Clone)]
pub struct Mount {
    pub root: NodeId,
    pub properties: Properties,
    pub elements: HookMap,
}

pub type MountFn = fn(Mount, &mut Cx<'_>) -> Box<dyn Component>;

/// Registered component kind
#[derive(Debug, Clone, Copy)]
pub struct ComponentDefinition {
    pub kind: &'static str,
    pub schema: &'static [OptionSpec],
    /// Roots of this kind may contain roots of the same kind
    pub nestable: bool,
    pub mount: MountFn,
}

/// Per-call context lent to a component
pub struct Cx<'a> {
    instance: InstanceId,
    pub document: &'a mut Document,
    pub host: &'a mut Host,
    listeners: &'a mut ListenerTable,
    topic: &'a str,
}

impl<'a> Cx<'a> {
    pub(crate) fn new(
        instance: InstanceId,
        document: &'a mut Document,
        host: &'a mut Host,
        listeners: &'a mut ListenerTable,
        topic: &'a str,
    ) -> Self {
        Self { instance, document, host, listeners, topic }
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Register `handler` for `kind` events on `node`
    pub fn listen(&mut self, node: NodeId, kind: EventKind, handler: HandlerId) {
        if !self.document.is_element(node) {
            return;
        }
        if !self.listeners.add(node, kind, self.instance, handler) {
            tracing::trace!("listener {:?} already bound on {:?}", handler, node);
        }
    }

    pub fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        self.host.timers.set_timeout(self.instance, delay_ms)
    }

    pub fn clear_timeout(&mut self, timer: TimerId) {
        self.host.timers.clear(timer);
    }

    pub fn now(&self) -> u64 {
        self.host.timers.now()
    }

    pub fn is_page_hidden(&self) -> bool {
        self.host.visibility.is_hidden()
    }

    pub fn focus(&mut self, node: NodeId, prevent_scroll: bool) -> bool {
        self.document.focus(node, FocusOptions { prevent_scroll })
    }

    pub fn restart_media(&mut self, element: NodeId) -> Result<(), MediaError> {
        self.host.media.restart(element)
    }

    /// Subscribe this instance to remote commands. Returns false when the
    /// host has no message channel.
    pub fn subscribe_commands(&mut self) -> bool {
        match self.host.channel.as_mut() {
            Some(channel) => {
                channel.subscribe(self.topic, self.instance);
                true
            }
            None => false,
        }
    }
}
