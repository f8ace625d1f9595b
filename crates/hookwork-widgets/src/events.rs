//! Event listeners
//!
//! Synthetic UI events and the listener table. Listeners are keyed by
//! (node, kind) and point back at the owning widget instance plus a
//! handler id; the runtime dispatches along the ancestor path.

use hookwork_dom::NodeId;
use hookwork_host::OwnerId;
use std::collections::HashMap;

/// Event types the widgets listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    /// Check if this event type bubbles
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventKind::MouseEnter | EventKind::MouseLeave)
    }
}

/// Keyboard key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
    Other(String),
}

impl Key {
    /// Parse a `KeyboardEvent.key` value, accepting legacy names
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            "Enter" => Key::Enter,
            " " | "Spacebar" | "Space" => Key::Space,
            other => Key::Other(other.to_string()),
        }
    }
}

/// A dispatched event
#[derive(Debug, Clone)]
pub struct UiEvent {
    pub kind: EventKind,
    pub target: NodeId,
    pub current_target: NodeId,
    pub key: Option<Key>,
    default_prevented: bool,
    propagation_stopped: bool,
    invocations: usize,
}

impl UiEvent {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            key: None,
            default_prevented: false,
            propagation_stopped: false,
            invocations: 0,
        }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self { key: Some(key), ..Self::new(EventKind::KeyDown, target) }
    }

    pub fn mouse_enter(target: NodeId) -> Self {
        Self::new(EventKind::MouseEnter, target)
    }

    pub fn mouse_leave(target: NodeId) -> Self {
        Self::new(EventKind::MouseLeave, target)
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Number of handlers that ran for this event
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    pub(crate) fn count_invocation(&mut self) {
        self.invocations += 1;
    }
}

/// Handler identifier, meaningful to the owning component only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u16);

/// Registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub owner: OwnerId,
    pub handler: HandlerId,
}

/// Listener table
#[derive(Debug, Default)]
pub struct ListenerTable {
    handlers: HashMap<(NodeId, EventKind), Vec<Listener>>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener; an identical registration is ignored
    pub fn add(&mut self, node: NodeId, kind: EventKind, owner: OwnerId, handler: HandlerId) -> bool {
        let listener = Listener { owner, handler };
        let entry = self.handlers.entry((node, kind)).or_default();
        if entry.contains(&listener) {
            return false;
        }
        entry.push(listener);
        true
    }

    /// Remove every listener of `owner`
    pub fn remove_owner(&mut self, owner: OwnerId) -> usize {
        let mut removed = 0;
        self.handlers.retain(|_, listeners| {
            let before = listeners.len();
            listeners.retain(|l| l.owner != owner);
            removed += before - listeners.len();
            !listeners.is_empty()
        });
        removed
    }

    /// Listeners on `node` for `kind`, in registration order
    pub fn listeners(&self, node: NodeId, kind: EventKind) -> Vec<Listener> {
        self.handlers.get(&(node, kind)).cloned().unwrap_or_default()
    }

    pub fn count(&self, node: NodeId, kind: EventKind) -> usize {
        self.handlers.get(&(node, kind)).map_or(0, Vec::len)
    }

    /// Total listeners held by `owner`
    pub fn count_owner(&self, owner: OwnerId) -> usize {
        self.handlers.values()
            .flatten()
            .filter(|l| l.owner == owner)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
