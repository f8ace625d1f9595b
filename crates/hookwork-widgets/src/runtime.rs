//! Widget runtime
//!
//! Owns the document, the host capabilities, the listener table and every
//! mounted instance. Work runs to completion on the caller's thread: each
//! event, timer or message is handled, then pending mutation records and
//! channel messages are flushed until the page settles.

use crate::attributes::read_options;
use crate::command::CommandEnvelope;
use crate::component::{Component, ComponentDefinition, Cx, InstanceId, Mount};
use crate::events::{Key, ListenerTable, UiEvent};
use crate::hooks::HookMap;
use crate::options;
use crate::registrar::RegistrationService;
use crate::{Config, RuntimeError, IDENTITY_ATTR, MARKER_ATTR};
use hookwork_dom::{Document, NodeId};
use hookwork_host::{Host, OwnerId, VisibilityState};
use std::collections::{BTreeMap, HashSet};

/// A mounted instance. The component is taken out while it runs.
#[derive(Debug)]
struct Slot {
    kind: &'static str,
    root: NodeId,
    component: Option<Box<dyn Component>>,
}

/// Widget runtime
#[derive(Debug)]
pub struct Runtime {
    config: Config,
    document: Document,
    host: Host,
    listeners: ListenerTable,
    services: Vec<RegistrationService>,
    instances: BTreeMap<InstanceId, Slot>,
    next_instance: u32,
}

impl Runtime {
    pub fn new(config: Config, document: Document, host: Host) -> Self {
        Self {
            config,
            document,
            host,
            listeners: ListenerTable::new(),
            services: Vec::new(),
            instances: BTreeMap::new(),
            next_instance: 0,
        }
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register a component kind
    pub fn define(&mut self, definition: ComponentDefinition) -> Result<(), RuntimeError> {
        if self.is_defined(definition.kind) {
            return Err(RuntimeError::AlreadyDefined(definition.kind.to_string()));
        }
        self.services.push(RegistrationService::new(definition));
        tracing::debug!("Defined component {}", definition.kind);
        Ok(())
    }

    pub fn is_defined(&self, kind: &str) -> bool {
        self.services.iter().any(|s| s.kind() == kind)
    }

    pub fn is_running(&self, kind: &str) -> bool {
        self.services.iter().any(|s| s.kind() == kind && s.is_running())
    }

    fn service_index(&self, kind: &str) -> Result<usize, RuntimeError> {
        self.services.iter()
            .position(|s| s.kind() == kind)
            .ok_or_else(|| RuntimeError::UnknownKind(kind.to_string()))
    }

    /// Start observing for `kind` and construct every root already in the
    /// document. Returns the number of instances constructed.
    pub fn start(&mut self, kind: &str) -> Result<usize, RuntimeError> {
        let idx = self.service_index(kind)?;
        if !self.services[idx].start(&mut self.document) {
            return Ok(0);
        }
        self.discover(kind)
    }

    /// Start every defined kind
    pub fn start_all(&mut self) -> Result<usize, RuntimeError> {
        let kinds: Vec<&'static str> = self.services.iter().map(|s| s.kind()).collect();
        let mut constructed = 0;
        for kind in kinds {
            constructed += self.start(kind)?;
        }
        Ok(constructed)
    }

    /// Stop observing for `kind`. Mounted instances keep running.
    pub fn stop(&mut self, kind: &str) -> Result<(), RuntimeError> {
        let idx = self.service_index(kind)?;
        self.services[idx].stop(&mut self.document);
        Ok(())
    }

    /// Construct every marked root of `kind` currently in the document
    pub fn discover(&mut self, kind: &str) -> Result<usize, RuntimeError> {
        let idx = self.service_index(kind)?;
        let definition = *self.services[idx].definition();
        let roots = self.services[idx].scan(&self.document);

        let constructed = roots.into_iter()
            .filter_map(|root| self.construct(&definition, root))
            .count();
        tracing::debug!("Discovered {} {} roots", constructed, kind);

        self.flush()?;
        Ok(constructed)
    }

    fn construct(&mut self, definition: &ComponentDefinition, root: NodeId) -> Option<InstanceId> {
        let kind = definition.kind;
        if !self.document.is_connected(root) || self.document.attribute(root, MARKER_ATTR) != Some(kind) {
            return None;
        }
        if self.instance_on(root, kind).is_some() {
            tracing::trace!("{} already mounted on {:?}", kind, root);
            return None;
        }

        self.document.remove_attribute(root, MARKER_ATTR);
        let raw = read_options(&self.document, root);
        let properties = options::resolve(definition.schema, &raw);

        let elements = {
            let document = &self.document;
            let mounted: HashSet<NodeId> = self.instances.values()
                .filter(|slot| slot.kind == kind)
                .map(|slot| slot.root)
                .collect();
            HookMap::scan(document, root, kind, |node| {
                definition.nestable
                    && (mounted.contains(&node) || document.attribute(node, MARKER_ATTR) == Some(kind))
            })
        };

        self.next_instance += 1;
        let id = OwnerId(self.next_instance);
        let component = {
            let mut cx = Cx::new(id, &mut self.document, &mut self.host, &mut self.listeners, &self.config.message_topic);
            (definition.mount)(Mount { root, properties, elements }, &mut cx)
        };
        self.instances.insert(id, Slot { kind, root, component: Some(component) });

        tracing::debug!("Constructed {} {:?} on {:?}", kind, id, root);
        Some(id)
    }

    /// Dispose one instance: its own teardown first, then every listener,
    /// timer and subscription it holds
    pub fn dispose(&mut self, id: InstanceId) -> bool {
        let Some(mut slot) = self.instances.remove(&id) else {
            return false;
        };
        if let Some(component) = slot.component.as_mut() {
            let mut cx = Cx::new(id, &mut self.document, &mut self.host, &mut self.listeners, &self.config.message_topic);
            component.dispose(&mut cx);
        }
        let listeners = self.listeners.remove_owner(id);
        self.host.release(id);

        tracing::debug!("Disposed {} {:?} ({} listeners)", slot.kind, id, listeners);
        true
    }

    /// Dispose every instance whose root left the document
    pub fn dispose_detached(&mut self) -> usize {
        self.dispose_detached_where(|_| true)
    }

    fn dispose_detached_where(&mut self, pred: impl Fn(&str) -> bool) -> usize {
        let detached: Vec<InstanceId> = self.instances.iter()
            .filter(|(_, slot)| pred(slot.kind) && !self.document.is_connected(slot.root))
            .map(|(&id, _)| id)
            .collect();
        for &id in &detached {
            self.dispose(id);
        }
        detached.len()
    }

    // ------------------------------------------------------------------
    // Flushing
    // ------------------------------------------------------------------

    /// Process pending mutation records and channel messages until nothing
    /// is left
    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        for _ in 0..self.config.flush_limit {
            let mut progressed = false;

            for idx in 0..self.services.len() {
                let records = self.services[idx].take_records(&mut self.document);
                if records.is_empty() {
                    continue;
                }
                progressed = true;

                let definition = *self.services[idx].definition();
                if self.config.dispose_on_removal && RegistrationService::has_removals(&records) {
                    self.dispose_detached_where(|kind| kind == definition.kind);
                }
                for root in self.services[idx].candidates(&self.document, &records) {
                    self.construct(&definition, root);
                }
            }

            if self.deliver_messages() > 0 {
                progressed = true;
            }
            if !progressed {
                return Ok(());
            }
        }

        tracing::debug!("Flush gave up after {} passes", self.config.flush_limit);
        Err(RuntimeError::FlushLimit(self.config.flush_limit))
    }

    fn deliver_messages(&mut self) -> usize {
        let deliveries = match self.host.channel.as_mut() {
            Some(channel) => channel.drain(),
            None => return 0,
        };

        let mut delivered = 0;
        for delivery in deliveries {
            let Some(envelope) = CommandEnvelope::parse(&delivery.data) else {
                continue;
            };
            let Some(slot) = self.instances.get(&delivery.subscriber) else {
                continue;
            };
            let identity = self.document.attribute(slot.root, IDENTITY_ATTR);
            let Some(command) = envelope.command_for(slot.kind, identity) else {
                continue;
            };

            tracing::debug!("Delivering {:?} to {:?}", command, delivery.subscriber);
            self.with_component(delivery.subscriber, |component, cx| component.handle_command(&command, cx));
            delivered += 1;
        }
        delivered
    }

    fn with_component<R>(
        &mut self,
        id: InstanceId,
        f: impl FnOnce(&mut dyn Component, &mut Cx<'_>) -> R,
    ) -> Option<R> {
        let mut component = self.instances.get_mut(&id)?.component.take()?;
        let result = {
            let mut cx = Cx::new(id, &mut self.document, &mut self.host, &mut self.listeners, &self.config.message_topic);
            f(component.as_mut(), &mut cx)
        };
        if let Some(slot) = self.instances.get_mut(&id) {
            slot.component = Some(component);
        }
        Some(result)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Dispatch an event along its propagation path, then flush
    pub fn dispatch(&mut self, mut event: UiEvent) -> Result<UiEvent, RuntimeError> {
        if !self.document.is_connected(event.target) {
            return Err(RuntimeError::NotConnected(event.target));
        }

        let path: Vec<NodeId> = if event.kind.bubbles() {
            std::iter::once(event.target).chain(self.document.ancestors(event.target)).collect()
        } else {
            vec![event.target]
        };

        for node in path {
            event.current_target = node;
            for listener in self.listeners.listeners(node, event.kind) {
                let ran = self.with_component(listener.owner, |component, cx| {
                    component.handle_event(listener.handler, &mut event, cx)
                });
                if ran.is_some() {
                    event.count_invocation();
                }
            }
            if event.propagation_stopped() {
                break;
            }
        }

        tracing::trace!("{:?} on {:?}: {} handlers", event.kind, event.target, event.invocations());
        self.flush()?;
        Ok(event)
    }

    pub fn click(&mut self, target: NodeId) -> Result<UiEvent, RuntimeError> {
        self.dispatch(UiEvent::click(target))
    }

    pub fn key_down(&mut self, target: NodeId, key: Key) -> Result<UiEvent, RuntimeError> {
        self.dispatch(UiEvent::key_down(target, key))
    }

    pub fn mouse_enter(&mut self, target: NodeId) -> Result<UiEvent, RuntimeError> {
        self.dispatch(UiEvent::mouse_enter(target))
    }

    pub fn mouse_leave(&mut self, target: NodeId) -> Result<UiEvent, RuntimeError> {
        self.dispatch(UiEvent::mouse_leave(target))
    }

    /// Move the virtual clock forward, running every timer that falls due.
    /// Returns the number of timers run.
    pub fn advance(&mut self, ms: u64) -> Result<usize, RuntimeError> {
        let target = self.host.timers.now().saturating_add(ms);
        let mut fired = 0;

        while let Some(timer) = self.host.timers.pop_due(target) {
            fired += 1;
            if fired > self.config.timer_step_limit {
                return Err(RuntimeError::TimerStepLimit(self.config.timer_step_limit));
            }
            tracing::trace!("Timer {:?} fired at {}ms", timer.id, timer.due_at);
            self.with_component(timer.owner, |component, cx| component.handle_timer(timer.id, cx));
            self.flush()?;
        }

        self.host.timers.set_now(target);
        Ok(fired)
    }

    /// Change page visibility. Returns true if the state changed.
    pub fn set_visibility(&mut self, state: VisibilityState) -> bool {
        let now = self.host.timers.now();
        self.host.visibility.set_state(state, now)
    }

    /// Post `data` on the command topic and deliver it. Returns false when
    /// the host has no message channel.
    pub fn post_message(&mut self, data: &str) -> Result<bool, RuntimeError> {
        let Some(channel) = self.host.channel.as_mut() else {
            return Ok(false);
        };
        channel.post(&self.config.message_topic, data);
        self.flush()?;
        Ok(true)
    }

    /// Remove `node` from the document, then flush
    pub fn remove(&mut self, node: NodeId) -> Result<(), RuntimeError> {
        self.document.remove(node)?;
        self.flush()
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document access; call `flush` afterwards to react
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    pub fn now(&self) -> u64 {
        self.host.timers.now()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Instances of `kind`, in construction order
    pub fn instances_of(&self, kind: &str) -> Vec<InstanceId> {
        self.instances.iter()
            .filter(|(_, slot)| slot.kind == kind)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Instance of `kind` mounted on `root`
    pub fn instance_on(&self, root: NodeId, kind: &str) -> Option<InstanceId> {
        self.instances.iter()
            .find(|(_, slot)| slot.root == root && slot.kind == kind)
            .map(|(&id, _)| id)
    }

    pub fn component(&self, id: InstanceId) -> Option<&dyn Component> {
        self.instances.get(&id)?.component.as_deref()
    }

    /// Typed view of the instance mounted on `root`
    pub fn instance<T: Component>(&self, root: NodeId) -> Option<&T> {
        self.instances.values()
            .filter(|slot| slot.root == root)
            .filter_map(|slot| slot.component.as_deref())
            .find_map(|component| component.as_any().downcast_ref::<T>())
    }
}
