//! Accordion
//!
//! Expandable sections. Each `item` pairs with the `button` and `panel`
//! at the same position. With `data-single-expansion` at most one item is
//! open and the open item's button is disabled. Items declared
//! `data-expanded` start open.

use crate::command::RemoteCommand;
use crate::component::{Component, ComponentDefinition, Cx, Mount};
use crate::events::{EventKind, HandlerId, Key, UiEvent};
use crate::hooks::HookMap;
use crate::options::{OptionSpec, Properties};
use hookwork_dom::{Document, NodeId};
use std::any::Any;
use std::collections::BTreeSet;

pub const KIND: &str = "accordion";

pub const SCHEMA: &[OptionSpec] = &[OptionSpec::flag("singleExpansion")];

pub const DEFINITION: ComponentDefinition = ComponentDefinition {
    kind: KIND,
    schema: SCHEMA,
    nestable: true,
    mount: Accordion::mount,
};

const ITEM: &str = "item";
const BUTTON: &str = "button";
const PANEL: &str = "panel";

/// Item state attribute
pub const EXPANDED_ATTR: &str = "data-expanded";

const EXPANDED_CLASS: &str = "is-expanded";
const DISABLED_CLASS: &str = "is-disabled";
const VISIBLE_CLASS: &str = "is-visible";
const HIDDEN_CLASS: &str = "is-hidden";

const ON_CLICK: HandlerId = HandlerId(1);
const ON_KEY: HandlerId = HandlerId(2);

/// Accordion instance
#[derive(Debug)]
pub struct Accordion {
    root: NodeId,
    properties: Properties,
    elements: HookMap,
    single: bool,
    expanded: BTreeSet<usize>,
}

impl Accordion {
    fn mount(mount: Mount, cx: &mut Cx<'_>) -> Box<dyn Component> {
        let Mount { root, properties, elements } = mount;
        let mut accordion = Accordion {
            root,
            single: properties.flag("singleExpansion"),
            properties,
            elements,
            expanded: BTreeSet::new(),
        };

        for &button in accordion.elements.nodes(BUTTON) {
            cx.listen(button, EventKind::Click, ON_CLICK);
            cx.listen(button, EventKind::KeyDown, ON_KEY);
        }

        let initial = accordion.initial_expansion(cx.document);
        for index in 0..accordion.len() {
            if initial.contains(&index) {
                accordion.expand(index, cx);
            } else {
                accordion.collapse(index, cx);
            }
        }
        cx.subscribe_commands();

        tracing::debug!(
            "accordion {:?}: {} items, single={} expanded={:?}",
            root, accordion.len(), accordion.single, accordion.expanded
        );
        Box::new(accordion)
    }

    /// Declared open items. Single mode keeps the last declared one, or
    /// opens the first item when none is declared.
    fn initial_expansion(&self, document: &Document) -> BTreeSet<usize> {
        let declared: Vec<usize> = self.elements.nodes(ITEM).iter()
            .enumerate()
            .filter(|&(_, &item)| document.has_attribute(item, EXPANDED_ATTR))
            .map(|(i, _)| i)
            .collect();

        if !self.single {
            return declared.into_iter().collect();
        }
        match declared.last() {
            Some(&last) => BTreeSet::from([last]),
            None if self.len() > 0 => BTreeSet::from([0]),
            None => BTreeSet::new(),
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.elements.nodes(ITEM).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn single_expansion(&self) -> bool {
        self.single
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Open item indices, ascending
    pub fn expanded(&self) -> Vec<usize> {
        self.expanded.iter().copied().collect()
    }

    pub fn elements(&self) -> &HookMap {
        &self.elements
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Toggle item `index`. In single mode the item is opened and every
    /// other item closed.
    pub fn toggle(&mut self, index: usize, cx: &mut Cx<'_>) {
        if index >= self.len() {
            tracing::debug!("accordion {:?}: index {} out of range", self.root, index);
            return;
        }
        if self.single {
            self.show_only(index, cx);
        } else if self.is_expanded(index) {
            self.collapse(index, cx);
        } else {
            self.expand(index, cx);
        }
    }

    /// Open item `index` and close every other item
    pub fn show_only(&mut self, index: usize, cx: &mut Cx<'_>) {
        if index >= self.len() {
            return;
        }
        let others: Vec<usize> = self.expanded.iter().copied().filter(|&i| i != index).collect();
        for other in others {
            self.collapse(other, cx);
        }
        self.expand(index, cx);
    }

    fn expand(&mut self, index: usize, cx: &mut Cx<'_>) {
        let Some(item) = self.elements.get(ITEM).and_then(|r| r.get(index)) else {
            return;
        };
        self.expanded.insert(index);
        let document = &mut *cx.document;
        document.set_attribute(item, EXPANDED_ATTR, "");

        if let Some(button) = self.elements.get(BUTTON).and_then(|r| r.get(index)) {
            document.add_class(button, EXPANDED_CLASS);
            document.set_attribute(button, "aria-expanded", "true");
            if self.single {
                document.add_class(button, DISABLED_CLASS);
                document.set_attribute(button, "aria-disabled", "true");
            } else {
                document.remove_class(button, DISABLED_CLASS);
                document.remove_attribute(button, "aria-disabled");
            }
        }
        if let Some(panel) = self.elements.get(PANEL).and_then(|r| r.get(index)) {
            document.set_attribute(panel, "aria-hidden", "false");
            document.add_class(panel, VISIBLE_CLASS);
            document.remove_class(panel, HIDDEN_CLASS);
        }
    }

    fn collapse(&mut self, index: usize, cx: &mut Cx<'_>) {
        let Some(item) = self.elements.get(ITEM).and_then(|r| r.get(index)) else {
            return;
        };
        self.expanded.remove(&index);
        let document = &mut *cx.document;
        document.remove_attribute(item, EXPANDED_ATTR);

        if let Some(button) = self.elements.get(BUTTON).and_then(|r| r.get(index)) {
            document.remove_class(button, EXPANDED_CLASS);
            document.set_attribute(button, "aria-expanded", "false");
            document.remove_class(button, DISABLED_CLASS);
            document.remove_attribute(button, "aria-disabled");
        }
        if let Some(panel) = self.elements.get(PANEL).and_then(|r| r.get(index)) {
            document.set_attribute(panel, "aria-hidden", "true");
            document.add_class(panel, HIDDEN_CLASS);
            document.remove_class(panel, VISIBLE_CLASS);
        }
    }

    fn on_key(&mut self, event: &mut UiEvent, cx: &mut Cx<'_>) {
        let buttons = self.elements.nodes(BUTTON).to_vec();
        let Some(position) = buttons.iter().position(|&b| b == event.current_target) else {
            return;
        };
        let Some(key) = event.key.clone() else {
            return;
        };

        let target = match key {
            Key::ArrowLeft | Key::ArrowUp => position.checked_sub(1),
            Key::ArrowRight | Key::ArrowDown => Some(position + 1).filter(|&i| i < buttons.len()),
            Key::Home => Some(0),
            Key::End => Some(buttons.len() - 1),
            Key::Enter | Key::Space => {
                self.toggle(position, cx);
                Some(position)
            }
            Key::Other(_) => return,
        };
        if let Some(index) = target {
            cx.focus(buttons[index], false);
        }
        event.prevent_default();
    }
}

impl Component for Accordion {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn handle_event(&mut self, handler: HandlerId, event: &mut UiEvent, cx: &mut Cx<'_>) {
        match handler {
            ON_CLICK => {
                let position = self.elements.get(BUTTON).and_then(|r| r.position(event.current_target));
                if let Some(index) = position {
                    self.toggle(index, cx);
                }
            }
            ON_KEY => self.on_key(event, cx),
            _ => {}
        }
    }

    fn handle_command(&mut self, command: &RemoteCommand, cx: &mut Cx<'_>) {
        match *command {
            // Single expansion applies for this toggle only
            RemoteCommand::Navigate { index } => {
                let configured = self.single;
                self.single = true;
                self.toggle(index, cx);
                self.single = configured;
            }
        }
    }

    fn dispose(&mut self, _cx: &mut Cx<'_>) {
        tracing::debug!("accordion {:?} disposed", self.root);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
