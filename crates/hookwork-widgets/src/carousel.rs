//! Carousel
//!
//! Looping slideshow over `item` hooks with optional `indicator`,
//! `previous`/`next` and `play`/`pause` controls.
//!
//! Options:
//! - `data-autoplay`: advance automatically
//! - `data-delay`: milliseconds between advances (default 5000)
//! - `data-disable-hover-pause`: keep advancing while hovered
//!
//! The active item carries `is-active` and `aria-hidden="false"`; the
//! matching indicator is `aria-selected` and the only one in tab order.

use crate::command::RemoteCommand;
use crate::component::{Component, ComponentDefinition, Cx, Mount};
use crate::events::{EventKind, HandlerId, Key, UiEvent};
use crate::hooks::HookMap;
use crate::options::{OptionSpec, Properties};
use hookwork_dom::{Document, NodeId};
use hookwork_host::TimerId;
use std::any::Any;

pub const KIND: &str = "carousel";

pub const DEFAULT_DELAY_MS: u64 = 5_000;

pub const SCHEMA: &[OptionSpec] = &[
    OptionSpec::flag("autoplay"),
    OptionSpec::positive_number("delay", DEFAULT_DELAY_MS as f64),
    OptionSpec::flag("disableHoverPause"),
];

pub const DEFINITION: ComponentDefinition = ComponentDefinition {
    kind: KIND,
    schema: SCHEMA,
    nestable: false,
    mount: Carousel::mount,
};

// Roles
const ITEM: &str = "item";
const INDICATOR: &str = "indicator";
const PREVIOUS: &str = "previous";
const NEXT: &str = "next";
const PLAY: &str = "play";
const PAUSE: &str = "pause";

const ACTIVE_CLASS: &str = "is-active";
const DISABLED_CLASS: &str = "is-disabled";

const ON_PREVIOUS: HandlerId = HandlerId(1);
const ON_NEXT: HandlerId = HandlerId(2);
const ON_INDICATOR: HandlerId = HandlerId(3);
const ON_PLAY: HandlerId = HandlerId(4);
const ON_PAUSE: HandlerId = HandlerId(5);
const ON_KEY: HandlerId = HandlerId(6);
const ON_HOVER: HandlerId = HandlerId(7);
const ON_LEAVE: HandlerId = HandlerId(8);

/// Carousel instance
#[derive(Debug)]
pub struct Carousel {
    root: NodeId,
    properties: Properties,
    elements: HookMap,
    autoplay: bool,
    delay_ms: u64,
    hover_pause: bool,
    active_index: Option<usize>,
    paused: bool,
    hovered: bool,
    timer: Option<TimerId>,
}

impl Carousel {
    fn mount(mount: Mount, cx: &mut Cx<'_>) -> Box<dyn Component> {
        let Mount { root, properties, elements } = mount;
        let delay_ms = properties.number("delay")
            .map_or(DEFAULT_DELAY_MS, |delay| delay.ceil() as u64);

        let mut carousel = Carousel {
            root,
            autoplay: properties.flag("autoplay"),
            delay_ms,
            hover_pause: !properties.flag("disableHoverPause"),
            properties,
            elements,
            active_index: None,
            paused: false,
            hovered: false,
            timer: None,
        };

        carousel.bind(cx);
        carousel.sync_controls(cx);
        if !carousel.items().is_empty() {
            carousel.show(0, false, cx);
        }
        cx.subscribe_commands();

        tracing::debug!(
            "carousel {:?}: {} items, autoplay={} delay={}ms",
            root, carousel.items().len(), carousel.autoplay, carousel.delay_ms
        );
        Box::new(carousel)
    }

    fn bind(&self, cx: &mut Cx<'_>) {
        let bindings = [
            (PREVIOUS, ON_PREVIOUS),
            (NEXT, ON_NEXT),
            (INDICATOR, ON_INDICATOR),
            (PLAY, ON_PLAY),
            (PAUSE, ON_PAUSE),
        ];
        for (role, handler) in bindings {
            for &node in self.elements.nodes(role) {
                cx.listen(node, EventKind::Click, handler);
            }
        }

        cx.listen(self.root, EventKind::KeyDown, ON_KEY);
        if self.hover_pause {
            cx.listen(self.root, EventKind::MouseEnter, ON_HOVER);
            cx.listen(self.root, EventKind::MouseLeave, ON_LEAVE);
        }
    }

    fn items(&self) -> &[NodeId] {
        self.elements.nodes(ITEM)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn hover_pause(&self) -> bool {
        self.hover_pause
    }

    /// Pending autoplay timer
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn elements(&self) -> &HookMap {
        &self.elements
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Index after the active one, wrapping around
    pub fn next_index(&self) -> Option<usize> {
        let count = self.items().len();
        self.active_index.map(|i| (i + 1) % count)
    }

    /// Index before the active one, wrapping around
    pub fn previous_index(&self) -> Option<usize> {
        let count = self.items().len();
        self.active_index.map(|i| (i + count - 1) % count)
    }

    /// Make item `index` active. Out-of-range indices are ignored.
    pub fn navigate(&mut self, index: usize, cx: &mut Cx<'_>) {
        if index >= self.items().len() {
            tracing::debug!("carousel {:?}: index {} out of range", self.root, index);
            return;
        }
        self.show(index, true, cx);
    }

    fn show(&mut self, index: usize, restart_media: bool, cx: &mut Cx<'_>) {
        self.active_index = Some(index);

        for (i, &item) in self.items().iter().enumerate() {
            set_item_state(cx.document, item, i == index);
        }
        for (i, &indicator) in self.elements.nodes(INDICATOR).iter().enumerate() {
            set_indicator_state(cx.document, indicator, i == index);
        }

        if restart_media {
            if let Some(item) = self.items().get(index).copied() {
                self.restart_media(item, cx);
            }
        }
        self.schedule(cx);
    }

    fn restart_media(&self, item: NodeId, cx: &mut Cx<'_>) {
        let media: Vec<NodeId> = std::iter::once(item)
            .chain(cx.document.descendants(item))
            .filter(|&n| matches!(cx.document.tag_name(n), Some("video" | "audio")))
            .collect();

        for node in media {
            if let Err(err) = cx.restart_media(node) {
                tracing::debug!("carousel {:?}: {}", self.root, err);
            }
        }
    }

    /// Replace the pending autoplay timer, if autoplay may run
    fn schedule(&mut self, cx: &mut Cx<'_>) {
        if let Some(timer) = self.timer.take() {
            cx.clear_timeout(timer);
        }
        let suspended = self.paused || (self.hovered && self.hover_pause);
        if self.autoplay && !suspended && self.items().len() > 1 {
            self.timer = Some(cx.set_timeout(self.delay_ms));
        }
    }

    fn cancel(&mut self, cx: &mut Cx<'_>) {
        if let Some(timer) = self.timer.take() {
            cx.clear_timeout(timer);
        }
    }

    /// Stop autoplay and hand focus to the play control
    pub fn pause(&mut self, cx: &mut Cx<'_>) {
        self.paused = true;
        self.cancel(cx);
        self.sync_controls(cx);
        if let Some(play) = self.elements.first(PLAY) {
            cx.focus(play, false);
        }
    }

    /// Resume autoplay and hand focus to the pause control
    pub fn play(&mut self, cx: &mut Cx<'_>) {
        self.paused = false;
        self.sync_controls(cx);
        if let Some(pause) = self.elements.first(PAUSE) {
            cx.focus(pause, false);
        }
        self.schedule(cx);
    }

    fn sync_controls(&self, cx: &mut Cx<'_>) {
        if let Some(play) = self.elements.first(PLAY) {
            set_control_enabled(cx.document, play, self.paused);
        }
        if let Some(pause) = self.elements.first(PAUSE) {
            set_control_enabled(cx.document, pause, !self.paused);
        }
    }

    fn on_key(&mut self, event: &mut UiEvent, cx: &mut Cx<'_>) {
        let Some(key) = event.key.clone() else {
            return;
        };
        let count = self.items().len();
        match key {
            Key::ArrowLeft | Key::ArrowUp => {
                if let Some(i) = self.previous_index() {
                    self.navigate(i, cx);
                }
            }
            Key::ArrowRight | Key::ArrowDown => {
                if let Some(i) = self.next_index() {
                    self.navigate(i, cx);
                }
            }
            Key::Home if count > 0 => self.navigate(0, cx),
            Key::End if count > 0 => self.navigate(count - 1, cx),
            Key::Space => {
                // Space on an arrow control activates that control instead
                if !self.autoplay || self.is_step_control(event.target) {
                    return;
                }
                if self.paused {
                    self.play(cx);
                } else {
                    self.pause(cx);
                }
            }
            _ => return,
        }
        event.prevent_default();
    }

    fn is_step_control(&self, node: NodeId) -> bool {
        self.elements.nodes(PREVIOUS).contains(&node) || self.elements.nodes(NEXT).contains(&node)
    }

    fn on_indicator(&mut self, indicator: NodeId, cx: &mut Cx<'_>) {
        let Some(index) = self.elements.get(INDICATOR).and_then(|r| r.position(indicator)) else {
            return;
        };
        self.navigate(index, cx);
        cx.focus(indicator, true);
    }
}

impl Component for Carousel {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn handle_event(&mut self, handler: HandlerId, event: &mut UiEvent, cx: &mut Cx<'_>) {
        match handler {
            ON_PREVIOUS => {
                if let Some(i) = self.previous_index() {
                    self.navigate(i, cx);
                }
            }
            ON_NEXT => {
                if let Some(i) = self.next_index() {
                    self.navigate(i, cx);
                }
            }
            ON_INDICATOR => self.on_indicator(event.current_target, cx),
            ON_PLAY => self.play(cx),
            ON_PAUSE => self.pause(cx),
            ON_KEY => self.on_key(event, cx),
            ON_HOVER => {
                self.hovered = true;
                self.pause(cx);
            }
            ON_LEAVE => {
                self.hovered = false;
                self.play(cx);
            }
            _ => {}
        }
    }

    fn handle_timer(&mut self, timer: TimerId, cx: &mut Cx<'_>) {
        if self.timer != Some(timer) {
            return;
        }
        self.timer = None;

        // Hidden pages keep their place; try again after another delay
        if cx.is_page_hidden() {
            tracing::trace!("carousel {:?}: page hidden, re-arming", self.root);
            self.schedule(cx);
            return;
        }
        if let Some(next) = self.next_index() {
            self.navigate(next, cx);
        }
    }

    fn handle_command(&mut self, command: &RemoteCommand, cx: &mut Cx<'_>) {
        match *command {
            RemoteCommand::Navigate { index } => self.navigate(index, cx),
        }
    }

    fn dispose(&mut self, cx: &mut Cx<'_>) {
        self.cancel(cx);
        tracing::debug!("carousel {:?} disposed", self.root);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn aria_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn set_item_state(document: &mut Document, item: NodeId, active: bool) {
    document.toggle_class(item, ACTIVE_CLASS, Some(active));
    document.set_attribute(item, "aria-hidden", aria_bool(!active));
}

fn set_indicator_state(document: &mut Document, indicator: NodeId, active: bool) {
    document.toggle_class(indicator, ACTIVE_CLASS, Some(active));
    document.set_attribute(indicator, "aria-selected", aria_bool(active));
    document.set_attribute(indicator, "tabindex", if active { "0" } else { "-1" });
}

fn set_control_enabled(document: &mut Document, control: NodeId, enabled: bool) {
    document.toggle_class(control, DISABLED_CLASS, Some(!enabled));
    if enabled {
        document.remove_attribute(control, "disabled");
    } else {
        document.set_attribute(control, "disabled", "");
    }
    document.set_attribute(control, "aria-disabled", aria_bool(!enabled));
}
