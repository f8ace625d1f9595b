//! Accordion behaviour tests

use hookwork_dom::NodeId;
use hookwork_host::{EditorChannel, Host};
use hookwork_widgets::{accordion, Accordion, CommandEnvelope, Config, Key, Runtime};

fn markup(count: usize, single: bool, expanded: &[usize]) -> String {
    let items: String = (0..count)
        .map(|i| {
            let state = if expanded.contains(&i) { " data-expanded" } else { "" };
            format!(
                r#"<div id="it{i}" data-hook-accordion="item"{state}>
                    <button id="b{i}" data-hook-accordion="button">Section {i}</button>
                    <div id="p{i}" data-hook-accordion="panel">Body {i}</div>
                </div>"#
            )
        })
        .collect();
    let mode = if single { " data-single-expansion" } else { "" };
    format!(r#"<div id="faq" data-is="accordion" data-id="faq-1"{mode}>{items}</div>"#)
}

fn page(html: &str) -> Runtime {
    let host = Host::new().with_channel(Box::new(EditorChannel::new()));
    let document = hookwork_html::parse(html).unwrap();
    let mut rt = Runtime::new(Config::default(), document, host);
    rt.define(accordion::DEFINITION).unwrap();
    rt.start(accordion::KIND).unwrap();
    rt
}

fn node(rt: &Runtime, id: &str) -> NodeId {
    rt.document().get_element_by_id(id).unwrap()
}

fn faq(rt: &Runtime) -> &Accordion {
    rt.instance::<Accordion>(node(rt, "faq")).unwrap()
}

fn expanded(rt: &Runtime) -> Vec<usize> {
    faq(rt).expanded()
}

// ============================================================================
// INITIALISATION
// ============================================================================

#[test]
fn test_multi_mode_keeps_declared_items() {
    let rt = page(&markup(4, false, &[1, 3]));
    assert_eq!(expanded(&rt), vec![1, 3]);
    assert!(!faq(&rt).single_expansion());
}

#[test]
fn test_multi_mode_nothing_declared() {
    let rt = page(&markup(3, false, &[]));
    assert!(expanded(&rt).is_empty());

    let doc = rt.document();
    assert_eq!(doc.attribute(node(&rt, "b0"), "aria-expanded"), Some("false"));
    assert_eq!(doc.attribute(node(&rt, "p0"), "aria-hidden"), Some("true"));
    assert!(doc.has_class(node(&rt, "p0"), "is-hidden"));
}

#[test]
fn test_single_mode_forces_first_item() {
    let rt = page(&markup(3, true, &[]));
    assert_eq!(expanded(&rt), vec![0]);

    let doc = rt.document();
    let b0 = node(&rt, "b0");
    let p0 = node(&rt, "p0");
    assert!(doc.has_attribute(node(&rt, "it0"), "data-expanded"));
    assert!(doc.has_class(b0, "is-expanded"));
    assert!(doc.has_class(b0, "is-disabled"));
    assert_eq!(doc.attribute(b0, "aria-expanded"), Some("true"));
    assert_eq!(doc.attribute(b0, "aria-disabled"), Some("true"));
    assert_eq!(doc.attribute(p0, "aria-hidden"), Some("false"));
    assert!(doc.has_class(p0, "is-visible"));
    assert!(!doc.has_class(p0, "is-hidden"));
}

#[test]
fn test_single_mode_keeps_last_declared() {
    let rt = page(&markup(5, true, &[1, 3]));
    assert_eq!(expanded(&rt), vec![3]);

    let doc = rt.document();
    assert!(!doc.has_attribute(node(&rt, "it1"), "data-expanded"));
    assert!(doc.has_attribute(node(&rt, "it3"), "data-expanded"));
    assert_eq!(doc.attribute(node(&rt, "b1"), "aria-expanded"), Some("false"));
}

#[test]
fn test_empty_accordion() {
    let rt = page(r#"<div id="faq" data-is="accordion" data-single-expansion></div>"#);
    assert!(faq(&rt).is_empty());
    assert!(expanded(&rt).is_empty());
}

// ============================================================================
// TOGGLING
// ============================================================================

#[test]
fn test_single_mode_at_most_one_open() {
    let mut rt = page(&markup(5, true, &[]));

    // Deterministic pseudo-random click sequence
    let mut seed: u32 = 7;
    for _ in 0..60 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let index = (seed >> 16) % 5;
        let button = node(&rt, &format!("b{index}"));
        rt.click(button).unwrap();

        let open = expanded(&rt);
        assert_eq!(open, vec![index as usize]);
        let marked = (0..5)
            .filter(|i| rt.document().has_attribute(node(&rt, &format!("it{i}")), "data-expanded"))
            .count();
        assert_eq!(marked, 1);
    }
}

#[test]
fn test_single_mode_reexpansion_is_idempotent() {
    let mut rt = page(&markup(3, true, &[]));
    let b0 = node(&rt, "b0");

    rt.click(b0).unwrap();
    rt.click(b0).unwrap();
    assert_eq!(expanded(&rt), vec![0]);
    assert_eq!(rt.document().attribute(b0, "aria-disabled"), Some("true"));
}

#[test]
fn test_single_mode_switch_releases_previous_button() {
    let mut rt = page(&markup(3, true, &[]));
    let b0 = node(&rt, "b0");
    let b2 = node(&rt, "b2");

    rt.click(b2).unwrap();

    let doc = rt.document();
    assert_eq!(expanded(&rt), vec![2]);
    assert!(!doc.has_class(b0, "is-disabled"));
    assert!(!doc.has_attribute(b0, "aria-disabled"));
    assert!(doc.has_class(b2, "is-disabled"));
    assert!(doc.has_class(node(&rt, "p0"), "is-hidden"));
}

#[test]
fn test_multi_mode_toggles_independently() {
    let mut rt = page(&markup(3, false, &[]));
    let b0 = node(&rt, "b0");
    let b2 = node(&rt, "b2");

    rt.click(b0).unwrap();
    rt.click(b2).unwrap();
    assert_eq!(expanded(&rt), vec![0, 2]);
    assert!(!rt.document().has_class(b0, "is-disabled"));

    rt.click(b0).unwrap();
    assert_eq!(expanded(&rt), vec![2]);
    assert_eq!(rt.document().attribute(b0, "aria-expanded"), Some("false"));
}

#[test]
fn test_click_inside_panel_does_nothing() {
    let mut rt = page(&markup(2, false, &[]));
    let p0 = node(&rt, "p0");

    let event = rt.click(p0).unwrap();
    assert_eq!(event.invocations(), 0);
    assert!(expanded(&rt).is_empty());
}

// ============================================================================
// KEYBOARD
// ============================================================================

#[test]
fn test_end_then_enter_toggles_last_item() {
    let count = 4;
    for start in 0..count {
        let mut rt = page(&markup(count, false, &[]));
        let button = node(&rt, &format!("b{start}"));
        let last = node(&rt, &format!("b{}", count - 1));

        rt.key_down(button, Key::End).unwrap();
        assert_eq!(rt.document().active_element(), Some(last));

        let event = rt.key_down(last, Key::Enter).unwrap();
        assert!(event.default_prevented());
        assert_eq!(expanded(&rt), vec![count - 1], "from button {start}");
        assert_eq!(rt.document().active_element(), Some(last));
    }
}

#[test]
fn test_arrow_focus_is_bounded() {
    let mut rt = page(&markup(3, false, &[]));
    let b0 = node(&rt, "b0");
    let b1 = node(&rt, "b1");
    let b2 = node(&rt, "b2");

    rt.key_down(b0, Key::ArrowDown).unwrap();
    assert_eq!(rt.document().active_element(), Some(b1));
    rt.key_down(b1, Key::ArrowRight).unwrap();
    assert_eq!(rt.document().active_element(), Some(b2));

    // No wrap past the last button
    rt.key_down(b2, Key::ArrowDown).unwrap();
    assert_eq!(rt.document().active_element(), Some(b2));

    rt.key_down(b2, Key::Home).unwrap();
    assert_eq!(rt.document().active_element(), Some(b0));
    rt.key_down(b0, Key::ArrowUp).unwrap();
    assert_eq!(rt.document().active_element(), Some(b0));

    // Focus moves never toggle
    assert!(expanded(&rt).is_empty());
}

#[test]
fn test_space_toggles_focused_item() {
    let mut rt = page(&markup(3, false, &[]));
    let b1 = node(&rt, "b1");

    rt.key_down(b1, Key::from_name("Spacebar")).unwrap();
    assert_eq!(expanded(&rt), vec![1]);
    rt.key_down(b1, Key::Space).unwrap();
    assert!(expanded(&rt).is_empty());
}

// ============================================================================
// NESTING
// ============================================================================

#[test]
fn test_nested_accordions_own_their_hooks() {
    let rt_html = r#"
        <div id="outer" data-is="accordion">
            <div data-hook-accordion="item">
                <button id="ob0" data-hook-accordion="button">Outer 0</button>
                <div data-hook-accordion="panel">
                    <div id="inner" data-is="accordion">
                        <div data-hook-accordion="item">
                            <button id="ib0" data-hook-accordion="button">Inner 0</button>
                            <div data-hook-accordion="panel">a</div>
                        </div>
                        <div data-hook-accordion="item">
                            <button id="ib1" data-hook-accordion="button">Inner 1</button>
                            <div data-hook-accordion="panel">b</div>
                        </div>
                    </div>
                </div>
            </div>
            <div data-hook-accordion="item">
                <button id="ob1" data-hook-accordion="button">Outer 1</button>
                <div data-hook-accordion="panel">c</div>
            </div>
        </div>
    "#;
    let mut rt = page(rt_html);
    let outer = node(&rt, "outer");
    let inner = node(&rt, "inner");

    assert_eq!(rt.instance_count(), 2);
    assert_eq!(rt.instance::<Accordion>(outer).unwrap().len(), 2);
    assert_eq!(rt.instance::<Accordion>(inner).unwrap().len(), 2);
    assert_eq!(
        rt.instance::<Accordion>(outer).unwrap().elements().nodes("button"),
        [node(&rt, "ob0"), node(&rt, "ob1")]
    );

    let ib1 = node(&rt, "ib1");
    let event = rt.click(ib1).unwrap();
    assert_eq!(event.invocations(), 1);
    assert_eq!(rt.instance::<Accordion>(inner).unwrap().expanded(), vec![1]);
    assert!(rt.instance::<Accordion>(outer).unwrap().expanded().is_empty());
}

// ============================================================================
// REMOTE COMMANDS
// ============================================================================

#[test]
fn test_remote_navigate_forces_single_expansion() {
    let mut rt = page(&markup(4, false, &[0, 1]));

    let command = CommandEnvelope::navigate("accordion", "faq-1", 2).to_json();
    rt.post_message(&command).unwrap();
    assert_eq!(expanded(&rt), vec![2]);

    // Opened with single-expansion markers
    let b2 = node(&rt, "b2");
    assert!(rt.document().has_class(b2, "is-disabled"));
    assert_eq!(rt.document().attribute(b2, "aria-disabled"), Some("true"));
    assert_eq!(rt.document().attribute(node(&rt, "b0"), "aria-disabled"), None);

    // Configured mode is back in effect afterwards
    assert!(!faq(&rt).single_expansion());
    let b0 = node(&rt, "b0");
    rt.click(b0).unwrap();
    assert_eq!(expanded(&rt), vec![0, 2]);
    assert_eq!(rt.document().attribute(b0, "aria-disabled"), None);
}

#[test]
fn test_remote_navigate_on_closed_multi_accordion() {
    let mut rt = page(&markup(3, false, &[]));

    let command = CommandEnvelope::navigate("accordion", "faq-1", 1).to_json();
    rt.post_message(&command).unwrap();

    let b1 = node(&rt, "b1");
    assert_eq!(expanded(&rt), vec![1]);
    assert_eq!(rt.document().attribute(b1, "aria-expanded"), Some("true"));
    assert_eq!(rt.document().attribute(b1, "aria-disabled"), Some("true"));

    // A later click collapses it under the configured mode
    rt.click(b1).unwrap();
    assert!(expanded(&rt).is_empty());
    assert_eq!(rt.document().attribute(b1, "aria-disabled"), None);
}

#[test]
fn test_remote_command_wrong_target_ignored() {
    let mut rt = page(&markup(3, true, &[]));

    for message in [
        CommandEnvelope::navigate("accordion", "faq-2", 2).to_json(),
        CommandEnvelope::navigate("carousel", "faq-1", 2).to_json(),
        CommandEnvelope::navigate("accordion", "faq-1", 9).to_json(),
        r#"{"type":"accordion","id":"faq-1","operation":"navigate"}"#.to_string(),
    ] {
        rt.post_message(&message).unwrap();
        assert_eq!(expanded(&rt), vec![0], "{message}");
    }
}
