//! Comprehensive tests for tether-dom
//!
//! Tree construction, attribute queries and event dispatch through the
//! public API only.

use std::cell::RefCell;
use std::rc::Rc;

use tether_dom::{Document, DomTree, Event, NodeId, SimpleSelector, StringInterner};

fn controller_page() -> (Document, NodeId, Vec<NodeId>) {
    // body > div[data-controller] > (button[data-action] x2, span[data-x-target])
    let mut doc = Document::new("about:blank");
    let body = doc.body();
    let tree = doc.tree_mut();

    let root = tree.create_element("div");
    tree.append_child(body, root);
    tree.set_attribute(root, "data-controller", "x");

    let mut kids = Vec::new();
    for action in ["click->x#one", "input->x#two"] {
        let button = tree.create_element("button");
        tree.append_child(root, button);
        tree.set_attribute(button, "data-action", action);
        kids.push(button);
    }
    let span = tree.create_element("span");
    tree.append_child(root, span);
    tree.set_attribute(span, "data-x-target", "label");
    kids.push(span);

    (doc, root, kids)
}

#[test]
fn test_string_interner_deduplication() {
    let mut interner = StringInterner::new();
    let before = interner.len();
    for _ in 0..1000 {
        interner.intern("div");
        interner.intern("data-action");
        interner.intern("data-clock-target");
    }
    // Only the one new name was added
    assert_eq!(interner.len(), before + 1);
}

#[test]
fn test_dom_tree_siblings() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    let first = tree.create_element("p");
    let second = tree.create_element("p");
    tree.append_child(tree.root(), div);
    tree.append_child(div, first);
    tree.append_child(div, second);

    let node = tree.get(first).unwrap();
    assert_eq!(node.next_sibling, second);
    assert!(!node.prev_sibling.is_valid());
    assert_eq!(tree.get(second).unwrap().prev_sibling, first);
    assert_eq!(tree.get(div).unwrap().last_child, second);
    assert_eq!(tree.children(div).count(), 2);
}

#[test]
fn test_attribute_selector_scoped_to_root() {
    let (doc, root, kids) = controller_page();
    let tree = doc.tree();

    let actions = tree.select_all(root, &SimpleSelector::has_attribute("data-action"));
    assert_eq!(actions, kids[..2].to_vec());

    let targets = tree.select_all(root, &SimpleSelector::has_attribute("data-x-target"));
    assert_eq!(targets, vec![kids[2]]);

    // The root itself is not one of its own descendants
    let roots = tree.select_all(root, &SimpleSelector::has_attribute("data-controller"));
    assert!(roots.is_empty());
    assert_eq!(doc.query_selector_all("[data-controller]"), vec![root]);
}

#[test]
fn test_dispatch_order_target_then_ancestors() {
    let (mut doc, root, kids) = controller_page();
    let log = Rc::new(RefCell::new(Vec::new()));

    for node in [root, kids[0], doc.body()] {
        let log = Rc::clone(&log);
        doc.add_event_listener(node, "click", Rc::new(move |_: &mut Document, event: &mut Event| {
            log.borrow_mut().push(event.current_target);
        }));
    }

    doc.dispatch_event(kids[0], Event::click());
    assert_eq!(*log.borrow(), vec![kids[0], root, doc.body()]);
}

#[test]
fn test_listener_added_during_dispatch_fires_next_time() {
    let (mut doc, _root, kids) = controller_page();
    let button = kids[0];
    let count = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&count);
    doc.add_event_listener(button, "click", Rc::new(move |doc: &mut Document, _: &mut Event| {
        let inner = Rc::clone(&counter);
        doc.add_event_listener(button, "click", Rc::new(move |_: &mut Document, _: &mut Event| {
            *inner.borrow_mut() += 1;
        }));
    }));

    doc.dispatch_event(button, Event::click());
    assert_eq!(*count.borrow(), 0);
    assert_eq!(doc.listener_count(button, "click"), 2);

    doc.dispatch_event(button, Event::click());
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_event_type_is_exact() {
    let (mut doc, _root, kids) = controller_page();
    let hit = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&hit);
    doc.add_event_listener(kids[1], "input", Rc::new(move |_: &mut Document, _: &mut Event| {
        *flag.borrow_mut() = true;
    }));

    doc.dispatch_event(kids[1], Event::bubbling("change"));
    assert!(!*hit.borrow());
    doc.dispatch_event(kids[1], Event::bubbling("input"));
    assert!(*hit.borrow());
}
