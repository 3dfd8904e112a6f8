//! Edge case tests for tether-html
//!
//! Malformed markup, attribute quirks and structure the binder relies on.

use tether_html::{parse, HtmlParser};

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty() {
    let doc = parse("").unwrap();
    assert!(doc.tree().len() >= 1);
    assert!(doc.body().is_valid());
}

#[test]
fn test_parse_only_whitespace_drops_text() {
    let doc = HtmlParser::new().parse("   \t\n\r\n   ").unwrap();
    assert_eq!(doc.tree().text_content(doc.body()), "");
}

#[test]
fn test_parse_doctype_kept() {
    let doc = parse("<!DOCTYPE html><p>x</p>").unwrap();
    let (_, first) = doc.tree().children(doc.tree().root()).next().unwrap();
    assert!(matches!(first.data, tether_dom::NodeData::Doctype { .. }));
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let doc = parse("<div data-controller=\"a\"><p><span>text").unwrap();
    let root = doc.query_selector("[data-controller]").unwrap();
    assert_eq!(doc.tree().text_content(root), "text");
}

#[test]
fn test_parse_deeply_nested() {
    let mut html = String::new();
    for _ in 0..1000 {
        html.push_str("<div>");
    }
    html.push_str("<b data-deep-target=\"bottom\">deepest</b>");
    let doc = parse(&html).unwrap();

    let bottom = doc.query_selector("[data-deep-target]").unwrap();
    assert_eq!(doc.tree().text_content(bottom), "deepest");
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

#[test]
fn test_parse_attribute_no_value() {
    let doc = parse("<div data-greeter-target></div>").unwrap();
    let div = doc.query_selector("div").unwrap();
    assert_eq!(doc.tree().attribute(div, "data-greeter-target"), Some(""));
}

#[test]
fn test_parse_attribute_names_lowercased() {
    let doc = parse("<DIV DATA-Controller=\"Greeter\"></DIV>").unwrap();
    let div = doc.query_selector("div").unwrap();
    // Names fold to lowercase, values keep their case
    assert_eq!(doc.tree().attribute(div, "data-controller"), Some("Greeter"));
}

#[test]
fn test_parse_action_value_entities() {
    let doc = parse("<button data-action=\"click-&gt;greeter#sayHello\"></button>").unwrap();
    let button = doc.query_selector("button").unwrap();
    assert_eq!(doc.tree().attribute(button, "data-action"), Some("click->greeter#sayHello"));
}

#[test]
fn test_parse_unescaped_arrow_in_attribute() {
    let doc = parse("<button data-action='click->greeter#sayHello'>Hi</button>").unwrap();
    let button = doc.query_selector("button").unwrap();
    assert_eq!(doc.tree().attribute(button, "data-action"), Some("click->greeter#sayHello"));
    assert_eq!(doc.tree().text_content(button), "Hi");
}

#[test]
fn test_parse_id_and_class_cached() {
    let doc = parse("<section id=\"app\" class=\"card active\"></section>").unwrap();
    let section = doc.get_element_by_id("app").unwrap();
    assert_eq!(doc.query_selector(".active"), Some(section));
}

// ============================================================================
// DOCUMENT ORDER
// ============================================================================

#[test]
fn test_parse_many_siblings_in_order() {
    let mut html = String::from("<ul>");
    for i in 0..200 {
        html.push_str(&format!("<li data-list-target=\"item{i}\">{i}</li>"));
    }
    html.push_str("</ul>");
    let doc = parse(&html).unwrap();

    let items = doc.query_selector_all("li");
    assert_eq!(items.len(), 200);
    for (i, item) in items.iter().enumerate() {
        let expected = format!("item{i}");
        assert_eq!(doc.tree().attribute(*item, "data-list-target"), Some(expected.as_str()));
    }
}
