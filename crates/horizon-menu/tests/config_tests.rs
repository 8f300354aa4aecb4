//! Building menus from configuration, and construction errors.

mod common;

use common::Fixture;
use horizon_menu::{Document, Dom, ElementSet, MenuError, MenuOptions, MenuTreeBuilder, Menubar};

const CUSTOM: &str = r#"
aria_roles = true

[selectors]
submenu_item = "li.dropdown"

[classes]
open = "is-open"
close = "is-closed"

[hover]
enabled = true
delay_ms = 100
"#;

#[test]
fn test_options_from_toml() {
    common::init_tracing();
    let options = MenuOptions::from_toml_str(CUSTOM).unwrap();
    let mut fx = Fixture::menubar_with(options);
    let submenu = fx.submenu("Products");

    assert!(fx.dom().has_class(submenu, "is-closed"));
    assert!(!fx.dom().has_class(submenu, "hide"));

    let root = fx.root();
    let menu = fx.tree.menu(root).unwrap();
    assert!(menu.is_hoverable());
    assert_eq!(menu.hover_delay().as_millis(), 100);

    fx.click(fx.link("Products"));
    assert_eq!(fx.dom().class_list(submenu), vec!["is-open".to_string()]);
}

#[test]
fn test_options_from_json_match_toml() {
    let toml = MenuOptions::from_toml_str(CUSTOM).unwrap();
    let json = toml.to_json_string().unwrap();
    assert_eq!(MenuOptions::from_json_str(&json).unwrap(), toml);
}

#[test]
fn test_malformed_toml() {
    let err = MenuOptions::from_toml_str("hover = 3").unwrap_err();
    assert!(matches!(err, MenuError::Toml(_)));
    assert!(err.is_configuration_error());
}

#[test]
fn test_invalid_selector_rejected_at_build() {
    let mut doc = Document::new();
    let nav = doc.append(doc.body(), "ul").unwrap();

    let options = Menubar::default_options().with_submenu_item("li >");
    let err = MenuTreeBuilder::new(nav).options(options).build(doc).unwrap_err();
    assert!(matches!(
        err,
        MenuError::InvalidSelector {
            field: "submenu_item",
            ..
        }
    ));
}

#[test]
fn test_invalid_class_rejected_at_build() {
    let mut doc = Document::new();
    let nav = doc.append(doc.body(), "ul").unwrap();

    let options = MenuOptions::new().with_classes("is open", "hide");
    let err = MenuTreeBuilder::new(nav).options(options).build(doc).unwrap_err();
    assert!(matches!(err, MenuError::InvalidClassName { field: "open", .. }));
}

#[test]
fn test_controller_without_container() {
    let mut doc = Document::new();
    let nav = doc.append(doc.body(), "ul").unwrap();
    let button = doc.append(doc.body(), "button").unwrap();

    let err = MenuTreeBuilder::new(nav)
        .controller_element(button)
        .build(doc)
        .unwrap_err();
    assert!(matches!(err, MenuError::IncompleteController));
}

#[test]
fn test_dropdown_without_submenu() {
    let mut doc = Document::new();
    let nav = doc.append(doc.body(), "ul").unwrap();
    let item = doc.append(nav, "li").unwrap();
    doc.add_class(item, "dropdown").unwrap();
    doc.append_with_text(item, "a", "Broken").unwrap();

    let err = Menubar::new(doc, nav).unwrap_err();
    assert!(matches!(
        err,
        MenuError::MissingElement { kind: "submenu", item: found } if found == item
    ));
    assert!(!err.is_configuration_error());
}

#[test]
fn test_item_without_link() {
    let mut doc = Document::new();
    let nav = doc.append(doc.body(), "ul").unwrap();
    let item = doc.append_with_text(nav, "li", "No link").unwrap();

    let err = Menubar::new(doc, nav).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Menu item {item:?} has no link element")
    );
}

#[test]
fn test_element_sets() {
    let fx = Fixture::menubar();
    let root = fx.root();

    let submenus = fx.tree.element_set_by_name(root, "submenus").unwrap();
    assert_eq!(submenus, [fx.submenu("Products"), fx.submenu("About")]);

    let toggles = fx.tree.element_set(root, ElementSet::SubmenuToggles).unwrap();
    assert_eq!(toggles, [fx.link("Products"), fx.link("About")]);

    let items = fx.tree.element_set(root, ElementSet::MenuItems).unwrap();
    assert_eq!(items.len(), 4);

    let nested = fx.menu_of("Products");
    let nested_items = fx.tree.element_set_by_name(nested, "submenu-items").unwrap();
    assert_eq!(nested_items, [fx.item("Gadgets")]);
}

#[test]
fn test_unknown_element_set() {
    let fx = Fixture::menubar();
    let err = fx
        .tree
        .element_set_by_name(fx.root(), "widgets")
        .unwrap_err();
    assert!(matches!(err, MenuError::UnknownElementSet(name) if name == "widgets"));
}

#[test]
fn test_set_open_class_moves_class_on_open_menus() {
    let mut fx = Fixture::menubar();
    fx.click(fx.link("Products"));

    fx.tree.set_open_class("expanded").unwrap();
    let products = fx.submenu("Products");
    assert!(fx.dom().has_class(products, "expanded"));
    assert!(!fx.dom().has_class(products, "show"));
    assert!(fx.dom().has_class(fx.submenu("About"), "hide"));

    fx.tree.set_close_class("collapsed").unwrap();
    assert!(fx.dom().has_class(fx.submenu("About"), "collapsed"));
    assert!(!fx.dom().has_class(fx.submenu("About"), "hide"));

    fx.click(fx.link("Products"));
    assert!(fx.dom().has_class(products, "collapsed"));
    assert!(!fx.dom().has_class(products, "expanded"));
}

#[test]
fn test_set_open_class_rejects_blank() {
    let mut fx = Fixture::menubar();
    let err = fx.tree.set_open_class(" ").unwrap_err();
    assert!(matches!(err, MenuError::InvalidClassName { .. }));
    assert_eq!(fx.tree.classes().open, "show");
}

#[test]
fn test_shared_open_and_close_class_rejected_at_build() {
    let mut doc = Document::new();
    let nav = doc.append(doc.body(), "ul").unwrap();

    let options = MenuOptions::new().with_classes("toggled", "toggled");
    let err = MenuTreeBuilder::new(nav).options(options).build(doc).unwrap_err();
    assert!(matches!(err, MenuError::InvalidClassName { field: "close", .. }));
}

#[test]
fn test_setters_reject_class_of_the_other_state() {
    let mut fx = Fixture::menubar();
    fx.click(fx.link("Products"));

    let err = fx.tree.set_open_class("hide").unwrap_err();
    assert!(matches!(err, MenuError::InvalidClassName { field: "open", .. }));
    let err = fx.tree.set_close_class("show").unwrap_err();
    assert!(matches!(err, MenuError::InvalidClassName { field: "close", .. }));

    assert_eq!(fx.tree.classes().open, "show");
    assert_eq!(fx.tree.classes().close, "hide");
    assert_eq!(fx.dom().class_list(fx.submenu("Products")), vec!["show".to_string()]);
    assert_eq!(fx.dom().class_list(fx.submenu("About")), vec!["hide".to_string()]);
}
