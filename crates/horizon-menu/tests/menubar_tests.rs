//! Keyboard behavior of a top-level menubar.

mod common;

use std::sync::Arc;

use common::Fixture;
use horizon_menu::{
    Dom, FocusState, KeyInput, KeyModifiers, MenuError, MenuEvent, MenuId, MenuNotification,
};
use parking_lot::Mutex;

#[test]
fn test_end_then_right_wraps_to_first() {
    common::init_tracing();
    let mut fx = Fixture::flat(&["One", "Two", "Three"]);
    let root = fx.root();

    fx.focus("One");
    let (down, _) = fx.press("End");
    assert!(down.is_default_prevented());
    assert_eq!(fx.current_child(root), Some(2));
    assert_eq!(fx.focused(), Some(fx.link("Three")));

    fx.press("ArrowRight");
    assert_eq!(fx.current_child(root), Some(0));
    assert_eq!(fx.focused(), Some(fx.link("One")));
}

#[test]
fn test_left_from_first_wraps_to_last() {
    let mut fx = Fixture::flat(&["One", "Two", "Three"]);
    let root = fx.root();

    fx.focus("One");
    fx.press("ArrowLeft");
    assert_eq!(fx.current_child(root), Some(2));

    fx.press("Home");
    assert_eq!(fx.current_child(root), Some(0));
    assert_eq!(fx.focused_label().as_deref(), Some("One"));
}

#[test]
fn test_roving_tab_stop_follows_focus() {
    let mut fx = Fixture::flat(&["One", "Two", "Three"]);
    assert_eq!(fx.dom().attribute(fx.link("One"), "tabindex"), Some("0"));

    fx.focus("One");
    fx.press("ArrowRight");

    assert_eq!(fx.dom().attribute(fx.link("One"), "tabindex"), Some("-1"));
    assert_eq!(fx.dom().attribute(fx.link("Two"), "tabindex"), Some("0"));
}

#[test]
fn test_character_search_moves_forward_without_wrapping() {
    let mut fx = Fixture::flat(&["Apples", "Bananas", "Avocados"]);
    let root = fx.root();

    fx.focus("Apples");
    let (down, up) = fx.press("a");
    assert!(down.is_default_prevented());
    assert!(up.is_default_prevented());
    assert_eq!(fx.current_child(root), Some(2));

    fx.press("a");
    assert_eq!(fx.current_child(root), Some(2));

    fx.press("b");
    assert_eq!(fx.current_child(root), Some(2));
    assert_eq!(fx.focused(), Some(fx.link("Avocados")));
}

#[test]
fn test_shortcuts_are_not_searched() {
    let mut fx = Fixture::flat(&["Apples", "Copy"]);
    let root = fx.root();
    fx.focus("Apples");

    let target = fx.link("Apples");
    let input = KeyInput::new("c").with_modifiers(KeyModifiers::CTRL);
    let down = fx
        .tree
        .dispatch(MenuEvent::KeyDown {
            target,
            input: input.clone(),
        })
        .unwrap();
    fx.tree.dispatch(MenuEvent::KeyUp { target, input }).unwrap();

    assert!(!down.is_default_prevented());
    assert_eq!(fx.current_child(root), Some(0));
}

#[test]
fn test_enter_opens_submenu_and_focuses_first_child() {
    let mut fx = Fixture::menubar();
    let root = fx.root();

    fx.focus("Products");
    let (down, up) = fx.press("Enter");

    assert!(down.is_default_prevented());
    assert!(up.is_default_prevented());
    assert!(fx.is_shown("Products"));
    assert_eq!(fx.focused(), Some(fx.link("Widgets")));
    assert_eq!(
        fx.dom().attribute(fx.link("Products"), "aria-expanded"),
        Some("true")
    );

    let products = fx.menu_of("Products");
    assert_eq!(fx.current_child(products), Some(0));
    assert_eq!(fx.tree.menu(products).unwrap().focus_state(), FocusState::SelfFocused);
    assert_eq!(fx.tree.menu(root).unwrap().focus_state(), FocusState::ChildFocused);
}

#[test]
fn test_enter_on_plain_link_keeps_default_action() {
    let mut fx = Fixture::menubar();
    fx.focus("Home");

    let (down, up) = fx.press("Enter");
    assert!(!down.is_default_prevented());
    assert!(!up.is_default_prevented());
    assert_eq!(fx.focused(), Some(fx.link("Home")));
}

#[test]
fn test_arrow_up_focuses_last_child() {
    let mut fx = Fixture::menubar();
    fx.focus("About");

    fx.press("ArrowUp");
    assert!(fx.is_shown("About"));
    assert_eq!(fx.focused_label().as_deref(), Some("History"));
}

#[test]
fn test_arrow_down_on_plain_link_does_nothing() {
    let mut fx = Fixture::menubar();
    let root = fx.root();
    fx.focus("Home");

    let (down, up) = fx.press("ArrowDown");
    assert!(down.is_default_prevented());
    assert!(!up.is_default_prevented());
    assert_eq!(fx.current_child(root), Some(0));
    assert_eq!(fx.focused(), Some(fx.link("Home")));
}

#[test]
fn test_open_submenu_follows_horizontal_movement() {
    let mut fx = Fixture::menubar();
    let root = fx.root();

    fx.focus("Products");
    let products = fx.tree.toggle_at(root, 1).unwrap();
    fx.tree.preview_toggle(products).unwrap();

    fx.press("ArrowRight");
    assert_eq!(fx.focused(), Some(fx.link("About")));
    assert!(fx.is_shown("About"));
    assert!(!fx.is_shown("Products"));

    fx.press("ArrowRight");
    assert_eq!(fx.focused(), Some(fx.link("Contact")));
    assert!(!fx.is_shown("About"));
}

#[test]
fn test_closed_submenu_stays_closed_when_moving() {
    let mut fx = Fixture::menubar();
    fx.focus("Home");

    fx.press("ArrowRight");
    assert_eq!(fx.focused(), Some(fx.link("Products")));
    assert!(!fx.is_shown("Products"));
}

#[test]
fn test_tab_out_blurs_and_closes_everything() {
    let mut fx = Fixture::menubar();
    fx.focus("Products");
    fx.press("ArrowDown");
    assert!(fx.is_shown("Products"));

    let (down, _) = fx.press("Tab");
    assert!(!down.is_default_prevented());
    assert!(down.is_propagation_stopped());

    assert!(!fx.is_shown("Products"));
    for (_, menu) in fx.tree.menus() {
        assert_eq!(menu.focus_state(), FocusState::None);
    }
}

#[test]
fn test_tab_into_unfocused_menu_marks_root() {
    let mut fx = Fixture::menubar();
    let root = fx.root();
    let target = fx.link("Home");

    fx.tree
        .dispatch(MenuEvent::KeyDown {
            target,
            input: KeyInput::new("Tab"),
        })
        .unwrap();
    assert_eq!(fx.tree.menu(root).unwrap().focus_state(), FocusState::SelfFocused);
}

#[test]
fn test_expand_and_collapse_notifications() {
    let mut fx = Fixture::menubar();
    let expanded: Arc<Mutex<Vec<MenuNotification>>> = Arc::new(Mutex::new(Vec::new()));
    let collapsed: Arc<Mutex<Vec<MenuNotification>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = expanded.clone();
    fx.tree.expanded.connect(move |n| sink.lock().push(*n));
    let sink = collapsed.clone();
    fx.tree.collapsed.connect(move |n| sink.lock().push(*n));

    fx.focus("Products");
    fx.press("Enter");
    fx.press("Escape");

    let expanded = expanded.lock();
    let collapsed = collapsed.lock();
    assert_eq!(expanded.len(), 1);
    assert_eq!(collapsed.len(), 1);

    let products_item = fx.tree.item_for_element(fx.item("Products"));
    assert_eq!(expanded[0].element, fx.submenu("Products"));
    assert_eq!(expanded[0].item, products_item);
    assert_eq!(expanded[0].menu, fx.menu_of("Products"));
    assert_eq!(collapsed[0], expanded[0]);
}

#[test]
fn test_key_events_for_unknown_menu_are_errors() {
    let mut fx = Fixture::menubar();
    fx.focus("Products");
    let input = KeyInput::new("ArrowDown");

    let err = fx.tree.handle_keydown(MenuId::default(), &input).unwrap_err();
    assert!(matches!(err, MenuError::UnknownMenu(_)));
    let err = fx.tree.handle_keyup(MenuId::default(), &input).unwrap_err();
    assert!(matches!(err, MenuError::UnknownMenu(_)));

    assert!(!fx.is_shown("Products"));
    assert_eq!(fx.focused(), Some(fx.link("Products")));
}
