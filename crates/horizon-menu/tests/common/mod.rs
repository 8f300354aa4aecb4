//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use horizon_menu::{
    DisclosureMenu, Document, Dom, ElementId, EventResponse, KeyInput, MenuEvent, MenuId,
    MenuOptions, MenuTree, MenuTreeBuilder, Menubar,
};

/// Install a test subscriber; filter with `RUST_LOG=horizon_menu=trace`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A menu entry used to lay out fixture documents.
pub enum Entry {
    Link(&'static str),
    Dropdown(&'static str, Vec<Entry>),
}

use Entry::{Dropdown, Link};

/// The default menubar layout:
///
/// ```text
/// Home | Products        | About     | Contact
///        Widgets           Team
///        Gadgets >         History
///          Small
///          Large
///        Gizmos
/// ```
pub fn menubar_layout() -> Vec<Entry> {
    vec![
        Link("Home"),
        Dropdown(
            "Products",
            vec![
                Link("Widgets"),
                Dropdown("Gadgets", vec![Link("Small"), Link("Large")]),
                Link("Gizmos"),
            ],
        ),
        Dropdown("About", vec![Link("Team"), Link("History")]),
        Link("Contact"),
    ]
}

/// A document holding a menu, with elements looked up by label.
pub struct Fixture {
    pub tree: MenuTree<Document>,
    pub nav: ElementId,
    pub controller: Option<ElementId>,
    pub container: Option<ElementId>,
    pub outside: ElementId,
    links: HashMap<&'static str, ElementId>,
    items: HashMap<&'static str, ElementId>,
    submenus: HashMap<&'static str, ElementId>,
}

#[derive(Default)]
struct Layout {
    links: HashMap<&'static str, ElementId>,
    items: HashMap<&'static str, ElementId>,
    submenus: HashMap<&'static str, ElementId>,
}

impl Layout {
    fn append(&mut self, doc: &mut Document, list: ElementId, entries: &[Entry]) {
        for entry in entries {
            let item = doc.append(list, "li").unwrap();
            match entry {
                Link(label) => {
                    let link = doc.append_with_text(item, "a", label).unwrap();
                    doc.set_attribute(link, "href", "#").unwrap();
                    self.links.insert(*label, link);
                    self.items.insert(*label, item);
                }
                Dropdown(label, children) => {
                    doc.add_class(item, "dropdown").unwrap();
                    let link = doc.append_with_text(item, "a", label).unwrap();
                    let submenu = doc.append(item, "ul").unwrap();
                    self.links.insert(*label, link);
                    self.items.insert(*label, item);
                    self.submenus.insert(*label, submenu);
                    self.append(doc, submenu, children);
                }
            }
        }
    }
}

impl Fixture {
    /// The default layout as a menubar.
    pub fn menubar() -> Self {
        Self::menubar_with(Menubar::default_options())
    }

    /// The default layout as a menubar with custom options.
    pub fn menubar_with(options: MenuOptions) -> Self {
        Self::build(&menubar_layout(), false, |nav, _| {
            MenuTreeBuilder::new(nav).options(options)
        })
    }

    /// A flat menubar of plain links.
    pub fn flat(labels: &[&'static str]) -> Self {
        let entries: Vec<Entry> = labels.iter().map(|&label| Link(label)).collect();
        Self::build(&entries, false, |nav, _| Menubar::builder(nav))
    }

    /// The default layout as a disclosure menu behind a button.
    pub fn disclosure() -> Self {
        Self::build(&menubar_layout(), true, |nav, controls| {
            let (controller, container) = controls.unwrap();
            DisclosureMenu::builder(nav).controller(controller, container)
        })
    }

    fn build(
        entries: &[Entry],
        with_controller: bool,
        builder: impl FnOnce(ElementId, Option<(ElementId, ElementId)>) -> MenuTreeBuilder,
    ) -> Self {
        let mut doc = Document::new();
        let body = doc.body();
        let outside = doc.append_with_text(body, "p", "Elsewhere").unwrap();

        let (controller, container, parent) = if with_controller {
            let button = doc.append_with_text(body, "button", "Menu").unwrap();
            let panel = doc.append(body, "nav").unwrap();
            (Some(button), Some(panel), panel)
        } else {
            (None, None, body)
        };

        let nav = doc.append(parent, "ul").unwrap();
        let mut layout = Layout::default();
        layout.append(&mut doc, nav, entries);

        let controls = controller.zip(container);
        let tree = builder(nav, controls).build(doc).unwrap();
        Self {
            tree,
            nav,
            controller,
            container,
            outside,
            links: layout.links,
            items: layout.items,
            submenus: layout.submenus,
        }
    }

    pub fn link(&self, label: &str) -> ElementId {
        self.links[label]
    }

    pub fn item(&self, label: &str) -> ElementId {
        self.items[label]
    }

    pub fn submenu(&self, label: &str) -> ElementId {
        self.submenus[label]
    }

    pub fn root(&self) -> MenuId {
        self.tree.root()
    }

    /// The menu node managing the submenu under `label`.
    pub fn menu_of(&self, label: &str) -> MenuId {
        self.tree.menu_for_element(self.submenu(label)).unwrap()
    }

    pub fn dom(&self) -> &Document {
        self.tree.dom()
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.dom().active_element()
    }

    /// The label of the focused link.
    pub fn focused_label(&self) -> Option<String> {
        self.focused().map(|id| self.dom().text_content(id))
    }

    /// Whether the submenu under `label` carries the open class.
    pub fn is_shown(&self, label: &str) -> bool {
        let submenu = self.submenu(label);
        self.dom().has_class(submenu, "show") && !self.dom().has_class(submenu, "hide")
    }

    pub fn current_child(&self, menu: MenuId) -> Option<usize> {
        self.tree.menu(menu).unwrap().current_child()
    }

    /// Focus a link the way a browser would report it.
    pub fn focus(&mut self, label: &str) {
        let target = self.link(label);
        self.tree.dom_mut().focus(target).unwrap();
        self.tree.dispatch(MenuEvent::Focus { target }).unwrap();
    }

    /// Press and release `key` on the focused element.
    pub fn press(&mut self, key: &str) -> (EventResponse, EventResponse) {
        let target = self.focused().expect("an element should hold focus");
        self.press_on(target, key)
    }

    /// Press and release `key` on `target`.
    pub fn press_on(&mut self, target: ElementId, key: &str) -> (EventResponse, EventResponse) {
        let down = self
            .tree
            .dispatch(MenuEvent::KeyDown {
                target,
                input: KeyInput::new(key),
            })
            .unwrap();
        let up = self
            .tree
            .dispatch(MenuEvent::KeyUp {
                target,
                input: KeyInput::new(key),
            })
            .unwrap();
        (down, up)
    }

    pub fn click(&mut self, target: ElementId) -> EventResponse {
        self.tree.dispatch(MenuEvent::Click { target }).unwrap()
    }

    pub fn enter(&mut self, label: &str) {
        let target = self.item(label);
        self.tree.dispatch(MenuEvent::MouseEnter { target }).unwrap();
    }

    pub fn leave(&mut self, label: &str) {
        let target = self.item(label);
        self.tree.dispatch(MenuEvent::MouseLeave { target }).unwrap();
    }
}
