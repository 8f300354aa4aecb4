//! Tree construction: structure discovery and initial DOM state.

use std::collections::HashMap;

use horizon_menu_core::logging::{span_names, targets};
use horizon_menu_core::{Dom, DomError, ElementId, PerfSpan, Signal, TimerManager};
use slotmap::SlotMap;

use super::{CurrentEvent, DomSets, FocusState, ItemId, Menu, MenuId, MenuTree};
use crate::error::{MenuError, Result};
use crate::menu_item::MenuItem;
use crate::menu_toggle::MenuToggle;
use crate::options::MenuOptions;

/// Builder for [`MenuTree`].
///
/// # Example
///
/// ```
/// use horizon_menu::prelude::*;
///
/// let mut doc = Document::new();
/// let button = doc.append_with_text(doc.body(), "button", "Menu").unwrap();
/// let panel = doc.append(doc.body(), "nav").unwrap();
/// let list = doc.append(panel, "ul").unwrap();
/// let item = doc.append(list, "li").unwrap();
/// doc.append_with_text(item, "a", "Home").unwrap();
///
/// let tree = MenuTreeBuilder::new(list)
///     .controller(button, panel)
///     .build(doc)
///     .unwrap();
/// assert!(tree.dom().has_class(panel, "hide"));
/// ```
#[derive(Debug, Clone)]
pub struct MenuTreeBuilder {
    element: ElementId,
    options: MenuOptions,
    controller: Option<ElementId>,
    container: Option<ElementId>,
}

impl MenuTreeBuilder {
    /// Start a builder for the menu rooted at `element`.
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            options: MenuOptions::default(),
            controller: None,
            container: None,
        }
    }

    /// Use the given options.
    pub fn options(mut self, options: MenuOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the element that opens and closes the whole menu.
    pub fn controller_element(mut self, controller: ElementId) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Set the element shown and hidden by the controller.
    pub fn container_element(mut self, container: ElementId) -> Self {
        self.container = Some(container);
        self
    }

    /// Set the controller and container together.
    pub fn controller(self, controller: ElementId, container: ElementId) -> Self {
        self.controller_element(controller).container_element(container)
    }

    /// Discover the menu structure under the root element and take over `dom`.
    pub fn build<D: Dom>(self, dom: D) -> Result<MenuTree<D>> {
        let _perf = PerfSpan::new(span_names::BUILD);

        let selectors = self.options.compile()?;
        let controller = match (self.controller, self.container) {
            (Some(controller), Some(container)) => Some((controller, container)),
            (None, None) => None,
            _ => return Err(MenuError::IncompleteController),
        };

        for element in std::iter::once(self.element)
            .chain(controller.into_iter().flat_map(|(a, b)| [a, b]))
        {
            if !dom.exists(element) {
                return Err(DomError::UnknownElement(element).into());
            }
        }

        let mut tree = MenuTree {
            dom,
            selectors,
            classes: self.options.classes.clone(),
            aria_roles: self.options.aria_roles,
            menus: SlotMap::with_key(),
            items: SlotMap::with_key(),
            toggles: SlotMap::with_key(),
            root: MenuId::default(),
            timers: TimerManager::new(),
            hover_timers: HashMap::new(),
            next_generated_id: 0,
            expanded: Signal::new(),
            collapsed: Signal::new(),
        };

        let root = tree.build_menu(self.element, None, None, true, &self.options)?;
        tree.root = root;

        if let Some((controller, container)) = controller {
            let toggle = tree
                .toggles
                .insert(MenuToggle::for_controller(controller, container, root));
            let menu = &mut tree.menus[root];
            menu.controller = Some(controller);
            menu.container = Some(container);
            menu.controller_toggle = Some(toggle);
            tree.initialize_toggle(toggle)?;
        }

        tracing::debug!(
            target: targets::MENU,
            menus = tree.menus.len(),
            items = tree.items.len(),
            toggles = tree.toggles.len(),
            "menu tree built"
        );
        Ok(tree)
    }
}

impl<D: Dom> MenuTree<D> {
    /// Build one menu node and, recursively, every submenu under it.
    fn build_menu(
        &mut self,
        element: ElementId,
        parent: Option<MenuId>,
        parent_item: Option<ItemId>,
        is_top_level: bool,
        options: &MenuOptions,
    ) -> Result<MenuId> {
        let root = if is_top_level {
            None
        } else {
            Some(self.resolve_root(parent)?)
        };

        let dom_sets = self.discover(element)?;
        let id = self.menus.insert_with_key(|id| Menu {
            element,
            parent,
            root: root.unwrap_or(id),
            parent_item,
            is_top_level,
            hoverable: options.hover.enabled,
            hover_delay: options.hover.delay(),
            items: Vec::new(),
            controller: None,
            container: None,
            controller_toggle: None,
            dom_sets: dom_sets.clone(),
            current_child: None,
            focus_state: FocusState::None,
            current_event: CurrentEvent::None,
        });

        if is_top_level {
            self.dom.set_attribute(element, "role", "menubar")?;
        } else if self.aria_roles {
            self.dom.set_attribute(element, "role", "menu")?;
        }

        for (index, &item_element) in dom_sets.menu_items.iter().enumerate() {
            let link = self
                .dom
                .query_selector(item_element, &self.selectors.menu_link)
                .ok_or(MenuError::MissingElement {
                    kind: "link",
                    item: item_element,
                })?;

            if self.aria_roles {
                self.dom.set_attribute(item_element, "role", "none")?;
                self.dom.set_attribute(link, "role", "menuitem")?;
            }
            let tabindex = if is_top_level && index == 0 { "0" } else { "-1" };
            self.dom.set_attribute(link, "tabindex", tabindex)?;

            let item = self.items.insert(MenuItem::new(item_element, link, id));
            self.menus[id].items.push(item);

            if dom_sets.submenu_items.contains(&item_element) {
                self.build_submenu(id, item, item_element, options)?;
            }
        }

        tracing::trace!(
            target: targets::MENU,
            menu = ?id,
            items = dom_sets.menu_items.len(),
            submenus = dom_sets.submenus.len(),
            "menu discovered"
        );
        Ok(id)
    }

    fn build_submenu(
        &mut self,
        menu: MenuId,
        item: ItemId,
        item_element: ElementId,
        options: &MenuOptions,
    ) -> Result<()> {
        let toggle_element = self
            .dom
            .query_selector(item_element, &self.selectors.submenu_toggle)
            .ok_or(MenuError::MissingElement {
                kind: "toggle",
                item: item_element,
            })?;
        let submenu_element = self
            .dom
            .query_selector(item_element, &self.selectors.submenu)
            .ok_or(MenuError::MissingElement {
                kind: "submenu",
                item: item_element,
            })?;

        let child = self.build_menu(submenu_element, Some(menu), Some(item), false, options)?;
        let toggle = self.toggles.insert(MenuToggle::for_submenu(
            toggle_element,
            submenu_element,
            item_element,
            child,
            menu,
            item,
        ));
        self.items[item].attach_submenu(child, toggle);
        self.initialize_toggle(toggle)
    }

    /// Walk the parent chain up to the top-level menu.
    fn resolve_root(&self, parent: Option<MenuId>) -> Result<MenuId> {
        let mut current = parent.ok_or(MenuError::RootNotFound)?;
        loop {
            let menu = self
                .menus
                .get(current)
                .ok_or(MenuError::ParentNotMenu(current))?;
            if menu.is_top_level {
                return Ok(current);
            }
            current = menu.parent.ok_or(MenuError::RootNotFound)?;
        }
    }

    /// Cache the element sets of the menu managing `element`.
    fn discover(&self, element: ElementId) -> Result<DomSets> {
        let selectors = &self.selectors;
        let menu_items = self.dom.children_matching(element, &selectors.menu_item);

        let submenu_items: Vec<ElementId> = match &selectors.submenu_item {
            Some(selector) => menu_items
                .iter()
                .copied()
                .filter(|&item| self.dom.matches(item, selector))
                .collect(),
            None => Vec::new(),
        };

        let submenu_toggles = submenu_items
            .iter()
            .filter_map(|&item| self.dom.query_selector(item, &selectors.submenu_toggle))
            .collect();
        let submenus = submenu_items
            .iter()
            .filter_map(|&item| self.dom.query_selector(item, &selectors.submenu))
            .collect();

        Ok(DomSets {
            menu_items,
            submenu_items,
            submenu_toggles,
            submenus,
        })
    }
}
