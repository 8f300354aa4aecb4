//! The menu tree: an arena of menus, items and toggles.
//!
//! A [`MenuTree`] owns every node discovered under a root menu element. Nodes
//! refer to each other through slotmap handles ([`MenuId`], [`ItemId`],
//! [`ToggleId`]); only the tree owns them, so parent and root links are plain
//! copies of handles.
//!
//! # Example
//!
//! ```
//! use horizon_menu::prelude::*;
//!
//! let mut doc = Document::new();
//! let nav = doc.append(doc.body(), "ul").unwrap();
//! for label in ["Home", "About", "Contact"] {
//!     let item = doc.append(nav, "li").unwrap();
//!     doc.append_with_text(item, "a", label).unwrap();
//! }
//!
//! let mut tree = MenuTreeBuilder::new(nav).build(doc).unwrap();
//! let root = tree.root();
//! tree.focus_last_child(root).unwrap();
//! tree.focus_next_child(root).unwrap();
//! assert_eq!(tree.menu(root).unwrap().current_child(), Some(0));
//! ```

mod build;
mod dispatch;
mod focus;
mod keyboard;
mod pointer;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use horizon_menu_core::logging::targets;
use horizon_menu_core::{Dom, ElementId, Signal, TimerId, TimerManager};
use slotmap::{SlotMap, new_key_type};

pub use build::MenuTreeBuilder;

use crate::error::{MenuError, Result};
use crate::event::MenuNotification;
use crate::menu_item::MenuItem;
use crate::menu_toggle::MenuToggle;
use crate::options::{CompiledSelectors, MenuClasses};
use crate::validate;

new_key_type! {
    /// Handle to a menu node.
    pub struct MenuId;

    /// Handle to a menu item.
    pub struct ItemId;

    /// Handle to a toggle controlling a menu.
    pub struct ToggleId;
}

// ============================================================================
// Node state
// ============================================================================

/// Where keyboard focus sits relative to a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Focus is outside this menu.
    #[default]
    None,
    /// One of this menu's own links holds focus.
    SelfFocused,
    /// A descendant menu holds focus.
    ChildFocused,
}

/// The kind of input that last drove a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentEvent {
    #[default]
    None,
    Mouse,
    Keyboard,
}

/// Named DOM element sets cached on every menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementSet {
    /// Items of the menu.
    MenuItems,
    /// Items owning a submenu.
    SubmenuItems,
    /// Toggle elements of the submenu items.
    SubmenuToggles,
    /// Submenu elements of the submenu items.
    Submenus,
}

impl ElementSet {
    /// Every set, in discovery order.
    pub const ALL: [Self; 4] = [
        Self::MenuItems,
        Self::SubmenuItems,
        Self::SubmenuToggles,
        Self::Submenus,
    ];

    /// The set's name.
    pub fn name(self) -> &'static str {
        match self {
            Self::MenuItems => "menu-items",
            Self::SubmenuItems => "submenu-items",
            Self::SubmenuToggles => "submenu-toggles",
            Self::Submenus => "submenus",
        }
    }
}

impl FromStr for ElementSet {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|set| set.name() == s)
            .ok_or_else(|| MenuError::UnknownElementSet(s.to_string()))
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// DOM elements discovered for a menu, in document order.
#[derive(Debug, Clone, Default)]
pub(crate) struct DomSets {
    menu_items: Vec<ElementId>,
    submenu_items: Vec<ElementId>,
    submenu_toggles: Vec<ElementId>,
    submenus: Vec<ElementId>,
}

impl DomSets {
    fn get(&self, set: ElementSet) -> &[ElementId] {
        match set {
            ElementSet::MenuItems => &self.menu_items,
            ElementSet::SubmenuItems => &self.submenu_items,
            ElementSet::SubmenuToggles => &self.submenu_toggles,
            ElementSet::Submenus => &self.submenus,
        }
    }
}

// ============================================================================
// Menu
// ============================================================================

/// A menu node: the root menubar or one nested submenu.
#[derive(Debug, Clone)]
pub struct Menu {
    pub(crate) element: ElementId,
    pub(crate) parent: Option<MenuId>,
    pub(crate) root: MenuId,
    /// The item of the parent menu that owns this submenu.
    pub(crate) parent_item: Option<ItemId>,
    pub(crate) is_top_level: bool,
    pub(crate) hoverable: bool,
    pub(crate) hover_delay: Duration,
    pub(crate) items: Vec<ItemId>,
    pub(crate) controller: Option<ElementId>,
    pub(crate) container: Option<ElementId>,
    pub(crate) controller_toggle: Option<ToggleId>,
    pub(crate) dom_sets: DomSets,
    pub(crate) current_child: Option<usize>,
    pub(crate) focus_state: FocusState,
    pub(crate) current_event: CurrentEvent,
}

impl Menu {
    /// The managed menu element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The enclosing menu, `None` for the root.
    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    /// The top-level menu of the tree.
    pub fn root(&self) -> MenuId {
        self.root
    }

    /// The parent item whose submenu this is.
    pub fn parent_item(&self) -> Option<ItemId> {
        self.parent_item
    }

    pub fn is_top_level(&self) -> bool {
        self.is_top_level
    }

    pub fn is_hoverable(&self) -> bool {
        self.hoverable
    }

    pub fn hover_delay(&self) -> Duration {
        self.hover_delay
    }

    /// Items in document order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// The external element opening the whole menu, if any.
    pub fn controller(&self) -> Option<ElementId> {
        self.controller
    }

    /// The element shown and hidden by the controller, if any.
    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    /// The toggle bound to the controller, if any.
    pub fn controller_toggle(&self) -> Option<ToggleId> {
        self.controller_toggle
    }

    /// Index of the current item.
    pub fn current_child(&self) -> Option<usize> {
        self.current_child
    }

    /// The current item.
    pub fn current_item(&self) -> Option<ItemId> {
        self.current_child.and_then(|index| self.items.get(index).copied())
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus_state
    }

    pub fn current_event(&self) -> CurrentEvent {
        self.current_event
    }
}

// ============================================================================
// MenuTree
// ============================================================================

/// A fully constructed menu hierarchy bound to a DOM.
pub struct MenuTree<D: Dom> {
    pub(crate) dom: D,
    pub(crate) selectors: CompiledSelectors,
    pub(crate) classes: MenuClasses,
    pub(crate) aria_roles: bool,
    pub(crate) menus: SlotMap<MenuId, Menu>,
    pub(crate) items: SlotMap<ItemId, MenuItem>,
    pub(crate) toggles: SlotMap<ToggleId, MenuToggle>,
    pub(crate) root: MenuId,
    pub(crate) timers: TimerManager,
    /// Pending hover-close timers and the toggle each one closes.
    pub(crate) hover_timers: HashMap<TimerId, ToggleId>,
    pub(crate) next_generated_id: usize,

    /// Emitted after a toggle opens its menu.
    pub expanded: Signal<MenuNotification>,
    /// Emitted after a toggle closes its menu.
    pub collapsed: Signal<MenuNotification>,
}

impl<D: Dom> MenuTree<D> {
    /// The DOM the tree is bound to.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Mutable access to the DOM, for host-side changes outside the menu.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Release the DOM.
    pub fn into_dom(self) -> D {
        self.dom
    }

    /// The root menu.
    pub fn root(&self) -> MenuId {
        self.root
    }

    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.get(id)
    }

    pub fn toggle(&self, id: ToggleId) -> Option<&MenuToggle> {
        self.toggles.get(id)
    }

    /// Every menu, root first, in construction order.
    pub fn menus(&self) -> impl Iterator<Item = (MenuId, &Menu)> {
        self.menus.iter()
    }

    /// Every toggle, in construction order.
    pub fn toggles(&self) -> impl Iterator<Item = (ToggleId, &MenuToggle)> {
        self.toggles.iter()
    }

    pub fn menu_count(&self) -> usize {
        self.menus.len()
    }

    /// The configured open and close classes.
    pub fn classes(&self) -> &MenuClasses {
        &self.classes
    }

    /// The menu managing `element`.
    pub fn menu_for_element(&self, element: ElementId) -> Option<MenuId> {
        self.menus
            .iter()
            .find(|(_, menu)| menu.element == element)
            .map(|(id, _)| id)
    }

    /// The item whose item or link element is `element`.
    pub fn item_for_element(&self, element: ElementId) -> Option<ItemId> {
        self.items
            .iter()
            .find(|(_, item)| item.element() == element || item.link() == element)
            .map(|(id, _)| id)
    }

    /// Item `index` of `menu`.
    pub fn item_at(&self, menu: MenuId, index: usize) -> Option<ItemId> {
        self.menus.get(menu)?.items.get(index).copied()
    }

    /// The submenu owned by item `index` of `menu`.
    pub fn submenu_at(&self, menu: MenuId, index: usize) -> Option<MenuId> {
        let item = self.item_at(menu, index)?;
        self.items.get(item)?.child_menu()
    }

    /// The toggle of item `index` of `menu`.
    pub fn toggle_at(&self, menu: MenuId, index: usize) -> Option<ToggleId> {
        let item = self.item_at(menu, index)?;
        self.items.get(item)?.toggle()
    }

    /// A cached DOM element set of `menu`.
    pub fn element_set(&self, menu: MenuId, set: ElementSet) -> Result<&[ElementId]> {
        Ok(self.menu_ref(menu)?.dom_sets.get(set))
    }

    /// A cached DOM element set looked up by its name.
    pub fn element_set_by_name(&self, menu: MenuId, name: &str) -> Result<&[ElementId]> {
        self.element_set(menu, name.parse()?)
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Enable or disable hover handling for `menu`.
    pub fn set_hoverable(&mut self, menu: MenuId, hoverable: bool) -> Result<()> {
        self.menu_mut(menu)?.hoverable = hoverable;
        Ok(())
    }

    /// Change how long `menu` waits before closing a submenu the pointer left.
    pub fn set_hover_delay(&mut self, menu: MenuId, delay: Duration) -> Result<()> {
        self.menu_mut(menu)?.hover_delay = delay;
        Ok(())
    }

    /// Replace the class applied to open menus, moving it on every open toggle.
    pub fn set_open_class(&mut self, class: &str) -> Result<()> {
        validate::class_name("open", class)?;
        validate::distinct_class("open", class, &self.classes.close)?;
        let previous = std::mem::replace(&mut self.classes.open, class.to_string());
        self.swap_class(&previous, class, true)
    }

    /// Replace the class applied to closed menus, moving it on every closed toggle.
    pub fn set_close_class(&mut self, class: &str) -> Result<()> {
        validate::class_name("close", class)?;
        validate::distinct_class("close", class, &self.classes.open)?;
        let previous = std::mem::replace(&mut self.classes.close, class.to_string());
        self.swap_class(&previous, class, false)
    }

    fn swap_class(&mut self, previous: &str, class: &str, open: bool) -> Result<()> {
        let elements: Vec<ElementId> = self
            .toggles
            .values()
            .filter(|toggle| toggle.is_open() == open)
            .map(|toggle| toggle.class_target())
            .collect();
        for target in elements {
            self.dom.remove_class(target, previous)?;
            self.dom.add_class(target, class)?;
        }
        Ok(())
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Advance the hover clock, closing every submenu whose delay ran out.
    #[tracing::instrument(skip(self), target = "horizon_menu::hover", level = "trace")]
    pub fn advance_time(&mut self, elapsed: Duration) -> Result<()> {
        for timer in self.timers.advance(elapsed) {
            let Some(toggle) = self.hover_timers.remove(&timer) else {
                continue;
            };
            if self.toggles.get(toggle).and_then(MenuToggle::pending_close) == Some(timer) {
                self.toggles[toggle].set_pending_close(None);
                tracing::debug!(target: targets::HOVER, ?toggle, "hover delay elapsed");
                self.close_toggle(toggle)?;
            }
        }
        Ok(())
    }

    /// Time until the next pending hover close, if any.
    pub fn time_until_next_timer(&mut self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    pub(crate) fn menu_ref(&self, id: MenuId) -> Result<&Menu> {
        self.menus.get(id).ok_or(MenuError::UnknownMenu(id))
    }

    pub(crate) fn menu_mut(&mut self, id: MenuId) -> Result<&mut Menu> {
        self.menus.get_mut(id).ok_or(MenuError::UnknownMenu(id))
    }

    pub(crate) fn require_toggle(&self, id: ToggleId) -> Result<()> {
        if self.toggles.contains_key(id) {
            Ok(())
        } else {
            Err(MenuError::UnknownToggle(id))
        }
    }

    /// `menu` followed by each of its ancestors up to the root.
    pub(crate) fn ancestry(&self, menu: MenuId) -> Vec<MenuId> {
        let mut chain = Vec::new();
        let mut current = Some(menu);
        while let Some(id) = current {
            chain.push(id);
            current = self.menus.get(id).and_then(|m| m.parent);
        }
        chain
    }

    /// Record the input kind on `menu` and every ancestor.
    pub(crate) fn set_current_event(&mut self, menu: MenuId, event: CurrentEvent) {
        for id in self.ancestry(menu) {
            if let Some(node) = self.menus.get_mut(id) {
                node.current_event = event;
            }
        }
    }

    pub(crate) fn set_focus_state(&mut self, menu: MenuId, state: FocusState) {
        let Some(node) = self.menus.get_mut(menu) else {
            return;
        };
        if node.focus_state != state {
            tracing::trace!(target: targets::MENU, ?menu, from = ?node.focus_state, to = ?state, "focus state");
            node.focus_state = state;
        }
    }

    /// The toggle of the current item of `menu`, if that item owns a submenu.
    pub(crate) fn current_toggle(&self, menu: MenuId) -> Option<ToggleId> {
        let item = self.menus.get(menu)?.current_item()?;
        self.items.get(item)?.toggle()
    }

    pub(crate) fn generate_id(&mut self, prefix: &str) -> String {
        self.next_generated_id += 1;
        format!("{prefix}-{}", self.next_generated_id)
    }
}

impl<D: Dom> fmt::Debug for MenuTree<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuTree")
            .field("root", &self.root)
            .field("menus", &self.menus.len())
            .field("items", &self.items.len())
            .field("toggles", &self.toggles.len())
            .field("pending_timers", &self.timers.active_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_set_names() {
        for set in ElementSet::ALL {
            assert_eq!(set.name().parse::<ElementSet>().unwrap(), set);
        }
        assert!(matches!(
            "menu-links".parse::<ElementSet>(),
            Err(MenuError::UnknownElementSet(name)) if name == "menu-links"
        ));
    }

    #[test]
    fn test_menu_defaults() {
        assert_eq!(FocusState::default(), FocusState::None);
        assert_eq!(CurrentEvent::default(), CurrentEvent::None);
    }
}
