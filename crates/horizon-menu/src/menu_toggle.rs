//! Menu toggles: the open/closed switch of a controlled menu.
//!
//! A toggle binds a trigger element (a submenu item's link, or an external
//! controller button) to the menu it reveals. The open and close classes are
//! applied to the toggle's class target: the submenu element for submenu
//! toggles, the container element for a controller. Exactly one of the two
//! classes is present at any time, and `aria-expanded` on the trigger mirrors
//! the open state.

use horizon_menu_core::logging::targets;
use horizon_menu_core::{Dom, ElementId, TimerId};

use crate::error::Result;
use crate::event::MenuNotification;
use crate::menu::{FocusState, ItemId, MenuId, MenuTree, ToggleId};

/// Open/closed state of one controlled menu.
#[derive(Debug, Clone)]
pub struct MenuToggle {
    element: ElementId,
    class_target: ElementId,
    hover_target: Option<ElementId>,
    controlled_menu: MenuId,
    parent_menu: Option<MenuId>,
    item: Option<ItemId>,
    is_open: bool,
    pending_close: Option<TimerId>,
}

impl MenuToggle {
    /// A toggle for the submenu of `item`.
    pub(crate) fn for_submenu(
        element: ElementId,
        submenu: ElementId,
        item_element: ElementId,
        controlled_menu: MenuId,
        parent_menu: MenuId,
        item: ItemId,
    ) -> Self {
        Self {
            element,
            class_target: submenu,
            hover_target: Some(item_element),
            controlled_menu,
            parent_menu: Some(parent_menu),
            item: Some(item),
            is_open: false,
            pending_close: None,
        }
    }

    /// A toggle opening a whole top-level menu from an external controller.
    pub(crate) fn for_controller(controller: ElementId, container: ElementId, root: MenuId) -> Self {
        Self {
            element: controller,
            class_target: container,
            hover_target: None,
            controlled_menu: root,
            parent_menu: None,
            item: None,
            is_open: false,
            pending_close: None,
        }
    }

    /// The trigger element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The element receiving the open/close classes.
    pub fn class_target(&self) -> ElementId {
        self.class_target
    }

    /// The element watched for mouse enter/leave, if hover applies.
    pub fn hover_target(&self) -> Option<ElementId> {
        self.hover_target
    }

    pub fn controlled_menu(&self) -> MenuId {
        self.controlled_menu
    }

    /// The menu holding the trigger; `None` for a controller.
    pub fn parent_menu(&self) -> Option<MenuId> {
        self.parent_menu
    }

    /// The item owning the submenu; `None` for a controller.
    pub fn item(&self) -> Option<ItemId> {
        self.item
    }

    pub fn is_controller(&self) -> bool {
        self.parent_menu.is_none()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The hover-close timer waiting to fire, if any.
    pub fn pending_close(&self) -> Option<TimerId> {
        self.pending_close
    }

    pub(crate) fn set_pending_close(&mut self, timer: Option<TimerId>) {
        self.pending_close = timer;
    }
}

impl<D: Dom> MenuTree<D> {
    /// Open the controlled menu and mark it as focused.
    ///
    /// Open siblings are closed first so only one path of submenus is open.
    pub fn open_toggle(&mut self, toggle: ToggleId) -> Result<()> {
        self.require_toggle(toggle)?;
        self.cancel_pending_close(toggle);
        self.close_siblings(toggle)?;

        let menu = self.toggles[toggle].controlled_menu;
        self.set_focus_state(menu, FocusState::SelfFocused);
        self.expand(toggle)?;
        tracing::debug!(target: targets::TOGGLE, ?toggle, ?menu, "open");
        Ok(())
    }

    /// Open the controlled menu without moving focus into it.
    ///
    /// The menu holding the trigger keeps focus.
    pub fn preview_toggle(&mut self, toggle: ToggleId) -> Result<()> {
        self.require_toggle(toggle)?;
        self.cancel_pending_close(toggle);
        self.close_siblings(toggle)?;

        if let Some(parent) = self.toggles[toggle].parent_menu {
            self.set_focus_state(parent, FocusState::SelfFocused);
        }
        self.expand(toggle)?;
        tracing::debug!(target: targets::TOGGLE, ?toggle, "preview");
        Ok(())
    }

    /// Close the controlled menu and every submenu open beneath it.
    pub fn close_toggle(&mut self, toggle: ToggleId) -> Result<()> {
        self.require_toggle(toggle)?;
        self.cancel_pending_close(toggle);
        if !self.toggles[toggle].is_open {
            return Ok(());
        }

        let menu = self.toggles[toggle].controlled_menu;
        self.close_children(menu)?;
        self.blur_menu(menu)?;
        self.collapse(toggle, true)?;
        self.toggles[toggle].is_open = false;
        tracing::debug!(target: targets::TOGGLE, ?toggle, ?menu, "close");
        Ok(())
    }

    /// Open the controlled menu if closed, close it if open.
    pub fn flip_toggle(&mut self, toggle: ToggleId) -> Result<()> {
        self.require_toggle(toggle)?;
        if self.toggles[toggle].is_open {
            self.close_toggle(toggle)
        } else {
            self.open_toggle(toggle)
        }
    }

    /// Close every other open toggle of the same menu.
    pub fn close_siblings(&mut self, toggle: ToggleId) -> Result<()> {
        self.require_toggle(toggle)?;
        let Some(parent) = self.toggles[toggle].parent_menu else {
            return Ok(());
        };

        let siblings: Vec<ToggleId> = self.menus[parent]
            .items
            .iter()
            .filter_map(|&item| self.items[item].toggle())
            .filter(|&other| other != toggle && self.toggles[other].is_open)
            .collect();
        for sibling in siblings {
            self.close_toggle(sibling)?;
        }
        Ok(())
    }

    /// Write the ARIA wiring of a new toggle and collapse it silently.
    pub(crate) fn initialize_toggle(&mut self, toggle: ToggleId) -> Result<()> {
        let (element, target) = {
            let entry = &self.toggles[toggle];
            (entry.element, entry.class_target)
        };

        let toggle_id = self.ensure_element_id(element, "menu-button")?;
        let target_id = self.ensure_element_id(target, "menu")?;

        self.dom.set_attribute(element, "aria-haspopup", "true")?;
        self.dom.set_attribute(element, "aria-controls", &target_id)?;
        self.dom.set_attribute(target, "aria-labelledby", &toggle_id)?;
        self.collapse(toggle, false)
    }

    /// Read the element's `id`, generating one when missing.
    fn ensure_element_id(&mut self, element: ElementId, prefix: &str) -> Result<String> {
        if let Some(id) = self.dom.attribute(element, "id").filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }
        let id = self.generate_id(prefix);
        self.dom.set_attribute(element, "id", &id)?;
        Ok(id)
    }

    pub(crate) fn cancel_pending_close(&mut self, toggle: ToggleId) {
        let Some(timer) = self.toggles[toggle].pending_close.take() else {
            return;
        };
        self.hover_timers.remove(&timer);
        if self.timers.stop(timer).is_ok() {
            tracing::trace!(target: targets::HOVER, ?toggle, "pending close cancelled");
        }
    }

    fn expand(&mut self, toggle: ToggleId) -> Result<()> {
        let (element, target, was_open) = {
            let entry = &self.toggles[toggle];
            (entry.element, entry.class_target, entry.is_open)
        };

        self.dom.add_class(target, &self.classes.open)?;
        self.dom.remove_class(target, &self.classes.close)?;
        self.dom.set_attribute(element, "aria-expanded", "true")?;
        self.toggles[toggle].is_open = true;

        if !was_open {
            self.expanded.emit(self.notification(toggle));
        }
        Ok(())
    }

    fn collapse(&mut self, toggle: ToggleId, emit: bool) -> Result<()> {
        let (element, target) = {
            let entry = &self.toggles[toggle];
            (entry.element, entry.class_target)
        };

        self.dom.add_class(target, &self.classes.close)?;
        self.dom.remove_class(target, &self.classes.open)?;
        self.dom.set_attribute(element, "aria-expanded", "false")?;

        if emit {
            self.collapsed.emit(self.notification(toggle));
        }
        Ok(())
    }

    fn notification(&self, toggle: ToggleId) -> MenuNotification {
        let entry = &self.toggles[toggle];
        MenuNotification {
            toggle,
            menu: entry.controlled_menu,
            item: entry.item,
            element: entry.class_target,
        }
    }
}
