//! Menu items: the navigable entries of a menu.

use horizon_menu_core::{Dom, ElementId};

use crate::error::{MenuError, Result};
use crate::menu::{CurrentEvent, ItemId, MenuId, MenuTree, ToggleId};

/// A single entry of a menu.
///
/// An item wraps its DOM element and the link inside it that receives focus.
/// Submenu items additionally reference the child menu they reveal and the
/// toggle controlling it; the pair is stored together so an item can never
/// hold one without the other.
#[derive(Debug, Clone)]
pub struct MenuItem {
    element: ElementId,
    link: ElementId,
    parent_menu: MenuId,
    submenu: Option<(MenuId, ToggleId)>,
}

impl MenuItem {
    pub(crate) fn new(element: ElementId, link: ElementId, parent_menu: MenuId) -> Self {
        Self {
            element,
            link,
            parent_menu,
            submenu: None,
        }
    }

    pub(crate) fn attach_submenu(&mut self, menu: MenuId, toggle: ToggleId) {
        self.submenu = Some((menu, toggle));
    }

    /// The item element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The focusable link inside the item.
    pub fn link(&self) -> ElementId {
        self.link
    }

    /// The menu the item belongs to.
    pub fn parent_menu(&self) -> MenuId {
        self.parent_menu
    }

    pub fn is_submenu_item(&self) -> bool {
        self.submenu.is_some()
    }

    /// The submenu revealed by this item.
    pub fn child_menu(&self) -> Option<MenuId> {
        self.submenu.map(|(menu, _)| menu)
    }

    /// The toggle opening the submenu.
    pub fn toggle(&self) -> Option<ToggleId> {
        self.submenu.map(|(_, toggle)| toggle)
    }
}

impl<D: Dom> MenuTree<D> {
    /// Give DOM focus to the item's link.
    ///
    /// Does nothing while the owning menu is driven by the mouse, so keyboard
    /// focus styling never fights pointer hover.
    pub fn focus_item(&mut self, item: ItemId) -> Result<()> {
        let (link, menu) = self.item_link(item)?;
        if self.menus_current_event(menu) != CurrentEvent::Mouse {
            self.dom.focus(link)?;
        }
        Ok(())
    }

    /// Remove DOM focus from the item's link, under the same rule as
    /// [`focus_item`](Self::focus_item).
    pub fn blur_item(&mut self, item: ItemId) -> Result<()> {
        let (link, menu) = self.item_link(item)?;
        if self.menus_current_event(menu) != CurrentEvent::Mouse {
            self.dom.blur(link)?;
        }
        Ok(())
    }

    fn item_link(&self, item: ItemId) -> Result<(ElementId, MenuId)> {
        self.items
            .get(item)
            .map(|entry| (entry.link, entry.parent_menu))
            .ok_or(MenuError::UnknownItem(item))
    }

    fn menus_current_event(&self, menu: MenuId) -> CurrentEvent {
        self.menus
            .get(menu)
            .map(|m| m.current_event())
            .unwrap_or_default()
    }
}
