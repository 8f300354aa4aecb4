//! Focus movement within and across menus.

use horizon_menu_core::Dom;
use horizon_menu_core::logging::targets;

use super::{CurrentEvent, FocusState, MenuId, MenuTree};
use crate::error::Result;

impl<D: Dom> MenuTree<D> {
    /// Make item `index` of `menu` current and focus it.
    ///
    /// The previously current item is blurred first. Out-of-range indices are
    /// ignored.
    pub fn focus_child(&mut self, menu: MenuId, index: usize) -> Result<()> {
        if index >= self.menu_ref(menu)?.items.len() {
            return Ok(());
        }
        self.blur_current_child(menu)?;
        self.set_current_child(menu, index)?;
        self.focus_current_child(menu)
    }

    /// Focus the first item.
    pub fn focus_first_child(&mut self, menu: MenuId) -> Result<()> {
        self.focus_child(menu, 0)
    }

    /// Focus the last item.
    pub fn focus_last_child(&mut self, menu: MenuId) -> Result<()> {
        match self.menu_ref(menu)?.items.len() {
            0 => Ok(()),
            len => self.focus_child(menu, len - 1),
        }
    }

    /// Focus the item after the current one, wrapping to the first.
    pub fn focus_next_child(&mut self, menu: MenuId) -> Result<()> {
        let node = self.menu_ref(menu)?;
        let len = node.items.len();
        if len == 0 {
            return Ok(());
        }
        let next = node.current_child.map_or(0, |current| (current + 1) % len);
        self.focus_child(menu, next)
    }

    /// Focus the item before the current one, wrapping to the last.
    pub fn focus_previous_child(&mut self, menu: MenuId) -> Result<()> {
        let node = self.menu_ref(menu)?;
        let len = node.items.len();
        if len == 0 {
            return Ok(());
        }
        let previous = match node.current_child {
            Some(0) | None => len - 1,
            Some(current) => current - 1,
        };
        self.focus_child(menu, previous)
    }

    /// Focus the next item whose text starts with `character`.
    ///
    /// The search runs forward from the item after the current one and stops
    /// at the end of the list without wrapping. Returns whether an item matched.
    pub fn focus_child_with_character(&mut self, menu: MenuId, character: char) -> Result<bool> {
        let node = self.menu_ref(menu)?;
        let start = node.current_child.map_or(0, |current| current + 1);
        let needle: String = character.to_lowercase().collect();

        let found = node
            .items
            .iter()
            .enumerate()
            .skip(start)
            .find(|&(_, &item)| {
                let text = self.dom.text_content(self.items[item].link());
                text.trim().to_lowercase().starts_with(&needle)
            })
            .map(|(index, _)| index);

        tracing::trace!(target: targets::KEYBOARD, ?menu, %character, ?found, "character search");
        match found {
            Some(index) => {
                self.focus_child(menu, index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Focus the current item of `menu` and mark the focus path to it.
    pub fn focus_current_child(&mut self, menu: MenuId) -> Result<()> {
        self.set_focus_state(menu, FocusState::SelfFocused);
        let Some(index) = self.menu_ref(menu)?.current_child else {
            return Ok(());
        };
        let item = self.menus[menu].items[index];
        self.focus_item(item)?;
        self.handle_focus(menu, index)
    }

    /// Record that item `index` of `menu` received focus.
    ///
    /// The menu becomes self-focused, every ancestor child-focused, and the
    /// item's own submenu (if any) unfocused.
    pub fn handle_focus(&mut self, menu: MenuId, index: usize) -> Result<()> {
        if index >= self.menu_ref(menu)?.items.len() {
            return Ok(());
        }
        self.set_current_child(menu, index)?;
        self.set_focus_state(menu, FocusState::SelfFocused);
        for ancestor in self.ancestry(menu).into_iter().skip(1) {
            self.set_focus_state(ancestor, FocusState::ChildFocused);
        }
        if let Some(child) = self.submenu_at(menu, index) {
            self.set_focus_state(child, FocusState::None);
        }
        Ok(())
    }

    /// Mark `menu` as holding focus without moving DOM focus.
    pub fn focus_menu(&mut self, menu: MenuId) -> Result<()> {
        self.menu_ref(menu)?;
        self.set_focus_state(menu, FocusState::SelfFocused);
        Ok(())
    }

    /// Blur the current item of `menu`, if any.
    pub fn blur_current_child(&mut self, menu: MenuId) -> Result<()> {
        match self.menu_ref(menu)?.current_item() {
            Some(item) => self.blur_item(item),
            None => Ok(()),
        }
    }

    /// Mark `menu` as unfocused and blur its current item.
    pub fn blur_menu(&mut self, menu: MenuId) -> Result<()> {
        self.blur_current_child(menu)?;
        self.set_focus_state(menu, FocusState::None);
        Ok(())
    }

    /// Blur every menu of the tree.
    pub fn blur_tree(&mut self) -> Result<()> {
        let ids: Vec<MenuId> = self.menus.keys().collect();
        for menu in ids {
            self.blur_menu(menu)?;
        }
        Ok(())
    }

    /// Close every open submenu directly under `menu`, and theirs in turn.
    pub fn close_children(&mut self, menu: MenuId) -> Result<()> {
        let open: Vec<_> = self
            .menu_ref(menu)?
            .items
            .iter()
            .filter_map(|&item| self.items[item].toggle())
            .filter(|&toggle| self.toggles[toggle].is_open())
            .collect();
        for toggle in open {
            self.close_toggle(toggle)?;
        }
        Ok(())
    }

    /// Give DOM focus back to the root's controller element.
    pub fn focus_controller(&mut self) -> Result<()> {
        let root = self.root;
        let (controller, event) = {
            let menu = self.menu_ref(root)?;
            (menu.controller, menu.current_event)
        };
        if let Some(controller) = controller
            && event != CurrentEvent::Mouse
        {
            self.dom.focus(controller)?;
        }
        Ok(())
    }

    /// Update the current index, moving the root's single tab stop with it.
    fn set_current_child(&mut self, menu: MenuId, index: usize) -> Result<()> {
        let node = &self.menus[menu];
        let previous = node.current_item();
        let next = node.items[index];
        let is_root = menu == self.root;

        if is_root && previous != Some(next) {
            if let Some(previous) = previous {
                let link = self.items[previous].link();
                self.dom.set_attribute(link, "tabindex", "-1")?;
            }
            let link = self.items[next].link();
            self.dom.set_attribute(link, "tabindex", "0")?;
        }

        self.menus[menu].current_child = Some(index);
        tracing::trace!(target: targets::MENU, ?menu, index, "current child");
        Ok(())
    }
}
