//! Keyboard interaction for menubars, submenus and controllers.
//!
//! Keydown decides which keys suppress the browser default; keyup performs
//! the navigation. Keys not listed here fall through to native behavior.

use horizon_menu_core::Dom;
use horizon_menu_core::logging::targets;

use super::{CurrentEvent, FocusState, MenuId, MenuTree};
use crate::error::Result;
use crate::event::EventResponse;
use crate::keyboard::{KeyInput, MenuKey};

impl<D: Dom> MenuTree<D> {
    /// Handle a keydown received by `menu`.
    pub fn handle_keydown(&mut self, menu: MenuId, input: &KeyInput) -> Result<EventResponse> {
        self.menu_ref(menu)?;
        let mut response = EventResponse::new();
        let key = input.menu_key();
        self.set_current_event(menu, CurrentEvent::Keyboard);

        if key == MenuKey::Tab {
            let root = self.root;
            if self.menu_ref(root)?.focus_state != FocusState::None {
                self.close_children(root)?;
                self.blur_tree()?;
            } else {
                self.focus_menu(root)?;
            }
            // Each menu on the bubbling path would handle Tab again.
            response.stop_propagation();
            return Ok(response);
        }

        if input.search_character().is_some() {
            response.prevent();
            return Ok(response);
        }

        let node = self.menu_ref(menu)?;
        if node.focus_state != FocusState::SelfFocused {
            return Ok(response);
        }
        let on_submenu_item = self.current_toggle(menu).is_some();

        let suppress = match key {
            key if key.is_arrow() => true,
            MenuKey::Home | MenuKey::End => true,
            key if key.is_activation() => on_submenu_item,
            MenuKey::Escape if node.is_top_level => node.controller_toggle.is_some(),
            MenuKey::Escape => true,
            _ => false,
        };

        if suppress {
            response.prevent();
        }
        Ok(response)
    }

    /// Handle a keyup received by `menu`.
    pub fn handle_keyup(&mut self, menu: MenuId, input: &KeyInput) -> Result<EventResponse> {
        self.menu_ref(menu)?;
        let mut response = EventResponse::new();
        let key = input.menu_key();
        self.set_current_event(menu, CurrentEvent::Keyboard);

        if let Some(character) = input.search_character() {
            response.prevent();
            self.focus_child_with_character(menu, character)?;
            return Ok(response);
        }

        let node = self.menu_ref(menu)?;
        if node.focus_state != FocusState::SelfFocused {
            return Ok(response);
        }

        tracing::trace!(target: targets::KEYBOARD, ?menu, ?key, top_level = node.is_top_level, "keyup");
        if node.is_top_level {
            self.top_level_keyup(menu, key, &mut response)?;
        } else {
            self.submenu_keyup(menu, key, &mut response)?;
        }
        Ok(response)
    }

    fn top_level_keyup(
        &mut self,
        menu: MenuId,
        key: MenuKey,
        response: &mut EventResponse,
    ) -> Result<()> {
        match key {
            MenuKey::Space | MenuKey::Enter | MenuKey::ArrowDown => {
                if self.open_current_submenu(menu, false)? {
                    response.prevent();
                }
            }
            MenuKey::ArrowUp => {
                if self.open_current_submenu(menu, true)? {
                    response.prevent();
                }
            }
            MenuKey::ArrowRight | MenuKey::ArrowLeft => {
                response.prevent();
                let was_open = self
                    .current_toggle(menu)
                    .is_some_and(|toggle| self.toggles[toggle].is_open());

                if key == MenuKey::ArrowRight {
                    self.focus_next_child(menu)?;
                } else {
                    self.focus_previous_child(menu)?;
                }

                if was_open {
                    self.preview_current_or_close(menu)?;
                }
            }
            MenuKey::Home => {
                response.prevent();
                self.focus_first_child(menu)?;
            }
            MenuKey::End => {
                response.prevent();
                self.focus_last_child(menu)?;
            }
            MenuKey::Escape => {
                let controller = self.menus[menu].controller_toggle;
                if let Some(toggle) = controller
                    && self.toggles[toggle].is_open()
                {
                    response.prevent();
                    self.close_toggle(toggle)?;
                    self.focus_controller()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn submenu_keyup(
        &mut self,
        menu: MenuId,
        key: MenuKey,
        response: &mut EventResponse,
    ) -> Result<()> {
        let root = self.menus[menu].root;
        match key {
            MenuKey::Escape => {
                response.prevent();
                self.close_children(root)?;
                self.focus_current_child(root)?;
            }
            MenuKey::ArrowRight => {
                response.prevent();
                if !self.open_current_submenu(menu, false)? {
                    self.close_children(root)?;
                    self.focus_next_child(root)?;
                    self.preview_current(root)?;
                }
            }
            MenuKey::ArrowLeft => {
                response.prevent();
                self.leave_submenu(menu)?;
            }
            MenuKey::ArrowDown => {
                response.prevent();
                self.focus_next_child(menu)?;
            }
            MenuKey::ArrowUp => {
                response.prevent();
                self.focus_previous_child(menu)?;
            }
            MenuKey::Home => {
                response.prevent();
                self.focus_first_child(menu)?;
            }
            MenuKey::End => {
                response.prevent();
                self.focus_last_child(menu)?;
            }
            MenuKey::Space | MenuKey::Enter => {
                if self.open_current_submenu(menu, false)? {
                    response.prevent();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle a keydown on the controller element.
    pub fn handle_controller_keydown(&mut self, input: &KeyInput) -> Result<EventResponse> {
        let mut response = EventResponse::new();
        let root = self.root;
        self.set_current_event(root, CurrentEvent::Keyboard);

        let open = self.controller_is_open();
        match input.menu_key() {
            key if key.is_activation() => response.prevent(),
            MenuKey::Escape if open => response.prevent(),
            _ => {}
        }
        Ok(response)
    }

    /// Handle a keyup on the controller element.
    pub fn handle_controller_keyup(&mut self, input: &KeyInput) -> Result<EventResponse> {
        let mut response = EventResponse::new();
        let root = self.root;
        let Some(toggle) = self.menu_ref(root)?.controller_toggle else {
            return Ok(response);
        };
        self.set_current_event(root, CurrentEvent::Keyboard);

        match input.menu_key() {
            MenuKey::Space | MenuKey::Enter => {
                response.prevent();
                self.flip_toggle(toggle)?;
                if self.toggles[toggle].is_open() {
                    self.focus_first_child(root)?;
                }
            }
            MenuKey::Escape if self.toggles[toggle].is_open() => {
                response.prevent();
                self.close_toggle(toggle)?;
                self.focus_controller()?;
            }
            _ => {}
        }
        Ok(response)
    }

    fn controller_is_open(&self) -> bool {
        self.menus
            .get(self.root)
            .and_then(|menu| menu.controller_toggle)
            .is_some_and(|toggle| self.toggles[toggle].is_open())
    }

    /// Open the current item's submenu and focus its first (or last) item.
    ///
    /// Returns `false` when the current item has no submenu.
    fn open_current_submenu(&mut self, menu: MenuId, focus_last: bool) -> Result<bool> {
        let Some(toggle) = self.current_toggle(menu) else {
            return Ok(false);
        };
        let child = self.toggles[toggle].controlled_menu();

        self.menus[child].current_event = CurrentEvent::Keyboard;
        self.open_toggle(toggle)?;
        if focus_last {
            self.focus_last_child(child)?;
        } else {
            self.focus_first_child(child)?;
        }
        Ok(true)
    }

    /// Preview the current item's submenu, if it has one.
    fn preview_current(&mut self, menu: MenuId) -> Result<()> {
        if let Some(toggle) = self.current_toggle(menu) {
            self.preview_toggle(toggle)?;
        }
        Ok(())
    }

    /// Keep a submenu open while moving across the menubar.
    fn preview_current_or_close(&mut self, menu: MenuId) -> Result<()> {
        match self.current_toggle(menu) {
            Some(toggle) => self.preview_toggle(toggle),
            None => self.close_children(menu),
        }
    }

    /// Close `menu` and return focus to the item owning it.
    ///
    /// When that item sits in the root menubar, the menubar also moves to the
    /// previous item and previews its submenu.
    fn leave_submenu(&mut self, menu: MenuId) -> Result<()> {
        let (Some(parent), Some(item)) = (self.menus[menu].parent, self.menus[menu].parent_item)
        else {
            return Ok(());
        };
        if let Some(toggle) = self.items[item].toggle() {
            self.close_toggle(toggle)?;
        }
        self.focus_current_child(parent)?;

        if parent == self.root {
            self.focus_previous_child(parent)?;
            self.preview_current(parent)?;
        }
        Ok(())
    }
}
