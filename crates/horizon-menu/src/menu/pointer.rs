//! Click and hover handling.

use horizon_menu_core::logging::targets;
use horizon_menu_core::{Dom, ElementId};

use super::{CurrentEvent, FocusState, MenuId, MenuTree, ToggleId};
use crate::error::Result;
use crate::event::EventResponse;
use crate::menu_toggle::MenuToggle;

impl<D: Dom> MenuTree<D> {
    /// Handle a click anywhere in the document.
    ///
    /// Clicking a submenu toggle or the controller flips it. Every focused
    /// menu not containing the target is then closed and blurred.
    pub fn handle_click(&mut self, target: ElementId) -> Result<EventResponse> {
        let mut response = EventResponse::new();

        if let Some(toggle) = self.submenu_toggle_containing(target) {
            self.click_submenu_toggle(toggle)?;
            response.prevent();
        } else if let Some(toggle) = self.controller_toggle_containing(target) {
            let root = self.root;
            self.set_current_event(root, CurrentEvent::Mouse);
            self.flip_toggle(toggle)?;
            tracing::debug!(target: targets::POINTER, open = self.toggles[toggle].is_open(), "controller clicked");
            response.prevent();
        }

        self.close_menus_outside(target)?;
        Ok(response)
    }

    fn click_submenu_toggle(&mut self, toggle: ToggleId) -> Result<()> {
        let Some(menu) = self.toggles[toggle].parent_menu() else {
            return Ok(());
        };
        self.set_current_event(menu, CurrentEvent::Mouse);
        self.flip_toggle(toggle)?;

        let open = self.toggles[toggle].is_open();
        tracing::debug!(target: targets::POINTER, ?toggle, open, "submenu toggle clicked");
        if open {
            let child = self.toggles[toggle].controlled_menu();
            self.mark_item_path(menu, toggle)?;
            self.set_focus_state(child, FocusState::None);
        }
        Ok(())
    }

    /// Close and blur every focused menu the click landed outside of.
    fn close_menus_outside(&mut self, target: ElementId) -> Result<()> {
        let outside: Vec<MenuId> = self
            .menus
            .iter()
            .filter(|(_, menu)| menu.focus_state != FocusState::None)
            .filter(|(_, menu)| {
                let inside = [Some(menu.element), menu.controller, menu.container]
                    .into_iter()
                    .flatten()
                    .any(|element| self.dom.contains(element, target));
                !inside
            })
            .map(|(id, _)| id)
            .collect();

        for menu in outside {
            tracing::trace!(target: targets::POINTER, ?menu, "click outside");
            self.menus[menu].current_event = CurrentEvent::Mouse;
            self.close_children(menu)?;
            self.blur_menu(menu)?;
            if let Some(toggle) = self.menus[menu].controller_toggle {
                self.close_toggle(toggle)?;
            }
        }
        Ok(())
    }

    /// Handle the pointer entering `target`.
    pub fn handle_mouse_enter(&mut self, target: ElementId) -> Result<EventResponse> {
        let Some((toggle, menu)) = self.hover_toggle(target) else {
            return Ok(EventResponse::new());
        };

        tracing::trace!(target: targets::HOVER, ?toggle, "mouse enter");
        self.set_current_event(menu, CurrentEvent::Mouse);
        self.preview_toggle(toggle)?;
        self.mark_item_path(menu, toggle)?;
        Ok(EventResponse::new())
    }

    /// Handle the pointer leaving `target`.
    ///
    /// The submenu closes once the menu's hover delay elapses, unless the
    /// pointer comes back first.
    pub fn handle_mouse_leave(&mut self, target: ElementId) -> Result<EventResponse> {
        let Some((toggle, menu)) = self.hover_toggle(target) else {
            return Ok(EventResponse::new());
        };

        self.set_current_event(menu, CurrentEvent::Mouse);
        self.cancel_pending_close(toggle);

        let delay = self.menus[menu].hover_delay;
        if delay.is_zero() {
            self.close_toggle(toggle)?;
        } else if self.toggles[toggle].is_open() {
            let timer = self.timers.start_one_shot(delay);
            self.hover_timers.insert(timer, toggle);
            self.toggles[toggle].set_pending_close(Some(timer));
            tracing::trace!(target: targets::HOVER, ?toggle, ?delay, "close scheduled");
        }
        Ok(EventResponse::new())
    }

    /// Make the toggle's item current in `menu` without moving DOM focus,
    /// marking `menu` self-focused and its ancestors child-focused.
    fn mark_item_path(&mut self, menu: MenuId, toggle: ToggleId) -> Result<()> {
        let Some(item) = self.toggles[toggle].item() else {
            return Ok(());
        };
        match self.menus[menu].items.iter().position(|&i| i == item) {
            Some(index) => self.handle_focus(menu, index),
            None => Ok(()),
        }
    }

    /// The innermost submenu toggle whose trigger contains `target`.
    fn submenu_toggle_containing(&self, target: ElementId) -> Option<ToggleId> {
        self.innermost_toggle(target, |toggle| !toggle.is_controller())
    }

    fn controller_toggle_containing(&self, target: ElementId) -> Option<ToggleId> {
        self.innermost_toggle(target, |toggle| toggle.is_controller())
    }

    fn innermost_toggle(
        &self,
        target: ElementId,
        filter: impl Fn(&MenuToggle) -> bool,
    ) -> Option<ToggleId> {
        let mut current = Some(target);
        while let Some(element) = current {
            let found = self
                .toggles
                .iter()
                .find(|(_, toggle)| toggle.element() == element && filter(toggle));
            if let Some((id, _)) = found {
                return Some(id);
            }
            current = self.dom.parent(element);
        }
        None
    }

    /// The submenu toggle hovered through `target`, if its menu is hoverable.
    fn hover_toggle(&self, target: ElementId) -> Option<(ToggleId, MenuId)> {
        self.toggles.iter().find_map(|(id, toggle)| {
            let menu = toggle.parent_menu()?;
            let hoverable = self.menus.get(menu).is_some_and(|m| m.hoverable);
            (hoverable && toggle.hover_target() == Some(target)).then_some((id, menu))
        })
    }
}
