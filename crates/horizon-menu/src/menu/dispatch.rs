//! Routing of host events to menu nodes.
//!
//! A single dispatcher serves the whole tree: the host forwards every event
//! once and the tree finds the menus it concerns. Key events bubble from the
//! innermost menu containing the target up to the root until one of them
//! stops propagation.

use horizon_menu_core::logging::targets;
use horizon_menu_core::{Dom, ElementId};

use super::{MenuId, MenuTree};
use crate::error::Result;
use crate::event::{EventResponse, MenuEvent};
use crate::keyboard::KeyInput;

impl<D: Dom> MenuTree<D> {
    /// Deliver a host event to the tree.
    #[tracing::instrument(skip(self), target = "horizon_menu::menu", level = "trace")]
    pub fn dispatch(&mut self, event: MenuEvent) -> Result<EventResponse> {
        match event {
            MenuEvent::Focus { target } => self.dispatch_focus(target),
            MenuEvent::Click { target } => self.handle_click(target),
            MenuEvent::KeyDown { target, input } => self.dispatch_key(target, &input, true),
            MenuEvent::KeyUp { target, input } => self.dispatch_key(target, &input, false),
            MenuEvent::MouseEnter { target } => self.handle_mouse_enter(target),
            MenuEvent::MouseLeave { target } => self.handle_mouse_leave(target),
        }
    }

    fn dispatch_focus(&mut self, target: ElementId) -> Result<EventResponse> {
        let found = self
            .items
            .iter()
            .find(|(_, item)| item.link() == target)
            .map(|(_, item)| item.parent_menu());
        let Some(menu) = found else {
            return Ok(EventResponse::new());
        };

        let index = self.menus[menu]
            .items
            .iter()
            .position(|&item| self.items[item].link() == target);
        if let Some(index) = index {
            self.handle_focus(menu, index)?;
        }
        Ok(EventResponse::new())
    }

    fn dispatch_key(
        &mut self,
        target: ElementId,
        input: &KeyInput,
        is_down: bool,
    ) -> Result<EventResponse> {
        if self.is_controller_target(target) {
            return if is_down {
                self.handle_controller_keydown(input)
            } else {
                self.handle_controller_keyup(input)
            };
        }

        let Some(innermost) = self.innermost_menu(target) else {
            tracing::warn!(target: targets::KEYBOARD, ?target, "key event outside the menu tree");
            return Ok(EventResponse::new());
        };

        let mut response = EventResponse::new();
        for menu in self.ancestry(innermost) {
            response = if is_down {
                self.handle_keydown(menu, input)?
            } else {
                self.handle_keyup(menu, input)?
            };
            if response.is_propagation_stopped() {
                break;
            }
        }
        Ok(response)
    }

    fn is_controller_target(&self, target: ElementId) -> bool {
        self.menus
            .get(self.root)
            .and_then(|menu| menu.controller)
            .is_some_and(|controller| self.dom.contains(controller, target))
    }

    /// The deepest menu whose element contains `target`.
    pub fn innermost_menu(&self, target: ElementId) -> Option<MenuId> {
        let mut current = Some(target);
        while let Some(element) = current {
            if let Some(menu) = self.menu_for_element(element) {
                return Some(menu);
            }
            current = self.dom.parent(element);
        }
        None
    }
}
