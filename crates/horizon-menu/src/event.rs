//! Events delivered to a menu tree and the responses it returns.

use horizon_menu_core::ElementId;

use crate::keyboard::KeyInput;
use crate::menu::{ItemId, MenuId, ToggleId};

/// An input event forwarded by the host.
///
/// `target` is the element the event was dispatched to. Clicks are expected
/// for every click on the page, not only those inside the menu, so that
/// clicking elsewhere can close it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// An element received input focus.
    Focus { target: ElementId },
    /// A click anywhere in the document.
    Click { target: ElementId },
    /// A key was pressed while `target` had focus.
    KeyDown { target: ElementId, input: KeyInput },
    /// A key was released while `target` had focus.
    KeyUp { target: ElementId, input: KeyInput },
    /// The pointer entered `target`.
    MouseEnter { target: ElementId },
    /// The pointer left `target`.
    MouseLeave { target: ElementId },
}

impl MenuEvent {
    /// The element the event targets.
    pub fn target(&self) -> ElementId {
        match self {
            Self::Focus { target }
            | Self::Click { target }
            | Self::KeyDown { target, .. }
            | Self::KeyUp { target, .. }
            | Self::MouseEnter { target }
            | Self::MouseLeave { target } => *target,
        }
    }
}

/// What the host should do with the native event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the browser's default action.
    default_prevented: bool,
    /// Stop bubbling to enclosing handlers.
    propagation_stopped: bool,
}

impl EventResponse {
    /// A response leaving the native event untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the default action and stop propagation.
    pub fn prevent(&mut self) {
        self.default_prevented = true;
        self.propagation_stopped = true;
    }

    /// Stop propagation but keep the default action.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether the default action must be suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether bubbling must stop.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Payload of the expand and collapse notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuNotification {
    /// The toggle that changed state.
    pub toggle: ToggleId,
    /// The menu it controls.
    pub menu: MenuId,
    /// The item owning the submenu; `None` for a controller toggle.
    pub item: Option<ItemId>,
    /// The element whose classes changed.
    pub element: ElementId,
}
