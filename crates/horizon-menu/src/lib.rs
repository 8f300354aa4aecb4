//! Horizon Menu - accessible, keyboard-navigable menubars and disclosure menus.
//!
//! The crate turns an existing tree of list elements into a WAI-ARIA menu: it
//! discovers menus and submenus with CSS selectors, keeps roles, tab stops and
//! `aria-expanded` consistent, and interprets keyboard, click and hover events
//! into focus movement and submenu open/close actions.
//!
//! The engine works against the [`Dom`] trait; hosts forward their events
//! through [`MenuTree::dispatch`] and advance hover timers with
//! [`MenuTree::advance_time`].
//!
//! # Example
//!
//! ```
//! use horizon_menu::prelude::*;
//!
//! let mut doc = Document::new();
//! let nav = doc.append(doc.body(), "ul").unwrap();
//! let products = doc.append(nav, "li").unwrap();
//! doc.add_class(products, "dropdown").unwrap();
//! let link = doc.append_with_text(products, "a", "Products").unwrap();
//! let submenu = doc.append(products, "ul").unwrap();
//! let widgets = doc.append(submenu, "li").unwrap();
//! let widgets_link = doc.append_with_text(widgets, "a", "Widgets").unwrap();
//!
//! let mut menubar = Menubar::new(doc, nav).unwrap();
//! menubar.dispatch(MenuEvent::Focus { target: link }).unwrap();
//! menubar
//!     .dispatch(MenuEvent::KeyUp { target: link, input: KeyInput::new("Enter") })
//!     .unwrap();
//!
//! assert!(menubar.dom().has_class(submenu, "show"));
//! assert_eq!(menubar.dom().active_element(), Some(widgets_link));
//! ```

pub mod debug;
mod error;
pub mod event;
pub mod keyboard;
pub mod menu;
mod menu_item;
mod menu_toggle;
pub mod options;
pub mod prelude;
pub mod presets;
pub mod validate;

pub use error::{MenuError, Result};
pub use event::{EventResponse, MenuEvent, MenuNotification};
pub use horizon_menu_core::{Document, Dom, DomError, ElementId, SelectorList, Signal};
pub use keyboard::{KeyInput, KeyModifiers, MenuKey};
pub use menu::{
    CurrentEvent, ElementSet, FocusState, ItemId, Menu, MenuId, MenuTree, MenuTreeBuilder,
    ToggleId,
};
pub use menu_item::MenuItem;
pub use menu_toggle::MenuToggle;
pub use options::{HoverOptions, MenuClasses, MenuOptions, MenuSelectors};
pub use presets::{DisclosureMenu, Menubar};
