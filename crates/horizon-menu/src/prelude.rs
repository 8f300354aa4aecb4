//! Prelude module for Horizon Menu.
//!
//! ```ignore
//! use horizon_menu::prelude::*;
//! ```

// ============================================================================
// DOM
// ============================================================================

pub use horizon_menu_core::{Document, Dom, ElementId};

// ============================================================================
// Menu tree
// ============================================================================

pub use crate::menu::{FocusState, MenuId, MenuTree, MenuTreeBuilder};
pub use crate::options::MenuOptions;
pub use crate::presets::{DisclosureMenu, Menubar};

// ============================================================================
// Events
// ============================================================================

pub use crate::event::{EventResponse, MenuEvent};
pub use crate::keyboard::{KeyInput, MenuKey};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::MenuError;
