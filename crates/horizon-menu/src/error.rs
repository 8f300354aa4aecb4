//! Error types for the menu engine.

use horizon_menu_core::DomError;

use crate::menu::{ItemId, MenuId, ToggleId};

/// Result type alias for menu operations.
pub type Result<T> = std::result::Result<T, MenuError>;

/// Errors raised while configuring, building or driving a menu tree.
///
/// Every variant is a precondition violation surfaced to the integrating
/// application; nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// A DOM operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// A configured selector does not parse.
    #[error("Invalid selector for '{field}': {source}")]
    InvalidSelector {
        field: &'static str,
        #[source]
        source: DomError,
    },

    /// A configured class name is empty or contains whitespace.
    #[error("Invalid class name for '{field}': {name:?}")]
    InvalidClassName { field: &'static str, name: String },

    /// Only one of the controller and container elements was supplied.
    #[error("A controller element and a container element must be supplied together")]
    IncompleteController,

    /// The parent reference does not point at a menu of this tree.
    #[error("Parent {0:?} is not a menu of this tree")]
    ParentNotMenu(MenuId),

    /// Walking the parent chain never reached a top-level menu.
    #[error("Unable to resolve the root menu: no top-level menu in the parent chain")]
    RootNotFound,

    /// An element set was requested by an unknown name.
    #[error("Unknown element set '{0}'")]
    UnknownElementSet(String),

    /// An item lacks its link, or a submenu item its toggle or submenu element.
    #[error("Menu item {item:?} has no {kind} element")]
    MissingElement {
        kind: &'static str,
        item: horizon_menu_core::ElementId,
    },

    /// The menu handle is not part of this tree.
    #[error("Unknown menu {0:?}")]
    UnknownMenu(MenuId),

    /// The item handle is not part of this tree.
    #[error("Unknown menu item {0:?}")]
    UnknownItem(ItemId),

    /// The toggle handle is not part of this tree.
    #[error("Unknown menu toggle {0:?}")]
    UnknownToggle(ToggleId),

    /// TOML configuration error.
    #[error("Invalid TOML menu options: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON configuration error.
    #[error("Invalid JSON menu options: {0}")]
    Json(#[from] serde_json::Error),
}

impl MenuError {
    /// Create a selector error for a configuration field.
    pub fn invalid_selector(field: &'static str, source: DomError) -> Self {
        Self::InvalidSelector { field, source }
    }

    /// Create a class name error for a configuration field.
    pub fn invalid_class_name(field: &'static str, name: impl Into<String>) -> Self {
        Self::InvalidClassName {
            field,
            name: name.into(),
        }
    }

    /// Whether the error comes from configuration rather than page structure.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelector { .. }
                | Self::InvalidClassName { .. }
                | Self::IncompleteController
                | Self::Toml(_)
                | Self::Json(_)
        )
    }
}
