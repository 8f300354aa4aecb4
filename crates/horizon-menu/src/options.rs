//! Menu configuration.
//!
//! [`MenuOptions`] gathers everything a menu tree is configured with: the
//! selectors used to discover its structure, the classes toggled on open and
//! close, hover behavior and whether ARIA roles are written. Options can be
//! built in code or loaded from TOML or JSON:
//!
//! ```
//! use horizon_menu::MenuOptions;
//!
//! let options = MenuOptions::from_toml_str(r#"
//! [selectors]
//! submenu_item = "li.dropdown"
//!
//! [hover]
//! enabled = true
//! delay_ms = 400
//! "#).unwrap();
//!
//! assert_eq!(options.selectors.menu_item, "li");
//! assert_eq!(options.hover.delay_ms, 400);
//! ```

use std::time::Duration;

use horizon_menu_core::SelectorList;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validate;

/// Default hover close delay in milliseconds.
pub const DEFAULT_HOVER_DELAY_MS: u64 = 250;

/// Selectors used to discover the menu structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSelectors {
    /// Items of a menu, matched against the menu element's direct children.
    pub menu_item: String,
    /// The link inside an item that receives focus.
    pub menu_link: String,
    /// Items that own a submenu. `None` disables submenu discovery.
    pub submenu_item: Option<String>,
    /// The element inside a submenu item that opens and closes it.
    pub submenu_toggle: String,
    /// The nested menu element inside a submenu item.
    pub submenu: String,
}

impl Default for MenuSelectors {
    fn default() -> Self {
        Self {
            menu_item: "li".to_string(),
            menu_link: "a".to_string(),
            submenu_item: None,
            submenu_toggle: "a".to_string(),
            submenu: "ul".to_string(),
        }
    }
}

/// Class names toggled on controlled menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuClasses {
    /// Applied while open.
    pub open: String,
    /// Applied while closed.
    pub close: String,
}

impl Default for MenuClasses {
    fn default() -> Self {
        Self {
            open: "show".to_string(),
            close: "hide".to_string(),
        }
    }
}

/// Pointer hover behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverOptions {
    /// Open submenus on mouse enter and close them on mouse leave.
    pub enabled: bool,
    /// Delay before a left submenu closes.
    pub delay_ms: u64,
}

impl Default for HoverOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_ms: DEFAULT_HOVER_DELAY_MS,
        }
    }
}

impl HoverOptions {
    /// The close delay as a duration.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Complete configuration of a menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    pub selectors: MenuSelectors,
    pub classes: MenuClasses,
    pub hover: HoverOptions,
    /// Write `menu`/`menuitem`/`none` roles during construction. The root
    /// always gets `menubar`.
    pub aria_roles: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            selectors: MenuSelectors::default(),
            classes: MenuClasses::default(),
            hover: HoverOptions::default(),
            aria_roles: true,
        }
    }
}

impl MenuOptions {
    /// Create options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Parse options from JSON. Missing keys keep their defaults.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serialize options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the submenu item selector.
    pub fn with_submenu_item(mut self, selector: impl Into<String>) -> Self {
        self.selectors.submenu_item = Some(selector.into());
        self
    }

    /// Enable hover with the given close delay.
    pub fn with_hover(mut self, delay: Duration) -> Self {
        self.hover = HoverOptions {
            enabled: true,
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        };
        self
    }

    /// Set the open and close class names.
    pub fn with_classes(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.classes = MenuClasses {
            open: open.into(),
            close: close.into(),
        };
        self
    }

    /// Enable or disable ARIA role assignment.
    pub fn with_aria_roles(mut self, enabled: bool) -> Self {
        self.aria_roles = enabled;
        self
    }

    /// Check every selector and class name.
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    /// Validate and compile the selectors.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        validate::class_name("open", &self.classes.open)?;
        validate::class_name("close", &self.classes.close)?;
        validate::distinct_class("close", &self.classes.close, &self.classes.open)?;

        let selectors = &self.selectors;
        Ok(CompiledSelectors {
            menu_item: validate::selector("menu_item", &selectors.menu_item)?,
            menu_link: validate::selector("menu_link", &selectors.menu_link)?,
            submenu_item: validate::optional_selector(
                "submenu_item",
                selectors.submenu_item.as_deref(),
            )?,
            submenu_toggle: validate::selector("submenu_toggle", &selectors.submenu_toggle)?,
            submenu: validate::selector("submenu", &selectors.submenu)?,
        })
    }
}

/// Parsed form of [`MenuSelectors`], shared by every menu of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSelectors {
    pub menu_item: SelectorList,
    pub menu_link: SelectorList,
    pub submenu_item: Option<SelectorList>,
    pub submenu_toggle: SelectorList,
    pub submenu: SelectorList,
}
