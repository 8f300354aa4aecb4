//! Named configurations over the menu engine.
//!
//! Both presets produce an ordinary [`MenuTree`]; they only differ in the
//! options they start from.

use horizon_menu_core::{Dom, ElementId};

use crate::error::Result;
use crate::menu::{MenuTree, MenuTreeBuilder};
use crate::options::MenuOptions;

/// Selector matching items that own a submenu in both presets.
pub const DROPDOWN_ITEM_SELECTOR: &str = "li.dropdown";

/// A horizontal top-level navigation bar with dropdown submenus.
///
/// ```
/// use horizon_menu::prelude::*;
///
/// let mut doc = Document::new();
/// let nav = doc.append(doc.body(), "ul").unwrap();
/// let item = doc.append(nav, "li").unwrap();
/// doc.append_with_text(item, "a", "Home").unwrap();
///
/// let tree = Menubar::new(doc, nav).unwrap();
/// assert_eq!(tree.dom().attribute(nav, "role"), Some("menubar"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Menubar;

impl Menubar {
    /// Options used by menubars: dropdown discovery and ARIA roles.
    pub fn default_options() -> MenuOptions {
        MenuOptions::new()
            .with_submenu_item(DROPDOWN_ITEM_SELECTOR)
            .with_aria_roles(true)
    }

    /// A builder preloaded with the menubar options.
    pub fn builder(element: ElementId) -> MenuTreeBuilder {
        MenuTreeBuilder::new(element).options(Self::default_options())
    }

    /// Build a menubar over `element`.
    pub fn new<D: Dom>(dom: D, element: ElementId) -> Result<MenuTree<D>> {
        Self::builder(element).build(dom)
    }
}

/// A single panel shown and hidden by a controller button.
///
/// Disclosure menus are plain navigation lists: only the root gets its
/// `menubar` role, items and nested menus carry no roles.
#[derive(Debug, Clone, Copy)]
pub struct DisclosureMenu;

impl DisclosureMenu {
    /// Options used by disclosure menus.
    pub fn default_options() -> MenuOptions {
        MenuOptions::new()
            .with_submenu_item(DROPDOWN_ITEM_SELECTOR)
            .with_aria_roles(false)
    }

    /// A builder preloaded with the disclosure options.
    pub fn builder(element: ElementId) -> MenuTreeBuilder {
        MenuTreeBuilder::new(element).options(Self::default_options())
    }

    /// Build a disclosure menu over `element`, opened by `controller` and
    /// revealing `container`.
    pub fn new<D: Dom>(
        dom: D,
        element: ElementId,
        controller: ElementId,
        container: ElementId,
    ) -> Result<MenuTree<D>> {
        Self::builder(element)
            .controller(controller, container)
            .build(dom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_roles() {
        let menubar = Menubar::default_options();
        let disclosure = DisclosureMenu::default_options();

        assert!(menubar.aria_roles);
        assert!(!disclosure.aria_roles);
        assert_eq!(menubar.selectors, disclosure.selectors);
        assert_eq!(
            menubar.selectors.submenu_item.as_deref(),
            Some(DROPDOWN_ITEM_SELECTOR)
        );
    }
}
