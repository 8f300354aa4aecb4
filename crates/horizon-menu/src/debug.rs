//! Debug visualization of menu trees.
//!
//! ```
//! use horizon_menu::prelude::*;
//! use horizon_menu::debug::MenuTreeDebug;
//!
//! let mut doc = Document::new();
//! let nav = doc.append(doc.body(), "ul").unwrap();
//! let item = doc.append(nav, "li").unwrap();
//! doc.append_with_text(item, "a", "Home").unwrap();
//!
//! let tree = MenuTreeBuilder::new(nav).build(doc).unwrap();
//! let output = MenuTreeDebug::new().format(&tree);
//! assert!(output.contains("\"Home\""));
//! ```

use std::fmt::Write as _;

use horizon_menu_core::{Dom, TreeFormatOptions};

use crate::menu::{MenuId, MenuTree};

/// Renders a menu tree as indented text: menus, their items, each submenu's
/// open state, and the focus bookkeeping of every menu.
#[derive(Debug, Clone, Default)]
pub struct MenuTreeDebug {
    options: TreeFormatOptions,
}

impl MenuTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the whole tree.
    pub fn format<D: Dom>(&self, tree: &MenuTree<D>) -> String {
        let mut output = String::new();
        let root = tree.root();
        self.format_menu(tree, root, 0, &mut Vec::new(), &mut output);
        output
    }

    fn format_menu<D: Dom>(
        &self,
        tree: &MenuTree<D>,
        id: MenuId,
        depth: usize,
        ancestors_last: &mut Vec<bool>,
        output: &mut String,
    ) {
        let Some(menu) = tree.menu(id) else {
            return;
        };

        if depth == 0 {
            let kind = if menu.is_top_level() { "menubar" } else { "menu" };
            output.push_str(kind);
            self.push_details(tree, id, output);
            output.push('\n');
        }

        let count = menu.items().len();
        for (index, &item_id) in menu.items().iter().enumerate() {
            let item_depth = depth + 1;
            if !self.options.within_depth(item_depth) {
                return;
            }
            let Some(item) = tree.item(item_id) else {
                continue;
            };
            let is_last = index + 1 == count;

            output.push_str(&self.options.prefix(ancestors_last, is_last, item_depth));
            let marker = if menu.current_child() == Some(index) { "*" } else { "" };
            let label = tree.dom().text_content(item.link());
            let _ = write!(output, "{marker}{:?}", label.trim());
            if self.options.show_ids {
                let _ = write!(output, " [{item_id:?}]");
            }

            let child = item.child_menu();
            if let (Some(child), Some(toggle)) = (child, item.toggle().and_then(|t| tree.toggle(t))) {
                let state = if toggle.is_open() { "open" } else { "closed" };
                let _ = write!(output, " -> menu ({state})");
                self.push_details(tree, child, output);
            }
            output.push('\n');

            if let Some(child) = child {
                ancestors_last.push(is_last);
                self.format_menu(tree, child, item_depth, ancestors_last, output);
                ancestors_last.pop();
            }
        }
    }

    fn push_details<D: Dom>(&self, tree: &MenuTree<D>, id: MenuId, output: &mut String) {
        let Some(menu) = tree.menu(id) else {
            return;
        };
        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_state {
            let _ = write!(
                output,
                " focus={:?} event={:?}",
                menu.focus_state(),
                menu.current_event()
            );
        }
    }
}
