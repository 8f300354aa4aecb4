//! The DOM contract consumed by the menu engine.
//!
//! The menu engine never talks to a browser directly. Everything it needs from
//! the page (scoped selector queries, attribute and class manipulation, focus
//! and visible text) goes through the [`Dom`] trait. [`Document`] is an
//! in-memory implementation used by native hosts and by the test suites.
//!
//! # Example
//!
//! ```
//! use horizon_menu_core::dom::{Document, Dom, SelectorList};
//!
//! let mut doc = Document::new();
//! let list = doc.append(doc.body(), "ul").unwrap();
//! let item = doc.append(list, "li").unwrap();
//! let link = doc.append_with_text(item, "a", "Home").unwrap();
//!
//! let links = SelectorList::parse("ul > li a").unwrap();
//! assert_eq!(doc.query_selector_all(doc.body(), &links), vec![link]);
//! assert_eq!(doc.text_content(item), "Home");
//! ```

mod document;
mod selector;

pub use document::Document;
pub use selector::{AttributeSelector, Combinator, Selector, SelectorList, SelectorPart, TypeSelector};

use slotmap::new_key_type;

use crate::error::DomResult;

new_key_type! {
    /// A stable handle to an element in a [`Dom`].
    pub struct ElementId;
}

/// The narrow DOM interface the menu engine is written against.
///
/// Implementors only provide the primitive accessors; tree walks and selector
/// queries are provided on top of them.
pub trait Dom {
    /// Whether the handle refers to a live element.
    fn exists(&self, id: ElementId) -> bool;

    /// Lowercase tag name of the element.
    fn tag_name(&self, id: ElementId) -> Option<&str>;

    /// Parent element, if any.
    fn parent(&self, id: ElementId) -> Option<ElementId>;

    /// Element children in document order.
    fn children(&self, id: ElementId) -> &[ElementId];

    /// Read an attribute.
    fn attribute(&self, id: ElementId, name: &str) -> Option<&str>;

    /// Set (or replace) an attribute.
    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> DomResult<()>;

    /// Remove an attribute. Removing a missing attribute is not an error.
    fn remove_attribute(&mut self, id: ElementId, name: &str) -> DomResult<()>;

    /// Whether the element's class list contains `class`.
    fn has_class(&self, id: ElementId, class: &str) -> bool;

    /// Add a class to the element's class list.
    fn add_class(&mut self, id: ElementId, class: &str) -> DomResult<()>;

    /// Remove a class from the element's class list.
    fn remove_class(&mut self, id: ElementId, class: &str) -> DomResult<()>;

    /// Visible text of the element and all of its descendants.
    fn text_content(&self, id: ElementId) -> String;

    /// The element currently holding input focus.
    fn active_element(&self) -> Option<ElementId>;

    /// Move input focus to the element.
    fn focus(&mut self, id: ElementId) -> DomResult<()>;

    /// Remove input focus from the element if it holds it.
    fn blur(&mut self, id: ElementId) -> DomResult<()>;

    /// Whether `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the element matches any selector in the list.
    fn matches(&self, id: ElementId, selector: &SelectorList) -> bool {
        selector.matches(self, id)
    }

    /// All descendants of `scope` (excluding `scope`) matching the selector,
    /// in document order.
    fn query_selector_all(&self, scope: ElementId, selector: &SelectorList) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if selector.matches(self, id) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        found
    }

    /// First descendant of `scope` matching the selector, in document order.
    fn query_selector(&self, scope: ElementId, selector: &SelectorList) -> Option<ElementId> {
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if selector.matches(self, id) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        None
    }

    /// Direct children of `scope` matching the selector.
    fn children_matching(&self, scope: ElementId, selector: &SelectorList) -> Vec<ElementId> {
        self.children(scope)
            .iter()
            .copied()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }
}
