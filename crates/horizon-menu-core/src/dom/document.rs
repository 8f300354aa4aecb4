//! In-memory element tree implementing the [`Dom`] contract.

use slotmap::SlotMap;

use super::{Dom, ElementId};
use crate::error::{DomError, DomResult};
use crate::logging::targets;

/// Internal element data.
#[derive(Debug, Clone)]
struct ElementData {
    /// Lowercase tag name.
    tag: String,
    /// Attributes in insertion order. The class list lives in `class`.
    attributes: Vec<(String, String)>,
    /// Text owned directly by this element (rendered before its children).
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or("").split_whitespace()
    }
}

/// A document made of elements stored in a slot map.
///
/// Every document owns a `body` element created up front; elements created
/// with [`create_element`](Self::create_element) stay detached until they are
/// appended somewhere.
#[derive(Debug, Clone)]
pub struct Document {
    elements: SlotMap<ElementId, ElementData>,
    body: ElementId,
    active: Option<ElementId>,
}

impl Document {
    /// Create an empty document containing only `body`.
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let body = elements.insert(ElementData::new("body"));
        Self {
            elements,
            body,
            active: None,
        }
    }

    /// The document body.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Number of elements, attached or not.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.insert(ElementData::new(tag))
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> DomResult<()> {
        self.require(parent)?;
        self.require(child)?;
        if self.contains(child, parent) {
            return Err(DomError::InvalidHierarchy { parent, child });
        }

        if let Some(old_parent) = self.elements[child].parent {
            self.elements[old_parent].children.retain(|&id| id != child);
        }
        self.elements[child].parent = Some(parent);
        self.elements[parent].children.push(child);
        Ok(())
    }

    /// Create an element and append it to `parent`.
    pub fn append(&mut self, parent: ElementId, tag: &str) -> DomResult<ElementId> {
        self.require(parent)?;
        let child = self.create_element(tag);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Create an element with text and append it to `parent`.
    pub fn append_with_text(
        &mut self,
        parent: ElementId,
        tag: &str,
        text: &str,
    ) -> DomResult<ElementId> {
        let child = self.append(parent, tag)?;
        self.set_text(child, text)?;
        Ok(child)
    }

    /// Detach the element and drop it together with its whole subtree.
    pub fn remove(&mut self, id: ElementId) -> DomResult<()> {
        self.require(id)?;
        if let Some(parent) = self.elements[id].parent {
            self.elements[parent].children.retain(|&child| child != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.remove(current) {
                stack.extend(element.children);
            }
            if self.active == Some(current) {
                self.active = None;
            }
        }
        Ok(())
    }

    /// Replace the text owned directly by the element.
    pub fn set_text(&mut self, id: ElementId, text: &str) -> DomResult<()> {
        self.element_mut(id)?.text = text.to_string();
        Ok(())
    }

    /// The element's class list in order.
    pub fn class_list(&self, id: ElementId) -> Vec<String> {
        self.elements
            .get(id)
            .map(|element| element.classes().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn require(&self, id: ElementId) -> DomResult<()> {
        if self.elements.contains_key(id) {
            Ok(())
        } else {
            Err(DomError::UnknownElement(id))
        }
    }

    fn element_mut(&mut self, id: ElementId) -> DomResult<&mut ElementData> {
        self.elements.get_mut(id).ok_or(DomError::UnknownElement(id))
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        if let Some(element) = self.elements.get(id) {
            out.push_str(&element.text);
            for &child in &element.children {
                self.collect_text(child, out);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for Document {
    fn exists(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    fn tag_name(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|element| element.tag.as_str())
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|element| element.parent)
    }

    fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|element| element.children.as_slice())
            .unwrap_or(&[])
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements.get(id).and_then(|element| element.attribute(name))
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_attribute(name, value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, id: ElementId, name: &str) -> DomResult<()> {
        self.element_mut(id)?.attributes.retain(|(key, _)| key != name);
        Ok(())
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|element| element.classes().any(|c| c == class))
    }

    fn add_class(&mut self, id: ElementId, class: &str) -> DomResult<()> {
        let element = self.element_mut(id)?;
        if element.classes().any(|c| c == class) {
            return Ok(());
        }
        let mut classes: Vec<String> = element.classes().map(str::to_string).collect();
        classes.push(class.to_string());
        element.set_attribute("class", classes.join(" "));
        Ok(())
    }

    fn remove_class(&mut self, id: ElementId, class: &str) -> DomResult<()> {
        let element = self.element_mut(id)?;
        let classes: Vec<String> = element
            .classes()
            .filter(|&c| c != class)
            .map(str::to_string)
            .collect();
        element.set_attribute("class", classes.join(" "));
        Ok(())
    }

    fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn focus(&mut self, id: ElementId) -> DomResult<()> {
        self.require(id)?;
        tracing::trace!(target: targets::DOM, ?id, "focus");
        self.active = Some(id);
        Ok(())
    }

    fn blur(&mut self, id: ElementId) -> DomResult<()> {
        self.require(id)?;
        if self.active == Some(id) {
            tracing::trace!(target: targets::DOM, ?id, "blur");
            self.active = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_walk() {
        let mut doc = Document::new();
        let list = doc.append(doc.body(), "UL").unwrap();
        let first = doc.append(list, "li").unwrap();
        let second = doc.append(list, "li").unwrap();

        assert_eq!(doc.tag_name(list), Some("ul"));
        assert_eq!(doc.children(list), &[first, second]);
        assert_eq!(doc.parent(first), Some(list));
        assert!(doc.contains(doc.body(), second));
        assert!(!doc.contains(first, second));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.append(doc.body(), "div").unwrap();
        let inner = doc.append(outer, "div").unwrap();

        let err = doc.append_child(inner, outer).unwrap_err();
        assert_eq!(err, DomError::InvalidHierarchy { parent: inner, child: outer });
    }

    #[test]
    fn test_reparent_moves_child() {
        let mut doc = Document::new();
        let a = doc.append(doc.body(), "div").unwrap();
        let b = doc.append(doc.body(), "div").unwrap();
        let child = doc.append(a, "span").unwrap();

        doc.append_child(b, child).unwrap();
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
    }

    #[test]
    fn test_class_list_operations() {
        let mut doc = Document::new();
        let el = doc.append(doc.body(), "ul").unwrap();

        doc.add_class(el, "menu").unwrap();
        doc.add_class(el, "hide").unwrap();
        doc.add_class(el, "hide").unwrap();
        assert_eq!(doc.class_list(el), vec!["menu", "hide"]);
        assert_eq!(doc.attribute(el, "class"), Some("menu hide"));

        doc.remove_class(el, "hide").unwrap();
        assert!(!doc.has_class(el, "hide"));
        assert!(doc.has_class(el, "menu"));
    }

    #[test]
    fn test_attributes() {
        let mut doc = Document::new();
        let el = doc.append(doc.body(), "a").unwrap();

        doc.set_attribute(el, "tabindex", "-1").unwrap();
        doc.set_attribute(el, "tabindex", "0").unwrap();
        assert_eq!(doc.attribute(el, "tabindex"), Some("0"));

        doc.remove_attribute(el, "tabindex").unwrap();
        assert_eq!(doc.attribute(el, "tabindex"), None);
    }

    #[test]
    fn test_text_content_is_recursive() {
        let mut doc = Document::new();
        let item = doc.append(doc.body(), "li").unwrap();
        doc.append_with_text(item, "a", "Products").unwrap();
        let nested = doc.append(item, "ul").unwrap();
        doc.append_with_text(nested, "li", " and more").unwrap();

        assert_eq!(doc.text_content(item), "Products and more");
    }

    #[test]
    fn test_focus_and_blur() {
        let mut doc = Document::new();
        let a = doc.append(doc.body(), "a").unwrap();
        let b = doc.append(doc.body(), "a").unwrap();

        doc.focus(a).unwrap();
        assert_eq!(doc.active_element(), Some(a));

        doc.blur(b).unwrap();
        assert_eq!(doc.active_element(), Some(a));

        doc.blur(a).unwrap();
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn test_removed_element_is_unknown() {
        let mut doc = Document::new();
        let list = doc.append(doc.body(), "ul").unwrap();
        let item = doc.append(list, "li").unwrap();
        doc.focus(item).unwrap();

        doc.remove(list).unwrap();
        assert!(!doc.exists(list));
        assert!(!doc.exists(item));
        assert!(doc.children(doc.body()).is_empty());
        assert_eq!(doc.active_element(), None);
        assert_eq!(doc.focus(item), Err(DomError::UnknownElement(item)));
    }
}
