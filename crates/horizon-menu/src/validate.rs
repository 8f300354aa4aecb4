//! Input guards for constructor and setter arguments.

use horizon_menu_core::SelectorList;

use crate::error::{MenuError, Result};

/// Parse a required selector, naming the configuration field on failure.
pub fn selector(field: &'static str, source: &str) -> Result<SelectorList> {
    SelectorList::parse(source).map_err(|err| MenuError::invalid_selector(field, err))
}

/// Parse an optional selector. `None` and blank strings disable the selector.
pub fn optional_selector(field: &'static str, source: Option<&str>) -> Result<Option<SelectorList>> {
    match source.map(str::trim) {
        None | Some("") => Ok(None),
        Some(source) => selector(field, source).map(Some),
    }
}

/// Check a CSS class name: non-empty and free of whitespace.
pub fn class_name(field: &'static str, name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(MenuError::invalid_class_name(field, name));
    }
    Ok(())
}

/// Check that `name` differs from the class it is paired with.
///
/// Open and close classes must be distinct; a shared name would be added and
/// removed in the same transition.
pub fn distinct_class(field: &'static str, name: &str, other: &str) -> Result<()> {
    if name == other {
        return Err(MenuError::invalid_class_name(field, name));
    }
    Ok(())
}
