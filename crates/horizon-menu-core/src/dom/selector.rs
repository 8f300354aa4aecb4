//! CSS selector parsing and matching for element queries.
//!
//! Supports the subset menus are configured with: type (`li`), universal
//! (`*`), class (`.dropdown`), ID (`#main-menu`), attribute presence and
//! equality (`[href]`, `[role="menu"]`), descendant and child combinators, and
//! comma-separated selector lists.

use std::fmt;
use std::str::FromStr;

use cssparser::{ParseError, ParseErrorKind, Parser, ParserInput, Token};

use super::{Dom, ElementId};
use crate::error::{DomError, DomResult};

/// A comma-separated list of selectors; matches if any selector matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
    source: String,
}

impl SelectorList {
    /// Parse a selector list.
    pub fn parse(source: &str) -> DomResult<Self> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);

        let selectors = parser
            .parse_entirely(|p| p.parse_comma_separated(parse_selector))
            .map_err(|err| DomError::invalid_selector(source, describe(&err)))?;

        Ok(Self {
            selectors,
            source: source.trim().to_string(),
        })
    }

    /// The individual selectors in the list.
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// The trimmed source text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the element matches any selector in the list.
    pub fn matches<D: Dom + ?Sized>(&self, dom: &D, element: ElementId) -> bool {
        self.selectors
            .iter()
            .any(|selector| selector.matches(dom, element))
    }
}

impl FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> DomResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A complex selector (e.g., "ul.menu > li a").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Chain of compound selectors, leftmost first.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Get the rightmost (subject) selector part.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }

    /// Check whether the element matches this selector.
    pub fn matches<D: Dom + ?Sized>(&self, dom: &D, element: ElementId) -> bool {
        match self.parts.len() {
            0 => false,
            len => self.matches_at(dom, element, len - 1),
        }
    }

    fn matches_at<D: Dom + ?Sized>(&self, dom: &D, element: ElementId, index: usize) -> bool {
        if !self.parts[index].matches(dom, element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => dom
                .parent(element)
                .is_some_and(|parent| self.matches_at(dom, parent, index - 1)),
            Combinator::Descendant => {
                let mut ancestor = dom.parent(element);
                while let Some(candidate) = ancestor {
                    if self.matches_at(dom, candidate, index - 1) {
                        return true;
                    }
                    ancestor = dom.parent(candidate);
                }
                false
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match &self.combinators[i - 1] {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                }
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A compound selector (e.g., "li.dropdown[aria-haspopup]").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Type selector (tag name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selector (#id).
    pub id: Option<String>,
    /// Class selectors (.class).
    pub classes: Vec<String>,
    /// Attribute selectors ([name] or [name=value]).
    pub attributes: Vec<AttributeSelector>,
}

impl SelectorPart {
    /// Whether no component has been set.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }

    /// Check the compound selector against a single element.
    pub fn matches<D: Dom + ?Sized>(&self, dom: &D, element: ElementId) -> bool {
        if let Some(TypeSelector::Type(name)) = &self.type_selector {
            match dom.tag_name(element) {
                Some(tag) if tag.eq_ignore_ascii_case(name) => {}
                _ => return false,
            }
        }

        if let Some(id) = &self.id {
            if dom.attribute(element, "id") != Some(id.as_str()) {
                return false;
            }
        }

        if !self.classes.iter().all(|class| dom.has_class(element, class)) {
            return false;
        }

        self.attributes
            .iter()
            .all(|attribute| match (&attribute.value, dom.attribute(element, &attribute.name)) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(expected), Some(actual)) => expected == actual,
            })
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(type_sel) = &self.type_selector {
            write!(f, "{}", type_sel)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        for attribute in &self.attributes {
            match &attribute.value {
                Some(value) => write!(f, "[{}=\"{}\"]", attribute.name, value)?,
                None => write!(f, "[{}]", attribute.name)?,
            }
        }
        Ok(())
    }
}

/// Type selector variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Universal selector (*).
    Universal,
    /// Tag name selector.
    Type(String),
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSelector::Universal => write!(f, "*"),
            TypeSelector::Type(name) => write!(f, "{}", name),
        }
    }
}

/// Attribute selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    /// Attribute name.
    pub name: String,
    /// Required value; `None` only checks presence.
    pub value: Option<String>,
}

/// Combinators between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (whitespace).
    Descendant,
    /// Child combinator (>).
    Child,
}

type SelectorResult<'i, T> = Result<T, ParseError<'i, String>>;

fn parse_selector<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, Selector> {
    let mut parts = Vec::new();
    let mut combinators = Vec::new();
    let mut current = SelectorPart::default();
    let mut pending: Option<Combinator> = None;

    parser.skip_whitespace();

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        // A new compound selector after an earlier one needs its combinator.
        let starts_part = !matches!(token, Token::WhiteSpace(_) | Token::Delim('>'));
        if starts_part && current.is_empty() && !parts.is_empty() {
            combinators.push(pending.take().unwrap_or(Combinator::Descendant));
        }

        match token {
            Token::WhiteSpace(_) => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                    pending = Some(Combinator::Descendant);
                }
            }

            Token::Delim('>') => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
                if parts.is_empty() {
                    return Err(parser.new_custom_error("Selector cannot start with '>'".to_string()));
                }
                pending = Some(Combinator::Child);
            }

            Token::Ident(name) => {
                if !current.is_empty() {
                    return Err(parser.new_custom_error(format!(
                        "Type selector '{}' must come first in a compound selector",
                        name
                    )));
                }
                current.type_selector = Some(TypeSelector::Type(name.to_ascii_lowercase()));
            }

            Token::Delim('*') => {
                if !current.is_empty() {
                    return Err(parser.new_custom_error(
                        "Universal selector must come first in a compound selector".to_string(),
                    ));
                }
                current.type_selector = Some(TypeSelector::Universal);
            }

            Token::Delim('.') => {
                let class = parser.expect_ident()?.to_string();
                current.classes.push(class);
            }

            Token::IDHash(id) => {
                if current.id.is_some() {
                    return Err(parser.new_custom_error(format!("Duplicate ID selector '#{}'", &*id)));
                }
                current.id = Some(id.to_string());
            }

            Token::SquareBracketBlock => {
                let attribute = parser.parse_nested_block(parse_attribute)?;
                current.attributes.push(attribute);
            }

            Token::Colon => {
                let name = parser.expect_ident()?.to_string();
                return Err(parser.new_custom_error(format!("Unsupported pseudo-class ':{}'", name)));
            }

            other => {
                return Err(parser.new_custom_error(format!("Unexpected token {:?}", other)));
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    } else if pending == Some(Combinator::Child) {
        return Err(parser.new_custom_error("Dangling '>' combinator".to_string()));
    }

    if parts.is_empty() {
        return Err(parser.new_custom_error("Empty selector".to_string()));
    }

    Ok(Selector { parts, combinators })
}

fn parse_attribute<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, AttributeSelector> {
    let name = parser.expect_ident()?.to_string();
    if parser.is_exhausted() {
        return Ok(AttributeSelector { name, value: None });
    }

    parser.expect_delim('=')?;
    let value = parser.expect_ident_or_string()?.to_string();
    parser.expect_exhausted()?;

    Ok(AttributeSelector {
        name,
        value: Some(value),
    })
}

fn describe(err: &ParseError<'_, String>) -> String {
    match &err.kind {
        ParseErrorKind::Custom(message) => message.clone(),
        ParseErrorKind::Basic(kind) => format!("{:?}", kind),
    }
}
