//! Keyboard input interpretation.
//!
//! Hosts forward raw key events as [`KeyInput`] (the DOM `key` string, the
//! legacy numeric key code when available, and the held modifiers). The menu
//! engine only ever looks at the semantic [`MenuKey`] derived from it.

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta key is held (Cmd on macOS).
    pub meta: bool,
}

impl KeyModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Whether a modifier that turns a character into a shortcut is held.
    ///
    /// Shift is not one of them: it only changes the character produced.
    pub fn has_command_modifier(&self) -> bool {
        self.control || self.alt || self.meta
    }
}

/// A raw key event as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// The DOM `key` value (`"ArrowDown"`, `"a"`, `" "`...).
    pub key: String,
    /// The legacy numeric key code, if the host has one.
    pub key_code: Option<u32>,
    /// Modifiers held while the key was pressed.
    pub modifiers: KeyModifiers,
}

impl KeyInput {
    /// Create an input from a DOM `key` value with no modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_code: None,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Create an input carrying only a legacy key code.
    pub fn from_key_code(key_code: u32) -> Self {
        Self {
            key: String::new(),
            key_code: Some(key_code),
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Set the held modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The semantic key this input stands for.
    pub fn menu_key(&self) -> MenuKey {
        MenuKey::from_key(&self.key)
            .or_else(|| self.key_code.and_then(MenuKey::from_key_code))
            .unwrap_or(MenuKey::Other)
    }

    /// The printable character typed, if any, for character search.
    ///
    /// Returns `None` when a command modifier is held.
    pub fn search_character(&self) -> Option<char> {
        if self.modifiers.has_command_modifier() {
            return None;
        }
        match self.menu_key() {
            MenuKey::Character(c) => Some(c),
            _ => None,
        }
    }
}

/// Keys the menu engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKey {
    Enter,
    Space,
    Escape,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    Home,
    End,
    Tab,
    /// A single printable character.
    Character(char),
    /// Anything else; falls through to native behavior.
    Other,
}

impl MenuKey {
    /// Map a DOM `key` value, including legacy IE/Edge names.
    pub fn from_key(key: &str) -> Option<Self> {
        let named = match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "Home" => Self::Home,
            "End" => Self::End,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = key.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() && !c.is_whitespace() => {
                        Some(Self::Character(c))
                    }
                    _ => None,
                };
            }
        };
        Some(named)
    }

    /// Map a legacy numeric key code.
    pub fn from_key_code(code: u32) -> Option<Self> {
        let key = match code {
            13 => Self::Enter,
            32 => Self::Space,
            27 => Self::Escape,
            38 => Self::ArrowUp,
            39 => Self::ArrowRight,
            40 => Self::ArrowDown,
            37 => Self::ArrowLeft,
            36 => Self::Home,
            35 => Self::End,
            9 => Self::Tab,
            _ => return None,
        };
        Some(key)
    }

    /// Whether this is one of the four arrow keys.
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowRight | Self::ArrowDown | Self::ArrowLeft
        )
    }

    /// Whether this key activates the current item.
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert_eq!(KeyInput::new("ArrowDown").menu_key(), MenuKey::ArrowDown);
        assert_eq!(KeyInput::new("Down").menu_key(), MenuKey::ArrowDown);
        assert_eq!(KeyInput::new(" ").menu_key(), MenuKey::Space);
        assert_eq!(KeyInput::new("Spacebar").menu_key(), MenuKey::Space);
        assert_eq!(KeyInput::new("Esc").menu_key(), MenuKey::Escape);
        assert_eq!(KeyInput::new("Espace").menu_key(), MenuKey::Other);
        assert_eq!(KeyInput::new("Shift").menu_key(), MenuKey::Other);
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(KeyInput::from_key_code(27).menu_key(), MenuKey::Escape);
        assert_eq!(KeyInput::from_key_code(35).menu_key(), MenuKey::End);
        assert_eq!(KeyInput::from_key_code(200).menu_key(), MenuKey::Other);
    }

    #[test]
    fn test_characters() {
        assert_eq!(KeyInput::new("p").menu_key(), MenuKey::Character('p'));
        assert_eq!(KeyInput::new("é").search_character(), Some('é'));
        assert_eq!(KeyInput::new("\t").menu_key(), MenuKey::Other);
        assert_eq!(
            KeyInput::new("P").with_modifiers(KeyModifiers::SHIFT).search_character(),
            Some('P')
        );
        assert_eq!(
            KeyInput::new("c").with_modifiers(KeyModifiers::CTRL).search_character(),
            None
        );
    }

    #[test]
    fn test_key_groups() {
        assert!(MenuKey::ArrowLeft.is_arrow());
        assert!(!MenuKey::Home.is_arrow());
        assert!(MenuKey::Space.is_activation());
        assert!(!MenuKey::Escape.is_activation());
    }
}
