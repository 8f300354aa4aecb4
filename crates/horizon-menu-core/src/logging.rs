//! Logging and debugging facilities for Horizon Menu.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - Formatting options and prefix building for tree dumps
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Horizon Menu uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("horizon_menu::keyboard=trace"))
//!     .init();
//! ```

/// Span names used throughout Horizon Menu for tracing.
pub mod span_names {
    /// Menu tree construction.
    pub const BUILD: &str = "menu_tree_build";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "horizon_menu_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_menu_core::signal";
    /// Menu construction and focus state target.
    pub const MENU: &str = "horizon_menu::menu";
    /// Submenu toggles (open, close, preview).
    pub const TOGGLE: &str = "horizon_menu::toggle";
    /// Keyboard handling target.
    pub const KEYBOARD: &str = "horizon_menu::keyboard";
    /// Click handling target.
    pub const POINTER: &str = "horizon_menu::pointer";
    /// Hover handling and close timers.
    pub const HOVER: &str = "horizon_menu::hover";
    /// DOM mutations performed by the in-memory document.
    pub const DOM: &str = "horizon_menu::dom";
    /// Performance spans.
    pub const PERF: &str = "horizon_menu::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show arena IDs.
    pub show_ids: bool,
    /// Whether to show runtime state (focus, open/closed, current child).
    pub show_state: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_state: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_state: false,
            ..Default::default()
        }
    }

    /// Use a different branch style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether a node at `depth` should be printed.
    pub fn within_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }

    /// Build the prefix string for a tree node.
    ///
    /// `ancestors_last[i]` tells whether the ancestor at depth `i + 1` was the
    /// last of its siblings; its column is left blank instead of continuing
    /// the branch.
    pub fn prefix(&self, ancestors_last: &[bool], is_last: bool, depth: usize) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for level in 0..depth - 1 {
            let closed = ancestors_last.get(level).copied().unwrap_or(false);
            if closed {
                prefix.push_str(&" ".repeat(branch.chars().count()));
            } else {
                prefix.push_str(branch);
            }
            prefix.push_str(&" ".repeat(self.indent_size));
        }

        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
