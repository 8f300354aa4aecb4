//! Core systems for Horizon Menu.
//!
//! This crate provides the foundations the menu engine is built on:
//!
//! - **DOM contract**: the [`Dom`] trait, element handles and an in-memory
//!   [`Document`]
//! - **Selectors**: a CSS selector subset parsed with `cssparser`
//! - **Signal/Slot System**: type-safe notifications for state changes
//! - **Timers**: one-shot timers driven by a virtual clock
//! - **Logging**: tracing targets and tree formatting helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_menu_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use horizon_menu_core::TimerManager;
//! use std::time::Duration;
//!
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot(Duration::from_millis(250));
//!
//! assert!(timers.advance(Duration::from_millis(100)).is_empty());
//! assert_eq!(timers.advance(Duration::from_millis(150)), vec![id]);
//! ```

pub mod dom;
mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use dom::{Document, Dom, ElementId, SelectorList};
pub use error::{DomError, DomResult, TimerError};
pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};

static_assertions::assert_impl_all!(Document: Send, Sync);
static_assertions::assert_impl_all!(TimerManager: Send, Sync);
static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
