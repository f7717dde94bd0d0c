//! Core primitives for Horizon Accordion.
//!
//! This crate provides the foundational pieces the accordion widget is built on:
//!
//! - **Signal/Slot System**: Type-safe notifications, including vetoable
//!   "before" notifications via [`CancellableSignal`]
//! - **Property System**: Change-detecting value cells
//! - **Logging**: Stable `tracing` targets and span helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_accordion_core::Signal;
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
//! # Property Example
//!
//! ```
//! use horizon_accordion_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::SignalError;
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{CancellableSignal, ConnectionId, Signal};
