//! Signal/slot notifications for Horizon Accordion.
//!
//! Two flavours of signal are provided:
//!
//! - [`Signal<Args>`] - fire-and-forget notification. Every connected slot is
//!   invoked in connection order.
//! - [`CancellableSignal<Args>`] - a "before" notification whose slots return
//!   `bool`. Returning `false` from any slot vetoes the operation that would
//!   otherwise follow the emission.
//!
//! All slots are invoked directly on the emitting thread. The accordion is
//! driven from a single UI thread, so there is no queued delivery.
//!
//! # Example
//!
//! ```
//! use horizon_accordion_core::{CancellableSignal, Signal};
//!
//! let before_close = CancellableSignal::<u32>::new();
//! let closed = Signal::<u32>::new();
//!
//! // Refuse to close panel 7.
//! before_close.connect(|&id| id != 7);
//! closed.connect(|id| println!("closed {id}"));
//!
//! if before_close.emit(3) {
//!     closed.emit(3);
//! }
//! assert!(!before_close.emit(7));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`]
    /// or [`CancellableSignal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type VetoSlot<Args> = Arc<dyn Fn(&Args) -> bool + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect a slot, reporting an unknown ID as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// Slots are snapshotted before invocation, so a slot may connect or
    /// disconnect other slots on the same signal without deadlocking.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// A signal whose slots may veto the operation being announced.
///
/// Every connected slot is invoked, even after one of them has vetoed, so
/// observers that only record the notification still see it. The emission
/// result is `true` only when no slot returned `false`.
pub struct CancellableSignal<Args> {
    connections: Mutex<SlotMap<ConnectionId, VetoSlot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for CancellableSignal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> CancellableSignal<Args> {
    /// Create a new cancellable signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot. Returning `false` from the slot vetoes the operation.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) -> bool + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that only observes and never vetoes.
    pub fn observe<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connect(move |args| {
            slot(args);
            true
        })
    }

    /// Disconnect a specific slot by its connection ID.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block emission. A blocked signal never vetoes.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal and report whether the operation may proceed.
    pub fn emit(&self, args: Args) -> bool {
        if self.is_blocked() {
            return true;
        }

        let slots: Vec<VetoSlot<Args>> = self.connections.lock().values().cloned().collect();
        let mut allowed = true;
        for slot in slots {
            allowed &= slot(&args);
        }

        if !allowed {
            tracing::trace!(target: targets::SIGNAL, "emission vetoed");
        }
        allowed
    }
}
