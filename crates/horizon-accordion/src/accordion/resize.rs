//! Subscription to the signal that tells the accordion its space changed.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use horizon_accordion_core::{ConnectionId, Signal};

/// Where resize notifications come from.
#[derive(Clone, Default)]
pub enum ResizeSource {
    /// The host window. The host forwards window resizes through
    /// [`Accordion::notify_window_resized`](crate::Accordion::notify_window_resized).
    #[default]
    Window,
    /// Any signal, typically owned by an enclosing panel. Emissions are
    /// queued and handled on the next [`Accordion::tick`](crate::Accordion::tick)
    /// or [`Accordion::process_pending_resize`](crate::Accordion::process_pending_resize).
    External(Arc<Signal<()>>),
}

impl fmt::Debug for ResizeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeSource::Window => f.write_str("Window"),
            ResizeSource::External(signal) => f
                .debug_struct("External")
                .field("connections", &signal.connection_count())
                .finish(),
        }
    }
}

/// The current source plus the connection made to it.
///
/// Dropping the binding disconnects from an external source.
pub(super) struct ResizeBinding {
    source: ResizeSource,
    connection: Option<ConnectionId>,
    pending: Arc<AtomicBool>,
}

impl ResizeBinding {
    pub(super) fn new() -> Self {
        Self {
            source: ResizeSource::Window,
            connection: None,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(super) fn source(&self) -> &ResizeSource {
        &self.source
    }

    pub(super) fn is_window(&self) -> bool {
        matches!(self.source, ResizeSource::Window)
    }

    /// Disconnect from the old source and subscribe to `source`.
    pub(super) fn rebind(&mut self, source: ResizeSource) {
        self.unbind();
        if let ResizeSource::External(signal) = &source {
            let pending = self.pending.clone();
            self.connection = Some(signal.connect(move |_| pending.store(true, Ordering::Release)));
        }
        self.source = source;
    }

    /// Whether the source fired since the last call.
    pub(super) fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    fn unbind(&mut self) {
        if let (ResizeSource::External(signal), Some(connection)) =
            (&self.source, self.connection.take())
        {
            signal.disconnect(connection);
        }
        self.source = ResizeSource::Window;
        self.pending.store(false, Ordering::Release);
    }
}

impl Drop for ResizeBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}
