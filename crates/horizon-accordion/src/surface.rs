//! Rendering surfaces the accordion measures and resizes.
//!
//! The accordion never touches a document or a window directly. Everything it
//! needs from the host is expressed through two traits:
//!
//! - [`ItemSurface`] - one panel's header and body: measuring, resizing, and
//!   toggling the expanded/pinned visual affordances.
//! - [`ContainerSurface`] - the accordion's own node: its available height
//!   and the attach/detach/move operations that keep the host's node order in
//!   step with the item sequence.
//!
//! Headless implementations are provided for tests and for hosts that lay out
//! panels themselves. Cloning a headless surface yields a probe that shares
//! state with the original, so the state stays observable after the surface
//! has been handed to an [`Item`](crate::Item).

use std::sync::Arc;

use parking_lot::Mutex;

use crate::item::{ItemId, UiMarks};

/// One panel's header and body as the host renders them.
///
/// Measurements include border and padding. A measurement that cannot be
/// taken reports 0 rather than failing.
pub trait ItemSurface: Send {
    /// Height of the header node.
    fn header_height(&self) -> f32;

    /// Current height of the body node.
    fn body_height(&self) -> f32;

    /// Height of the first child inside the body, if there is one.
    fn first_child_height(&self) -> Option<f32>;

    /// Set the body node's height.
    fn set_body_height(&mut self, height: f32);

    /// Toggle the expanded/pinned visual affordances.
    fn apply_marks(&mut self, marks: UiMarks);
}

/// The accordion's own node.
pub trait ContainerSurface: Send {
    /// Height available to headers and bodies.
    fn client_height(&self) -> f32;

    /// An item's node was inserted at `index`.
    fn item_attached(&mut self, _id: ItemId, _index: usize) {}

    /// An item's node was removed.
    fn item_detached(&mut self, _id: ItemId) {}

    /// An item's node was moved so that it now sits at `index`.
    fn item_moved(&mut self, _id: ItemId, _index: usize) {}
}

/// Observable state of a [`HeadlessItemSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessItemState {
    /// Header height.
    pub header_height: f32,
    /// Current body height.
    pub body_height: f32,
    /// First child height, `None` for an empty body.
    pub content_height: Option<f32>,
    /// Last affordances applied.
    pub marks: UiMarks,
    /// Number of times affordances were applied.
    pub mark_count: usize,
}

/// An in-memory [`ItemSurface`].
#[derive(Debug, Clone)]
pub struct HeadlessItemSurface {
    state: Arc<Mutex<HeadlessItemState>>,
}

impl HeadlessItemSurface {
    /// Create a surface with the given header height and body content height.
    ///
    /// The body starts closed at height 0.
    pub fn new(header_height: f32, content_height: Option<f32>) -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessItemState {
                header_height,
                body_height: 0.0,
                content_height,
                marks: UiMarks::default(),
                mark_count: 0,
            })),
        }
    }

    /// Snapshot the current state.
    pub fn state(&self) -> HeadlessItemState {
        self.state.lock().clone()
    }

    /// Current body height.
    pub fn current_body_height(&self) -> f32 {
        self.state.lock().body_height
    }

    /// Replace the body content height, as if the content had reflowed.
    pub fn set_content_height(&self, height: Option<f32>) {
        self.state.lock().content_height = height;
    }

    /// Replace the header height.
    pub fn set_header_height(&self, height: f32) {
        self.state.lock().header_height = height;
    }
}

impl ItemSurface for HeadlessItemSurface {
    fn header_height(&self) -> f32 {
        self.state.lock().header_height
    }

    fn body_height(&self) -> f32 {
        self.state.lock().body_height
    }

    fn first_child_height(&self) -> Option<f32> {
        self.state.lock().content_height
    }

    fn set_body_height(&mut self, height: f32) {
        self.state.lock().body_height = height;
    }

    fn apply_marks(&mut self, marks: UiMarks) {
        let mut state = self.state.lock();
        state.marks = marks;
        state.mark_count += 1;
    }
}

#[derive(Debug, Default)]
struct HeadlessContainerState {
    client_height: f32,
    nodes: Vec<ItemId>,
}

/// An in-memory [`ContainerSurface`] that tracks node order.
#[derive(Debug, Clone, Default)]
pub struct HeadlessContainer {
    state: Arc<Mutex<HeadlessContainerState>>,
}

impl HeadlessContainer {
    /// Create a container with the given available height.
    pub fn new(client_height: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessContainerState {
                client_height,
                nodes: Vec::new(),
            })),
        }
    }

    /// Change the available height, as a window resize would.
    pub fn set_client_height(&self, height: f32) {
        self.state.lock().client_height = height;
    }

    /// The node order as the host sees it.
    pub fn node_order(&self) -> Vec<ItemId> {
        self.state.lock().nodes.clone()
    }
}

impl ContainerSurface for HeadlessContainer {
    fn client_height(&self) -> f32 {
        self.state.lock().client_height
    }

    fn item_attached(&mut self, id: ItemId, index: usize) {
        let mut state = self.state.lock();
        let index = index.min(state.nodes.len());
        state.nodes.insert(index, id);
    }

    fn item_detached(&mut self, id: ItemId) {
        self.state.lock().nodes.retain(|&node| node != id);
    }

    fn item_moved(&mut self, id: ItemId, index: usize) {
        let mut state = self.state.lock();
        state.nodes.retain(|&node| node != id);
        let index = index.min(state.nodes.len());
        state.nodes.insert(index, id);
    }
}
