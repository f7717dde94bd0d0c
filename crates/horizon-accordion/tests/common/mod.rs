//! Shared fixtures for the accordion integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use horizon_accordion::{
    Accordion, AccordionConfig, HeadlessContainer, HeadlessItemSurface, Item, ItemId, Notification,
};
use parking_lot::Mutex;

/// Install a test-writer subscriber once. `RUST_LOG` controls the filter.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub type EventLog = Arc<Mutex<Vec<(Notification, ItemId)>>>;

/// An accordion over headless surfaces, recording every notification.
pub struct Harness {
    pub accordion: Accordion,
    pub container: HeadlessContainer,
    pub surfaces: HashMap<ItemId, HeadlessItemSurface>,
    events: EventLog,
}

impl Harness {
    pub fn new(config: AccordionConfig, client_height: f32) -> Self {
        init_logging();
        let container = HeadlessContainer::new(client_height);
        let accordion = Accordion::new(config, container.clone());
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        accordion
            .notifications()
            .observe_all(move |kind, id| sink.lock().push((kind, id)));
        Self {
            accordion,
            container,
            surfaces: HashMap::new(),
            events,
        }
    }

    /// Animation off, so every transition lands immediately.
    pub fn sync(client_height: f32) -> Self {
        Self::new(AccordionConfig::new().with_animation_enabled(false), client_height)
    }

    pub fn add(&mut self, label: &str, content: Option<f32>, build: impl FnOnce(Item) -> Item) -> ItemId {
        self.add_before(label, content, None, build)
    }

    pub fn add_before(
        &mut self,
        label: &str,
        content: Option<f32>,
        parent: Option<ItemId>,
        build: impl FnOnce(Item) -> Item,
    ) -> ItemId {
        let surface = HeadlessItemSurface::new(20.0, content);
        let item = build(Item::new(label, surface.clone()));
        let id = self
            .accordion
            .add_item(item, parent)
            .expect("item registration was vetoed");
        self.surfaces.insert(id, surface);
        self.assert_pin_invariant();
        id
    }

    pub fn body(&self, id: ItemId) -> f32 {
        self.surfaces[&id].current_body_height()
    }

    pub fn surface(&self, id: ItemId) -> &HeadlessItemSurface {
        &self.surfaces[&id]
    }

    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.accordion.item(id).expect("unknown item").is_expanded()
    }

    pub fn is_pinned(&self, id: ItemId) -> bool {
        self.accordion.item(id).expect("unknown item").is_always_visible()
    }

    pub fn expanded(&self) -> Vec<ItemId> {
        self.accordion
            .items()
            .filter(|(_, item)| item.is_expanded())
            .map(|(id, _)| id)
            .collect()
    }

    /// Drain the recorded notifications.
    pub fn events(&self) -> Vec<(Notification, ItemId)> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Drain the recorded notifications for one item.
    pub fn events_for(&self, id: ItemId) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter(|(_, item)| *item == id)
            .map(|(kind, _)| kind)
            .collect()
    }

    pub fn assert_pin_invariant(&self) {
        for (id, item) in self.accordion.items() {
            assert!(
                !item.is_always_visible() || item.is_expanded(),
                "{id:?} ({}) is pinned but collapsed",
                item.label()
            );
        }
    }
}
