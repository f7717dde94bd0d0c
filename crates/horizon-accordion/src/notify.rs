//! Notifications emitted by the accordion.
//!
//! Every notification carries the affected [`ItemId`]. The `before_*`
//! notifications are [`CancellableSignal`]s: a slot returning `false` aborts
//! the operation that would otherwise follow.
//!
//! # Example
//!
//! ```
//! use horizon_accordion::{Accordion, AccordionConfig, HeadlessContainer};
//!
//! let accordion = Accordion::new(AccordionConfig::default(), HeadlessContainer::new(400.0));
//!
//! // Keep every item open once it is open.
//! accordion.notifications().before_item_collapse.connect(|_| false);
//! accordion.notifications().item_expanded.connect(|id| println!("{id:?} opened"));
//! ```

use std::sync::Arc;

use horizon_accordion_core::logging::targets;
use horizon_accordion_core::{CancellableSignal, ConnectionId, Signal};

use crate::item::ItemId;

/// The kinds of notification the accordion emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// An item is about to be registered.
    BeforeItemAdd,
    /// An item was registered.
    ItemAdded,
    /// An item is about to be removed.
    BeforeItemRemove,
    /// An item was removed.
    ItemRemoved,
    /// An item's body height is about to change.
    BeforeItemResized,
    /// An item's body height finished changing.
    ItemResized,
    /// A closed item is about to open.
    BeforeItemExpand,
    /// An open item is about to close.
    BeforeItemCollapse,
    /// A closed item finished opening.
    ItemExpanded,
    /// An open item finished closing.
    ItemCollapsed,
    /// A drag of an item is about to start.
    BeforeItemReorder,
    /// A drag of an item is about to end.
    BeforeEndItemReorder,
    /// An item was moved to a new position.
    ItemReordered,
}

impl Notification {
    /// Every notification kind.
    pub const ALL: [Notification; 13] = [
        Notification::BeforeItemAdd,
        Notification::ItemAdded,
        Notification::BeforeItemRemove,
        Notification::ItemRemoved,
        Notification::BeforeItemResized,
        Notification::ItemResized,
        Notification::BeforeItemExpand,
        Notification::BeforeItemCollapse,
        Notification::ItemExpanded,
        Notification::ItemCollapsed,
        Notification::BeforeItemReorder,
        Notification::BeforeEndItemReorder,
        Notification::ItemReordered,
    ];

    /// Whether slots can veto this notification.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            Notification::BeforeItemAdd
                | Notification::BeforeItemRemove
                | Notification::BeforeItemResized
                | Notification::BeforeItemExpand
                | Notification::BeforeItemCollapse
                | Notification::BeforeItemReorder
                | Notification::BeforeEndItemReorder
        )
    }

    /// Stable event name, as used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Notification::BeforeItemAdd => "beforeItemAdd",
            Notification::ItemAdded => "itemAdded",
            Notification::BeforeItemRemove => "beforeItemRemove",
            Notification::ItemRemoved => "itemRemoved",
            Notification::BeforeItemResized => "beforeItemResized",
            Notification::ItemResized => "itemResized",
            Notification::BeforeItemExpand => "beforeItemExpand",
            Notification::BeforeItemCollapse => "beforeItemCollapse",
            Notification::ItemExpanded => "itemExpanded",
            Notification::ItemCollapsed => "itemCollapsed",
            Notification::BeforeItemReorder => "beforeItemReorder",
            Notification::BeforeEndItemReorder => "beforeEndItemReorder",
            Notification::ItemReordered => "itemReordered",
        }
    }
}

/// One signal per [`Notification`] kind.
#[derive(Default)]
pub struct Notifications {
    /// Before an item is registered. Vetoable.
    pub before_item_add: CancellableSignal<ItemId>,
    /// An item was registered.
    pub item_added: Signal<ItemId>,
    /// Before an item is unregistered. Vetoable.
    pub before_item_remove: CancellableSignal<ItemId>,
    /// An item was unregistered.
    pub item_removed: Signal<ItemId>,
    /// Before any body height change. Vetoable.
    pub before_item_resized: CancellableSignal<ItemId>,
    /// A body height change finished.
    pub item_resized: Signal<ItemId>,
    /// Before a closed body opens. Vetoable.
    pub before_item_expand: CancellableSignal<ItemId>,
    /// Before a body closes. Vetoable.
    pub before_item_collapse: CancellableSignal<ItemId>,
    /// A closed body finished opening.
    pub item_expanded: Signal<ItemId>,
    /// A body finished closing.
    pub item_collapsed: Signal<ItemId>,
    /// Before a drag of an item starts. Vetoable.
    pub before_item_reorder: CancellableSignal<ItemId>,
    /// Before a dropped item is moved. Vetoable.
    pub before_end_item_reorder: CancellableSignal<ItemId>,
    /// A dragged item was moved.
    pub item_reordered: Signal<ItemId>,
}

impl Notifications {
    /// Create a set of signals with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `kind` for `id`.
    ///
    /// Returns `false` only when a cancellable notification was vetoed.
    pub fn emit(&self, kind: Notification, id: ItemId) -> bool {
        let allowed = match kind {
            Notification::BeforeItemAdd => self.before_item_add.emit(id),
            Notification::ItemAdded => fire(&self.item_added, id),
            Notification::BeforeItemRemove => self.before_item_remove.emit(id),
            Notification::ItemRemoved => fire(&self.item_removed, id),
            Notification::BeforeItemResized => self.before_item_resized.emit(id),
            Notification::ItemResized => fire(&self.item_resized, id),
            Notification::BeforeItemExpand => self.before_item_expand.emit(id),
            Notification::BeforeItemCollapse => self.before_item_collapse.emit(id),
            Notification::ItemExpanded => fire(&self.item_expanded, id),
            Notification::ItemCollapsed => fire(&self.item_collapsed, id),
            Notification::BeforeItemReorder => self.before_item_reorder.emit(id),
            Notification::BeforeEndItemReorder => self.before_end_item_reorder.emit(id),
            Notification::ItemReordered => fire(&self.item_reordered, id),
        };

        if !allowed {
            tracing::debug!(target: targets::ENGINE, notification = kind.name(), ?id, "vetoed");
        }
        allowed
    }

    /// Connect one observer to every notification kind.
    ///
    /// Useful for logging and tests that assert on the overall ordering. The
    /// observer never vetoes.
    pub fn observe_all<F>(&self, observer: F) -> Vec<(Notification, ConnectionId)>
    where
        F: Fn(Notification, ItemId) + Send + Sync + 'static,
    {
        let observer = Arc::new(observer);
        Notification::ALL
            .iter()
            .map(|&kind| {
                let observer = observer.clone();
                let slot = move |id: &ItemId| observer(kind, *id);
                let conn = match kind {
                    Notification::BeforeItemAdd => self.before_item_add.observe(slot),
                    Notification::ItemAdded => self.item_added.connect(slot),
                    Notification::BeforeItemRemove => self.before_item_remove.observe(slot),
                    Notification::ItemRemoved => self.item_removed.connect(slot),
                    Notification::BeforeItemResized => self.before_item_resized.observe(slot),
                    Notification::ItemResized => self.item_resized.connect(slot),
                    Notification::BeforeItemExpand => self.before_item_expand.observe(slot),
                    Notification::BeforeItemCollapse => self.before_item_collapse.observe(slot),
                    Notification::ItemExpanded => self.item_expanded.connect(slot),
                    Notification::ItemCollapsed => self.item_collapsed.connect(slot),
                    Notification::BeforeItemReorder => self.before_item_reorder.observe(slot),
                    Notification::BeforeEndItemReorder => {
                        self.before_end_item_reorder.observe(slot)
                    }
                    Notification::ItemReordered => self.item_reordered.connect(slot),
                };
                (kind, conn)
            })
            .collect()
    }

    /// Disconnect every slot from every notification.
    pub fn disconnect_all(&self) {
        self.before_item_add.disconnect_all();
        self.item_added.disconnect_all();
        self.before_item_remove.disconnect_all();
        self.item_removed.disconnect_all();
        self.before_item_resized.disconnect_all();
        self.item_resized.disconnect_all();
        self.before_item_expand.disconnect_all();
        self.before_item_collapse.disconnect_all();
        self.item_expanded.disconnect_all();
        self.item_collapsed.disconnect_all();
        self.before_item_reorder.disconnect_all();
        self.before_end_item_reorder.disconnect_all();
        self.item_reordered.disconnect_all();
    }
}

fn fire(signal: &Signal<ItemId>, id: ItemId) -> bool {
    signal.emit(id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use slotmap::SlotMap;

    fn some_id() -> ItemId {
        let mut keys: SlotMap<ItemId, ()> = SlotMap::with_key();
        keys.insert(())
    }

    #[test]
    fn test_before_kinds_are_cancellable() {
        for kind in Notification::ALL {
            assert_eq!(kind.is_cancellable(), kind.name().starts_with("before"));
        }
    }

    #[test]
    fn test_veto_is_reported() {
        let notifications = Notifications::new();
        notifications.before_item_expand.connect(|_| false);

        let id = some_id();
        assert!(!notifications.emit(Notification::BeforeItemExpand, id));
        assert!(notifications.emit(Notification::BeforeItemCollapse, id));
        assert!(notifications.emit(Notification::ItemExpanded, id));
    }

    #[test]
    fn test_observe_all_sees_every_kind() {
        let notifications = Notifications::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let connections = notifications.observe_all(move |kind, _| seen_clone.lock().push(kind));
        assert_eq!(connections.len(), Notification::ALL.len());

        let id = some_id();
        for kind in Notification::ALL {
            assert!(notifications.emit(kind, id));
        }
        assert_eq!(*seen.lock(), Notification::ALL.to_vec());

        notifications.disconnect_all();
        notifications.emit(Notification::ItemAdded, id);
        assert_eq!(seen.lock().len(), Notification::ALL.len());
    }
}
