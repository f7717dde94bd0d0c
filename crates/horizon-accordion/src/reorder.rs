//! Drag-and-drop reorder sessions.
//!
//! Gesture recognition and hit testing belong to the host. The host reports
//! three things: a drag of some item started, the dragged item is hovering
//! over a target item, and the drag ended. [`ReorderCoordinator`] remembers
//! the session between those reports; [`move_item`] performs the splice once
//! the drop is confirmed.

use horizon_accordion_core::logging::targets;

use crate::item::ItemId;

/// State of the current drag, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderCoordinator {
    dragging: Option<ItemId>,
    drop_target: Option<ItemId>,
}

impl ReorderCoordinator {
    /// Create a coordinator with no drag in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.dragging.is_some()
    }

    /// The item being dragged.
    pub fn dragging(&self) -> Option<ItemId> {
        self.dragging
    }

    /// The item the dragged item was last dropped on.
    pub fn drop_target(&self) -> Option<ItemId> {
        self.drop_target
    }

    /// Start dragging `id`.
    ///
    /// Returns `false` if another drag is already in progress.
    pub fn begin(&mut self, id: ItemId) -> bool {
        if self.dragging.is_some() {
            return false;
        }
        self.dragging = Some(id);
        self.drop_target = None;
        true
    }

    /// Record `target` as the drop position.
    ///
    /// Returns `false` when no drag is in progress or `target` is the dragged
    /// item itself.
    pub fn set_drop_target(&mut self, target: ItemId) -> bool {
        match self.dragging {
            Some(dragging) if dragging != target => {
                self.drop_target = Some(target);
                true
            }
            _ => false,
        }
    }

    /// End the session, returning the dragged item and its drop target.
    pub fn finish(&mut self) -> Option<(ItemId, Option<ItemId>)> {
        let dragging = self.dragging.take()?;
        Some((dragging, self.drop_target.take()))
    }

    /// Abandon the session without moving anything.
    pub fn cancel(&mut self) {
        self.dragging = None;
        self.drop_target = None;
    }

    /// Drop references to an item that is no longer registered.
    pub fn forget(&mut self, id: ItemId) {
        if self.dragging == Some(id) {
            tracing::debug!(target: targets::REORDER, ?id, "dragged item removed, drag abandoned");
            self.cancel();
        } else if self.drop_target == Some(id) {
            self.drop_target = None;
        }
    }
}

/// Move the entry at `from` so that it ends up at `to`.
///
/// `to` is the drop target's index before the move. Moving earlier inserts
/// before the target; moving later inserts after it, so the two adjacent cases
/// both swap. Returns `false` when nothing moved.
pub fn move_item(order: &mut Vec<ItemId>, from: usize, to: usize) -> bool {
    if from >= order.len() || from == to {
        return false;
    }
    let id = order.remove(from);
    let to = to.min(order.len());
    order.insert(to, id);
    tracing::trace!(target: targets::REORDER, ?id, from, to, "moved item");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ItemId> {
        let mut keys: SlotMap<ItemId, ()> = SlotMap::with_key();
        (0..n).map(|_| keys.insert(())).collect()
    }

    #[test]
    fn test_move_later_lands_after_target() {
        let original = ids(4);
        let mut order = original.clone();
        assert!(move_item(&mut order, 0, 2));
        assert_eq!(order, vec![original[1], original[2], original[0], original[3]]);
    }

    #[test]
    fn test_move_earlier_lands_before_target() {
        let original = ids(4);
        let mut order = original.clone();
        assert!(move_item(&mut order, 3, 1));
        assert_eq!(order, vec![original[0], original[3], original[1], original[2]]);
    }

    #[test]
    fn test_adjacent_moves_swap() {
        let original = ids(3);
        let mut order = original.clone();
        assert!(move_item(&mut order, 0, 1));
        assert_eq!(order, vec![original[1], original[0], original[2]]);
        assert!(move_item(&mut order, 1, 0));
        assert_eq!(order, original);
    }

    #[test]
    fn test_move_and_back_restores_order() {
        let original = ids(5);
        let mut order = original.clone();
        assert!(move_item(&mut order, 1, 3));
        let moved_to = order.iter().position(|&id| id == original[1]).unwrap();
        assert!(move_item(&mut order, moved_to, 1));
        assert_eq!(order, original);
    }

    #[test]
    fn test_invalid_moves() {
        let original = ids(2);
        let mut order = original.clone();
        assert!(!move_item(&mut order, 1, 1));
        assert!(!move_item(&mut order, 5, 0));
        assert_eq!(order, original);
    }

    #[test]
    fn test_session_lifecycle() {
        let items = ids(3);
        let mut reorder = ReorderCoordinator::new();
        assert!(!reorder.set_drop_target(items[1]));

        assert!(reorder.begin(items[0]));
        assert!(!reorder.begin(items[2]));
        assert!(!reorder.set_drop_target(items[0]));
        assert!(reorder.set_drop_target(items[2]));
        assert_eq!(reorder.drop_target(), Some(items[2]));

        assert_eq!(reorder.finish(), Some((items[0], Some(items[2]))));
        assert!(!reorder.is_active());
        assert_eq!(reorder.finish(), None);
    }

    #[test]
    fn test_forget_clears_session() {
        let items = ids(2);
        let mut reorder = ReorderCoordinator::new();
        reorder.begin(items[0]);
        reorder.set_drop_target(items[1]);

        reorder.forget(items[1]);
        assert_eq!(reorder.drop_target(), None);
        assert!(reorder.is_active());

        reorder.forget(items[0]);
        assert!(!reorder.is_active());
    }
}
