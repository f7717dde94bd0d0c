//! Reconciliation of intents into collapse and expand transitions.
//!
//! Every change to an item's state arrives as an [`Intent`]. Handling an
//! intent queues items into two pending sets (collapse and expand), then runs
//! one reconciliation pass:
//!
//! 1. flags of every queued item are updated as a batch;
//! 2. queued items collapse to the collapsed height;
//! 3. stretch items are redistributed over the whole container;
//! 4. queued items expand to their content height;
//! 5. the pending sets are cleared.
//!
//! Collapsing first frees space before anything grows, and stretch heights
//! are computed against the final membership of the pass.
//!
//! Pinning or unpinning an item that is already open bypasses the pass and
//! only updates its affordances.

use std::time::Instant;

use horizon_accordion_core::PerfSpan;
use horizon_accordion_core::logging::{span_names, targets};

use super::{Accordion, transition_context};
use crate::item::{ContentHeight, Item, ItemId};
use crate::transition::{TransitionContext, TransitionExecutor};

/// What the user interacted with on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserTarget {
    /// The header.
    Header,
    /// The always-visible (pin) icon.
    AlwaysVisibleIcon,
    /// The close icon.
    CloseIcon,
}

/// A requested change to one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// The user clicked or activated part of an item.
    ChosenByUser {
        /// The item.
        item: ItemId,
        /// Which part of it.
        target: UserTarget,
    },
    /// The item's expanded flag was set programmatically.
    ExternalExpandChange {
        /// The item.
        item: ItemId,
        /// The requested value.
        expanded: bool,
    },
    /// The item's always-visible flag was set programmatically.
    ExternalPinChange {
        /// The item.
        item: ItemId,
        /// The requested value.
        always_visible: bool,
    },
    /// The item's content-height policy was set programmatically.
    ContentHeightChange {
        /// The item.
        item: ItemId,
        /// The new policy.
        content_height: ContentHeight,
    },
}

impl Intent {
    /// The item the intent is about.
    pub fn item(&self) -> ItemId {
        match *self {
            Intent::ChosenByUser { item, .. }
            | Intent::ExternalExpandChange { item, .. }
            | Intent::ExternalPinChange { item, .. }
            | Intent::ContentHeightChange { item, .. } => item,
        }
    }
}

/// Items queued for the next reconciliation pass, in queueing order.
///
/// An item is in at most one set; queueing it again moves it to the set it
/// was last queued for.
#[derive(Debug, Default)]
pub(super) struct PendingWork {
    collapse: Vec<ItemId>,
    /// Items to expand, with the pin state they end up with.
    expand: Vec<(ItemId, bool)>,
}

impl PendingWork {
    fn mark_collapse(&mut self, id: ItemId) {
        self.expand.retain(|&(queued, _)| queued != id);
        if !self.collapse.contains(&id) {
            self.collapse.push(id);
        }
    }

    fn mark_expand(&mut self, id: ItemId, always_visible: bool) {
        self.collapse.retain(|&queued| queued != id);
        match self.expand.iter_mut().find(|(queued, _)| *queued == id) {
            Some(entry) => entry.1 = always_visible,
            None => self.expand.push((id, always_visible)),
        }
    }

    pub(super) fn forget(&mut self, id: ItemId) {
        self.collapse.retain(|&queued| queued != id);
        self.expand.retain(|&(queued, _)| queued != id);
    }

    fn is_empty(&self) -> bool {
        self.collapse.is_empty() && self.expand.is_empty()
    }
}

impl Accordion {
    /// Apply an intent.
    ///
    /// Returns `true` if the intent changed anything. Intents for unknown
    /// items, and intents that request the state an item already has, are
    /// ignored.
    pub fn reconcile(&mut self, intent: Intent) -> bool {
        let id = intent.item();
        if !self.items.contains_key(id) {
            tracing::debug!(target: targets::ENGINE, ?intent, "intent for unknown item ignored");
            return false;
        }
        tracing::debug!(target: targets::ENGINE, ?intent, "reconciling");

        match intent {
            Intent::ChosenByUser { item, target } => self.on_chosen(item, target),
            Intent::ExternalExpandChange { item, expanded } => self.on_expand_change(item, expanded),
            Intent::ExternalPinChange {
                item,
                always_visible,
            } => self.on_pin_change(item, always_visible),
            Intent::ContentHeightChange {
                item,
                content_height,
            } => self.on_content_height_change(item, content_height),
        }
    }

    fn on_chosen(&mut self, id: ItemId, target: UserTarget) -> bool {
        let item = &self.items[id];
        let expanded = item.is_expanded();
        let always_visible = item.is_always_visible();
        let closable = item.is_closable();

        match target {
            UserTarget::CloseIcon => closable && self.remove_item(id).is_some(),
            UserTarget::AlwaysVisibleIcon if expanded => self.mark_pin(id, !always_visible),
            UserTarget::AlwaysVisibleIcon => {
                self.queue_expand(id, true, self.config.collapse_others_on_expand);
                self.run_pass();
                true
            }
            UserTarget::Header if expanded => {
                self.pending.mark_collapse(id);
                self.run_pass();
                true
            }
            UserTarget::Header => {
                self.queue_expand(id, always_visible, self.config.collapse_others_on_expand);
                self.run_pass();
                true
            }
        }
    }

    fn on_expand_change(&mut self, id: ItemId, expanded: bool) -> bool {
        let item = &self.items[id];
        if item.is_expanded() == expanded {
            return false;
        }

        if expanded {
            let always_visible = item.is_always_visible();
            self.queue_expand(id, always_visible, self.config.collapse_others_on_expand);
        } else {
            self.pending.mark_collapse(id);
        }
        self.run_pass();
        true
    }

    fn on_pin_change(&mut self, id: ItemId, always_visible: bool) -> bool {
        let item = &self.items[id];
        if item.is_always_visible() == always_visible {
            return false;
        }
        if item.is_expanded() {
            return self.mark_pin(id, always_visible);
        }

        // Pinning a closed item clears its open siblings whatever
        // `collapse_others_on_expand` says.
        self.queue_expand(id, true, true);
        self.run_pass();
        true
    }

    fn on_content_height_change(&mut self, id: ItemId, content_height: ContentHeight) -> bool {
        if !self.items[id].set_content_height_policy(content_height) {
            return false;
        }
        self.adjust_stretch_items();
        if content_height.is_stretch() {
            return true;
        }

        let target = self.resolver().item_content_height(id);
        let ctx = transition_context(&self.notifications, &self.config, Instant::now());
        let Some(item) = self.items.get_mut(id) else {
            return true;
        };
        let skip_animation = !item.is_expanded();
        retarget(&mut self.transitions, id, item, target, skip_animation, ctx);
        true
    }

    /// Set the pin of an open item and sync its affordances, without a pass.
    fn mark_pin(&mut self, id: ItemId, always_visible: bool) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        if !item.set_always_visible_flag(always_visible) {
            return false;
        }
        item.mark_ui(true, always_visible);
        tracing::debug!(target: targets::ENGINE, ?id, always_visible, "pin updated");
        true
    }

    fn queue_expand(&mut self, id: ItemId, always_visible: bool, collapse_others: bool) {
        self.pending.mark_expand(id, always_visible);
        if collapse_others {
            self.sweep(id);
        }
    }

    /// Queue every other open, unpinned item for collapse.
    fn sweep(&mut self, except: ItemId) {
        for &other in &self.order {
            if other == except {
                continue;
            }
            let open = self
                .items
                .get(other)
                .is_some_and(|item| item.is_expanded() && !item.is_always_visible());
            if open {
                self.pending.mark_collapse(other);
            }
        }
    }

    /// Bring a freshly registered item to the state its flags describe.
    pub(super) fn settle_new_item(&mut self, id: ItemId) {
        let collapsed_height = self.config.collapsed_height();
        let Some(item) = self.items.get_mut(id) else {
            return;
        };

        if item.is_expanded() {
            let always_visible = item.is_always_visible();
            self.queue_expand(id, always_visible, self.config.collapse_others_on_expand);
            self.run_pass();
        } else {
            item.set_body_height(collapsed_height);
            item.mark_ui(false, false);
            self.adjust_stretch_items();
        }
    }

    fn run_pass(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }
        let _span = tracing::debug_span!(
            target: targets::ENGINE,
            "reconcile",
            collapse = pending.collapse.len(),
            expand = pending.expand.len()
        )
        .entered();

        for &id in &pending.collapse {
            if let Some(item) = self.items.get(id) {
                item.set_flags(false, false);
            }
        }
        for &(id, always_visible) in &pending.expand {
            if let Some(item) = self.items.get(id) {
                item.set_flags(true, always_visible);
            }
        }

        let now = Instant::now();
        let collapsed_height = self.config.collapsed_height();
        let ctx = transition_context(&self.notifications, &self.config, now);
        for &id in &pending.collapse {
            let Some(item) = self.items.get_mut(id) else {
                continue;
            };
            self.transitions.collapse(id, item, collapsed_height, false, ctx);
            item.mark_ui(false, false);
        }

        let expanding: Vec<ItemId> = pending.expand.iter().map(|&(id, _)| id).collect();
        let per_stretch = self.adjust_stretch_at(&expanding, now);

        for &(id, always_visible) in &pending.expand {
            let target = match self.items.get(id) {
                Some(item) if item.content_height().is_stretch() => per_stretch,
                Some(_) => self.resolver().item_content_height(id),
                None => continue,
            };
            let ctx = transition_context(&self.notifications, &self.config, now);
            let Some(item) = self.items.get_mut(id) else {
                continue;
            };
            self.transitions.expand(id, item, target, false, ctx);
            item.mark_ui(true, always_visible);
        }
    }

    /// Bring every open stretch item to its share of the free space.
    ///
    /// Returns the per-stretch-item height used.
    pub fn adjust_stretch_items(&mut self) -> f32 {
        self.adjust_stretch_at(&[], Instant::now())
    }

    /// Like [`adjust_stretch_items`](Self::adjust_stretch_items), skipping
    /// `skip` and starting animations at `now`.
    pub(super) fn adjust_stretch_at(&mut self, skip: &[ItemId], now: Instant) -> f32 {
        let _perf = PerfSpan::new(span_names::STRETCH);
        let per_stretch = self.height_per_stretch_item();
        let ctx = transition_context(&self.notifications, &self.config, now);

        for &id in &self.order {
            if skip.contains(&id) {
                continue;
            }
            let Some(item) = self.items.get_mut(id) else {
                continue;
            };
            if !item.is_expanded() || !item.content_height().is_stretch() {
                continue;
            }

            retarget(&mut self.transitions, id, item, per_stretch, false, ctx);
        }
        per_stretch
    }
}

/// Drive `item` toward `target` unless it is already there or heading there.
///
/// A running animation bound elsewhere is superseded even when the body
/// currently measures `target`.
fn retarget(
    transitions: &mut TransitionExecutor,
    id: ItemId,
    item: &mut Item,
    target: f32,
    skip_animation: bool,
    ctx: TransitionContext<'_>,
) {
    let current = item.measured_body_height();
    let heading = transitions.target(id).unwrap_or(current);
    if heading == target {
        return;
    }
    if target < current {
        transitions.collapse(id, item, target, skip_animation, ctx);
    } else {
        transitions.expand(id, item, target, skip_animation, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_last_queue_wins() {
        let mut keys: SlotMap<ItemId, ()> = SlotMap::with_key();
        let (a, b) = (keys.insert(()), keys.insert(()));
        let mut pending = PendingWork::default();

        pending.mark_expand(a, false);
        pending.mark_collapse(b);
        pending.mark_collapse(a);
        assert_eq!(pending.collapse, vec![b, a]);
        assert!(pending.expand.is_empty());

        pending.mark_expand(a, false);
        pending.mark_expand(a, true);
        assert_eq!(pending.collapse, vec![b]);
        assert_eq!(pending.expand, vec![(a, true)]);

        pending.forget(b);
        pending.forget(a);
        assert!(pending.is_empty());
    }
}
