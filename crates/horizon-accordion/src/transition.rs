//! Expand/collapse transitions for a single item.
//!
//! The executor drives one item's body from its current height to a target,
//! either synchronously or as an animation sampled by [`TransitionExecutor::tick_at`].
//! At most one animation per item is in flight: starting a new transition for
//! an item stops the previous one where it is, without snapping back to its
//! start or forward to its target.
//!
//! Whether a height change is a real expand/collapse or only a resize is
//! decided by height thresholds:
//!
//! - an expand is a true expansion when the body currently measures `<= 0`;
//! - a collapse is a true collapse when the target equals the collapsed-height
//!   constant.
//!
//! Only true transitions emit `before_item_expand`/`item_expanded` and
//! `before_item_collapse`/`item_collapsed`. Every transition emits
//! `before_item_resized`/`item_resized`.

use std::time::Instant;

use horizon_accordion_core::logging::targets;
use slotmap::{SecondaryMap, SlotMap};

use crate::animation::{HeightAnimation, TransitionKind};
use crate::config::AnimationSettings;
use crate::item::{Item, ItemId};
use crate::notify::{Notification, Notifications};

/// Container-level inputs a transition needs.
#[derive(Clone, Copy)]
pub struct TransitionContext<'a> {
    /// Where notifications go.
    pub notifications: &'a Notifications,
    /// Whether animation is enabled for the container.
    pub use_animation: bool,
    /// Default animation for items without an override.
    pub defaults: AnimationSettings,
    /// Height of a fully closed body.
    pub collapsed_height: f32,
    /// Start time for new animations.
    pub now: Instant,
}

struct RunningTransition {
    animation: HeightAnimation,
    /// Whether completion announces expanded/collapsed, not just resized.
    announce: bool,
}

/// Owns the running animation of every item.
#[derive(Default)]
pub struct TransitionExecutor {
    running: SecondaryMap<ItemId, RunningTransition>,
}

impl TransitionExecutor {
    /// Create an executor with nothing running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow (or resize) `item`'s body to `target`.
    ///
    /// Returns `false` if a `before_*` notification vetoed the transition.
    pub fn expand(
        &mut self,
        id: ItemId,
        item: &mut Item,
        target: f32,
        skip_animation: bool,
        ctx: TransitionContext<'_>,
    ) -> bool {
        let notifications = ctx.notifications;
        if !notifications.emit(Notification::BeforeItemResized, id) {
            return false;
        }

        let first_expansion = item.measured_body_height() <= 0.0;
        if first_expansion && !notifications.emit(Notification::BeforeItemExpand, id) {
            return false;
        }

        self.run(
            id,
            item,
            TransitionKind::Expand,
            target,
            first_expansion,
            skip_animation,
            ctx,
        );
        true
    }

    /// Shrink `item`'s body to `target`.
    ///
    /// Returns `false` if a `before_*` notification vetoed the transition.
    pub fn collapse(
        &mut self,
        id: ItemId,
        item: &mut Item,
        target: f32,
        skip_animation: bool,
        ctx: TransitionContext<'_>,
    ) -> bool {
        let notifications = ctx.notifications;
        if !notifications.emit(Notification::BeforeItemResized, id) {
            return false;
        }

        let true_collapse = target == ctx.collapsed_height;
        if true_collapse && !notifications.emit(Notification::BeforeItemCollapse, id) {
            return false;
        }

        self.run(
            id,
            item,
            TransitionKind::Collapse,
            target,
            true_collapse,
            skip_animation,
            ctx,
        );
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn run(
        &mut self,
        id: ItemId,
        item: &mut Item,
        kind: TransitionKind,
        target: f32,
        announce: bool,
        skip_animation: bool,
        ctx: TransitionContext<'_>,
    ) {
        self.cancel(id, item);

        if ctx.use_animation && !skip_animation {
            let (duration, easing) = match item.animation() {
                Some(custom) => (custom.duration, custom.easing),
                None => (ctx.defaults.duration(), ctx.defaults.easing),
            };
            let from = item.measured_body_height();
            tracing::trace!(
                target: targets::TRANSITION,
                ?id,
                ?kind,
                from,
                to = target,
                duration_ms = duration.as_millis() as u64,
                "starting animation"
            );

            item.set_animating(kind, true);
            self.running.insert(
                id,
                RunningTransition {
                    animation: HeightAnimation::new(kind, from, target, duration, easing, ctx.now),
                    announce,
                },
            );
        } else {
            tracing::trace!(target: targets::TRANSITION, ?id, ?kind, to = target, "applying height");
            item.set_body_height(target);
            finish(ctx.notifications, id, kind, announce);
        }
    }

    /// Stop `id`'s running animation where it is.
    ///
    /// Returns `true` if an animation was running. No completion
    /// notification is emitted for a stopped animation.
    pub fn cancel(&mut self, id: ItemId, item: &mut Item) -> bool {
        match self.running.remove(id) {
            Some(running) => {
                item.set_animating(running.animation.kind(), false);
                tracing::trace!(
                    target: targets::TRANSITION,
                    ?id,
                    height = item.measured_body_height(),
                    target = running.animation.to(),
                    "animation stopped"
                );
                true
            }
            None => false,
        }
    }

    /// Whether `id` has an animation in flight.
    pub fn is_running(&self, id: ItemId) -> bool {
        self.running.contains_key(id)
    }

    /// Height `id`'s running animation is heading for.
    pub fn target(&self, id: ItemId) -> Option<f32> {
        self.running.get(id).map(|running| running.animation.to())
    }

    /// Number of animations in flight.
    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Advance every running animation to `now`.
    ///
    /// Completed animations are removed and their completion notifications
    /// emitted. Returns `true` while any animation is still running.
    pub fn tick_at(
        &mut self,
        now: Instant,
        items: &mut SlotMap<ItemId, Item>,
        notifications: &Notifications,
    ) -> bool {
        let mut finished = Vec::new();

        for (id, running) in self.running.iter() {
            let Some(item) = items.get_mut(id) else {
                finished.push(id);
                continue;
            };
            let frame = running.animation.sample(now);
            item.set_body_height(frame.height);
            if frame.finished {
                finished.push(id);
            }
        }

        for id in finished {
            let Some(running) = self.running.remove(id) else {
                continue;
            };
            let kind = running.animation.kind();
            if let Some(item) = items.get_mut(id) {
                item.set_animating(kind, false);
                tracing::trace!(target: targets::TRANSITION, ?id, ?kind, "animation complete");
                finish(notifications, id, kind, running.announce);
            }
        }

        !self.running.is_empty()
    }
}

fn finish(notifications: &Notifications, id: ItemId, kind: TransitionKind, announce: bool) {
    notifications.emit(Notification::ItemResized, id);
    if announce {
        let done = match kind {
            TransitionKind::Expand => Notification::ItemExpanded,
            TransitionKind::Collapse => Notification::ItemCollapsed,
        };
        notifications.emit(done, id);
    }
}
