//! The accordion container.
//!
//! [`Accordion`] owns an ordered collection of [`Item`]s and keeps them
//! consistent: at most the pinned items plus the most recently opened one are
//! open when `collapse_others_on_expand` is set, stretch items share the free
//! space, and a pinned item is always open.
//!
//! # Example
//!
//! ```
//! use horizon_accordion::{
//!     Accordion, AccordionConfig, ContentHeight, HeadlessContainer, HeadlessItemSurface, Item,
//!     UserTarget,
//! };
//!
//! let config = AccordionConfig::new().with_animation_enabled(false);
//! let mut accordion = Accordion::new(config, HeadlessContainer::new(300.0));
//!
//! let log = accordion
//!     .add_item(Item::new("Log", HeadlessItemSurface::new(20.0, None))
//!         .with_content_height(ContentHeight::Stretch)
//!         .with_expanded(true), None)
//!     .unwrap();
//! let details = accordion
//!     .add_item(Item::new("Details", HeadlessItemSurface::new(20.0, Some(50.0))), None)
//!     .unwrap();
//!
//! // Opening "Details" collapses "Log".
//! accordion.choose(details, UserTarget::Header);
//! assert!(accordion.item(details).unwrap().is_expanded());
//! assert!(!accordion.item(log).unwrap().is_expanded());
//! ```

mod engine;
mod resize;

pub use engine::{Intent, UserTarget};
pub use resize::ResizeSource;

use std::time::Instant;

use horizon_accordion_core::logging::targets;
use slotmap::SlotMap;

use crate::config::{AccordionConfig, AnimationSettings, ItemSpec};
use crate::error::Result;
use crate::height::HeightResolver;
use crate::item::{ContentHeight, Item, ItemId};
use crate::notify::{Notification, Notifications};
use crate::reorder::{self, ReorderCoordinator};
use crate::surface::{ContainerSurface, ItemSurface};
use crate::transition::{TransitionContext, TransitionExecutor};
use engine::PendingWork;
use resize::ResizeBinding;

/// A reference to a registered item, by position or by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRef {
    /// The item at this 0-based position.
    Index(usize),
    /// The item with this handle.
    Id(ItemId),
}

impl From<usize> for ItemRef {
    fn from(index: usize) -> Self {
        ItemRef::Index(index)
    }
}

impl From<ItemId> for ItemRef {
    fn from(id: ItemId) -> Self {
        ItemRef::Id(id)
    }
}

/// A collapsible container of items.
pub struct Accordion {
    config: AccordionConfig,
    container: Box<dyn ContainerSurface>,
    items: SlotMap<ItemId, Item>,
    /// Visual order.
    order: Vec<ItemId>,
    pending: PendingWork,
    transitions: TransitionExecutor,
    reorder: ReorderCoordinator,
    notifications: Notifications,
    resize: ResizeBinding,
}

impl Accordion {
    /// Create an empty accordion inside `container`.
    ///
    /// Items declared in `config.items` are ignored; use
    /// [`from_config`](Self::from_config) to build them.
    pub fn new(config: AccordionConfig, container: impl ContainerSurface + 'static) -> Self {
        Self {
            config,
            container: Box::new(container),
            items: SlotMap::with_key(),
            order: Vec::new(),
            pending: PendingWork::default(),
            transitions: TransitionExecutor::new(),
            reorder: ReorderCoordinator::new(),
            notifications: Notifications::new(),
            resize: ResizeBinding::new(),
        }
    }

    /// Validate `config` and create an accordion holding its declared items.
    ///
    /// `surface_for` supplies the surface each declared item renders into.
    pub fn from_config<S, F>(
        config: AccordionConfig,
        container: impl ContainerSurface + 'static,
        mut surface_for: F,
    ) -> Result<Self>
    where
        S: ItemSurface + 'static,
        F: FnMut(&ItemSpec) -> S,
    {
        config.validate()?;
        let specs = config.items.clone();
        let mut accordion = Self::new(config, container);
        for spec in &specs {
            let item = spec.build(surface_for(spec));
            accordion.add_item(item, None);
        }
        Ok(accordion)
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The current configuration.
    pub fn config(&self) -> &AccordionConfig {
        &self.config
    }

    /// Enable or disable animated transitions.
    ///
    /// Animations already running finish normally.
    pub fn set_use_animation(&mut self, enabled: bool) {
        self.config.use_animation = enabled;
    }

    /// Replace the default animation.
    pub fn set_animation(&mut self, animation: AnimationSettings) {
        self.config.animation = animation;
    }

    /// Set whether expanding an item collapses the other unpinned items.
    pub fn set_collapse_others_on_expand(&mut self, collapse: bool) {
        self.config.collapse_others_on_expand = collapse;
    }

    /// Enable or disable drag-and-drop reordering. Disabling abandons a drag
    /// in progress.
    pub fn set_reorder_items(&mut self, enabled: bool) {
        self.config.reorder_items = enabled;
        if !enabled {
            self.reorder.cancel();
        }
    }

    /// The signals this accordion emits.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Register `item`.
    ///
    /// The item is inserted immediately before `parent`, or appended when
    /// `parent` is `None` or not registered. Returns `None` if
    /// `before_item_add` vetoed the registration, in which case the item is
    /// dropped.
    pub fn add_item(&mut self, item: Item, parent: Option<ItemId>) -> Option<ItemId> {
        let id = self.items.insert(item);
        if !self.notifications.emit(Notification::BeforeItemAdd, id) {
            self.items.remove(id);
            return None;
        }

        let index = parent
            .and_then(|parent| self.position(parent))
            .unwrap_or(self.order.len());
        self.order.insert(index, id);
        self.container.item_attached(id, index);
        tracing::debug!(target: targets::ENGINE, ?id, index, "item added");
        self.notifications.emit(Notification::ItemAdded, id);

        self.settle_new_item(id);
        Some(id)
    }

    /// Unregister an item and hand it back.
    ///
    /// Returns `None` if the item is unknown or `before_item_remove` vetoed
    /// the removal.
    pub fn remove_item(&mut self, item: impl Into<ItemRef>) -> Option<Item> {
        let id = self.resolve(item.into())?;
        if !self.notifications.emit(Notification::BeforeItemRemove, id) {
            return None;
        }

        let item = self.detach(id)?;
        self.notifications.emit(Notification::ItemRemoved, id);
        self.adjust_stretch_items();
        Some(item)
    }

    /// Remove every item, last first.
    ///
    /// Only `item_removed` is emitted; teardown cannot be vetoed. The resize
    /// source is reset to [`ResizeSource::Window`].
    pub fn destroy(&mut self) {
        tracing::debug!(target: targets::ENGINE, items = self.order.len(), "destroying");
        self.reorder.cancel();
        while let Some(&id) = self.order.last() {
            if self.detach(id).is_some() {
                self.notifications.emit(Notification::ItemRemoved, id);
            }
        }
        self.pending = PendingWork::default();
        self.resize.rebind(ResizeSource::Window);
    }

    fn detach(&mut self, id: ItemId) -> Option<Item> {
        let index = self.position(id)?;
        self.order.remove(index);
        if let Some(item) = self.items.get_mut(id) {
            self.transitions.cancel(id, item);
        }
        self.pending.forget(id);
        self.reorder.forget(id);
        self.container.item_detached(id);
        tracing::debug!(target: targets::ENGINE, ?id, index, "item removed");
        self.items.remove(id)
    }

    /// Look up an item.
    pub fn item(&self, item: impl Into<ItemRef>) -> Option<&Item> {
        self.resolve(item.into()).and_then(|id| self.items.get(id))
    }

    /// Look up an item for editing its label or affordances.
    pub fn item_mut(&mut self, item: impl Into<ItemRef>) -> Option<&mut Item> {
        let id = self.resolve(item.into())?;
        self.items.get_mut(id)
    }

    /// The handle of the item at `index`.
    pub fn item_id(&self, index: usize) -> Option<ItemId> {
        self.order.get(index).copied()
    }

    /// The position of `id`, or -1 if it is not registered.
    pub fn item_index(&self, id: ItemId) -> i32 {
        self.position(id).map(|i| i as i32).unwrap_or(-1)
    }

    /// Number of registered items.
    pub fn item_count(&self) -> usize {
        self.order.len()
    }

    /// Whether no items are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Item handles in visual order.
    pub fn item_ids(&self) -> &[ItemId] {
        &self.order
    }

    /// Items in visual order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.items.get(id).map(|item| (id, item)))
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.order.iter().position(|&entry| entry == id)
    }

    fn resolve(&self, item: ItemRef) -> Option<ItemId> {
        match item {
            ItemRef::Index(index) => self.item_id(index),
            ItemRef::Id(id) => self.items.contains_key(id).then_some(id),
        }
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Handle a click or key press on part of an item.
    pub fn choose(&mut self, id: ItemId, target: UserTarget) -> bool {
        self.reconcile(Intent::ChosenByUser { item: id, target })
    }

    /// Open or close an item.
    pub fn set_item_expanded(&mut self, id: ItemId, expanded: bool) -> bool {
        self.reconcile(Intent::ExternalExpandChange { item: id, expanded })
    }

    /// Pin or unpin an item.
    pub fn set_item_always_visible(&mut self, id: ItemId, always_visible: bool) -> bool {
        self.reconcile(Intent::ExternalPinChange {
            item: id,
            always_visible,
        })
    }

    /// Change an item's content-height policy.
    pub fn set_item_content_height(&mut self, id: ItemId, content_height: ContentHeight) -> bool {
        self.reconcile(Intent::ContentHeightChange {
            item: id,
            content_height,
        })
    }

    // =========================================================================
    // Heights
    // =========================================================================

    fn resolver(&self) -> HeightResolver<'_> {
        HeightResolver::new(
            self.container.as_ref(),
            &self.items,
            &self.order,
            self.config.collapsed_height(),
        )
    }

    /// The body height each open stretch item should have.
    pub fn height_per_stretch_item(&self) -> f32 {
        self.resolver().height_per_stretch_item()
    }

    /// The open body height of `id` under its current policy.
    pub fn item_content_height(&self, id: ItemId) -> f32 {
        self.resolver().item_content_height(id)
    }

    // =========================================================================
    // Reordering
    // =========================================================================

    /// Start dragging `id`.
    ///
    /// Fails when reordering is disabled, another drag is in progress, or
    /// `before_item_reorder` vetoed.
    pub fn begin_item_reorder(&mut self, id: ItemId) -> bool {
        if !self.config.reorder_items || self.reorder.is_active() || !self.items.contains_key(id) {
            return false;
        }
        if !self.notifications.emit(Notification::BeforeItemReorder, id) {
            return false;
        }
        tracing::debug!(target: targets::REORDER, ?id, "drag started");
        self.reorder.begin(id)
    }

    /// Report that the dragged item is over `target`.
    pub fn drop_item_on(&mut self, target: ItemId) -> bool {
        self.items.contains_key(target) && self.reorder.set_drop_target(target)
    }

    /// Finish the drag, moving the dragged item to the drop target.
    ///
    /// Returns `true` if the item moved. A veto from
    /// `before_end_item_reorder` abandons the drag.
    pub fn end_item_reorder(&mut self) -> bool {
        let Some(dragged) = self.reorder.dragging() else {
            return false;
        };
        if !self.notifications.emit(Notification::BeforeEndItemReorder, dragged) {
            self.reorder.cancel();
            return false;
        }

        let Some((dragged, Some(target))) = self.reorder.finish() else {
            tracing::debug!(target: targets::REORDER, ?dragged, "drag ended without a target");
            return false;
        };
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return false;
        };
        if !reorder::move_item(&mut self.order, from, to) {
            return false;
        }

        self.container.item_moved(dragged, to);
        tracing::debug!(target: targets::REORDER, ?dragged, from, to, "item reordered");
        self.notifications.emit(Notification::ItemReordered, dragged);
        true
    }

    /// Abandon the drag in progress.
    pub fn cancel_item_reorder(&mut self) {
        self.reorder.cancel();
    }

    /// Whether a drag is in progress.
    pub fn is_reordering(&self) -> bool {
        self.reorder.is_active()
    }

    /// Drag `dragged` onto `target` in one step.
    pub fn reorder_item(&mut self, dragged: ItemId, target: ItemId) -> bool {
        if !self.begin_item_reorder(dragged) {
            return false;
        }
        if !self.drop_item_on(target) {
            self.reorder.cancel();
            return false;
        }
        self.end_item_reorder()
    }

    // =========================================================================
    // Resizing
    // =========================================================================

    /// Change where resize notifications come from.
    pub fn set_resize_source(&mut self, source: ResizeSource) {
        tracing::debug!(target: targets::ENGINE, ?source, "resize source changed");
        self.resize.rebind(source);
    }

    /// The current resize source.
    pub fn resize_source(&self) -> &ResizeSource {
        self.resize.source()
    }

    /// Handle a window resize.
    ///
    /// Ignored unless the resize source is [`ResizeSource::Window`].
    pub fn notify_window_resized(&mut self) -> bool {
        if !self.resize.is_window() {
            return false;
        }
        self.adjust_stretch_items();
        true
    }

    /// Handle an emission of an external resize source, if one happened.
    pub fn process_pending_resize(&mut self) -> bool {
        self.process_pending_resize_at(Instant::now())
    }

    fn process_pending_resize_at(&mut self, now: Instant) -> bool {
        if !self.resize.take_pending() {
            return false;
        }
        self.adjust_stretch_at(&[], now);
        true
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance animations to the current time.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Handle a pending resize, then advance animations to `now`.
    ///
    /// Returns `true` while any animation is still running.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.process_pending_resize_at(now);
        self.transitions
            .tick_at(now, &mut self.items, &self.notifications)
    }

    /// Whether any item is animating.
    pub fn has_running_animations(&self) -> bool {
        self.transitions.running_count() > 0
    }

    /// Whether `id` is animating.
    pub fn is_animating(&self, id: ItemId) -> bool {
        self.transitions.is_running(id)
    }
}

fn transition_context<'a>(
    notifications: &'a Notifications,
    config: &AccordionConfig,
    now: Instant,
) -> TransitionContext<'a> {
    TransitionContext {
        notifications,
        use_animation: config.use_animation,
        defaults: config.animation,
        collapsed_height: config.collapsed_height(),
        now,
    }
}

// Surfaces are only required to be `Send`.
static_assertions::assert_impl_all!(Accordion: Send);
