//! Accordion items.
//!
//! An [`Item`] is one collapsible panel: a header that is always shown and a
//! body that is either open at its content height or closed. Items are built
//! by the caller and handed to [`Accordion::add_item`](crate::Accordion::add_item),
//! which returns the [`ItemId`] used for every later operation.
//!
//! # Example
//!
//! ```
//! use horizon_accordion::{ContentHeight, HeadlessItemSurface, Item};
//!
//! let item = Item::new("Output", HeadlessItemSurface::new(24.0, None))
//!     .with_content_height(ContentHeight::Stretch)
//!     .with_always_visible(true);
//!
//! // Pinning forces the item open.
//! assert!(item.is_expanded());
//! ```

use std::fmt;
use std::time::Duration;

use horizon_accordion_core::Property;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::animation::{Easing, TransitionKind};
use crate::surface::ItemSurface;

new_key_type! {
    /// A stable handle to an item registered with an accordion.
    ///
    /// The handle stays valid while the item is registered, independent of
    /// its position, and is never reused for a different item.
    pub struct ItemId;
}

/// How an item's open body height is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum ContentHeight {
    /// The height of the first child inside the body.
    #[default]
    Auto,
    /// A fixed pixel height.
    Fixed {
        /// Height in pixels.
        height: u32,
    },
    /// An equal share of the container space left over by every other item.
    Stretch,
}

impl ContentHeight {
    /// Whether this is the stretch policy.
    #[inline]
    pub fn is_stretch(&self) -> bool {
        matches!(self, ContentHeight::Stretch)
    }
}

/// Per-item replacement for the accordion's default animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationOverride {
    /// Animation duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl AnimationOverride {
    /// Create an override.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// The visual affordances an item currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiMarks {
    /// The expanded icon/state is shown.
    pub expanded: bool,
    /// The pinned icon/state is shown.
    pub always_visible: bool,
}

impl UiMarks {
    /// Create a set of marks.
    pub fn new(expanded: bool, always_visible: bool) -> Self {
        Self {
            expanded,
            always_visible,
        }
    }
}

/// A single accordion panel.
///
/// Flags are held in [`Property`] cells so that changes can be detected. The
/// invariant `always_visible ⇒ expanded` holds for every item reachable
/// through the public API.
pub struct Item {
    label: String,
    expanded: Property<bool>,
    always_visible: Property<bool>,
    content_height: Property<ContentHeight>,
    closable: bool,
    animation: Option<AnimationOverride>,
    animating_expand: bool,
    animating_collapse: bool,
    marks: Option<UiMarks>,
    surface: Box<dyn ItemSurface>,
}

impl Item {
    /// Create a collapsed, auto-height item backed by `surface`.
    pub fn new(label: impl Into<String>, surface: impl ItemSurface + 'static) -> Self {
        Self {
            label: label.into(),
            expanded: Property::new(false),
            always_visible: Property::new(false),
            content_height: Property::new(ContentHeight::Auto),
            closable: false,
            animation: None,
            animating_expand: false,
            animating_collapse: false,
            marks: None,
            surface: Box::new(surface),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set the initial expanded state. Starting collapsed also clears the pin.
    pub fn with_expanded(self, expanded: bool) -> Self {
        self.set_flags(expanded, expanded && self.is_always_visible());
        self
    }

    /// Set the initial pin. Pinning also expands the item.
    pub fn with_always_visible(self, always_visible: bool) -> Self {
        self.set_flags(self.is_expanded() || always_visible, always_visible);
        self
    }

    /// Set the content-height policy.
    pub fn with_content_height(self, content_height: ContentHeight) -> Self {
        self.content_height.set_silent(content_height);
        self
    }

    /// Give the item a close affordance.
    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Override the accordion's default animation for this item.
    pub fn with_animation(mut self, animation: AnimationOverride) -> Self {
        self.animation = Some(animation);
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The header label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the header label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Whether the body is open.
    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    /// Whether the item is pinned open.
    pub fn is_always_visible(&self) -> bool {
        self.always_visible.get()
    }

    /// The content-height policy.
    pub fn content_height(&self) -> ContentHeight {
        self.content_height.get()
    }

    /// Whether the item has a close affordance.
    pub fn is_closable(&self) -> bool {
        self.closable
    }

    /// The per-item animation override, if any.
    pub fn animation(&self) -> Option<AnimationOverride> {
        self.animation
    }

    /// Whether an expand animation is in flight.
    pub fn is_animating_expand(&self) -> bool {
        self.animating_expand
    }

    /// Whether a collapse animation is in flight.
    pub fn is_animating_collapse(&self) -> bool {
        self.animating_collapse
    }

    /// The affordances last applied to the surface.
    pub fn marks(&self) -> Option<UiMarks> {
        self.marks
    }

    // =========================================================================
    // Surface access
    // =========================================================================

    /// Measured header height.
    pub fn header_height(&self) -> f32 {
        self.surface.header_height()
    }

    /// Measured body height.
    pub fn measured_body_height(&self) -> f32 {
        self.surface.body_height()
    }

    /// Height of the first child in the body, 0 for an empty body.
    pub fn first_child_height(&self) -> f32 {
        self.surface.first_child_height().unwrap_or(0.0)
    }

    /// Sync the surface affordances with the given state.
    ///
    /// Returns `true` if the surface was updated, `false` if it already showed
    /// this state.
    pub fn mark_ui(&mut self, expanded: bool, always_visible: bool) -> bool {
        let marks = UiMarks::new(expanded, always_visible);
        if self.marks == Some(marks) {
            return false;
        }
        self.surface.apply_marks(marks);
        self.marks = Some(marks);
        true
    }

    // =========================================================================
    // Engine-side mutation
    // =========================================================================

    /// Overwrite both flags, keeping pin ⇒ expanded.
    pub(crate) fn set_flags(&self, expanded: bool, always_visible: bool) {
        self.expanded.set_silent(expanded || always_visible);
        self.always_visible.set_silent(always_visible);
    }

    /// Returns `true` if the flag changed.
    pub(crate) fn set_always_visible_flag(&self, always_visible: bool) -> bool {
        self.always_visible.set(always_visible)
    }

    /// Returns `true` if the policy changed.
    pub(crate) fn set_content_height_policy(&self, content_height: ContentHeight) -> bool {
        self.content_height.set(content_height)
    }

    pub(crate) fn set_body_height(&mut self, height: f32) {
        self.surface.set_body_height(height);
    }

    pub(crate) fn set_animating(&mut self, kind: TransitionKind, animating: bool) {
        match kind {
            TransitionKind::Expand => self.animating_expand = animating,
            TransitionKind::Collapse => self.animating_collapse = animating,
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("label", &self.label)
            .field("expanded", &self.is_expanded())
            .field("always_visible", &self.is_always_visible())
            .field("content_height", &self.content_height())
            .field("closable", &self.closable)
            .finish_non_exhaustive()
    }
}
