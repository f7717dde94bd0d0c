//! Horizon Accordion - a collapsible container of header/body panels.
//!
//! Items can be opened, closed, pinned open ("always visible"), reordered,
//! and animated between heights. The host renders the panels; the accordion
//! decides which items open and close and what height each body should have.
//!
//! - [`Accordion`] owns the items and reconciles every change
//! - [`Item`] is one panel with its flags and [`ContentHeight`] policy
//! - [`ItemSurface`] and [`ContainerSurface`] are how the accordion measures
//!   and resizes the host's nodes; [`HeadlessItemSurface`] and
//!   [`HeadlessContainer`] implement them in memory
//! - [`Notifications`] carries one signal per [`Notification`] kind; the
//!   `before_*` signals can veto
//! - [`AccordionConfig`] holds container-wide settings and loads from TOML or
//!   JSON
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use horizon_accordion::prelude::*;
//!
//! let container = HeadlessContainer::new(300.0);
//! let mut accordion = Accordion::new(AccordionConfig::default(), container);
//!
//! let body = HeadlessItemSurface::new(20.0, Some(120.0));
//! let id = accordion
//!     .add_item(Item::new("General", body.clone()), None)
//!     .unwrap();
//!
//! accordion.choose(id, UserTarget::Header);
//! assert!(accordion.has_running_animations());
//!
//! // Drive animations from the host's frame loop.
//! accordion.tick_at(Instant::now() + Duration::from_secs(2));
//! assert_eq!(body.current_body_height(), 120.0);
//! ```

mod accordion;
pub mod animation;
mod config;
mod error;
mod height;
mod item;
mod notify;
pub mod prelude;
mod reorder;
mod surface;
mod transition;

pub use accordion::{Accordion, Intent, ItemRef, ResizeSource, UserTarget};
pub use config::{
    AccordionConfig, AnimationSettings, COLLAPSED_HEIGHT, DEFAULT_ANIMATION_MS, ItemSpec,
    QUIRKS_COLLAPSED_HEIGHT,
};
pub use error::{Error, Result};
pub use height::HeightResolver;
pub use item::{AnimationOverride, ContentHeight, Item, ItemId, UiMarks};
pub use notify::{Notification, Notifications};
pub use reorder::{ReorderCoordinator, move_item};
pub use surface::{
    ContainerSurface, HeadlessContainer, HeadlessItemState, HeadlessItemSurface, ItemSurface,
};
pub use transition::{TransitionContext, TransitionExecutor};

pub use horizon_accordion_core::{CancellableSignal, ConnectionId, Signal};
