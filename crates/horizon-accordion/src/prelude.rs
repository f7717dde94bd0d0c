//! Prelude module for Horizon Accordion.
//!
//! ```
//! use horizon_accordion::prelude::*;
//! ```

pub use crate::{
    Accordion, AccordionConfig, AnimationSettings, ContentHeight, HeadlessContainer,
    HeadlessItemSurface, Intent, Item, ItemId, ItemRef, ItemSpec, Notification, ResizeSource,
    UserTarget,
};
pub use crate::animation::Easing;
pub use crate::{ContainerSurface, ItemSurface};
