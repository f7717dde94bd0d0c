//! Height resolution for the three content-height policies.
//!
//! Auto and fixed items know their own open height. Stretch items share what
//! is left of the container once every header, every closed body, and every
//! auto/fixed open body has been accounted for, so the whole container must be
//! scanned before any stretch item's height is known.

use horizon_accordion_core::logging::targets;
use slotmap::SlotMap;

use crate::item::{ContentHeight, Item, ItemId};
use crate::surface::ContainerSurface;

/// Computes target body heights from the current item flags.
///
/// A resolver borrows the accordion's state for the duration of one
/// computation; it never mutates anything.
pub struct HeightResolver<'a> {
    container: &'a dyn ContainerSurface,
    items: &'a SlotMap<ItemId, Item>,
    order: &'a [ItemId],
    collapsed_height: f32,
}

impl<'a> HeightResolver<'a> {
    /// Create a resolver over the given container state.
    pub fn new(
        container: &'a dyn ContainerSurface,
        items: &'a SlotMap<ItemId, Item>,
        order: &'a [ItemId],
        collapsed_height: f32,
    ) -> Self {
        Self {
            container,
            items,
            order,
            collapsed_height,
        }
    }

    /// The body height each expanded stretch item should have.
    ///
    /// Never negative: when auto/fixed content already overflows the
    /// container, stretch items get 0 and the content overflows visually.
    pub fn height_per_stretch_item(&self) -> f32 {
        let mut remaining = self.container.client_height();
        let mut stretch_count = 0usize;

        for item in self.order.iter().filter_map(|id| self.items.get(*id)) {
            remaining -= item.header_height();

            if !item.is_expanded() {
                remaining -= self.collapsed_height;
                continue;
            }

            match item.content_height() {
                ContentHeight::Stretch => stretch_count += 1,
                policy => remaining -= own_content_height(item, policy),
            }
        }

        let per_item = if stretch_count > 0 {
            remaining / stretch_count as f32
        } else {
            remaining
        };

        tracing::trace!(
            target: targets::HEIGHT,
            stretch_count,
            remaining,
            per_item,
            "computed stretch height"
        );
        per_item.max(0.0)
    }

    /// The open body height of `id` under its current policy.
    ///
    /// Returns 0 for an unknown item.
    pub fn item_content_height(&self, id: ItemId) -> f32 {
        match self.items.get(id) {
            Some(item) => match item.content_height() {
                ContentHeight::Stretch => self.height_per_stretch_item(),
                policy => own_content_height(item, policy),
            },
            None => 0.0,
        }
    }
}

fn own_content_height(item: &Item, policy: ContentHeight) -> f32 {
    match policy {
        ContentHeight::Auto => item.first_child_height(),
        ContentHeight::Fixed { height } => height as f32,
        ContentHeight::Stretch => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{HeadlessContainer, HeadlessItemSurface};

    struct Fixture {
        container: HeadlessContainer,
        items: SlotMap<ItemId, Item>,
        order: Vec<ItemId>,
    }

    impl Fixture {
        fn new(client_height: f32) -> Self {
            Self {
                container: HeadlessContainer::new(client_height),
                items: SlotMap::with_key(),
                order: Vec::new(),
            }
        }

        fn push(&mut self, item: Item) -> ItemId {
            let id = self.items.insert(item);
            self.order.push(id);
            id
        }

        fn resolver(&self, collapsed_height: f32) -> HeightResolver<'_> {
            HeightResolver::new(&self.container, &self.items, &self.order, collapsed_height)
        }
    }

    fn panel(header: f32, content: Option<f32>) -> Item {
        Item::new("panel", HeadlessItemSurface::new(header, content))
    }

    #[test]
    fn test_stretch_and_fixed_share_container() {
        let mut fx = Fixture::new(300.0);
        let stretch = fx.push(
            panel(20.0, None)
                .with_expanded(true)
                .with_content_height(ContentHeight::Stretch),
        );
        fx.push(
            panel(20.0, None)
                .with_expanded(true)
                .with_content_height(ContentHeight::Fixed { height: 50 }),
        );

        let resolver = fx.resolver(0.0);
        assert_eq!(resolver.height_per_stretch_item(), 210.0);
        assert_eq!(resolver.item_content_height(stretch), 210.0);
    }

    #[test]
    fn test_no_stretch_items_returns_remaining() {
        let mut fx = Fixture::new(200.0);
        fx.push(panel(20.0, Some(70.0)).with_expanded(true));
        fx.push(panel(20.0, Some(500.0)));

        assert_eq!(fx.resolver(0.0).height_per_stretch_item(), 90.0);
    }

    #[test]
    fn test_overflow_clamps_to_zero() {
        let mut fx = Fixture::new(100.0);
        fx.push(panel(20.0, Some(400.0)).with_expanded(true));
        fx.push(
            panel(20.0, None)
                .with_expanded(true)
                .with_content_height(ContentHeight::Stretch),
        );

        assert_eq!(fx.resolver(0.0).height_per_stretch_item(), 0.0);
    }

    #[test]
    fn test_stretch_items_split_evenly() {
        let mut fx = Fixture::new(260.0);
        for _ in 0..2 {
            fx.push(
                panel(30.0, None)
                    .with_expanded(true)
                    .with_content_height(ContentHeight::Stretch),
            );
        }
        assert_eq!(fx.resolver(0.0).height_per_stretch_item(), 100.0);
    }

    #[test]
    fn test_collapsed_items_use_quirks_height() {
        let mut fx = Fixture::new(100.0);
        fx.push(panel(10.0, Some(40.0)));
        fx.push(panel(10.0, Some(40.0)));

        assert_eq!(fx.resolver(0.0).height_per_stretch_item(), 80.0);
        assert_eq!(fx.resolver(1.0).height_per_stretch_item(), 78.0);
    }

    #[test]
    fn test_collapsed_stretch_item_is_not_counted() {
        let mut fx = Fixture::new(120.0);
        fx.push(panel(20.0, None).with_content_height(ContentHeight::Stretch));
        fx.push(
            panel(20.0, None)
                .with_expanded(true)
                .with_content_height(ContentHeight::Stretch),
        );

        assert_eq!(fx.resolver(0.0).height_per_stretch_item(), 80.0);
    }

    #[test]
    fn test_auto_uses_first_child() {
        let mut fx = Fixture::new(300.0);
        let full = fx.push(panel(20.0, Some(64.0)));
        let empty = fx.push(panel(20.0, None));

        let resolver = fx.resolver(0.0);
        assert_eq!(resolver.item_content_height(full), 64.0);
        assert_eq!(resolver.item_content_height(empty), 0.0);
    }
}
