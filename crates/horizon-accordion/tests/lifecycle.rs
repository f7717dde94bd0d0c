//! Integration tests for registering, looking up and removing items.

mod common;

use common::Harness;
use horizon_accordion::{
    Accordion, AccordionConfig, ContentHeight, HeadlessContainer, HeadlessItemSurface, Item,
    Notification, UiMarks, UserTarget,
};

#[test]
fn test_add_emits_and_attaches() {
    let mut h = Harness::sync(300.0);
    let a = h.add("A", Some(40.0), |item| item);

    assert_eq!(
        h.events(),
        vec![(Notification::BeforeItemAdd, a), (Notification::ItemAdded, a)]
    );
    assert_eq!(h.accordion.item_count(), 1);
    assert_eq!(h.container.node_order(), vec![a]);
    assert_eq!(h.surface(a).state().marks, UiMarks::new(false, false));
}

#[test]
fn test_vetoed_add_registers_nothing() {
    let mut h = Harness::sync(300.0);
    h.accordion.notifications().before_item_add.connect(|_| false);

    let item = Item::new("A", HeadlessItemSurface::new(20.0, None));
    assert!(h.accordion.add_item(item, None).is_none());
    assert!(h.accordion.is_empty());
    assert!(h.container.node_order().is_empty());

    let kinds: Vec<_> = h.events().into_iter().map(|(kind, _)| kind).collect();
    assert_eq!(kinds, vec![Notification::BeforeItemAdd]);
}

#[test]
fn test_add_before_parent() {
    let mut h = Harness::sync(300.0);
    let a = h.add("A", None, |item| item);
    let b = h.add("B", None, |item| item);
    let c = h.add_before("C", None, Some(b), |item| item);

    assert_eq!(h.accordion.item_ids(), &[a, c, b]);
    assert_eq!(h.container.node_order(), vec![a, c, b]);
    assert_eq!(h.accordion.item_index(c), 1);

    let gone = h.add("Gone", None, |item| item);
    h.accordion.remove_item(gone);
    let d = h.add_before("D", None, Some(gone), |item| item);
    assert_eq!(h.accordion.item_index(d), 3);
}

#[test]
fn test_lookup_by_index_and_id() {
    let mut h = Harness::sync(300.0);
    let a = h.add("A", None, |item| item);
    let b = h.add("B", None, |item| item);

    assert_eq!(h.accordion.item(1usize).map(|item| item.label()), Some("B"));
    assert_eq!(h.accordion.item(a).map(|item| item.label()), Some("A"));
    assert!(h.accordion.item(7usize).is_none());
    assert_eq!(h.accordion.item_id(0), Some(a));
    assert_eq!(h.accordion.item_index(b), 1);

    if let Some(item) = h.accordion.item_mut(b) {
        item.set_label("Renamed");
    }
    assert_eq!(h.accordion.item(b).map(|item| item.label()), Some("Renamed"));

    let labels: Vec<_> = h.accordion.items().map(|(_, item)| item.label().to_owned()).collect();
    assert_eq!(labels, vec!["A", "Renamed"]);
}

#[test]
fn test_close_icon_removes_item() {
    let mut h = Harness::sync(300.0);
    let a = h.add("A", Some(40.0), |item| item);
    let b = h.add("B", Some(40.0), |item| item);
    let c = h.add("C", Some(40.0), |item| item.with_closable(true));
    h.events();

    assert!(h.accordion.choose(c, UserTarget::CloseIcon));
    assert_eq!(
        h.events(),
        vec![(Notification::BeforeItemRemove, c), (Notification::ItemRemoved, c)]
    );
    assert_eq!(h.accordion.item_count(), 2);
    assert_eq!(h.accordion.item_index(c), -1);
    assert_eq!(h.container.node_order(), vec![a, b]);
}

#[test]
fn test_close_icon_needs_closable_item() {
    let mut h = Harness::sync(300.0);
    let a = h.add("A", Some(40.0), |item| item);

    assert!(!h.accordion.choose(a, UserTarget::CloseIcon));
    assert_eq!(h.accordion.item_count(), 1);
}

#[test]
fn test_vetoed_remove_keeps_item() {
    let mut h = Harness::sync(300.0);
    let a = h.add("A", Some(40.0), |item| item.with_closable(true));
    h.accordion.notifications().before_item_remove.connect(|_| false);

    assert!(h.accordion.remove_item(a).is_none());
    assert!(!h.accordion.choose(a, UserTarget::CloseIcon));
    assert_eq!(h.accordion.item_count(), 1);
}

#[test]
fn test_remove_by_index_returns_item() {
    let mut h = Harness::sync(300.0);
    h.add("A", None, |item| item);
    let b = h.add("B", None, |item| item);

    let removed = h.accordion.remove_item(0usize).expect("item 0 exists");
    assert_eq!(removed.label(), "A");
    assert_eq!(h.accordion.item_ids(), &[b]);
    assert!(h.accordion.remove_item(5usize).is_none());
}

#[test]
fn test_remove_frees_space_for_stretch_items() {
    let config = AccordionConfig::new()
        .with_animation_enabled(false)
        .with_collapse_others_on_expand(false);
    let mut h = Harness::new(config, 300.0);
    let stretch = h.add("Stretch", None, |item| {
        item.with_content_height(ContentHeight::Stretch)
            .with_expanded(true)
    });
    let other = h.add("Other", Some(50.0), |item| item.with_expanded(true));
    assert_eq!(h.body(stretch), 210.0);

    h.accordion.remove_item(other);
    assert_eq!(h.body(stretch), 280.0);
}

#[test]
fn test_destroy_removes_in_reverse_order() {
    let mut h = Harness::sync(300.0);
    let a = h.add("A", None, |item| item);
    let b = h.add("B", None, |item| item);
    let c = h.add("C", None, |item| item);
    h.events();

    h.accordion.destroy();
    assert_eq!(
        h.events(),
        vec![
            (Notification::ItemRemoved, c),
            (Notification::ItemRemoved, b),
            (Notification::ItemRemoved, a),
        ]
    );
    assert!(h.accordion.is_empty());
    assert!(h.container.node_order().is_empty());
}

#[test]
fn test_from_config_builds_declared_items() {
    let config = AccordionConfig::from_toml_str(
        r#"
        use_animation = false

        [[items]]
        label = "Summary"
        expanded = true

        [[items]]
        label = "Details"
        expanded = true
        closable = true
        content_height = { method = "fixed", height = 120 }

        [[items]]
        label = "Log"
        content_height = { method = "stretch" }
        "#,
    )
    .expect("valid configuration");

    let container = HeadlessContainer::new(400.0);
    let accordion = Accordion::from_config(config, container, |_| {
        HeadlessItemSurface::new(20.0, Some(60.0))
    })
    .expect("valid items");

    let state: Vec<_> = accordion
        .items()
        .map(|(_, item)| (item.label().to_owned(), item.is_expanded()))
        .collect();
    assert_eq!(
        state,
        vec![
            ("Summary".to_owned(), false),
            ("Details".to_owned(), true),
            ("Log".to_owned(), false),
        ]
    );
    assert!(accordion.item(1usize).is_some_and(|item| item.is_closable()));
}

#[test]
fn test_from_config_rejects_invalid_items() {
    let config = AccordionConfig::new().with_item(horizon_accordion::ItemSpec::new(""));
    let result = Accordion::from_config(config, HeadlessContainer::new(100.0), |_| {
        HeadlessItemSurface::new(20.0, None)
    });
    assert!(result.is_err());
}
