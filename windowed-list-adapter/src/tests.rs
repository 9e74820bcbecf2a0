use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::collections::HashMap;
use windowed_list::{Align, ListOptions, RenderKey, VisibleRange, WindowedList};

fn keyed_options(estimate: f64, height: f64) -> ListOptions<u64, u64> {
    ListOptions::new(move |_| estimate, |item: &u64, _| Some(*item)).with_container_height(height)
}

fn ids(range: core::ops::Range<u64>) -> Vec<u64> {
    range.collect()
}

#[test]
fn anchor_can_preserve_scroll_across_prepend() {
    let mut c = Controller::new(ids(1000..1100), keyed_options(10.0, 100.0));
    c.list_mut().set_scroll_offset_clamped(505.0);

    let anchor = c.capture_first_visible_anchor().unwrap();
    assert_eq!(anchor.key, 1050);
    assert_eq!(anchor.offset_in_viewport, 5.0);

    // Prepend 10 items: old items shift by +10 indexes.
    let next: Vec<u64> = (2000..2010).chain(1000..1100).collect();
    assert!(c.replace_items(next));
    assert_eq!(c.list().scroll_offset(), 605.0);
    assert_eq!(c.list_mut().visible_range().map(|r| r.start), Some(60));
}

#[test]
fn apply_anchor_uses_caller_key_map() {
    let mut v1 = WindowedList::new(ids(1000..1100), keyed_options(1.0, 10.0));
    v1.set_scroll_offset_clamped(50.0);
    let anchor = capture_first_visible_anchor(&mut v1).unwrap();
    assert_eq!(anchor.key, 1050);
    assert_eq!(anchor.offset_in_viewport, 0.0);

    let next: Vec<u64> = (2000..2010).chain(1000..1100).collect();
    let mut v2 = WindowedList::new(next, keyed_options(1.0, 10.0));
    v2.set_scroll_offset_clamped(50.0);

    let mut map = HashMap::<u64, usize>::new();
    for (i, id) in v2.items().iter().enumerate() {
        map.insert(*id, i);
    }

    assert!(apply_anchor(&mut v2, &anchor, |k| map.get(k).copied()));
    assert_eq!(v2.scroll_offset(), 60.0);
    assert!(!apply_anchor(
        &mut v2,
        &ScrollAnchor {
            key: 42,
            offset_in_viewport: 0.0
        },
        |k| map.get(k).copied()
    ));
}

#[test]
fn replace_items_without_anchor_match_clamps_offset() {
    let mut c = Controller::new(ids(0..100), keyed_options(10.0, 100.0));
    c.list_mut().set_scroll_offset_clamped(500.0);

    assert!(!c.replace_items(ids(500..510)));
    assert_eq!(c.list().scroll_offset(), 0.0);
}

#[test]
fn capture_anchor_at_offset_in_viewport_picks_covering_item() {
    let mut c = Controller::new(ids(0..100), keyed_options(10.0, 100.0));
    c.list_mut().set_scroll_offset_clamped(200.0);

    let anchor = c.capture_anchor_at_offset_in_viewport(35.0).unwrap();
    assert_eq!(anchor.key, 23);
    assert_eq!(anchor.offset_in_viewport, -30.0);

    assert!(c.apply_anchor(&anchor, |k| Some(*k as usize)));
    assert_eq!(c.list().scroll_offset(), 200.0);
}

#[test]
fn subscription_receives_events_until_dropped() {
    let events = ViewportEvents::new();
    let sub = events.subscribe();
    assert!(sub.is_active());
    assert_eq!(events.subscriber_count(), 1);

    events.scroll_to(10.0);
    events.resize(300.0);
    assert_eq!(
        sub.drain(),
        alloc::vec![ViewportEvent::Scroll(10.0), ViewportEvent::Resize(300.0)]
    );
    assert!(sub.drain().is_empty());

    let other = events.subscribe();
    events.scroll_to(20.0);
    drop(sub);
    assert_eq!(events.subscriber_count(), 1);
    assert_eq!(other.drain(), alloc::vec![ViewportEvent::Scroll(20.0)]);
}

#[test]
fn subscription_outliving_hub_is_inert() {
    let events = ViewportEvents::new();
    let sub = events.subscribe();
    events.scroll_to(1.0);
    drop(events);
    assert!(!sub.is_active());
    assert!(sub.drain().is_empty());
}

#[test]
fn controller_renders_only_when_range_changes() {
    let scrolls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&scrolls);
    let options = ListOptions::keyed_by_index(|_| 50.0)
        .with_container_height(500.0)
        .with_overscan(2)
        .with_on_scroll(Some(move |_offset: f64| {
            counter.fetch_add(1, Ordering::Relaxed);
        }));
    let items: Vec<u32> = (0..1000).collect();
    let mut c = Controller::new(items, options);

    let events = ViewportEvents::new();
    c.attach(&events);
    assert!(c.is_attached());

    let first = c.tick(|item, _| *item).unwrap();
    assert_eq!(first.range, Some(VisibleRange::new(0, 11)));
    assert!(c.tick(|item, _| *item).is_none());

    events.scroll_to(2500.0);
    let frame = c.tick(|item, _| *item).unwrap();
    assert_eq!(frame.range, Some(VisibleRange::new(48, 61)));
    assert_eq!(frame.items.len(), 14);
    assert_eq!(frame.items[0].key, RenderKey::Item(48));
    assert_eq!(frame.items[0].offset, 2400.0);

    events.scroll_to(2500.0);
    assert!(c.tick(|item, _| *item).is_none());
    assert_eq!(scrolls.load(Ordering::Relaxed), 2);

    events.resize(0.0);
    let frame = c.tick(|item, _| *item).unwrap();
    assert!(frame.is_empty());
    assert_eq!(frame.total_content_height, 0.0);
}

#[test]
fn controller_picks_up_deferred_measurements_once() {
    let items: Vec<u32> = (0..100).collect();
    let mut c = Controller::new(
        items,
        ListOptions::keyed_by_index(|_| 20.0).with_container_height(100.0),
    );
    let frame = c.tick(|item, _| *item).unwrap();

    for it in &frame.items {
        c.list_mut().measure_key(&it.key, 40.0);
    }
    let frame = c.tick(|item, _| *item).unwrap();
    assert_eq!(frame.items[1].offset, 40.0);
    assert!(c.tick(|item, _| *item).is_none());
}

#[test]
fn detach_stops_event_delivery() {
    let items: Vec<u32> = (0..100).collect();
    let mut c = Controller::new(
        items,
        ListOptions::keyed_by_index(|_| 10.0).with_container_height(50.0),
    );
    let events = ViewportEvents::new();
    c.attach(&events);
    c.tick(|_, i| i);

    c.detach();
    assert!(!c.is_attached());
    assert_eq!(events.subscriber_count(), 0);

    events.scroll_to(500.0);
    assert!(c.tick(|_, i| i).is_none());
    assert_eq!(c.list().scroll_offset(), 0.0);
}

#[test]
fn scroll_to_index_goes_through_scroll_events() {
    let items: Vec<u32> = (0..100).collect();
    let mut c = Controller::new(
        items,
        ListOptions::keyed_by_index(|_| 10.0).with_container_height(50.0),
    );
    c.tick(|_, i| i);

    assert_eq!(c.scroll_to_index(40, Align::Start), 400.0);
    let frame = c.tick(|_, i| i).unwrap();
    assert_eq!(frame.range.map(|r| r.start), Some(38));
}

#[test]
fn undrained_queue_is_compacted_to_latest_state() {
    let events = ViewportEvents::with_queue_capacity(4);
    assert_eq!(events.queue_capacity(), 4);
    assert_eq!(ViewportEvents::with_queue_capacity(0).queue_capacity(), 2);
    assert_eq!(ViewportEvents::new().queue_capacity(), DEFAULT_QUEUE_CAPACITY);

    let sub = events.subscribe();
    events.scroll_to(1.0);
    events.resize(100.0);
    events.scroll_to(2.0);
    events.scroll_to(3.0);
    events.scroll_to(4.0);
    assert_eq!(
        sub.drain(),
        alloc::vec![
            ViewportEvent::Resize(100.0),
            ViewportEvent::Scroll(3.0),
            ViewportEvent::Scroll(4.0)
        ]
    );
}

#[test]
fn controller_catches_up_after_long_idle_attachment() {
    let items: Vec<u32> = (0..1000).collect();
    let mut c = Controller::new(
        items,
        ListOptions::keyed_by_index(|_| 50.0).with_container_height(500.0),
    );
    let events = ViewportEvents::with_queue_capacity(8);
    c.attach(&events);
    c.tick(|item, _| *item);

    for i in 0..100 {
        events.scroll_to(f64::from(i) * 10.0);
    }
    events.resize(400.0);

    let frame = c.tick(|item, _| *item).unwrap();
    assert_eq!(c.list().scroll_offset(), 990.0);
    assert_eq!(c.list().container_height(), 400.0);
    assert_eq!(frame.range.map(|r| r.start), Some(17));
}
