use windowed_list::ListOptions;
use windowed_list_adapter::Controller;

fn main() {
    // Example: preserve visual scroll position when older messages are prepended.
    //
    // `replace_items` captures an anchor (key + offset in viewport) for the first visible
    // message, swaps the collection, then scrolls so the same message stays in the same place.
    let messages: Vec<u64> = (1000..1100).collect();
    let mut c = Controller::new(
        messages,
        ListOptions::new(|_| 32.0, |id: &u64, _| Some(*id)).with_container_height(320.0),
    );
    c.list_mut().set_scroll_offset_clamped(1616.0);

    let anchor = c.capture_first_visible_anchor();
    println!(
        "before prepend: off={} anchor={anchor:?}",
        c.list().scroll_offset()
    );

    let older_first: Vec<u64> = (900..1000).chain(1000..1100).collect();
    let ok = c.replace_items(older_first);

    println!("after prepend: ok={ok} off={}", c.list().scroll_offset());
}
