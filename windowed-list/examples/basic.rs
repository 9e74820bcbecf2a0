use windowed_list::{Align, ListOptions, WindowedList};

fn main() {
    let rows: Vec<u32> = (0..100_000).collect();
    let mut list = WindowedList::new(
        rows,
        ListOptions::keyed_by_index(|_| 24.0).with_container_height(480.0),
    );
    list.apply_scroll_event(123_456.0);

    let frame = list.frame(|row, _| format!("row {row}"));
    println!("total_content_height={}", frame.total_content_height);
    println!("range={:?}", frame.range);
    println!("first={:?}", frame.items.first());

    list.scroll_to_index(99_999, Align::End);
    println!("after scroll_to_index: offset={}", list.scroll_offset());
}
