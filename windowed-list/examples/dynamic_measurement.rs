// Example: estimates corrected by measurement, picked up on the next frame.
use windowed_list::{ListOptions, WindowedList};

fn main() {
    let messages: Vec<String> = (0..500)
        .map(|i| "lorem ipsum ".repeat(1 + i % 7))
        .collect();
    let mut list = WindowedList::new(
        messages,
        ListOptions::keyed_by_index(|_| 40.0)
            .with_container_height(400.0)
            .with_measure_epsilon(0.5),
    );

    let frame = list.frame(|text, _| text.len());
    println!(
        "before: total={} range={:?}",
        frame.total_content_height, frame.range
    );

    // Pretend the host laid the items out: long messages wrap onto more lines.
    for item in &frame.items {
        let lines = 1 + item.node / 40;
        list.measure_key(&item.key, 18.0 * lines as f64);
    }
    println!("pending recompute: {}", list.has_pending_recompute());

    let frame = list.frame(|text, _| text.len());
    println!(
        "after: total={} range={:?}",
        frame.total_content_height, frame.range
    );
    println!("needs another frame: {}", list.needs_frame());
}
