use windowed_list::ListOptions;
use windowed_list_adapter::{Controller, ViewportEvents};

fn main() {
    // Example: drive a list from viewport events; only changed frames are rendered.
    let jobs: Vec<String> = (0..10_000).map(|i| format!("job #{i}")).collect();
    let mut c = Controller::new(
        jobs,
        ListOptions::keyed_by_index(|_| 48.0)
            .with_container_height(480.0)
            .with_on_scroll(Some(|offset: f64| println!("on_scroll({offset})"))),
    );

    let viewport = ViewportEvents::new();
    c.attach(&viewport);

    for offset in [0.0, 10.0, 20.0, 480.0, 480.0, 4800.0] {
        viewport.scroll_to(offset);
        match c.tick(|job, _| job.clone()) {
            Some(frame) => println!(
                "frame: range={:?} first={:?}",
                frame.range,
                frame.items.first().map(|it| &it.node)
            ),
            None => println!("frame: unchanged"),
        }
    }

    c.detach();
    println!("subscribers after detach: {}", viewport.subscriber_count());
}
