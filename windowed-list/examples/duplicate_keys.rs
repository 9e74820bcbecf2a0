// Example: a key collision upstream never drops or merges rows.
use windowed_list::{ListOptions, WindowedList};

fn main() {
    let candidates = vec![("c-1", "Ada"), ("c-2", "Grace"), ("c-2", "Linus"), ("", "Ken")];
    let mut list = WindowedList::new(
        candidates,
        ListOptions::new(
            |_| 60.0,
            |c: &(&'static str, &'static str), _| (!c.0.is_empty()).then(|| c.0.to_owned()),
        )
        .with_container_height(600.0),
    );

    let frame = list.frame(|c, _| c.1);
    for item in &frame.items {
        println!("{:?} @ {} -> {}", item.key, item.offset, item.node);
    }
    println!("key_fallbacks={}", frame.key_fallbacks);
}
