//! Example: Lazy-loading images as a page scrolls

use std::time::{Duration, Instant};

use lazyelem::{Dom, Lazyelem, LoadKind, Target, WindowEvent};
use lazyelem_dom::Page;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // A page with ten images spaced 400px apart
    let mut page = Page::new();
    page.set_viewport_height(600.0);
    for i in 0..10 {
        let img = page.create_element("img");
        page.append_child(Page::ROOT, img);
        page.set_attribute(img, "lazy-src", &format!("photo-{i}.jpg"));
        page.place(img, 400.0 * i as f64, 300.0, 200.0);
    }

    let mut loader = Lazyelem::default();
    loader.listen(&mut page, Target::Default, LoadKind::Image);
    println!("loaded on registration: {}", 10 - loader.pending());

    // Scroll the window and pump events the way a host loop would
    let mut now = Instant::now();
    while loader.pending() > 0 {
        page.scroll_to(page.scroll_top() + 400.0);
        now += Duration::from_millis(5);
        loader.notify(WindowEvent::Scroll, now);
        now += Duration::from_millis(20);
        loader.poll(&mut page, now);
        println!(
            "scrolled to {:>4}px, {} image(s) still pending",
            page.scroll_top(),
            loader.pending()
        );
    }

    let stats = loader.stats();
    println!(
        "done: {} passes, {} loads, listening = {}",
        stats.passes,
        stats.dispatched,
        loader.is_listening()
    );
}
