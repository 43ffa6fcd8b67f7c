//! # Headless Demo Run
//!
//! Full engine scenario against the in-memory page, no GPU, no window:
//!
//! Scroll sweep → parallax scrub → section enters view → staggered
//! reveal → anchor click → smooth scroll to #contact → fragment commit.
//!
//! Prints a tick-by-tick digest plus a final summary, so a change in any
//! subsystem's observable behavior shows up in plain text.

use stardrift::motion::{ClickTarget, ElementId, MemoryPage, PageAdapter, Rect, Viewport};
use stardrift::{ConfigError, Engine, EngineConfig, PageEvent};

const CONFIG: &str = r##"
seed = 7

[field]
count = 500

[[sections]]
selector = "#hero"

[[sections.parallax]]
selector = ".parallax-bg"
speed = 0.5

[[sections]]
selector = "#about"

[sections.reveal]
members = ".reveal-item"
trigger_once = true
"##;

const TICK: f32 = 1.0 / 60.0;

/// Builds the demo page: a hero with parallax layers, an about section
/// with three reveal members, and a contact section at the bottom.
fn build_page() -> MemoryPage {
    let mut page = MemoryPage::new(Viewport {
        width: 1280.0,
        height: 800.0,
    });

    page.insert("#hero", Rect::new(0.0, 0.0, 1280.0, 900.0));
    page.insert(".parallax-bg", Rect::new(0.0, 100.0, 1280.0, 700.0));
    page.insert(".parallax-bg", Rect::new(0.0, 400.0, 1280.0, 500.0));

    page.insert_with_fragment("#about", "about", Rect::new(0.0, 1000.0, 1280.0, 700.0));
    for i in 0..3 {
        page.insert(
            ".reveal-item",
            Rect::new(0.0, 1060.0 + i as f32 * 160.0, 1280.0, 120.0),
        );
    }

    page.insert_with_fragment("#contact", "contact", Rect::new(0.0, 1800.0, 1280.0, 800.0));
    page
}

/// Fraction of the section currently inside the viewport.
fn intersection_ratio(page: &MemoryPage, section: ElementId) -> f32 {
    let Some(rect) = page.measure(section) else {
        return 0.0;
    };
    let view_top = page.scroll_offset();
    let view_bottom = view_top + page.viewport().height;
    let overlap = rect.bottom().min(view_bottom) - rect.top().max(view_top);
    (overlap / rect.height).clamp(0.0, 1.0)
}

fn main() -> Result<(), ConfigError> {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                    STARDRIFT HEADLESS RUN                        ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    let config = EngineConfig::from_toml_str(CONFIG)?;
    let mut engine = Engine::new(&config, build_page());
    let sender = engine.sender();

    let Some(about) = engine.page().read().element_by_fragment("about") else {
        eprintln!("demo page is missing #about; nothing to demonstrate");
        return Ok(());
    };
    let layers = engine.page().read().select(".parallax-bg");
    let items = engine.page().read().select(".reveal-item");

    let mut events_sent = 0u64;
    let mut events_processed = 0u64;
    let mut last_ratio = 0.0f32;

    // Phase A (ticks 0-120): scroll sweep, 0 -> 900px over two seconds.
    // Phase B (tick 240): anchor click on #contact, smooth scroll to it.
    for tick in 0..400u32 {
        let timestamp = tick as f32 * TICK;

        if tick <= 120 {
            let scroll = tick as f32 * 7.5;
            engine.page().write().set_scroll(scroll);
            sender.send(PageEvent::Scroll);
            events_sent += 1;
        }

        let ratio = intersection_ratio(&engine.page().read(), about);
        if (ratio - last_ratio).abs() > 1e-3 {
            sender.send(PageEvent::Intersection {
                section: about,
                ratio,
            });
            events_sent += 1;
            last_ratio = ratio;
        }

        if tick == 240 {
            println!("│ tick {tick:>3}: click on #contact");
            sender.send(PageEvent::Click {
                target: ClickTarget::anchor("#contact"),
            });
            events_sent += 1;
        }

        let stats = engine.tick(timestamp);
        events_processed += u64::from(stats.events_processed);

        if tick % 60 == 0 {
            let page = engine.page().read();
            println!(
                "│ tick {:>3}: t={:>5.2}s scroll={:>7.1} about={:>4.0}% layer0={:?}",
                tick,
                timestamp,
                page.scroll_offset(),
                last_ratio * 100.0,
                page.transform_of(layers[0]),
            );
        }
    }

    // =========================================================================
    // SUMMARY
    // =========================================================================
    let page = engine.page().read();
    println!();
    println!("┌─ RESULT ───────────────────────────────────────────────────────┐");
    println!("│ Ticks run:          {}", engine.frame_count());
    println!("│ Events sent:        {events_sent}");
    println!("│ Events processed:   {events_processed}");
    println!("│ Final scroll:       {:.1}", page.scroll_offset());
    println!("│ Visible fragment:   {:?}", page.fragment());
    println!("│ Renderer time:      {:.3}s", engine.renderer().time());
    println!(
        "│ Outer rotation:     {:.4} rad",
        engine.scene_frame().rotations.outer.y
    );
    for (index, &layer) in layers.iter().enumerate() {
        println!(
            "│ Parallax layer {index}:   {:?}",
            page.transform_of(layer)
        );
    }
    for (index, &item) in items.iter().enumerate() {
        println!(
            "│ Reveal item {index}:      opacity {:?}",
            page.opacity_of(item)
        );
    }
    println!("└────────────────────────────────────────────────────────────────┘");

    Ok(())
}
