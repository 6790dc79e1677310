use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use accordion::prelude::*;
use serde_json::json;
use tokio::task::LocalSet;
use tokio::time::sleep;

fn empty_factory(
    _descriptor: &ContentDescriptor,
    _context_id: &str,
) -> Result<Box<dyn ContentInstance>, ContentError> {
    Ok(Box::new(EmptyContent))
}

fn accordion(panels: usize, open: OpenMode) -> Accordion {
    let mut config = AccordionConfig::new().open_mode(open);
    for i in 0..panels {
        config = config.panel(
            format!("Panel {}", i),
            ContentDescriptor::new("H5P.AdvancedText 1.1", json!({ "text": "..." })),
        );
    }
    Accordion::builder(config)
        .content_id("animated")
        .build(&empty_factory)
}

fn count_resizes(accordion: &Accordion) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    accordion.events().on(EventKind::Resize, move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[tokio::test(start_paused = true)]
async fn test_resize_signals_during_slide() {
    LocalSet::new()
        .run_until(async {
            let mut accordion = accordion(3, OpenMode::OpenOne);
            let resizes = count_resizes(&accordion);

            accordion.toggle(0).unwrap();
            assert!(accordion.is_resizing());
            assert!(accordion.is_animating(0));

            // Ticks at 40, 80 and 120 ms
            sleep(Duration::from_millis(130)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), 3);

            // Slide ends at 200 ms: loop stops, one final resize
            sleep(Duration::from_millis(170)).await;
            let settled = resizes.load(Ordering::SeqCst);
            assert!((5..=6).contains(&settled), "got {} resizes", settled);
            assert!(!accordion.is_resizing());
            assert!(!accordion.is_animating(0));

            sleep(Duration::from_secs(1)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), settled);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_single_open_runs_both_slides() {
    LocalSet::new()
        .run_until(async {
            let mut accordion = accordion(3, OpenMode::OpenOne);
            accordion.toggle(0).unwrap();
            sleep(Duration::from_millis(300)).await;

            accordion.toggle(1).unwrap();
            assert!(accordion.is_animating(0));
            assert!(accordion.is_animating(1));
            assert_eq!(accordion.expanded(), vec![1]);

            let sections = accordion.sections();
            assert!(!sections[0].expanded);
            assert_eq!(sections[0].visible, 1.0);
            assert!(sections[1].expanded);
            assert_eq!(sections[1].visible, 0.0);

            sleep(Duration::from_millis(300)).await;
            assert!(!accordion.is_animating(0));
            assert!(!accordion.is_animating(1));
            assert!(!accordion.is_resizing());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_visible_fraction_mid_slide() {
    LocalSet::new()
        .run_until(async {
            let mut accordion = accordion(1, OpenMode::OpenOne);
            accordion.toggle(0).unwrap();

            sleep(Duration::from_millis(100)).await;
            let visible = accordion.sections()[0].visible;
            assert!(visible > 0.3 && visible < 0.7, "visible {}", visible);

            sleep(Duration::from_millis(200)).await;
            assert_eq!(accordion.sections()[0].visible, 1.0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_linear_easing_from_timing() {
    LocalSet::new()
        .run_until(async {
            let config = AccordionConfig::new().panel(
                "Only",
                ContentDescriptor::new("H5P.AdvancedText 1.1", json!({ "text": "..." })),
            );
            let mut accordion = Accordion::builder(config)
                .timing(Timing::new().easing(Easing::Linear))
                .build(&empty_factory);

            accordion.toggle(0).unwrap();
            sleep(Duration::from_millis(50)).await;
            let visible = accordion.sections()[0].visible;
            assert!((visible - 0.25).abs() < 1e-3, "visible {}", visible);

            accordion.toggle(0).unwrap();
            sleep(Duration::from_millis(50)).await;
            let visible = accordion.sections()[0].visible;
            assert!((visible - 0.75).abs() < 1e-3, "visible {}", visible);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_retoggle_jumps_running_slide_to_end() {
    LocalSet::new()
        .run_until(async {
            let mut accordion = accordion(2, OpenMode::OpenOne);
            let resizes = count_resizes(&accordion);

            accordion.toggle(0).unwrap();
            sleep(Duration::from_millis(100)).await;
            let first_loop = accordion.notifier().active_id();
            assert_eq!(resizes.load(Ordering::SeqCst), 2);

            // Collapse mid-slide: the expand slide completes immediately
            accordion.toggle(0).unwrap();
            assert_eq!(resizes.load(Ordering::SeqCst), 3);
            assert!(accordion.is_animating(0));
            assert!(accordion.is_resizing());
            assert_ne!(accordion.notifier().active_id(), first_loop);

            sleep(Duration::from_millis(300)).await;
            assert!(!accordion.is_resizing());
            assert!(accordion.expanded().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_open_many_keeps_one_loop() {
    LocalSet::new()
        .run_until(async {
            let mut accordion = accordion(3, OpenMode::OpenMany);
            accordion.toggle(0).unwrap();
            let first = accordion.notifier().active_id();
            accordion.toggle(2).unwrap();
            let second = accordion.notifier().active_id();

            assert!(first.is_some());
            assert!(second.is_some());
            assert_ne!(first, second);
            assert_eq!(accordion.expanded(), vec![0, 2]);

            sleep(Duration::from_millis(300)).await;
            assert!(!accordion.is_resizing());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_first_completed_slide_ends_shared_loop() {
    LocalSet::new()
        .run_until(async {
            let mut accordion = accordion(3, OpenMode::OpenMany);
            let resizes = count_resizes(&accordion);

            accordion.toggle(0).unwrap();
            // Ticks at 40 and 80 ms
            sleep(Duration::from_millis(100)).await;
            accordion.toggle(2).unwrap();
            // Ticks at 140 and 180 ms
            sleep(Duration::from_millis(90)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), 4);

            // Panel 0 finishes at 200 ms and stops the loop panel 2 still uses
            sleep(Duration::from_millis(20)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), 5);
            assert!(!accordion.is_resizing());
            assert!(accordion.is_animating(2));

            sleep(Duration::from_millis(70)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), 5);

            // Panel 2 finishes at 300 ms: one final resize
            sleep(Duration::from_millis(30)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), 6);
            assert!(!accordion.is_animating(2));
            assert!(!accordion.is_resizing());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_resize_loop() {
    LocalSet::new()
        .run_until(async {
            let mut accordion = accordion(2, OpenMode::OpenOne);
            let resizes = count_resizes(&accordion);

            accordion.toggle(0).unwrap();
            sleep(Duration::from_millis(50)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), 1);

            drop(accordion);
            sleep(Duration::from_secs(1)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), 1);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_custom_timing() {
    LocalSet::new()
        .run_until(async {
            let config = AccordionConfig::new().panel(
                "Only",
                ContentDescriptor::new("H5P.AdvancedText 1.1", json!({ "text": "..." })),
            );
            let mut accordion = Accordion::builder(config)
                .timing(
                    Timing::new()
                        .slide_duration(Duration::from_millis(400))
                        .resize_interval(Duration::from_millis(100)),
                )
                .build(&empty_factory);
            let resizes = count_resizes(&accordion);

            accordion.toggle(0).unwrap();
            sleep(Duration::from_millis(350)).await;
            assert_eq!(resizes.load(Ordering::SeqCst), 3);
            assert!(accordion.is_animating(0));

            sleep(Duration::from_millis(200)).await;
            assert!(!accordion.is_animating(0));
            assert!(!accordion.is_resizing());
        })
        .await;
}
