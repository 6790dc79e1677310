//! Event loop of the terminal host.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use accordion::prelude::*;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::content::TextContentFactory;
use crate::error::TuiError;
use crate::render;
use crate::terminal::TerminalGuard;

const CONTENT_ID: &str = "accordion-tui";

/// Run the accordion until the user quits.
///
/// Must run inside a `LocalSet`: the accordion's animations are local tasks.
pub async fn run(config: AccordionConfig) -> Result<(), TuiError> {
    let mut accordion = Accordion::builder(config)
        .content_id(CONTENT_ID)
        .build(&TextContentFactory);

    // Resize signals wake the loop to redraw
    let (resize_tx, mut resize_rx) = mpsc::unbounded_channel::<()>();
    let resizes = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&resizes);
    accordion.events().on(EventKind::Resize, move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
        let _ = resize_tx.send(());
    });
    accordion.events().on(EventKind::Xapi, |event| {
        if let AccordionEvent::Xapi(statement) = event {
            match serde_json::to_string(statement) {
                Ok(json) => info!("xAPI: {}", json),
                Err(e) => warn!("Failed to serialize xAPI statement: {}", e),
            }
        }
    });
    accordion.events().subscribe(|event| match event {
        AccordionEvent::Expanded { panel } => debug!("Panel {} expanded", panel),
        AccordionEvent::Collapsed { panel } => debug!("Panel {} collapsed", panel),
        _ => {}
    });

    let mut container = Container::new();
    accordion.attach(&mut container);

    let mut guard = TerminalGuard::new()?;
    let mut events = EventStream::new();
    draw(&mut guard, &accordion, resizes.load(Ordering::Relaxed))?;

    loop {
        let redraw = tokio::select! {
            Some(()) = resize_rx.recv() => {
                // Collapse bursts into one redraw
                while resize_rx.try_recv().is_ok() {}
                true
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if is_quit(&key) {
                        info!("Quit requested");
                        break;
                    }
                    accordion.handle_key(Key::from(key.code)).is_handled()
                }
                Some(Ok(Event::Resize(..))) => true,
                Some(Ok(_)) => false,
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        };
        if redraw {
            draw(&mut guard, &accordion, resizes.load(Ordering::Relaxed))?;
        }
    }

    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn draw(guard: &mut TerminalGuard, accordion: &Accordion, resizes: u64) -> Result<(), TuiError> {
    let size = terminal::size()?;
    let status = format!(
        "resize signals: {}  |  ↑/↓ move  space/enter toggle  q quit",
        resizes
    );
    render::draw(guard.out(), &accordion.sections(), &status, size)?;
    Ok(())
}
