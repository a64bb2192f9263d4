//! Key watcher.
//!
//! Turns terminal events into [`Control`] messages for the runtime. Runs as
//! its own task so a blocked log read never delays quitting.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;
use wfc_app::Control;

use crate::TerminalError;

/// Map a terminal event to a runtime control, if it is one.
///
/// `q`, `Q`, `Esc` and `Ctrl-C` quit; a resize asks for a full redraw.
pub fn control_for(event: &Event) -> Option<Control> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => quit_key(key).then_some(Control::Quit),
        Event::Resize(..) => Some(Control::Redraw),
        _ => None,
    }
}

fn quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Forward controls from the terminal until quit or until the runtime
/// stops listening.
///
/// A terminal read error sends a final [`Control::Quit`] before returning.
pub async fn watch_keys(controls: mpsc::Sender<Control>) -> Result<(), TerminalError> {
    let mut events = EventStream::new();

    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                // Without key input there is no other way to stop.
                let _ = controls.send(Control::Quit).await;
                return Err(e.into());
            },
        };
        let Some(control) = control_for(&event) else {
            continue;
        };
        tracing::debug!(?control, "terminal control");
        if controls.send(control).await.is_err() || control == Control::Quit {
            break;
        }
    }
    Ok(())
}
