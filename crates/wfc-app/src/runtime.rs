//! Generic runtime for monitor orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`LineSource`]: the ingestion role, one line at a time in log order
//! - the redraw interval: the timer role, draining the dirty set
//! - [`RenderSink`]: where snapshots are drawn
//! - a [`Control`] channel: quit and redraw requests
//!
//! Both roles run in one task and only touch the [`Monitor`] between awaits,
//! so every mutation and every drain is serialized without a lock. No await
//! happens while state is half-updated: applying an event is one synchronous
//! step.

use std::time::Duration;

use tokio::{sync::mpsc, time::MissedTickBehavior};
use wfc_core::{Clock, Monitor};

use crate::{Control, LineSource, RenderSink};

/// What woke the loop up.
enum Step<E> {
    Control(Option<Control>),
    Tick,
    Line(Result<Option<String>, E>),
}

/// Generic runtime that orchestrates a Monitor, a source and a sink.
///
/// # Type Parameters
///
/// - `S`: source of log lines
/// - `R`: render sink
/// - `C`: calendar for the daily call count
pub struct Runtime<S, R, C>
where
    S: LineSource,
    R: RenderSink,
    C: Clock,
{
    monitor: Monitor<C>,
    source: S,
    sink: R,
    controls: mpsc::Receiver<Control>,
    redraw_interval: Duration,
    exit_when_drained: bool,
}

impl<S, R, C> Runtime<S, R, C>
where
    S: LineSource,
    R: RenderSink,
    C: Clock,
{
    /// Create a runtime around an already seeded monitor.
    pub fn new(
        monitor: Monitor<C>,
        source: S,
        sink: R,
        controls: mpsc::Receiver<Control>,
        redraw_interval: Duration,
    ) -> Self {
        Self { monitor, source, sink, controls, redraw_interval, exit_when_drained: false }
    }

    /// Stop once the source is closed and a tick finds nothing to draw.
    ///
    /// Production sources never close; simulations use this to finish.
    #[must_use]
    pub fn exit_when_drained(mut self, exit: bool) -> Self {
        self.exit_when_drained = exit;
        self
    }

    /// Run the main event loop.
    ///
    /// Draws every node once, then loops until [`Control::Quit`]. Returns
    /// the monitor so callers can inspect final state.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to render. Source errors are
    /// logged and ingestion continues.
    pub async fn run(mut self) -> Result<Monitor<C>, R::Error> {
        self.sink.render(&self.monitor.redraw())?;

        let mut interval = tokio::time::interval(self.redraw_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut source_open = true;
        let mut controls_open = true;

        loop {
            let step = tokio::select! {
                biased;

                control = self.controls.recv(), if controls_open => Step::Control(control),

                _ = interval.tick() => Step::Tick,

                line = self.source.next_line(), if source_open => Step::Line(line),
            };

            match step {
                Step::Control(Some(Control::Quit)) => {
                    tracing::info!("quit requested");
                    break;
                },
                Step::Control(Some(Control::Redraw)) => {
                    self.sink.render(&self.monitor.redraw())?;
                },
                Step::Control(None) => {
                    tracing::debug!("control channel closed");
                    controls_open = false;
                },
                Step::Tick => {
                    if let Some(snapshot) = self.monitor.tick() {
                        tracing::trace!(rows = snapshot.rows.len(), "redraw");
                        self.sink.render(&snapshot)?;
                    } else if !source_open && self.exit_when_drained {
                        break;
                    }
                },
                Step::Line(Ok(Some(line))) => {
                    self.monitor.ingest(&line);
                },
                Step::Line(Ok(None)) => {
                    tracing::info!("line source closed");
                    source_open = false;
                },
                Step::Line(Err(e)) => {
                    tracing::warn!(error = %e, "failed to read log line, continuing");
                },
            }
        }

        Ok(self.monitor)
    }

    /// Get a reference to the Monitor
    pub fn monitor(&self) -> &Monitor<C> {
        &self.monitor
    }
}
