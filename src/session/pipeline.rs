//! Debounced edit stream
//!
//! Edits arrive on a channel. After a quiet period the latest state is
//! evaluated in a background task; results land back on the session loop,
//! where anything older than the newest ticket is dropped.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use super::runtime::Session;
use super::ticket::Ticket;
use crate::filter::{FilterEdit, FilterState};
use crate::interpreter::GaugeState;

impl Session {
    /// Drive the session from an edit stream until it closes
    ///
    /// `on_update` sees every reading that makes it to the display. Pending
    /// edits are evaluated and in-flight results are awaited before returning.
    pub async fn run_edits<F>(&mut self, mut edits: mpsc::Receiver<FilterEdit>, mut on_update: F)
    where
        F: FnMut(&FilterState, &GaugeState),
    {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(Ticket, GaugeState)>();
        let mut deadline: Option<Instant> = None;
        let mut in_flight = 0usize;
        let mut open = true;

        loop {
            if !open && deadline.is_none() && in_flight == 0 {
                break;
            }

            tokio::select! {
                edit = edits.recv(), if open => match edit {
                    Some(edit) => {
                        if let Err(e) = self.edit(edit) {
                            warn!(error = %e, "Rejected edit");
                        }
                        deadline = Some(Instant::now() + self.debounce());
                    }
                    None => {
                        open = false;
                        if deadline.is_some() {
                            deadline = Some(Instant::now());
                        }
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    let ticket = self.issue();
                    if self.is_current(&ticket) {
                        debug!(generation = ticket.generation, "Query unchanged, keeping reading");
                    } else {
                        let interpreter = self.interpreter().clone();
                        let done = done_tx.clone();
                        in_flight += 1;
                        tokio::spawn(async move {
                            let gauge = interpreter.evaluate(&ticket.filters).await;
                            let _ = done.send((ticket, gauge));
                        });
                    }
                },
                Some((ticket, gauge)) = done_rx.recv(), if in_flight > 0 => {
                    in_flight -= 1;
                    if self.complete(&ticket, gauge) {
                        if let Some(gauge) = self.gauge() {
                            on_update(&ticket.filters, gauge);
                        }
                    }
                },
            }
        }
    }
}
