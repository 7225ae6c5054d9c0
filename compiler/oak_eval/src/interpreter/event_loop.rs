//! Running callbacks for completed host operations.

use tracing::debug;

use super::Interpreter;
use crate::scheduler::{Completion, EventLoopReport};

impl Interpreter {
    /// Run callbacks until no operation is pending, blocking for completions
    /// while any are outstanding.
    ///
    /// A callback error aborts that callback only; it is recorded in the
    /// report and the loop moves on.
    pub fn run_event_loop(&mut self) -> EventLoopReport {
        self.drive(true)
    }

    /// Run callbacks for completions already queued, without blocking.
    pub fn run_until_idle(&mut self) -> EventLoopReport {
        self.drive(false)
    }

    fn drive(&mut self, block: bool) -> EventLoopReport {
        let mut report = EventLoopReport::default();
        loop {
            let next = if block && self.scheduler.has_pending() {
                self.scheduler.next_blocking()
            } else {
                self.scheduler.try_next()
            };
            let Some(completion) = next else {
                break;
            };
            self.dispatch(completion, &mut report);
            self.maybe_collect();
        }

        let stats = self.collect_garbage();
        debug!(
            callbacks = report.callbacks_run,
            errors = report.errors.len(),
            rejected = report.rejected.len(),
            pending = self.scheduler.pending_count(),
            live = stats.live,
            "event loop idle"
        );
        report
    }

    fn dispatch(&mut self, completion: Completion, report: &mut EventLoopReport) {
        let operation = completion.operation;
        let callback = match self.scheduler.take(operation) {
            Ok(callback) => callback,
            Err(err) => {
                debug!(%operation, error = %err, "rejected completion");
                report.rejected.push(err);
                return;
            }
        };

        let base = self.heap.root_mark();
        self.heap.push_root(callback);
        let argument = completion
            .into_host_value()
            .into_value(&mut self.heap, &self.interner);
        self.heap.push_root(argument);

        debug!(%operation, "running callback");
        report.callbacks_run += 1;
        if let Err(err) = self.call_value(callback, &[argument]) {
            debug!(%operation, error = %err, "callback failed");
            report.errors.push(err);
        }
        self.heap.truncate_roots(base);
    }
}
