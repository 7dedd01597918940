//! Background search worker.
//!
//! Each dispatched [`SearchJob`] runs the fetch-then-filter pipeline on its own
//! thread and posts a [`SearchOutcome`] to a channel owned by the worker. Jobs are
//! never cancelled; ordering is the session's concern, not the worker's, so
//! outcomes arrive in completion order.

use crate::domain::error::{BookfinderError, Result};
use crate::search::{run_search, SearchClient};
use crate::worker::{SearchJob, SearchOutcome};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

/// Runs search jobs off the caller's thread.
pub struct SearchWorker<C: SearchClient + 'static> {
    client: Arc<C>,
    sender: Sender<SearchOutcome>,
    receiver: Receiver<SearchOutcome>,
}

impl<C: SearchClient + 'static> SearchWorker<C> {
    pub fn new(client: C) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            client: Arc::new(client),
            sender,
            receiver,
        }
    }

    /// Starts `job` on a new worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`BookfinderError::Worker`] if the thread cannot be spawned.
    pub fn dispatch(&self, job: SearchJob) -> Result<()> {
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        let seq = job.seq;

        std::thread::Builder::new()
            .name(format!("bookfinder-search-{seq}"))
            .spawn(move || {
                let outcome = Self::run_job(client.as_ref(), job);
                if sender.send(outcome).is_err() {
                    tracing::debug!(seq = seq, "session gone, dropping search outcome");
                }
            })
            .map_err(|e| BookfinderError::Worker(format!("failed to spawn search thread: {e}")))?;

        tracing::debug!(seq = seq, "search job dispatched");
        Ok(())
    }

    /// Returns a finished outcome if one is ready.
    #[must_use]
    pub fn try_next(&self) -> Option<SearchOutcome> {
        self.receiver.try_recv().ok()
    }

    /// Waits up to `timeout` for the next finished outcome.
    #[must_use]
    pub fn next_timeout(&self, timeout: Duration) -> Option<SearchOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Executes one job synchronously on the current thread.
    pub fn run_job(client: &C, job: SearchJob) -> SearchOutcome {
        let _context_guard = attach_parent_trace_context(&job);

        let span = tracing::debug_span!("worker_run_search",
            seq = job.seq,
            title = %job.request.title,
            page = job.request.page.get()
        );
        let _guard = span.entered();

        let result = run_search(client, &job.request, &job.criteria);
        match &result {
            Ok(page) => tracing::debug!(
                records = page.records.len(),
                total_matches = page.total_matches,
                "search job finished"
            ),
            Err(e) => tracing::debug!(error = %e, "search job failed"),
        }

        SearchOutcome { seq: job.seq, result }
    }
}

impl<C: SearchClient + 'static> std::fmt::Debug for SearchWorker<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorker").finish_non_exhaustive()
    }
}

/// Re-attaches the dispatching span's trace context on the worker thread.
///
/// Returns a context guard that must be held for the duration of the job.
fn attach_parent_trace_context(job: &SearchJob) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_context = job.trace_context.as_ref()?;

    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(
        trace_id,
        span_id,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );

    let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

    Some(otel_context.attach())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageCursor, SearchCriteria};
    use crate::search::{build_request, SearchRequest, SearchResponse};

    struct Echo;

    impl SearchClient for Echo {
        fn execute(&self, request: &SearchRequest) -> Result<SearchResponse> {
            Ok(SearchResponse {
                records: Vec::new(),
                total_matches: u64::from(request.page.get()),
            })
        }
    }

    #[test]
    fn outcomes_carry_job_sequence_numbers() {
        let worker = SearchWorker::new(Echo);
        let request = build_request("dune", PageCursor::new(3).unwrap()).unwrap();
        worker
            .dispatch(SearchJob::new(17, request, SearchCriteria::titled("dune")))
            .unwrap();

        let outcome = worker.next_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.seq, 17);
        let page = outcome.result.unwrap();
        assert_eq!(page.total_matches, 3);
        assert_eq!(page.cursor.get(), 3);
    }

    #[test]
    fn nothing_pending_means_no_outcome() {
        let worker = SearchWorker::new(Echo);
        assert!(worker.try_next().is_none());
        assert!(worker.next_timeout(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn malformed_trace_context_is_ignored() {
        let request = build_request("dune", PageCursor::FIRST).unwrap();
        let mut job = SearchJob::new(1, request, SearchCriteria::titled("dune"));
        job.trace_context = Some(crate::worker::TraceContext {
            trace_id: "zz".into(),
            parent_span_id: "zz".into(),
        });

        let outcome = SearchWorker::run_job(&Echo, job);
        assert_eq!(outcome.seq, 1);
        assert!(outcome.result.is_ok());
    }
}
