//! Worker job and outcome types.
//!
//! This module defines what the session hands to the background search worker
//! and what comes back. Every job carries the sequence number assigned at
//! dispatch; the session uses it on the way back to drop superseded outcomes.
//! Jobs also carry the dispatching span's trace context so worker spans join
//! the same trace.

use crate::domain::error::Result;
use crate::domain::SearchCriteria;
use crate::search::{ResultPage, SearchRequest};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when handing jobs to worker threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is the case whenever no OpenTelemetry layer is installed.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }
}

/// A search to run on a worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchJob {
    /// Dispatch sequence number; strictly increasing per session.
    pub seq: u64,
    pub request: SearchRequest,
    /// Criteria whose client-side filters apply to the fetched page.
    pub criteria: SearchCriteria,
    pub trace_context: Option<TraceContext>,
}

impl SearchJob {
    /// Creates a job tagged with the current trace context.
    #[must_use]
    pub fn new(seq: u64, request: SearchRequest, criteria: SearchCriteria) -> Self {
        Self {
            seq,
            request,
            criteria,
            trace_context: TraceContext::from_current(),
        }
    }
}

/// Result of a [`SearchJob`], posted back to the session.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Sequence number of the job this outcome answers.
    pub seq: u64,
    pub result: Result<ResultPage>,
}
