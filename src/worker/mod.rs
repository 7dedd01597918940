//! Background worker for asynchronous search requests.
//!
//! This module implements the threads that run network searches so the session
//! stays responsive while requests are outstanding. It includes distributed
//! tracing support for cross-thread observability.
//!
//! # Architecture
//!
//! - `messages`: Job/outcome types with sequence numbers and trace context propagation
//! - `handler`: Worker implementation and job execution

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{SearchJob, SearchOutcome, TraceContext};
