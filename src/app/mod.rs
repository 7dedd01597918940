//! Application layer coordinating state, events, and actions.
//!
//! This module is the search session controller. It sits between the caller
//! (a presentation layer) and the search/storage/worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Action → Event → handle_event → State Mutations → Actions → Side Effects
//!                            ↑                                  ↓
//!                            └──────── Worker Outcomes ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`session`]: Driver executing actions against the worker and store
//! - [`state`]: Central session state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::{handle_event, Event, SessionState};
//! use bookfinder::domain::PageDirection;
//! use bookfinder::search::QueryBuilder;
//! use bookfinder::storage::FavoritesSet;
//!
//! let mut state = SessionState::new(FavoritesSet::new());
//! let (changed, actions) = handle_event(
//!     &mut state,
//!     &QueryBuilder::default(),
//!     Event::ChangePage(PageDirection::Next),
//! );
//! assert!(!changed && actions.is_empty());
//! ```

pub mod actions;
pub mod handler;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use session::SearchSession;
pub use state::{InFlight, RequestStatus, SessionState};
