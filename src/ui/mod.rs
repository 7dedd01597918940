//! Presentation boundary.
//!
//! Rendering itself lives outside this crate. What the crate owns is the
//! transformation of session state into display-ready data:
//!
//! ```text
//! SessionState → compute_viewmodel → ResultsViewModel → (external renderer)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable search state

pub mod viewmodel;

pub use viewmodel::{BookCard, DetailsView, PaginationControls, ResultsViewModel};
