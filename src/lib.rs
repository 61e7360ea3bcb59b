//! CarCare Booking Flow
//!
//! The core of the CarCare appointment booking screen, usable from any UI
//! shell.
//!
//! ## Features
//!
//! - **Form state holder**: one observable draft, one mutation per field
//! - **Submission orchestrator**: a single asynchronous create against the
//!   appointments collection, at most one in flight
//! - **Result projector**: Idle/Pending/Success/Failure mapped onto dialogs,
//!   the confirmation notification, and navigation
//!
//! The remote store, notifications, image acquisition, and navigation are
//! trait seams so the flow runs against stubs in tests and against Firestore,
//! the log notifier, and a terminal prompt in the bundled binary.

pub mod config;
pub mod flow;
pub mod form;
pub mod image;
pub mod models;
pub mod nav;
pub mod notify;
pub mod store;
pub mod validation;
