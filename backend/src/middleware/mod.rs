//! Actix middleware shared by every route.
//!
//! [`Trace`] tags each request with a [`crate::TraceId`] so error bodies and
//! log lines can be correlated.

pub mod trace;

pub use trace::Trace;
