//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside every handler, such
//! as trace identifier propagation and per-request logging.

pub mod trace;

pub use trace::Trace;
