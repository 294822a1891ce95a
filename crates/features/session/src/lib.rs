//! # Configuration Session
//!
//! Owns the live [`Configuration`](pcfg_domain::Configuration) of one buyer working through
//! one model. Every write runs the cascade: selections invalidated by the change are cleared
//! before the call returns, so callers only ever observe consistent states.
//!
//! Matrix-governed models reconcile through the constraint engine. Allowlist-governed models
//! additionally keep only selections that still extend to a manufactured product.

mod error;
pub mod reasons;
pub mod session;

pub use crate::error::{SessionError, SessionErrorExt};
pub use crate::reasons::describe_reason;
pub use crate::session::Session;
