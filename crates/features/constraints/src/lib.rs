//! # Constraint Engine
//!
//! Answers availability questions for one model from its directed per-pair matrices:
//!
//! * **Availability ([`engine`])**: is option O of step S legal next to the current
//!   selections, and if not, which selections block it.
//! * **Verification ([`consistency`])**: startup checks that every matrix references real
//!   steps and options, that no directed pair is authored twice, and that inverse pairs agree.
//! * **Migration ([`legacy`])**: folds the single-parent `dependsOn`/`availableFor` option
//!   fields of older catalog entries into matrices so only one filtering path remains.
//!
//! A matrix row that is absent, or a source step without a selection, never restricts anything.

pub mod consistency;
pub mod engine;
mod error;
pub mod legacy;

pub use crate::consistency::{Violation, check, verify};
pub use crate::engine::ConstraintEngine;
pub use crate::error::{ConstraintError, ConstraintErrorExt};
pub use crate::legacy::migrate_legacy;
