//! # Domain Models
//!
//! Pure configurator types with minimal dependencies (`serde`, `fxhash`, `typed-builder`).
//! Keep it lean: no I/O and no engine logic, just data and simple helpers.

pub mod availability;
pub mod config;
pub mod configuration;
pub mod constraints;
pub mod ids;
pub mod model;
pub mod product;

pub use availability::{BlockReason, CombinationValidity, OptionAvailability, StepAvailability};
pub use configuration::{Configuration, Selection};
pub use constraints::{ConstraintMatrix, ModelConstraints, StepConstraint};
pub use ids::{ModelId, OptionId, StepId};
pub use model::{LegacyDependency, ModelDefinition, OptionDef, ProductModelSchema, Separator, Step};
pub use product::{CodePart, ProductModel};
