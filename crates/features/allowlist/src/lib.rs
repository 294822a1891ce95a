//! # Allowlist Validator
//!
//! Some models have manufacturable combinations that pairwise matrices cannot describe: a
//! tuple can pass every matrix and still not be a real product. For those models the catalog
//! carries the literal list of manufactured codes, and this crate makes that list the final gate.
//!
//! * **Codecs ([`codec`])**: [`SkuCodec`] translates between a configuration and its code.
//!   [`SchemaCodec`] derives both directions from a model's product-code schema.
//! * **Gate ([`Allowlist`])**: membership checks, allowlist-driven option filtering and the
//!   false-positive report that documents why the gate exists.

pub mod allowlist;
pub mod codec;
mod error;

pub use crate::allowlist::{Allowlist, AllowlistEntry};
pub use crate::codec::{SchemaCodec, SkuCodec};
pub use crate::error::{AllowlistError, AllowlistErrorExt};
