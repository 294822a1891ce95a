//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it holds config loading and the label-lookup seam.
//!
//! ## Config loading
//! ```rust,no_run
//! use pcfg_kernel::config::load_config;
//! use pcfg_kernel::domain::config::ConfiguratorConfig;
//!
//! let cfg: ConfiguratorConfig = load_config(Some("configurator.toml")).unwrap();
//! assert!(cfg.registry.strict);
//! ```
//!
//! ## Labels
//! ```rust
//! use pcfg_kernel::labels::{LabelLookup, StaticLabels};
//!
//! let labels = StaticLabels::from_pairs([("global-reset.colour.1", "Green")]);
//! assert_eq!(labels.lookup("global-reset.colour.1").as_deref(), Some("Green"));
//! ```
pub mod config;
pub mod labels;

pub use pcfg_domain as domain;
