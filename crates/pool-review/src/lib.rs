//! Pool Review
//!
//! Reviews a pull request against an EDA library pool: which items changed,
//! everything those changes touch, and what looks wrong.
//!
//! # Pipeline
//!
//! 1. A [`ChangesetSource`] yields `(path, status)` pairs
//! 2. [`ChangeClassifier`] maps them onto items and picks the top parts
//! 3. [`pool_graph::ClosureEngine`] computes the where-used and derived closures
//! 4. [`AttributeResolver`] and [`RuleRegistry`] annotate closure members
//! 5. [`ReportBuilder`] assembles a [`ReviewReport`]
//! 6. A renderer in [`render`] turns it into Markdown or JSON
//!
//! [`ReviewEngine`] runs steps 2 to 5.
//!
//! # Example
//!
//! ```rust,ignore
//! let pool = MemoryPool::load(Path::new("pool/pool.json"))?;
//! let engine = ReviewEngine::new(pool, ReviewConfig::default());
//! let report = engine.review(&GitChangeset::new("pool"))?;
//! println!("{}", render_markdown(&report));
//! ```

#![warn(missing_docs)]

pub mod changeset;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod report;
pub mod resolver;
pub mod validator;

// Re-exports
pub use changeset::{ChangesetSource, GitChangeset, NameStatusChangeset, StaticChangeset};
pub use classifier::{ChangeClassifier, ChangedItem, Classification};
pub use config::ReviewConfig;
pub use engine::ReviewEngine;
pub use error::{ChangesetError, ConfigError, ReviewError};
pub use render::{render_json, render_markdown, OutputFormat};
pub use report::{ReportBuilder, ReviewReport};
pub use resolver::{AttributeResolver, Resolved};
pub use validator::{LintRule, LintTarget, LintWarning, RuleRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
