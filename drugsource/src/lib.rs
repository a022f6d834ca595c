//! # drugsource
//!
//! Shared plumbing for the openFDA drug-approval pipelines:
//!
//! 1. **Source models**: serde shapes for `results[]` applications, their
//!    `openfda` cross-reference block and marketed products
//! 2. **Filtering**: applications without a cross-reference block are dropped
//!    before either pipeline runs
//! 3. **I/O**: load the bulk JSON document, persist a collection as the
//!    entire content of an output artifact
//!
//! The compound and drug pipelines live in `compoundscriber` and
//! `drugmerger`; this crate has no opinion on identity or merge rules.

mod config;
mod error;
mod filter;
mod io;
mod model;

pub use config::{OutputConfig, DEFAULT_OUTPUT_DIR};
pub use error::{SourceError, SourceResult};
pub use filter::has_cross_reference;
pub use io::{load_applications, write_collection};
pub use model::{
    ActiveIngredient, CrossReference, SourceApplication, SourceDocument, SourceProduct,
    UNAVAILABLE_STATUSES,
};

/// Number of source applications between progress events.
pub const PROGRESS_INTERVAL: usize = 1000;
