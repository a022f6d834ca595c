//! # Drugmerger
//!
//! Aggregates openFDA drug-approval applications into drug records keyed by
//! generic-name identity. Each aggregate carries every sponsor, application,
//! brand, generic name, manufacturer, package NDC and product form seen for
//! that identity.
//!
//! ## Pipeline Overview
//!
//! 1. **Filtering**: Applications without an `openfda` block are dropped
//! 2. **Building**: Each application becomes one drug with one form per product
//! 3. **Folding**: Drugs with equal generics are merged; overlapping but
//!    unequal generics are reported as conflicts and skipped

mod collection;
mod drug;

pub use collection::{build_drug_collection, DrugBuild, DrugCollection, DrugStats, FoldOutcome};
pub use drug::{build_drug, merge, Drug, DrugForm};

/// Artifact name used when none is given on the command line.
pub const DEFAULT_FILE_NAME: &str = "merged-drugs.json";
