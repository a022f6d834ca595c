//! # Compoundscriber
//!
//! Turns openFDA drug-approval applications into a flat list of marketed
//! compounds, one per distinct (brand name, active ingredients) pair, each
//! with a generated plain-English description.
//!
//! ## Pipeline Overview
//!
//! 1. **Filtering**: Applications without an `openfda` block are dropped
//! 2. **Availability**: Discontinued and tentatively approved products never
//!    become compounds
//! 3. **Deduplication**: A compound is skipped when its identity already
//!    exists in the batch, including earlier products of the same application
//! 4. **Description**: Route, dosage form, ingredients and generic names are
//!    rendered into three sentences

mod compound;
mod describe;

pub use compound::{
    build_compound_collection, build_compounds, Compound, CompoundBuild, CompoundCatalog,
    CompoundKey, CompoundStats,
};
pub use describe::{describe, english_list};

/// Artifact name used when none is given on the command line.
pub const DEFAULT_FILE_NAME: &str = "drugs.json";
