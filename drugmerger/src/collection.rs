//! Folding a batch of applications into generic-name keyed aggregates.
//!
//! The identity of an aggregate is its ordered list of generic names. An
//! application whose generics equal an existing identity is merged into
//! that slot. One whose generics are not an existing identity but share a
//! name with an existing aggregate is an identity conflict: it is reported
//! and dropped. Anything else starts a new aggregate.
//!
//! An application without generic names has no identity to share: it always
//! starts its own aggregate and nothing is ever merged into it.

use crate::drug::{build_drug, merge, Drug};
use drugsource::{has_cross_reference, SourceApplication, PROGRESS_INTERVAL};
use std::collections::HashMap;

/// What happened to a single application when folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldOutcome {
    /// A new aggregate was appended at this slot.
    Appended(usize),
    /// The application was merged into the aggregate at this slot.
    Merged(usize),
    /// The generics overlap the aggregate at `slot` without being equal to it.
    Conflict {
        /// Slot of the aggregate that already owns `generic`
        slot: usize,
        /// First incoming generic name found in an existing aggregate
        generic: String,
    },
}

/// Running, ordered drug collection with lookup indexes.
#[derive(Debug, Default)]
pub struct DrugCollection {
    /// Aggregates in first-appended order
    drugs: Vec<Drug>,
    /// Exact generics list to slot; empty lists are never indexed
    by_generics: HashMap<Vec<String>, usize>,
    /// Single generic name to the slot that first claimed it
    by_generic_name: HashMap<String, usize>,
}

impl DrugCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one application into the collection.
    ///
    /// # Arguments
    ///
    /// * `application` - A source application; its `openfda` generic names
    ///   decide the target slot
    ///
    /// # Returns
    ///
    /// Where the application went: a new slot, an existing slot, or nowhere
    /// because its generics conflict with an existing aggregate.
    pub fn fold(&mut self, application: &SourceApplication) -> FoldOutcome {
        let generics: Vec<String> = application
            .openfda
            .as_ref()
            .map(|xref| xref.generic_names().to_vec())
            .unwrap_or_default();

        if generics.is_empty() {
            let slot = self.drugs.len();
            self.drugs.push(build_drug(application));
            return FoldOutcome::Appended(slot);
        }

        if let Some(&slot) = self.by_generics.get(&generics) {
            self.drugs[slot] = merge(&self.drugs[slot], &build_drug(application));
            return FoldOutcome::Merged(slot);
        }

        if let Some((generic, &slot)) = generics
            .iter()
            .find_map(|name| self.by_generic_name.get(name).map(|slot| (name, slot)))
        {
            tracing::warn!(
                application = ?application.application_number,
                incoming = ?generics,
                existing = ?self.drugs[slot].generics,
                "generic identity conflict, skipping application"
            );
            return FoldOutcome::Conflict {
                slot,
                generic: generic.clone(),
            };
        }

        let slot = self.drugs.len();
        // A name repeated within one list keeps the slot it was first seen with.
        for name in &generics {
            self.by_generic_name.entry(name.clone()).or_insert(slot);
        }
        self.by_generics.insert(generics, slot);
        self.drugs.push(build_drug(application));
        FoldOutcome::Appended(slot)
    }

    /// Number of aggregates so far.
    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    /// Aggregates in slot order.
    pub fn drugs(&self) -> &[Drug] {
        &self.drugs
    }

    /// Consume the collection, yielding aggregates in slot order.
    pub fn into_drugs(self) -> Vec<Drug> {
        self.drugs
    }
}

/// Counters reported at the end of a drug run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DrugStats {
    /// Applications read from the source document
    pub applications: usize,
    /// Applications dropped for lacking an `openfda` block
    pub without_cross_reference: usize,
    /// Applications that started a new aggregate
    pub appended: usize,
    /// Applications merged into an existing aggregate
    pub merged: usize,
    /// Applications skipped on a generic identity conflict
    pub conflicts: usize,
}

/// Result of [`build_drug_collection`].
#[derive(Debug)]
pub struct DrugBuild {
    /// Aggregates ready to be written
    pub drugs: Vec<Drug>,
    /// Counters for the run summary
    pub stats: DrugStats,
}

/// Run the drug pipeline over a loaded batch.
///
/// Applications without a cross-reference block are counted and skipped;
/// the rest are folded in order with [`DrugCollection::fold`].
pub fn build_drug_collection(applications: &[SourceApplication]) -> DrugBuild {
    let total = applications.len();
    let mut collection = DrugCollection::new();
    let mut stats = DrugStats::default();

    for (i, application) in applications.iter().enumerate() {
        stats.applications += 1;
        if (i + 1) % PROGRESS_INTERVAL == 0 {
            tracing::info!("processed {} / {} applications", i + 1, total);
        }

        if !has_cross_reference(application) {
            stats.without_cross_reference += 1;
            continue;
        }

        match collection.fold(application) {
            FoldOutcome::Appended(_) => stats.appended += 1,
            FoldOutcome::Merged(_) => stats.merged += 1,
            FoldOutcome::Conflict { .. } => stats.conflicts += 1,
        }
    }

    DrugBuild {
        drugs: collection.into_drugs(),
        stats,
    }
}
