//! Drug aggregates and the field-wise merge between two of them.

use drugsource::{ActiveIngredient, SourceApplication, SourceProduct};
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Everything known about one generic-name identity across applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    /// Sponsor of every merged application
    pub sponsors: Vec<String>,
    /// Application numbers merged into this aggregate
    pub applications: Vec<String>,
    /// Brand names from the cross-reference blocks
    pub brands: Vec<String>,
    /// Generic names; the aggregate's identity
    pub generics: Vec<String>,
    /// Labeler / manufacturer names
    pub manufacturers: Vec<String>,

    /// Package NDCs from the cross-reference block
    pub ndc_codes: Vec<String>,
    /// One entry per distinct product across applications
    pub forms: Vec<DrugForm>,
}

/// A product as listed under a drug aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugForm {
    /// Brand name of the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Route of administration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Dosage form, e.g. `TABLET`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_form: Option<String>,
    /// Marketing status; discontinued products are kept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Therapeutic equivalence code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub te_code: Option<String>,
    /// Ingredients in label order
    pub active_ingredients: Vec<ActiveIngredient>,
}

impl From<&SourceProduct> for DrugForm {
    fn from(product: &SourceProduct) -> Self {
        Self {
            name: product.brand_name.clone(),
            route: product.route.clone(),
            dosage_form: product.dosage_form.clone(),
            availability: product.marketing_status.clone(),
            te_code: product.te_code.clone(),
            active_ingredients: product.active_ingredients.clone(),
        }
    }
}

/// Build the single aggregate an application contributes.
///
/// Every product becomes a form, discontinued ones included. Lists missing
/// from the cross-reference block become empty.
pub fn build_drug(application: &SourceApplication) -> Drug {
    let xref = application.openfda.clone().unwrap_or_default();

    Drug {
        sponsors: application.sponsor_name.iter().cloned().collect(),
        applications: application.application_number.iter().cloned().collect(),
        brands: xref.brand_names().to_vec(),
        generics: xref.generic_names().to_vec(),
        manufacturers: xref.manufacturer_names().to_vec(),
        ndc_codes: xref.package_ndcs().to_vec(),
        forms: application.products.iter().map(DrugForm::from).collect(),
    }
}

/// Field-wise union of two aggregates, first-seen order, duplicates removed.
///
/// Neither input is modified.
pub fn merge(existing: &Drug, incoming: &Drug) -> Drug {
    Drug {
        sponsors: union_ordered(&existing.sponsors, &incoming.sponsors),
        applications: union_ordered(&existing.applications, &incoming.applications),
        brands: union_ordered(&existing.brands, &incoming.brands),
        generics: union_ordered(&existing.generics, &incoming.generics),
        manufacturers: union_ordered(&existing.manufacturers, &incoming.manufacturers),
        ndc_codes: union_ordered(&existing.ndc_codes, &incoming.ndc_codes),
        forms: union_ordered(&existing.forms, &incoming.forms),
    }
}

fn union_ordered<T: Clone + Eq + Hash>(first: &[T], second: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for item in first.iter().chain(second) {
        if seen.insert(item) {
            unique.push(item.clone());
        }
    }
    unique
}
