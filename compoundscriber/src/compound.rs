//! Compound records: one per distinct (brand name, active ingredients) pair
//! across the whole batch.

use crate::describe::describe;
use drugsource::{
    has_cross_reference, ActiveIngredient, SourceApplication, SourceProduct, PROGRESS_INTERVAL,
};
use serde::Serialize;
use std::collections::HashSet;

/// A marketed product, deduplicated on brand and ingredients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compound {
    /// Generated English summary, see [`describe`]
    pub description: String,
    /// Reference listed drug flag, copied from the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_drug: Option<String>,
    /// Reference standard flag, copied from the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_standard: Option<String>,
    /// Product brand name; half of the identity key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,

    /// Cross-reference generic names, minus the compound's own brand name
    pub generic_names: Vec<String>,
    /// Ingredients in label order; the other half of the identity key
    pub active_ingredients: Vec<ActiveIngredient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_form: Option<String>,
    /// Route of administration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_route: Option<String>,

    /// Marketing status of the source product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub te_code: Option<String>,

    /// Product NDC aligned with the product's position in the application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndc: Option<String>,
    /// Application the compound was first seen in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_number: Option<String>,
}

impl Compound {
    /// Identity key of this compound.
    pub fn key(&self) -> CompoundKey {
        CompoundKey {
            brand_name: self.brand_name.clone(),
            active_ingredients: self.active_ingredients.clone(),
        }
    }
}

/// Identity of a compound. Ingredient order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundKey {
    /// Brand name as it appears in the source, unnormalized
    pub brand_name: Option<String>,
    pub active_ingredients: Vec<ActiveIngredient>,
}

impl CompoundKey {
    /// Key a source product would have as a compound.
    pub fn of(product: &SourceProduct) -> Self {
        Self {
            brand_name: product.brand_name.clone(),
            active_ingredients: product.active_ingredients.clone(),
        }
    }
}

/// Running output collection with a key index for O(1) duplicate checks.
#[derive(Debug, Default)]
pub struct CompoundCatalog {
    compounds: Vec<Compound>,
    seen: HashSet<CompoundKey>,
}

impl CompoundCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a compound with this key has already been collected.
    pub fn contains(&self, key: &CompoundKey) -> bool {
        self.seen.contains(key)
    }

    /// Append compounds produced by [`build_compounds`].
    ///
    /// Compounds whose key is already present are dropped, so the catalog
    /// stays duplicate free even when fed by hand.
    pub fn extend(&mut self, compounds: impl IntoIterator<Item = Compound>) {
        for compound in compounds {
            if self.seen.insert(compound.key()) {
                self.compounds.push(compound);
            }
        }
    }

    /// Number of compounds collected so far.
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    /// Consume the catalog, yielding compounds in insertion order.
    pub fn into_compounds(self) -> Vec<Compound> {
        self.compounds
    }
}

/// Counters reported at the end of a compound run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompoundStats {
    /// Applications read from the source document
    pub applications: usize,
    /// Applications dropped for lacking an `openfda` block
    pub without_cross_reference: usize,
    /// Products inspected across the surviving applications
    pub products: usize,
    /// Products skipped as discontinued or tentatively approved
    pub unavailable: usize,
    /// Products skipped because their key was already collected
    pub duplicates: usize,
    /// Compounds written to the output
    pub emitted: usize,
}

/// Result of [`build_compound_collection`].
#[derive(Debug)]
pub struct CompoundBuild {
    /// Deduplicated compounds in first-seen order
    pub compounds: Vec<Compound>,
    /// Counters for the run summary
    pub stats: CompoundStats,
}

/// Derive the compounds contributed by one application.
///
/// # Arguments
///
/// * `application` - Source application whose products are turned into compounds
/// * `prior` - Compounds collected from earlier applications; read only
///
/// # Returns
///
/// One compound per available product whose key is neither in `prior` nor
/// produced earlier in this call, in product order. The caller appends them
/// to `prior` before handling the next application.
///
/// # Examples
///
/// ```
/// use compoundscriber::{build_compounds, CompoundCatalog};
/// use drugsource::SourceApplication;
///
/// let application: SourceApplication = serde_json::from_str(
///     r#"{"openfda": {"generic_name": ["IBUPROFEN"]},
///         "products": [{"brand_name": "ADVIL", "marketing_status": "Over-the-counter"}]}"#,
/// )
/// .unwrap();
/// let compounds = build_compounds(&application, &CompoundCatalog::new());
/// assert_eq!(compounds[0].generic_names, vec!["IBUPROFEN"]);
/// ```
pub fn build_compounds(
    application: &SourceApplication,
    prior: &CompoundCatalog,
) -> Vec<Compound> {
    collect_compounds(application, prior, &mut CompoundStats::default())
}

fn collect_compounds(
    application: &SourceApplication,
    prior: &CompoundCatalog,
    stats: &mut CompoundStats,
) -> Vec<Compound> {
    let xref = application.openfda.as_ref();
    let generic_names = xref.map(|x| x.generic_names()).unwrap_or_default();

    let mut local: HashSet<CompoundKey> = HashSet::new();
    let mut compounds = Vec::new();

    for (idx, product) in application.products.iter().enumerate() {
        stats.products += 1;

        if product.is_unavailable() {
            stats.unavailable += 1;
            tracing::debug!(
                application = ?application.application_number,
                brand = ?product.brand_name,
                status = ?product.marketing_status,
                "skipping unavailable product"
            );
            continue;
        }

        let key = CompoundKey::of(product);
        if prior.contains(&key) || local.contains(&key) {
            stats.duplicates += 1;
            tracing::debug!(
                application = ?application.application_number,
                brand = ?product.brand_name,
                "skipping duplicate compound"
            );
            continue;
        }

        let own_generics: Vec<String> = generic_names
            .iter()
            .filter(|name| product.brand_name.as_deref() != Some(name.as_str()))
            .cloned()
            .collect();

        let ndc = xref.and_then(|x| x.product_ndc_at(idx)).map(str::to_string);
        if ndc.is_none() {
            tracing::debug!(
                application = ?application.application_number,
                product = idx,
                "no product NDC at this position"
            );
        }

        compounds.push(Compound {
            description: describe(product, &own_generics),
            reference_drug: product.reference_drug.clone(),
            reference_standard: product.reference_standard.clone(),
            brand_name: product.brand_name.clone(),
            generic_names: own_generics,
            active_ingredients: product.active_ingredients.clone(),
            dosage_form: product.dosage_form.clone(),
            dosage_route: product.route.clone(),
            availability: product.marketing_status.clone(),
            te_code: product.te_code.clone(),
            ndc,
            application_number: application.application_number.clone(),
        });
        local.insert(key);
    }

    stats.emitted += compounds.len();
    compounds
}

/// Run the compound pipeline over a loaded batch.
///
/// Applications without a cross-reference block are skipped. Each
/// application's compounds are appended to the running catalog before the
/// next one is processed, so dedup holds across the whole batch.
pub fn build_compound_collection(applications: &[SourceApplication]) -> CompoundBuild {
    let total = applications.len();
    let mut catalog = CompoundCatalog::new();
    let mut stats = CompoundStats::default();

    for (i, application) in applications.iter().enumerate() {
        stats.applications += 1;
        if (i + 1) % PROGRESS_INTERVAL == 0 {
            tracing::info!("processed {} / {} applications", i + 1, total);
        }

        if !has_cross_reference(application) {
            stats.without_cross_reference += 1;
            continue;
        }

        let compounds = collect_compounds(application, &catalog, &mut stats);
        catalog.extend(compounds);
    }

    CompoundBuild {
        compounds: catalog.into_compounds(),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app(value: serde_json::Value) -> SourceApplication {
        serde_json::from_value(value).unwrap()
    }

    fn advil_application() -> SourceApplication {
        app(json!({
            "application_number": "NDA018989",
            "sponsor_name": "HALEON",
            "openfda": {
                "generic_name": ["IBUPROFEN"],
                "brand_name": ["ADVIL"],
                "product_ndc": ["000-001"]
            },
            "products": [{
                "brand_name": "ADVIL",
                "marketing_status": "Prescription",
                "active_ingredients": [{ "name": "IBUPROFEN", "strength": "200mg" }],
                "route": "ORAL",
                "dosage_form": "TABLET",
                "reference_drug": "Yes",
                "te_code": "AB"
            }]
        }))
    }

    #[test]
    fn builds_described_compound() {
        let compounds = build_compounds(&advil_application(), &CompoundCatalog::new());
        assert_eq!(compounds.len(), 1);

        let advil = &compounds[0];
        assert_eq!(advil.brand_name.as_deref(), Some("ADVIL"));
        assert_eq!(advil.generic_names, vec!["IBUPROFEN".to_string()]);
        assert_eq!(advil.ndc.as_deref(), Some("000-001"));
        assert_eq!(advil.application_number.as_deref(), Some("NDA018989"));
        assert_eq!(advil.availability.as_deref(), Some("Prescription"));
        assert_eq!(advil.dosage_route.as_deref(), Some("ORAL"));
        assert_eq!(advil.reference_drug.as_deref(), Some("Yes"));
        assert_eq!(advil.reference_standard, None);
        assert_eq!(
            advil.description,
            "ADVIL is a ORAL medication in TABLET form. It contains the following \
             ingredients: IBUPROFEN with a strength of 200mg. This drug is also \
             referred to generically as IBUPROFEN."
        );
    }

    #[test]
    fn duplicate_within_application_is_skipped() {
        let application = app(json!({
            "openfda": { "generic_name": ["IBUPROFEN"], "product_ndc": ["1", "2"] },
            "products": [
                { "brand_name": "ADVIL", "marketing_status": "Over-the-counter",
                  "active_ingredients": [{ "name": "IBUPROFEN", "strength": "200MG" }] },
                { "brand_name": "ADVIL", "marketing_status": "Over-the-counter",
                  "dosage_form": "CAPSULE",
                  "active_ingredients": [{ "name": "IBUPROFEN", "strength": "200MG" }] }
            ]
        }));

        let compounds = build_compounds(&application, &CompoundCatalog::new());
        assert_eq!(compounds.len(), 1);
        assert_eq!(compounds[0].ndc.as_deref(), Some("1"));
    }

    #[test]
    fn duplicate_of_prior_collection_is_skipped() {
        let mut catalog = CompoundCatalog::new();
        catalog.extend(build_compounds(&advil_application(), &catalog));
        assert_eq!(catalog.len(), 1);

        assert!(build_compounds(&advil_application(), &catalog).is_empty());
    }

    #[test]
    fn ingredient_order_and_strength_are_part_of_identity() {
        let application = app(json!({
            "openfda": { "generic_name": ["A AND B"] },
            "products": [
                { "brand_name": "COMBO", "active_ingredients": [
                    { "name": "A", "strength": "1MG" }, { "name": "B", "strength": "2MG" }] },
                { "brand_name": "COMBO", "active_ingredients": [
                    { "name": "B", "strength": "2MG" }, { "name": "A", "strength": "1MG" }] },
                { "brand_name": "COMBO", "active_ingredients": [
                    { "name": "A", "strength": "5MG" }, { "name": "B", "strength": "2MG" }] }
            ]
        }));
        assert_eq!(build_compounds(&application, &CompoundCatalog::new()).len(), 3);
    }

    #[test]
    fn unavailable_products_are_excluded() {
        let application = app(json!({
            "openfda": { "generic_name": ["X"] },
            "products": [
                { "brand_name": "GONE", "marketing_status": "Discontinued",
                  "active_ingredients": [{ "name": "X", "strength": "1" }] },
                { "brand_name": "PENDING", "marketing_status": "None (Tentative Approval)",
                  "active_ingredients": [{ "name": "X", "strength": "1" }] }
            ]
        }));
        assert!(build_compounds(&application, &CompoundCatalog::new()).is_empty());
    }

    #[test]
    fn generic_names_exclude_own_brand() {
        let application = app(json!({
            "openfda": { "generic_name": ["IBUPROFEN", "ADVIL", "IBUPROFEN SODIUM"] },
            "products": [{ "brand_name": "ADVIL", "route": "ORAL", "dosage_form": "TABLET",
                           "active_ingredients": [{ "name": "IBUPROFEN", "strength": "200MG" }] }]
        }));

        let compounds = build_compounds(&application, &CompoundCatalog::new());
        assert_eq!(
            compounds[0].generic_names,
            vec!["IBUPROFEN".to_string(), "IBUPROFEN SODIUM".to_string()]
        );
        assert!(compounds[0]
            .description
            .ends_with("generically as IBUPROFEN and IBUPROFEN SODIUM."));
    }

    #[test]
    fn missing_ndc_position_is_tolerated() {
        let application = app(json!({
            "openfda": { "product_ndc": ["ONLY-ONE"] },
            "products": [
                { "brand_name": "FIRST", "active_ingredients": [] },
                { "brand_name": "SECOND", "active_ingredients": [] }
            ]
        }));

        let compounds = build_compounds(&application, &CompoundCatalog::new());
        assert_eq!(compounds.len(), 2);
        assert_eq!(compounds[1].ndc, None);
        assert!(compounds[1].generic_names.is_empty());
    }

    #[test]
    fn serializes_camel_case_and_omits_absent_fields() {
        let compounds = build_compounds(&advil_application(), &CompoundCatalog::new());
        let value = serde_json::to_value(&compounds[0]).unwrap();

        assert_eq!(value["brandName"], "ADVIL");
        assert_eq!(value["dosageRoute"], "ORAL");
        assert_eq!(value["teCode"], "AB");
        assert_eq!(value["genericNames"], json!(["IBUPROFEN"]));
        assert_eq!(
            value["activeIngredients"],
            json!([{ "name": "IBUPROFEN", "strength": "200mg" }])
        );
        assert!(value.get("referenceStandard").is_none());
    }

    #[test]
    fn collection_skips_unreferenced_and_dedups_across_applications() {
        let applications = vec![
            advil_application(),
            app(json!({
                "application_number": "NDA999",
                "products": [{ "brand_name": "ORPHAN", "active_ingredients": [] }]
            })),
            advil_application(),
        ];

        let build = build_compound_collection(&applications);
        assert_eq!(build.compounds.len(), 1);
        assert_eq!(
            build.stats,
            CompoundStats {
                applications: 3,
                without_cross_reference: 1,
                products: 2,
                unavailable: 0,
                duplicates: 1,
                emitted: 1,
            }
        );
    }

    #[test]
    fn catalog_extend_ignores_duplicates() {
        let compounds = build_compounds(&advil_application(), &CompoundCatalog::new());
        let mut catalog = CompoundCatalog::new();
        catalog.extend(compounds.clone());
        catalog.extend(compounds);
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
    }
}
