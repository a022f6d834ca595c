//! Source records as published in the openFDA drugs@FDA bulk download.
//!
//! Every field is optional on the wire. Absent values deserialize to `None`
//! or an empty list so the builders never have to deal with parse failures
//! for partially populated applications.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level shape of the bulk document: `{ "meta": ..., "results": [...] }`.
#[derive(Debug, Default, Deserialize)]
pub struct SourceDocument {
    /// Applications in source order; empty when the key is missing
    #[serde(default)]
    pub results: Vec<SourceApplication>,
}

/// One regulatory submission with its sponsor and marketed products.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceApplication {
    /// Application number, e.g. `NDA020402` or `ANDA076183`
    #[serde(default)]
    pub application_number: Option<String>,

    /// Company holding the application
    #[serde(default)]
    pub sponsor_name: Option<String>,

    /// Cross-reference block; absent for products openFDA does not list
    #[serde(default)]
    pub openfda: Option<CrossReference>,

    /// Products approved under this application, in source order
    #[serde(default)]
    pub products: Vec<SourceProduct>,
}

/// Supplemental identifiers attached to an application.
///
/// Only the lists used downstream are typed. Any other key (`rxcui`,
/// `spl_id`, `substance_name`, ...) is kept in `other`. Key presence is
/// tracked separately from values, so `{"generic_name": null}` still counts
/// as a block with one key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CrossReference {
    /// Brand names listed by openFDA for the application
    pub brand_name: Option<Vec<String>>,
    /// Generic names; the drug pipeline keys aggregates on this list
    pub generic_name: Option<Vec<String>>,
    /// Labeler / manufacturer names
    pub manufacturer_name: Option<Vec<String>>,
    /// Package-level NDCs
    pub package_ndc: Option<Vec<String>>,
    /// Product-level NDCs, positionally aligned with the application's products
    pub product_ndc: Option<Vec<String>>,

    /// Every key not typed above, verbatim
    pub other: Map<String, Value>,

    /// Number of keys present in the source block, whatever their values
    key_count: usize,
}

impl TryFrom<Map<String, Value>> for CrossReference {
    type Error = serde_json::Error;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let key_count = map.len();

        Ok(Self {
            brand_name: take_list(&mut map, "brand_name")?,
            generic_name: take_list(&mut map, "generic_name")?,
            manufacturer_name: take_list(&mut map, "manufacturer_name")?,
            package_ndc: take_list(&mut map, "package_ndc")?,
            product_ndc: take_list(&mut map, "product_ndc")?,
            other: map,
            key_count,
        })
    }
}

/// Remove `key` from `map` and read it as an optional string list.
///
/// # Returns
///
/// `Ok(None)` when the key is missing or null, an error when the value is
/// neither null nor a list of strings.
fn take_list(
    map: &mut Map<String, Value>,
    key: &str,
) -> serde_json::Result<Option<Vec<String>>> {
    map.remove(key)
        .map(serde_json::from_value::<Option<Vec<String>>>)
        .transpose()
        .map(Option::flatten)
}

impl CrossReference {
    /// True when the block carries no keys at all.
    ///
    /// A key with a `null` value is still a key.
    pub fn is_empty(&self) -> bool {
        self.key_count == 0
    }

    /// Brand names, empty when the key is absent or null.
    pub fn brand_names(&self) -> &[String] {
        self.brand_name.as_deref().unwrap_or_default()
    }

    /// Generic names, empty when the key is absent or null.
    pub fn generic_names(&self) -> &[String] {
        self.generic_name.as_deref().unwrap_or_default()
    }

    /// Manufacturer names, empty when the key is absent or null.
    pub fn manufacturer_names(&self) -> &[String] {
        self.manufacturer_name.as_deref().unwrap_or_default()
    }

    /// Package NDCs, empty when the key is absent or null.
    pub fn package_ndcs(&self) -> &[String] {
        self.package_ndc.as_deref().unwrap_or_default()
    }

    /// Product NDC at the given product position, if the list is that long.
    pub fn product_ndc_at(&self, idx: usize) -> Option<&str> {
        self.product_ndc
            .as_deref()
            .and_then(|ndcs| ndcs.get(idx))
            .map(String::as_str)
    }
}

/// A single marketed product inside an application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceProduct {
    /// Brand (commercial) name; half of a compound's identity
    #[serde(default)]
    pub brand_name: Option<String>,

    /// Route of administration, e.g. `ORAL`, `TOPICAL`
    #[serde(default)]
    pub route: Option<String>,

    /// Dosage form, e.g. `TABLET`, `CAPSULE`
    #[serde(default)]
    pub dosage_form: Option<String>,

    /// e.g. `Prescription`, `Over-the-counter`, `Discontinued`
    #[serde(default)]
    pub marketing_status: Option<String>,

    /// Therapeutic equivalence code, copied verbatim
    #[serde(default)]
    pub te_code: Option<String>,

    /// Reference listed drug flag (`Yes` / `No`)
    #[serde(default)]
    pub reference_drug: Option<String>,

    /// Reference standard flag (`Yes` / `No`)
    #[serde(default)]
    pub reference_standard: Option<String>,

    /// Ingredients in label order; order is significant for identity
    #[serde(default)]
    pub active_ingredients: Vec<ActiveIngredient>,
}

/// Marketing statuses for which no compound is ever produced.
pub const UNAVAILABLE_STATUSES: &[&str] = &["Discontinued", "None (Tentative Approval)"];

impl SourceProduct {
    /// Whether the product is off the market or only tentatively approved.
    pub fn is_unavailable(&self) -> bool {
        self.marketing_status
            .as_deref()
            .is_some_and(|status| UNAVAILABLE_STATUSES.contains(&status))
    }
}

/// An active ingredient as a (name, strength) pair.
///
/// Equality and hashing are structural so ingredient sequences can be used
/// directly as identity keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveIngredient {
    /// Substance name, e.g. `IBUPROFEN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Strength as printed on the label, e.g. `200MG`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
}
