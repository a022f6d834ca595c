//! Natural-language descriptions for compound records.
//!
//! The output is three sentences joined by single spaces:
//!
//! ```text
//! ADVIL is a ORAL medication in TABLET form. It contains the following
//! ingredients: IBUPROFEN with a strength of 200mg. This drug is also
//! referred to generically as IBUPROFEN.
//! ```
//!
//! The generic-name sentence is left out entirely when the compound has no
//! generic names, with no trailing space. Absent source fields render as
//! empty text.

use drugsource::{ActiveIngredient, SourceProduct};

/// Build the description for `product`, given its already filtered generic names.
pub fn describe(product: &SourceProduct, generic_names: &[String]) -> String {
    let meta = format!(
        "{} is a {} medication in {} form.",
        text(&product.brand_name),
        text(&product.route),
        text(&product.dosage_form),
    );
    let mix = format!(
        "It contains the following ingredients: {}.",
        ingredient_clause(&product.active_ingredients)
    );

    let mut sentences = vec![meta, mix];
    if !generic_names.is_empty() {
        sentences.push(format!(
            "This drug is also referred to generically as {}.",
            english_list(generic_names)
        ));
    }
    sentences.join(" ")
}

/// "`<name>` with a strength of `<strength>`" per ingredient, comma separated.
fn ingredient_clause(ingredients: &[ActiveIngredient]) -> String {
    ingredients
        .iter()
        .map(|ingredient| {
            format!(
                "{} with a strength of {}",
                text(&ingredient.name),
                text(&ingredient.strength)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render names as an English list: `A`, `A and B`, `A, B, and C`.
pub fn english_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
