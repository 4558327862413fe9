use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::pricing::PriceTriple;

/// Errors raised while reconciling variant collections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    /// The same SKU appears more than once in one collection.
    #[error("duplicate SKU `{sku}`")]
    DuplicateSku { sku: String },
}

/// A concrete value selected along one attribute type axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeOption {
    /// Identifier of the attribute type this value belongs to.
    pub attribute_type_id: i32,
    /// Display value, for example `170 GSM`.
    pub value: String,
}

impl AttributeOption {
    pub fn new(attribute_type_id: i32, value: impl Into<String>) -> Self {
        Self {
            attribute_type_id,
            value: value.into(),
        }
    }
}

/// Comparable content of a variant: everything except storage identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDetails {
    /// Stock keeping unit, the sole identity of a variant.
    pub sku: String,
    /// Quantity the stored prices are quoted for.
    pub min_qty: i32,
    /// Tiered prices for `min_qty` units.
    pub prices: PriceTriple,
    /// Reference (list) price shown crossed out in the storefront.
    pub og_price_cents: i64,
    /// Whether the variant can currently be ordered.
    pub is_available: bool,
    /// Optional preview image.
    pub image_url: Option<String>,
    /// Attribute selections, one per relevant attribute type.
    pub options: Vec<AttributeOption>,
}

/// Variant persisted for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Unique identifier of the variant row.
    pub id: i32,
    /// Identifier of the owning product.
    pub product_id: i32,
    /// Variant content.
    #[serde(flatten)]
    pub details: VariantDetails,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ProductVariant {
    pub fn sku(&self) -> &str {
        &self.details.sku
    }
}

/// Three-way diff needed to bring stored variants in line with a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariantChangeSet {
    /// Variants whose SKU is not stored yet.
    pub created: Vec<VariantDetails>,
    /// Full replacements for stored variants whose content changed.
    pub updated: Vec<VariantDetails>,
    /// SKUs of stored variants missing from the submission.
    pub deleted: Vec<String>,
}

impl VariantChangeSet {
    /// True when applying the change-set would not touch storage.
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// Total number of operations in the change-set.
    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len()
    }
}

/// New SKUs of a product that variants of other products already use.
///
/// SKUs are unique across hubs, but only the ones owned inside the caller's
/// hub are named.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkuConflicts {
    /// Used by other products of the same hub.
    pub same_hub: Vec<String>,
    /// How many are used by products of other hubs.
    pub other_hubs: usize,
}

impl SkuConflicts {
    pub fn is_empty(&self) -> bool {
        self.same_hub.is_empty() && self.other_hubs == 0
    }
}

/// Distinct values observed for one attribute type across a set of variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeGroup {
    pub attribute_type_id: i32,
    pub values: Vec<String>,
}

/// Structural equality of two variants.
///
/// Scalar fields are compared by value; attribute options are compared as a
/// multiset of `(attribute_type_id, value)` pairs, so submission order does not
/// matter.
pub fn variants_equal(a: &VariantDetails, b: &VariantDetails) -> bool {
    if a.sku != b.sku
        || a.min_qty != b.min_qty
        || a.prices != b.prices
        || a.og_price_cents != b.og_price_cents
        || a.is_available != b.is_available
        || a.image_url != b.image_url
    {
        return false;
    }

    if a.options.len() != b.options.len() {
        return false;
    }

    sorted_options(&a.options) == sorted_options(&b.options)
}

fn sorted_options(options: &[AttributeOption]) -> Vec<&AttributeOption> {
    let mut sorted: Vec<&AttributeOption> = options.iter().collect();
    sorted.sort();
    sorted
}

/// Diff `incoming` against `existing` using the SKU as identity.
///
/// `created` and `updated` keep the order of `incoming`; `deleted` keeps the
/// order of `existing`. A SKU repeated inside either collection is rejected.
pub fn reconcile_variants<'a, E>(
    existing: E,
    incoming: &[VariantDetails],
) -> Result<VariantChangeSet, VariantError>
where
    E: IntoIterator<Item = &'a VariantDetails>,
{
    let mut existing_by_sku: HashMap<&str, &VariantDetails> = HashMap::new();
    let mut existing_order: Vec<&str> = Vec::new();
    for variant in existing {
        if existing_by_sku.insert(variant.sku.as_str(), variant).is_some() {
            return Err(VariantError::DuplicateSku {
                sku: variant.sku.clone(),
            });
        }
        existing_order.push(variant.sku.as_str());
    }

    let mut incoming_skus: HashSet<&str> = HashSet::with_capacity(incoming.len());
    let mut changes = VariantChangeSet::default();

    for variant in incoming {
        if !incoming_skus.insert(variant.sku.as_str()) {
            return Err(VariantError::DuplicateSku {
                sku: variant.sku.clone(),
            });
        }

        match existing_by_sku.get(variant.sku.as_str()) {
            None => changes.created.push(variant.clone()),
            Some(stored) if !variants_equal(stored, variant) => {
                changes.updated.push(variant.clone())
            }
            Some(_) => {}
        }
    }

    changes.deleted = existing_order
        .into_iter()
        .filter(|sku| !incoming_skus.contains(sku))
        .map(str::to_string)
        .collect();

    Ok(changes)
}

/// Group the attribute values used by `variants` per attribute type.
///
/// Groups appear in the order their type is first encountered; values inside a
/// group are distinct and keep first-encounter order.
pub fn extract_attributes<'a, I>(variants: I) -> Vec<AttributeGroup>
where
    I: IntoIterator<Item = &'a VariantDetails>,
{
    let mut groups: Vec<AttributeGroup> = Vec::new();
    let mut positions: HashMap<i32, usize> = HashMap::new();

    for variant in variants {
        for option in &variant.options {
            let index = *positions.entry(option.attribute_type_id).or_insert_with(|| {
                groups.push(AttributeGroup {
                    attribute_type_id: option.attribute_type_id,
                    values: Vec::new(),
                });
                groups.len() - 1
            });

            let group = &mut groups[index];
            if !group.values.iter().any(|value| value == &option.value) {
                group.values.push(option.value.clone());
            }
        }
    }

    groups
}

/// Storefront preselection: the first value of every group.
pub fn default_selection(groups: &[AttributeGroup]) -> Vec<AttributeOption> {
    groups
        .iter()
        .filter_map(|group| {
            group
                .values
                .first()
                .map(|value| AttributeOption::new(group.attribute_type_id, value.clone()))
        })
        .collect()
}

/// First variant whose options include every selected pair.
pub fn find_variant<'a>(
    variants: &'a [ProductVariant],
    selection: &[AttributeOption],
) -> Option<&'a ProductVariant> {
    variants.iter().find(|variant| {
        selection
            .iter()
            .all(|selected| variant.details.options.contains(selected))
    })
}
