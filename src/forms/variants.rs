use std::collections::{HashMap, HashSet};
use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{StringRecord, Trim};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::attribute::AttributeType;
use crate::domain::pricing::PriceTriple;
use crate::domain::variant::{AttributeOption, VariantDetails};
use crate::forms::{parse_flag, parse_price_cents, sanitize_inline_text, sanitize_sku};

/// Nesting depth of `variants[i][options][j][field]`.
const QUERY_MAX_DEPTH: usize = 5;

const SKU_MAX_LEN: usize = 64;

/// Columns every uploaded variants CSV has to provide.
const REQUIRED_COLUMNS: [&str; 5] = ["sku", "min_qty", "min_price", "avg_price", "max_price"];
const OPTIONAL_COLUMNS: [&str; 3] = ["og_price", "is_available", "image_url"];

pub type VariantFormResult<T> = Result<T, VariantFormError>;

/// Errors raised while turning submitted variants into domain values.
///
/// `row` is the 1-based position of the variant in the submission; for CSV uploads it
/// is the line number, header included.
#[derive(Debug, Error)]
pub enum VariantFormError {
    #[error("malformed variants payload: {0}")]
    Payload(String),
    #[error("row {row}: SKU is required")]
    EmptySku { row: usize },
    #[error("row {row}: SKU `{sku}` is longer than 64 characters")]
    SkuTooLong { row: usize, sku: String },
    #[error("row {row}: invalid minimum quantity `{value}`")]
    InvalidQuantity { row: usize, value: String },
    #[error("row {row}: invalid {field} `{value}`")]
    InvalidPrice {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("row {row}: invalid availability flag `{value}`")]
    InvalidFlag { row: usize, value: String },
    #[error("row {row}: attribute {attribute_type_id} does not belong to this category")]
    UnknownAttributeType { row: usize, attribute_type_id: i32 },
    #[error("row {row}: attribute {attribute_type_id} is set more than once")]
    RepeatedAttributeType { row: usize, attribute_type_id: i32 },
    #[error("upload is missing the `{0}` column")]
    MissingColumn(&'static str),
    #[error("column `{0}` is neither a variant field nor an attribute of this category")]
    UnknownColumn(String),
    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One attribute selection as submitted by the variant editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantOptionInput {
    pub attribute_type_id: i32,
    /// Empty means "not set" and is skipped.
    #[serde(default)]
    pub value: String,
}

/// One variant row as submitted by the variant editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantInput {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub min_qty: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub avg_price: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub og_price: String,
    /// Checkbox; absent when unchecked.
    #[serde(default)]
    pub is_available: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub options: Vec<VariantOptionInput>,
}

/// Full variant list of one product, submitted as nested form fields
/// (`variants[0][sku]=...&variants[0][options][0][value]=...`).
#[derive(Debug, Default, Deserialize)]
pub struct SaveVariantsForm {
    #[serde(default)]
    pub variants: Vec<VariantInput>,
}

impl SaveVariantsForm {
    /// Decode an `application/x-www-form-urlencoded` body with nested keys.
    pub fn from_body(body: &str) -> VariantFormResult<Self> {
        serde_qs::Config::new(QUERY_MAX_DEPTH, false)
            .deserialize_str(body)
            .map_err(|err| VariantFormError::Payload(err.to_string()))
    }

    /// Validate every row against the attribute types of the product's category.
    pub fn into_variant_details(
        self,
        attribute_types: &[AttributeType],
    ) -> VariantFormResult<Vec<VariantDetails>> {
        let allowed: HashSet<i32> = attribute_types.iter().map(|item| item.id).collect();

        self.variants
            .iter()
            .enumerate()
            .map(|(index, input)| {
                let raw = RawVariant {
                    row: index + 1,
                    sku: &input.sku,
                    min_qty: &input.min_qty,
                    min_price: &input.min_price,
                    avg_price: &input.avg_price,
                    max_price: &input.max_price,
                    og_price: &input.og_price,
                    is_available: input.is_available.as_deref().unwrap_or("off"),
                    image_url: &input.image_url,
                    options: input
                        .options
                        .iter()
                        .map(|option| (option.attribute_type_id, option.value.as_str()))
                        .collect(),
                };
                build_variant(raw, &allowed)
            })
            .collect()
    }
}

#[derive(MultipartForm)]
/// Multipart form for uploading the variants of one product as CSV.
pub struct UploadVariantsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadVariantsForm {
    /// Parse the uploaded CSV; attribute columns are matched to `attribute_types` by name.
    pub fn parse(
        &mut self,
        attribute_types: &[AttributeType],
    ) -> VariantFormResult<Vec<VariantDetails>> {
        self.csv.file.rewind()?;
        parse_variants_csv(self.csv.file.by_ref(), attribute_types)
    }
}

struct RawVariant<'a> {
    row: usize,
    sku: &'a str,
    min_qty: &'a str,
    min_price: &'a str,
    avg_price: &'a str,
    max_price: &'a str,
    og_price: &'a str,
    is_available: &'a str,
    image_url: &'a str,
    options: Vec<(i32, &'a str)>,
}

fn build_variant(raw: RawVariant<'_>, allowed: &HashSet<i32>) -> VariantFormResult<VariantDetails> {
    let row = raw.row;

    let sku = sanitize_sku(raw.sku);
    if sku.is_empty() {
        return Err(VariantFormError::EmptySku { row });
    }
    if sku.chars().count() > SKU_MAX_LEN {
        return Err(VariantFormError::SkuTooLong { row, sku });
    }

    let min_qty = match raw.min_qty.trim().parse::<i32>() {
        Ok(value) if value > 0 => value,
        _ => {
            return Err(VariantFormError::InvalidQuantity {
                row,
                value: raw.min_qty.trim().to_string(),
            });
        }
    };

    let price = |field: &'static str, value: &str| {
        parse_price_cents(value).ok_or_else(|| VariantFormError::InvalidPrice {
            row,
            field,
            value: value.trim().to_string(),
        })
    };

    let prices = PriceTriple {
        min_price_cents: price("min price", raw.min_price)?,
        avg_price_cents: price("avg price", raw.avg_price)?,
        max_price_cents: price("max price", raw.max_price)?,
    };

    let og_price_cents = if raw.og_price.trim().is_empty() {
        prices.max_price_cents
    } else {
        price("og price", raw.og_price)?
    };

    let is_available =
        parse_flag(raw.is_available, true).ok_or_else(|| VariantFormError::InvalidFlag {
            row,
            value: raw.is_available.trim().to_string(),
        })?;

    let image_url = Some(raw.image_url.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(raw.options.len());
    for (attribute_type_id, value) in raw.options {
        let value = sanitize_inline_text(value);
        if value.is_empty() {
            continue;
        }
        if !allowed.contains(&attribute_type_id) {
            return Err(VariantFormError::UnknownAttributeType {
                row,
                attribute_type_id,
            });
        }
        if !seen.insert(attribute_type_id) {
            return Err(VariantFormError::RepeatedAttributeType {
                row,
                attribute_type_id,
            });
        }
        options.push(AttributeOption::new(attribute_type_id, value));
    }

    Ok(VariantDetails {
        sku,
        min_qty,
        prices,
        og_price_cents,
        is_available,
        image_url,
        options,
    })
}

fn parse_variants_csv<R: Read>(
    reader: R,
    attribute_types: &[AttributeType],
) -> VariantFormResult<Vec<VariantDetails>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let layout = CsvLayout::locate(&headers, attribute_types)?;
    let allowed: HashSet<i32> = attribute_types.iter().map(|item| item.id).collect();

    let mut variants = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let raw = RawVariant {
            row: index + 2,
            sku: layout.cell(&record, "sku"),
            min_qty: layout.cell(&record, "min_qty"),
            min_price: layout.cell(&record, "min_price"),
            avg_price: layout.cell(&record, "avg_price"),
            max_price: layout.cell(&record, "max_price"),
            og_price: layout.cell(&record, "og_price"),
            is_available: layout.cell(&record, "is_available"),
            image_url: layout.cell(&record, "image_url"),
            options: layout
                .attributes
                .iter()
                .map(|(position, attribute_type_id)| {
                    (*attribute_type_id, record.get(*position).unwrap_or(""))
                })
                .collect(),
        };

        variants.push(build_variant(raw, &allowed)?);
    }

    Ok(variants)
}

struct CsvLayout {
    /// Variant field name to column position.
    fields: HashMap<&'static str, usize>,
    /// Column position and attribute type id of every attribute column.
    attributes: Vec<(usize, i32)>,
}

impl CsvLayout {
    fn locate(
        headers: &StringRecord,
        attribute_types: &[AttributeType],
    ) -> VariantFormResult<Self> {
        let mut fields = HashMap::new();
        let mut attributes = Vec::new();

        for (position, header) in headers.iter().enumerate() {
            let header = header.trim();
            if header.is_empty() {
                continue;
            }

            if let Some(field) = REQUIRED_COLUMNS
                .iter()
                .chain(OPTIONAL_COLUMNS.iter())
                .find(|column| header.eq_ignore_ascii_case(column))
            {
                fields.insert(*field, position);
                continue;
            }

            match attribute_types
                .iter()
                .find(|item| item.name.eq_ignore_ascii_case(header))
            {
                Some(attribute_type) => attributes.push((position, attribute_type.id)),
                None => return Err(VariantFormError::UnknownColumn(header.to_string())),
            }
        }

        for column in REQUIRED_COLUMNS {
            if !fields.contains_key(column) {
                return Err(VariantFormError::MissingColumn(column));
            }
        }

        Ok(Self { fields, attributes })
    }

    fn cell<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.fields
            .get(column)
            .and_then(|position| record.get(*position))
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Seek, SeekFrom, Write};

    use chrono::NaiveDateTime;
    use tempfile::NamedTempFile;

    fn attribute_type(id: i32, name: &str) -> AttributeType {
        AttributeType {
            id,
            hub_id: 1,
            category_id: 1,
            name: name.to_string(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn attribute_types() -> Vec<AttributeType> {
        vec![attribute_type(3, "Paper Weight"), attribute_type(4, "Finish")]
    }

    #[test]
    fn nested_body_is_decoded() {
        let body = "variants[0][sku]=BC-350&variants[0][min_qty]=1000\
            &variants[0][min_price]=53.79&variants[0][avg_price]=60&variants[0][max_price]=65\
            &variants[0][is_available]=on\
            &variants[0][options][0][attribute_type_id]=3&variants[0][options][0][value]=350%20GSM\
            &variants[0][options][1][attribute_type_id]=4&variants[0][options][1][value]=\
            &variants[1][sku]=BC-400&variants[1][min_qty]=500\
            &variants[1][min_price]=1&variants[1][avg_price]=2&variants[1][max_price]=3";

        let form = SaveVariantsForm::from_body(body).expect("expected body to decode");
        assert_eq!(form.variants.len(), 2);

        let variants = form
            .into_variant_details(&attribute_types())
            .expect("expected valid variants");

        assert_eq!(variants[0].sku, "BC-350");
        assert_eq!(variants[0].min_qty, 1000);
        assert_eq!(variants[0].prices.min_price_cents, 5379);
        assert_eq!(variants[0].og_price_cents, 6500);
        assert!(variants[0].is_available);
        assert_eq!(variants[0].options, vec![AttributeOption::new(3, "350 GSM")]);

        assert_eq!(variants[1].sku, "BC-400");
        assert!(!variants[1].is_available);
        assert!(variants[1].options.is_empty());
    }

    #[test]
    fn empty_body_has_no_variants() {
        let form = SaveVariantsForm::from_body("").expect("expected empty form");
        assert!(form.variants.is_empty());
    }

    #[test]
    fn option_outside_category_is_rejected() {
        let form = SaveVariantsForm {
            variants: vec![VariantInput {
                sku: "A".into(),
                min_qty: "1".into(),
                min_price: "1".into(),
                avg_price: "1".into(),
                max_price: "1".into(),
                options: vec![VariantOptionInput {
                    attribute_type_id: 99,
                    value: "Red".into(),
                }],
                ..Default::default()
            }],
        };

        assert!(matches!(
            form.into_variant_details(&attribute_types()),
            Err(VariantFormError::UnknownAttributeType {
                row: 1,
                attribute_type_id: 99
            })
        ));
    }

    #[test]
    fn repeated_attribute_type_is_rejected() {
        let form = SaveVariantsForm {
            variants: vec![VariantInput {
                sku: "A".into(),
                min_qty: "1".into(),
                min_price: "1".into(),
                avg_price: "1".into(),
                max_price: "1".into(),
                options: vec![
                    VariantOptionInput {
                        attribute_type_id: 3,
                        value: "300 GSM".into(),
                    },
                    VariantOptionInput {
                        attribute_type_id: 3,
                        value: "350 GSM".into(),
                    },
                ],
                ..Default::default()
            }],
        };

        assert!(matches!(
            form.into_variant_details(&attribute_types()),
            Err(VariantFormError::RepeatedAttributeType { row: 1, .. })
        ));
    }

    #[test]
    fn missing_sku_reports_row() {
        let form = SaveVariantsForm {
            variants: vec![VariantInput::default()],
        };

        assert!(matches!(
            form.into_variant_details(&attribute_types()),
            Err(VariantFormError::EmptySku { row: 1 })
        ));
    }

    #[test]
    fn csv_maps_attribute_columns_by_name() {
        let csv = "sku,min_qty,min_price,avg_price,max_price,og_price,is_available,image_url,paper weight,Finish\n\
                   BC-350,1000,53.79,60,65,70,,https://cdn.example.com/a.png,350 GSM,Matte\n\
                   ,,,,,,,,,\n\
                   BC-400,1000,55,61,66,,no,,400 GSM,\n";

        let variants =
            parse_variants_csv(Cursor::new(csv), &attribute_types()).expect("expected success");

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].og_price_cents, 7000);
        assert!(variants[0].is_available);
        assert_eq!(
            variants[0].image_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(
            variants[0].options,
            vec![
                AttributeOption::new(3, "350 GSM"),
                AttributeOption::new(4, "Matte")
            ]
        );
        assert!(!variants[1].is_available);
        assert_eq!(variants[1].og_price_cents, 6600);
        assert_eq!(variants[1].options, vec![AttributeOption::new(3, "400 GSM")]);
    }

    #[test]
    fn csv_requires_price_columns() {
        let csv = "sku,min_qty,min_price,avg_price\nA,1,1,1\n";

        assert!(matches!(
            parse_variants_csv(Cursor::new(csv), &attribute_types()),
            Err(VariantFormError::MissingColumn("max_price"))
        ));
    }

    #[test]
    fn csv_rejects_unknown_columns() {
        let csv = "sku,min_qty,min_price,avg_price,max_price,Color\nA,1,1,1,1,Red\n";

        assert!(matches!(
            parse_variants_csv(Cursor::new(csv), &attribute_types()),
            Err(VariantFormError::UnknownColumn(column)) if column == "Color"
        ));
    }

    #[test]
    fn csv_reports_line_number_of_bad_row() {
        let csv = "sku,min_qty,min_price,avg_price,max_price\nA,1,1,1,1\nB,zero,1,1,1\n";

        assert!(matches!(
            parse_variants_csv(Cursor::new(csv), &attribute_types()),
            Err(VariantFormError::InvalidQuantity { row: 3, .. })
        ));
    }

    #[test]
    fn upload_form_rewinds_before_parsing() {
        let csv = "sku,min_qty,min_price,avg_price,max_price\nA,1,1,2,3\n";
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(csv.as_bytes()).expect("write csv file");
        file.as_file_mut()
            .seek(SeekFrom::End(0))
            .expect("seek to end");

        let mut form = UploadVariantsForm {
            csv: TempFile {
                file,
                content_type: None,
                file_name: Some("variants.csv".to_string()),
                size: csv.len(),
            },
        };

        let variants = form.parse(&attribute_types()).expect("expected success");

        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].prices.max_price_cents, 300);
    }
}
