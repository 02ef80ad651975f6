//! Side-by-side lookup of two catalog entries.

use serde::Serialize;

use super::record::{display_name_from_id, SpecField, MISSING_VALUE};
use super::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub specification: String,
    pub product_a_value: String,
    pub product_b_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub product_a_name: String,
    pub product_b_name: String,
    pub comparisons: Vec<ComparisonRow>,
}

/// Either product id had no catalog match. Names are derived from the ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductNotFound {
    pub product_a_name: String,
    pub product_b_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    All,
    Known(SpecField),
    /// Not a comparable attribute; compared as missing on both sides.
    Unknown(String),
}

impl FieldSelection {
    /// Empty or `"all"` selects every field.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return FieldSelection::All;
        };
        if raw.eq_ignore_ascii_case("all") {
            return FieldSelection::All;
        }
        match SpecField::from_label(raw) {
            Some(field) => FieldSelection::Known(field),
            None => FieldSelection::Unknown(raw.to_string()),
        }
    }
}

pub fn compare(
    catalog: &Catalog,
    product_a: &str,
    product_b: &str,
    selection: &FieldSelection,
) -> Result<Comparison, ProductNotFound> {
    let (Some(record_a), Some(record_b)) = (catalog.find(product_a), catalog.find(product_b))
    else {
        return Err(ProductNotFound {
            product_a_name: display_name_from_id(product_a.trim()),
            product_b_name: display_name_from_id(product_b.trim()),
        });
    };

    let comparisons = match selection {
        FieldSelection::All => SpecField::ALL
            .into_iter()
            .map(|field| ComparisonRow {
                specification: field.label().to_string(),
                product_a_value: record_a.field_or_missing(field).to_string(),
                product_b_value: record_b.field_or_missing(field).to_string(),
            })
            .collect(),
        FieldSelection::Known(field) => vec![ComparisonRow {
            specification: field.label().to_string(),
            product_a_value: record_a.field_or_missing(*field).to_string(),
            product_b_value: record_b.field_or_missing(*field).to_string(),
        }],
        FieldSelection::Unknown(name) => vec![ComparisonRow {
            specification: name.clone(),
            product_a_value: MISSING_VALUE.to_string(),
            product_b_value: MISSING_VALUE.to_string(),
        }],
    };

    Ok(Comparison {
        product_a_name: record_a.display_name(),
        product_b_name: record_b.display_name(),
        comparisons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Record;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Record {
                company_name: "Apple".to_string(),
                model_name: "iPhone 16 128GB".to_string(),
                ram: Some("8GB".to_string()),
                processor: Some("A18".to_string()),
                weight: Some("170g".to_string()),
                ..Default::default()
            },
            Record {
                company_name: "Google".to_string(),
                model_name: "Pixel 9".to_string(),
                ram: Some("12GB".to_string()),
                processor: Some("Tensor G4".to_string()),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn all_fields_in_display_order() {
        let result = compare(
            &catalog(),
            "apple-iphone-16-128gb",
            "google-pixel-9",
            &FieldSelection::All,
        )
        .expect("both exist");

        assert_eq!(result.product_a_name, "Apple iPhone 16 128GB");
        assert_eq!(result.product_b_name, "Google Pixel 9");
        let labels: Vec<&str> = result
            .comparisons
            .iter()
            .map(|row| row.specification.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "RAM",
                "Processor",
                "Battery Capacity",
                "Screen Size",
                "Price",
                "Weight",
                "Front Camera",
                "Back Camera"
            ]
        );
        assert_eq!(result.comparisons[5].product_a_value, "170g");
        assert_eq!(result.comparisons[5].product_b_value, "N/A");
    }

    #[test]
    fn swapping_products_swaps_values() {
        let catalog = catalog();
        let selection = FieldSelection::parse(Some("RAM"));
        let ab = compare(&catalog, "apple-iphone-16-128gb", "google-pixel-9", &selection)
            .expect("ab");
        let ba = compare(&catalog, "google-pixel-9", "apple-iphone-16-128gb", &selection)
            .expect("ba");

        assert_eq!(ab.comparisons.len(), 1);
        assert_eq!(ab.comparisons[0].product_a_value, ba.comparisons[0].product_b_value);
        assert_eq!(ab.comparisons[0].product_b_value, ba.comparisons[0].product_a_value);
        assert_eq!(ab.product_a_name, ba.product_b_name);
    }

    #[test]
    fn missing_product_yields_no_rows() {
        let err = compare(
            &catalog(),
            "apple-iphone-16-128gb",
            "nokia-3310",
            &FieldSelection::All,
        )
        .expect_err("nokia is absent");
        assert_eq!(err.product_a_name, "Apple Iphone 16 128Gb");
        assert_eq!(err.product_b_name, "Nokia 3310");
    }

    #[test]
    fn unknown_field_compares_as_missing() {
        let result = compare(
            &catalog(),
            "apple-iphone-16-128gb",
            "google-pixel-9",
            &FieldSelection::parse(Some("Refresh Rate")),
        )
        .expect("both exist");
        assert_eq!(
            result.comparisons,
            vec![ComparisonRow {
                specification: "Refresh Rate".to_string(),
                product_a_value: "N/A".to_string(),
                product_b_value: "N/A".to_string(),
            }]
        );
    }

    #[test]
    fn selection_parsing() {
        assert_eq!(FieldSelection::parse(None), FieldSelection::All);
        assert_eq!(FieldSelection::parse(Some("")), FieldSelection::All);
        assert_eq!(FieldSelection::parse(Some("ALL")), FieldSelection::All);
        assert_eq!(
            FieldSelection::parse(Some("screen size")),
            FieldSelection::Known(SpecField::ScreenSize)
        );
    }
}
