use serde::Serialize;

/// Rendered wherever a catalog cell is empty or the column is absent.
pub const MISSING_VALUE: &str = "N/A";

/// One row of the product catalog. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub company_name: String,
    pub model_name: String,
    pub ram: Option<String>,
    pub processor: Option<String>,
    pub battery_capacity: Option<String>,
    pub screen_size: Option<String>,
    pub launched_price: Option<String>,
    pub weight: Option<String>,
    pub front_camera: Option<String>,
    pub back_camera: Option<String>,
}

impl Record {
    /// `"<company> <model>"`, the name shown to users.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.company_name, self.model_name)
    }

    pub fn product_id(&self) -> String {
        product_id(&self.display_name())
    }

    pub fn field(&self, field: SpecField) -> Option<&str> {
        let value = match field {
            SpecField::Ram => &self.ram,
            SpecField::Processor => &self.processor,
            SpecField::BatteryCapacity => &self.battery_capacity,
            SpecField::ScreenSize => &self.screen_size,
            SpecField::Price => &self.launched_price,
            SpecField::Weight => &self.weight,
            SpecField::FrontCamera => &self.front_camera,
            SpecField::BackCamera => &self.back_camera,
        };
        value.as_deref()
    }

    pub fn field_or_missing(&self, field: SpecField) -> &str {
        self.field(field).unwrap_or(MISSING_VALUE)
    }
}

/// Attributes offered for side-by-side comparison, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecField {
    Ram,
    Processor,
    BatteryCapacity,
    ScreenSize,
    Price,
    Weight,
    FrontCamera,
    BackCamera,
}

impl SpecField {
    pub const ALL: [SpecField; 8] = [
        SpecField::Ram,
        SpecField::Processor,
        SpecField::BatteryCapacity,
        SpecField::ScreenSize,
        SpecField::Price,
        SpecField::Weight,
        SpecField::FrontCamera,
        SpecField::BackCamera,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpecField::Ram => "RAM",
            SpecField::Processor => "Processor",
            SpecField::BatteryCapacity => "Battery Capacity",
            SpecField::ScreenSize => "Screen Size",
            SpecField::Price => "Price",
            SpecField::Weight => "Weight",
            SpecField::FrontCamera => "Front Camera",
            SpecField::BackCamera => "Back Camera",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label))
    }
}

/// Identity key: lowercase with spaces turned into hyphens.
pub fn product_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Inverse-ish of [`product_id`]: hyphens become spaces and the result is
/// title-cased. Casing inside words is not recoverable, so
/// `apple-iphone-16-128gb` becomes `Apple Iphone 16 128Gb`.
pub fn display_name_from_id(id: &str) -> String {
    title_case(&id.replace('-', " "))
}

/// Uppercases the first letter of every run of letters and lowercases the
/// rest, so a letter following a digit or punctuation starts a new word.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(ch);
            previous_is_letter = false;
        }
    }
    result
}
