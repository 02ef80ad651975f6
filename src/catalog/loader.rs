//! CSV catalog loading.
//!
//! The source dataset ships as Latin-1, so bytes that are not valid UTF-8 are
//! decoded one byte per code point. Loading is all-or-nothing: any malformed
//! row aborts the whole load.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::record::Record;
use super::CatalogError;

const COLUMN_COUNT: usize = 10;

/// Known columns and the header text they are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    CompanyName,
    ModelName,
    Ram,
    Processor,
    BatteryCapacity,
    ScreenSize,
    LaunchedPrice,
    Weight,
    FrontCamera,
    BackCamera,
}

impl Column {
    const ALL: [Column; COLUMN_COUNT] = [
        Column::CompanyName,
        Column::ModelName,
        Column::Ram,
        Column::Processor,
        Column::BatteryCapacity,
        Column::ScreenSize,
        Column::LaunchedPrice,
        Column::Weight,
        Column::FrontCamera,
        Column::BackCamera,
    ];

    fn header(self) -> &'static str {
        match self {
            Column::CompanyName => "Company Name",
            Column::ModelName => "Model Name",
            Column::Ram => "RAM",
            Column::Processor => "Processor",
            Column::BatteryCapacity => "Battery Capacity",
            Column::ScreenSize => "Screen Size",
            Column::LaunchedPrice => "Launched Price (India)",
            Column::Weight => "Mobile Weight",
            Column::FrontCamera => "Front Camera",
            Column::BackCamera => "Back Camera",
        }
    }
}

/// Column positions resolved from a header row.
struct ColumnMap {
    positions: [Option<usize>; COLUMN_COUNT],
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, CatalogError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let mut positions = [None; COLUMN_COUNT];
        for (slot, column) in positions.iter_mut().zip(Column::ALL) {
            *slot = normalized
                .iter()
                .position(|header| header.eq_ignore_ascii_case(column.header()));
        }

        let map = Self { positions };
        for required in [Column::CompanyName, Column::ModelName] {
            if map.position(required).is_none() {
                return Err(CatalogError::MissingColumn(required.header()));
            }
        }
        Ok(map)
    }

    fn position(&self, column: Column) -> Option<usize> {
        self.positions[column as usize]
    }

    fn get(&self, row: &StringRecord, column: Column) -> Option<String> {
        self.position(column)
            .and_then(|pos| row.get(pos))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// Strips surrounding whitespace and any leading non-alphanumeric noise
/// (back-ticks, BOM, quotes) from a header cell.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim()
        .to_string()
}

/// UTF-8 when valid, otherwise Latin-1.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

pub fn load_catalog(path: &Path) -> Result<Vec<Record>, CatalogError> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_catalog(&decode_text(&bytes))?;
    tracing::info!(
        "Loaded {} catalog records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

pub fn parse_catalog(text: &str) -> Result<Vec<Record>, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1.
        let line = index + 2;
        let company_name = columns
            .get(&row, Column::CompanyName)
            .ok_or(CatalogError::MissingIdentity { line })?;
        let model_name = columns
            .get(&row, Column::ModelName)
            .ok_or(CatalogError::MissingIdentity { line })?;

        records.push(Record {
            company_name,
            model_name,
            ram: columns.get(&row, Column::Ram),
            processor: columns.get(&row, Column::Processor),
            battery_capacity: columns.get(&row, Column::BatteryCapacity),
            screen_size: columns.get(&row, Column::ScreenSize),
            launched_price: columns.get(&row, Column::LaunchedPrice),
            weight: columns.get(&row, Column::Weight),
            front_camera: columns.get(&row, Column::FrontCamera),
            back_camera: columns.get(&row, Column::BackCamera),
        });
    }

    Ok(records)
}
