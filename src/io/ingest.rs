//! CSV ingest for the reference car table.
//!
//! Turns the cleaned car CSV into a `Catalog`. Only the columns the form needs
//! are read; the price and kilometre columns used for training are ignored.
//!
//! - **Strict schema** for the required columns (a missing column is fatal)
//! - **Row-level validation** (bad rows are skipped and reported, not fatal)
//! - **Deterministic** (source order is preserved for fuel types)

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::catalog::{Catalog, CatalogRow};
use crate::error::PriceError;

const REQUIRED_COLUMNS: [&str; 4] = ["name", "company", "year", "fuel_type"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the catalog plus what happened while building it.
#[derive(Debug, Clone)]
pub struct IngestedCatalog {
    pub catalog: Catalog,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load the reference CSV and derive the catalog from its valid rows.
pub fn load_catalog(path: &Path) -> Result<IngestedCatalog, PriceError> {
    let file = File::open(path).map_err(|e| {
        PriceError::DataUnavailable(format!("Failed to open '{}': {e}", path.display()))
    })?;

    let ingested = read_catalog(file).map_err(|e| match e {
        PriceError::DataUnavailable(msg) => {
            PriceError::DataUnavailable(format!("{}: {msg}", path.display()))
        }
        other => other,
    })?;

    tracing::info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_used = ingested.rows_used,
        companies = ingested.catalog.companies().len(),
        "loaded car catalog"
    );
    for err in &ingested.row_errors {
        tracing::warn!(line = err.line, "skipped catalog row: {}", err.message);
    }

    Ok(ingested)
}

/// Build a catalog from any CSV source.
pub fn read_catalog<R: std::io::Read>(source: R) -> Result<IngestedCatalog, PriceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| PriceError::DataUnavailable(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => rows.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = rows.len();
    if rows_used == 0 {
        return Err(PriceError::DataUnavailable(
            "No valid car rows found.".to_string(),
        ));
    }

    Ok(IngestedCatalog {
        catalog: Catalog::from_rows(rows),
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins if a header is repeated.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), PriceError> {
    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(PriceError::DataUnavailable(format!(
                "Missing required column: `{column}`"
            )));
        }
    }
    Ok(())
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<CatalogRow, String> {
    let model_name = get_required(record, header_map, "name")?.to_string();
    let company = get_required(record, header_map, "company")?.to_string();
    let year = parse_year(get_required(record, header_map, "year")?)?;
    let fuel_type = get_required(record, header_map, "fuel_type")?.to_string();

    Ok(CatalogRow {
        company,
        model_name,
        year,
        fuel_type,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_year(s: &str) -> Result<i32, String> {
    s.parse::<i32>()
        .map_err(|_| format!("Invalid year '{s}'. Expected a whole number."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CLEANED: &str = "\
,name,company,year,Price,kms_driven,fuel_type
0,Hyundai Santro Xing,Hyundai,2007,80000,45000,Petrol
1,Mahindra Jeep CL550,Mahindra,2006,425000,40,Diesel
2,Hyundai Grand i10,Hyundai,2014,325000,28000,Petrol
3,Ford EcoSport Titanium,Ford,2014,575000,36000,Diesel
4,Maruti Suzuki Swift,Maruti,2015,400000,30000,Petrol
5,Maruti Suzuki Swift,Maruti,2015,410000,31000,Petrol
6,Maruti Suzuki Alto,Maruti,2012,150000,52000,LPG
";

    #[test]
    fn reads_cleaned_table() {
        let ingested = read_catalog(CLEANED.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 7);
        assert_eq!(ingested.rows_used, 7);
        assert!(ingested.row_errors.is_empty());

        let catalog = ingested.catalog;
        assert_eq!(catalog.companies(), vec!["Ford", "Hyundai", "Mahindra", "Maruti"]);
        assert_eq!(
            catalog.models_for("Maruti"),
            vec!["Maruti Suzuki Alto", "Maruti Suzuki Swift"]
        );
        assert_eq!(catalog.fuel_types(), ["Petrol", "Diesel", "LPG"]);
        assert_eq!(catalog.years(), vec![2015, 2014, 2012, 2007, 2006]);
    }

    #[test]
    fn skips_bad_rows_with_line_numbers() {
        let csv = "\
name,company,year,fuel_type
Maruti Suzuki Swift,Maruti,2015,Petrol
Broken Car,,2015,Petrol
Tata Nano,Tata,twenty,Petrol
";
        let ingested = read_catalog(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_used, 1);
        let lines: Vec<usize> = ingested.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert!(ingested.row_errors[1].message.contains("twenty"));
    }

    #[test]
    fn header_is_case_insensitive_and_bom_tolerant() {
        let csv = "\u{feff}Name,COMPANY,Year,Fuel_Type\nTata Nano,Tata,2011,Petrol\n";
        let ingested = read_catalog(csv.as_bytes()).unwrap();
        assert_eq!(ingested.catalog.companies(), vec!["Tata"]);
    }

    #[test]
    fn missing_column_is_data_unavailable() {
        let csv = "name,company,year\nTata Nano,Tata,2011\n";
        let err = read_catalog(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PriceError::DataUnavailable(m) if m.contains("fuel_type")));
    }

    #[test]
    fn no_usable_rows_is_data_unavailable() {
        let csv = "name,company,year,fuel_type\n,,,\n";
        assert!(matches!(
            read_catalog(csv.as_bytes()),
            Err(PriceError::DataUnavailable(_))
        ));
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_car_data.csv");
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, PriceError::DataUnavailable(m) if m.contains("cleaned_car_data.csv")));
    }

    #[test]
    fn load_catalog_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(CLEANED.as_bytes()).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.models_for("Ford"), vec!["Ford EcoSport Titanium"]);
    }
}
