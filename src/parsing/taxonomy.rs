use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::core::record::TaxonRecord;
use crate::core::schema::{AuthoritySchema, SCIENTIFIC_NAME_COLUMN};
use crate::core::types::{NameType, Rank};
use crate::utils::validation::{check_record_limit, clean_cell};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: {0}")]
    TooManyRecords(usize),
}

/// Records parsed from one reference table, plus the name types its columns cover
#[derive(Debug)]
pub struct ParsedTable {
    pub records: Vec<TaxonRecord>,
    /// Name types both declared by the schema and present as columns
    pub name_types: Vec<NameType>,
}

/// Parse an ingestion output file for the given authority
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_taxonomy_file(path: &Path, schema: &AuthoritySchema) -> Result<ParsedTable, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_taxonomy_text(&content, schema)
}

/// Parse ingestion output text (CSV with a header row) for the given authority.
///
/// Columns the schema doesn't know are ignored. Schema columns missing from the
/// header make that name type unsupported for this table. Rows with an empty
/// scientific name are skipped; a repeated scientific name keeps the first row.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the `scientific_name` column is missing
/// or no records are found, `ParseError::Csv` for malformed rows, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_taxonomy_text(text: &str, schema: &AuthoritySchema) -> Result<ParsedTable, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let position = |col: &str| headers.iter().position(|h| h == col);

    let sci_idx = position(SCIENTIFIC_NAME_COLUMN).ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "Missing '{SCIENTIFIC_NAME_COLUMN}' column for {}",
            schema.authority
        ))
    })?;

    // (name type, column index) for every supported column present in the file
    let columns: Vec<(NameType, usize)> = schema
        .name_types()
        .into_iter()
        .filter(|nt| *nt != NameType::ScientificName)
        .filter_map(|nt| schema.column(nt).and_then(position).map(|idx| (nt, idx)))
        .collect();
    let rank_idx = schema.rank_column.and_then(position);

    let mut name_types = vec![NameType::ScientificName];
    name_types.extend(columns.iter().map(|(nt, _)| *nt));
    // Genus is derived from the scientific name when the column is absent
    if !name_types.contains(&NameType::Genus) {
        name_types.push(NameType::Genus);
    }
    name_types.sort();

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1
        let line_num = i + 2;

        let Some(scientific_name) = row.get(sci_idx).and_then(clean_cell) else {
            tracing::debug!(line = line_num, "skipping row without scientific name");
            continue;
        };

        if !seen.insert(scientific_name.clone()) {
            tracing::warn!(
                authority = %schema.authority,
                line = line_num,
                "duplicate scientific name '{scientific_name}', keeping first row"
            );
            continue;
        }

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let mut record = TaxonRecord::new(scientific_name);
        for &(name_type, idx) in &columns {
            let value = row.get(idx).and_then(clean_cell);
            if name_type == NameType::Genus && value.is_none() {
                continue;
            }
            record.set(name_type, value);
        }
        if let Some(rank) = rank_idx.and_then(|idx| row.get(idx)).and_then(clean_cell) {
            record.rank = Rank::parse(&rank);
        }

        records.push(record);
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "No records found for {}",
            schema.authority
        )));
    }

    Ok(ParsedTable {
        records,
        name_types,
    })
}
