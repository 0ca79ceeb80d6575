//! CSV parsers for the two bulk-upload formats.
//!
//! Header-based column detection with case-insensitive matching: columns
//! may appear in any order and extra columns are ignored. A header
//! missing required columns fails immediately, listing every missing
//! name; row values are handed to the domain for validation so all row
//! errors come back together.

use crate::domain::bulk::{BulkError, GroupUploadRow, UserUploadRow};

/// Required columns of the user upload format.
const USER_COLUMNS: [&str; 5] = ["Name", "Email", "Username", "Industry", "Client Name"];

/// Required columns of the group upload format.
const GROUP_COLUMNS: [&str; 3] = ["Name", "Description", "Client Name"];

/// Resolved header: canonical column name -> record index.
struct HeaderMap {
    indices: Vec<usize>,
}

impl HeaderMap {
    /// Matches required columns against the header, case-insensitively.
    fn resolve(headers: &csv::StringRecord, required: &[&str]) -> Result<Self, BulkError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut indices = Vec::with_capacity(required.len());
        let mut missing = Vec::new();
        for column in required {
            match normalized.iter().position(|h| h == &column.to_lowercase()) {
                Some(index) => indices.push(index),
                None => missing.push(column.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(BulkError::MissingColumns(missing));
        }
        Ok(Self { indices })
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, column: usize) -> &'r str {
        record.get(self.indices[column]).unwrap_or("").trim()
    }
}

/// Parse the user bulk-upload format
/// (columns: Name, Email, Username, Industry, Client Name).
pub fn parse_user_csv(input: &str) -> Result<Vec<UserUploadRow>, BulkError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| BulkError::Malformed(e.to_string()))?
        .clone();
    let header_map = HeaderMap::resolve(&headers, &USER_COLUMNS)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| BulkError::Malformed(e.to_string()))?;
        // Header is line 1; first record is line 2.
        let line = index + 2;
        let industry = header_map.get(&record, 3);
        rows.push(UserUploadRow {
            line,
            name: header_map.get(&record, 0).to_string(),
            email: header_map.get(&record, 1).to_string(),
            username: header_map.get(&record, 2).to_string(),
            industry: (!industry.is_empty()).then(|| industry.to_string()),
            client_name: header_map.get(&record, 4).to_string(),
        });
    }
    Ok(rows)
}

/// Parse the group bulk-upload format
/// (columns: Name, Description, Client Name).
pub fn parse_group_csv(input: &str) -> Result<Vec<GroupUploadRow>, BulkError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| BulkError::Malformed(e.to_string()))?
        .clone();
    let header_map = HeaderMap::resolve(&headers, &GROUP_COLUMNS)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| BulkError::Malformed(e.to_string()))?;
        let line = index + 2;
        let description = header_map.get(&record, 1);
        rows.push(GroupUploadRow {
            line,
            name: header_map.get(&record, 0).to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            client_name: header_map.get(&record, 2).to_string(),
        });
    }
    Ok(rows)
}
