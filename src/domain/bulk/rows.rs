//! Parsed CSV rows and their per-row validation.

use serde::{Deserialize, Serialize};

use crate::domain::directory::validate_email;

use super::RowError;

/// One row of the user bulk-upload format
/// (columns: Name, Email, Username, Industry, Client Name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUploadRow {
    /// 1-based line number in the uploaded file.
    pub line: usize,
    pub name: String,
    pub email: String,
    pub username: String,
    /// Optional industry override; blank means "use the client's".
    pub industry: Option<String>,
    pub client_name: String,
}

impl UserUploadRow {
    /// Validate this row, appending one error per problem.
    pub fn validate_into(&self, errors: &mut Vec<RowError>) {
        if self.name.trim().is_empty() {
            errors.push(RowError::new(self.line, "Name cannot be empty"));
        }
        if self.username.trim().is_empty() {
            errors.push(RowError::new(self.line, "Username cannot be empty"));
        }
        if self.email.trim().is_empty() {
            errors.push(RowError::new(self.line, "Email cannot be empty"));
        } else if let Err(e) = validate_email(&self.email.trim().to_lowercase()) {
            errors.push(RowError::new(self.line, e.to_string()));
        }
        if self.client_name.trim().is_empty() {
            errors.push(RowError::new(self.line, "Client Name cannot be empty"));
        }
    }
}

/// One row of the group bulk-upload format
/// (columns: Name, Description, Client Name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUploadRow {
    /// 1-based line number in the uploaded file.
    pub line: usize,
    pub name: String,
    pub description: Option<String>,
    pub client_name: String,
}

impl GroupUploadRow {
    /// Validate this row, appending one error per problem.
    pub fn validate_into(&self, errors: &mut Vec<RowError>) {
        if self.name.trim().is_empty() {
            errors.push(RowError::new(self.line, "Name cannot be empty"));
        }
        if self.client_name.trim().is_empty() {
            errors.push(RowError::new(self.line, "Client Name cannot be empty"));
        }
    }
}
