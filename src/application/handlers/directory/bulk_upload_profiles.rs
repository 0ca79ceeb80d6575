//! BulkUploadProfilesHandler - all-or-nothing CSV import of profiles.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::bulk::{BulkError, RowError, UserUploadRow};
use crate::domain::directory::Profile;
use crate::domain::foundation::DomainError;
use crate::ports::{ClientRepository, ProfileRepository};

/// Command carrying the parsed rows of one user upload.
#[derive(Debug, Clone)]
pub struct BulkUploadProfilesCommand {
    pub rows: Vec<UserUploadRow>,
}

/// Result of a successful bulk upload.
#[derive(Debug, Clone)]
pub struct BulkUploadProfilesResult {
    pub created: usize,
}

/// Outcome of a bulk upload attempt.
#[derive(Debug)]
pub enum BulkUploadProfilesError {
    /// Row-level validation failures; nothing was persisted.
    Invalid(BulkError),
    /// Infrastructure failure.
    Internal(DomainError),
}

/// Handler importing a validated batch of profiles.
///
/// Every row is validated first (field checks plus client-name
/// resolution); any error rejects the whole batch with the full error
/// list, and persistence happens in a single transaction.
pub struct BulkUploadProfilesHandler {
    clients: Arc<dyn ClientRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl BulkUploadProfilesHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { clients, profiles }
    }

    pub async fn handle(
        &self,
        cmd: BulkUploadProfilesCommand,
    ) -> Result<BulkUploadProfilesResult, BulkUploadProfilesError> {
        let mut errors: Vec<RowError> = Vec::new();
        for row in &cmd.rows {
            row.validate_into(&mut errors);
        }

        // Resolve client names once per distinct name.
        let mut clients_by_name = HashMap::new();
        for row in &cmd.rows {
            let name = row.client_name.trim().to_lowercase();
            if name.is_empty() || clients_by_name.contains_key(&name) {
                continue;
            }
            let client = self
                .clients
                .find_by_name(row.client_name.trim())
                .await
                .map_err(BulkUploadProfilesError::Internal)?;
            clients_by_name.insert(name, client);
        }

        let mut profiles = Vec::with_capacity(cmd.rows.len());
        for row in &cmd.rows {
            let key = row.client_name.trim().to_lowercase();
            match clients_by_name.get(&key) {
                Some(Some(client)) => {
                    match Profile::new(
                        client.id,
                        row.name.trim(),
                        row.email.trim(),
                        row.username.trim(),
                        row.industry.clone(),
                    ) {
                        Ok(profile) => profiles.push(profile),
                        Err(e) => errors.push(RowError::new(row.line, e.to_string())),
                    }
                }
                Some(None) => errors.push(RowError::new(
                    row.line,
                    format!("Unknown client name: '{}'", row.client_name.trim()),
                )),
                // Empty client name was already reported by row validation.
                None => {}
            }
        }

        if !errors.is_empty() {
            errors.sort_by_key(|e| e.line);
            return Err(BulkUploadProfilesError::Invalid(BulkError::Rows(errors)));
        }

        let created = profiles.len();
        self.profiles
            .save_all(&profiles)
            .await
            .map_err(BulkUploadProfilesError::Internal)?;

        tracing::info!(created, "Bulk profile upload persisted");
        Ok(BulkUploadProfilesResult { created })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::Client;
    use crate::domain::foundation::{ClientId, ErrorCode, ProfileId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockClientRepository {
        clients: Vec<Client>,
    }

    impl MockClientRepository {
        fn with_client(name: &str) -> Self {
            Self {
                clients: vec![Client::new(name, "technology").unwrap()],
            }
        }
    }

    #[async_trait]
    impl ClientRepository for MockClientRepository {
        async fn save(&self, _client: &Client) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update(&self, _client: &Client) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
            Ok(self.clients.iter().find(|c| c.id == *id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Client>, DomainError> {
            Ok(self
                .clients
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
                .cloned())
        }

        async fn list_all(&self) -> Result<Vec<Client>, DomainError> {
            Ok(self.clients.clone())
        }

        async fn delete(&self, _id: &ClientId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockProfileRepository {
        saved: Mutex<Vec<Profile>>,
        fail_save: bool,
    }

    impl MockProfileRepository {
        fn new() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn saved(&self) -> Vec<Profile> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
            self.save_all(std::slice::from_ref(profile)).await
        }

        async fn save_all(&self, profiles: &[Profile]) -> Result<(), DomainError> {
            if self.fail_save {
                return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated failure"));
            }
            self.saved.lock().unwrap().extend_from_slice(profiles);
            Ok(())
        }

        async fn update(&self, _profile: &Profile) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &ProfileId) -> Result<Option<Profile>, DomainError> {
            Ok(None)
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<Profile>, DomainError> {
            Ok(None)
        }

        async fn list_by_client(
            &self,
            _client_id: &ClientId,
        ) -> Result<Vec<Profile>, DomainError> {
            Ok(vec![])
        }

        async fn delete(&self, _id: &ProfileId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn row(line: usize, name: &str, email: &str, client: &str) -> UserUploadRow {
        UserUploadRow {
            line,
            name: name.to_string(),
            email: email.to_string(),
            username: format!("user{}", line),
            industry: None,
            client_name: client.to_string(),
        }
    }

    fn handler(
        clients: Arc<MockClientRepository>,
        profiles: Arc<MockProfileRepository>,
    ) -> BulkUploadProfilesHandler {
        BulkUploadProfilesHandler::new(clients, profiles)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn imports_valid_rows() {
        let clients = Arc::new(MockClientRepository::with_client("Acme Corp"));
        let profiles = Arc::new(MockProfileRepository::new());
        let handler = handler(clients, profiles.clone());

        let cmd = BulkUploadProfilesCommand {
            rows: vec![
                row(2, "Jordan Reyes", "jordan@example.com", "Acme Corp"),
                row(3, "Sam Okafor", "sam@example.com", "Acme Corp"),
            ],
        };

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Ok(BulkUploadProfilesResult { created: 2 })));
        assert_eq!(profiles.saved().len(), 2);
    }

    #[tokio::test]
    async fn unknown_client_name_is_a_row_error_naming_the_client() {
        let clients = Arc::new(MockClientRepository::with_client("Acme Corp"));
        let profiles = Arc::new(MockProfileRepository::new());
        let handler = handler(clients, profiles.clone());

        let cmd = BulkUploadProfilesCommand {
            rows: vec![row(2, "Jordan Reyes", "jordan@example.com", "Globex")],
        };

        let result = handler.handle(cmd).await;
        match result {
            Err(BulkUploadProfilesError::Invalid(BulkError::Rows(errors))) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].message.contains("Globex"));
            }
            other => panic!("expected row errors, got {:?}", other.map(|r| r.created)),
        }
        assert!(profiles.saved().is_empty());
    }

    #[tokio::test]
    async fn all_row_errors_are_collected_before_failing() {
        let clients = Arc::new(MockClientRepository::with_client("Acme Corp"));
        let profiles = Arc::new(MockProfileRepository::new());
        let handler = handler(clients, profiles.clone());

        let cmd = BulkUploadProfilesCommand {
            rows: vec![
                row(2, "", "jordan@example.com", "Acme Corp"),
                row(3, "Sam Okafor", "not-an-email", "Acme Corp"),
                row(4, "Ada Li", "ada@example.com", "Globex"),
            ],
        };

        let result = handler.handle(cmd).await;
        match result {
            Err(BulkUploadProfilesError::Invalid(BulkError::Rows(errors))) => {
                let lines: Vec<usize> = errors.iter().map(|e| e.line).collect();
                assert_eq!(lines, vec![2, 3, 4]);
            }
            _ => panic!("expected row errors"),
        }
        // Any error keeps the whole batch out.
        assert!(profiles.saved().is_empty());
    }

    #[tokio::test]
    async fn client_lookup_is_case_insensitive() {
        let clients = Arc::new(MockClientRepository::with_client("Acme Corp"));
        let profiles = Arc::new(MockProfileRepository::new());
        let handler = handler(clients, profiles.clone());

        let cmd = BulkUploadProfilesCommand {
            rows: vec![row(2, "Jordan Reyes", "jordan@example.com", "acme corp")],
        };

        assert!(handler.handle(cmd).await.is_ok());
        assert_eq!(profiles.saved().len(), 1);
    }

    #[tokio::test]
    async fn repository_failure_surfaces_as_internal() {
        let clients = Arc::new(MockClientRepository::with_client("Acme Corp"));
        let profiles = Arc::new(MockProfileRepository::failing());
        let handler = handler(clients, profiles);

        let cmd = BulkUploadProfilesCommand {
            rows: vec![row(2, "Jordan Reyes", "jordan@example.com", "Acme Corp")],
        };

        assert!(matches!(
            handler.handle(cmd).await,
            Err(BulkUploadProfilesError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn empty_upload_creates_nothing() {
        let clients = Arc::new(MockClientRepository::with_client("Acme Corp"));
        let profiles = Arc::new(MockProfileRepository::new());
        let handler = handler(clients, profiles.clone());

        let result = handler
            .handle(BulkUploadProfilesCommand { rows: vec![] })
            .await;
        assert!(matches!(result, Ok(BulkUploadProfilesResult { created: 0 })));
    }
}
