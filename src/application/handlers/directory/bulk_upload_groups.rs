//! BulkUploadGroupsHandler - all-or-nothing CSV import of groups.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::bulk::{BulkError, GroupUploadRow, RowError};
use crate::domain::directory::Group;
use crate::domain::foundation::DomainError;
use crate::ports::{ClientRepository, GroupRepository};

/// Command carrying the parsed rows of one group upload.
#[derive(Debug, Clone)]
pub struct BulkUploadGroupsCommand {
    pub rows: Vec<GroupUploadRow>,
}

/// Result of a successful bulk upload.
#[derive(Debug, Clone)]
pub struct BulkUploadGroupsResult {
    pub created: usize,
}

/// Outcome of a bulk upload attempt.
#[derive(Debug)]
pub enum BulkUploadGroupsError {
    /// Row-level validation failures; nothing was persisted.
    Invalid(BulkError),
    /// Infrastructure failure.
    Internal(DomainError),
}

/// Handler importing a validated batch of groups.
pub struct BulkUploadGroupsHandler {
    clients: Arc<dyn ClientRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl BulkUploadGroupsHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, groups: Arc<dyn GroupRepository>) -> Self {
        Self { clients, groups }
    }

    pub async fn handle(
        &self,
        cmd: BulkUploadGroupsCommand,
    ) -> Result<BulkUploadGroupsResult, BulkUploadGroupsError> {
        let mut errors: Vec<RowError> = Vec::new();
        for row in &cmd.rows {
            row.validate_into(&mut errors);
        }

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
                .map_err(BulkUploadGroupsError::Internal)?;
            clients_by_name.insert(name, client);
        }

        let mut groups = Vec::with_capacity(cmd.rows.len());
        for row in &cmd.rows {
            let key = row.client_name.trim().to_lowercase();
            match clients_by_name.get(&key) {
                Some(Some(client)) => {
                    match Group::new(client.id, row.name.trim(), row.description.clone()) {
                        Ok(group) => groups.push(group),
                        Err(e) => errors.push(RowError::new(row.line, e.to_string())),
                    }
                }
                Some(None) => errors.push(RowError::new(
                    row.line,
                    format!("Unknown client name: '{}'", row.client_name.trim()),
                )),
                None => {}
            }
        }

        if !errors.is_empty() {
            errors.sort_by_key(|e| e.line);
            return Err(BulkUploadGroupsError::Invalid(BulkError::Rows(errors)));
        }

        let created = groups.len();
        self.groups
            .save_all(&groups)
            .await
            .map_err(BulkUploadGroupsError::Internal)?;

        tracing::info!(created, "Bulk group upload persisted");
        Ok(BulkUploadGroupsResult { created })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::Client;
    use crate::domain::foundation::{ClientId, GroupId, ProfileId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockClientRepository {
        clients: Vec<Client>,
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
    struct MockGroupRepository {
        saved: Mutex<Vec<Group>>,
    }

    #[async_trait]
    impl GroupRepository for MockGroupRepository {
        async fn save(&self, group: &Group) -> Result<(), DomainError> {
            self.save_all(std::slice::from_ref(group)).await
        }

        async fn save_all(&self, groups: &[Group]) -> Result<(), DomainError> {
            self.saved.lock().unwrap().extend_from_slice(groups);
            Ok(())
        }

        async fn update(&self, _group: &Group) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &GroupId) -> Result<Option<Group>, DomainError> {
            Ok(None)
        }

        async fn list_by_client(&self, _client_id: &ClientId) -> Result<Vec<Group>, DomainError> {
            Ok(vec![])
        }

        async fn add_member(
            &self,
            _group_id: &GroupId,
            _profile_id: &ProfileId,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn remove_member(
            &self,
            _group_id: &GroupId,
            _profile_id: &ProfileId,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn list_members(&self, _group_id: &GroupId) -> Result<Vec<ProfileId>, DomainError> {
            Ok(vec![])
        }

        async fn delete(&self, _id: &GroupId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn row(line: usize, name: &str, client: &str) -> GroupUploadRow {
        GroupUploadRow {
            line,
            name: name.to_string(),
            description: None,
            client_name: client.to_string(),
        }
    }

    #[tokio::test]
    async fn imports_valid_rows() {
        let clients = Arc::new(MockClientRepository {
            clients: vec![Client::new("Acme Corp", "technology").unwrap()],
        });
        let groups = Arc::new(MockGroupRepository::default());
        let handler = BulkUploadGroupsHandler::new(clients, groups.clone());

        let cmd = BulkUploadGroupsCommand {
            rows: vec![row(2, "Engineering", "Acme Corp"), row(3, "Sales", "Acme Corp")],
        };

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Ok(BulkUploadGroupsResult { created: 2 })));
        assert_eq!(groups.saved.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unrecognized_client_name_fails_the_batch_naming_it() {
        let clients = Arc::new(MockClientRepository {
            clients: vec![Client::new("Acme Corp", "technology").unwrap()],
        });
        let groups = Arc::new(MockGroupRepository::default());
        let handler = BulkUploadGroupsHandler::new(clients, groups.clone());

        let cmd = BulkUploadGroupsCommand {
            rows: vec![row(2, "Engineering", "Initech")],
        };

        match handler.handle(cmd).await {
            Err(BulkUploadGroupsError::Invalid(BulkError::Rows(errors))) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].message.contains("Initech"));
            }
            _ => panic!("expected row errors"),
        }
        assert!(groups.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_name_and_unknown_client_both_reported() {
        let clients = Arc::new(MockClientRepository {
            clients: vec![Client::new("Acme Corp", "technology").unwrap()],
        });
        let groups = Arc::new(MockGroupRepository::default());
        let handler = BulkUploadGroupsHandler::new(clients, groups);

        let cmd = BulkUploadGroupsCommand {
            rows: vec![row(2, "", "Acme Corp"), row(3, "Sales", "Initech")],
        };

        match handler.handle(cmd).await {
            Err(BulkUploadGroupsError::Invalid(BulkError::Rows(errors))) => {
                assert_eq!(errors.len(), 2);
            }
            _ => panic!("expected row errors"),
        }
    }
}
