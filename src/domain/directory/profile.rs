//! Profile aggregate entity.
//!
//! A profile is one user inside a client organization. Profiles are the
//! raters and targets of assessments; their access level gates what the
//! HTTP API lets them do.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccessLevel, ClientId, ProfileId, Timestamp, ValidationError};

/// Profile aggregate - one user inside a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier for this profile.
    pub id: ProfileId,

    /// Owning client organization.
    pub client_id: ClientId,

    /// Full display name.
    pub name: String,

    /// Email address, unique per client.
    pub email: String,

    /// Login username, unique per client.
    pub username: String,

    /// Industry override for benchmark lookups; the client's industry
    /// applies when unset.
    pub industry: Option<String>,

    /// Role tier for authorization checks.
    pub access_level: AccessLevel,

    /// When the profile was created.
    pub created_at: Timestamp,

    /// When the profile was last updated.
    pub updated_at: Timestamp,
}

impl Profile {
    /// Create a new member-level profile.
    pub fn new(
        client_id: ClientId,
        name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        industry: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into().trim().to_lowercase();
        let username = username.into().trim().to_string();

        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if username.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        validate_email(&email)?;

        let industry = industry
            .map(|i| i.trim().to_lowercase())
            .filter(|i| !i.is_empty());

        let now = Timestamp::now();
        Ok(Self {
            id: ProfileId::new(),
            client_id,
            name,
            email,
            username,
            industry,
            access_level: AccessLevel::Member,
            created_at: now,
            updated_at: now,
        })
    }

    /// The industry this profile's reports are benchmarked against.
    pub fn effective_industry<'a>(&'a self, client_industry: &'a str) -> &'a str {
        self.industry.as_deref().unwrap_or(client_industry)
    }

    /// Change the role tier.
    pub fn set_access_level(&mut self, level: AccessLevel) {
        self.access_level = level;
        self.updated_at = Timestamp::now();
    }
}

/// Minimal email shape check; real deliverability is the provider's problem.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::invalid_format("email", "missing @ symbol"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::invalid_format(
            "email",
            "missing local part or domain",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile() -> Profile {
        Profile::new(
            ClientId::new(),
            "Jordan Reyes",
            "Jordan@Example.com",
            "jreyes",
            None,
        )
        .unwrap()
    }

    #[test]
    fn new_profile_lowercases_email() {
        let profile = make_profile();
        assert_eq!(profile.email, "jordan@example.com");
        assert_eq!(profile.access_level, AccessLevel::Member);
    }

    #[test]
    fn new_profile_rejects_bad_email() {
        let result = Profile::new(ClientId::new(), "A", "not-an-email", "a", None);
        assert!(result.is_err());

        let result = Profile::new(ClientId::new(), "A", "a@nodot", "a", None);
        assert!(result.is_err());
    }

    #[test]
    fn new_profile_rejects_empty_fields() {
        assert!(Profile::new(ClientId::new(), "", "a@b.com", "a", None).is_err());
        assert!(Profile::new(ClientId::new(), "A", "a@b.com", "  ", None).is_err());
    }

    #[test]
    fn blank_industry_is_normalized_to_none() {
        let profile = Profile::new(
            ClientId::new(),
            "Jordan Reyes",
            "jordan@example.com",
            "jreyes",
            Some("   ".to_string()),
        )
        .unwrap();
        assert_eq!(profile.industry, None);
    }

    #[test]
    fn effective_industry_prefers_override() {
        let mut profile = make_profile();
        assert_eq!(profile.effective_industry("finance"), "finance");

        profile.industry = Some("healthcare".to_string());
        assert_eq!(profile.effective_industry("finance"), "healthcare");
    }

    #[test]
    fn set_access_level_updates_role() {
        let mut profile = make_profile();
        profile.set_access_level(AccessLevel::ClientAdmin);
        assert_eq!(profile.access_level, AccessLevel::ClientAdmin);
    }

    #[test]
    fn validate_email_accepts_plain_addresses() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.co").is_ok());
    }
}
