use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::catalog::NamedRef;
use crate::model::ids::{CompanyId, RecruiterId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompanyError {
    #[error("company name cannot be empty")]
    EmptyName,
    #[error("invalid website URL: {0}")]
    InvalidWebsite(String),
    #[error("recruiter name cannot be empty")]
    EmptyRecruiterName,
    #[error("invalid recruiter email: {0}")]
    InvalidEmail(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id", alias = "id")]
    pub id: CompanyId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recruiter_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recruiter {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecruiterId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Option<NamedRef>,
}

/// Validated body for creating or updating a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyDraft {
    name: String,
    industry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<String>,
    description: String,
}

impl CompanyDraft {
    /// A blank website is omitted; anything else must parse as an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns `CompanyError` for a blank name or an unparseable website.
    pub fn new(
        name: &str,
        industry: &str,
        website: &str,
        description: &str,
    ) -> Result<Self, CompanyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompanyError::EmptyName);
        }
        let website = website.trim();
        let website = if website.is_empty() {
            None
        } else {
            let parsed = Url::parse(website)
                .map_err(|_| CompanyError::InvalidWebsite(website.to_string()))?;
            Some(parsed.to_string())
        };
        Ok(Self {
            name: name.to_string(),
            industry: industry.trim().to_string(),
            website,
            description: description.trim().to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }
}

/// Validated body for attaching a recruiter to a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecruiterDraft {
    name: String,
    email: String,
}

impl RecruiterDraft {
    /// # Errors
    ///
    /// Returns `CompanyError` for a blank name or a malformed email.
    pub fn new(name: &str, email: &str) -> Result<Self, CompanyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompanyError::EmptyRecruiterName);
        }
        let email = email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(CompanyError::InvalidEmail(email.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_lowercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_draft_validates_website() {
        let draft = CompanyDraft::new("Acme", "Tools", "https://acme.example", "").unwrap();
        assert_eq!(draft.website(), Some("https://acme.example/"));

        let blank = CompanyDraft::new("Acme", "", "  ", "").unwrap();
        assert_eq!(blank.website(), None);

        assert_eq!(
            CompanyDraft::new("Acme", "", "not a url", "").unwrap_err(),
            CompanyError::InvalidWebsite("not a url".into())
        );
        assert_eq!(
            CompanyDraft::new(" ", "", "", "").unwrap_err(),
            CompanyError::EmptyName
        );
    }

    #[test]
    fn recruiter_draft_checks_email() {
        assert!(RecruiterDraft::new("Sam", "sam@acme.io").is_ok());
        assert!(matches!(
            RecruiterDraft::new("Sam", "sam.acme.io"),
            Err(CompanyError::InvalidEmail(_))
        ));
        assert_eq!(
            RecruiterDraft::new("", "a@b.c").unwrap_err(),
            CompanyError::EmptyRecruiterName
        );
    }

    #[test]
    fn recruiter_reads_company_reference() {
        let recruiter: Recruiter =
            serde_json::from_str(r#"{"_id":"r1","name":"Sam","company":"co1"}"#).unwrap();
        assert_eq!(recruiter.company.map(|c| c.id), Some("co1".to_string()));
    }
}
