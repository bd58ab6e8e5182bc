use serde::Serialize;

use sphere_core::model::{
    AdminStats, AuthUser, Company, CompanyDraft, CompanyId, Page, PageRequest, Recruiter,
    RecruiterDraft, RecruiterId, UserId, UserRole,
};

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
struct UserQuery {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<UserRole>,
}

#[derive(Debug, Serialize)]
struct RoleBody {
    role: UserRole,
}

/// `/admin` endpoints: platform stats, users, companies, and recruiters.
#[derive(Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn stats(&self) -> Result<AdminStats, ApiError> {
        self.client.get("/admin/stats").await
    }

    // ── users ──

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn users(
        &self,
        page: PageRequest,
        role: Option<UserRole>,
    ) -> Result<Page<AuthUser>, ApiError> {
        let query = UserQuery {
            page: page.page,
            limit: page.limit,
            role,
        };
        self.client.get_query("/admin/users", &query).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn set_user_role(&self, id: &UserId, role: UserRole) -> Result<AuthUser, ApiError> {
        self.client
            .patch(&format!("/admin/users/{id}/role"), &RoleBody { role })
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.client.delete(&format!("/admin/users/{id}")).await
    }

    // ── companies ──

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn companies(&self) -> Result<Vec<Company>, ApiError> {
        self.client.get("/admin/companies").await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ApiError> {
        self.client.post("/admin/companies", draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn update_company(
        &self,
        id: &CompanyId,
        draft: &CompanyDraft,
    ) -> Result<Company, ApiError> {
        self.client.put(&format!("/admin/companies/{id}"), draft).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn delete_company(&self, id: &CompanyId) -> Result<(), ApiError> {
        self.client.delete(&format!("/admin/companies/{id}")).await
    }

    // ── recruiters ──

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn recruiters(&self, company: &CompanyId) -> Result<Vec<Recruiter>, ApiError> {
        self.client
            .get(&format!("/admin/companies/{company}/recruiters"))
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn add_recruiter(
        &self,
        company: &CompanyId,
        draft: &RecruiterDraft,
    ) -> Result<Recruiter, ApiError> {
        self.client
            .post(&format!("/admin/companies/{company}/recruiters"), draft)
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for request failures.
    pub async fn remove_recruiter(&self, id: &RecruiterId) -> Result<(), ApiError> {
        self.client.delete(&format!("/admin/recruiters/{id}")).await
    }
}
