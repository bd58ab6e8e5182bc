use sphere_core::model::{AuthUser, Company, CompanyId, Recruiter, RecruiterId, UserId, UserRole};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRowVm {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// The signed-in admin cannot demote or delete themselves.
    pub is_self: bool,
}

#[must_use]
pub fn map_user_rows(users: &[AuthUser], current: Option<&UserId>) -> Vec<UserRowVm> {
    users
        .iter()
        .map(|user| UserRowVm {
            id: user.id.clone(),
            name: user.display_name().to_string(),
            email: user.email.clone(),
            role: user.role,
            is_self: current == Some(&user.id),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyRowVm {
    pub id: CompanyId,
    pub name: String,
    pub industry: String,
    pub website: Option<String>,
    pub recruiters_label: String,
}

impl From<&Company> for CompanyRowVm {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id.clone(),
            name: company.name.clone(),
            industry: if company.industry.trim().is_empty() {
                "—".to_string()
            } else {
                company.industry.clone()
            },
            website: (!company.website.trim().is_empty()).then(|| company.website.clone()),
            recruiters_label: match company.recruiter_count {
                1 => "1 recruiter".to_string(),
                n => format!("{n} recruiters"),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecruiterRowVm {
    pub id: RecruiterId,
    pub name: String,
    pub email: String,
}

impl From<&Recruiter> for RecruiterRowVm {
    fn from(recruiter: &Recruiter) -> Self {
        Self {
            id: recruiter.id.clone(),
            name: recruiter.name.clone(),
            email: recruiter.email.clone(),
        }
    }
}
