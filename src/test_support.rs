// src/test_support.rs
//! Fixtures and an in-memory backend shared by the unit tests

use std::cell::RefCell;

use crate::core::api_client::JoblyBackend;
use crate::error::{ApiError, ApiResult};
use crate::forms::{CompanySearch, JobSearch, LoginForm, ProfileForm, SignupForm};
use crate::types::{Company, CompanyDetail, Job, JobDetail, JobId, User};

/// Carries `{ username: "testuser", isAdmin: false, iat: 1598159259 }`
pub(crate) const AUTH_TOKEN: &str = concat!(
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJ1c2VybmFtZ",
    "SI6InRlc3R1c2VyIiwiaXNBZG1pbiI6ZmFsc2UsImlhdCI6MTU5ODE1OTI1OX0.",
    "FtrMwBQwe6Ue-glIFgz_Nf8XxRT2YecFCiSpYL0fCXc"
);

pub(crate) fn companies() -> Vec<Company> {
    vec![
        Company {
            handle: "comp1".into(),
            name: "Company 1".into(),
            description: "Company 1 description.".into(),
            num_employees: Some(12),
            logo_url: Some("logo1.png".into()),
        },
        Company {
            handle: "comp2".into(),
            name: "Company 2".into(),
            description: "Company 2 description.".into(),
            num_employees: Some(123),
            logo_url: Some("logo2.png".into()),
        },
        Company {
            handle: "comp3".into(),
            name: "Company 3".into(),
            description: "Company 3 description.".into(),
            num_employees: Some(3),
            logo_url: None,
        },
        Company {
            handle: "comp4".into(),
            name: "Company 4".into(),
            description: "Company 4 description.".into(),
            num_employees: None,
            logo_url: Some("logo4.png".into()),
        },
    ]
}

pub(crate) fn jobs() -> Vec<Job> {
    vec![
        Job {
            id: JobId(1),
            title: "Job 1".into(),
            salary: Some(1),
            equity: Some("0.1".into()),
            company_handle: Some("comp1".into()),
            company_name: Some("Company 1".into()),
        },
        Job {
            id: JobId(2),
            title: "Job 2".into(),
            salary: Some(2),
            equity: Some("0.2".into()),
            company_handle: Some("comp1".into()),
            company_name: Some("Company 1".into()),
        },
    ]
}

pub(crate) fn company_details() -> CompanyDetail {
    let jobs = jobs()
        .into_iter()
        .map(|job| Job {
            company_handle: None,
            company_name: None,
            ..job
        })
        .collect();

    CompanyDetail {
        company: companies().remove(0),
        jobs,
    }
}

pub(crate) fn user_data() -> User {
    User {
        username: "testuser".into(),
        first_name: "First".into(),
        last_name: "Last".into(),
        email: "email@email.com".into(),
        is_admin: false,
        applications: Vec::new(),
    }
}

/// Answers from the fixtures above and records every call
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub token: Option<String>,
    pub user: Option<User>,
    pub login_error: Option<ApiError>,
    pub register_error: Option<ApiError>,
    pub patch_error: Option<ApiError>,
    pub apply_error: Option<ApiError>,
    /// Return every row regardless of the filters sent
    pub ignore_filters: bool,
    pub calls: RefCell<Vec<String>>,
    pub applied: RefCell<Vec<JobId>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            user: Some(user_data()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn require_token(&self) -> ApiResult<()> {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(()),
            _ => Err(ApiError::new("Unauthorized")),
        }
    }
}

impl JoblyBackend for FakeBackend {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn register_user(&self, user: &SignupForm) -> ApiResult<String> {
        self.record(format!("register_user {}", user.username));
        match &self.register_error {
            Some(err) => Err(err.clone()),
            None => Ok(AUTH_TOKEN.to_string()),
        }
    }

    async fn login_user(&self, credentials: &LoginForm) -> ApiResult<String> {
        self.record(format!("login_user {}", credentials.username));
        match &self.login_error {
            Some(err) => Err(err.clone()),
            None => Ok(AUTH_TOKEN.to_string()),
        }
    }

    async fn get_companies(&self, filters: &CompanySearch) -> ApiResult<Vec<Company>> {
        self.record(format!("get_companies {:?}", filters.name));
        self.require_token()?;
        let term = filters.name.as_deref().filter(|_| !self.ignore_filters);
        Ok(companies()
            .into_iter()
            .filter(|c| term.map_or(true, |t| c.name.to_lowercase().contains(&t.to_lowercase())))
            .collect())
    }

    async fn get_company(&self, handle: &str) -> ApiResult<CompanyDetail> {
        self.record(format!("get_company {}", handle));
        self.require_token()?;
        let detail = company_details();
        if detail.company.handle == handle {
            Ok(detail)
        } else {
            Err(ApiError::new(format!("No company: {}", handle)))
        }
    }

    async fn get_jobs(&self, filters: &JobSearch) -> ApiResult<Vec<Job>> {
        self.record(format!("get_jobs {:?}", filters.title));
        self.require_token()?;
        let term = filters.title.as_deref().filter(|_| !self.ignore_filters);
        Ok(jobs()
            .into_iter()
            .filter(|j| term.map_or(true, |t| j.title.to_lowercase().contains(&t.to_lowercase())))
            .collect())
    }

    async fn get_job(&self, id: JobId) -> ApiResult<JobDetail> {
        self.record(format!("get_job {}", id));
        self.require_token()?;
        let job = jobs()
            .into_iter()
            .find(|j| j.id == id)
            .ok_or_else(|| ApiError::new(format!("No job: {}", id)))?;
        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company: companies().remove(0),
        })
    }

    async fn get_user(&self, username: &str) -> ApiResult<User> {
        self.record(format!("get_user {}", username));
        self.require_token()?;
        match &self.user {
            Some(user) if user.username == username => {
                let mut user = user.clone();
                user.applications.extend(self.applied.borrow().iter().copied());
                Ok(user)
            }
            _ => Err(ApiError::new(format!("No user: {}", username))),
        }
    }

    async fn patch_user(&self, username: &str, data: &ProfileForm) -> ApiResult<User> {
        self.record(format!("patch_user {}", username));
        self.require_token()?;
        if let Some(err) = &self.patch_error {
            return Err(err.clone());
        }
        let mut user = self.user.clone().unwrap_or_else(user_data);
        user.first_name = data.first_name.clone();
        user.last_name = data.last_name.clone();
        user.email = data.email.clone();
        user.applications = Vec::new();
        Ok(user)
    }

    async fn post_application(&self, username: &str, job_id: JobId) -> ApiResult<JobId> {
        self.record(format!("post_application {} {}", username, job_id));
        self.require_token()?;
        if let Some(err) = &self.apply_error {
            return Err(err.clone());
        }
        self.applied.borrow_mut().push(job_id);
        Ok(job_id)
    }
}
