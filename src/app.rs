// src/app.rs
//! Session state and the actions every page uses

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::auth::decode_token;
use crate::core::api_client::JoblyBackend;
use crate::core::storage::{LocalStorage, AUTH_TOKEN_KEY};
use crate::error::{ApiError, ApiResult};
use crate::filter::{filter_companies, filter_jobs};
use crate::forms::{CompanySearch, JobSearch, LoginForm, ProfileForm, SignupForm};
use crate::routes::{resolve, Route};
use crate::types::{Company, CompanyDetail, Job, JobDetail, JobId, User};

pub const PROFILE_UPDATED: &str = "Profile Updated";

/// Identity shared by every page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    /// `iat` of the current token, when it carries one
    pub token_issued_at: Option<DateTime<Utc>>,
    pub applications: BTreeSet<JobId>,
}

impl Session {
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_applied(&self, id: JobId) -> bool {
        self.applications.contains(&id)
    }
}

/// A rendered-ready page: what was fetched, or the messages that replace it
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home,
    Login {
        form: LoginForm,
        error: Option<ApiError>,
    },
    Signup {
        form: SignupForm,
        error: Option<ApiError>,
    },
    Companies {
        search: Option<String>,
        companies: Result<Vec<Company>, ApiError>,
    },
    Company(Result<CompanyDetail, ApiError>),
    Jobs {
        search: Option<String>,
        jobs: Result<Vec<Job>, ApiError>,
    },
    Job(Result<JobDetail, ApiError>),
    Profile {
        form: ProfileForm,
        feedback: Option<Result<String, ApiError>>,
    },
    NotFound(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    AlreadyApplied,
}

pub struct JoblyApp<B: JoblyBackend> {
    backend: B,
    storage: LocalStorage,
    session: Session,
}

impl<B: JoblyBackend> JoblyApp<B> {
    pub fn new(backend: B, storage: LocalStorage) -> Self {
        Self {
            backend,
            storage,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Pick up a token left by a previous run. A token that does not decode
    /// or no longer loads a user is dropped.
    pub async fn restore(&mut self) -> Result<()> {
        let token = match self.storage.get(AUTH_TOKEN_KEY)? {
            Some(token) => token.to_string(),
            None => return Ok(()),
        };

        if let Err(err) = self.load_user(token).await {
            warn!("Stored auth token rejected: {}", err);
            self.clear_session().await?;
        }
        Ok(())
    }

    /// Decode the username out of `token`, then fetch that user
    async fn load_user(&mut self, token: String) -> ApiResult<()> {
        let claims = decode_token(&token).map_err(|e| ApiError::new(e.to_string()))?;
        self.backend.set_token(Some(token.clone()));

        let user = self.backend.get_user(&claims.username).await?;
        let issued_at = claims.issued_at();
        match issued_at {
            Some(issued) => info!("Loaded user {} (token issued {})", user.username, issued),
            None => info!("Loaded user {}", user.username),
        }

        self.session = Session {
            applications: user.applications.iter().copied().collect(),
            user: Some(user),
            token: Some(token),
            token_issued_at: issued_at,
        };
        Ok(())
    }

    async fn accept_token(&mut self, token: String) -> ApiResult<()> {
        self.storage
            .set(AUTH_TOKEN_KEY, &token)
            .await
            .map_err(|e| ApiError::new(e.to_string()))?;

        if let Err(err) = self.load_user(token).await {
            self.clear_session()
                .await
                .map_err(|e| ApiError::new(e.to_string()))?;
            return Err(err);
        }
        Ok(())
    }

    async fn clear_session(&mut self) -> Result<()> {
        self.session = Session::default();
        self.backend.set_token(None);
        self.storage.remove(AUTH_TOKEN_KEY).await
    }

    /// On failure the session is left as it was and nothing navigates
    pub async fn login(&mut self, form: &LoginForm) -> ApiResult<()> {
        form.validate()?;
        let token = self.backend.login_user(form).await?;
        self.accept_token(token).await
    }

    pub async fn signup(&mut self, form: &SignupForm) -> ApiResult<()> {
        form.validate()?;
        let token = self.backend.register_user(form).await?;
        self.accept_token(token).await
    }

    pub async fn logout(&mut self) -> Result<()> {
        if let Some(username) = self.session.username() {
            info!("Logging out {}", username);
        }
        self.clear_session().await
    }

    pub fn has_applied(&self, id: JobId) -> bool {
        self.session.has_applied(id)
    }

    /// Applying twice is a no-op, the control is disabled once applied
    pub async fn apply_to_job(&mut self, id: JobId) -> ApiResult<ApplyOutcome> {
        let username = self
            .session
            .username()
            .ok_or_else(|| ApiError::new("You must be logged in to apply"))?
            .to_string();

        if self.session.has_applied(id) {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        let applied = self.backend.post_application(&username, id).await?;
        info!("{} applied to job {}", username, applied);
        self.session.applications.insert(applied);
        Ok(ApplyOutcome::Applied)
    }

    /// Submit the profile form. Returns the page with its feedback line.
    pub async fn update_profile(&mut self, form: ProfileForm) -> Page {
        let feedback = self.submit_profile(&form).await.map(|_| PROFILE_UPDATED.to_string());
        let form = match (&feedback, &self.session.user) {
            (Ok(_), Some(user)) => ProfileForm::from_user(user),
            _ => form,
        };

        Page::Profile {
            form: ProfileForm {
                password: None,
                ..form
            },
            feedback: Some(feedback),
        }
    }

    async fn submit_profile(&mut self, form: &ProfileForm) -> ApiResult<()> {
        let username = self
            .session
            .username()
            .ok_or_else(|| ApiError::new("You must be logged in to edit your profile"))?
            .to_string();

        form.validate()?;
        let updated = self.backend.patch_user(&username, form).await?;

        if let Some(user) = self.session.user.as_mut() {
            user.first_name = updated.first_name;
            user.last_name = updated.last_name;
            user.email = updated.email;
            user.is_admin = updated.is_admin;
        }
        Ok(())
    }

    /// Navigate to `path`: guard, route, then fetch what the page shows.
    /// `search` is the search bar value on list pages and ignored elsewhere.
    pub async fn visit(&self, path: &str, search: Option<&str>) -> Page {
        let route = resolve(path, self.session.is_logged_in());
        self.load(route, search).await
    }

    pub async fn load(&self, route: Route, search: Option<&str>) -> Page {
        match route {
            Route::Home => Page::Home,
            Route::Login => Page::Login {
                form: LoginForm::default(),
                error: None,
            },
            Route::Signup => Page::Signup {
                form: SignupForm::default(),
                error: None,
            },
            Route::Companies => {
                self.search_companies(CompanySearch::by_name(search)).await
            }
            Route::Company(handle) => Page::Company(self.backend.get_company(&handle).await),
            Route::Jobs => self.search_jobs(JobSearch::by_title(search)).await,
            Route::Job(id) => Page::Job(self.backend.get_job(id).await),
            Route::Profile => Page::Profile {
                form: self
                    .session
                    .user
                    .as_ref()
                    .map(ProfileForm::from_user)
                    .unwrap_or_default(),
                feedback: None,
            },
            Route::NotFound(resource) => Page::NotFound(resource),
        }
    }

    pub async fn search_companies(&self, filters: CompanySearch) -> Page {
        let companies = match filters.validate() {
            Ok(()) => self
                .backend
                .get_companies(&filters)
                .await
                .map(|list| filter_companies(list, filters.name.as_deref())),
            Err(err) => Err(err),
        };

        Page::Companies {
            search: filters.name,
            companies,
        }
    }

    pub async fn search_jobs(&self, filters: JobSearch) -> Page {
        let jobs = self
            .backend
            .get_jobs(&filters)
            .await
            .map(|list| filter_jobs(list, filters.title.as_deref()));

        Page::Jobs {
            search: filters.title,
            jobs,
        }
    }
}
