// src/core/api_client.rs
//! Jobly API façade - the only place that knows the remote URLs and envelopes

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::error::{ApiError, ApiResult};
use crate::forms::{CompanySearch, JobSearch, LoginForm, ProfileForm, SignupForm};
use crate::types::{
    response::{
        AppliedResponse, CompaniesResponse, CompanyResponse, ErrorResponse, JobResponse,
        JobsResponse, TokenResponse, UserResponse,
    },
    Company, CompanyDetail, Job, JobDetail, JobId, User,
};

const REGISTER_ENDPOINT: [&str; 2] = ["auth", "register"];
const TOKEN_ENDPOINT: [&str; 2] = ["auth", "token"];
const COMPANIES_ENDPOINT: &str = "companies";
const JOBS_ENDPOINT: &str = "jobs";
const USERS_ENDPOINT: &str = "users";

/// Operations the rest of the crate needs from the remote API
#[allow(async_fn_in_trait)]
pub trait JoblyBackend {
    /// Token attached to every following request
    fn set_token(&mut self, token: Option<String>);

    fn token(&self) -> Option<&str>;

    /// Registers a new user, returns a fresh auth token
    async fn register_user(&self, user: &SignupForm) -> ApiResult<String>;

    /// Logs a user in, returns a fresh auth token
    async fn login_user(&self, credentials: &LoginForm) -> ApiResult<String>;

    async fn get_companies(&self, filters: &CompanySearch) -> ApiResult<Vec<Company>>;

    async fn get_company(&self, handle: &str) -> ApiResult<CompanyDetail>;

    async fn get_jobs(&self, filters: &JobSearch) -> ApiResult<Vec<Job>>;

    async fn get_job(&self, id: JobId) -> ApiResult<JobDetail>;

    /// User info including the ids of jobs applied to
    async fn get_user(&self, username: &str) -> ApiResult<User>;

    async fn patch_user(&self, username: &str, data: &ProfileForm) -> ApiResult<User>;

    async fn post_application(&self, username: &str, job_id: JobId) -> ApiResult<JobId>;
}

pub struct JoblyApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl JoblyApi {
    /// Create a client for the given base URL. No timeout is configured;
    /// each call is a single attempt.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Use a preconfigured reqwest client (proxy settings, TLS roots, ...)
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Base URL plus `path`, each segment percent-encoded
    fn url(&self, path: &[&str]) -> ApiResult<Url> {
        let invalid = || ApiError::new(format!("Invalid API base URL: {}", self.base_url));

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    /// Generic request to the endpoint made of `path` segments. GET sends
    /// `data` as query parameters, every other method sends it as a JSON
    /// body. Failures come back as a list of messages.
    pub async fn request<T, R>(&self, path: &[&str], data: &T, method: Method) -> ApiResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let endpoint = path.join("/");
        let url = self.url(path)?;
        debug!("API Call: {} {}", method, endpoint);

        let bearer = format!("Bearer {}", self.token.as_deref().unwrap_or_default());
        let builder = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, bearer);

        let builder = if method == Method::GET {
            builder.query(data)
        } else {
            builder.json(data)
        };

        let response = builder.send().await.map_err(|e| {
            error!("API Error: {} {} failed: {}", method, endpoint, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("API Error: could not read {} body: {}", endpoint, e);
            ApiError::from(e)
        })?;

        if !status.is_success() {
            error!("API Error: {} {} -> {}: {}", method, endpoint, status, body);
            return Err(normalize_error(status, &body));
        }

        serde_json::from_str::<R>(&body).map_err(|e| {
            error!("API Error: unexpected {} payload: {}", endpoint, e);
            ApiError::new(format!("Failed to parse response from {}: {}", endpoint, e))
        })
    }
}

/// Pull the server-supplied message out of an error body. A single string is
/// wrapped into a one-element list.
pub fn normalize_error(status: StatusCode, body: &str) -> ApiError {
    let messages = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|parsed| parsed.error.message)
        .map(|message| message.into_messages())
        .filter(|messages| !messages.is_empty());

    match messages {
        Some(messages) => ApiError::from_messages(messages),
        None => ApiError::new(format!("Request failed with status {}", status)),
    }
}

impl JoblyBackend for JoblyApi {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn register_user(&self, user: &SignupForm) -> ApiResult<String> {
        let res: TokenResponse = self.request(&REGISTER_ENDPOINT, user, Method::POST).await?;
        Ok(res.token)
    }

    async fn login_user(&self, credentials: &LoginForm) -> ApiResult<String> {
        let res: TokenResponse = self
            .request(&TOKEN_ENDPOINT, credentials, Method::POST)
            .await?;
        Ok(res.token)
    }

    async fn get_companies(&self, filters: &CompanySearch) -> ApiResult<Vec<Company>> {
        let res: CompaniesResponse = self
            .request(&[COMPANIES_ENDPOINT], filters, Method::GET)
            .await?;
        Ok(res.companies)
    }

    async fn get_company(&self, handle: &str) -> ApiResult<CompanyDetail> {
        let res: CompanyResponse = self
            .request(&[COMPANIES_ENDPOINT, handle], &json!({}), Method::GET)
            .await?;
        Ok(res.company)
    }

    async fn get_jobs(&self, filters: &JobSearch) -> ApiResult<Vec<Job>> {
        let res: JobsResponse = self.request(&[JOBS_ENDPOINT], filters, Method::GET).await?;
        Ok(res.jobs)
    }

    async fn get_job(&self, id: JobId) -> ApiResult<JobDetail> {
        let id = id.to_string();
        let res: JobResponse = self
            .request(&[JOBS_ENDPOINT, id.as_str()], &json!({}), Method::GET)
            .await?;
        Ok(res.job)
    }

    async fn get_user(&self, username: &str) -> ApiResult<User> {
        let res: UserResponse = self
            .request(&[USERS_ENDPOINT, username], &json!({}), Method::GET)
            .await?;
        Ok(res.user)
    }

    async fn patch_user(&self, username: &str, data: &ProfileForm) -> ApiResult<User> {
        let res: UserResponse = self
            .request(&[USERS_ENDPOINT, username], data, Method::PATCH)
            .await?;
        Ok(res.user)
    }

    async fn post_application(&self, username: &str, job_id: JobId) -> ApiResult<JobId> {
        let job_id = job_id.to_string();
        let res: AppliedResponse = self
            .request(
                &[USERS_ENDPOINT, username, JOBS_ENDPOINT, job_id.as_str()],
                &json!({}),
                Method::POST,
            )
            .await?;
        Ok(res.applied)
    }
}
