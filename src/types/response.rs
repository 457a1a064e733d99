use serde::Deserialize;

use crate::types::models::{Company, CompanyDetail, Job, JobDetail, JobId, User};

// ===== Success envelopes =====

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}

#[derive(Debug, Deserialize)]
pub struct CompanyResponse {
    pub company: CompanyDetail,
}

#[derive(Debug, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
pub struct JobResponse {
    pub job: JobDetail,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct AppliedResponse {
    pub applied: JobId,
}

// ===== Error envelope =====

/// `{ "error": { "message": ..., "status": 400 } }`
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<ErrorMessage>,
    #[serde(default)]
    pub status: Option<u16>,
}

/// Validation failures come back as a list, everything else as one string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    pub fn into_messages(self) -> Vec<String> {
        match self {
            ErrorMessage::One(message) => vec![message],
            ErrorMessage::Many(messages) => messages,
        }
    }
}
