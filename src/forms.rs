// src/forms.rs
//! Form payloads and their client-side validation

use serde::Serialize;

use crate::error::ApiError;
use crate::types::User;

/// Minimal shape check, the API does the real validation
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn require(messages: &mut Vec<String>, label: &str, value: &str) {
    if value.trim().is_empty() {
        messages.push(format!("{} is required", label));
    }
}

fn finish(messages: Vec<String>) -> Result<(), ApiError> {
    if messages.is_empty() {
        Ok(())
    } else {
        Err(ApiError::from_messages(messages))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut messages = Vec::new();
        require(&mut messages, "Username", &self.username);
        require(&mut messages, "Password", &self.password);
        finish(messages)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut messages = Vec::new();
        require(&mut messages, "Username", &self.username);
        require(&mut messages, "Password", &self.password);
        require(&mut messages, "First Name", &self.first_name);
        require(&mut messages, "Last Name", &self.last_name);
        require(&mut messages, "Email", &self.email);
        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            messages.push("Email must be a valid email address".to_string());
        }
        finish(messages)
    }
}

/// Editable profile fields. Starts out as a copy of the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password: None,
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut messages = Vec::new();
        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            messages.push("Email must be a valid email address".to_string());
        }
        if matches!(self.password.as_deref(), Some(p) if p.is_empty()) {
            messages.push("Password cannot be empty".to_string());
        }
        finish(messages)
    }
}

/// Query filters for GET companies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_employees: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_employees: Option<u32>,
}

impl CompanySearch {
    /// A blank search term means "no filter", same as submitting an empty
    /// search bar.
    pub fn by_name(term: Option<&str>) -> Self {
        Self {
            name: normalize_term(term),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        match (self.min_employees, self.max_employees) {
            (Some(min), Some(max)) if min > max => Err(ApiError::new(
                "Min employees cannot be greater than max employees",
            )),
            _ => Ok(()),
        }
    }
}

/// Query filters for GET jobs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl JobSearch {
    pub fn by_title(term: Option<&str>) -> Self {
        Self {
            title: normalize_term(term),
        }
    }
}

fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
