// src/types/models.rs
//! Jobly API entities as they arrive on the wire (camelCase JSON)

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Identifiers =====

/// Job identifier. The live API sends numbers, older fixtures send strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(JobId(n)),
            RawId::Text(s) => s
                .trim()
                .parse::<u64>()
                .map(JobId)
                .map_err(|_| serde::de::Error::custom(format!("invalid job id: {}", s))),
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(JobId)
    }
}

/// Equity comes back as a NUMERIC column rendered to a string ("0.1"), but
/// a bare number is accepted too. Kept as its display form.
fn deserialize_equity<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// ===== Users =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Absent on PATCH responses, present on GET users/:username.
    #[serde(default, alias = "jobs")]
    pub applications: Vec<JobId>,
}

// ===== Companies =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<u32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

// ===== Jobs =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub salary: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_equity")]
    pub equity: Option<String>,
    #[serde(default)]
    pub company_handle: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub salary: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_equity")]
    pub equity: Option<String>,
    pub company: Company,
}

impl JobDetail {
    /// Flatten into a listing entry so it can be shown with a job card
    pub fn as_job(&self) -> Job {
        Job {
            id: self.id,
            title: self.title.clone(),
            salary: self.salary,
            equity: self.equity.clone(),
            company_handle: Some(self.company.handle.clone()),
            company_name: Some(self.company.name.clone()),
        }
    }
}
