// src/types/mod.rs
//! Wire types shared by the API client and the views

pub mod models;
pub mod response;

pub use models::{Company, CompanyDetail, Job, JobDetail, JobId, User};
