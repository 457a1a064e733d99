// src/views/cards.rs
//! One-entry renderings used by the list and detail pages

use std::fmt::Write;

use crate::types::{Company, Job};

/// State of the apply button on a job card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyControl {
    Apply,
    Applied,
}

impl ApplyControl {
    pub fn for_job(applied: bool) -> Self {
        if applied {
            ApplyControl::Applied
        } else {
            ApplyControl::Apply
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplyControl::Apply => "Apply",
            ApplyControl::Applied => "Applied",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ApplyControl::Apply)
    }
}

pub fn render_company_card(company: &Company) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", company.name);
    let _ = writeln!(out, "  Logo: {}", company.logo_url.as_deref().unwrap_or("-"));
    if let Some(count) = company.num_employees {
        let _ = writeln!(out, "  {} employees", count);
    }
    let _ = writeln!(out, "  {}", company.description);
    let _ = writeln!(out, "  -> jobly company {}", company.handle);
    out
}

pub fn render_job_card(job: &Job, applied: bool) -> String {
    let control = ApplyControl::for_job(applied);

    let mut out = String::new();
    let _ = writeln!(out, "{}", job.title);
    if let Some(company) = &job.company_name {
        let _ = writeln!(out, "  {}", company);
    }
    if let Some(salary) = job.salary {
        let _ = writeln!(out, "  Salary: {}", salary);
    }
    if let Some(equity) = &job.equity {
        let _ = writeln!(out, "  Equity: {}", equity);
    }
    if control.is_enabled() {
        let _ = writeln!(out, "  [{}] -> jobly apply {}", control.label(), job.id);
    } else {
        let _ = writeln!(out, "  [{}] (disabled)", control.label());
    }
    out
}
