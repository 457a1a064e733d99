// src/filter.rs
use crate::types::{Company, Job};

/// Case-insensitive substring match. A blank term matches everything.
pub fn matches_term(haystack: &str, term: &str) -> bool {
    let term = term.trim();
    term.is_empty() || haystack.to_lowercase().contains(&term.to_lowercase())
}

pub fn filter_companies(companies: Vec<Company>, term: Option<&str>) -> Vec<Company> {
    match term {
        Some(term) => companies
            .into_iter()
            .filter(|company| matches_term(&company.name, term))
            .collect(),
        None => companies,
    }
}

pub fn filter_jobs(jobs: Vec<Job>, term: Option<&str>) -> Vec<Job> {
    match term {
        Some(term) => jobs
            .into_iter()
            .filter(|job| matches_term(&job.title, term))
            .collect(),
        None => jobs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{companies, jobs};

    #[test]
    fn test_matches_term() {
        assert!(matches_term("Software Engineer", "engineer"));
        assert!(matches_term("Software Engineer", "WARE ENG"));
        assert!(matches_term("anything", "  "));
        assert!(!matches_term("Software Engineer", "manager"));
    }

    #[test]
    fn test_filter_companies_by_name() {
        let filtered = filter_companies(companies(), Some("company 2"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].handle, "comp2");

        assert_eq!(filter_companies(companies(), None).len(), 4);
        assert!(filter_companies(companies(), Some("zzz")).is_empty());
    }

    #[test]
    fn test_filter_jobs_by_title() {
        let filtered = filter_jobs(jobs(), Some("JOB 1"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Job 1");

        assert_eq!(filter_jobs(jobs(), Some("job")).len(), 2);
    }
}
