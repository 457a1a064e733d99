// src/views/pages.rs
use std::fmt::Write;

use crate::app::{Page, Session};
use crate::error::ApiError;
use crate::types::CompanyDetail;
use crate::views::cards::{render_company_card, render_job_card};
use crate::views::nav::render_nav_bar;

pub const TAGLINE: &str = "All the jobs in one, convenient place.";
const SEARCH_PLACEHOLDER: &str = "Enter search term...";

/// Nav bar plus the page body
pub fn render_page(page: &Page, session: &Session) -> String {
    let mut out = render_nav_bar(session.username());
    out.push_str("\n\n");
    out.push_str(&render_body(page, session));
    out
}

/// A page followed by messages from an action that failed on it
pub fn render_page_with_errors(page: &Page, session: &Session, err: &ApiError) -> String {
    let mut out = render_page(page, session);
    out.push('\n');
    render_errors(&mut out, err);
    out
}

fn render_errors(out: &mut String, err: &ApiError) {
    for message in &err.messages {
        let _ = writeln!(out, "! {}", message);
    }
}

fn render_search_bar(out: &mut String, search: Option<&str>) {
    let _ = writeln!(out, "Search: [{}]", search.unwrap_or(SEARCH_PLACEHOLDER));
    out.push('\n');
}

fn render_field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {}: {}", label, value);
}

fn render_body(page: &Page, session: &Session) -> String {
    let mut out = String::new();

    match page {
        Page::Home => {
            let _ = writeln!(out, "Jobly");
            let _ = writeln!(out, "{}", TAGLINE);
            match session.username() {
                Some(username) => {
                    let _ = writeln!(out, "Welcome Back, {}!", username);
                }
                None => {
                    let _ = writeln!(out, "[Log In] [Sign Up]");
                }
            }
        }

        Page::Login { form, error } => {
            let _ = writeln!(out, "Login");
            render_field(&mut out, "Username", &form.username);
            render_field(&mut out, "Password", &"*".repeat(form.password.len()));
            if let Some(err) = error {
                render_errors(&mut out, err);
            }
        }

        Page::Signup { form, error } => {
            let _ = writeln!(out, "Sign Up");
            render_field(&mut out, "Username", &form.username);
            render_field(&mut out, "Password", &"*".repeat(form.password.len()));
            render_field(&mut out, "First Name", &form.first_name);
            render_field(&mut out, "Last Name", &form.last_name);
            render_field(&mut out, "Email", &form.email);
            if let Some(err) = error {
                render_errors(&mut out, err);
            }
        }

        Page::Companies { search, companies } => {
            render_search_bar(&mut out, search.as_deref());
            match companies {
                Ok(companies) if companies.is_empty() => {
                    let _ = writeln!(out, "No companies found.");
                }
                Ok(companies) => {
                    for company in companies {
                        out.push_str(&render_company_card(company));
                    }
                }
                Err(err) => render_errors(&mut out, err),
            }
        }

        Page::Company(detail) => match detail {
            Ok(detail) => render_company_detail(&mut out, detail, session),
            Err(err) => render_errors(&mut out, err),
        },

        Page::Jobs { search, jobs } => {
            render_search_bar(&mut out, search.as_deref());
            match jobs {
                Ok(jobs) if jobs.is_empty() => {
                    let _ = writeln!(out, "No jobs found.");
                }
                Ok(jobs) => {
                    for job in jobs {
                        out.push_str(&render_job_card(job, session.has_applied(job.id)));
                    }
                }
                Err(err) => render_errors(&mut out, err),
            }
        }

        Page::Job(detail) => match detail {
            Ok(detail) => {
                out.push_str(&render_job_card(
                    &detail.as_job(),
                    session.has_applied(detail.id),
                ));
                out.push('\n');
                out.push_str(&render_company_card(&detail.company));
            }
            Err(err) => render_errors(&mut out, err),
        },

        Page::Profile { form, feedback } => {
            let _ = writeln!(out, "Profile");
            render_field(&mut out, "First Name", &form.first_name);
            render_field(&mut out, "Last Name", &form.last_name);
            render_field(&mut out, "Email", &form.email);
            match feedback {
                Some(Ok(message)) => {
                    let _ = writeln!(out, "{}", message);
                }
                Some(Err(err)) => render_errors(&mut out, err),
                None => {}
            }
        }

        Page::NotFound(resource) => {
            let _ = writeln!(out, "{}Not Found", resource);
        }
    }

    out
}

fn render_company_detail(out: &mut String, detail: &CompanyDetail, session: &Session) {
    let company = &detail.company;
    let _ = writeln!(out, "{}", company.name);
    let _ = writeln!(out, "  Logo: {}", company.logo_url.as_deref().unwrap_or("-"));
    if let Some(count) = company.num_employees {
        let _ = writeln!(out, "  {} employees", count);
    }
    let _ = writeln!(out, "  {}", company.description);
    out.push('\n');

    if detail.jobs.is_empty() {
        let _ = writeln!(out, "No job openings.");
    }
    for job in &detail.jobs {
        out.push_str(&render_job_card(job, session.has_applied(job.id)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PROFILE_UPDATED;
    use crate::forms::{LoginForm, ProfileForm};
    use crate::test_support::{companies, company_details, jobs, user_data};
    use crate::types::JobId;

    fn logged_in() -> Session {
        Session {
            user: Some(user_data()),
            token: Some("token".into()),
            token_issued_at: None,
            applications: [JobId(2)].into_iter().collect(),
        }
    }

    #[test]
    fn test_home_when_logged_out() {
        let text = render_page(&Page::Home, &Session::default());
        assert!(text.contains(TAGLINE));
        assert!(text.contains("[Log In] [Sign Up]"));
        assert!(!text.contains("Welcome Back"));
    }

    #[test]
    fn test_home_when_logged_in() {
        let text = render_page(&Page::Home, &logged_in());
        assert!(text.contains("Welcome Back, testuser!"));
        assert!(!text.contains("[Log In]"));
        assert!(text.starts_with("Home | Companies | Jobs | Profile | Logout testuser"));
    }

    #[test]
    fn test_login_shows_every_error_message() {
        let page = Page::Login {
            form: LoginForm {
                username: "user1".into(),
                password: "12345".into(),
            },
            error: Some(ApiError::from_messages(vec!["first".into(), "second".into()])),
        };
        let text = render_page(&page, &Session::default());
        assert!(text.contains("Username: user1"));
        assert!(text.contains("Password: *****"));
        assert!(text.contains("! first"));
        assert!(text.contains("! second"));
    }

    #[test]
    fn test_companies_page_lists_cards() {
        let page = Page::Companies {
            search: None,
            companies: Ok(companies()),
        };
        let text = render_page(&page, &logged_in());
        assert!(text.contains("Search: [Enter search term...]"));
        for company in companies() {
            assert!(text.contains(&company.name));
        }
    }

    #[test]
    fn test_list_error_replaces_content() {
        let page = Page::Jobs {
            search: Some("x".into()),
            jobs: Err(ApiError::new("Unauthorized")),
        };
        let text = render_page(&page, &logged_in());
        assert!(text.contains("Search: [x]"));
        assert!(text.contains("! Unauthorized"));
        assert!(!text.contains("Salary"));
    }

    #[test]
    fn test_jobs_page_marks_applied_jobs() {
        let page = Page::Jobs {
            search: None,
            jobs: Ok(jobs()),
        };
        let text = render_page(&page, &logged_in());
        assert!(text.contains("[Apply] -> jobly apply 1"));
        assert!(text.contains("[Applied] (disabled)"));
    }

    #[test]
    fn test_company_page_shows_its_jobs() {
        let page = Page::Company(Ok(company_details()));
        let text = render_page(&page, &logged_in());
        assert!(text.contains("Company 1 description."));
        assert!(text.contains("12 employees"));
        assert!(text.contains("Job 1"));
        assert!(text.contains("Job 2"));
    }

    #[test]
    fn test_profile_feedback() {
        let page = Page::Profile {
            form: ProfileForm::from_user(&user_data()),
            feedback: Some(Ok(PROFILE_UPDATED.to_string())),
        };
        let text = render_page(&page, &logged_in());
        assert!(text.contains("First Name: First"));
        assert!(text.contains("Email: email@email.com"));
        assert!(text.contains("Profile Updated"));
    }

    #[test]
    fn test_not_found() {
        let text = render_page(&Page::NotFound("Company "), &logged_in());
        assert!(text.contains("Company Not Found"));
    }
}
