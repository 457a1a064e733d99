// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::app::{ApplyOutcome, JoblyApp, Page};
use crate::core::api_client::JoblyBackend;
use crate::forms::{CompanySearch, LoginForm, ProfileForm, SignupForm};
use crate::routes::{resolve, Route};
use crate::types::JobId;
use crate::views::{render_page, render_page_with_errors};

#[derive(Parser)]
#[command(name = "jobly")]
#[command(about = "Browse companies and jobs, and apply, from the terminal")]
pub struct JoblyCli {
    #[command(subcommand)]
    pub command: JoblyCommand,

    /// API base URL, overrides jobly.yaml and JOBLY_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum JoblyCommand {
    /// Show the home page
    Home,
    /// Open any path, e.g. /companies/anderson-arias-morrow
    Visit { path: String },
    /// Log in with an existing account
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and log in
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
    },
    /// Forget the stored token
    Logout,
    /// List companies
    Companies {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        min_employees: Option<u32>,
        #[arg(long)]
        max_employees: Option<u32>,
    },
    /// Show one company and its job openings
    Company { handle: String },
    /// List jobs
    Jobs {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one job
    Job { id: JobId },
    /// Apply to a job
    Apply { id: JobId },
    /// Show the profile form, or submit it when any field is given
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

/// Run one command against an already restored app and return the text to
/// print
pub async fn handle_command<B: JoblyBackend>(
    app: &mut JoblyApp<B>,
    command: JoblyCommand,
) -> Result<String> {
    let page = match command {
        JoblyCommand::Home => app.visit("/", None).await,

        JoblyCommand::Visit { path } => app.visit(&path, None).await,

        JoblyCommand::Login { username, password } => {
            let form = LoginForm { username, password };
            match resolve("/login", app.session().is_logged_in()) {
                Route::Login => match app.login(&form).await {
                    Ok(()) => app.visit("/", None).await,
                    Err(error) => {
                        warn!("Login failed: {}", error);
                        Page::Login {
                            form,
                            error: Some(error),
                        }
                    }
                },
                route => app.load(route, None).await,
            }
        }

        JoblyCommand::Signup {
            username,
            password,
            first_name,
            last_name,
            email,
        } => {
            let form = SignupForm {
                username,
                password,
                first_name,
                last_name,
                email,
            };
            match resolve("/signup", app.session().is_logged_in()) {
                Route::Signup => match app.signup(&form).await {
                    Ok(()) => app.visit("/", None).await,
                    Err(error) => {
                        warn!("Signup failed: {}", error);
                        Page::Signup {
                            form,
                            error: Some(error),
                        }
                    }
                },
                route => app.load(route, None).await,
            }
        }

        JoblyCommand::Logout => {
            app.logout().await?;
            app.visit("/", None).await
        }

        JoblyCommand::Companies {
            search,
            min_employees,
            max_employees,
        } => match resolve("/companies", app.session().is_logged_in()) {
            Route::Companies => {
                let filters = CompanySearch {
                    min_employees,
                    max_employees,
                    ..CompanySearch::by_name(search.as_deref())
                };
                app.search_companies(filters).await
            }
            route => app.load(route, None).await,
        },

        JoblyCommand::Company { handle } => {
            app.visit(&Route::Company(handle).path(), None).await
        }

        JoblyCommand::Jobs { search } => app.visit("/jobs", search.as_deref()).await,

        JoblyCommand::Job { id } => app.visit(&Route::Job(id).path(), None).await,

        JoblyCommand::Apply { id } => {
            let path = Route::Job(id).path();
            if resolve(&path, app.session().is_logged_in()) == Route::Job(id) {
                match app.apply_to_job(id).await {
                    Ok(ApplyOutcome::Applied) => info!("Applied to job {}", id),
                    Ok(ApplyOutcome::AlreadyApplied) => info!("Job {} already applied", id),
                    Err(error) => {
                        warn!("Apply to job {} failed: {}", id, error);
                        let page = app.visit(&path, None).await;
                        return Ok(render_page_with_errors(&page, app.session(), &error));
                    }
                }
            }
            app.visit(&path, None).await
        }

        JoblyCommand::Profile {
            first_name,
            last_name,
            email,
            password,
        } => match app.visit("/profile", None).await {
            Page::Profile { form, .. }
                if first_name.is_some()
                    || last_name.is_some()
                    || email.is_some()
                    || password.is_some() =>
            {
                let form = ProfileForm {
                    first_name: first_name.unwrap_or(form.first_name),
                    last_name: last_name.unwrap_or(form.last_name),
                    email: email.unwrap_or(form.email),
                    password,
                };
                app.update_profile(form).await
            }
            page => page,
        },
    };

    Ok(render_page(&page, app.session()))
}
