// src/views/mod.rs
//! Plain-text renderings of every page

pub mod cards;
pub mod nav;
pub mod pages;

pub use cards::{render_company_card, render_job_card, ApplyControl};
pub use nav::{nav_links, render_nav_bar};
pub use pages::{render_page, render_page_with_errors};
