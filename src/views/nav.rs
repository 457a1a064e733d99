// src/views/nav.rs
/// Home always, then either the member links or login/sign up
pub fn nav_links(username: Option<&str>) -> Vec<String> {
    let mut links = vec!["Home".to_string()];

    match username {
        Some(username) => {
            links.extend(["Companies", "Jobs", "Profile"].map(String::from));
            links.push(format!("Logout {}", username));
        }
        None => links.extend(["Login", "Sign Up"].map(String::from)),
    }

    links
}

pub fn render_nav_bar(username: Option<&str>) -> String {
    nav_links(username).join(" | ")
}
