//! Page templates, compiled once into a shared minijinja environment.
//!
//! Template sources live next to this file and are embedded with
//! `include_str!`, so the binary carries its own pages.

use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

pub const INDEX: &str = "index.html";
pub const DETAIL: &str = "detail.html";
pub const LISTING: &str = "listing.html";
pub const PARTIAL_LIST: &str = "partial_list.html";
pub const ITEM_FORM: &str = "item_form.html";
pub const ITEM_FORM_PAGE: &str = "item_form_page.html";
pub const DELETE_FORM: &str = "delete_form.html";
pub const DELETE_PAGE: &str = "delete_page.html";
pub const UPLOAD: &str = "upload.html";
pub const UPLOAD_SUCCESS: &str = "upload_success.html";
pub const ABOUT: &str = "about.html";
pub const ERROR: &str = "error.html";
pub const REGISTER: &str = "users/register.html";
pub const LOGIN: &str = "users/login.html";
pub const PROFILE: &str = "users/profile.html";

const SOURCES: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html")),
    ("_macros.html", include_str!("templates/_macros.html")),
    (INDEX, include_str!("templates/index.html")),
    (DETAIL, include_str!("templates/detail.html")),
    (LISTING, include_str!("templates/listing.html")),
    (PARTIAL_LIST, include_str!("templates/partial_list.html")),
    (ITEM_FORM, include_str!("templates/item_form.html")),
    (ITEM_FORM_PAGE, include_str!("templates/item_form_page.html")),
    (DELETE_FORM, include_str!("templates/delete_form.html")),
    (DELETE_PAGE, include_str!("templates/delete_page.html")),
    (UPLOAD, include_str!("templates/upload.html")),
    (UPLOAD_SUCCESS, include_str!("templates/upload_success.html")),
    (ABOUT, include_str!("templates/about.html")),
    (ERROR, include_str!("templates/error.html")),
    (REGISTER, include_str!("templates/users/register.html")),
    (LOGIN, include_str!("templates/users/login.html")),
    (PROFILE, include_str!("templates/users/profile.html")),
];

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_filter("excerpt", excerpt);
    for (name, source) in SOURCES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, error = %e, "template failed to compile");
        }
    }
    env
});

/// Cuts `value` to at most `length` characters, ending with an ellipsis.
fn excerpt(value: String, length: Option<usize>) -> String {
    let length = length.unwrap_or(255);
    if value.chars().count() <= length {
        return value;
    }
    let cut: String = value.chars().take(length.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn render<T: Serialize>(name: &str, ctx: &T) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template(name)?.render(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_template_compiles() {
        for (name, _) in SOURCES {
            assert!(TEMPLATES.get_template(name).is_ok(), "{} did not compile", name);
        }
    }

    #[test]
    fn excerpt_keeps_short_text() {
        assert_eq!(excerpt("short".into(), Some(10)), "short");
        assert_eq!(excerpt("abcdefghij".into(), Some(5)), "abcd…");
    }

    #[test]
    fn output_is_escaped() {
        let html = render(
            ERROR,
            &json!({"site_title": "<b>", "menu": [], "title": "Oops", "code": 404, "message": "x"}),
        )
        .unwrap();
        assert!(html.contains("&lt;b&gt;"));
    }
}
