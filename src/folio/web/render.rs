//! The two presentation adapters.
//!
//! A handler runs one command and gets one [`CmdResult`]. [`PageContext`]
//! turns it into a full HTML page; [`FragmentPayload`] turns it into the
//! JSON an in-page script swaps into the DOM. Neither adapter looks at the
//! store.

use super::error::WebError;
use super::templates::{self, ITEM_FORM, PARTIAL_LIST};
use crate::commands::CmdResult;
use crate::config::{MenuEntry, SiteConfig};
use crate::model::{ItemDetail, UserSummary};
use serde::Serialize;
use serde_json::{Map, Value};

/// Page-wide values every full page receives.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub site_title: String,
    pub menu: Vec<MenuEntry>,
    pub title: String,
    pub current_user: Option<UserSummary>,
}

impl PageContext {
    pub fn new(config: &SiteConfig, title: impl Into<String>) -> Self {
        Self {
            site_title: config.site_title.clone(),
            menu: config.menu.clone(),
            title: title.into(),
            current_user: None,
        }
    }

    pub fn with_user(mut self, user: Option<UserSummary>) -> Self {
        self.current_user = user;
        self
    }

    /// Renders `name` with this context merged under the view's own values.
    pub fn render(&self, name: &str, view: Value) -> Result<String, WebError> {
        let mut ctx = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(WebError::Internal(e.to_string())),
        };
        if let Value::Object(view) = view {
            ctx.extend(view);
        }
        Ok(templates::render(name, &Value::Object(ctx))?)
    }
}

/// Where an item form posts to and what it offers.
#[derive(Debug, Clone, Copy)]
pub struct FormTarget<'a> {
    pub action: &'a str,
    pub submit_label: &'a str,
    pub with_client: bool,
}

/// Template values of an item form, from a result carrying `submitted`.
pub fn item_form_view(result: &CmdResult, target: FormTarget<'_>) -> Value {
    serde_json::json!({
        "form": result.submitted,
        "errors": result.errors,
        "categories": result.categories,
        "tags": result.tags,
        "clients": result.clients,
        "object": result.detail,
        "action": target.action,
        "submit_label": target.submit_label,
        "with_client": target.with_client,
    })
}

pub fn render_item_form(result: &CmdResult, target: FormTarget<'_>) -> Result<String, WebError> {
    Ok(templates::render(ITEM_FORM, &item_form_view(result, target))?)
}

pub fn render_portfolio_list(items: &[ItemDetail]) -> Result<String, WebError> {
    Ok(templates::render(
        PARTIAL_LIST,
        &serde_json::json!({ "items": items }),
    )?)
}

/// JSON answer to an `XMLHttpRequest`.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct FragmentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_is_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_portfolio_list: Option<String>,
}

impl FragmentPayload {
    /// The initial GET: just the form.
    pub fn form(html_form: String) -> Self {
        Self {
            html_form: Some(html_form),
            ..Self::default()
        }
    }

    /// A mutation outcome. Accepted results carry the refreshed listing,
    /// rejected ones the form with its errors.
    pub fn outcome(result: &CmdResult, target: FormTarget<'_>) -> Result<Self, WebError> {
        if result.form_is_valid() {
            Ok(Self {
                form_is_valid: Some(true),
                html_portfolio_list: Some(render_portfolio_list(&result.listed_items)?),
                ..Self::default()
            })
        } else {
            Ok(Self {
                form_is_valid: Some(false),
                html_form: Some(render_item_form(result, target)?),
                ..Self::default()
            })
        }
    }
}
