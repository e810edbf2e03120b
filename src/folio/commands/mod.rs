use crate::config::SiteConfig;
use crate::forms::item::ItemFields;
use crate::forms::FieldErrors;
use crate::model::{Category, Client, Item, ItemDetail, Tag, User};
use crate::paging::Page;

pub mod admin;
pub mod archive;
pub mod category;
pub mod config;
pub mod create;
pub mod delete;
pub mod detail;
pub mod helpers;
pub mod list;
pub mod publish;
pub mod tag;
pub mod taxonomy;
pub mod update;
pub mod upload;
pub mod users;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// The neutral outcome of every command.
///
/// Commands fill in what they produced and nothing else; presentation
/// (terminal, full page, JSON fragment) is derived from it by the caller.
#[derive(Debug, Default)]
pub struct CmdResult {
    /// Items created, changed or deleted by the command.
    pub affected_items: Vec<Item>,
    /// Full ordered listing: the query result for list commands, the
    /// refreshed unfiltered listing after a mutation.
    pub listed_items: Vec<ItemDetail>,
    /// The requested page of `listed_items`, for paginated views.
    pub page: Option<Page<ItemDetail>>,
    pub detail: Option<ItemDetail>,
    pub category: Option<Category>,
    pub tag: Option<Tag>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub clients: Vec<Client>,
    /// Validation errors. Empty when the submission was accepted.
    pub errors: FieldErrors,
    /// Submitted values, echoed back when `errors` is not empty.
    pub submitted: Option<ItemFields>,
    pub upload_path: Option<String>,
    pub user: Option<User>,
    pub config: Option<SiteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn form_is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn with_listed_items(mut self, items: Vec<ItemDetail>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_page(mut self, page: Page<ItemDetail>) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_submitted(mut self, fields: ItemFields) -> Self {
        self.submitted = Some(fields);
        self
    }

    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }
}
