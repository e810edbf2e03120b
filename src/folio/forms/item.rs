//! Portfolio item forms.
//!
//! Two entry points create items and each has its own rules:
//!
//! - [`ItemFormKind::Model`]: the form bound to the item record, used by
//!   create and edit. Title is required, at most 50 characters. Client is
//!   selectable.
//! - [`ItemFormKind::Manual`]: the standalone form that builds the record by
//!   hand. Title is 5 to 255 characters with no digits. Client is not
//!   offered, and `is_published` starts checked.

use super::{check_max_len, required_text, FieldErrors, FormData, Validated, REQUIRED};
use crate::error::Result;
use crate::media::UploadedFile;
use crate::model::{Category, Client, Item, Tag};
use crate::store::DataStore;
use serde::Serialize;
use uuid::Uuid;

pub const TITLE_MAX: usize = 255;
pub const MODEL_TITLE_MAX: usize = 50;
pub const MANUAL_TITLE_MIN: usize = 5;
pub const SLUG_MAX: usize = 255;

pub const SLUG_TAKEN: &str = "Portfolio item with this Slug already exists.";
const INVALID_SLUG: &str =
    "Enter a valid “slug” consisting of letters, numbers, underscores or hyphens.";
const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
const INVALID_IMAGE: &str = "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFormKind {
    Model,
    Manual,
}

/// Form values as submitted (or as loaded from an item), for re-rendering.
///
/// Reference fields hold the raw submitted strings so an invalid choice is
/// shown back exactly as it was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemFields {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub category: String,
    pub tags: Vec<String>,
    pub client: String,
    /// Image already attached to the item being edited.
    pub image: Option<String>,
}

impl ItemFields {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            title: data.get("title").unwrap_or("").to_string(),
            description: data.get("description").unwrap_or("").to_string(),
            slug: data.get("slug").unwrap_or("").to_string(),
            is_published: data.flag("is_published"),
            category: data.get("category").unwrap_or("").to_string(),
            tags: data.get_all("tags").to_vec(),
            client: data.get("client").unwrap_or("").to_string(),
            image: None,
        }
    }

    pub fn from_item(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            slug: item.slug.clone(),
            is_published: item.is_published,
            category: item.category_id.to_string(),
            tags: item.tag_ids.iter().map(Uuid::to_string).collect(),
            client: item.client_id.map(|id| id.to_string()).unwrap_or_default(),
            image: item.image.clone(),
        }
    }

    /// Blank values for a fresh form of the given kind.
    pub fn initial(kind: ItemFormKind) -> Self {
        Self {
            is_published: kind == ItemFormKind::Manual,
            ..Self::default()
        }
    }
}

/// A cleaned item submission, with every reference resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub category_id: Uuid,
    pub tag_ids: Vec<Uuid>,
    pub client_id: Option<Uuid>,
    pub image: Option<UploadedFile>,
}

impl ItemDraft {
    /// Builds a new record from the draft, without tags or image.
    pub fn to_item(&self) -> Item {
        let mut item = Item::new(self.title.clone(), self.slug.clone(), self.category_id);
        self.apply_scalars(&mut item);
        item
    }

    /// Overwrites every editable field of `item` except the image.
    pub fn apply_to(&self, item: &mut Item) {
        item.title = self.title.clone();
        item.slug = self.slug.clone();
        item.category_id = self.category_id;
        self.apply_scalars(item);
        item.set_tags(&self.tag_ids);
    }

    fn apply_scalars(&self, item: &mut Item) {
        item.description = self.description.clone();
        item.is_published = self.is_published;
        item.client_id = self.client_id;
    }
}

/// Validates an item submission against the rules of `kind`.
///
/// Store errors are returned as `Err`; every user mistake is returned as
/// `Ok(Validated::Invalid(..))`. Slug uniqueness is left to the store.
pub fn clean<S: DataStore>(
    store: &S,
    kind: ItemFormKind,
    data: &FormData,
) -> Result<Validated<ItemDraft>> {
    let mut errors = FieldErrors::new();

    let title = match kind {
        ItemFormKind::Model => clean_model_title(data, &mut errors),
        ItemFormKind::Manual => clean_manual_title(data, &mut errors),
    };
    let description = data.get("description").unwrap_or("").trim().to_string();
    let slug = clean_slug(data, &mut errors);
    let is_published = data.flag("is_published");

    let category_id = match data.get("category").map(str::trim).filter(|v| !v.is_empty()) {
        None => {
            errors.add("category", REQUIRED);
            None
        }
        Some(raw) => {
            let found = choice::<Category, S>(store, raw)?;
            if found.is_none() {
                errors.add("category", INVALID_CHOICE);
            }
            found
        }
    };

    let mut tag_ids = Vec::new();
    for raw in data.get_all("tags") {
        match choice::<Tag, S>(store, raw.trim())? {
            Some(id) => tag_ids.push(id),
            None => errors.add(
                "tags",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    raw
                ),
            ),
        }
    }

    let client_id = match kind {
        ItemFormKind::Manual => None,
        ItemFormKind::Model => {
            match data.get("client").map(str::trim).filter(|v| !v.is_empty()) {
                None => None,
                Some(raw) => {
                    let found = choice::<Client, S>(store, raw)?;
                    if found.is_none() {
                        errors.add("client", INVALID_CHOICE);
                    }
                    found
                }
            }
        }
    };

    let image = data.file("image").cloned();
    if let Some(file) = &image {
        if !file.is_image() {
            errors.add("image", INVALID_IMAGE);
        }
    }

    Ok(Validated::from_errors(
        ItemDraft {
            title,
            description,
            slug,
            is_published,
            category_id: category_id.unwrap_or_default(),
            tag_ids,
            client_id,
            image,
        },
        errors,
    ))
}

fn clean_model_title(data: &FormData, errors: &mut FieldErrors) -> String {
    let title = required_text(data, "title", errors);
    if title.is_empty() {
        return title;
    }
    check_max_len(&title, "title", TITLE_MAX, errors);
    if title.chars().count() > MODEL_TITLE_MAX {
        errors.add(
            "title",
            format!("Title must not exceed {} characters.", MODEL_TITLE_MAX),
        );
    }
    title
}

fn clean_manual_title(data: &FormData, errors: &mut FieldErrors) -> String {
    let title = required_text(data, "title", errors);
    if title.is_empty() {
        return title;
    }
    let len = title.chars().count();
    if len < MANUAL_TITLE_MIN {
        errors.add(
            "title",
            format!(
                "Title is too short (at least {} characters).",
                MANUAL_TITLE_MIN
            ),
        );
    }
    check_max_len(&title, "title", TITLE_MAX, errors);
    if title.chars().any(|c| c.is_ascii_digit()) {
        errors.add("title", "Title must not contain digits.");
    }
    title
}

fn clean_slug(data: &FormData, errors: &mut FieldErrors) -> String {
    let slug = required_text(data, "slug", errors);
    if slug.is_empty() {
        return slug;
    }
    check_max_len(&slug, "slug", SLUG_MAX, errors);
    if !is_valid_slug(&slug) {
        errors.add("slug", INVALID_SLUG);
    }
    slug
}

/// `[-a-zA-Z0-9_]+`
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolves a submitted id to an existing record of type `R`.
fn choice<R, S>(store: &S, raw: &str) -> Result<Option<Uuid>>
where
    R: crate::store::Record,
    S: DataStore,
{
    let Ok(id) = Uuid::parse_str(raw) else {
        return Ok(None);
    };
    match store.get::<R>(&id) {
        Ok(_) => Ok(Some(id)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
