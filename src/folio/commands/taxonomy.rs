//! Categories, tags and clients.
//!
//! Removing a record keeps items consistent with it:
//! - a category takes its items with it,
//! - a tag is detached from every item,
//! - a client is cleared from its items, which stay.

use crate::commands::helpers::sorted_by_name;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::forms::item::is_valid_slug;
use crate::model::{Category, Client, Item, Tag};
use crate::store::DataStore;
use validator::ValidateEmail;

pub fn list_categories<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.categories = sorted_by_name(store.load::<Category>()?, |c| &c.name);
    Ok(result)
}

pub fn add_category<S: DataStore>(store: &mut S, name: &str, slug: &str) -> Result<CmdResult> {
    check_slug(slug)?;
    let category = Category::new(name.trim(), slug);
    store.save(&category)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category created: {} ({})",
        category.name, category.slug
    )));
    result.categories.push(category);
    Ok(result)
}

pub fn remove_category<S: DataStore>(store: &mut S, slug: &str) -> Result<CmdResult> {
    let category: Category = store.get_by_slug(slug)?;
    let mut result = CmdResult::default();

    for item in store.load::<Item>()? {
        if item.category_id == category.id {
            store.remove::<Item>(&item.id)?;
            result.affected_items.push(item);
        }
    }
    store.remove::<Category>(&category.id)?;

    result.add_message(CmdMessage::success(format!(
        "Category removed: {}",
        category.name
    )));
    if !result.affected_items.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Deleted {} item(s) in that category.",
            result.affected_items.len()
        )));
    }
    result.categories.push(category);
    Ok(result)
}

pub fn list_tags<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.tags = sorted_by_name(store.load::<Tag>()?, |t| &t.name);
    Ok(result)
}

pub fn add_tag<S: DataStore>(store: &mut S, name: &str, slug: &str) -> Result<CmdResult> {
    check_slug(slug)?;
    let tag = Tag::new(name.trim(), slug);
    store.save(&tag)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Tag created: {} ({})",
        tag.name, tag.slug
    )));
    result.tags.push(tag);
    Ok(result)
}

pub fn remove_tag<S: DataStore>(store: &mut S, slug: &str) -> Result<CmdResult> {
    let tag: Tag = store.get_by_slug(slug)?;
    let mut result = CmdResult::default();

    for mut item in store.load::<Item>()? {
        if item.has_tag(&tag.id) {
            item.tag_ids.retain(|id| id != &tag.id);
            store.upsert(&item)?;
            result.affected_items.push(item);
        }
    }
    store.remove::<Tag>(&tag.id)?;

    result.add_message(CmdMessage::success(format!(
        "Tag removed: {} (detached from {} item(s))",
        tag.name,
        result.affected_items.len()
    )));
    result.tags.push(tag);
    Ok(result)
}

pub fn list_clients<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.clients = sorted_by_name(store.load::<Client>()?, |c| &c.name);
    Ok(result)
}

pub fn add_client<S: DataStore>(store: &mut S, name: &str, email: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FolioError::Api("Client name cannot be empty".to_string()));
    }
    if !email.validate_email() {
        return Err(FolioError::Api(format!("'{}' is not a valid email address", email)));
    }
    let client = Client::new(name, email);
    store.save(&client)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Client created: {}", client.name)));
    result.clients.push(client);
    Ok(result)
}

pub fn remove_client<S: DataStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let mut matching: Vec<Client> = store
        .load::<Client>()?
        .into_iter()
        .filter(|c| c.name == name)
        .collect();
    let client = match matching.len() {
        0 => return Err(FolioError::not_found(format!("Client '{}'", name))),
        1 => matching.remove(0),
        n => {
            return Err(FolioError::Api(format!(
                "{} clients are named '{}'",
                n, name
            )))
        }
    };

    let mut result = CmdResult::default();
    for mut item in store.load::<Item>()? {
        if item.client_id == Some(client.id) {
            item.client_id = None;
            store.upsert(&item)?;
            result.affected_items.push(item);
        }
    }
    store.remove::<Client>(&client.id)?;

    result.add_message(CmdMessage::success(format!(
        "Client removed: {}",
        client.name
    )));
    result.clients.push(client);
    Ok(result)
}

fn check_slug(slug: &str) -> Result<()> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(FolioError::Api(format!(
            "'{}' is not a valid slug (letters, numbers, underscores or hyphens)",
            slug
        )))
    }
}
