//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all folio operations, whether they come from the web
//! server or the admin CLI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns** the store and the media root, so callers never hold either
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Presentation concerns**: no HTML, JSON payloads or terminal output
//! - **Request handling**: mode detection, sessions and status codes live in
//!   the web layer
//!
//! ## Generic Over DataStore
//!
//! `FolioApi<S: DataStore>` is generic over the storage backend:
//! - Production: `FolioApi<FileStore>`
//! - Testing: `FolioApi<InMemoryStore>`

use crate::commands::{self, admin::AdminFilter, config::ConfigAction, CmdResult};
use crate::error::Result;
use crate::forms::item::{ItemFields, ItemFormKind};
use crate::forms::FormData;
use crate::media::MediaRoot;
use crate::store::DataStore;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// The main API facade for folio operations.
pub struct FolioApi<S: DataStore> {
    store: S,
    media: MediaRoot,
    data_dir: PathBuf,
}

impl<S: DataStore> FolioApi<S> {
    pub fn new(store: S, media: MediaRoot, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            media,
            data_dir: data_dir.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn media(&self) -> &MediaRoot {
        &self.media
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // --- Public views ---

    pub fn list_published(&self, page: Option<&str>, per_page: usize) -> Result<CmdResult> {
        commands::list::run(&self.store, page, per_page)
    }

    pub fn published_detail(&self, slug: &str) -> Result<CmdResult> {
        commands::detail::run(&self.store, slug)
    }

    pub fn list_by_year(&self, year: i32, page: Option<&str>, per_page: usize) -> Result<CmdResult> {
        commands::archive::run(&self.store, year, page, per_page)
    }

    pub fn list_by_category(
        &self,
        slug: &str,
        page: Option<&str>,
        per_page: usize,
    ) -> Result<CmdResult> {
        commands::category::run(&self.store, slug, page, per_page)
    }

    pub fn list_by_tag(&self, slug: &str, page: Option<&str>, per_page: usize) -> Result<CmdResult> {
        commands::tag::run(&self.store, slug, page, per_page)
    }

    // --- Item mutations ---

    /// A blank item form with its option lists.
    pub fn new_item_form(&self, kind: ItemFormKind) -> Result<CmdResult> {
        let result = CmdResult::default().with_submitted(ItemFields::initial(kind));
        commands::helpers::with_choices(result, &self.store)
    }

    pub fn edit_item_form(&self, slug: &str) -> Result<CmdResult> {
        commands::detail::editable(&self.store, slug)
    }

    pub fn delete_confirmation(&self, slug: &str) -> Result<CmdResult> {
        commands::delete::confirm(&self.store, slug)
    }

    pub fn create_item(&mut self, data: &FormData) -> Result<CmdResult> {
        commands::create::run(&mut self.store, &self.media, data)
    }

    pub fn create_item_manual(&mut self, data: &FormData) -> Result<CmdResult> {
        commands::create::run_manual(&mut self.store, &self.media, data)
    }

    pub fn update_item(&mut self, slug: &str, data: &FormData) -> Result<CmdResult> {
        commands::update::run(&mut self.store, &self.media, slug, data)
    }

    pub fn delete_item(&mut self, slug: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, slug)
    }

    pub fn upload_file(&self, data: &FormData) -> Result<CmdResult> {
        commands::upload::run(&self.media, data)
    }

    // --- Administration ---

    pub fn admin_items(
        &self,
        filter: &AdminFilter,
        page: Option<&str>,
        per_page: usize,
    ) -> Result<CmdResult> {
        commands::admin::run(&self.store, filter, page, per_page)
    }

    pub fn show_item(&self, slug: &str) -> Result<CmdResult> {
        commands::detail::editable(&self.store, slug)
    }

    pub fn publish_items(&mut self, slugs: &[String]) -> Result<CmdResult> {
        commands::publish::set_published(&mut self.store, slugs, true)
    }

    pub fn draft_items(&mut self, slugs: &[String]) -> Result<CmdResult> {
        commands::publish::set_published(&mut self.store, slugs, false)
    }

    pub fn list_categories(&self) -> Result<CmdResult> {
        commands::taxonomy::list_categories(&self.store)
    }

    pub fn add_category(&mut self, name: &str, slug: &str) -> Result<CmdResult> {
        commands::taxonomy::add_category(&mut self.store, name, slug)
    }

    pub fn remove_category(&mut self, slug: &str) -> Result<CmdResult> {
        commands::taxonomy::remove_category(&mut self.store, slug)
    }

    pub fn list_tags(&self) -> Result<CmdResult> {
        commands::taxonomy::list_tags(&self.store)
    }

    pub fn add_tag(&mut self, name: &str, slug: &str) -> Result<CmdResult> {
        commands::taxonomy::add_tag(&mut self.store, name, slug)
    }

    pub fn remove_tag(&mut self, slug: &str) -> Result<CmdResult> {
        commands::taxonomy::remove_tag(&mut self.store, slug)
    }

    pub fn list_clients(&self) -> Result<CmdResult> {
        commands::taxonomy::list_clients(&self.store)
    }

    pub fn add_client(&mut self, name: &str, email: &str) -> Result<CmdResult> {
        commands::taxonomy::add_client(&mut self.store, name, email)
    }

    pub fn remove_client(&mut self, name: &str) -> Result<CmdResult> {
        commands::taxonomy::remove_client(&mut self.store, name)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    // --- Users ---

    pub fn register(&mut self, data: &FormData) -> Result<CmdResult> {
        commands::users::register(&mut self.store, data)
    }

    pub fn authenticate(&self, data: &FormData) -> Result<CmdResult> {
        commands::users::authenticate(&self.store, data)
    }

    pub fn profile(&self, user_id: &Uuid) -> Result<CmdResult> {
        commands::users::profile(&self.store, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use tempfile::tempdir;

    fn api(dir: &Path) -> FolioApi<InMemoryStore> {
        FolioApi::new(InMemoryStore::new(), MediaRoot::new(dir.join("media")), dir)
    }

    #[test]
    fn created_item_reaches_public_views_once_published() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.add_category("Web", "web").unwrap();
        let web = api.list_categories().unwrap().categories.remove(0);

        let data = FormData::new()
            .with("title", "Site X")
            .with("slug", "site-x")
            .with("category", web.id.to_string());
        let result = api.create_item(&data).unwrap();
        assert!(result.form_is_valid());

        assert!(api.published_detail("site-x").unwrap_err().is_not_found());
        assert!(api.list_by_category("web", None, 3).unwrap_err().is_not_found());

        api.publish_items(&["site-x".to_string()]).unwrap();
        assert!(api.published_detail("site-x").is_ok());
        assert_eq!(api.list_by_category("web", None, 3).unwrap().listed_items.len(), 1);

        api.delete_item("site-x").unwrap();
        assert!(api.published_detail("site-x").unwrap_err().is_not_found());
        assert!(api.list_by_category("web", None, 3).unwrap_err().is_not_found());
    }

    #[test]
    fn new_forms_carry_choices_and_initial_values() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.add_tag("Rust", "rust").unwrap();

        let result = api.new_item_form(ItemFormKind::Manual).unwrap();
        assert!(result.submitted.unwrap().is_published);
        assert_eq!(result.tags.len(), 1);
    }

    #[test]
    fn config_lives_in_the_data_dir() {
        let dir = tempdir().unwrap();
        let api = api(dir.path());
        api.config(ConfigAction::Set("site_title".into(), "Studio".into()))
            .unwrap();
        assert!(dir.path().join("config.json").exists());
    }
}
