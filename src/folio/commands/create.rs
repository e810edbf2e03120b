use crate::commands::helpers::{refreshed_listing, save_item, with_choices};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::item::{clean, ItemDraft, ItemFields, ItemFormKind};
use crate::forms::{FieldErrors, FormData, Validated};
use crate::media::{MediaRoot, IMAGES_DIR};
use crate::model::Item;
use crate::store::DataStore;

/// Creates an item through the record-bound form.
///
/// The item and its tags are saved together. On success the result carries
/// the refreshed listing; otherwise the submitted values and their errors.
pub fn run<S: DataStore>(store: &mut S, media: &MediaRoot, data: &FormData) -> Result<CmdResult> {
    let draft = match clean(store, ItemFormKind::Model, data)? {
        Validated::Valid(draft) => draft,
        Validated::Invalid(errors) => return rejected(store, data, errors),
    };

    let mut item = draft.to_item();
    item.set_tags(&draft.tag_ids);
    let stored = store_image(media, &mut item, &draft)?;
    if let Some(errors) = save_with_image(store, media, &item, stored.as_deref())? {
        return rejected(store, data, errors);
    }
    created(store, item)
}

/// Creates an item through the standalone form: the record is saved first and
/// its tag set attached afterwards.
pub fn run_manual<S: DataStore>(
    store: &mut S,
    media: &MediaRoot,
    data: &FormData,
) -> Result<CmdResult> {
    let draft = match clean(store, ItemFormKind::Manual, data)? {
        Validated::Valid(draft) => draft,
        Validated::Invalid(errors) => return rejected(store, data, errors),
    };

    let mut item = draft.to_item();
    let stored = store_image(media, &mut item, &draft)?;
    if let Some(errors) = save_with_image(store, media, &item, stored.as_deref())? {
        return rejected(store, data, errors);
    }
    item.set_tags(&draft.tag_ids);
    store.upsert(&item)?;
    created(store, item)
}

/// Copies the draft's image, if any, into the media root and records its
/// path on the item. Nothing is written to the store.
pub(crate) fn store_image(
    media: &MediaRoot,
    item: &mut Item,
    draft: &ItemDraft,
) -> Result<Option<String>> {
    let Some(file) = &draft.image else {
        return Ok(None);
    };
    let path = media.store_file(IMAGES_DIR, file)?;
    item.image = Some(path.clone());
    Ok(Some(path))
}

/// Saves the item. A freshly stored image is removed again when the save
/// is rejected or fails.
pub(crate) fn save_with_image<S: DataStore>(
    store: &mut S,
    media: &MediaRoot,
    item: &Item,
    stored: Option<&str>,
) -> Result<Option<FieldErrors>> {
    let outcome = save_item(store, item);
    if !matches!(outcome, Ok(None)) {
        if let Some(path) = stored {
            media.discard(path);
        }
    }
    outcome
}

pub(crate) fn rejected<S: DataStore>(
    store: &S,
    data: &FormData,
    errors: FieldErrors,
) -> Result<CmdResult> {
    let result = CmdResult::default()
        .with_errors(errors)
        .with_submitted(ItemFields::from_data(data));
    with_choices(result, store)
}

fn created<S: DataStore>(store: &S, item: Item) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_listed_items(refreshed_listing(store)?);
    result.add_message(CmdMessage::success(format!(
        "Portfolio item created: {}",
        item.title
    )));
    result.affected_items.push(item);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::detail;
    use crate::forms::item::SLUG_TAKEN;
    use crate::media::UploadedFile;
    use crate::store::memory::fixtures::StoreFixture;
    use std::fs;
    use tempfile::tempdir;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_category("Web", "web")
            .with_tag("Rust", "rust")
            .with_tag("Design", "design")
    }

    fn submission(f: &StoreFixture, title: &str, slug: &str) -> FormData {
        FormData::new()
            .with("title", title)
            .with("description", "Built in a weekend")
            .with("slug", slug)
            .with("is_published", "on")
            .with("category", f.category("web").id.to_string())
            .with("tags", f.tag("rust").id.to_string())
            .with("tags", f.tag("design").id.to_string())
    }

    #[test]
    fn both_paths_store_the_same_item() {
        let dir = tempdir().unwrap();
        let media = MediaRoot::new(dir.path());

        let mut f = fixture();
        let data = submission(&f, "Site Alpha", "site-a");
        let result = run(&mut f.store, &media, &data).unwrap();
        assert!(result.form_is_valid());
        let via_model = detail::run(&f.store, "site-a").unwrap().detail.unwrap();

        let mut g = fixture();
        let data = submission(&g, "Site Alpha", "site-a");
        let result = run_manual(&mut g.store, &media, &data).unwrap();
        assert!(result.form_is_valid());
        let via_manual = detail::run(&g.store, "site-a").unwrap().detail.unwrap();

        for d in [&via_model, &via_manual] {
            assert_eq!(d.item.title, "Site Alpha");
            assert_eq!(d.item.description, "Built in a weekend");
            assert_eq!(d.category.slug, "web");
            let mut tags: Vec<_> = d.tags.iter().map(|t| t.slug.as_str()).collect();
            tags.sort();
            assert_eq!(tags, vec!["design", "rust"]);
        }
    }

    #[test]
    fn success_carries_the_full_listing_including_drafts() {
        let dir = tempdir().unwrap();
        let mut f = fixture().with_draft("Hidden Work", "hidden", "web");
        let data = submission(&f, "Site Alpha", "site-a");
        let result = run(&mut f.store, &MediaRoot::new(dir.path()), &data).unwrap();

        assert_eq!(result.listed_items.len(), 2);
        assert_eq!(result.affected_items[0].slug, "site-a");
        assert!(result.submitted.is_none());
    }

    #[test]
    fn invalid_submission_echoes_values_and_errors() {
        let dir = tempdir().unwrap();
        let mut f = fixture();
        let data = submission(&f, &"x".repeat(60), "site-a");
        let result = run(&mut f.store, &MediaRoot::new(dir.path()), &data).unwrap();

        assert!(!result.form_is_valid());
        assert!(result.errors.has("title"));
        assert_eq!(result.submitted.unwrap().slug, "site-a");
        assert_eq!(result.categories.len(), 1);
        assert!(f.store.find_by::<Item>("slug", "site-a").unwrap().is_none());
    }

    #[test]
    fn slug_collision_is_a_field_error_on_both_paths() {
        let dir = tempdir().unwrap();
        let media = MediaRoot::new(dir.path());
        let mut f = fixture().with_published("Existing", "site-a", "web");

        let data = submission(&f, "Site Alpha", "site-a");
        let result = run(&mut f.store, &media, &data).unwrap();
        assert_eq!(result.errors.get("slug"), &[SLUG_TAKEN]);

        let result = run_manual(&mut f.store, &media, &data).unwrap();
        assert_eq!(result.errors.get("slug"), &[SLUG_TAKEN]);
        assert_eq!(f.store.load::<Item>().unwrap().len(), 1);
    }

    #[test]
    fn manual_path_rejects_digits_in_title() {
        let dir = tempdir().unwrap();
        let mut f = fixture();
        let data = submission(&f, "Site 51", "site-a");
        let result = run_manual(&mut f.store, &MediaRoot::new(dir.path()), &data).unwrap();
        assert!(result.errors.has("title"));
    }

    #[test]
    fn stores_the_image_under_images() {
        let dir = tempdir().unwrap();
        let upload = dir.path().join("tmp-upload");
        fs::write(&upload, b"png bytes").unwrap();
        let media = MediaRoot::new(dir.path().join("media"));

        let mut f = fixture();
        let data = submission(&f, "Site Alpha", "site-a")
            .with_file("image", UploadedFile::new("shot.png", &upload));
        run(&mut f.store, &media, &data).unwrap();

        let image = f.item("site-a").image.unwrap();
        assert!(image.starts_with("images/shot_"));
        assert!(media.resolve(&image).exists());
    }

    #[test]
    fn failed_image_copy_saves_nothing() {
        let dir = tempdir().unwrap();
        let media = MediaRoot::new(dir.path().join("media"));
        let missing = dir.path().join("gone");

        let mut f = fixture();
        let data = submission(&f, "Site Alpha", "site-a")
            .with_file("image", UploadedFile::new("shot.png", &missing));
        assert!(run(&mut f.store, &media, &data).is_err());
        assert!(run_manual(&mut f.store, &media, &data).is_err());
        assert!(f.store.find_by::<Item>("slug", "site-a").unwrap().is_none());

        // Once the upload is readable the same submission goes through.
        fs::write(&missing, b"png bytes").unwrap();
        assert!(run(&mut f.store, &media, &data).unwrap().form_is_valid());
    }

    #[test]
    fn rejected_save_removes_the_stored_image() {
        let dir = tempdir().unwrap();
        let upload = dir.path().join("tmp-upload");
        fs::write(&upload, b"png bytes").unwrap();
        let media = MediaRoot::new(dir.path().join("media"));

        let mut f = fixture().with_published("Existing", "site-a", "web");
        let data = submission(&f, "Site Alpha", "site-a")
            .with_file("image", UploadedFile::new("shot.png", &upload));
        let result = run(&mut f.store, &media, &data).unwrap();

        assert_eq!(result.errors.get("slug"), &[SLUG_TAKEN]);
        let images = media.resolve(IMAGES_DIR);
        assert_eq!(fs::read_dir(images).unwrap().count(), 0);
    }
}
