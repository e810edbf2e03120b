//! Portfolio pages and editor forms.

use super::error::WebError;
use super::mode::ResponseMode;
use super::render::{item_form_view, render_item_form, FormTarget, FragmentPayload, PageContext};
use super::request::{page_param, read_form, session_user};
use super::templates::{
    ABOUT, DELETE_FORM, DELETE_PAGE, DETAIL, INDEX, ITEM_FORM_PAGE, LISTING, UPLOAD,
    UPLOAD_SUCCESS,
};
use super::AppState;
use crate::api::FolioApi;
use crate::commands::CmdResult;
use crate::forms::item::ItemFormKind;
use crate::model::{ItemDetail, User, UserSummary};
use crate::paging::Page;
use crate::store::fs::FileStore;
use crate::store::DataStore;
use chrono::{Datelike, Utc};
use salvo::prelude::*;
use serde_json::json;
use std::sync::Arc;

const CREATE_TARGET: FormTarget<'static> = FormTarget {
    action: "/create/",
    submit_label: "Save",
    with_client: true,
};

const MANUAL_TARGET: FormTarget<'static> = FormTarget {
    action: "/create-non-model/",
    submit_label: "Save",
    with_client: false,
};

pub(crate) fn app_state(depot: &Depot) -> Result<Arc<AppState>, WebError> {
    depot
        .obtain::<Arc<AppState>>()
        .map(Arc::clone)
        .map_err(|_| WebError::Internal("application state is not installed".into()))
}

pub(crate) fn current_user(api: &FolioApi<FileStore>, depot: &Depot) -> Option<UserSummary> {
    let id = session_user(depot)?;
    api.store().get::<User>(&id).ok().map(|user| user.summary())
}

pub(crate) fn page_context(
    state: &AppState,
    api: &FolioApi<FileStore>,
    depot: &Depot,
    title: impl Into<String>,
) -> PageContext {
    PageContext::new(&state.config, title).with_user(current_user(api, depot))
}

fn listing_page(result: &CmdResult) -> Result<&Page<ItemDetail>, WebError> {
    result
        .page
        .as_ref()
        .ok_or_else(|| WebError::Internal("listing without a page".into()))
}

/// `/`: published items, newest first.
#[handler]
pub async fn index(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let page = page_param(req);
    let result = api.list_published(page.as_deref(), state.config.paginate_by)?;

    let listed = &result.listed_items;
    let html = page_context(&state, &api, depot, "Portfolio").render(
        INDEX,
        json!({
            "page": listing_page(&result)?,
            "item_count": listed.len(),
            "has_items": !listed.is_empty(),
            "first_item": listed.first(),
            "last_item": listed.last(),
        }),
    )?;
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn detail(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let slug = req.param::<String>("slug").unwrap_or_default();
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let result = api.published_detail(&slug)?;
    let item = result
        .detail
        .ok_or_else(|| WebError::NotFound(slug.clone()))?;

    let html = page_context(&state, &api, depot, item.item.title.clone())
        .render(DETAIL, json!({ "item": item }))?;
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn archive(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    // The route only matches four digits.
    let year = req
        .param::<i32>("year")
        .ok_or_else(|| WebError::NotFound("archive year".to_string()))?;
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let page = page_param(req);
    let result = api.list_by_year(year, page.as_deref(), state.config.paginate_by)?;

    let html = page_context(&state, &api, depot, format!("Archive for {}", year)).render(
        LISTING,
        json!({
            "page": listing_page(&result)?,
            "year": year,
            "base_url": format!("/archive/{}/", year),
            "empty_message": format!("Nothing was added in {}.", year),
        }),
    )?;
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn category(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let slug = req.param::<String>("slug").unwrap_or_default();
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let page = page_param(req);
    let result = api.list_by_category(&slug, page.as_deref(), state.config.paginate_by)?;
    let name = result
        .category
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_default();

    let html = page_context(&state, &api, depot, format!("Category: {}", name)).render(
        LISTING,
        json!({
            "page": listing_page(&result)?,
            "category": result.category,
            "base_url": format!("/category/{}/", slug),
        }),
    )?;
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn tag(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let slug = req.param::<String>("slug").unwrap_or_default();
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let page = page_param(req);
    let result = api.list_by_tag(&slug, page.as_deref(), state.config.paginate_by)?;
    let name = result
        .tag
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_default();

    let html = page_context(&state, &api, depot, format!("Tag: {}", name)).render(
        LISTING,
        json!({
            "page": listing_page(&result)?,
            "tag": result.tag,
            "base_url": format!("/tag/{}/", slug),
        }),
    )?;
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn about(depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let html = page_context(&state, &api, depot, "About")
        .render(ABOUT, json!({ "current_year": Utc::now().year() }))?;
    res.render(Text::Html(html));
    Ok(())
}

// --- Editor forms ---

/// Answers a create/update/delete outcome in the caller's mode.
///
/// Fragment callers always get 200 and decide from `form_is_valid`. Page
/// callers are redirected to the index on success and get the form back
/// with 400 otherwise.
fn respond_to_mutation(
    res: &mut Response,
    mode: ResponseMode,
    result: &CmdResult,
    target: FormTarget<'_>,
    page: PageContext,
) -> Result<(), WebError> {
    match mode {
        ResponseMode::Fragment => {
            res.render(Json(FragmentPayload::outcome(result, target)?));
        }
        ResponseMode::Page if result.form_is_valid() => {
            res.render(Redirect::found("/"));
        }
        ResponseMode::Page => {
            let html = page.render(ITEM_FORM_PAGE, item_form_view(result, target))?;
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Html(html));
        }
    }
    Ok(())
}

/// Answers the GET of an item form in the caller's mode.
fn respond_with_form(
    res: &mut Response,
    mode: ResponseMode,
    result: &CmdResult,
    target: FormTarget<'_>,
    page: PageContext,
) -> Result<(), WebError> {
    match mode {
        ResponseMode::Fragment => {
            res.render(Json(FragmentPayload::form(render_item_form(result, target)?)));
        }
        ResponseMode::Page => {
            res.render(Text::Html(page.render(ITEM_FORM_PAGE, item_form_view(result, target))?));
        }
    }
    Ok(())
}

#[handler]
pub async fn create_form(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let mode = ResponseMode::of(req);
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let result = api.new_item_form(ItemFormKind::Model)?;
    let page = page_context(&state, &api, depot, "Add portfolio item");
    respond_with_form(res, mode, &result, CREATE_TARGET, page)
}

#[handler]
pub async fn create(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let mode = ResponseMode::of(req);
    let data = read_form(req).await?;
    let state = app_state(depot)?;
    let mut api = state.api.lock().await;
    let result = api.create_item(&data)?;
    let page = page_context(&state, &api, depot, "Add portfolio item");
    respond_to_mutation(res, mode, &result, CREATE_TARGET, page)
}

#[handler]
pub async fn create_manual_form(depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let result = api.new_item_form(ItemFormKind::Manual)?;
    let html = page_context(&state, &api, depot, "Add portfolio item")
        .render(ITEM_FORM_PAGE, item_form_view(&result, MANUAL_TARGET))?;
    res.render(Text::Html(html));
    Ok(())
}

/// The hand-built create form answers full pages only.
#[handler]
pub async fn create_manual(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let data = read_form(req).await?;
    let state = app_state(depot)?;
    let mut api = state.api.lock().await;
    let result = api.create_item_manual(&data)?;
    let page = page_context(&state, &api, depot, "Add portfolio item");
    respond_to_mutation(res, ResponseMode::Page, &result, MANUAL_TARGET, page)
}

fn edit_target(slug: &str) -> (String, &'static str) {
    (format!("/edit/{}/", slug), "Update")
}

#[handler]
pub async fn edit_form(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let mode = ResponseMode::of(req);
    let slug = req.param::<String>("slug").unwrap_or_default();
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let result = api.edit_item_form(&slug)?;

    let (action, submit_label) = edit_target(&slug);
    let target = FormTarget {
        action: &action,
        submit_label,
        with_client: true,
    };
    let page = page_context(&state, &api, depot, "Edit portfolio item");
    respond_with_form(res, mode, &result, target, page)
}

#[handler]
pub async fn edit(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let mode = ResponseMode::of(req);
    let slug = req.param::<String>("slug").unwrap_or_default();
    let data = read_form(req).await?;
    let state = app_state(depot)?;
    let mut api = state.api.lock().await;
    let result = api.update_item(&slug, &data)?;

    let (action, submit_label) = edit_target(&slug);
    let target = FormTarget {
        action: &action,
        submit_label,
        with_client: true,
    };
    let page = page_context(&state, &api, depot, "Edit portfolio item");
    respond_to_mutation(res, mode, &result, target, page)
}

#[handler]
pub async fn delete_confirm(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let mode = ResponseMode::of(req);
    let slug = req.param::<String>("slug").unwrap_or_default();
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let result = api.delete_confirmation(&slug)?;
    let view = json!({ "object": result.detail });

    match mode {
        ResponseMode::Fragment => {
            let html = super::templates::render(DELETE_FORM, &view)?;
            res.render(Json(FragmentPayload::form(html)));
        }
        ResponseMode::Page => {
            let html = page_context(&state, &api, depot, "Delete portfolio item")
                .render(DELETE_PAGE, view)?;
            res.render(Text::Html(html));
        }
    }
    Ok(())
}

/// Hard delete, for both `POST` and `DELETE`.
#[handler]
pub async fn delete(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let mode = ResponseMode::of(req);
    let slug = req.param::<String>("slug").unwrap_or_default();
    let state = app_state(depot)?;
    let mut api = state.api.lock().await;
    let result = api.delete_item(&slug)?;
    let page = page_context(&state, &api, depot, "Delete portfolio item");
    respond_to_mutation(res, mode, &result, CREATE_TARGET, page)
}

// --- Uploads ---

#[handler]
pub async fn upload_form(depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let html = page_context(&state, &api, depot, "Upload file")
        .render(UPLOAD, json!({ "errors": {} }))?;
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn upload(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let data = read_form(req).await?;
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let result = api.upload_file(&data)?;
    let page = page_context(&state, &api, depot, "Upload file");

    match &result.upload_path {
        Some(path) => {
            let html = page.render(UPLOAD_SUCCESS, json!({ "file_path": path }))?;
            res.render(Text::Html(html));
        }
        None => {
            let html = page.render(UPLOAD, json!({ "errors": result.errors }))?;
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Html(html));
        }
    }
    Ok(())
}
