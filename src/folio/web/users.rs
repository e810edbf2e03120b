//! Registration, login and the profile page.

use super::error::WebError;
use super::handlers::{app_state, page_context};
use super::request::{log_in, log_out, next_param, read_form, session_user};
use super::templates::{LOGIN, PROFILE, REGISTER};
use crate::forms::user::RegistrationFields;
use salvo::prelude::*;
use serde_json::json;

pub const PROFILE_URL: &str = "/users/profile/";
pub const LOGIN_URL: &str = "/users/login/";

#[handler]
pub async fn register_form(depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let html = page_context(&state, &api, depot, "Register").render(
        REGISTER,
        json!({ "form": RegistrationFields::default(), "errors": {} }),
    )?;
    res.render(Text::Html(html));
    Ok(())
}

/// A successful sign-up logs the new user in.
#[handler]
pub async fn register(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let data = read_form(req).await?;
    let state = app_state(depot)?;
    let mut api = state.api.lock().await;
    let result = api.register(&data)?;

    if let Some(user) = result.user.as_ref().filter(|_| result.form_is_valid()) {
        tracing::info!(username = %user.username, "user registered");
        log_in(depot, user.id)?;
        res.render(Redirect::found(PROFILE_URL));
        return Ok(());
    }

    let html = page_context(&state, &api, depot, "Register").render(
        REGISTER,
        json!({ "form": RegistrationFields::from_data(&data), "errors": result.errors }),
    )?;
    res.status_code(StatusCode::BAD_REQUEST);
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn login_form(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let next = next_param(req);
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let html = page_context(&state, &api, depot, "Log in").render(
        LOGIN,
        json!({ "email": "", "errors": {}, "next": next }),
    )?;
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn login(req: &mut Request, depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let next = next_param(req);
    let data = read_form(req).await?;
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let result = api.authenticate(&data)?;

    if let Some(user) = result.user.as_ref().filter(|_| result.form_is_valid()) {
        log_in(depot, user.id)?;
        res.render(Redirect::found(next.as_deref().unwrap_or(PROFILE_URL)));
        return Ok(());
    }

    let html = page_context(&state, &api, depot, "Log in").render(
        LOGIN,
        json!({
            "email": data.get("email").unwrap_or(""),
            "errors": result.errors,
            "next": next,
        }),
    )?;
    res.status_code(StatusCode::BAD_REQUEST);
    res.render(Text::Html(html));
    Ok(())
}

#[handler]
pub async fn logout(depot: &mut Depot, res: &mut Response) {
    log_out(depot);
    res.render(Redirect::found("/"));
}

/// Anonymous visitors are sent to the login form and brought back after.
#[handler]
pub async fn profile(depot: &mut Depot, res: &mut Response) -> Result<(), WebError> {
    let Some(user_id) = session_user(depot) else {
        res.render(Redirect::found(format!("{}?next={}", LOGIN_URL, PROFILE_URL)));
        return Ok(());
    };
    let state = app_state(depot)?;
    let api = state.api.lock().await;
    let user = match api.profile(&user_id) {
        Ok(result) => result.user,
        // The account behind a stale session is gone.
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };
    let Some(user) = user else {
        log_out(depot);
        res.render(Redirect::found(format!("{}?next={}", LOGIN_URL, PROFILE_URL)));
        return Ok(());
    };

    let html = page_context(&state, &api, depot, "Profile")
        .render(PROFILE, json!({ "user": user.summary() }))?;
    res.render(Text::Html(html));
    Ok(())
}
