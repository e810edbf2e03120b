//! Reading submissions and session state off a salvo request.

use super::error::WebError;
use crate::forms::FormData;
use crate::media::UploadedFile;
use salvo::http::ParseError;
use salvo::prelude::*;
use salvo::session::SessionDepotExt;
use uuid::Uuid;

pub const PAGE_PARAM: &str = "page";
pub const NEXT_PARAM: &str = "next";
const SESSION_USER: &str = "user_id";

/// Copies a urlencoded or multipart body into a [`FormData`].
///
/// Uploaded parts stay in salvo's temporary directory, which lives as long
/// as the request does; commands copy them into the media root.
pub async fn read_form(req: &mut Request) -> Result<FormData, WebError> {
    let parsed = match req.form_data().await {
        Ok(parsed) => parsed,
        Err(ParseError::NotFormData) => return Ok(FormData::new()),
        Err(e) => return Err(e.into()),
    };

    let mut data = FormData::new();
    for (key, values) in parsed.fields.iter_all() {
        for value in values {
            data.push(key, value.clone());
        }
    }
    for (key, parts) in parsed.files.iter_all() {
        // An empty file input still sends a part, with no file name.
        let file = parts
            .iter()
            .find_map(|part| part.name().filter(|n| !n.is_empty()).map(|n| (n, part)));
        if let Some((name, part)) = file {
            data.insert_file(key, UploadedFile::new(name, part.path().clone()));
        }
    }
    Ok(data)
}

/// The raw `?page=` value, left for the paginator to judge.
pub fn page_param(req: &Request) -> Option<String> {
    req.query::<String>(PAGE_PARAM)
}

/// The `?next=` target, kept only when it stays on this site.
pub fn next_param(req: &Request) -> Option<String> {
    req.query::<String>(NEXT_PARAM).filter(|next| is_local_path(next))
}

pub fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

pub fn session_user(depot: &Depot) -> Option<Uuid> {
    depot
        .session()
        .and_then(|session| session.get::<String>(SESSION_USER))
        .and_then(|id| Uuid::parse_str(&id).ok())
}

pub fn log_in(depot: &mut Depot, user_id: Uuid) -> Result<(), WebError> {
    let session = depot
        .session_mut()
        .ok_or_else(|| WebError::Internal("session handler is not installed".into()))?;
    session
        .insert(SESSION_USER, user_id.to_string())
        .map_err(|e| WebError::Internal(e.to_string()))
}

pub fn log_out(depot: &mut Depot) {
    if let Some(session) = depot.session_mut() {
        session.remove(SESSION_USER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_local_paths_are_followed() {
        assert!(is_local_path("/users/profile/"));
        assert!(!is_local_path("//evil.example/"));
        assert!(!is_local_path("https://evil.example/"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path(""));
    }
}
