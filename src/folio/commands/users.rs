use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::forms::user::{clean_login, clean_registration};
use crate::forms::{FieldErrors, FormData, Validated};
use crate::model::User;
use crate::store::DataStore;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use uuid::Uuid;

const BAD_CREDENTIALS: &str =
    "Please enter a correct email and password. Note that both fields may be case-sensitive.";

/// Signs up a new user. On success `result.user` is the stored user.
pub fn register<S: DataStore>(store: &mut S, data: &FormData) -> Result<CmdResult> {
    let registration = match clean_registration(store, data)? {
        Validated::Valid(r) => r,
        Validated::Invalid(errors) => return Ok(CmdResult::default().with_errors(errors)),
    };

    let hash = hash_password(&registration.password)?;
    let user = User::new(registration.username, registration.email, hash);
    match store.save(&user) {
        Ok(()) => {}
        Err(FolioError::Conflict { field, .. }) => {
            let mut errors = FieldErrors::new();
            errors.add(field, format!("A user with that {} already exists.", field));
            return Ok(CmdResult::default().with_errors(errors));
        }
        Err(e) => return Err(e),
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Welcome, {}!",
        user.username
    )));
    result.user = Some(user);
    Ok(result)
}

/// Checks an email/password pair. A mismatch is a non-field form error.
pub fn authenticate<S: DataStore>(store: &S, data: &FormData) -> Result<CmdResult> {
    let credentials = match clean_login(data) {
        Validated::Valid(c) => c,
        Validated::Invalid(errors) => return Ok(CmdResult::default().with_errors(errors)),
    };

    let user = store.find_by::<User>("email", &credentials.email.to_lowercase())?;
    match user {
        Some(user) if verify_password(&credentials.password, &user.password_hash)? => {
            let mut result = CmdResult::default();
            result.user = Some(user);
            Ok(result)
        }
        _ => {
            let mut errors = FieldErrors::new();
            errors.non_field(BAD_CREDENTIALS);
            Ok(CmdResult::default().with_errors(errors))
        }
    }
}

pub fn profile<S: DataStore>(store: &S, user_id: &Uuid) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.user = Some(store.get::<User>(user_id)?);
    Ok(result)
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| FolioError::Auth(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| FolioError::Auth(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| FolioError::Auth(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
