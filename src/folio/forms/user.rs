use super::{check_max_len, required_text, FieldErrors, FormData, Validated};
use crate::error::Result;
use crate::model::User;
use crate::store::DataStore;
use serde::Serialize;
use validator::ValidateEmail;

pub const USERNAME_MAX: usize = 150;
pub const PASSWORD_MIN: usize = 8;

const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Submitted registration values, passwords excluded, for re-rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationFields {
    pub username: String,
    pub email: String,
}

impl RegistrationFields {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            username: data.get("username").unwrap_or("").to_string(),
            email: data.get("email").unwrap_or("").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Validates a sign-up: username, email, and the password typed twice.
pub fn clean_registration<S: DataStore>(
    store: &S,
    data: &FormData,
) -> Result<Validated<Registration>> {
    let mut errors = FieldErrors::new();

    let username = required_text(data, "username", &mut errors);
    if !username.is_empty() {
        check_max_len(&username, "username", USERNAME_MAX, &mut errors);
        if !is_valid_username(&username) {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        } else if store.find_by::<User>("username", &username)?.is_some() {
            errors.add("username", "A user with that username already exists.");
        }
    }

    // Stored lowercased so login can match it exactly.
    let email = clean_email(data, &mut errors).to_lowercase();
    if !errors.has("email") && store.find_by::<User>("email", &email)?.is_some() {
        errors.add("email", "A user with that email already exists.");
    }

    let password1 = data.get("password1").unwrap_or("").to_string();
    let password2 = data.get("password2").unwrap_or("").to_string();
    if password1.is_empty() {
        errors.add("password1", super::REQUIRED);
    }
    if password2.is_empty() {
        errors.add("password2", super::REQUIRED);
    }
    if !password1.is_empty() && !password2.is_empty() {
        if password1 != password2 {
            errors.add("password2", "The two password fields didn’t match.");
        } else {
            validate_password(&password2, &mut errors);
        }
    }

    Ok(Validated::from_errors(
        Registration {
            username,
            email,
            password: password1,
        },
        errors,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Shape check for the login form; whether the credentials match a user is
/// decided by the users command.
pub fn clean_login(data: &FormData) -> Validated<Credentials> {
    let mut errors = FieldErrors::new();
    let email = clean_email(data, &mut errors);
    let password = data.get("password").unwrap_or("").to_string();
    if password.is_empty() {
        errors.add("password", super::REQUIRED);
    }
    Validated::from_errors(Credentials { email, password }, errors)
}

fn clean_email(data: &FormData, errors: &mut FieldErrors) -> String {
    let email = required_text(data, "email", errors);
    if !email.is_empty() && !email.validate_email() {
        errors.add("email", INVALID_EMAIL);
    }
    email
}

/// Letters, digits and `@.+-_`.
pub fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

fn validate_password(password: &str, errors: &mut FieldErrors) {
    if password.chars().count() < PASSWORD_MIN {
        errors.add(
            "password2",
            format!(
                "This password is too short. It must contain at least {} characters.",
                PASSWORD_MIN
            ),
        );
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password2", "This password is entirely numeric.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn signup(username: &str, email: &str, p1: &str, p2: &str) -> FormData {
        FormData::new()
            .with("username", username)
            .with("email", email)
            .with("password1", p1)
            .with("password2", p2)
    }

    fn errors_of<T: std::fmt::Debug>(v: Validated<T>) -> FieldErrors {
        match v {
            Validated::Invalid(errors) => errors,
            Validated::Valid(v) => panic!("expected errors, got {:?}", v),
        }
    }

    #[test]
    fn accepts_a_good_registration() {
        let store = InMemoryStore::new();
        let data = signup("ana", "ana@example.com", "correct horse", "correct horse");
        assert!(clean_registration(&store, &data).unwrap().is_valid());
    }

    #[test]
    fn password_rules() {
        let store = InMemoryStore::new();
        let errors = errors_of(
            clean_registration(&store, &signup("ana", "ana@example.com", "abc", "abd")).unwrap(),
        );
        assert_eq!(errors.get("password2"), &["The two password fields didn’t match."]);

        let errors = errors_of(
            clean_registration(&store, &signup("ana", "ana@example.com", "1234", "1234"))
                .unwrap(),
        );
        assert_eq!(errors.get("password2").len(), 2);
    }

    #[test]
    fn rejects_duplicates_and_bad_shapes() {
        let mut store = InMemoryStore::new();
        store
            .save(&User::new("ana", "ana@example.com", "hash"))
            .unwrap();

        let errors = errors_of(
            clean_registration(
                &store,
                &signup("ana", "ANA@example.com", "long enough", "long enough"),
            )
            .unwrap(),
        );
        assert!(errors.get("username")[0].contains("already exists"));
        assert!(errors.get("email")[0].contains("already exists"));

        let errors = errors_of(
            clean_registration(&store, &signup("a b", "nope", "long enough", "long enough"))
                .unwrap(),
        );
        assert!(errors.get("username")[0].starts_with("Enter a valid username"));
        assert_eq!(errors.get("email"), &[INVALID_EMAIL]);
    }

    #[test]
    fn login_form_requires_email_and_password() {
        let errors = errors_of(clean_login(&FormData::new()));
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        let data = FormData::new()
            .with("email", "ana@example.com")
            .with("password", "x");
        assert!(clean_login(&data).is_valid());
    }
}
