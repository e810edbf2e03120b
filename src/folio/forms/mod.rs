//! # Forms
//!
//! Submitted form data and field-scoped validation.
//!
//! A form never touches the response: it turns a [`FormData`] into either a
//! cleaned value or a set of [`FieldErrors`] ([`Validated`]). The command
//! layer decides what to persist, and the web layer decides how the errors
//! are shown (inline in a page, or inside a JSON fragment).
//!
//! Error messages are keyed by field name; errors that belong to no single
//! field (failed login, for instance) go under [`NON_FIELD_ERRORS`].

use crate::media::UploadedFile;
use serde::Serialize;
use std::collections::BTreeMap;

pub mod item;
pub mod upload;
pub mod user;

pub const NON_FIELD_ERRORS: &str = "__all__";

pub(crate) const REQUIRED: &str = "This field is required.";

/// Raw submitted values: text fields (possibly repeated) and files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, Vec<String>>,
    files: BTreeMap<String, UploadedFile>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FormData::push`].
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn with_file(mut self, key: &str, file: UploadedFile) -> Self {
        self.files.insert(key.to_string(), file);
        self
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.fields
            .entry(key.to_string())
            .or_default()
            .push(value.into());
    }

    pub fn insert_file(&mut self, key: &str, file: UploadedFile) {
        self.files.insert(key.to_string(), file);
    }

    /// First value submitted under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value submitted under `key`, in submission order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.fields.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn file(&self, key: &str) -> Option<&UploadedFile> {
        self.files.get(key)
    }

    /// Checkbox semantics: absent, empty, `false`, `off` and `0` are false.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            None => false,
            Some(v) => !matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "" | "false" | "off" | "0"
            ),
        }
    }
}

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Outcome of cleaning a form.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(FieldErrors),
}

impl<T> Validated<T> {
    pub fn from_errors(value: T, errors: FieldErrors) -> Self {
        if errors.is_empty() {
            Validated::Valid(value)
        } else {
            Validated::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }
}

/// Trimmed value of a required text field, recording an error when blank.
pub(crate) fn required_text(data: &FormData, key: &str, errors: &mut FieldErrors) -> String {
    let value = data.get(key).unwrap_or("").trim().to_string();
    if value.is_empty() {
        errors.add(key, REQUIRED);
    }
    value
}

pub(crate) fn check_max_len(value: &str, key: &str, max: usize, errors: &mut FieldErrors) {
    let len = value.chars().count();
    if len > max {
        errors.add(
            key,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max, len
            ),
        );
    }
}
