use super::{FieldErrors, FormData, Validated, REQUIRED};
use crate::media::UploadedFile;

pub const FILE_FIELD: &str = "file";

/// The standalone upload form: one required file.
pub fn clean(data: &FormData) -> Validated<UploadedFile> {
    match data.file(FILE_FIELD) {
        Some(file) if !file.file_name.trim().is_empty() => Validated::Valid(file.clone()),
        Some(_) => {
            let mut errors = FieldErrors::new();
            errors.add(
                FILE_FIELD,
                "No file was submitted. Check the encoding type on the form.",
            );
            Validated::Invalid(errors)
        }
        None => {
            let mut errors = FieldErrors::new();
            errors.add(FILE_FIELD, REQUIRED);
            Validated::Invalid(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_file() {
        let Validated::Invalid(errors) = clean(&FormData::new()) else {
            panic!("expected errors");
        };
        assert_eq!(errors.get(FILE_FIELD), &[REQUIRED]);
    }

    #[test]
    fn accepts_any_named_file() {
        let data = FormData::new().with_file(FILE_FIELD, UploadedFile::new("a.bin", "/tmp/a"));
        assert!(clean(&data).is_valid());
    }
}
