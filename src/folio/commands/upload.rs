use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::{upload, FormData, Validated};
use crate::media::{MediaRoot, UPLOADS_DIR};

/// Stores a standalone upload as `uploads/<stem>_<uuid><ext>`.
pub fn run(media: &MediaRoot, data: &FormData) -> Result<CmdResult> {
    let file = match upload::clean(data) {
        Validated::Valid(file) => file,
        Validated::Invalid(errors) => return Ok(CmdResult::default().with_errors(errors)),
    };

    let path = media.store_file(UPLOADS_DIR, &file)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("File uploaded: {}", path)));
    result.upload_path = Some(path);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::upload::FILE_FIELD;
    use crate::media::UploadedFile;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn stores_under_uploads() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("spooled");
        fs::write(&src, b"data").unwrap();
        let media = MediaRoot::new(dir.path().join("media"));

        let data = FormData::new().with_file(FILE_FIELD, UploadedFile::new("brief.pdf", &src));
        let result = run(&media, &data).unwrap();

        let path = result.upload_path.unwrap();
        assert!(path.starts_with("uploads/brief_"));
        assert!(path.ends_with(".pdf"));
        assert!(media.resolve(&path).exists());
    }

    #[test]
    fn missing_file_is_a_field_error() {
        let dir = tempdir().unwrap();
        let result = run(&MediaRoot::new(dir.path()), &FormData::new()).unwrap();
        assert!(!result.form_is_valid());
        assert!(result.upload_path.is_none());
    }
}
