use crate::error::{FolioError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const UPLOADS_DIR: &str = "uploads";
pub const IMAGES_DIR: &str = "images";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// A file received with a form, already spooled to a temporary path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Name as sent by the client.
    pub file_name: String,
    pub path: PathBuf,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.into(),
        }
    }

    /// Client file name split into stem and extension (with its dot).
    pub fn split_name(&self) -> (String, String) {
        let name = Path::new(&self.file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        match name.rfind('.') {
            Some(dot) if dot > 0 => (name[..dot].to_string(), name[dot..].to_string()),
            _ => (name.to_string(), String::new()),
        }
    }

    pub fn is_image(&self) -> bool {
        let (_, ext) = self.split_name();
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        IMAGE_EXTENSIONS.contains(&ext.as_str())
    }
}

/// Directory that receives uploads and item images.
#[derive(Debug, Clone)]
pub struct MediaRoot {
    root: PathBuf,
}

impl MediaRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copies an upload to `<subdir>/<stem>_<uuid><ext>` and returns that
    /// relative path.
    pub fn store_file(&self, subdir: &str, file: &UploadedFile) -> Result<String> {
        let (stem, ext) = file.split_name();
        let unique_name = format!("{}_{}{}", stem, Uuid::new_v4(), ext);
        let relative = format!("{}/{}", subdir, unique_name);

        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir).map_err(FolioError::Io)?;
        fs::copy(&file.path, dir.join(&unique_name)).map_err(FolioError::Io)?;
        tracing::info!(path = %relative, "stored upload");
        Ok(relative)
    }

    /// Removes a stored file that ended up unused. Failures are only logged.
    pub fn discard(&self, relative: &str) {
        if let Err(e) = fs::remove_file(self.resolve(relative)) {
            tracing::warn!(path = %relative, error = %e, "could not remove unused upload");
        }
    }

    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn splits_stem_and_extension() {
        let file = UploadedFile::new("report.final.pdf", "/tmp/x");
        assert_eq!(
            file.split_name(),
            ("report.final".to_string(), ".pdf".to_string())
        );
        let file = UploadedFile::new("README", "/tmp/x");
        assert_eq!(file.split_name(), ("README".to_string(), String::new()));
        let file = UploadedFile::new(".env", "/tmp/x");
        assert_eq!(file.split_name(), (".env".to_string(), String::new()));
    }

    #[test]
    fn client_directories_are_stripped() {
        let file = UploadedFile::new("../../etc/passwd", "/tmp/x");
        assert_eq!(file.split_name().0, "passwd");
    }

    #[test]
    fn recognises_image_extensions() {
        assert!(UploadedFile::new("a.PNG", "/tmp/x").is_image());
        assert!(UploadedFile::new("a.jpeg", "/tmp/x").is_image());
        assert!(!UploadedFile::new("a.pdf", "/tmp/x").is_image());
        assert!(!UploadedFile::new("png", "/tmp/x").is_image());
    }

    #[test]
    fn store_file_uses_unique_name() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("incoming");
        fs::write(&src, b"hello").unwrap();

        let media = MediaRoot::new(dir.path().join("media"));
        let file = UploadedFile::new("notes.txt", &src);
        let first = media.store_file(UPLOADS_DIR, &file).unwrap();
        let second = media.store_file(UPLOADS_DIR, &file).unwrap();

        assert!(first.starts_with("uploads/notes_"));
        assert!(first.ends_with(".txt"));
        assert_ne!(first, second);
        assert_eq!(fs::read(media.resolve(&first)).unwrap(), b"hello");
    }

    #[test]
    fn discard_removes_the_stored_copy() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("incoming");
        fs::write(&src, b"hello").unwrap();

        let media = MediaRoot::new(dir.path().join("media"));
        let stored = media
            .store_file(IMAGES_DIR, &UploadedFile::new("shot.png", &src))
            .unwrap();
        media.discard(&stored);
        assert!(!media.resolve(&stored).exists());
        assert!(src.exists());
    }
}
