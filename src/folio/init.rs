use crate::api::FolioApi;
use crate::config::SiteConfig;
use crate::error::{FolioError, Result};
use crate::media::MediaRoot;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const MEDIA_DIR: &str = "media";

pub struct FolioContext {
    pub api: FolioApi<FileStore>,
    pub config: SiteConfig,
    pub data_dir: PathBuf,
}

/// The data directory: an explicit path (flag or `FOLIO_DATA`) wins,
/// otherwise the platform data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "folio", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            FolioError::Store(
                "Could not determine a data directory; pass --data-dir or set FOLIO_DATA"
                    .to_string(),
            )
        })
}

pub fn initialize(explicit: Option<PathBuf>) -> Result<FolioContext> {
    let data_dir = resolve_data_dir(explicit)?;
    let config = SiteConfig::load(&data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), "initialized");

    let store = FileStore::new(&data_dir);
    let media = MediaRoot::new(data_dir.join(MEDIA_DIR));
    let api = FolioApi::new(store, media, &data_dir);

    Ok(FolioContext {
        api,
        config,
        data_dir,
    })
}
