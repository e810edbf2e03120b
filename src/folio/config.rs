use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";

const DEFAULT_SITE_TITLE: &str = "Portfolio";
const DEFAULT_PAGINATE_BY: usize = 3;
const DEFAULT_ADMIN_PER_PAGE: usize = 5;
const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// One entry of the site navigation menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuEntry {
    pub title: String,
    pub url: String,
}

impl MenuEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Site configuration, stored in `<data dir>/config.json`.
///
/// Every page receives the menu and title from here; nothing in the web layer
/// keeps its own copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub site_title: String,

    #[serde(default = "default_menu")]
    pub menu: Vec<MenuEntry>,

    /// Items per page on public listings.
    #[serde(default = "default_paginate_by")]
    pub paginate_by: usize,

    /// Items per page on `folio items list`.
    #[serde(default = "default_admin_per_page")]
    pub admin_per_page: usize,

    #[serde(default = "default_bind")]
    pub bind: String,

    /// Key for the session cookie. At least 64 bytes when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_secret: Option<String>,
}

fn default_site_title() -> String {
    DEFAULT_SITE_TITLE.to_string()
}

fn default_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::new("About", "/about/"),
        MenuEntry::new("Add item", "/create/"),
        MenuEntry::new("Upload file", "/upload/"),
    ]
}

fn default_paginate_by() -> usize {
    DEFAULT_PAGINATE_BY
}

fn default_admin_per_page() -> usize {
    DEFAULT_ADMIN_PER_PAGE
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            menu: default_menu(),
            paginate_by: DEFAULT_PAGINATE_BY,
            admin_per_page: DEFAULT_ADMIN_PER_PAGE,
            bind: default_bind(),
            session_secret: None,
        }
    }
}

impl SiteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FolioError::Io)?;
        let config: SiteConfig =
            serde_json::from_str(&content).map_err(FolioError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FolioError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FolioError::Serialization)?;
        fs::write(config_path, content).map_err(FolioError::Io)?;
        Ok(())
    }

    /// Set one of the scalar keys from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "site_title" => self.site_title = value.to_string(),
            "paginate_by" => self.paginate_by = parse_page_size(key, value)?,
            "admin_per_page" => self.admin_per_page = parse_page_size(key, value)?,
            "bind" => self.bind = value.to_string(),
            other => {
                return Err(FolioError::Api(format!(
                    "Unknown config key '{}'. Known keys: site_title, paginate_by, admin_per_page, bind",
                    other
                )))
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// `(key, value)` pairs of the settable keys, for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("site_title", self.site_title.clone()),
            ("paginate_by", self.paginate_by.to_string()),
            ("admin_per_page", self.admin_per_page.to_string()),
            ("bind", self.bind.clone()),
        ]
    }
}

fn parse_page_size(key: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FolioError::Api(format!(
            "{} must be a positive integer, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.paginate_by, 3);
        assert_eq!(config.admin_per_page, 5);
        assert_eq!(config.menu.len(), 3);
        assert_eq!(config.menu[0].url, "/about/");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = SiteConfig::load(dir.path().join("missing")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();

        let mut config = SiteConfig::default();
        config.set("site_title", "Studio").unwrap();
        config.set("paginate_by", "10").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.site_title, "Studio");
        assert_eq!(loaded.paginate_by, 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"site_title":"Mine"}"#).unwrap();

        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config.site_title, "Mine");
        assert_eq!(config.bind, "127.0.0.1:8000");
        assert_eq!(config.menu, default_menu());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = SiteConfig::default();
        assert!(config.set("paginate_by", "0").is_err());
        assert!(config.set("paginate_by", "many").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config.paginate_by, 3);
    }
}
