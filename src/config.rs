use std::path::PathBuf;

use crate::{
    consts::{
        API_URL_ENV, DEFAULT_API_URL, DEFAULT_UPDATE_URL, HK_HOME_DIR, NETRC_FILE, NO_UPDATE_ENV,
        UPDATE_DIR, UPDATE_URL_ENV,
    },
    errors::HkError,
};

/// Process-wide settings, built once in `main` and handed to whatever needs them.
#[derive(Debug, Clone)]
pub struct Configs {
    api_url: String,
    home_dir: PathBuf,
    update_url: String,
    updates_disabled: bool,
}

impl Configs {
    pub fn new() -> Result<Self, HkError> {
        let home_dir = dirs::home_dir().ok_or(HkError::HomeDirectory)?;
        let mut configs = Self::with_home(home_dir, std::env::var(API_URL_ENV).ok());
        if let Ok(url) = std::env::var(UPDATE_URL_ENV) {
            if !url.is_empty() {
                configs.update_url = url;
            }
        }
        configs.updates_disabled = std::env::var_os(NO_UPDATE_ENV).is_some();
        Ok(configs)
    }

    pub fn with_home(home_dir: impl Into<PathBuf>, api_url_override: Option<String>) -> Self {
        Self {
            api_url: Self::resolve_api_url(api_url_override.as_deref()),
            home_dir: home_dir.into(),
            update_url: DEFAULT_UPDATE_URL.to_owned(),
            updates_disabled: false,
        }
    }

    /// An empty override counts as unset.
    pub fn resolve_api_url(api_url_override: Option<&str>) -> String {
        match api_url_override {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_owned(),
            _ => DEFAULT_API_URL.to_owned(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Absolute URL for an API path such as `/apps`.
    pub fn api_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    pub fn netrc_path(&self) -> PathBuf {
        self.home_dir.join(NETRC_FILE)
    }

    pub fn update_url(&self) -> &str {
        &self.update_url
    }

    pub fn update_dir(&self) -> PathBuf {
        self.home_dir.join(HK_HOME_DIR).join(UPDATE_DIR)
    }

    pub fn updates_disabled(&self) -> bool {
        self.updates_disabled
    }

    pub fn with_update_url(mut self, url: impl Into<String>) -> Self {
        self.update_url = url.into();
        self
    }
}
