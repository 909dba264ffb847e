//! TOML persistence for settings and catalog.

use std::fs;
use std::path::{Path, PathBuf};

use insert_types::InsertSpec;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::errors::ConfigError;
use crate::settings::Settings;

/// The on-disk file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    inserts: Vec<InsertSpec>,
}

/// Parse a config document. Returns sanitized settings and a validated
/// catalog; falls back to the builtin catalog when no entry survives.
pub fn parse_config(text: &str) -> Result<(Settings, Catalog), ConfigError> {
    let raw: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let mut settings = raw.settings;
    settings.sanitize();

    let mut catalog = Catalog::from_entries(raw.inserts);
    if catalog.is_empty() {
        warn!("config contains no valid inserts, using builtin catalog");
        catalog = Catalog::builtin();
    }

    if let Some(last) = &settings.last_insert {
        if catalog.get(last).is_none() {
            warn!(insert = %last, "last-used insert not in catalog, forgetting it");
            settings.last_insert = None;
        }
    }

    Ok((settings, catalog))
}

/// Render settings and catalog as a TOML document.
pub fn render_config(settings: &Settings, catalog: &Catalog) -> Result<String, ConfigError> {
    let file = ConfigFile {
        settings: settings.clone(),
        inserts: catalog.iter().cloned().collect(),
    };
    toml::to_string_pretty(&file).map_err(|e| ConfigError::Serialize(e.to_string()))
}

/// Loaded configuration bound to its file path.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub catalog: Catalog,
    path: PathBuf,
}

impl Config {
    /// Load from `path`. A missing file is not an error: the defaults are
    /// written out so the user has a file to edit.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            info!(path = %path.display(), "no config file, creating defaults");
            let config = Self {
                settings: Settings::default(),
                catalog: Catalog::builtin(),
                path,
            };
            config.save()?;
            return Ok(config);
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let (settings, catalog) = parse_config(&text)?;
        Ok(Self {
            settings,
            catalog,
            path,
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let text = render_config(&self.settings, &self.catalog)?;
        fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// The insert the dialog should preselect: the last used one if it is
    /// still in the catalog, otherwise the first catalog entry.
    pub fn active_insert(&self) -> Option<&InsertSpec> {
        self.settings
            .last_insert
            .as_deref()
            .and_then(|name| self.catalog.get(name))
            .or_else(|| self.catalog.iter().next())
    }

    /// Record the insert just placed and persist immediately, so a crash
    /// later in the session cannot lose the selection.
    pub fn remember_insert(&mut self, name: &str) -> Result<(), ConfigError> {
        if self.catalog.get(name).is_some() {
            self.settings.last_insert = Some(name.to_string());
            self.save()?;
        }
        Ok(())
    }
}
