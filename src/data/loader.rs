//! RON data loader
//!
//! Loads the affix pool, base catalogue and generator config from RON
//! files, with fallback to the built-in defaults.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::affixes::{default_affix_pool, AffixPool};
use super::bases::{default_base_catalogue, BaseCatalogue};
use crate::error::{AffixError, DataError};
use crate::items::generator::{AffixGenerator, GeneratorConfig};

pub const AFFIXES_FILE: &str = "affixes.ron";
pub const BASES_FILE: &str = "bases.ron";
pub const GENERATOR_FILE: &str = "generator.ron";

/// Manages all external loot data
#[derive(Debug, Clone)]
pub struct DataManager {
    /// Affix templates
    pub affixes: AffixPool,
    /// Base items
    pub bases: BaseCatalogue,
    /// Generator tunables
    pub generator: GeneratorConfig,
}

impl DataManager {
    /// Load every data file under `dir`, falling back per file to defaults
    pub fn load(dir: &Path) -> Self {
        Self {
            affixes: load_or_default(dir, AFFIXES_FILE, default_affix_pool),
            bases: load_or_default(dir, BASES_FILE, default_base_catalogue),
            generator: load_or_default(dir, GENERATOR_FILE, GeneratorConfig::default),
        }
    }

    /// Load every data file under `dir`, failing on the first missing or broken file
    pub fn load_strict(dir: &Path) -> Result<Self, DataError> {
        Ok(Self {
            affixes: read_ron(&dir.join(AFFIXES_FILE))?,
            bases: read_ron(&dir.join(BASES_FILE))?,
            generator: read_ron(&dir.join(GENERATOR_FILE))?,
        })
    }

    /// Validate the base catalogue
    pub fn validate(&self) -> Result<(), AffixError> {
        for base in &self.bases.bases {
            base.validate()?;
        }
        Ok(())
    }

    /// Build a generator over the loaded pool and config
    pub fn affix_generator(&self) -> Result<AffixGenerator, AffixError> {
        self.validate()?;
        AffixGenerator::new(self.affixes.affixes.clone(), self.generator.clone())
    }

    /// Write the currently loaded data as pretty RON under `dir`
    pub fn export(&self, dir: &Path) -> Result<(), DataError> {
        fs::create_dir_all(dir).map_err(|source| DataError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        write_ron(&dir.join(AFFIXES_FILE), &self.affixes, "affixes")?;
        write_ron(&dir.join(BASES_FILE), &self.bases, "bases")?;
        write_ron(&dir.join(GENERATOR_FILE), &self.generator, "generator config")?;

        log::info!("Exported loot data to {}", dir.display());
        Ok(())
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            affixes: default_affix_pool(),
            bases: default_base_catalogue(),
            generator: GeneratorConfig::default(),
        }
    }
}

/// Parse one RON file
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_ron<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<(), DataError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|source| DataError::Serialize { what, source })?;
    fs::write(path, text).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_or_default<T: DeserializeOwned>(dir: &Path, file: &str, default: fn() -> T) -> T {
    let path = dir.join(file);
    if !path.exists() {
        log::debug!("{} not found, using built-in defaults", path.display());
        return default();
    }
    match read_ron(&path) {
        Ok(value) => {
            log::info!("Loaded {}", path.display());
            value
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            default()
        }
    }
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(dir: &Path) -> Result<(), DataError> {
    DataManager::default().export(dir)
}
