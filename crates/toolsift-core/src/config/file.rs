//! File-backed tool catalog (YAML)

use std::fs;
use std::path::{Path, PathBuf};

use super::catalog::ToolCatalog;
use super::error::ConfigResult;

/// Catalog level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level catalog (`<config dir>/toolsift/tools.yaml`)
    User,
    /// Workspace-level catalog (`.config/toolsift/tools.yaml` in the workspace root)
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// A tool catalog stored in a YAML file
///
/// # Example
///
/// ```no_run
/// use toolsift_core::config::CatalogFile;
/// use toolsift_core::logging::NoOpLogger;
///
/// let catalog = CatalogFile::workspace("/path/to/workspace").load()?;
/// let filter = catalog.build_filter(NoOpLogger::shared())?;
/// # Ok::<(), toolsift_core::config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
    level: ConfigLevel,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
        }
    }

    /// User-level catalog under the platform config directory
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("toolsift").join("tools.yaml"), ConfigLevel::User)
    }

    /// Workspace-level catalog
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root
            .as_ref()
            .join(".config")
            .join("toolsift")
            .join("tools.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the catalog; a missing file is an empty catalog
    pub fn load(&self) -> ConfigResult<ToolCatalog> {
        if !self.exists() {
            return Ok(ToolCatalog::default());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write the catalog, creating parent directories as needed
    pub fn save(&self, catalog: &ToolCatalog) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(catalog)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Export the catalog as JSON
    pub fn export_json(&self) -> ConfigResult<String> {
        let catalog = self.load()?;
        Ok(serde_json::to_string_pretty(&catalog)?)
    }

    /// Replace the catalog with one given as JSON
    pub fn import_json(&self, json: &str) -> ConfigResult<()> {
        let catalog: ToolCatalog = serde_json::from_str(json)?;
        self.save(&catalog)
    }
}
