//! Tool catalog configuration
//!
//! A catalog is a YAML file listing tools and default filter settings.
//! It can live at user level (`<config dir>/toolsift/tools.yaml`) or in a
//! workspace (`.config/toolsift/tools.yaml`).

mod catalog;
mod error;
mod file;

pub use catalog::{FilterDefaults, ToolCatalog};
pub use error::{ConfigError, ConfigResult};
pub use file::{CatalogFile, ConfigLevel};
