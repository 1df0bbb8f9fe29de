//! Catalog source resolution.
//!
//! Precedence: explicit path (flag or `TOOL_MATCHER_CATALOG`), then
//! `<config_dir>/tool-matcher/catalog.json`, then the built-in catalog.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::MatcherError;

/// Environment variable naming a catalog file
pub const CATALOG_ENV: &str = "TOOL_MATCHER_CATALOG";

/// Directory name under the platform config dir
const APP_DIR: &str = "tool-matcher";

const CATALOG_FILE: &str = "catalog.json";

/// Where the catalog will be read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Path given on the command line or via the environment; must exist
    Explicit(PathBuf),
    /// Per-user override found in the config directory
    UserConfig(PathBuf),
    Builtin,
}

/// Path of the per-user catalog override under a config directory
fn catalog_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join(APP_DIR).join(CATALOG_FILE)
}

pub fn resolve_catalog_source(explicit: Option<&Path>) -> CatalogSource {
    resolve_catalog_source_in(explicit, dirs::config_dir().as_deref())
}

/// Resolve against a given config directory (`None` when the platform has none)
pub fn resolve_catalog_source_in(
    explicit: Option<&Path>,
    config_dir: Option<&Path>,
) -> CatalogSource {
    if let Some(path) = explicit {
        return CatalogSource::Explicit(path.to_path_buf());
    }

    let Some(config_dir) = config_dir else {
        debug!("{}, using built-in catalog", MatcherError::NoConfigDir);
        return CatalogSource::Builtin;
    };

    let path = catalog_path_in(config_dir);
    if path.exists() {
        CatalogSource::UserConfig(path)
    } else {
        debug!("No user catalog at {:?}, using built-in", path);
        CatalogSource::Builtin
    }
}

pub fn load_catalog(source: &CatalogSource) -> Result<Catalog, MatcherError> {
    let catalog = match source {
        CatalogSource::Explicit(path) | CatalogSource::UserConfig(path) => Catalog::load(path)?,
        CatalogSource::Builtin => Catalog::builtin()?,
    };
    info!("Loaded {} tools ({:?})", catalog.len(), source);
    Ok(catalog)
}
