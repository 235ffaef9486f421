//! Configuration loaded with figment.
//!
//! Sources are merged in precedence order (later sources override earlier
//! ones):
//! 1. Built-in defaults
//! 2. An optional TOML, YAML or JSON file
//! 3. `DATAFORM_` environment variables, `__` separating nested keys
//!    (`DATAFORM_MARKERS__ELEMENT=data-field`)

use std::path::Path;

use dataform_templating::{MarkerStyle, TemplateEngine};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DataformError, Result};

/// Prefix of the environment variables read by [`DataformConfig::load`].
pub const ENV_PREFIX: &str = "DATAFORM_";

/// Settings of the assembly pipeline and of template rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataformConfig {
    /// Component the uploaded files belong to.
    pub component: String,
    /// Draft area files are uploaded into; a new one is created when unset.
    pub upload_item_id: Option<i64>,
    /// Spelling of the render markers.
    pub markers: MarkerStyle,
}

impl Default for DataformConfig {
    fn default() -> Self {
        Self {
            component: "mmaModData".to_string(),
            upload_item_id: None,
            markers: MarkerStyle::default(),
        }
    }
}

impl DataformConfig {
    /// Load defaults overridden by the environment.
    pub fn load() -> Result<Self> {
        Self::extract(Self::base_figment().merge(Self::env()))
    }

    /// Load defaults overridden by `path`, then by the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let file = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Figment::from(Toml::file(path)),
            Some("yaml") | Some("yml") => Figment::from(Yaml::file(path)),
            Some("json") => Figment::from(Json::file(path)),
            _ => {
                return Err(DataformError::UnsupportedConfigFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        debug!(path = %path.display(), "loading configuration file");
        Self::extract(Self::base_figment().merge(file).merge(Self::env()))
    }

    /// Template engine spelling its markers as configured.
    pub fn template_engine(&self) -> TemplateEngine {
        TemplateEngine::with_style(self.markers.clone())
    }

    fn base_figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Self::default()))
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        debug!(component = %config.component, "configuration loaded");
        Ok(config)
    }
}
