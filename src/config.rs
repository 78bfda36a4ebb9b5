//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treediff/treediff.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TREEDIFF_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{NodeId, DEFAULT_ROOT};

/// How trees are drawn on the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// `L__<id>` lines, indented by the parent line's width
    #[default]
    Indent,
    /// Box-drawing branches
    Tree,
}

impl RenderStyle {
    fn as_str(&self) -> &'static str {
        match self {
            RenderStyle::Indent => "indent",
            RenderStyle::Tree => "tree",
        }
    }
}

/// Unified configuration for treediff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root of trees created without edges (default: 1)
    pub default_root: NodeId,
    /// Separator between steps of a printed edit script (default: ", ")
    pub delimiter: String,
    /// Rendering used by `render` and the interactive session
    pub render_style: RenderStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_root: DEFAULT_ROOT,
            delimiter: ", ".to_string(),
            render_style: RenderStyle::Indent,
        }
    }
}

/// Get the XDG config directory for treediff.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treediff").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treediff.toml"))
}

impl Settings {
    /// Load settings with layered precedence, reading the global config from
    /// its XDG location.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Load settings from the given global and explicit files.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(global, explicit, None)
    }

    /// Like [`Settings::load_from`], reading `TREEDIFF_*` variables from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("default_root", i64::from(defaults.default_root))
            .map_err(config_err)?
            .set_default("delimiter", defaults.delimiter.clone())
            .map_err(config_err)?
            .set_default("render_style", defaults.render_style.as_str())
            .map_err(config_err)?;

        if let Some(global_path) = global {
            builder = builder.add_source(File::from(global_path).required(false));
        }
        if let Some(explicit_path) = explicit {
            builder = builder.add_source(File::from(explicit_path).required(true));
        }
        // TREEDIFF_DELIMITER -> delimiter, nested keys would use "__"
        builder = builder.add_source(
            Environment::with_prefix("TREEDIFF")
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treediff configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/treediff/treediff.toml
#   Explicit: treediff --config <file>
#   Env:      TREEDIFF_* environment variables (e.g. TREEDIFF_DELIMITER)

# Root of trees created without edges (empty edge list, fresh session)
# default_root = 1

# Separator between steps of a printed edit script
# delimiter = ", "

# Rendering of trees: "indent" (L__ lines) or "tree" (box drawing)
# render_style = "indent"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
