//! Configuration management for acton-views
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `ACTON_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/acton-views/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # config.toml
//! [app]
//! name = "my-site"
//! debug = true
//!
//! [templates]
//! template_dir = "./templates"
//! name_cache_capacity = 1200
//! enable_async = true
//! autoescape_extensions = ["html", "htm", "xml"]
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use acton_views::config::ViewsConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ViewsConfig::load()?;
//!
//! let debug = config.app.debug;
//! let dir = &config.templates.template_dir;
//! # Ok(())
//! # }
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default capacity of the template name cache
pub const DEFAULT_NAME_CACHE_CAPACITY: usize = 1200;

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application name, exposed to templates as `app.name`
    pub name: String,

    /// Debug mode; enables template auto-reload
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "acton-views".to_string(),
            debug: cfg!(debug_assertions),
        }
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory containing Jinja templates
    pub template_dir: PathBuf,

    /// Number of distinct template names whose normalized form is cached
    pub name_cache_capacity: usize,

    /// Render templates on the blocking thread pool
    pub enable_async: bool,

    /// Template file extensions rendered with HTML escaping
    pub autoescape_extensions: Vec<String>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("./templates"),
            name_cache_capacity: DEFAULT_NAME_CACHE_CAPACITY,
            enable_async: false,
            autoescape_extensions: vec!["html".to_string(), "htm".to_string(), "xml".to_string()],
        }
    }
}

/// Complete acton-views configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewsConfig {
    /// Application settings
    #[serde(default)]
    pub app: AppConfig,

    /// Template engine settings
    #[serde(default)]
    pub templates: TemplateSettings,
}

impl ViewsConfig {
    /// Load configuration from the standard locations
    ///
    /// Precedence, highest first:
    /// 1. Environment variables (`ACTON_*`, use `__` for nesting)
    /// 2. `./config.toml`
    /// 3. `~/.config/acton-views/config.toml`
    /// 4. Defaults
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use acton_views::config::ViewsConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ViewsConfig::load()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment = figment.merge(Env::prefixed("ACTON_").split("__").lowercase(true));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still take precedence over the file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use acton_views::config::ViewsConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ViewsConfig::load_from("./config/production.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("ACTON_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path
    ///
    /// Returns `~/.config/acton-views/config.toml`, or `./config.toml` when
    /// no config directory is known.
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join("acton-views").join("config.toml"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = ViewsConfig::default();
        assert_eq!(config.app.name, "acton-views");
        assert_eq!(config.templates.name_cache_capacity, 1200);
        assert!(!config.templates.enable_async);
    }

    #[test]
    fn test_template_defaults() {
        let templates = TemplateSettings::default();
        assert_eq!(templates.template_dir, PathBuf::from("./templates"));
        assert_eq!(templates.autoescape_extensions, vec!["html", "htm", "xml"]);
    }

    #[test]
    fn test_debug_follows_build_profile() {
        let app = AppConfig::default();

        #[cfg(debug_assertions)]
        assert!(app.debug);

        #[cfg(not(debug_assertions))]
        assert!(!app.debug);
    }

    #[test]
    fn test_load_from_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "site.toml",
                r#"
                [app]
                name = "site"
                debug = false

                [templates]
                template_dir = "views"
                "#,
            )?;
            jail.set_env("ACTON_TEMPLATES__ENABLE_ASYNC", "true");

            let config = ViewsConfig::load_from("site.toml")
                .map_err(|e| figment::Error::from(e.to_string()))?;

            assert_eq!(config.app.name, "site");
            assert!(!config.app.debug);
            assert_eq!(config.templates.template_dir, PathBuf::from("views"));
            assert!(config.templates.enable_async);
            assert_eq!(config.templates.name_cache_capacity, 1200);
            Ok(())
        });
    }

    #[test]
    fn test_load_reads_local_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [templates]
                name_cache_capacity = 16
                "#,
            )?;
            jail.set_env("ACTON_APP__NAME", "from-env");

            let config = ViewsConfig::load().map_err(|e| figment::Error::from(e.to_string()))?;

            assert_eq!(config.templates.name_cache_capacity, 16);
            assert_eq!(config.app.name, "from-env");
            Ok(())
        });
    }
}
