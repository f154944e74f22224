//! Application and service registry
//!
//! An [`Application`] owns the configuration and a string-keyed registry of
//! shared services. The rendering environment is stored there once by
//! [`use_templates`](crate::view::use_templates) and reused afterwards.

use crate::config::{AppConfig, ViewsConfig};
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Service = Arc<dyn Any + Send + Sync>;

/// String-keyed store for shared singleton services
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    services: HashMap<String, Service>,
}

impl ServiceRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a service by key
    ///
    /// Returns `None` when the key is absent or holds a different type.
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let service = Arc::clone(self.services.get(key)?);
        match service.downcast::<T>() {
            Ok(service) => Some(service),
            Err(_) => {
                tracing::warn!(
                    key,
                    expected = std::any::type_name::<T>(),
                    "Service registered under key has a different type"
                );
                None
            }
        }
    }

    /// Store a service, returning whatever was stored under `key` before
    pub fn insert<T: Any + Send + Sync>(
        &mut self,
        key: impl Into<String>,
        service: Arc<T>,
    ) -> Option<Arc<dyn Any + Send + Sync>> {
        self.services.insert(key.into(), service)
    }

    /// Remove a service
    pub fn remove(&mut self, key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.services.remove(key)
    }

    /// Whether anything is stored under `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.services.contains_key(key)
    }

    /// Number of registered keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.services.keys().collect();
        keys.sort();
        f.debug_struct("ServiceRegistry").field("keys", &keys).finish()
    }
}

/// Snapshot of the application exposed to templates as `app`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    /// Application name
    pub name: String,

    /// Debug mode
    pub debug: bool,
}

/// Application object owning configuration and shared services
///
/// # Example
///
/// ```rust
/// use acton_views::app::Application;
/// use acton_views::config::ViewsConfig;
///
/// let mut app = Application::new(ViewsConfig::default());
/// app.set_debug(true);
/// assert!(app.debug());
/// assert!(app.services().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Application {
    config: ViewsConfig,
    services: ServiceRegistry,
}

impl Application {
    /// Create an application from configuration
    #[must_use]
    pub fn new(config: ViewsConfig) -> Self {
        Self {
            config,
            services: ServiceRegistry::new(),
        }
    }

    /// Create an application with default template settings
    #[must_use]
    pub fn from_app_config(app: AppConfig) -> Self {
        Self::new(ViewsConfig {
            app,
            ..ViewsConfig::default()
        })
    }

    /// Full configuration
    #[must_use]
    pub const fn config(&self) -> &ViewsConfig {
        &self.config
    }

    /// Application name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.app.name
    }

    /// Debug mode
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.config.app.debug
    }

    /// Toggle debug mode
    ///
    /// Only affects template environments created afterwards.
    pub const fn set_debug(&mut self, debug: bool) {
        self.config.app.debug = debug;
    }

    /// Shared services
    #[must_use]
    pub const fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    /// Shared services, mutably
    pub const fn services_mut(&mut self) -> &mut ServiceRegistry {
        &mut self.services
    }

    /// Snapshot for templates
    #[must_use]
    pub fn info(&self) -> AppInfo {
        AppInfo {
            name: self.config.app.name.clone(),
            debug: self.config.app.debug,
        }
    }
}
