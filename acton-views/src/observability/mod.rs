//! Observability (structured logging)
//!
//! Installs a `tracing` subscriber with environment-based filtering. Debug
//! builds log in a human-readable format, release builds emit JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging with the default configuration
///
/// # Example
///
/// ```rust,no_run
/// use acton_views::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Initialize logging with an explicit configuration
///
/// `RUST_LOG` overrides [`ObservabilityConfig::default_filter`] when set.
pub fn init_with(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?;
    }

    tracing::debug!(service = %config.service_name, "Observability initialized");
    Ok(())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name recorded in the startup event
    pub service_name: String,

    /// Emit JSON instead of pretty output
    pub json: bool,

    /// Filter directive used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "acton-views".to_string(),
            json: !cfg!(debug_assertions),
            default_filter: if cfg!(debug_assertions) {
                "debug,acton_views=trace".to_string()
            } else {
                "info".to_string()
            },
        }
    }
}

impl ObservabilityConfig {
    /// Create new observability config
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Emit JSON log lines
    #[must_use]
    pub const fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Override the default filter directive
    #[must_use]
    pub fn with_filter(mut self, directive: impl Into<String>) -> Self {
        self.default_filter = directive.into();
        self
    }
}
