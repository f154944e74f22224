//! Template engine integration
//!
//! - [`name`]: template name normalization and its LRU cache
//! - [`context`]: render arguments
//! - [`loader`]: template sources (directory, memory, chained)
//! - [`environment`]: the shared minijinja environment

pub mod context;
pub mod environment;
pub mod loader;
pub mod name;

pub use context::RenderContext;
pub use environment::{ViewEnvironment, ViewEnvironmentBuilder};
pub use loader::TemplateLoader;
pub use name::{template_name, NameCache, TEMPLATE_EXTENSION};
