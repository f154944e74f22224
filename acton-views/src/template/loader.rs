//! Template sources
//!
//! A [`TemplateLoader`] maps a normalized template name to its source text.
//! Loaders are installed into the rendering environment once; the
//! environment calls back into them whenever a template is not compiled yet
//! (or on every lookup when auto-reload is on).

use minijinja::Error;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

type SourceFn = dyn Fn(&str) -> Result<Option<String>, Error> + Send + Sync + 'static;

/// Where template sources come from
#[derive(Clone)]
pub enum TemplateLoader {
    /// Files below a directory
    Directory(PathBuf),

    /// Sources held in memory (embedded templates, tests)
    Memory(Arc<HashMap<String, String>>),

    /// First loader that knows the name wins
    Chain(Vec<TemplateLoader>),
}

impl TemplateLoader {
    /// Load templates from files below `dir`
    ///
    /// Names containing `..` segments are never resolved outside `dir`.
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self::Directory(dir.into())
    }

    /// Load templates from in-memory sources
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acton_views::template::TemplateLoader;
    ///
    /// let loader = TemplateLoader::memory([
    ///     ("index.html", "<h1>{{ title }}</h1>"),
    ///     ("layout.html", "<main>{% block body %}{% endblock %}</main>"),
    /// ]);
    /// assert!(loader.load("index.html").unwrap().is_some());
    /// assert!(loader.load("missing.html").unwrap().is_none());
    /// ```
    pub fn memory<I, K, V>(sources: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Memory(Arc::new(
            sources
                .into_iter()
                .map(|(name, source)| (name.into(), source.into()))
                .collect(),
        ))
    }

    /// Try each loader in order
    #[must_use]
    pub fn chain(loaders: impl IntoIterator<Item = Self>) -> Self {
        Self::Chain(loaders.into_iter().collect())
    }

    /// Look up the source for `name`
    ///
    /// `Ok(None)` means the name is unknown to this loader.
    pub fn load(&self, name: &str) -> Result<Option<String>, Error> {
        (self.clone().into_source_fn())(name)
    }

    pub(crate) fn into_source_fn(self) -> Box<SourceFn> {
        match self {
            Self::Directory(dir) => Box::new(minijinja::path_loader(dir)),
            Self::Memory(sources) => Box::new(move |name: &str| Ok(sources.get(name).cloned())),
            Self::Chain(loaders) => {
                let sources: Vec<Box<SourceFn>> =
                    loaders.into_iter().map(Self::into_source_fn).collect();
                Box::new(move |name: &str| {
                    for source in &sources {
                        if let Some(found) = source(name)? {
                            return Ok(Some(found));
                        }
                    }
                    Ok(None)
                })
            }
        }
    }
}

impl fmt::Debug for TemplateLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(dir) => f.debug_tuple("Directory").field(dir).finish(),
            Self::Memory(sources) => {
                let mut names: Vec<&String> = sources.keys().collect();
                names.sort();
                f.debug_tuple("Memory").field(&names).finish()
            }
            Self::Chain(loaders) => f.debug_tuple("Chain").field(loaders).finish(),
        }
    }
}
