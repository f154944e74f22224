//! Template name normalization
//!
//! Handlers refer to templates without their extension (`"index"`); the
//! loader sees file names (`"index.html"`). Normalized names are memoized
//! in a small LRU cache since the same handful of names is looked up on
//! every request.

use parking_lot::Mutex;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Extension appended to template names that lack it
pub const TEMPLATE_EXTENSION: &str = ".html";

/// Normalize a template name
///
/// # Examples
///
/// ```rust
/// use acton_views::template::template_name;
///
/// assert_eq!(template_name("index"), "index.html");
/// assert_eq!(template_name("index.html"), "index.html");
/// assert_eq!(template_name("partials/row"), "partials/row.html");
/// ```
#[must_use]
pub fn template_name(name: &str) -> Cow<'_, str> {
    if name.ends_with(TEMPLATE_EXTENSION) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}{TEMPLATE_EXTENSION}"))
    }
}

/// Bounded LRU cache of normalized template names
///
/// Keyed by the raw name as passed by the caller.
#[derive(Debug)]
pub struct NameCache {
    capacity: usize,
    state: Mutex<LruState>,
}

#[derive(Debug, Default)]
struct LruState {
    entries: HashMap<String, Entry>,
    // tick -> key, oldest first
    order: BTreeMap<u64, String>,
    tick: u64,
}

#[derive(Debug)]
struct Entry {
    value: Arc<str>,
    tick: u64,
}

impl NameCache {
    /// Create a cache holding at most `capacity` names (minimum 1)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(LruState::default()),
        }
    }

    /// Normalize `name`, serving repeated lookups from the cache
    pub fn normalize(&self, name: &str) -> Arc<str> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.tick += 1;
        let tick = state.tick;

        if let Some(entry) = state.entries.get_mut(name) {
            let previous = std::mem::replace(&mut entry.tick, tick);
            state.order.remove(&previous);
            state.order.insert(tick, name.to_owned());
            return Arc::clone(&entry.value);
        }

        if state.entries.len() >= self.capacity {
            if let Some((_, oldest)) = state.order.pop_first() {
                state.entries.remove(&oldest);
            }
        }

        let value: Arc<str> = Arc::from(template_name(name));
        state.entries.insert(
            name.to_owned(),
            Entry {
                value: Arc::clone(&value),
                tick,
            },
        );
        state.order.insert(tick, name.to_owned());
        value
    }

    /// Maximum number of cached names
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached names
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `name` is currently cached
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().entries.contains_key(name)
    }
}

impl Default for NameCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_NAME_CACHE_CAPACITY)
    }
}
