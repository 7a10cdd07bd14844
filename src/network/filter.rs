//! Adapter filtering applied after enumeration.
//!
//! # Design
//!
//! - **Pure Matchers**: [`KindFilter`], [`NameRegexFilter`] and
//!   [`OperStatusFilter`] only answer "does this adapter match?" without
//!   include/exclude semantics.
//! - **Filter Chain**: [`FilterChain`] combines matchers:
//!   - Exclude filters: AND logic (must pass ALL excludes)
//!   - Include filters: OR logic (pass ANY include, empty = match all)
//! - **Decorator**: [`FilteredSource`] applies filtering transparently
//!   to any [`AdapterSource`] implementation.

use std::collections::HashSet;

use regex::Regex;

use super::{AdapterKind, AdapterQuery, AdapterRecord, AdapterSource, FetchError};

/// Trait for filtering adapter records.
///
/// Filters must be `Send + Sync` so a [`FilteredSource`] stays an [`AdapterSource`].
pub trait AdapterFilter: Send + Sync {
    /// Returns `true` if the adapter matches.
    fn matches(&self, adapter: &AdapterRecord) -> bool;
}

/// Matches adapters whose kind is in the configured set.
///
/// # Examples
///
/// ```
/// use adapter_dns::network::filter::{AdapterFilter, KindFilter};
/// use adapter_dns::network::{AdapterKind, AdapterRecord};
///
/// let filter = KindFilter::new([AdapterKind::Wireless, AdapterKind::Ethernet]);
///
/// let eth = AdapterRecord::new(1, "Ethernet", AdapterKind::Ethernet);
/// let loopback = AdapterRecord::new(2, "Loopback", AdapterKind::Loopback);
///
/// assert!(filter.matches(&eth));
/// assert!(!filter.matches(&loopback));
/// ```
#[derive(Debug, Clone)]
pub struct KindFilter {
    kinds: HashSet<AdapterKind>,
}

impl KindFilter {
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = AdapterKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Returns true if no kinds are configured (matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }
}

impl AdapterFilter for KindFilter {
    fn matches(&self, adapter: &AdapterRecord) -> bool {
        self.kinds.contains(&adapter.kind)
    }
}

/// Matches adapters whose friendly name matches a regex.
///
/// # Examples
///
/// ```
/// use adapter_dns::network::filter::{AdapterFilter, NameRegexFilter};
/// use adapter_dns::network::{AdapterKind, AdapterRecord};
///
/// let filter = NameRegexFilter::new(r"^Wi-?Fi").unwrap();
///
/// assert!(filter.matches(&AdapterRecord::new(1, "Wi-Fi", AdapterKind::Wireless)));
/// assert!(!filter.matches(&AdapterRecord::new(2, "Ethernet", AdapterKind::Ethernet)));
/// ```
#[derive(Debug)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// Creates a name filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl AdapterFilter for NameRegexFilter {
    fn matches(&self, adapter: &AdapterRecord) -> bool {
        self.pattern.is_match(&adapter.friendly_name)
    }
}

/// Matches adapters that are operationally up.
///
/// Adapter listings require this filter unless down adapters are asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperStatusFilter;

impl AdapterFilter for OperStatusFilter {
    fn matches(&self, adapter: &AdapterRecord) -> bool {
        adapter.oper_status.is_up()
    }
}

/// Filter chain with include/exclude semantics.
///
/// Evaluation order:
/// 1. **Exclude filters (AND)**: Any match → reject.
/// 2. **Include filters (OR)**: Any match → accept. Empty includes = match all.
///
/// # Examples
///
/// ```
/// use adapter_dns::network::filter::{AdapterFilter, FilterChain, KindFilter};
/// use adapter_dns::network::{AdapterKind, AdapterRecord};
///
/// let chain = FilterChain::new()
///     .exclude(KindFilter::new([AdapterKind::Loopback]))
///     .include(KindFilter::new([AdapterKind::Wireless, AdapterKind::Ethernet]));
///
/// assert!(chain.matches(&AdapterRecord::new(1, "eth0", AdapterKind::Ethernet)));
/// assert!(!chain.matches(&AdapterRecord::new(2, "vm0", AdapterKind::Virtual)));
/// assert!(!chain.matches(&AdapterRecord::new(3, "lo", AdapterKind::Loopback)));
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn AdapterFilter>>,
    excludes: Vec<Box<dyn AdapterFilter>>,
    require: Vec<Box<dyn AdapterFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all adapters).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include filter (OR semantics).
    #[must_use]
    pub fn include<F: AdapterFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude filter; adapters matching it are rejected regardless
    /// of include filters.
    #[must_use]
    pub fn exclude<F: AdapterFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Adds a filter every accepted adapter must match, independent of the
    /// include list.
    #[must_use]
    pub fn require<F: AdapterFilter + 'static>(mut self, filter: F) -> Self {
        self.require.push(Box::new(filter));
        self
    }

    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty() && self.require.is_empty()
    }
}

impl AdapterFilter for FilterChain {
    fn matches(&self, adapter: &AdapterRecord) -> bool {
        if self.excludes.iter().any(|f| f.matches(adapter)) {
            return false;
        }

        if !self.require.iter().all(|f| f.matches(adapter)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(adapter))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .field("require_count", &self.require.len())
            .finish()
    }
}

/// A source decorator that applies a filter to results.
///
/// # Examples
///
/// ```ignore
/// use adapter_dns::network::filter::{FilteredSource, OperStatusFilter};
/// use adapter_dns::network::platform::PlatformSource;
///
/// let source = FilteredSource::new(PlatformSource::new(), OperStatusFilter);
/// let adapters = source.fetch(&AdapterQuery::default())?; // Only adapters that are up
/// ```
#[derive(Debug)]
pub struct FilteredSource<S, A> {
    inner: S,
    filter: A,
}

impl<S, A> FilteredSource<S, A> {
    #[must_use]
    pub const fn new(inner: S, filter: A) -> Self {
        Self { inner, filter }
    }

    pub const fn inner(&self) -> &S {
        &self.inner
    }

    pub const fn filter(&self) -> &A {
        &self.filter
    }
}

impl<S: AdapterSource, A: AdapterFilter> AdapterSource for FilteredSource<S, A> {
    fn fetch(&self, query: &AdapterQuery) -> Result<Vec<AdapterRecord>, FetchError> {
        let records = self.inner.fetch(query)?;
        let total = records.len();
        let kept: Vec<_> = records
            .into_iter()
            .filter(|adapter| self.filter.matches(adapter))
            .collect();
        tracing::debug!("Filter kept {} of {} adapter(s)", kept.len(), total);
        Ok(kept)
    }
}

impl<T: AdapterFilter + ?Sized> AdapterFilter for &T {
    fn matches(&self, adapter: &AdapterRecord) -> bool {
        (*self).matches(adapter)
    }
}

impl AdapterFilter for Box<dyn AdapterFilter> {
    fn matches(&self, adapter: &AdapterRecord) -> bool {
        self.as_ref().matches(adapter)
    }
}
