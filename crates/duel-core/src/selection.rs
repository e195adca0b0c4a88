//! Backend selection
//!
//! Ordered list of selected backend names. Names need not be registered;
//! the aggregator skips the ones it cannot resolve.

use crate::cell::{Version, Versioned};

/// Ordered, duplicate-free name selection
#[derive(Debug, Clone, Default)]
pub struct Selection {
    names: Versioned<Vec<String>>,
}

impl Selection {
    /// Create selection from initial names
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Versioned::new(dedupe(names)),
        }
    }

    /// Replace the selection
    ///
    /// Duplicates are dropped (first occurrence wins). The version is bumped
    /// only if the resulting list differs. Returns true on change.
    pub fn replace<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let changed = self.names.set_if_changed(dedupe(names));
        if changed {
            tracing::debug!(version = %self.names.version(), names = ?self.names.get(), "selection changed");
        }
        changed
    }

    /// Selected names in order
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        self.names.get()
    }

    /// Version of the last change
    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.names.version()
    }

    /// Number of selected names
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.get().len()
    }

    /// Check if nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.get().is_empty()
    }
}

fn dedupe<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_dropped_first_wins() {
        let selection = Selection::new(["Postgres", "DuckDB", "Postgres"]);
        assert_eq!(selection.names(), ["Postgres", "DuckDB"]);
    }

    #[test]
    fn unchanged_replace_keeps_version() {
        let mut selection = Selection::new(["DuckDB", "Postgres"]);
        assert!(!selection.replace(["DuckDB", "Postgres", "DuckDB"]));
        assert_eq!(selection.version(), Version::INITIAL);
    }

    #[test]
    fn reorder_is_a_change() {
        let mut selection = Selection::new(["DuckDB", "Postgres"]);
        assert!(selection.replace(["Postgres", "DuckDB"]));
        assert_eq!(selection.version().get(), 1);
    }

    #[test]
    fn empty_selection() {
        let mut selection = Selection::new(["DuckDB"]);
        assert!(selection.replace(Vec::<String>::new()));
        assert!(selection.is_empty());
    }
}
