//! Identifier catalog: the set of AEP numbers that exist on disk.
//!
//! Every immediate subdirectory of the document root whose name is made
//! only of decimal digits (`0001`, `122`) is one identifier.

use crate::error::CatalogError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Immutable set of known document identifiers.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    ids: HashSet<String>,
}

impl Catalog {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in lexicographic order, for stable reporting.
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<S: Into<String>> FromIterator<S> for Catalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Build the catalog from the immediate children of `root`.
///
/// A missing root is an error: without a catalog, cross-references
/// cannot be validated at all.
pub fn build_catalog(root: &Path) -> Result<Catalog, CatalogError> {
    if !root.exists() {
        return Err(CatalogError::RootNotFound(root.to_path_buf()));
    }
    let entries = fs::read_dir(root).map_err(|source| CatalogError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut ids = HashSet::new();
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::debug!("skipping non UTF-8 entry {:?}", entry.path());
            continue;
        };
        if is_identifier(name) {
            ids.insert(name.to_string());
        }
    }
    tracing::debug!(count = ids.len(), root = %root.display(), "built identifier catalog");
    Ok(Catalog { ids })
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}
